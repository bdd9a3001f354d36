use std::io::{stdout, Error};

use crossterm::{execute, terminal};
use crossterm::cursor::{MoveTo, MoveToColumn};
use crossterm::event::{read, Event, KeyCode};
use crossterm::style::{self, Color, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

use crate::transaction::Transaction;

/// One line of the review screen: a transaction plus the category the
/// suggestion engine proposes for it. Rows without a proposal are shown for
/// context but can never be accepted.
pub(crate) struct ReviewRow {
    pub(crate) transaction: Transaction,
    pub(crate) suggested: Option<String>,
    pub(crate) accepted: bool,
}

impl ReviewRow {
    pub(crate) fn new(transaction: Transaction, suggested: Option<String>) -> ReviewRow {
        let accepted = suggested.is_some();
        ReviewRow { transaction, suggested, accepted }
    }
}

/// Open a terminal dialog to review category suggestions in a live table.
/// Returns the accepted (transaction id, category) pairs, or None if the
/// user backed out with `q`.
/// TODO: handle terminal resize
pub(crate) fn review(mut rows: Vec<ReviewRow>) -> Result<Option<Vec<(u32, String)>>, Error> {
    if rows.is_empty() {
        return Ok(Some(vec![]));
    }

    execute!(stdout(), EnterAlternateScreen, MoveTo(0, 0))?;
    terminal::enable_raw_mode()?;
    let (_columns, screen_rows) = terminal::size()?;
    // Last line is reserved for the key helper
    let table_rows = if screen_rows > 1 { screen_rows - 1 } else { screen_rows };

    let mut window = Window {
        rows: table_rows,
        row_count: rows.len(),
        offset: 0,
        selected_row: 0,
    };

    paint_footer(table_rows);
    repaint_window(window.repaint(), &rows, window.selected_row);

    let mut confirmed = None;
    loop {
        // `read()` blocks until an `Event` is available
        if let Event::Key(event) = read()? {
            match event.code {
                KeyCode::Char('q') => break,
                KeyCode::Char('j') => {
                    let delta = window.move_down();
                    repaint_window(delta, &rows, window.selected_row);
                }
                KeyCode::Char('k') => {
                    let delta = window.move_up();
                    repaint_window(delta, &rows, window.selected_row);
                }
                KeyCode::Char(' ') => {
                    let index = window.selected_index();
                    if rows[index].suggested.is_some() {
                        rows[index].accepted = !rows[index].accepted;
                        repaint_window(vec![(window.selected_row, index, true)], &rows, window.selected_row);
                    }
                }
                KeyCode::Char('a') => {
                    let any_accepted = rows.iter().any(|row| row.accepted);
                    for row in rows.iter_mut() {
                        row.accepted = !any_accepted && row.suggested.is_some();
                    }
                    repaint_window(window.repaint(), &rows, window.selected_row);
                }
                KeyCode::Char('e') => {
                    execute!(stdout(), MoveTo(0, table_rows), terminal::Clear(ClearType::CurrentLine), style::Print("category: ")).unwrap();
                    terminal::disable_raw_mode()?;
                    let mut category = String::new();
                    std::io::stdin().read_line(&mut category)?;
                    terminal::enable_raw_mode()?;

                    let category = category.trim();
                    let index = window.selected_index();
                    if !category.is_empty() {
                        rows[index].suggested = Some(category.to_string());
                        rows[index].accepted = true;
                    }
                    paint_footer(table_rows);
                    repaint_window(vec![(window.selected_row, index, true)], &rows, window.selected_row);
                }
                KeyCode::Enter => {
                    confirmed = Some(rows.iter()
                        .filter(|row| row.accepted && row.suggested.is_some())
                        .map(|row| (row.transaction.id, row.suggested.clone().unwrap_or_default()))
                        .collect());
                    break;
                }
                _ => {}
            }
        }
    }

    terminal::disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    Ok(confirmed)
}

struct Window {
    /// Number of table rows in this window
    rows: u16,

    /// Number of total review rows
    row_count: usize,

    /// Scrolling offset
    offset: usize,

    /// The row that is selected. 0 <= selected_row < rows
    selected_row: u16,
}

impl Window {
    fn selected_index(&self) -> usize {
        self.offset + self.selected_row as usize
    }

    fn repaint(&mut self) -> Vec<(u16, usize, bool)> {
        let remaining_row_count = self.row_count - self.offset;
        let print_row_count: usize = if remaining_row_count > self.rows as usize { self.rows as usize } else { remaining_row_count };
        let mut delta: Vec<(u16, usize, bool)> = vec![];
        for i in 0..print_row_count {
            delta.push((i as u16, self.offset + i, i as u16 == self.selected_row));
        }
        delta
    }

    fn move_down(&mut self) -> Vec<(u16, usize, bool)> {
        if self.offset + self.selected_row as usize >= self.row_count - 1 {
            return vec![];
        }

        if self.selected_row < self.rows - 1 {
            let mut delta = vec![];
            delta.push((self.selected_row, self.offset + self.selected_row as usize, false));
            self.selected_row += 1;
            delta.push((self.selected_row, self.offset + self.selected_row as usize, true));
            delta
        } else {
            self.scroll_up()
        }
    }

    fn scroll_up(&mut self) -> Vec<(u16, usize, bool)> {
        if self.offset + self.rows as usize >= self.row_count {
            return vec![];
        }

        self.offset += 1;
        let mut delta = vec![];
        for i in 0..self.rows - 1 {
            delta.push((i, self.offset + i as usize, false));
        }
        delta.push((self.rows - 1, self.offset + self.rows as usize - 1, true));
        delta
    }

    fn move_up(&mut self) -> Vec<(u16, usize, bool)> {
        if self.offset + self.selected_row as usize == 0 {
            return vec![];
        }

        if self.selected_row > 0 {
            let mut delta = vec![];
            delta.push((self.selected_row, self.offset + self.selected_row as usize, false));
            self.selected_row -= 1;
            delta.push((self.selected_row, self.offset + self.selected_row as usize, true));
            delta
        } else {
            self.scroll_down()
        }
    }

    fn scroll_down(&mut self) -> Vec<(u16, usize, bool)> {
        if self.offset == 0 {
            return vec![];
        }

        self.offset -= 1;
        let mut delta = vec![];
        delta.push((0, self.offset, true));
        for i in 1..self.rows {
            delta.push((i, self.offset + i as usize, false));
        }
        delta
    }
}

fn repaint_window(delta: Vec<(u16, usize, bool)>, rows: &[ReviewRow], selected_row: u16) {
    for (screen_row, row_index, highlight) in delta {
        execute!(stdout(), MoveTo(0, screen_row), terminal::Clear(ClearType::CurrentLine)).unwrap();
        print_row(&rows[row_index], highlight);
    }
    execute!(stdout(), MoveTo(0, selected_row)).unwrap();
}

fn paint_footer(footer_row: u16) {
    execute!(
        stdout(),
        MoveTo(0, footer_row),
        terminal::Clear(ClearType::CurrentLine),
        style::Print("j/k move   space toggle   e edit   a all   enter apply   q cancel"),
    ).unwrap();
}

/// Print a single review row, in current terminal line
fn print_row(row: &ReviewRow, highlight: bool) {
    if highlight {
        execute!(stdout(), SetForegroundColor(Color::Black), SetBackgroundColor(Color::White)).unwrap();
    }
    let marker = if row.accepted && row.suggested.is_some() { "[x]" } else { "[ ]" };
    let suggested = match &row.suggested {
        Some(category) => category.as_str(),
        None => "",
    };
    let t = &row.transaction;
    execute!(stdout(), style::Print(format!("{} | {:4} | {} | {:40} | {:>10.2} | {:22} | {:22}",
                                            marker, t.id, t.date, truncated(&t.title, 40), t.amount,
                                            truncated(&t.category, 22), truncated(suggested, 22))), MoveToColumn(0)).unwrap();
    if highlight {
        execute!(stdout(), SetForegroundColor(Color::White), SetBackgroundColor(Color::Black)).unwrap();
    }
}

fn truncated(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let mut cut_down_version: String = text.chars().take(max_chars - 1).collect();
        cut_down_version.push('…');
        cut_down_version
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{truncated, Window};

    #[test]
    fn window_scrolls_when_selection_leaves_the_screen() {
        let mut window = Window { rows: 3, row_count: 5, offset: 0, selected_row: 0 };

        window.move_down();
        window.move_down();
        assert_eq!(window.selected_index(), 2);
        assert_eq!(window.offset, 0);

        // Selection sits on the last screen row, next move scrolls
        window.move_down();
        assert_eq!(window.offset, 1);
        assert_eq!(window.selected_index(), 3);

        window.move_down();
        assert_eq!(window.selected_index(), 4);
        assert!(window.move_down().is_empty());

        for _ in 0..4 {
            window.move_up();
        }
        assert_eq!(window.selected_index(), 0);
        assert_eq!(window.offset, 0);
        assert!(window.move_up().is_empty());
    }

    #[test]
    fn truncation_is_char_aware() {
        assert_eq!(truncated("Caxambu", 10), "Caxambu");
        assert_eq!(truncated("Feira São João Centro", 10), "Feira São…");
    }
}
