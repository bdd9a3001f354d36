use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use csv::StringRecord;
use lazy_static::lazy_static;
use regex::Regex;

use crate::csv_reader::{clean_amount, parse_date, StatementError};

/// Which column holds what in a statement file. Once a CSV is parsed we need
/// to know which column stores the date, which the title, which the amount.
/// 0-based index.
pub(crate) struct ColumnInfo {
    /// Does this CSV file have a header row
    pub(crate) has_header: bool,
    pub(crate) date_column: usize,
    pub(crate) title_column: usize,
    pub(crate) amount_column: usize,
}

lazy_static! {
    static ref DATE_HEADER: Regex = Regex::new(r"(?i)data|date|dia|dt").unwrap();
    static ref TITLE_HEADER: Regex =
        Regex::new(r"(?i)descri|title|hist[oó]rico|estab|loja|nome|lan[cç]amento|t[ií]tulo").unwrap();
    static ref AMOUNT_HEADER: Regex = Regex::new(r"(?i)valor|amount|pre[cç]o|r\$").unwrap();
}

/// Local bank exports are split between ',' and ';'.
pub(crate) fn detect_delimiter(file_path: &Path) -> Result<u8, StatementError> {
    let file = File::open(file_path).map_err(|e| StatementError::FileNotFound(e.to_string()))?;
    let mut first_line = String::new();
    BufReader::new(file)
        .read_line(&mut first_line)
        .map_err(|e| StatementError::InvalidFile(e.to_string()))?;

    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    if semicolons > commas {
        Ok(b';')
    } else {
        Ok(b',')
    }
}

/// Work out where date, title and amount live. The first row is a header
/// when it names a known column and none of its cells parses as a date.
pub(crate) fn detect_columns(file_path: &Path, delimiter: u8) -> Result<ColumnInfo, StatementError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .from_path(file_path)
        .map_err(|e| StatementError::InvalidFile(e.to_string()))?;

    let mut first_row = StringRecord::new();
    let has_first_row = reader
        .read_record(&mut first_row)
        .map_err(|e| StatementError::InvalidFile(e.to_string()))?;
    if !has_first_row {
        return Err(StatementError::InvalidFile("file has no rows".to_string()));
    }

    let mut first_row_joined = String::new();
    for column in first_row.iter() {
        first_row_joined.push_str(column);
        first_row_joined.push('|');
    }

    let names_a_column = DATE_HEADER.is_match(&first_row_joined)
        || TITLE_HEADER.is_match(&first_row_joined)
        || AMOUNT_HEADER.is_match(&first_row_joined);
    let looks_like_data = first_row.iter().any(|cell| parse_date(cell).is_some());

    if names_a_column && !looks_like_data {
        columns_from_header(&first_row)
    } else {
        sniff_columns(file_path, delimiter)
    }
}

fn columns_from_header(headers: &StringRecord) -> Result<ColumnInfo, StatementError> {
    let mut date_column: Option<usize> = None;
    for (i, name) in headers.iter().enumerate() {
        if DATE_HEADER.is_match(name) {
            date_column = Some(i);
            break;
        }
    }
    let date_column = match date_column {
        Some(i) => i,
        None => return Err(StatementError::InvalidFile("Unable to locate a date column".to_string())),
    };

    let mut title_column: Option<usize> = None;
    for (i, name) in headers.iter().enumerate() {
        if i != date_column && TITLE_HEADER.is_match(name) {
            title_column = Some(i);
            break;
        }
    }
    let title_column = match title_column {
        Some(i) => i,
        None => return Err(StatementError::InvalidFile("Unable to locate a title column".to_string())),
    };

    let mut amount_column: Option<usize> = None;
    for (i, name) in headers.iter().enumerate() {
        if i != date_column && i != title_column && AMOUNT_HEADER.is_match(name) {
            amount_column = Some(i);
            break;
        }
    }
    let amount_column = match amount_column {
        Some(i) => i,
        None => return Err(StatementError::InvalidFile("Unable to locate an amount column".to_string())),
    };

    Ok(ColumnInfo { has_header: true, date_column, title_column, amount_column })
}

/// Without a header the columns are sniffed from the shape of the first
/// rows: dates parse as dates, amounts as money, the first column that is
/// neither must be the title.
fn sniff_columns(file_path: &Path, delimiter: u8) -> Result<ColumnInfo, StatementError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .from_path(file_path)
        .map_err(|e| StatementError::InvalidFile(e.to_string()))?;

    let mut rows: Vec<StringRecord> = vec![];
    for (i, row) in reader.records().enumerate() {
        if i >= 5 {
            break;
        }
        match row {
            Ok(row) => rows.push(row),
            Err(e) => return Err(StatementError::InvalidFile(e.to_string())),
        }
    }
    if rows.is_empty() {
        return Err(StatementError::InvalidFile("file has no rows".to_string()));
    }

    let num_columns = rows[0].len();
    let mut date_column = None;
    let mut amount_column = None;
    let mut title_column = None;

    for i in 0..num_columns {
        if date_column.is_none() && column_match_date(i, &rows) {
            date_column = Some(i);
        } else if amount_column.is_none() && column_match_amount(i, &rows) {
            amount_column = Some(i);
        } else if title_column.is_none() {
            title_column = Some(i);
        }
    }

    match (date_column, title_column, amount_column) {
        (Some(date_column), Some(title_column), Some(amount_column)) => {
            Ok(ColumnInfo { has_header: false, date_column, title_column, amount_column })
        }
        _ => Err(StatementError::InvalidFile(
            "Unable to work out date, title and amount columns".to_string(),
        )),
    }
}

fn column_match_date(column: usize, rows: &[StringRecord]) -> bool {
    rows.iter().all(|row| row.get(column).and_then(parse_date).is_some())
}

fn column_match_amount(column: usize, rows: &[StringRecord]) -> bool {
    rows.iter().all(|row| row.get(column).and_then(clean_amount).is_some())
}
