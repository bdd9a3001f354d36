use comfy_table::{Cell, CellAlignment};
use log::info;

use crate::controller::{format_amount, plain_table, save_settings, Session};
use crate::parser::BudgetEntry;
use crate::util;

/// Show the budget that applies to a month
pub(crate) fn execute_budget(session: &Session, month: Option<(i32, u32)>, owner: Option<String>) {
    let (year, month) = month.unwrap_or_else(util::current_month);
    let budgets = session.settings.budgets_for(year, month, owner.as_deref());

    let owner_label = owner.as_ref().map(|o| format!(" ({o})")).unwrap_or_default();
    info!("Budget for {}{owner_label}", util::month_key(year, month));

    let mut categories: Vec<&String> = budgets.keys().collect();
    categories.sort_unstable();

    let mut table = plain_table();
    table.set_header(vec!["Category", "Budget"]);
    let mut total = 0.0;
    for category in categories {
        let amount = budgets.get(category).copied().unwrap_or(0.0);
        total += amount;
        table.add_row(vec![
            Cell::new(category.as_str()),
            Cell::new(format_amount(amount).as_str()).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total"),
        Cell::new(format_amount(total).as_str()).set_alignment(CellAlignment::Right),
    ]);
    println!("{table}");
}

/// Set one budget amount. Without a month it changes the standing default.
pub(crate) fn execute_budget_set(session: &mut Session, entry: &BudgetEntry) {
    if !session.settings.categories.contains(&entry.category) {
        info!("Unknown category '{}'. See `categories`.", entry.category);
        return;
    }

    let period_key = match (entry.month, &entry.owner) {
        (Some((year, month)), Some(owner)) => format!("{}_{owner}", util::month_key(year, month)),
        (Some((year, month)), None) => util::month_key(year, month),
        (None, Some(owner)) => format!("default_{owner}"),
        (None, None) => "default".to_string(),
    };
    session.settings.set_budget(&period_key, &entry.category, entry.amount);
    save_settings(session);
    info!("Budget for '{}' set to {} ({period_key}).", entry.category, format_amount(entry.amount));
}
