use comfy_table::{Cell, CellAlignment};
use log::info;

use crate::controller::{format_amount, plain_table, save_settings, Session, DEFAULT_OWNER};
use crate::parser::NewIncome;
use crate::store::IncomeRecord;
use crate::util;

/// Show the income entries of a month
pub(crate) fn execute_income(session: &Session, month: Option<(i32, u32)>) {
    let (year, month) = month.unwrap_or_else(util::current_month);
    let entries = session.ledger.income_in(util::month_range(year, month));

    info!("Income for {}", util::month_key(year, month));
    if entries.is_empty() {
        info!("No income recorded.");
        return;
    }

    let mut table = plain_table();
    table.set_header(vec!["Date", "Source", "Owner", "Amount"]);
    let mut total = 0.0;
    for entry in &entries {
        total += entry.amount;
        table.add_row(vec![
            Cell::new(entry.date.to_string().as_str()),
            Cell::new(entry.source.as_str()),
            Cell::new(entry.owner.as_str()),
            Cell::new(format_amount(entry.amount).as_str()).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total"),
        Cell::new(""),
        Cell::new(""),
        Cell::new(format_amount(total).as_str()).set_alignment(CellAlignment::Right),
    ]);
    println!("{table}");
}

/// Record one income entry. New sources are added to the settings so they
/// show up in the known source list.
pub(crate) fn execute_income_add(session: &mut Session, income: &NewIncome) {
    let owner = income.owner.clone().unwrap_or_else(|| DEFAULT_OWNER.to_string());
    session.ledger.add_income(IncomeRecord {
        date: income.date,
        source: income.source.clone(),
        amount: income.amount,
        owner,
    });
    session.ledger.save();

    if !session.settings.income_sources.contains(&income.source) {
        session.settings.income_sources.push(income.source.clone());
        save_settings(session);
    }

    info!("Income of {} from '{}' recorded.", format_amount(income.amount), income.source);
}
