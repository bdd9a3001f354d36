use std::collections::HashMap;

use comfy_table::{Cell, CellAlignment};
use log::info;

use crate::categoriser::PAGAMENTO_CREDITO;
use crate::controller::{format_amount, plain_table, Session};
use crate::parser::ListFilter;
use crate::transaction::Transaction;
use crate::util;

/// Monthly dashboard: net spend against budget per category, income against
/// spend, and the heaviest merchants.
pub(crate) fn execute_summary(session: &Session, month: Option<(i32, u32)>, owner: Option<String>) {
    let (year, month) = month.unwrap_or_else(util::current_month);
    let transactions = session.ledger.query(&ListFilter {
        month: Some((year, month)),
        owner: owner.clone(),
        category: None,
    });
    let budgets = session.settings.budgets_for(year, month, owner.as_deref());

    let owner_label = owner.as_ref().map(|o| format!(" ({o})")).unwrap_or_default();
    info!("Summary for {}{owner_label}", util::month_key(year, month));

    // Net spend per category. Refunds inside a category cancel out.
    let mut spent_by_category: HashMap<&str, f32> = HashMap::new();
    let mut total_spent = 0.0;
    for t in &transactions {
        if t.category == PAGAMENTO_CREDITO {
            continue;
        }
        *spent_by_category.entry(t.category.as_str()).or_insert(0.0) += t.amount;
        total_spent += t.amount;
    }

    let mut categories: Vec<&str> = budgets.keys().map(|c| c.as_str())
        .chain(spent_by_category.keys().copied())
        .collect();
    categories.sort_unstable();
    categories.dedup();

    let mut table = plain_table();
    table.set_header(vec!["Category", "Spent", "Budget", "Remaining"]);
    let mut total_budget = 0.0;
    for category in categories {
        let spent = spent_by_category.get(category).copied().unwrap_or(0.0);
        let budget = budgets.get(category).copied().unwrap_or(0.0);
        total_budget += budget;
        if spent == 0.0 && budget == 0.0 {
            continue;
        }
        table.add_row(vec![
            Cell::new(category),
            Cell::new(format_amount(spent).as_str()).set_alignment(CellAlignment::Right),
            Cell::new(format_amount(budget).as_str()).set_alignment(CellAlignment::Right),
            Cell::new(format_amount(budget - spent).as_str()).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total"),
        Cell::new(format_amount(total_spent).as_str()).set_alignment(CellAlignment::Right),
        Cell::new(format_amount(total_budget).as_str()).set_alignment(CellAlignment::Right),
        Cell::new(format_amount(total_budget - total_spent).as_str()).set_alignment(CellAlignment::Right),
    ]);
    println!("{table}");

    let income: f32 = session.ledger.income_in(util::month_range(year, month)).iter()
        .filter(|entry| owner.as_ref().map_or(true, |o| &entry.owner == o))
        .map(|entry| entry.amount)
        .sum();
    info!("Income {} | Spending {} | Balance {}",
        format_amount(income), format_amount(total_spent), format_amount(income - total_spent));

    top_merchants(&transactions);
}

fn top_merchants(transactions: &[Transaction]) {
    let mut by_merchant: HashMap<&str, f32> = HashMap::new();
    for t in transactions {
        if t.category == PAGAMENTO_CREDITO || t.amount <= 0.0 {
            continue;
        }
        *by_merchant.entry(t.title.as_str()).or_insert(0.0) += t.amount;
    }
    if by_merchant.is_empty() {
        return;
    }

    let mut merchants: Vec<(&str, f32)> = by_merchant.into_iter().collect();
    merchants.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    merchants.truncate(5);

    let mut table = plain_table();
    table.set_header(vec!["Top merchants", "Spent"]);
    for (merchant, amount) in merchants {
        table.add_row(vec![
            Cell::new(merchant),
            Cell::new(format_amount(amount).as_str()).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
}
