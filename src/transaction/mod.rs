use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Hold transaction info returned from ledger queries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Transaction {
    pub(crate) id: u32,
    pub(crate) date: NaiveDate,
    /// Billing month the row counts against, e.g. the credit card statement month
    pub(crate) reference_date: NaiveDate,
    pub(crate) title: String,
    pub(crate) amount: f32,
    pub(crate) category: String,
    pub(crate) owner: String,
    pub(crate) installment: Option<String>,
}

impl Transaction {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(id: u32, date: NaiveDate, reference_date: NaiveDate, title: &str, amount: f32,
                      category: String, owner: String, installment: Option<String>) -> Transaction {
        let title = title.replace('\n', " ");
        Transaction {
            id,
            date,
            reference_date,
            title,
            amount,
            category,
            owner,
            installment,
        }
    }

    pub(crate) fn reference_month(&self) -> (i32, u32) {
        (self.reference_date.year(), self.reference_date.month())
    }
}

/// A row about to enter the ledger, before it has an id
#[derive(Debug, Clone)]
pub(crate) struct NewTransaction {
    pub(crate) date: NaiveDate,
    pub(crate) reference_date: NaiveDate,
    pub(crate) title: String,
    pub(crate) amount: f32,
    pub(crate) category: String,
    pub(crate) owner: String,
    pub(crate) installment: Option<String>,
}
