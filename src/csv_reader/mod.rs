use std::fmt;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;

use crate::csv_reader::column::ColumnInfo;

pub(crate) mod column;
#[cfg(test)]
mod tests;

/// A row read from a bank statement file, before it is enriched with
/// category, owner and reference month.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StatementRow {
    pub(crate) date: NaiveDate,
    pub(crate) title: String,
    pub(crate) amount: f32,
    pub(crate) installment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementError {
    FileNotFound(String),
    InvalidFile(String),
}

impl fmt::Display for StatementError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "statement reading error: {}",
            match self {
                StatementError::FileNotFound(s) => s,
                StatementError::InvalidFile(s) => s,
            }
        )
    }
}

impl std::error::Error for StatementError {}

lazy_static! {
    static ref INSTALLMENT: Regex = Regex::new(r"(?i)Parcela\s+\d+/\d+").unwrap();
    static ref PERIOD_DASH: Regex = Regex::new(r"(\d{4})-(\d{2})(?:-\d{2})?").unwrap();
    static ref PERIOD_COMPACT: Regex = Regex::new(r"(\d{4})(\d{2})(\d{2})").unwrap();
    static ref PERIOD_UNDERSCORE: Regex = Regex::new(r"(\d{4})_(\d{2})").unwrap();
}

/// Read every usable row from a statement file. Rows without a parseable
/// date are dropped; rows with an unreadable amount are kept at 0.00 so the
/// user still sees them.
pub(crate) fn read_statement(file_path: &Path) -> Result<Vec<StatementRow>, StatementError> {
    if !file_path.exists() {
        return Err(StatementError::FileNotFound(format!("{}", file_path.display())));
    }

    let delimiter = column::detect_delimiter(file_path)?;
    info!("Scanning CSV columns from {:?}", file_path);
    let columns: ColumnInfo = column::detect_columns(file_path, delimiter)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(columns.has_header)
        .delimiter(delimiter)
        .from_path(file_path)
        .map_err(|e| StatementError::InvalidFile(e.to_string()))?;

    let mut rows: Vec<StatementRow> = vec![];
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping unreadable row: {e}");
                continue;
            }
        };

        let date_field = record.get(columns.date_column).unwrap_or("");
        let date = match parse_date(date_field) {
            Some(date) => date,
            None => {
                warn!("Skipping row with unparseable date {date_field:?}");
                continue;
            }
        };

        let title = record.get(columns.title_column).unwrap_or("").trim().to_string();

        let amount_field = record.get(columns.amount_column).unwrap_or("");
        let amount = match clean_amount(amount_field) {
            Some(amount) => amount,
            None => {
                warn!("Unparseable amount {amount_field:?}, keeping row with 0.00");
                0.0
            }
        };

        let installment = extract_installment(&title);
        rows.push(StatementRow { date, title, amount, installment });
    }

    Ok(rows)
}

pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%d/%m/%Y") {
        return Some(date);
    }
    if let Some(prefix) = s.get(0..19) {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(prefix, "%Y-%m-%dT%H:%M:%S") {
            return Some(date_time.date());
        }
    }
    NaiveDate::parse_from_str(s, "%d-%m-%Y").ok()
}

/// Parse money the way bank files write it: "R$ 1.234,56", "1234,56",
/// "1,234.56" or a plain decimal.
pub(crate) fn clean_amount(s: &str) -> Option<f32> {
    let cleaned: String = s.replace("R$", "").replace(['$', ' '], "");
    if cleaned.is_empty() {
        return None;
    }

    let normalised = match (cleaned.rfind(','), cleaned.rfind('.')) {
        // comma after dot is the Brazilian decimal, dot after comma the US one
        (Some(comma), Some(dot)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(_), None) => cleaned.replace(',', "."),
        _ => cleaned,
    };

    normalised.parse::<f32>().ok()
}

/// "NETSHOES Parcela 2/5" -> "Parcela 2/5"
pub(crate) fn extract_installment(title: &str) -> Option<String> {
    INSTALLMENT.find(title).map(|m| m.as_str().to_string())
}

/// Statement files usually carry their billing period in the name, e.g.
/// "nubank-2026-01.csv", "fatura-20260128.csv" or "extrato_2026_02.csv".
pub(crate) fn extract_period_from_filename(filename: &str) -> Option<(i32, u32)> {
    if let Some(captures) = PERIOD_DASH.captures(filename) {
        let year: i32 = captures[1].parse().ok()?;
        let month: u32 = captures[2].parse().ok()?;
        if (1..=12).contains(&month) && (2020..=2050).contains(&year) {
            return Some((year, month));
        }
    }

    if let Some(captures) = PERIOD_COMPACT.captures(filename) {
        let year: i32 = captures[1].parse().ok()?;
        let month: u32 = captures[2].parse().ok()?;
        let day: u32 = captures[3].parse().ok()?;
        if (1..=12).contains(&month) && (1..=31).contains(&day) && (2020..=2050).contains(&year) {
            return Some((year, month));
        }
    }

    if let Some(captures) = PERIOD_UNDERSCORE.captures(filename) {
        let year: i32 = captures[1].parse().ok()?;
        let month: u32 = captures[2].parse().ok()?;
        if (1..=12).contains(&month) && (2020..=2050).contains(&year) {
            return Some((year, month));
        }
    }

    None
}
