use std::path::PathBuf;

use chrono::NaiveDate;

use crate::csv_reader::{clean_amount, extract_installment, extract_period_from_filename, read_statement, StatementError};

#[test]
fn read_headered_statement() {
    let rows = read_statement(&fixture_filename("nubank-2026-01.csv")).unwrap();
    assert_eq!(rows.len(), 4);

    assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
    assert_eq!(rows[0].title, "Uber Trip Sao Paulo");
    assert_eq!(rows[0].amount, 24.9);
    assert_eq!(rows[0].installment, None);

    // payments come in negative and stay negative
    assert_eq!(rows[3].amount, -1200.0);
}

#[test]
fn read_semicolon_statement_with_br_formats() {
    let rows = read_statement(&fixture_filename("itau-fatura-2026-02.csv")).unwrap();
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2026, 2, 5).unwrap());
    assert_eq!(rows[0].title, "POSTO SHELL JARDINS");
    assert_eq!(rows[0].amount, 250.0);

    assert_eq!(rows[1].installment, Some("Parcela 2/5".to_string()));
    assert_eq!(rows[2].amount, 1234.56);
}

#[test]
fn read_statement_without_header() {
    let rows = read_statement(&fixture_filename("cartao-sem-cabecalho.csv")).unwrap();
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].title, "COBASI PET SHOP");
    assert_eq!(rows[0].amount, 120.5);
    assert_eq!(rows[2].amount, -500.0);
}

#[test]
fn missing_file() {
    let result = read_statement(&fixture_filename("no-such-statement.csv"));
    assert!(matches!(result, Err(StatementError::FileNotFound(_))));
}

#[test]
fn amount_formats() {
    assert_eq!(clean_amount("R$ 1.234,56"), Some(1234.56));
    assert_eq!(clean_amount("1234,56"), Some(1234.56));
    assert_eq!(clean_amount("1,234.56"), Some(1234.56));
    assert_eq!(clean_amount("120.50"), Some(120.5));
    assert_eq!(clean_amount("-500.00"), Some(-500.0));
    assert_eq!(clean_amount(""), None);
    assert_eq!(clean_amount("abc"), None);
}

#[test]
fn installment_markers() {
    assert_eq!(extract_installment("NETSHOES Parcela 2/5"), Some("Parcela 2/5".to_string()));
    assert_eq!(extract_installment("parcela 10/12 MAGALU"), Some("parcela 10/12".to_string()));
    assert_eq!(extract_installment("MERCADO EXTRA"), None);
}

#[test]
fn period_from_filename() {
    assert_eq!(extract_period_from_filename("nubank-2026-01.csv"), Some((2026, 1)));
    assert_eq!(extract_period_from_filename("fatura-20260128.csv"), Some((2026, 1)));
    assert_eq!(extract_period_from_filename("extrato_2026_02.csv"), Some((2026, 2)));
    assert_eq!(extract_period_from_filename("fatura-2026-13.csv"), None);
    assert_eq!(extract_period_from_filename("extrato.csv"), None);
}

/// Return the path to a file within the test data directory
pub(crate) fn fixture_filename(filename: &str) -> PathBuf {
    let mut dir = fixture_dir();
    dir.push(filename);
    dir
}

pub(crate) fn fixture_dir() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.push("fixture");
    dir
}
