use csv::WriterBuilder;
use log::info;

use crate::parser::ListFilter;
use crate::store::Ledger;

/// Export the full ledger to a CSV file
pub(crate) fn execute_export(ledger: &Ledger, file_path: &str) -> anyhow::Result<()> {
    let transactions = ledger.query(&ListFilter::default());
    let mut csv_writer = WriterBuilder::new().has_headers(true).from_path(file_path)?;
    let count = transactions.len();
    for t in transactions {
        csv_writer.serialize(t)?;
    }
    csv_writer.flush()?;

    info!("Exported {count} transactions to {file_path}.");
    Ok(())
}
