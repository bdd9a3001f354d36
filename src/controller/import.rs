use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use comfy_table::{Table, TableComponent};
use log::{info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::categoriser::RuleClassifier;
use crate::config::Config;
use crate::controller::{format_amount, Session, DEFAULT_OWNER};
use crate::csv_reader;
use crate::parser::ImportOptions;
use crate::store::Ledger;
use crate::transaction::NewTransaction;

/// Import statement files from a path. A directory is scanned recursively;
/// files already recorded in the ledger are skipped.
pub(crate) fn execute_import(session: &mut Session, path_arg: &str, options: &ImportOptions) {
    let mut root = PathBuf::from(path_arg);
    if !root.exists() {
        root = session.statements_dir.join(path_arg);
    }
    if !root.exists() {
        warn!("No such file or directory: {path_arg}");
        return;
    }

    let (base_dir, files) = if root.is_file() {
        let base_dir = root.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
        let file_name = root.file_name().and_then(|n| n.to_str()).unwrap_or(path_arg);
        (base_dir, BTreeSet::from([file_name.to_string()]))
    } else {
        match scan_files(&root) {
            Ok(files) => (root.clone(), files),
            Err(e) => {
                warn!("Unable to scan {}: {e}", root.display());
                return;
            }
        }
    };

    let new_files = diff_files(&session.ledger, &files);
    if new_files.is_empty() {
        info!("No new statement files detected.");
        return;
    }

    let classifier = RuleClassifier::new(&Config::load_from_file(&session.rules_file));
    let mut imported = 0usize;
    for file_id in new_files.iter() {
        let path = base_dir.join(file_id);
        match copy_from_csv(path.as_path(), file_id, session, &classifier, options) {
            Ok(count) => {
                imported += count;
                if !options.dry_run {
                    match fs::read(&path) {
                        Ok(bytes) => {
                            let checksum = format!("{:x}", md5::compute(bytes));
                            session.ledger.record_import(file_id, checksum);
                        }
                        Err(e) => warn!("Unable to checksum {}: {e}", path.display()),
                    }
                }
            }
            Err(e) => {
                warn!("{e}");
            }
        }
    }

    if !options.dry_run {
        session.ledger.save();
        info!("Imported {imported} transactions from {} files.", new_files.len());
    }
}

fn copy_from_csv(path: &Path, file_id: &str, session: &mut Session, classifier: &RuleClassifier, options: &ImportOptions) -> anyhow::Result<usize> {
    if options.dry_run {
        info!("Dry run. Printing transactions from {}", path.display());
    } else {
        info!("Importing transactions from {}", path.display());
    }

    let rows = csv_reader::read_statement(path)?;

    // Reference month: explicit option wins, then the statement file name,
    // then each row keeps its own date.
    let reference = options.reference
        .or_else(|| path.file_name().and_then(|n| n.to_str()).and_then(csv_reader::extract_period_from_filename));
    let owner = match &options.owner {
        Some(owner) => owner.clone(),
        // Derive the owner from the first segment of the file id,
        // e.g. ana/fatura-2026-01.csv belongs to 'ana'.
        None => match file_id.split_once(std::path::MAIN_SEPARATOR) {
            Some((first_segment, _)) => first_segment.to_string(),
            None => DEFAULT_OWNER.to_string(),
        },
    };

    if options.dry_run {
        let mut table = Table::new();
        table.set_header(vec!["Date", "Title", "Amount", "Category", "Owner", "Installment"]);
        table.remove_style(TableComponent::HorizontalLines);
        table.remove_style(TableComponent::MiddleIntersections);
        table.remove_style(TableComponent::LeftBorderIntersections);
        table.remove_style(TableComponent::RightBorderIntersections);
        for row in &rows {
            table.add_row(vec![
                row.date.to_string(),
                row.title.clone(),
                format_amount(row.amount),
                classifier.categorise(&row.title),
                owner.clone(),
                row.installment.clone().unwrap_or_default(),
            ]);
        }
        println!("{table}");
        info!("This is a dry-run. Transactions are not imported");
        return Ok(0);
    }

    let count = rows.len();
    for row in rows {
        let reference_date = match reference {
            Some((year, month)) => NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(row.date),
            None => row.date,
        };
        session.ledger.insert(NewTransaction {
            date: row.date,
            reference_date,
            category: classifier.categorise(&row.title),
            title: row.title,
            amount: row.amount,
            owner: owner.clone(),
            installment: row.installment,
        });
    }

    Ok(count)
}

/// Scan a dir recursively and list all eligible statement files
pub(crate) fn scan_files(root_path: &Path) -> anyhow::Result<BTreeSet<String>> {
    info!("Scanning files in {}", root_path.display());

    let canonical_root = root_path.canonicalize()?;
    let mut files = BTreeSet::new();
    let walker = WalkDir::new(root_path).into_iter();
    for entry in walker.filter_entry(|e| !is_hidden(e)) {
        if let Ok(dir_entry) = entry {
            // Ignore symlinks
            if dir_entry.path_is_symlink() {
                continue;
            }

            let path = dir_entry.path();
            // Ignore directory
            if path.is_dir() {
                continue;
            }

            let canonical = path.canonicalize()?;
            // file_id is the sub path from the importing root dir.
            // E.g. when importing from ~/extratos, the file ~/extratos/ana/fatura-2026-01.csv
            // will have the file id 'ana/fatura-2026-01.csv'
            if let Ok(file_id) = canonical.strip_prefix(&canonical_root) {
                if let Some(file_id) = file_id.to_str() {
                    if file_id.to_lowercase().ends_with(".csv") {
                        files.insert(file_id.to_string());
                    }
                }
            }
        }
    }

    Ok(files)
}

/// Return the files that are not recorded in the ledger yet
pub(crate) fn diff_files(ledger: &Ledger, files: &BTreeSet<String>) -> BTreeSet<String> {
    let mut diff = BTreeSet::new();
    for f in files {
        if !ledger.is_imported(f) {
            diff.insert(f.clone());
        }
    }

    diff
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}
