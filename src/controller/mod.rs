mod budget;
mod export;
mod import;
mod income;
mod suggest;
mod summary;

use std::path::PathBuf;

use chrono::NaiveDate;
use comfy_table::{Cell, CellAlignment, Table, TableComponent};
use log::{info, warn};

use crate::categoriser::{RuleClassifier, OUTROS, PAGAMENTO_CREDITO};
use crate::config::Config;
use crate::feedback::{FeedbackLog, FeedbackRecord};
use crate::parser::{self, Statement};
use crate::settings::Settings;
use crate::store::Ledger;
use crate::transaction::{NewTransaction, Transaction};
use crate::util;

/// Owner used when a transaction cannot be tied to a family member
pub(crate) const DEFAULT_OWNER: &str = "Família";

/// Everything a command needs: the ledger, its sidecar files and where the
/// statement files live.
pub(crate) struct Session {
    pub(crate) ledger: Ledger,
    pub(crate) settings: Settings,
    pub(crate) feedback: FeedbackLog,
    pub(crate) statements_dir: PathBuf,
    pub(crate) rules_file: String,
    pub(crate) settings_path: PathBuf,
}

pub(crate) fn parse_and_run_command(session: &mut Session, command: &str) -> Result<(), String> {
    let result = parser::parse(command);

    match result {
        Ok(statement) => {
            match statement {
                Statement::Import(path, options) => {
                    import::execute_import(session, &path, &options);
                }
                Statement::Add(entry) => {
                    let classifier = RuleClassifier::new(&Config::load_from_file(&session.rules_file));
                    let category = entry.category.unwrap_or_else(|| classifier.categorise(&entry.title));
                    let reference_date = match entry.reference {
                        Some((year, month)) => NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(entry.date),
                        None => entry.date,
                    };
                    let id = session.ledger.insert(NewTransaction {
                        date: entry.date,
                        reference_date,
                        title: entry.title,
                        amount: entry.amount,
                        category,
                        owner: entry.owner.unwrap_or_else(|| DEFAULT_OWNER.to_string()),
                        installment: None,
                    });
                    session.ledger.save();
                    info!("Transaction {id} added.");
                }
                Statement::List(filter) => {
                    let transactions = session.ledger.query(&filter);
                    print_transactions(&transactions);
                }
                Statement::Find(keywords) => {
                    let transactions = session.ledger.search(&keywords);
                    print_transactions(&transactions);
                }
                Statement::Suggest(scope) => {
                    suggest::execute_suggest(session, &scope);
                }
                Statement::Set(id, category) => {
                    execute_set(session, id, &category);
                }
                Statement::Delete(ids) => {
                    let deleted = session.ledger.delete(&ids);
                    session.ledger.save();
                    info!("{deleted} transactions deleted.");
                }
                Statement::Summary(month, owner) => {
                    summary::execute_summary(session, month, owner);
                }
                Statement::Budget(month, owner) => {
                    budget::execute_budget(session, month, owner);
                }
                Statement::BudgetSet(entry) => {
                    budget::execute_budget_set(session, &entry);
                }
                Statement::Income(month) => {
                    income::execute_income(session, month);
                }
                Statement::IncomeAdd(new_income) => {
                    income::execute_income_add(session, &new_income);
                }
                Statement::Categories => {
                    let mut table = plain_table();
                    table.set_header(vec!["Category"]);
                    for category in &session.settings.categories {
                        table.add_row(vec![Cell::new(category.as_str())]);
                    }
                    println!("{table}");
                }
                Statement::CategoryAdd(name) => {
                    if session.settings.add_category(&name) {
                        save_settings(session);
                        info!("Category '{name}' added.");
                    } else {
                        info!("Category '{name}' already exists.");
                    }
                }
                Statement::CategoryRemove(name) => {
                    if name == OUTROS || name == PAGAMENTO_CREDITO {
                        info!("Category '{name}' cannot be removed.");
                    } else if session.settings.remove_category(&name) {
                        save_settings(session);
                        info!("Category '{name}' removed.");
                    } else {
                        info!("Category '{name}' not found.");
                    }
                }
                Statement::Export(file_path) => {
                    if let Err(e) = export::execute_export(&session.ledger, &file_path) {
                        warn!("Unable to export: {e}");
                    }
                }
                Statement::Help => print_help(),
            }
        }
        Err(e) => {
            return Err(e.to_string());
        }
    }

    info!("\n");

    Ok(())
}

/// Categorise one transaction by hand and feed the corpus. The category
/// update is saved even when the corpus write fails.
fn execute_set(session: &mut Session, id: u32, category: &str) {
    match session.ledger.search_by_id(id) {
        Some(transaction) => {
            session.ledger.update_category(id, category);
            let record = FeedbackRecord {
                description: transaction.title,
                category: category.to_string(),
                date: transaction.date,
                amount: transaction.amount,
            };
            if let Err(e) = session.feedback.append(record) {
                warn!("Unable to record feedback: {e}");
            }
            session.ledger.save();
            info!("Transaction {id} categorised as '{category}'.");
        }
        None => info!("Transaction {id} not found."),
    }
}

pub(crate) fn save_settings(session: &Session) {
    if let Err(e) = session.settings.save(&session.settings_path) {
        warn!("Unable to save settings: {e}");
    }
}

pub(crate) fn plain_table() -> Table {
    let mut table = Table::new();
    table.remove_style(TableComponent::HorizontalLines);
    table.remove_style(TableComponent::MiddleIntersections);
    table.remove_style(TableComponent::LeftBorderIntersections);
    table.remove_style(TableComponent::RightBorderIntersections);
    table
}

/// Format $ amount
pub(crate) fn format_amount(amount: f32) -> String {
    format!("{amount:.2}")
}

fn print_transactions(transactions: &[Transaction]) {
    if transactions.is_empty() {
        info!("No transactions found.");
        return;
    }

    let mut table = plain_table();
    table.set_header(vec!["ID", "Date", "Ref", "Title", "Amount", "Category", "Owner", "Installment"]);
    for t in transactions {
        let (ref_year, ref_month) = t.reference_month();
        table.add_row(vec![
            Cell::new(t.id.to_string().as_str()).set_alignment(CellAlignment::Right),
            Cell::new(t.date.to_string().as_str()),
            Cell::new(util::month_key(ref_year, ref_month).as_str()),
            Cell::new(t.title.as_str()),
            Cell::new(format_amount(t.amount).as_str()).set_alignment(CellAlignment::Right),
            Cell::new(t.category.as_str()),
            Cell::new(t.owner.as_str()),
            Cell::new(t.installment.as_deref().unwrap_or("")),
        ]);
    }
    println!("{table}");
}

fn print_help() {
    println!("\
Commands:
  import <path> [(owner <name>, ref <YYYY-MM>, dryrun)]     import statement files
  add <date> '<title>' <amount> [(category '<c>', owner <o>, ref <YYYY-MM>)]
  list [YYYY-MM] [owner <o>] [category '<c>']               list transactions
  find <keywords>                                           search titles
  suggest [all]                                             review category suggestions
  set <id> '<category>'                                     categorise one transaction
  delete <id> [<id>...]                                     delete transactions
  summary [YYYY-MM] [owner <o>]                             spend, budget and income dashboard
  budget [YYYY-MM] [owner <o>]                              show the budget
  budget set '<category>' <amount> [YYYY-MM] [owner <o>]    set a budget amount
  income [YYYY-MM]                                          show income entries
  income add <date> '<source>' <amount> [owner <o>]         record income
  categories [add '<name>' | rm '<name>']                   manage the taxonomy
  export to <path>                                          export the ledger as CSV
  quit");
}
