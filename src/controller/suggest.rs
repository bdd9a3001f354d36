use log::{info, warn};

use crate::categoriser::{RuleClassifier, OUTROS, PAGAMENTO_CREDITO};
use crate::config::Config;
use crate::controller::Session;
use crate::feedback::FeedbackRecord;
use crate::parser::{ListFilter, SuggestScope};
use crate::patterns::{self, LearnedPatterns};
use crate::review::{self, ReviewRow};
use crate::transaction::Transaction;

/// Learn patterns from the ledger and the feedback corpus, propose a
/// category for every transaction in scope and open the review screen.
/// Confirmed rows update the ledger and feed the corpus.
pub(crate) fn execute_suggest(session: &mut Session, scope: &SuggestScope) {
    let transactions = session.ledger.query(&ListFilter::default());
    let patterns = patterns::learn(&transactions, session.feedback.records());
    let classifier = RuleClassifier::new(&Config::load_from_file(&session.rules_file));

    let rows: Vec<ReviewRow> = build_suggestions(transactions, &patterns, &classifier, scope)
        .into_iter()
        .map(|(transaction, suggested)| ReviewRow::new(transaction, suggested))
        .collect();

    if rows.is_empty() {
        info!("Nothing to review.");
        return;
    }

    match review::review(rows) {
        Ok(Some(confirmed)) => {
            if confirmed.is_empty() {
                info!("No suggestions accepted.");
                return;
            }

            let mut updated = 0;
            for (id, category) in &confirmed {
                if let Some(transaction) = session.ledger.search_by_id(*id) {
                    session.ledger.update_category(*id, category);
                    let record = FeedbackRecord {
                        description: transaction.title,
                        category: category.clone(),
                        date: transaction.date,
                        amount: transaction.amount,
                    };
                    // The category update stands even if the corpus write fails
                    if let Err(e) = session.feedback.append(record) {
                        warn!("Unable to record feedback: {e}");
                    }
                    updated += 1;
                }
            }
            session.ledger.save();
            info!("{updated} transactions categorised.");
        }
        Ok(None) => info!("Review cancelled."),
        Err(e) => warn!("Unable to open review screen: {e}"),
    }
}

/// Pair each transaction in scope with the category to propose for it. Rule
/// verdicts win; learned patterns only fill in where the rules say Outros.
/// A proposal equal to the current category, or the catch-all itself, is no
/// proposal.
pub(crate) fn build_suggestions(transactions: Vec<Transaction>, patterns: &LearnedPatterns, classifier: &RuleClassifier, scope: &SuggestScope) -> Vec<(Transaction, Option<String>)> {
    let mut rows = vec![];
    for transaction in transactions {
        if transaction.category == PAGAMENTO_CREDITO {
            continue;
        }
        let unresolved = transaction.category.is_empty() || transaction.category == OUTROS;
        if matches!(scope, SuggestScope::Unresolved) && !unresolved {
            continue;
        }

        let mut candidate = classifier.categorise(&transaction.title);
        if candidate == OUTROS {
            if let Some(learned) = patterns::suggest(&transaction.title, patterns, Some(transaction.amount)) {
                candidate = learned;
            }
        }

        let suggested = if candidate != OUTROS && candidate != transaction.category {
            Some(candidate)
        } else {
            None
        };

        // Unresolved rows stay visible even without a proposal, they can
        // still be hand edited on the review screen.
        if suggested.is_some() || matches!(scope, SuggestScope::Unresolved) {
            rows.push((transaction, suggested));
        }
    }
    rows
}
