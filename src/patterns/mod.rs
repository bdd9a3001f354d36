use std::collections::HashMap;

use crate::categoriser::{OUTROS, PAGAMENTO_CREDITO};
use crate::feedback::FeedbackRecord;
use crate::tokeniser::tokenise;
use crate::transaction::Transaction;

/// Weight of one confirmed feedback row when counting votes
const FEEDBACK_WEIGHT: u32 = 5;
/// Weight of one already categorised ledger row
const LIVE_WEIGHT: u32 = 1;
/// Minimum accumulated weight before a keyword pattern is trusted
const WORD_MIN_WEIGHT: u32 = 2;
/// Exact amounts collide across unrelated categories, so the bar is higher
const AMOUNT_MIN_WEIGHT: u32 = 3;

/// Category vote counter. Insertion ordered so that ties resolve to the
/// category seen first, which keeps results reproducible between runs.
#[derive(Debug, Default)]
struct Votes {
    counts: Vec<(String, u32)>,
}

impl Votes {
    fn bump(&mut self, category: &str, weight: u32) {
        match self.counts.iter_mut().find(|(c, _)| c == category) {
            Some((_, count)) => *count += weight,
            None => self.counts.push((category.to_string(), weight)),
        }
    }

    /// The first category holding the highest accumulated weight
    fn majority(&self) -> Option<(&str, u32)> {
        let mut winner: Option<(&str, u32)> = None;
        for (category, count) in &self.counts {
            match winner {
                Some((_, best)) if *count <= best => {}
                _ => winner = Some((category, *count)),
            }
        }
        winner
    }
}

/// What `learn` distils from history: keyword majorities and exact amount
/// majorities, each mapped straight to a category.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct LearnedPatterns {
    pub(crate) words: HashMap<String, String>,
    /// Keyed by amount in cents
    pub(crate) amounts: HashMap<i64, String>,
}

impl LearnedPatterns {
    pub(crate) fn is_empty(&self) -> bool {
        self.words.is_empty() && self.amounts.is_empty()
    }
}

/// Money never makes a good float map key, so amounts are keyed exact to the cent.
pub(crate) fn to_cents(amount: f32) -> i64 {
    (amount as f64 * 100.0).round() as i64
}

/// Rebuild keyword and amount patterns from scratch. Ledger rows teach with
/// weight 1, and only those carrying a real category; rows still sitting in
/// "Outros" or in the payment catch-all have nothing to teach. Feedback rows
/// are confirmed corrections and teach with weight 5, unfiltered.
pub(crate) fn learn(transactions: &[Transaction], feedback: &[FeedbackRecord]) -> LearnedPatterns {
    let mut word_votes: HashMap<String, Votes> = HashMap::new();
    let mut amount_votes: HashMap<i64, Votes> = HashMap::new();

    for t in transactions {
        if t.category.is_empty() || t.category == OUTROS || t.category == PAGAMENTO_CREDITO {
            continue;
        }
        count_row(&t.title, &t.category, t.amount, LIVE_WEIGHT, &mut word_votes, &mut amount_votes);
    }

    for record in feedback {
        count_row(&record.description, &record.category, record.amount, FEEDBACK_WEIGHT,
                  &mut word_votes, &mut amount_votes);
    }

    let mut patterns = LearnedPatterns::default();
    for (token, votes) in word_votes {
        if let Some((category, weight)) = votes.majority() {
            if weight >= WORD_MIN_WEIGHT {
                patterns.words.insert(token, category.to_string());
            }
        }
    }
    for (cents, votes) in amount_votes {
        if let Some((category, weight)) = votes.majority() {
            if weight >= AMOUNT_MIN_WEIGHT {
                patterns.amounts.insert(cents, category.to_string());
            }
        }
    }

    patterns
}

fn count_row(title: &str, category: &str, amount: f32, weight: u32,
             word_votes: &mut HashMap<String, Votes>,
             amount_votes: &mut HashMap<i64, Votes>) {
    for token in tokenise(title) {
        word_votes.entry(token).or_default().bump(category, weight);
    }
    if amount > 0.0 {
        amount_votes.entry(to_cents(amount)).or_default().bump(category, weight);
    }
}

/// Suggest a category for a title. An exact amount match wins outright;
/// otherwise every known token casts one vote and the top category wins,
/// first seen breaking ties. No votes, no suggestion.
pub(crate) fn suggest(title: &str, patterns: &LearnedPatterns, amount: Option<f32>) -> Option<String> {
    if let Some(amount) = amount {
        if let Some(category) = patterns.amounts.get(&to_cents(amount)) {
            return Some(category.clone());
        }
    }

    let mut votes = Votes::default();
    for token in tokenise(title) {
        if let Some(category) = patterns.words.get(&token) {
            votes.bump(category, 1);
        }
    }

    votes.majority().map(|(category, _)| category.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::feedback::FeedbackRecord;
    use crate::transaction::Transaction;
    use super::{learn, suggest, to_cents, LearnedPatterns};

    fn tx(title: &str, category: &str, amount: f32) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        Transaction::new(0, date, date, title, amount, category.to_string(), "Família".to_string(), None)
    }

    fn fb(description: &str, category: &str, amount: f32) -> FeedbackRecord {
        FeedbackRecord {
            description: description.to_string(),
            category: category.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            amount,
        }
    }

    #[test]
    fn single_ledger_row_is_not_enough() {
        let patterns = learn(&[tx("Padaria Estrela", "Lazer/Restaurantes", 15.0)], &[]);
        assert!(patterns.is_empty());
    }

    #[test]
    fn two_ledger_rows_pass_the_word_bar_but_not_the_amount_bar() {
        let rows = [
            tx("Padaria Estrela", "Lazer/Restaurantes", 15.0),
            tx("Padaria Estrela", "Lazer/Restaurantes", 15.0),
        ];
        let patterns = learn(&rows, &[]);

        assert_eq!(patterns.words.get("padaria"), Some(&"Lazer/Restaurantes".to_string()));
        assert_eq!(patterns.words.get("estrela"), Some(&"Lazer/Restaurantes".to_string()));
        // weight 2 < 3, the same two rows do not establish an amount pattern
        assert!(patterns.amounts.is_empty());
    }

    #[test]
    fn one_feedback_row_passes_both_bars() {
        let patterns = learn(&[], &[fb("COBASI PET SHOP", "Pets", 120.5)]);

        assert_eq!(patterns.words.get("cobasi"), Some(&"Pets".to_string()));
        assert_eq!(patterns.amounts.get(&to_cents(120.5)), Some(&"Pets".to_string()));
    }

    #[test]
    fn unresolved_rows_teach_nothing() {
        let rows = [
            tx("Loja Misteriosa", "Outros", 50.0),
            tx("Loja Misteriosa", "Outros", 50.0),
            tx("Pagamento recebido obrigado", "Pagamento/Crédito", 900.0),
            tx("Pagamento recebido obrigado", "Pagamento/Crédito", 900.0),
            tx("Qualquer coisa", "", 10.0),
        ];
        assert!(learn(&rows, &[]).is_empty());
    }

    #[test]
    fn negative_and_zero_amounts_never_vote() {
        let rows = [
            tx("Estorno Mensalidade", "Assinaturas/Serviços", -39.9),
            tx("Estorno Mensalidade", "Assinaturas/Serviços", 0.0),
        ];
        let patterns = learn(&rows, &[]);
        assert!(patterns.amounts.is_empty());
        assert_eq!(patterns.words.get("estorno"), Some(&"Assinaturas/Serviços".to_string()));
    }

    #[test]
    fn ties_go_to_the_category_seen_first() {
        let rows = [
            tx("Quiosque Praia", "Lazer/Restaurantes", 30.0),
            tx("Quiosque Praia", "Pessoal/Vestuário", 30.0),
            tx("Quiosque Praia", "Lazer/Restaurantes", 30.0),
            tx("Quiosque Praia", "Pessoal/Vestuário", 30.0),
        ];
        let patterns = learn(&rows, &[]);
        assert_eq!(patterns.words.get("quiosque"), Some(&"Lazer/Restaurantes".to_string()));
    }

    #[test]
    fn feedback_outvotes_ledger_rows() {
        let rows = [
            tx("Mercadinho da Vila", "Lazer/Restaurantes", 20.0),
            tx("Mercadinho da Vila", "Lazer/Restaurantes", 20.0),
            tx("Mercadinho da Vila", "Lazer/Restaurantes", 20.0),
        ];
        let corrections = [fb("Mercadinho da Vila", "Alimentação (Mercado/Sacolão)", 20.0)];
        let patterns = learn(&rows, &corrections);

        // 5 feedback votes against 3 live ones
        assert_eq!(patterns.words.get("mercadinho"), Some(&"Alimentação (Mercado/Sacolão)".to_string()));
    }

    #[test]
    fn learn_is_idempotent() {
        let rows = [
            tx("Posto Trevo", "Transporte (Combustível/Estacionamento/Manutenção)", 200.0),
            tx("Posto Trevo", "Transporte (Combustível/Estacionamento/Manutenção)", 180.0),
            tx("Cinema Shopping", "Lazer/Restaurantes", 40.0),
        ];
        let corrections = [fb("Cinema Shopping", "Lazer/Restaurantes", 40.0)];

        assert_eq!(learn(&rows, &corrections), learn(&rows, &corrections));
    }

    #[test]
    fn amount_match_beats_keyword_votes() {
        let corrections = [
            fb("Drogaria Onofre", "Saúde/Farmácia", 42.0),
            fb("Mercado Extra", "Alimentação (Mercado/Sacolão)", 0.0),
        ];
        let patterns = learn(&[], &corrections);

        // the title alone votes for the market, the exact amount overrides it
        assert_eq!(suggest("Mercado Extra", &patterns, Some(42.0)), Some("Saúde/Farmácia".to_string()));
        assert_eq!(suggest("Mercado Extra", &patterns, Some(13.37)), Some("Alimentação (Mercado/Sacolão)".to_string()));
        assert_eq!(suggest("Mercado Extra", &patterns, None), Some("Alimentação (Mercado/Sacolão)".to_string()));
    }

    #[test]
    fn no_votes_no_suggestion() {
        let patterns = learn(&[], &[fb("COBASI PET SHOP", "Pets", 120.5)]);

        assert_eq!(suggest("Coisa Nunca Vista", &patterns, None), None);
        assert_eq!(suggest("", &patterns, Some(9.99)), None);
        assert_eq!(suggest("Cobasi Racao", &LearnedPatterns::default(), Some(120.5)), None);
    }

    #[test]
    fn cents_keys_are_exact() {
        assert_eq!(to_cents(42.0), 4200);
        assert_eq!(to_cents(19.99), 1999);
        assert_eq!(to_cents(0.01), 1);
        assert_eq!(to_cents(1234.56), 123456);
    }
}
