pub(crate) mod search;

use std::fs;
use std::collections::{BTreeMap, HashMap};
use std::io::{Read, Seek, SeekFrom, Write};
use std::ops::Range;
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

use crate::common::ResultError;
use crate::parser::ListFilter;
use crate::store::search::SearchIndex;
use crate::transaction::{NewTransaction, Transaction};
use crate::util;

/// cofre binary version
const COFRE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Internal representation of a transaction record in the ledger file
#[derive(Serialize, Deserialize, Debug)]
pub(crate) struct TransactionRecord {
    id: u32,
    date: NaiveDate,
    reference_date: NaiveDate,
    title: String,
    amount: f32,
    category: String,
    owner: String,
    installment: Option<String>,
}

/// A single income entry, e.g. a salary deposit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct IncomeRecord {
    pub(crate) date: NaiveDate,
    pub(crate) source: String,
    pub(crate) amount: f32,
    pub(crate) owner: String,
}

/// Metadata of the ledger file. Contains the version of cofre that wrote the
/// file, so future versions can upgrade files written by older binaries.
#[derive(Serialize, Deserialize, Debug)]
pub(crate) struct Metadata {
    version: String
}

#[derive(Serialize, Deserialize)]
pub(crate) struct Ledger {
    transaction_id_seed: u32,
    transactions: HashMap<u32, TransactionRecord>,

    /// Key is the reference date, value is a list of transaction ids booked
    /// to that date.
    reference_index: BTreeMap<NaiveDate, Vec<u32>>,

    /// Inverted index for keyword search on titles
    search_index: SearchIndex,

    income: Vec<IncomeRecord>,

    /// Checksum of every statement file already imported, keyed by file id
    imported_files: HashMap<String, String>,

    #[serde(skip_serializing, skip_deserializing)]
    file_path: Option<String>,
}

impl Ledger {
    pub(crate) fn new(file_path: String) -> Ledger {
        Ledger {
            transaction_id_seed: 1,
            transactions: HashMap::new(),
            reference_index: BTreeMap::new(),
            search_index: SearchIndex::new(),
            income: vec![],
            imported_files: HashMap::new(),
            file_path: Some(file_path),
        }
    }

    pub(crate) fn load(path_str: &str) -> ResultError<Ledger> {
        let path = Path::new(path_str);
        if path.exists() {
            let mut file = fs::File::open(path)?;
            let metadata_len = file.read_u16::<LittleEndian>()?;
            let mut buffer = vec![0; metadata_len as usize];
            file.read_exact(&mut buffer)?;
            let metadata: Metadata = bincode::deserialize(&buffer)?;
            info!("Ledger version {}", metadata.version);

            file.seek(SeekFrom::Start(1024))?;
            let mut buffer: Vec<u8> = vec![];
            file.read_to_end(&mut buffer)?;

            let mut ledger: Ledger = bincode::deserialize(&buffer)?;
            ledger.file_path = Some(path_str.to_string());
            Ok(ledger)
        } else {
            Ok(Ledger::new(path_str.to_string()))
        }
    }

    /// Save ledger content to disk
    pub(crate) fn save(&self) {
        // Create metadata using current binary version
        let metadata = Metadata { version: COFRE_VERSION.to_string() };
        let metadata_encoded: Vec<u8> = bincode::serialize(&metadata).unwrap();
        let metadata_length = metadata_encoded.len();
        assert!(metadata_length <= (u16::MAX - 2) as usize);

        let encoded: Vec<u8> = bincode::serialize(&self).unwrap();

        // Use first 1024 bytes to store metadata
        let mut file = fs::File::create(self.file_path.as_ref().unwrap()).unwrap();
        // Using first 2 bytes to write metadata length
        file.write_u16::<LittleEndian>(metadata_length as u16).unwrap();
        // Write metadata
        file.write_all(&metadata_encoded).unwrap();
        let remaining_header_bytes = 1024 - 2 - metadata_length;
        // Write 0s for remaining bytes to fill up the first 1024 bytes.
        file.write_all(&vec![0; remaining_header_bytes]).unwrap();

        file.write_all(&encoded).expect("Unable to write to ledger file");
        file.flush().unwrap();
    }

    pub(crate) fn insert(&mut self, t: NewTransaction) -> u32 {
        let id = self.transaction_id_seed;
        self.transaction_id_seed += 1;

        self.reference_index.entry(t.reference_date).or_insert_with(Vec::new).push(id);
        self.search_index.index(id, &t.title);

        let record = TransactionRecord {
            id,
            date: t.date,
            reference_date: t.reference_date,
            title: t.title,
            amount: t.amount,
            category: t.category,
            owner: t.owner,
            installment: t.installment,
        };
        self.transactions.insert(id, record);
        id
    }

    pub(crate) fn query(&self, filter: &ListFilter) -> Vec<Transaction> {
        let ids: Vec<u32> = match filter.month {
            Some((year, month)) => {
                let mut ids = vec![];
                for (_, date_ids) in self.reference_index.range(util::month_range(year, month)) {
                    ids.extend(date_ids);
                }
                ids
            }
            None => self.transactions.keys().cloned().collect(),
        };

        let mut records: Vec<&TransactionRecord> = ids.iter()
            .filter_map(|id| self.transactions.get(id))
            .filter(|t| filter.owner.as_ref().map_or(true, |owner| &t.owner == owner))
            .filter(|t| filter.category.as_ref().map_or(true, |category| &t.category == category))
            .collect();

        records.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        records.iter().map(|t| self.to_transaction(t)).collect()
    }

    /// Keyword search on transaction titles. Every keyword has to match.
    pub(crate) fn search(&self, keywords: &str) -> Vec<Transaction> {
        // Posting lists keep ids of deleted transactions; resolving through
        // the live transaction map drops them.
        let mut records: Vec<&TransactionRecord> = self.search_index.search(keywords)
            .into_iter()
            .filter_map(|id| self.transactions.get(&id))
            .collect();

        records.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        records.iter().map(|t| self.to_transaction(t)).collect()
    }

    pub(crate) fn search_by_id(&self, id: u32) -> Option<Transaction> {
        self.transactions.get(&id).map(|t| self.to_transaction(t))
    }

    pub(crate) fn update_category(&mut self, id: u32, category: &str) -> bool {
        match self.transactions.get_mut(&id) {
            Some(record) => {
                record.category = category.to_string();
                true
            }
            None => false,
        }
    }

    pub(crate) fn delete(&mut self, ids: &[u32]) -> usize {
        let mut deleted = 0;
        for id in ids {
            if let Some(record) = self.transactions.remove(id) {
                if let Some(date_ids) = self.reference_index.get_mut(&record.reference_date) {
                    date_ids.retain(|existing| existing != id);
                }
                deleted += 1;
            }
        }
        deleted
    }

    pub(crate) fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub(crate) fn add_income(&mut self, income: IncomeRecord) {
        self.income.push(income);
    }

    /// Income entries with a date inside the range, in date order.
    pub(crate) fn income_in(&self, range: Range<NaiveDate>) -> Vec<IncomeRecord> {
        let mut entries: Vec<IncomeRecord> = self.income.iter()
            .filter(|entry| range.contains(&entry.date))
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.date.cmp(&b.date));
        entries
    }

    pub(crate) fn is_imported(&self, file_id: &str) -> bool {
        self.imported_files.contains_key(file_id)
    }

    pub(crate) fn record_import(&mut self, file_id: &str, checksum: String) {
        self.imported_files.insert(file_id.to_string(), checksum);
    }

    fn to_transaction(&self, t: &TransactionRecord) -> Transaction {
        Transaction::new(t.id, t.date, t.reference_date, t.title.as_str(), t.amount,
                         t.category.clone(), t.owner.clone(), t.installment.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_transaction(date: &str, reference_date: &str, title: &str, amount: f32, category: &str, owner: &str) -> NewTransaction {
        NewTransaction {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            reference_date: NaiveDate::parse_from_str(reference_date, "%Y-%m-%d").unwrap(),
            title: title.to_string(),
            amount,
            category: category.to_string(),
            owner: owner.to_string(),
            installment: None,
        }
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new("unused".to_string());
        ledger.insert(new_transaction("2026-01-15", "2026-01-15", "MERCADO EXTRA", 251.3, "Alimentação (Mercado/Sacolão)", "Ana"));
        ledger.insert(new_transaction("2026-01-20", "2026-02-01", "POSTO SHELL", 180.0, "Transporte (Combustível/Estacionamento/Manutenção)", "Bruno"));
        ledger.insert(new_transaction("2026-02-03", "2026-02-01", "COBASI RACAO", 120.5, "Pets", "Ana"));
        ledger
    }

    #[test]
    fn query_filters_by_reference_month() {
        let ledger = sample_ledger();

        let january = ledger.query(&ListFilter { month: Some((2026, 1)), owner: None, category: None });
        assert_eq!(january.len(), 1);
        assert_eq!(january[0].title, "MERCADO EXTRA");

        // The Shell transaction happened in January but belongs to the
        // February statement.
        let february = ledger.query(&ListFilter { month: Some((2026, 2)), owner: None, category: None });
        assert_eq!(february.iter().map(|t| t.title.as_str()).collect::<Vec<&str>>(), vec!["POSTO SHELL", "COBASI RACAO"]);
    }

    #[test]
    fn query_filters_by_owner_and_category() {
        let ledger = sample_ledger();

        let ana = ledger.query(&ListFilter { month: None, owner: Some("Ana".to_string()), category: None });
        assert_eq!(ana.len(), 2);

        let pets = ledger.query(&ListFilter { month: None, owner: None, category: Some("Pets".to_string()) });
        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].title, "COBASI RACAO");
    }

    #[test]
    fn results_come_back_in_date_then_id_order() {
        let mut ledger = Ledger::new("unused".to_string());
        ledger.insert(new_transaction("2026-01-20", "2026-01-20", "B", 1.0, "Outros", "Ana"));
        ledger.insert(new_transaction("2026-01-10", "2026-01-10", "A", 1.0, "Outros", "Ana"));
        ledger.insert(new_transaction("2026-01-10", "2026-01-10", "C", 1.0, "Outros", "Ana"));

        let all = ledger.query(&ListFilter::default());
        assert_eq!(all.iter().map(|t| t.id).collect::<Vec<u32>>(), vec![2, 3, 1]);
    }

    #[test]
    fn update_and_delete() {
        let mut ledger = sample_ledger();

        assert!(ledger.update_category(3, "Outros"));
        assert!(!ledger.update_category(99, "Outros"));
        assert_eq!(ledger.search_by_id(3).unwrap().category, "Outros");

        assert_eq!(ledger.delete(&[1, 99]), 1);
        assert_eq!(ledger.transaction_count(), 2);
        assert!(ledger.search_by_id(1).is_none());
        // Deleted ids linger in the search index but never in results
        assert!(ledger.search("mercado").is_empty());
    }

    #[test]
    fn search_matches_every_keyword() {
        let ledger = sample_ledger();

        assert_eq!(ledger.search("cobasi")[0].id, 3);
        assert_eq!(ledger.search("posto shell")[0].id, 2);
        assert!(ledger.search("posto cobasi").is_empty());
    }

    #[test]
    fn income_window() {
        let mut ledger = Ledger::new("unused".to_string());
        ledger.add_income(IncomeRecord {
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            source: "Salário (Principal)".to_string(),
            amount: 8500.0,
            owner: "Ana".to_string(),
        });
        ledger.add_income(IncomeRecord {
            date: NaiveDate::from_ymd_opt(2026, 2, 5).unwrap(),
            source: "Salário (Principal)".to_string(),
            amount: 8500.0,
            owner: "Ana".to_string(),
        });

        let january = ledger.income_in(util::month_range(2026, 1));
        assert_eq!(january.len(), 1);
        assert_eq!(january[0].date, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
    }

    #[test]
    fn ledger_file_round_trip() {
        let path = std::env::temp_dir().join("cofre-ledger-round-trip.db");
        let path_str = path.to_str().unwrap().to_string();
        let _ = fs::remove_file(&path);

        let mut ledger = sample_ledger();
        ledger.file_path = Some(path_str.clone());
        ledger.record_import("nubank/fatura-2026-01.csv", "d41d8cd98f".to_string());
        ledger.save();

        let reloaded = Ledger::load(&path_str).unwrap();
        assert_eq!(reloaded.transaction_count(), 3);
        assert_eq!(reloaded.search("cobasi")[0].title, "COBASI RACAO");
        assert!(reloaded.is_imported("nubank/fatura-2026-01.csv"));
        assert_eq!(reloaded.query(&ListFilter::default()).len(), 3);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn loading_a_missing_file_starts_empty() {
        let ledger = Ledger::load("/tmp/cofre-does-not-exist.db").unwrap();
        assert_eq!(ledger.transaction_count(), 0);
    }
}
