use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

/// One user confirmed categorisation. The corpus of these records is the
/// durable teaching signal: it survives re-imports and outweighs live rows
/// when patterns are learned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct FeedbackRecord {
    pub(crate) description: String,
    pub(crate) category: String,
    pub(crate) date: NaiveDate,
    pub(crate) amount: f32,
}

/// Append-only CSV corpus of confirmed categorisations
pub(crate) struct FeedbackLog {
    file_path: PathBuf,
    records: Vec<FeedbackRecord>,
}

impl FeedbackLog {
    /// Load the whole corpus. A missing file is an empty corpus; rows that
    /// fail to parse are skipped.
    pub(crate) fn load(file_path: &Path) -> FeedbackLog {
        let mut records = vec![];

        if file_path.is_file() {
            match csv::Reader::from_path(file_path) {
                Ok(mut reader) => {
                    for row in reader.deserialize::<FeedbackRecord>() {
                        match row {
                            Ok(record) => records.push(record),
                            Err(e) => warn!("Skipping feedback row: {e}"),
                        }
                    }
                }
                Err(e) => warn!("Unable to read feedback corpus {}: {e}", file_path.display()),
            }
        }

        FeedbackLog { file_path: file_path.to_path_buf(), records }
    }

    pub(crate) fn records(&self) -> &[FeedbackRecord] {
        &self.records
    }

    /// Append one confirmed categorisation. Existing rows are never rewritten.
    pub(crate) fn append(&mut self, record: FeedbackRecord) -> anyhow::Result<()> {
        let new_file = !self.file_path.is_file();
        let file = OpenOptions::new().create(true).append(true).open(&self.file_path)?;
        let mut writer = csv::WriterBuilder::new().has_headers(new_file).from_writer(file);
        writer.serialize(&record)?;
        writer.flush()?;
        self.records.push(record);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use chrono::NaiveDate;
    use super::{FeedbackLog, FeedbackRecord};

    #[test]
    fn append_then_reload() {
        let path = std::env::temp_dir().join("cofre_feedback_append_test.csv");
        let _ = fs::remove_file(&path);

        let mut log = FeedbackLog::load(&path);
        assert!(log.records().is_empty());

        let record = FeedbackRecord {
            description: "COBASI PET SHOP".to_string(),
            category: "Pets".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 2, 5).unwrap(),
            amount: 120.5,
        };
        log.append(record.clone()).unwrap();
        log.append(FeedbackRecord { description: "Uber Trip".to_string(), category: "Transporte (Uber/99)".to_string(), ..record.clone() }).unwrap();

        let reloaded = FeedbackLog::load(&path);
        assert_eq!(reloaded.records().len(), 2);
        assert_eq!(reloaded.records()[0], record);
        assert_eq!(reloaded.records()[1].category, "Transporte (Uber/99)");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_empty_corpus() {
        let log = FeedbackLog::load(std::path::Path::new("no-such-feedback.csv"));
        assert!(log.records().is_empty());
    }

    #[test]
    fn unwritable_corpus_is_an_error_not_a_panic() {
        let dir = std::env::temp_dir().join("cofre-feedback-missing-dir");
        let _ = fs::remove_dir_all(&dir);

        let mut log = FeedbackLog::load(&dir.join("feedback.csv"));
        let record = FeedbackRecord {
            description: "PADARIA DO ZE".to_string(),
            category: "Lazer/Restaurantes".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 3).unwrap(),
            amount: 25.5,
        };
        assert!(log.append(record).is_err());
        assert!(log.records().is_empty());
    }
}
