use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::{RankError, Result};

use super::searcher::Searcher;

/// A labeled question and the files that answer it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvalRecord {
    pub question: String,
    pub files: Vec<String>,
}

/// A parsed dataset. `total` also counts records that were skipped.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<EvalRecord>,
    pub total: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EvalReport {
    pub top_k: usize,
    pub total: usize,
    pub evaluated: usize,
    pub skipped: usize,
    pub hits: usize,
}

impl EvalReport {
    /// Hits over every record in the dataset, skipped ones included.
    pub fn recall(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.hits as f64 / self.total as f64
        }
    }
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a JSON array of records, skipping malformed entries.
    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        let Value::Array(items) = value else {
            return Err(RankError::Dataset(
                "expected a JSON array of records".to_string(),
            ));
        };

        let total = items.len();
        let records = items
            .into_iter()
            .enumerate()
            .filter_map(|(i, item)| match parse_record(&item) {
                Some(record) => Some(record),
                None => {
                    tracing::warn!("Skipping invalid item #{}: {}", i, item);
                    None
                }
            })
            .collect();

        Ok(Self { records, total })
    }
}

fn parse_record(item: &Value) -> Option<EvalRecord> {
    let question = item.get("question")?.as_str()?.to_string();
    let files = item
        .get("files")?
        .as_array()?
        .iter()
        .map(|f| f.as_str().map(str::to_string))
        .collect::<Option<Vec<String>>>()?;

    Some(EvalRecord { question, files })
}

/// Recall@k: a record counts as a hit when any expected file is returned.
pub async fn evaluate<F>(
    searcher: &Searcher,
    dataset: &Dataset,
    top_k: usize,
    mut on_progress: F,
) -> Result<EvalReport>
where
    F: FnMut(&EvalRecord),
{
    let mut report = EvalReport {
        top_k,
        total: dataset.total,
        evaluated: 0,
        skipped: dataset.total - dataset.records.len(),
        hits: 0,
    };

    for record in &dataset.records {
        let results = searcher.query(&record.question, top_k).await?;
        let hit = record
            .files
            .iter()
            .any(|expected| results.iter().any(|r| &r.path == expected));

        tracing::debug!("{} -> hit: {}", record.question, hit);
        if hit {
            report.hits += 1;
        }
        report.evaluated += 1;
        on_progress(record);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_records_are_skipped() {
        let dataset = Dataset::from_json(
            r#"[
                {"question": "where is the adb bridge?", "files": ["src/adb.js"]},
                {"question": "missing files"},
                {"files": ["a.js"]},
                {"question": 42, "files": ["a.js"]},
                {"question": "bad file entry", "files": ["a.js", 7]},
                "not an object",
                {"question": "no expected files", "files": []}
            ]"#,
        )
        .unwrap();

        assert_eq!(dataset.total, 7);
        assert_eq!(dataset.records.len(), 2);
        assert_eq!(dataset.records[0].files, vec!["src/adb.js"]);
        assert!(dataset.records[1].files.is_empty());
    }

    #[test]
    fn test_non_array_dataset_is_rejected() {
        assert!(matches!(
            Dataset::from_json(r#"{"question": "q", "files": []}"#),
            Err(RankError::Dataset(_))
        ));
        assert!(matches!(Dataset::from_json("nope"), Err(RankError::Json(_))));
    }

    #[test]
    fn test_recall_counts_skipped_records() {
        let report = EvalReport {
            top_k: 10,
            total: 4,
            evaluated: 3,
            skipped: 1,
            hits: 3,
        };
        assert!((report.recall() - 0.75).abs() < 1e-9);
        assert_eq!(EvalReport::default().recall(), 0.0);
    }
}
