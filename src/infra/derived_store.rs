// ============================================================
// Layer 5 - Derived Question Store
// ============================================================
// Persists derived questions to a JSON file.
//
// One derive request produces one batch. A batch is stored
// completely or not at all:
//
//   1. Read the existing records (missing file = empty store)
//   2. Assign ids after the highest id in the bank and the store
//   3. Write old + new records to a temporary file next to the
//      target
//   4. Rename the temporary file over the target
//
// If any step fails the target file is left as it was.
//
// Reference: Rust Book §9 (Error Handling)
//            std::fs::rename (atomic within one filesystem)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::domain::question::DerivedQuestion;
use crate::domain::traits::DerivedSink;

/// A derived question after identity assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredQuestion {
    pub id: i64,
    #[serde(flatten)]
    pub question: DerivedQuestion,
}

#[derive(Debug)]
pub struct JsonDerivedStore {
    path: PathBuf,
}

impl JsonDerivedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// All records stored so far
    pub fn load_all(&self) -> Result<Vec<StoredQuestion>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read derived store '{}'", self.path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Malformed derived store '{}'", self.path.display()))
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("derived.json");
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    fn write_all(&self, records: &[StoredQuestion]) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create directory '{}'", dir.display()))?;
        }

        let tmp = self.temp_path();
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&tmp, json)
            .with_context(|| format!("Cannot write '{}'", tmp.display()))?;
        fs::rename(&tmp, &self.path).with_context(|| {
            format!("Cannot move '{}' into place at '{}'", tmp.display(), self.path.display())
        })?;
        Ok(())
    }
}

impl DerivedSink for JsonDerivedStore {
    type Stored = StoredQuestion;

    fn store_batch(&mut self, batch: Vec<DerivedQuestion>, id_floor: i64) -> Result<Vec<StoredQuestion>> {
        let mut records = self.load_all()?;
        let highest = records.iter().map(|r| r.id).max().unwrap_or(0).max(id_floor);

        let stored: Vec<StoredQuestion> = batch
            .into_iter()
            .zip(highest + 1..)
            .map(|(question, id)| StoredQuestion { id, question })
            .collect();

        records.extend(stored.iter().cloned());
        self.write_all(&records)?;

        tracing::info!(
            "Stored {} derived question(s) in '{}' ({} total)",
            stored.len(),
            self.path.display(),
            records.len()
        );
        Ok(stored)
    }
}
