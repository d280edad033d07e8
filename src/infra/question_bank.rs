// ============================================================
// Layer 5 - JSON Question Bank
// ============================================================
// Reads source questions from a JSON array on disk, the same
// layout as data/sample_questions.json:
//
//   [
//     { "id": 1, "type": "true_false", "category": "行政处罚法",
//       "difficulty": "easy", "question": "...", "answer": "正确", ... },
//     ...
//   ]
//
// Ids must be unique; a duplicate id is rejected at load time
// rather than silently shadowing a question.

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::{fs, path::Path};

use crate::domain::question::SourceQuestion;
use crate::domain::traits::QuestionSource;

#[derive(Debug)]
pub struct JsonQuestionBank {
    questions: Vec<SourceQuestion>,
}

impl JsonQuestionBank {
    /// Load every question in the file at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read question bank '{}'", path.display()))?;
        let questions: Vec<SourceQuestion> = serde_json::from_str(&json)
            .with_context(|| format!("Malformed question bank '{}'", path.display()))?;

        let bank = Self::from_questions(questions)?;
        tracing::info!("Loaded {} questions from '{}'", bank.len(), path.display());
        Ok(bank)
    }

    pub fn from_questions(questions: Vec<SourceQuestion>) -> Result<Self> {
        let mut seen = HashSet::new();
        for q in &questions {
            if !seen.insert(q.id) {
                bail!("Duplicate question id {} in question bank", q.id);
            }
        }
        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl QuestionSource for JsonQuestionBank {
    fn find(&self, id: i64) -> Result<Option<SourceQuestion>> {
        Ok(self.questions.iter().find(|q| q.id == id).cloned())
    }

    fn max_id(&self) -> Option<i64> {
        self.questions.iter().map(|q| q.id).max()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../../data/sample_questions.json");

    #[test]
    fn test_loads_sample_bank() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.json");
        fs::write(&path, SAMPLE).unwrap();

        let bank = JsonQuestionBank::load(&path).unwrap();
        assert_eq!(bank.len(), 4);
        assert_eq!(bank.max_id(), Some(4));
        let q = bank.find(1).unwrap().unwrap();
        assert_eq!(q.question, "违法行为人应当在15日内缴纳罚款");
        assert!(bank.find(99).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut qs: Vec<SourceQuestion> = serde_json::from_str(SAMPLE).unwrap();
        qs[1].id = qs[0].id;
        assert!(JsonQuestionBank::from_questions(qs).is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = JsonQuestionBank::load("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_malformed_bank_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.json");
        fs::write(&path, "{ not json").unwrap();
        let err = JsonQuestionBank::load(&path).unwrap_err();
        assert!(err.to_string().contains("Malformed question bank"));
    }
}
