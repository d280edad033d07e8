// ============================================================
// Layer 3 - Question Domain Types
// ============================================================
// The two records the engine deals with:
//
//   SourceQuestion  - a stored exam item, read-only input
//   DerivedQuestion - a new, unsaved item produced by one
//                     derivation strategy
//
// JSON field names follow the question bank format, so the
// same structs load the bank file and write the derived store.
//
// Reference: Rust Book §5 (Structs), §6 (Enums)
//            serde documentation (rename, rename_all)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four question formats used in the exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
    TrueFalse,
    Essay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Which strategy produced a derived question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivationMethod {
    KeywordReplacement,
    NumberReplacement,
    LogicInversion,
    ScenarioTransfer,
}

impl DerivationMethod {
    /// Every method, in the default pipeline order
    pub const ALL: [DerivationMethod; 4] = [
        DerivationMethod::KeywordReplacement,
        DerivationMethod::NumberReplacement,
        DerivationMethod::LogicInversion,
        DerivationMethod::ScenarioTransfer,
    ];

    /// The snake_case label stored alongside derived questions
    pub fn as_str(self) -> &'static str {
        match self {
            Self::KeywordReplacement => "keyword_replacement",
            Self::NumberReplacement  => "number_replacement",
            Self::LogicInversion     => "logic_inversion",
            Self::ScenarioTransfer   => "scenario_transfer",
        }
    }
}

impl fmt::Display for DerivationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the stored label, so `--strategies` can take the
/// same names that appear in the output records.
impl FromStr for DerivationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| {
                format!(
                    "unknown derivation method '{}' (expected one of: {})",
                    s,
                    Self::ALL.map(|m| m.as_str()).join(", ")
                )
            })
    }
}

/// An existing question, owned by the question bank.
/// The engine only ever borrows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceQuestion {
    pub id: i64,

    #[serde(rename = "type")]
    pub question_type: QuestionType,

    pub category: String,

    #[serde(default)]
    pub subcategory: Option<String>,

    pub difficulty: Difficulty,

    /// The question text itself
    pub question: String,

    /// Choice labels in display order; absent for true/false and essay items
    #[serde(default)]
    pub options: Option<Vec<String>>,

    pub answer: String,

    #[serde(default)]
    pub explanation: Option<String>,

    /// True for items taken from past exam papers
    #[serde(default)]
    pub is_historical: bool,

    #[serde(default)]
    pub year: Option<i32>,
}

/// A freshly derived question, not yet stored and without an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedQuestion {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub category: String,
    pub subcategory: Option<String>,
    pub difficulty: Difficulty,
    pub question: String,
    pub options: Option<Vec<String>>,
    pub answer: String,
    pub explanation: Option<String>,

    /// Always false: derived items never count as past exam papers
    pub is_historical: bool,

    /// Always None for derived items
    pub year: Option<i32>,

    pub source_question_id: i64,
    pub derivation_method: DerivationMethod,
}

impl DerivedQuestion {
    /// Start a payload as a copy of `source` tagged with `method`.
    /// Strategies then overwrite the fields they transform.
    pub fn from_source(source: &SourceQuestion, method: DerivationMethod) -> Self {
        Self {
            question_type:      source.question_type,
            category:           source.category.clone(),
            subcategory:        source.subcategory.clone(),
            difficulty:         source.difficulty,
            question:           source.question.clone(),
            options:            source.options.clone(),
            answer:             source.answer.clone(),
            explanation:        source.explanation.clone(),
            is_historical:      false,
            year:               None,
            source_question_id: source.id,
            derivation_method:  method,
        }
    }

    /// True when the question text actually changed
    pub fn differs_from(&self, source: &SourceQuestion) -> bool {
        self.question != source.question
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SourceQuestion {
        SourceQuestion {
            id:            7,
            question_type: QuestionType::TrueFalse,
            category:      "行政处罚法".to_string(),
            subcategory:   None,
            difficulty:    Difficulty::Easy,
            question:      "违法行为人应当在15日内缴纳罚款".to_string(),
            options:       None,
            answer:        "正确".to_string(),
            explanation:   None,
            is_historical: true,
            year:          Some(2022),
        }
    }

    #[test]
    fn test_from_source_resets_history_fields() {
        let d = DerivedQuestion::from_source(&sample(), DerivationMethod::LogicInversion);
        assert!(!d.is_historical);
        assert_eq!(d.year, None);
        assert_eq!(d.source_question_id, 7);
        // Nothing changed yet, so the invariant does not hold
        assert!(!d.differs_from(&sample()));
    }

    #[test]
    fn test_method_labels_round_trip_through_from_str() {
        for m in DerivationMethod::ALL {
            assert_eq!(m.as_str().parse::<DerivationMethod>().unwrap(), m);
        }
        assert!("synonyms".parse::<DerivationMethod>().is_err());
    }

    #[test]
    fn test_source_question_reads_bank_json() {
        let json = r#"{
            "id": 3, "type": "single_choice", "category": "行政法",
            "difficulty": "hard", "question": "Q", "answer": "A",
            "options": ["A. x", "B. y"]
        }"#;
        let q: SourceQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(q.question_type, QuestionType::SingleChoice);
        assert_eq!(q.difficulty, Difficulty::Hard);
        assert_eq!(q.options.as_ref().map(Vec::len), Some(2));
        assert!(q.explanation.is_none());
        assert!(!q.is_historical);
    }

    #[test]
    fn test_derived_question_serialises_method_label() {
        let d = DerivedQuestion::from_source(&sample(), DerivationMethod::ScenarioTransfer);
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["derivation_method"], "scenario_transfer");
        assert_eq!(v["type"], "true_false");
        assert_eq!(v["is_historical"], false);
    }
}
