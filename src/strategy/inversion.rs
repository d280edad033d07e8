// ============================================================
// Layer 4 - Logic Inversion Strategy
// ============================================================
// Flips the stance of a question by swapping its first polarity
// word for the negated counterpart:
//
//   "违法行为人应当在15日内缴纳罚款"
//     → "违法行为人不应当在15日内缴纳罚款"
//
// For a true/false item the recorded answer flips too, so the
// derived question stays answerable. Other question types keep
// their answer: the option text is not inverted, so the correct
// choice is left for the author to re-check.
//
// The polarity table is scanned in order. Lookup is one-way:
// "不应当" is not turned back into "应当".

use std::sync::Arc;

use super::{DerivationContext, DerivationStrategy};
use crate::domain::knowledge::DomainTables;
use crate::domain::question::{DerivationMethod, DerivedQuestion, QuestionType, SourceQuestion};

pub struct LogicInversion {
    tables: Arc<DomainTables>,
}

impl LogicInversion {
    pub fn new(tables: Arc<DomainTables>) -> Self {
        Self { tables }
    }
}

impl DerivationStrategy for LogicInversion {
    fn method(&self) -> DerivationMethod {
        DerivationMethod::LogicInversion
    }

    fn attempt(&self, source: &SourceQuestion, _ctx: &mut DerivationContext<'_>) -> Option<DerivedQuestion> {
        let pair = self
            .tables
            .polarity
            .iter()
            .find(|p| source.question.contains(p.term.as_str()))?;

        let mut derived = DerivedQuestion::from_source(source, self.method());
        derived.question = source.question.replacen(pair.term.as_str(), &pair.inverse, 1);

        if source.question_type == QuestionType::TrueFalse {
            derived.answer = self.tables.true_false.flip(&source.answer);
        }

        tracing::debug!(
            "logic_inversion: '{}' -> '{}' (answer '{}' -> '{}')",
            pair.term,
            pair.inverse,
            source.answer,
            derived.answer
        );
        Some(derived).filter(|d| d.differs_from(source))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::tables_store::embedded_tables;
    use crate::strategy::test_support::question;
    use rand::{rngs::StdRng, SeedableRng};

    fn run(q: &SourceQuestion) -> Option<DerivedQuestion> {
        let s = LogicInversion::new(Arc::new(embedded_tables().unwrap()));
        let mut rng = StdRng::seed_from_u64(0);
        let mut ctx = DerivationContext::new(&mut rng);
        s.attempt(q, &mut ctx)
    }

    fn true_false(text: &str, answer: &str) -> SourceQuestion {
        let mut q = question(text);
        q.question_type = QuestionType::TrueFalse;
        q.answer = answer.to_string();
        q
    }

    #[test]
    fn test_fifteen_days_scenario_flips_answer() {
        let q = true_false("违法行为人应当在15日内缴纳罚款", "正确");
        let d = run(&q).unwrap();
        assert_eq!(d.question, "违法行为人不应当在15日内缴纳罚款");
        assert_eq!(d.answer, "错误");
    }

    #[test]
    fn test_negative_answer_flips_to_affirmative() {
        let d = run(&true_false("该行为合法", "错误")).unwrap();
        assert_eq!(d.question, "该行为违法");
        assert_eq!(d.answer, "正确");
    }

    #[test]
    fn test_choice_question_keeps_answer() {
        let mut q = question("下列说法正确的是？");
        q.answer = "B".to_string();
        let d = run(&q).unwrap();
        assert_eq!(d.question, "下列说法错误的是？");
        assert_eq!(d.answer, "B");
    }

    #[test]
    fn test_table_order_beats_text_order() {
        // "可以" appears first in the text, but "应当" comes first in the table
        let d = run(&question("可以先告知，再应当听证")).unwrap();
        assert_eq!(d.question, "可以先告知，再不应当听证");
    }

    #[test]
    fn test_only_first_occurrence_replaced() {
        let d = run(&question("必须出示证件，必须说明理由")).unwrap();
        assert_eq!(d.question, "禁止出示证件，必须说明理由");
    }

    #[test]
    fn test_no_polarity_term_means_no_change() {
        assert!(run(&true_false("罚款属于行政处罚", "正确")).is_none());
    }

    #[test]
    fn test_explanation_and_options_untouched() {
        let mut q = question("行政机关可以当场收缴罚款");
        q.explanation = Some("可以当场收缴的情形有限".to_string());
        q.options = Some(vec!["A. 可以".to_string()]);
        let d = run(&q).unwrap();
        assert_eq!(d.explanation, q.explanation);
        assert_eq!(d.options, q.options);
    }
}
