// ============================================================
// Layer 4 - Scenario Transfer Strategy
// ============================================================
// Moves a question into another enforcement domain:
//
//   "在食品安全监管中，下列哪些事项..."
//     → "在消防监管中，下列哪些事项..."
//
// Catalog entries may hold several sub-terms separated by the
// table's delimiter ("交通管理、道路运输管理"). Any sub-term long
// enough to be eligible can match; the replacement is always the
// primary (first) sub-term of a different, randomly chosen entry.
//
// The driver may call this strategy repeatedly on the same
// source. Each call scans the original text, so without extra
// state every call would hit the same sub-term. Transferred
// sub-terms are therefore recorded in the DerivationContext and
// skipped for the rest of the derive() call. Once no unconsumed
// sub-term is left the strategy reports no change, which ends
// the driver's repeat loop.

use rand::seq::SliceRandom;
use std::sync::Arc;

use super::{DerivationContext, DerivationStrategy};
use crate::domain::knowledge::DomainTables;
use crate::domain::question::{DerivationMethod, DerivedQuestion, SourceQuestion};

pub struct ScenarioTransfer {
    tables: Arc<DomainTables>,
}

impl ScenarioTransfer {
    pub fn new(tables: Arc<DomainTables>) -> Self {
        Self { tables }
    }

    /// First unconsumed, eligible sub-term present in `text`,
    /// with the index of the catalog entry it belongs to
    fn find_match(&self, text: &str, ctx: &DerivationContext<'_>) -> Option<(usize, &str)> {
        (0..self.tables.scenarios.len()).find_map(|idx| {
            self.tables
                .scenario_terms(idx)
                .into_iter()
                .find(|t| {
                    self.tables.is_eligible_scenario_term(t) && text.contains(*t) && !ctx.is_consumed(t)
                })
                .map(|t| (idx, t))
        })
    }
}

impl DerivationStrategy for ScenarioTransfer {
    fn method(&self) -> DerivationMethod {
        DerivationMethod::ScenarioTransfer
    }

    fn attempt(&self, source: &SourceQuestion, ctx: &mut DerivationContext<'_>) -> Option<DerivedQuestion> {
        let (matched_idx, term) = self.find_match(&source.question, ctx)?;
        ctx.consume(term);

        let candidates: Vec<usize> = (0..self.tables.scenarios.len())
            .filter(|&i| i != matched_idx)
            .collect();
        let target_idx = *candidates.choose(ctx.rng())?;
        let target = self.tables.primary_term(target_idx)?;

        let mut derived = DerivedQuestion::from_source(source, self.method());
        derived.question = source.question.replacen(term, target, 1);

        tracing::debug!("scenario_transfer: '{}' -> '{}'", term, target);
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

    fn strategy() -> ScenarioTransfer {
        ScenarioTransfer::new(Arc::new(embedded_tables().unwrap()))
    }

    #[test]
    fn test_transfers_to_a_different_primary_term() {
        let s = strategy();
        let tables = embedded_tables().unwrap();
        let primaries: Vec<&str> = (0..tables.scenarios.len())
            .filter_map(|i| tables.primary_term(i))
            .collect();
        let q = question("在食品安全监管中，下列哪些事项属于检查范围？");

        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut ctx = DerivationContext::new(&mut rng);
            let d = s.attempt(&q, &mut ctx).unwrap();
            let target = d
                .question
                .strip_prefix('在')
                .and_then(|r| r.strip_suffix("中，下列哪些事项属于检查范围？"))
                .unwrap();
            assert_ne!(target, "食品安全监管");
            assert!(primaries.contains(&target));
        }
    }

    #[test]
    fn test_secondary_sub_term_matches() {
        let s = strategy();
        let q = question("某地道路运输管理部门开展检查");
        let mut rng = StdRng::seed_from_u64(4);
        let mut ctx = DerivationContext::new(&mut rng);
        let d = s.attempt(&q, &mut ctx).unwrap();
        assert!(!d.question.contains("道路运输管理"));
        assert!(d.question.starts_with("某地") && d.question.ends_with("部门开展检查"));
    }

    #[test]
    fn test_repeat_calls_consume_matched_terms() {
        let s = strategy();
        let q = question("市场监管与消防监管联合执法");
        let mut rng = StdRng::seed_from_u64(8);
        let mut ctx = DerivationContext::new(&mut rng);

        // "市场监管" comes before "消防监管" in the catalog
        let first = s.attempt(&q, &mut ctx).unwrap();
        assert!(first.question.ends_with("与消防监管联合执法"));
        let second = s.attempt(&q, &mut ctx).unwrap();
        assert!(second.question.starts_with("市场监管与"));
        assert!(s.attempt(&q, &mut ctx).is_none());
    }

    #[test]
    fn test_no_catalog_term_means_no_change() {
        let s = strategy();
        let mut rng = StdRng::seed_from_u64(1);
        let mut ctx = DerivationContext::new(&mut rng);
        assert!(s.attempt(&question("行政机关应当依法行政"), &mut ctx).is_none());
    }

    #[test]
    fn test_answer_options_explanation_untouched() {
        let s = strategy();
        let mut q = question("卫生监督中发现问题");
        q.options = Some(vec!["A. 卫生监督".to_string()]);
        q.explanation = Some("卫生监督机构".to_string());
        let mut rng = StdRng::seed_from_u64(2);
        let mut ctx = DerivationContext::new(&mut rng);
        let d = s.attempt(&q, &mut ctx).unwrap();
        assert_eq!(d.options, q.options);
        assert_eq!(d.explanation, q.explanation);
        assert_eq!(d.answer, q.answer);
    }
}
