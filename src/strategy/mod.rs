// ============================================================
// Layer 4 - Derivation Strategies
// ============================================================
// Each strategy is one self-contained text transformation:
//
//   keyword.rs   - swap a legal term for a synonym
//   numeric.rs   - perturb the first number in the question
//   inversion.rs - flip a polarity word (and a true/false answer)
//   scenario.rs  - move the question to another enforcement domain
//
// A strategy either returns a complete DerivedQuestion or None.
// None is the normal "nothing to transform here" outcome, not an
// error, so the return type is Option rather than Result.
//
// Randomness comes in through DerivationContext, which the
// driver creates once per derive() call. Strategies never own a
// generator, so one engine can serve many threads.
//
// Reference: Rust Book §10 (Traits), §17 (Trait Objects)
//            rand crate documentation (RngCore, SliceRandom)

pub mod keyword;
pub mod numeric;
pub mod inversion;
pub mod scenario;

use rand::RngCore;
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::knowledge::DomainTables;
use crate::domain::question::{DerivationMethod, DerivedQuestion, SourceQuestion};

use inversion::LogicInversion;
use keyword::KeywordReplacement;
use numeric::NumberReplacement;
use scenario::ScenarioTransfer;

/// Per-call state shared by every strategy in one derive() run.
pub struct DerivationContext<'a> {
    rng: &'a mut dyn RngCore,

    /// Scenario sub-terms already transferred during this call
    consumed_scenario_terms: HashSet<String>,
}

impl<'a> DerivationContext<'a> {
    pub fn new(rng: &'a mut dyn RngCore) -> Self {
        Self { rng, consumed_scenario_terms: HashSet::new() }
    }

    /// The injected randomness provider
    pub fn rng(&mut self) -> &mut dyn RngCore {
        &mut *self.rng
    }

    pub fn is_consumed(&self, term: &str) -> bool {
        self.consumed_scenario_terms.contains(term)
    }

    pub fn consume(&mut self, term: &str) {
        self.consumed_scenario_terms.insert(term.to_string());
    }
}

// ─── DerivationStrategy ───────────────────────────────────────────────────────
/// One rule-based way to turn a source question into a new one.
pub trait DerivationStrategy: Send + Sync {
    /// The label recorded on every payload this strategy makes
    fn method(&self) -> DerivationMethod;

    /// Try to derive one question. Returns None when the source
    /// text holds nothing this strategy can transform.
    fn attempt(&self, source: &SourceQuestion, ctx: &mut DerivationContext<'_>) -> Option<DerivedQuestion>;
}

/// Build the strategy behind a method label.
pub fn build_strategy(method: DerivationMethod, tables: Arc<DomainTables>) -> Box<dyn DerivationStrategy> {
    match method {
        DerivationMethod::KeywordReplacement => Box::new(KeywordReplacement::new(tables)),
        DerivationMethod::NumberReplacement  => Box::new(NumberReplacement::new(tables)),
        DerivationMethod::LogicInversion     => Box::new(LogicInversion::new(tables)),
        DerivationMethod::ScenarioTransfer   => Box::new(ScenarioTransfer::new(tables)),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::tables_store::embedded_tables;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_build_strategy_reports_its_method() {
        let tables = Arc::new(embedded_tables().unwrap());
        for m in DerivationMethod::ALL {
            assert_eq!(build_strategy(m, tables.clone()).method(), m);
        }
    }

    #[test]
    fn test_context_tracks_consumed_terms() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut ctx = DerivationContext::new(&mut rng);
        assert!(!ctx.is_consumed("市场监管"));
        ctx.consume("市场监管");
        assert!(ctx.is_consumed("市场监管"));
    }
}
