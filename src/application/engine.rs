// ============================================================
// Layer 2 - Derivation Engine (the driver)
// ============================================================
// Runs an ordered pipeline of strategy slots against one source
// question and collects at most `count` derived questions.
//
// Default pipeline:
//
//   1. keyword_replacement   once
//   2. number_replacement    once
//   3. logic_inversion       once
//   4. scenario_transfer     until it reports no change
//
// The order is a plain Vec of slots, so callers can reorder or
// drop strategies without touching the control flow.
//
// A slot is only invoked while the quota is unfilled, so a
// count of 0 consumes no randomness at all.
//
// Reference: Rust Book §17 (Trait Objects), §16 (Send and Sync)

use rand::RngCore;
use std::sync::Arc;

use crate::domain::knowledge::DomainTables;
use crate::domain::question::{DerivationMethod, DerivedQuestion, SourceQuestion};
use crate::strategy::{build_strategy, DerivationContext, DerivationStrategy};

/// How often a slot may run within one derive() call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Once,
    /// Re-run until the strategy reports no change or the quota is full
    UntilExhausted,
}

impl Repeat {
    /// Scenario transfer fills leftover quota; everything else runs once
    pub fn default_for(method: DerivationMethod) -> Self {
        match method {
            DerivationMethod::ScenarioTransfer => Repeat::UntilExhausted,
            _ => Repeat::Once,
        }
    }
}

/// One pipeline entry
pub struct StrategySlot {
    pub strategy: Box<dyn DerivationStrategy>,
    pub repeat: Repeat,
}

impl StrategySlot {
    pub fn new(strategy: Box<dyn DerivationStrategy>, repeat: Repeat) -> Self {
        Self { strategy, repeat }
    }
}

pub struct DerivationEngine {
    pipeline: Vec<StrategySlot>,
}

impl DerivationEngine {
    /// Engine with the default strategy order
    pub fn new(tables: Arc<DomainTables>) -> Self {
        Self::with_order(tables, &DerivationMethod::ALL)
    }

    /// Engine running `order` with each method's default repeat policy
    pub fn with_order(tables: Arc<DomainTables>, order: &[DerivationMethod]) -> Self {
        let pipeline = order
            .iter()
            .map(|&m| StrategySlot::new(build_strategy(m, Arc::clone(&tables)), Repeat::default_for(m)))
            .collect();
        Self { pipeline }
    }

    /// Engine with a hand-built pipeline
    pub fn with_slots(pipeline: Vec<StrategySlot>) -> Self {
        Self { pipeline }
    }

    /// Methods in pipeline order
    pub fn order(&self) -> Vec<DerivationMethod> {
        self.pipeline.iter().map(|s| s.strategy.method()).collect()
    }

    /// Derive up to `count` questions from `source`.
    ///
    /// The result may be shorter than `count` (even empty) when
    /// too few strategies apply. Every returned question has text
    /// different from the source's.
    pub fn derive(&self, source: &SourceQuestion, count: usize, rng: &mut dyn RngCore) -> Vec<DerivedQuestion> {
        let mut ctx = DerivationContext::new(rng);
        let mut derived: Vec<DerivedQuestion> = Vec::new();

        for slot in &self.pipeline {
            while derived.len() < count {
                let method = slot.strategy.method();
                match slot.strategy.attempt(source, &mut ctx) {
                    Some(d) if d.differs_from(source) => derived.push(d),
                    Some(_) => {
                        tracing::warn!("{} returned unchanged text for question {}, dropped", method, source.id);
                        break;
                    }
                    None => {
                        tracing::debug!("{} not applicable to question {}", method, source.id);
                        break;
                    }
                }
                if slot.repeat == Repeat::Once {
                    break;
                }
            }
        }

        tracing::debug!(
            "Derived {} of {} requested question(s) from question {}",
            derived.len(),
            count,
            source.id
        );
        derived
    }
}
