// ============================================================
// Layer 2 - DeriveUseCase
// ============================================================
// Orchestrates one derivation request end to end:
//
//   Step 1: Resolve the question id     (QuestionSource)
//   Step 2: Clamp the requested count   (EngineConfig)
//   Step 3: Seed a random generator     (seeded or from entropy)
//   Step 4: Derive                      (DerivationEngine)
//   Step 5: Store the batch atomically  (DerivedSink)
//
// The use case only coordinates; storage formats live in infra/
// and the text rules live in strategy/.
//
// Reference: Rust Book §9 (Error Handling), §10 (Generics)

use anyhow::{anyhow, Result};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::engine::DerivationEngine;
use crate::domain::knowledge::DomainTables;
use crate::domain::question::DerivationMethod;
use crate::domain::traits::{DerivedSink, QuestionSource};

// ─── Engine Configuration ─────────────────────────────────────────────────────
// Limits and pipeline order for derivation requests.
// Serialisable so a deployment can keep it next to its tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound for one request; larger counts are clamped
    pub max_derivations: usize,
    /// Count used when the request does not give one
    pub default_count: usize,
    pub strategy_order: Vec<DerivationMethod>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_derivations: 5,
            default_count:   3,
            strategy_order:  DerivationMethod::ALL.to_vec(),
        }
    }
}

impl EngineConfig {
    /// The count actually passed to the engine
    pub fn effective_count(&self, requested: Option<usize>) -> usize {
        let wanted = requested.unwrap_or(self.default_count);
        if wanted > self.max_derivations {
            tracing::warn!(
                "Requested {} derivations, clamping to max_derivations={}",
                wanted,
                self.max_derivations
            );
            self.max_derivations
        } else {
            wanted
        }
    }
}

/// One derivation request
#[derive(Debug, Clone, PartialEq)]
pub struct DeriveRequest {
    pub question_id: i64,
    pub count: Option<usize>,
    /// Fixed seed for reproducible output; None draws from OS entropy
    pub seed: Option<u64>,
}

// ─── DeriveUseCase ────────────────────────────────────────────────────────────
pub struct DeriveUseCase<Q, S> {
    config: EngineConfig,
    engine: DerivationEngine,
    questions: Q,
    sink: S,
}

impl<Q: QuestionSource, S: DerivedSink> DeriveUseCase<Q, S> {
    pub fn new(config: EngineConfig, tables: Arc<DomainTables>, questions: Q, sink: S) -> Self {
        let engine = DerivationEngine::with_order(tables, &config.strategy_order);
        Self { config, engine, questions, sink }
    }

    /// Derive from one stored question and persist the batch.
    /// Returns the stored records; empty when nothing applied.
    pub fn execute(&mut self, request: &DeriveRequest) -> Result<Vec<S::Stored>> {
        // ── Step 1: Resolve the source question ──────────────────────────────
        let source = self
            .questions
            .find(request.question_id)?
            .ok_or_else(|| anyhow!("Question {} does not exist", request.question_id))?;

        // ── Step 2: Clamp the count ──────────────────────────────────────────
        let count = self.config.effective_count(request.count);

        // ── Step 3: Per-request generator ────────────────────────────────────
        let mut rng = match request.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        // ── Step 4: Derive ───────────────────────────────────────────────────
        let batch = self.engine.derive(&source, count, &mut rng);
        tracing::info!(
            "Derived {} question(s) from question {} (requested {})",
            batch.len(),
            source.id,
            count
        );
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        // ── Step 5: Persist as one batch ─────────────────────────────────────
        let id_floor = self.questions.max_id().unwrap_or(0);
        self.sink.store_batch(batch, id_floor)
    }
}
