// ============================================================
// Layer 3 - Core Traits (Abstractions)
// ============================================================
// The engine itself never touches storage. These two traits are
// the seams where the application layer plugs storage in:
//
//   QuestionSource - resolves an id to a SourceQuestion
//   DerivedSink    - stores one derived batch, all or nothing
//
// The JSON-file implementations live in infra/. A database-
// backed implementation would only need to implement these.
//
// The strategy abstraction is in strategy/mod.rs, next to the
// strategies that implement it.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::question::{DerivedQuestion, SourceQuestion};

// ─── QuestionSource ───────────────────────────────────────────────────────────
/// Anything that can look up existing questions by id.
pub trait QuestionSource {
    /// Returns `Ok(None)` when no question has this id.
    fn find(&self, id: i64) -> Result<Option<SourceQuestion>>;

    /// Highest id currently in use, if any question exists.
    fn max_id(&self) -> Option<i64>;
}

// ─── DerivedSink ──────────────────────────────────────────────────────────────
/// Anything that can persist a batch of derived questions.
pub trait DerivedSink {
    /// A derived question after identity assignment
    type Stored;

    /// Assign ids starting after `id_floor` and store the whole
    /// batch. Either every record is stored or none is.
    fn store_batch(&mut self, batch: Vec<DerivedQuestion>, id_floor: i64) -> Result<Vec<Self::Stored>>;
}
