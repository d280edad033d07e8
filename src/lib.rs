// ============================================================
// question-deriver
// ============================================================
// Rule-based derivation of practice exam questions.
//
// Layers, outermost first:
//
//   cli          - Layer 1: argument parsing and printing
//   application  - Layer 2: derivation engine and use cases
//   domain       - Layer 3: question records, knowledge tables
//   strategy     - Layer 4: the four text transformations
//   infra        - Layer 5: tables, question bank, derived store
//
// Library users normally need only DerivationEngine:
//
//   let tables = load_tables(None)?;
//   let engine = DerivationEngine::new(tables);
//   let derived = engine.derive(&source, 3, &mut rng);

pub mod application;
pub mod cli;
pub mod domain;
pub mod infra;
pub mod strategy;

pub use application::engine::DerivationEngine;
pub use domain::knowledge::DomainTables;
pub use domain::question::{DerivationMethod, DerivedQuestion, SourceQuestion};
pub use infra::tables_store::load_tables;
