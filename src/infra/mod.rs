// ============================================================
// Layer 5 - Infrastructure Layer
// ============================================================
// Everything that touches the file system:
//
//   tables_store.rs  - Domain knowledge tables
//                      Embedded defaults, or a JSON override
//                      file, validated before use.
//
//   question_bank.rs - Source questions
//                      Loads the JSON question bank and resolves
//                      ids for the derive workflow.
//
//   derived_store.rs - Derived questions
//                      Assigns ids and writes each batch with a
//                      temp-file-and-rename, so a batch lands
//                      whole or not at all.
//
// Swapping the JSON files for a database means implementing
// QuestionSource and DerivedSink from domain::traits; nothing
// above this layer changes.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Embedded and file-based domain tables
pub mod tables_store;

/// JSON question bank (QuestionSource)
pub mod question_bank;

/// JSON derived question store (DerivedSink)
pub mod derived_store;
