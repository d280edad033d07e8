// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// Coordinates the other layers:
//
//   engine.rs         - the derivation driver: runs the strategy
//                       pipeline against one source question
//   derive_use_case.rs - resolves a question id, derives, and
//                       hands the batch to storage
//
// No file formats and no CLI types in this layer.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The strategy pipeline driver
pub mod engine;

// The derive-and-store workflow
pub mod derive_use_case;
