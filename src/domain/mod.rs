// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain structs, enums and traits describing exam questions
// and the knowledge the derivation strategies draw on.
//
// Rules for this layer:
//   - NO file I/O
//   - NO CLI types
//   - NO randomness (that is injected into the strategies)
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Source and derived question records
pub mod question;

// Entity groups, scenario catalog, numeric bands, polarity table
pub mod knowledge;

// Storage seams implemented by the infra layer
pub mod traits;
