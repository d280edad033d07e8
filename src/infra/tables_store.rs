// ============================================================
// Layer 5 - Knowledge Tables Store
// ============================================================
// Loads the domain knowledge tables.
//
// The default tables are compiled into the binary from
// data/domain_tables.json, so the engine works with no files on
// disk. A deployment can point --tables at its own JSON file
// with the same layout; it goes through the same validation.
//
// Reference: serde_json documentation
//            Rust Book §9 (Error Handling with anyhow)

use anyhow::{Context, Result};
use std::{fs, path::Path, sync::Arc};

use crate::domain::knowledge::DomainTables;

/// The tables shipped with the crate
pub const DEFAULT_TABLES_JSON: &str = include_str!("../../data/domain_tables.json");

/// Parse and validate the embedded default tables
pub fn embedded_tables() -> Result<DomainTables> {
    parse_tables(DEFAULT_TABLES_JSON, "embedded domain tables")
}

/// Load tables from `path`, or the embedded defaults when None.
/// The result is ready to share between strategies.
pub fn load_tables(path: Option<&Path>) -> Result<Arc<DomainTables>> {
    let tables = match path {
        Some(p) => {
            let json = fs::read_to_string(p)
                .with_context(|| format!("Cannot read domain tables from '{}'", p.display()))?;
            let tables = parse_tables(&json, &p.display().to_string())?;
            tracing::info!("Loaded domain tables from '{}'", p.display());
            tables
        }
        None => embedded_tables()?,
    };

    tracing::debug!(
        "Domain tables: {} entity groups, {} scenarios, {} numeric bands, {} polarity pairs",
        tables.entity_groups.len(),
        tables.scenarios.len(),
        tables.numeric_bands.len(),
        tables.polarity.len()
    );
    Ok(Arc::new(tables))
}

fn parse_tables(json: &str, origin: &str) -> Result<DomainTables> {
    let tables: DomainTables = serde_json::from_str(json)
        .with_context(|| format!("Malformed domain tables in {}", origin))?;
    tables
        .validate()
        .with_context(|| format!("Invalid domain tables in {}", origin))?;
    Ok(tables)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_tables_parse() {
        let t = embedded_tables().unwrap();
        assert_eq!(t.entity_groups.len(), 7);
        assert_eq!(t.scenarios.len(), 8);
        assert_eq!(t.polarity[2].term, "应当");
        assert_eq!(t.polarity[2].inverse, "不应当");
    }

    #[test]
    fn test_load_tables_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.json");
        fs::write(&path, DEFAULT_TABLES_JSON).unwrap();
        let t = load_tables(Some(&path)).unwrap();
        assert_eq!(*t, embedded_tables().unwrap());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_tables(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(err.to_string().contains("Cannot read domain tables"));
    }

    #[test]
    fn test_invalid_tables_are_rejected() {
        let mut t = embedded_tables().unwrap();
        t.scenario_delimiter.clear();
        let json = serde_json::to_string(&t).unwrap();
        assert!(parse_tables(&json, "test").is_err());
        assert!(parse_tables("{ not json", "test").is_err());
    }
}
