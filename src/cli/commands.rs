// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `derive` and `tables`, and all
// their configurable flags.
//
// clap's derive macros generate help text, error messages for
// missing args, and type conversion (string → usize, u64, and
// DerivationMethod through its FromStr impl).
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::derive_use_case::{DeriveRequest, EngineConfig};
use crate::domain::question::DerivationMethod;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive new practice questions from a stored question
    Derive(DeriveArgs),

    /// Print the effective domain knowledge tables as JSON
    Tables(TablesArgs),
}

/// All arguments for the `derive` command
#[derive(Args, Debug)]
pub struct DeriveArgs {
    /// JSON file holding the source questions
    #[arg(long, default_value = "data/sample_questions.json")]
    pub bank: PathBuf,

    /// Id of the question to derive from
    #[arg(long)]
    pub id: i64,

    /// How many questions to derive (defaults to --default-count)
    #[arg(long, value_parser = positive_count)]
    pub count: Option<usize>,

    /// Count used when --count is not given
    #[arg(long, default_value_t = 3, value_parser = positive_count)]
    pub default_count: usize,

    /// Requests above this are clamped
    #[arg(long, default_value_t = 5, value_parser = positive_count)]
    pub max_derivations: usize,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Strategy order, comma separated
    /// (default: keyword_replacement,number_replacement,logic_inversion,scenario_transfer)
    #[arg(long, value_delimiter = ',')]
    pub strategies: Vec<DerivationMethod>,

    /// JSON file the derived questions are appended to
    #[arg(long, default_value = "data/derived_questions.json")]
    pub out: PathBuf,

    /// Domain tables JSON to use instead of the built-in tables
    #[arg(long)]
    pub tables: Option<PathBuf>,
}

/// Counts of zero would derive nothing, so they are refused up front
fn positive_count(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// Convert CLI DeriveArgs into the application-layer EngineConfig.
/// The application layer never sees clap types.
impl From<&DeriveArgs> for EngineConfig {
    fn from(a: &DeriveArgs) -> Self {
        let strategy_order = if a.strategies.is_empty() {
            DerivationMethod::ALL.to_vec()
        } else {
            a.strategies.clone()
        };
        EngineConfig {
            max_derivations: a.max_derivations,
            default_count:   a.default_count,
            strategy_order,
        }
    }
}

impl From<&DeriveArgs> for DeriveRequest {
    fn from(a: &DeriveArgs) -> Self {
        DeriveRequest { question_id: a.id, count: a.count, seed: a.seed }
    }
}

/// All arguments for the `tables` command
#[derive(Args, Debug)]
pub struct TablesArgs {
    /// Domain tables JSON to check and print instead of the built-in tables
    #[arg(long)]
    pub tables: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn derive_args(argv: &[&str]) -> DeriveArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Derive(a) => a,
            other => panic!("expected derive, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults_map_to_default_config() {
        let a = derive_args(&["question-deriver", "derive", "--id", "1"]);
        assert_eq!(EngineConfig::from(&a), EngineConfig::default());
        assert_eq!(DeriveRequest::from(&a), DeriveRequest { question_id: 1, count: None, seed: None });
    }

    #[test]
    fn test_strategies_parse_comma_separated() {
        let a = derive_args(&[
            "question-deriver", "derive", "--id", "2", "--count", "4", "--seed", "9",
            "--strategies", "scenario_transfer,logic_inversion",
        ]);
        let cfg = EngineConfig::from(&a);
        assert_eq!(
            cfg.strategy_order,
            vec![DerivationMethod::ScenarioTransfer, DerivationMethod::LogicInversion]
        );
        assert_eq!(DeriveRequest::from(&a).seed, Some(9));
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let r = Cli::try_parse_from(["question-deriver", "derive", "--id", "1", "--strategies", "paraphrase"]);
        assert!(r.is_err());
    }

    #[test]
    fn test_zero_counts_are_rejected() {
        for flag in ["--count", "--default-count", "--max-derivations"] {
            let r = Cli::try_parse_from(["question-deriver", "derive", "--id", "1", flag, "0"]);
            assert!(r.is_err(), "{} 0 was accepted", flag);
        }
        let a = derive_args(&["question-deriver", "derive", "--id", "1", "--count", "1"]);
        assert_eq!(a.count, Some(1));
    }

    #[test]
    fn test_id_is_required() {
        assert!(Cli::try_parse_from(["question-deriver", "derive"]).is_err());
    }
}
