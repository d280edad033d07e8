// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with `clap`.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `derive` - derive questions from one stored question
//                 and append them to the derived store
//   2. `tables` - print the validated knowledge tables
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, DeriveArgs, TablesArgs};

use crate::infra::tables_store::load_tables;

#[derive(Parser, Debug)]
#[command(
    name = "question-deriver",
    version,
    about = "Derive new practice exam questions from stored source questions."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Route the subcommand. The CLI layer only routes and prints.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Derive(args) => run_derive(args),
            Commands::Tables(args) => run_tables(args),
        }
    }
}

/// Handles the `derive` subcommand.
fn run_derive(args: DeriveArgs) -> Result<()> {
    use crate::application::derive_use_case::{DeriveRequest, DeriveUseCase, EngineConfig};
    use crate::infra::{derived_store::JsonDerivedStore, question_bank::JsonQuestionBank};

    tracing::info!("Deriving from question {} in '{}'", args.id, args.bank.display());

    let tables = load_tables(args.tables.as_deref())?;
    let bank   = JsonQuestionBank::load(&args.bank)?;
    let store  = JsonDerivedStore::new(&args.out);

    let request  = DeriveRequest::from(&args);
    let mut use_case = DeriveUseCase::new(EngineConfig::from(&args), tables, bank, store);
    let stored = use_case.execute(&request)?;

    if stored.is_empty() {
        println!("No strategy applied to question {}; nothing stored.", args.id);
    } else {
        println!("{}", serde_json::to_string_pretty(&stored)?);
    }
    Ok(())
}

/// Handles the `tables` subcommand.
fn run_tables(args: TablesArgs) -> Result<()> {
    let tables = load_tables(args.tables.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&*tables)?);
    Ok(())
}
