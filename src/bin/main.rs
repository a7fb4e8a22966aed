//! metric-schema CLI - inspect and reconcile metric schema files
//!
//! Usage:
//!   metric-schema init <base_table>
//!   metric-schema reconcile <schema.json> --tables <tables.json> [--config <file>]
//!   metric-schema used-tables <schema.json>
//!   metric-schema fingerprint <schema.json>
//!
//! Examples:
//!   metric-schema reconcile revenue.json --tables warehouse.json > revenue.joined.json
//!   RUST_LOG=debug metric-schema reconcile revenue.json --tables warehouse.json

use clap::{Parser, Subcommand};
use metric_schema::config::Settings;
use metric_schema::inference::{InferenceConfig, JoinInferenceEngine};
use metric_schema::metadata::TableCatalog;
use metric_schema::{MetricEditor, MetricSchema};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "metric-schema")]
#[command(about = "Inspect metric schemas and infer their joins")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to the standard search locations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print an empty schema using the configured cache defaults
    Init {
        /// Base table of the new metric
        base_table: String,
    },

    /// Infer missing joins and print the updated schema
    Reconcile {
        /// Path to the schema JSON file
        file: PathBuf,

        /// Path to the table listing JSON file
        #[arg(short, long)]
        tables: PathBuf,
    },

    /// List the tables a schema references
    UsedTables {
        /// Path to the schema JSON file
        file: PathBuf,
    },

    /// Print the schema's cache fingerprint
    Fingerprint {
        /// Path to the schema JSON file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Init { base_table } => cmd_init(&settings, base_table),
        Commands::Reconcile { file, tables } => cmd_reconcile(&settings, &file, &tables),
        Commands::UsedTables { file } => cmd_used_tables(&file),
        Commands::Fingerprint { file } => cmd_fingerprint(&file),
    }
}

fn read_file(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(s) => Some(s),
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            None
        }
    }
}

fn load_schema(path: &Path) -> Option<MetricSchema> {
    let source = read_file(path)?;
    match MetricSchema::from_json(&source) {
        Ok(schema) => Some(schema),
        Err(e) => {
            eprintln!("Invalid schema '{}': {}", path.display(), e);
            None
        }
    }
}

fn print_schema(schema: &MetricSchema) -> ExitCode {
    match schema.to_json() {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_init(settings: &Settings, base_table: String) -> ExitCode {
    let schema = MetricSchema::new(base_table).with_cache_policy(settings.cache.to_policy());
    print_schema(&schema)
}

fn cmd_reconcile(settings: &Settings, file: &Path, tables: &Path) -> ExitCode {
    let Some(schema) = load_schema(file) else {
        return ExitCode::FAILURE;
    };
    let Some(listing) = read_file(tables) else {
        return ExitCode::FAILURE;
    };
    let catalog: TableCatalog = match serde_json::from_str(&listing) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid table listing '{}': {}", tables.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let engine = JoinInferenceEngine::with_config(InferenceConfig::from(&settings.inference));
    let mut editor = MetricEditor::new(schema, catalog, engine);
    let report = editor.reconcile_joins().clone();

    for table in &report.unmatched {
        eprintln!("No join inferred for '{}': no common columns", table);
    }
    for table in &report.unknown {
        eprintln!("Table '{}' not found in listing", table);
    }

    print_schema(&editor.into_schema())
}

fn cmd_used_tables(file: &Path) -> ExitCode {
    let Some(schema) = load_schema(file) else {
        return ExitCode::FAILURE;
    };
    for table in schema.used_tables() {
        println!("{}", table);
    }
    ExitCode::SUCCESS
}

fn cmd_fingerprint(file: &Path) -> ExitCode {
    let Some(schema) = load_schema(file) else {
        return ExitCode::FAILURE;
    };
    match schema.fingerprint() {
        Ok(hash) => {
            println!("{}", hash);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Fingerprint error: {}", e);
            ExitCode::FAILURE
        }
    }
}
