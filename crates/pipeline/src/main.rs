//! Tumor Triage - Main Entry Point

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pipeline::{init_logging, DiagnosisRequest, Engines, TriageConfig};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "tumor-triage")]
#[command(version, about = "Rule-based and fuzzy risk assessment for tumor classifier output")]
struct Cli {
    /// Configuration file (TOML, JSON, or YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Diagnose a JSON request read from a file or stdin
    Diagnose {
        /// Request file; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Run only the fuzzy engine
    Fuzzy {
        #[arg(long)]
        confidence: f64,
        #[arg(long)]
        severity: f64,
        #[arg(long)]
        age: Option<f64>,
        #[arg(long)]
        pain: Option<f64>,
    },
    /// List the expert rules in evaluation order
    Rules,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    info!("=== Tumor Triage v{} ===", env!("CARGO_PKG_VERSION"));

    let config = TriageConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let engines = Engines::new(&config)?;

    match cli.command {
        Command::Diagnose { input } => {
            let request = match input {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("opening {}", path.display()))?;
                    DiagnosisRequest::from_reader(BufReader::new(file))?
                }
                None => DiagnosisRequest::from_reader(io::stdin().lock())?,
            };
            print_json(&engines.diagnose(&request))
        }
        Command::Fuzzy {
            confidence,
            severity,
            age,
            pain,
        } => print_json(&engines.fuzzy().analyze(confidence, severity, age, pain)),
        Command::Rules => print_json(&engines.rule_listing()),
    }
}
