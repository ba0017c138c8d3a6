//! AAS Validator CLI
//!
//! Validates reference chains, typed literals, and AAS JSON documents.

use std::path::PathBuf;

use aas_validation::check::check_path;
use aas_validation::config::ValidatorConfig;
use aas_validation::model::{identifiables_from_json, ExportOptions};
use aas_validation::{
    coerce_typed_literal, validate_reference, validate_tagged_literal, CoerceOptions, Key,
    ReferenceType,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aas-validator")]
#[command(about = "Validate AAS references, typed literals, and documents")]
struct Cli {
    /// Explicit config file (defaults to aas-validator.toml lookup)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a single reference key chain
    Reference {
        /// ModelReference or ExternalReference
        #[arg(long)]
        kind: ReferenceType,
        /// Keys in order, as Type=value
        #[arg(short = 'k', long = "key", required = true)]
        keys: Vec<Key>,
    },

    /// Validate a literal against an XSD datatype
    Literal {
        /// Datatype tag, e.g. int or xs:dateTime
        #[arg(short = 't', long = "type")]
        datatype: String,
        /// Raw literal
        raw: String,
        /// Also print the coerced value
        #[arg(long)]
        typed: bool,
    },

    /// Check every document under a path
    Check {
        path: PathBuf,
        /// Write a JSON report
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Stop at the first failing file
        #[arg(long)]
        fail_fast: bool,
    },

    /// Print a document back as JSON
    Export {
        file: PathBuf,
        /// Emit typed values (overrides config)
        #[arg(long)]
        typed: bool,
    },

    /// Print the effective configuration
    Config,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.as_ref().map(|p| p.to_string_lossy().to_string());
    let config = ValidatorConfig::load_from(config_path.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Reference { kind, keys } => {
            let chain = keys.iter().map(|k| k.to_string()).collect::<Vec<_>>().join(", ");
            match validate_reference(kind, &keys) {
                Ok(()) => println!("✅ {}[{}]", kind, chain),
                Err(e) => {
                    println!("❌ {}[{}]", kind, chain);
                    println!("   {}", e);
                    std::process::exit(1);
                }
            }
            Ok(())
        }

        Commands::Literal { datatype, raw, typed } => {
            match validate_tagged_literal(&datatype, &raw) {
                Ok(dt) => {
                    println!("✅ '{}' is a valid {}", raw, dt);
                    if typed {
                        let value = coerce_typed_literal(dt, &raw, CoerceOptions::typed());
                        println!("   typed: {}", value.to_json());
                    }
                }
                Err(e) => {
                    println!("❌ {}", e);
                    std::process::exit(1);
                }
            }
            Ok(())
        }

        Commands::Check { path, output, fail_fast } => {
            let mut check = config.check.clone();
            check.fail_fast |= fail_fast;

            println!("🔍 Checking {}", path.display());
            let reports = check_path(&path, &check);

            let mut failed = 0;
            for report in &reports {
                match &report.failure {
                    None => println!("  ✅ {} ({} entities)", report.path.display(), report.entities),
                    Some(failure) => {
                        failed += 1;
                        println!("  ❌ {}", report.path.display());
                        println!("     └─ {}", failure.message);
                    }
                }
            }

            if let Some(output) = output {
                let report = serde_json::json!({
                    "generated_at": chrono::Utc::now().to_rfc3339(),
                    "root": path.display().to_string(),
                    "files": reports.len(),
                    "failed": failed,
                    "reports": reports,
                });
                std::fs::write(&output, serde_json::to_string_pretty(&report)?)
                    .with_context(|| format!("Failed to write {}", output.display()))?;
                println!("✅ Report written to {:?}", output);
            }

            println!();
            if reports.is_empty() {
                println!("❌ No documents found");
                std::process::exit(1);
            } else if failed > 0 {
                println!("❌ {} of {} document(s) failed", failed, reports.len());
                std::process::exit(1);
            } else {
                println!("✅ All {} document(s) valid", reports.len());
            }
            Ok(())
        }

        Commands::Export { file, typed } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let entities = identifiables_from_json(&content)?;

            let options = if typed { ExportOptions::typed() } else { config.export.options() };
            let exported = entities
                .iter()
                .map(|e| e.export(options))
                .collect::<Result<Vec<_>, _>>()?;
            let value = match <[serde_json::Value; 1]>::try_from(exported) {
                Ok([single]) => single,
                Err(many) => serde_json::Value::Array(many),
            };
            println!("{}", config.export.output_format.render(&value)?);
            Ok(())
        }

        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
