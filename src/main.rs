use anyhow::{Context, Result};
use clap::Parser;
use greenlight::catalog::CheckerCatalog;
use greenlight::checkers::builtin_checkers;
use greenlight::cli::{Cli, Commands};
use greenlight::config::GreenlightConfig;
use greenlight::inference;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            config,
            catalog,
            output,
            ignore,
            op_args_limit,
            value_to_op_args_limit,
            jobs,
        } => {
            let mut config = match config {
                Some(path) => GreenlightConfig::from_toml_file(&path)?,
                None => GreenlightConfig::default(),
            };
            config.ignore.extend(ignore);
            if let Some(limit) = op_args_limit {
                config.op_args_limit = limit;
            }
            if let Some(limit) = value_to_op_args_limit {
                config.value_to_op_args_limit = limit;
            }
            if let Some(jobs) = jobs {
                config.jobs = jobs;
            }

            let catalog = match catalog {
                Some(path) => CheckerCatalog::from_toml_file(&path)?,
                None => CheckerCatalog::builtin(),
            };

            let results = inference::infer(&path, &config, &catalog, &builtin_checkers())?;
            write_report(&results, output)
        }
    }
}

fn write_report(results: &greenlight::ResultSet, output: Option<PathBuf>) -> Result<()> {
    let report = serde_json::to_string_pretty(results).context("Failed to serialize report")?;
    match output {
        Some(path) => std::fs::write(&path, report)
            .with_context(|| format!("Failed to write report to {}", path.display())),
        None => {
            println!("{report}");
            Ok(())
        }
    }
}
