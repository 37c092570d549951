//! cityclean binary: drops ZCTA placeholder rows from the city dataset, or
//! builds the per-state city index.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cityclean::{filter, index, CleanConfig};

#[derive(Parser)]
#[command(name = "cityclean")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    /// Config file (default: ./cityclean.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// NDJSON file to clean
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Where to write the cleaned NDJSON
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Group cities by state into a JSON index
    Index {
        /// NDJSON city records
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Where to write the index
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = CleanConfig::resolve(args.config.as_deref()).context("Failed to load configuration")?;

    match args.command {
        None => {
            let filter_config = config.filter.with_overrides(args.input, args.output);
            filter::run(&filter_config).with_context(|| {
                format!("Failed to clean {}", filter_config.input_path.display())
            })?;
            println!("{}", filter::completion_message(&filter_config));
        }
        Some(Commands::Index { input, output }) => {
            let index_config = config.index.with_overrides(input, output);
            let stats = index::run_index(&index_config).with_context(|| {
                format!("Failed to index {}", index_config.input_path.display())
            })?;
            println!("{}", index::completion_message(&index_config, &stats));
        }
    }

    Ok(())
}
