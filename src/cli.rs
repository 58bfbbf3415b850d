use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "greenlight")]
#[command(about = "Derives a finding-free checker configuration from an existing codebase", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Infer green parameter values for every checker
    Analyze {
        /// Project directory to analyze
        path: PathBuf,

        /// Tool configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Checker catalog override file (TOML)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output file for the JSON report (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Glob patterns to exclude, in addition to .gitignore
        #[arg(long = "ignore")]
        ignore: Vec<String>,

        /// Skip optional sweeps for checkers with at least this many optional parameters
        #[arg(long)]
        op_args_limit: Option<usize>,

        /// Skip optional sweeps when any optional parameter has more candidate values than this
        #[arg(long)]
        value_to_op_args_limit: Option<usize>,

        /// Number of worker threads (0 = processing units minus one)
        #[arg(short, long)]
        jobs: Option<usize>,
    },
}
