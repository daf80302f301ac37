//! gatesim CLI: level-scheduled gate simulation from the command line.
//!
//! Provides `gatesim check` for validating a netlist and reporting its depth,
//! and `gatesim run` for driving it with seeded random vectors and reporting
//! switching activity.

#![warn(missing_docs)]

mod check;
mod pipeline;
mod run;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// gatesim: a gate-level switching-activity simulator.
#[derive(Parser, Debug)]
#[command(name = "gatesim", version, about = "Gate-level switching-activity simulator")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `gatesim.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a netlist and report its logic depth.
    Check(CheckArgs),
    /// Apply random vectors and report switching activity.
    Run(RunArgs),
}

/// Arguments for the `gatesim check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Netlist file. Defaults to `project.netlist` from `gatesim.toml`.
    pub netlist: Option<String>,
}

/// Arguments for the `gatesim run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Netlist file. Defaults to `project.netlist` from `gatesim.toml`.
    pub netlist: Option<String>,

    /// Number of random vectors to apply.
    #[arg(short = 'n', long)]
    pub vectors: Option<usize>,

    /// Seed for the vector generator.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Output format for the report.
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Include one row per wire in the report.
    #[arg(long)]
    pub per_wire: bool,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

impl From<gatesim_config::ReportFormat> for ReportFormat {
    fn from(format: gatesim_config::ReportFormat) -> Self {
        match format {
            gatesim_config::ReportFormat::Text => Self::Text,
            gatesim_config::ReportFormat::Json => Self::Json,
        }
    }
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };
    init_logging(&global);

    let result = match cli.command {
        Command::Check(ref args) => check::run(args, &global),
        Command::Run(ref args) => run::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over the flags.
fn init_logging(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(global)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_log_level(global: &GlobalArgs) -> &'static str {
    if global.quiet {
        "error"
    } else if global.verbose {
        "debug"
    } else {
        "warn"
    }
}
