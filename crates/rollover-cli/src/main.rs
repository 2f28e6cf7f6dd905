mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::scenario::{DemoArgs, LadderArgs, SimulateArgs};

/// Interest-cost impact of rolling government debt at new rates
#[derive(Parser)]
#[command(
    name = "rollover",
    version,
    about = "Simulate interest-cost impact of government debt rollovers",
    long_about = "Replays a sequence of rollover dates and rates against a bond \
                  portfolio. Mature bonds are reissued at the new rate and the \
                  change in annual interest expense is reported and charted."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "narrative", global = true)]
    output: OutputFormat,

    /// Chart drawn after narrative or table output
    #[arg(long, default_value = "bar", global = true)]
    chart: ChartKind,

    /// Emit debug logs to stderr (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in rising-rate demo
    Demo(DemoArgs),
    /// Build a maturity ladder from flags and roll it along a rate path
    Ladder(LadderArgs),
    /// Run a scenario from a JSON/YAML file or piped JSON
    Simulate(SimulateArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
    Narrative,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ChartKind {
    Bar,
    Line,
    None,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Demo(args) => commands::scenario::run_demo(args),
        Commands::Ladder(args) => commands::scenario::run_ladder(args),
        Commands::Simulate(args) => commands::scenario::run_simulate(args),
        Commands::Version => {
            println!("rollover {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    let value = match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    output::format_output(&cli.output, &value);

    if matches!(cli.output, OutputFormat::Narrative | OutputFormat::Table) {
        if let Err(e) = output::chart::render(cli.chart, &value) {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
