use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, ValueHint};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pp_naca0012::case;
use pp_naca0012::verification::{self, RunOptions};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Verification plots for NACA0012 convergence studies",
    long_about = None
)]
struct Cli {
    /// Named case to post-process (see --list-cases)
    #[arg(required_unless_present = "list_cases")]
    case: Option<String>,

    /// List the built-in cases and exit
    #[arg(long, action = ArgAction::SetTrue)]
    list_cases: bool,

    /// Override the case input table
    #[arg(long, value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// Override the case output document
    #[arg(long, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Plot only the main error panel, without per-order rate panels
    #[arg(long, action = ArgAction::SetTrue)]
    no_rate_panels: bool,

    /// Write the observed convergence rates to a CSV table
    #[arg(long, value_hint = ValueHint::FilePath)]
    rates_csv: Option<PathBuf>,

    /// Verbose logging
    #[arg(long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    if cli.list_cases {
        for case in case::builtin_cases() {
            println!("{}", case.name);
        }
        return Ok(());
    }

    let name = cli
        .case
        .as_deref()
        .ok_or_else(|| anyhow!("no case selected"))?;
    let mut selected = case::select(name)?;
    if let Some(input) = cli.input {
        selected.input_file = input;
    }
    if let Some(output) = cli.output {
        selected.output_file = output;
    }

    let options = RunOptions {
        rate_panels: !cli.no_rate_panels,
        rates_csv: cli.rates_csv,
    };
    let written = verification::run(&selected, &options)
        .with_context(|| format!("case `{}` failed", selected.name))?;
    info!(path = %written.display(), "wrote verification document");
    Ok(())
}
