use std::path::PathBuf;

use clap::{Parser, Subcommand};
use resource_tools::consolidate;
use resource_tools::{Result, ToolError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_tracing().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| ToolError::Logging(err.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Consolidate(args) => execute_consolidate(args),
    }
}

fn execute_consolidate(args: ConsolidateArgs) -> Result<()> {
    let output = args.resolve_output();
    let summary = consolidate::consolidate_directory(&args.data_dir, &output)?;
    summary.log();

    if let Some(path) = &args.summary {
        consolidate::write_summary(path, &summary)?;
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Merge resource directory spreadsheets into one tagged master table."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Consolidate every source table into the master table.
    Consolidate(ConsolidateArgs),
}

#[derive(clap::Args)]
struct ConsolidateArgs {
    /// Directory holding the source tables (`<name>.csv` or `<name>.xlsx`).
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Output path; `.csv` or `.xlsx`. Defaults to `<data-dir>/Master.csv`.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Optional path for a JSON run summary.
    #[arg(long)]
    summary: Option<PathBuf>,
}

impl ConsolidateArgs {
    fn resolve_output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.data_dir.join("Master.csv"))
    }
}
