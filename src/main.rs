use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use libreg_tools::io::http::HttpFetcher;
use libreg_tools::model::SyncOutcome;
use libreg_tools::normalize;
use libreg_tools::sync::{self, SyncConfig};
use libreg_tools::{Result, ToolError};
use tracing_subscriber::EnvFilter;
use url::Url;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| ToolError::Logging(err.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Ascii(args) => execute_ascii(args),
        Command::Fetch(args) => execute_fetch(args),
    }
}

fn execute_ascii(args: AsciiArgs) -> Result<()> {
    if !args.input.exists() {
        return Err(ToolError::MissingInput(args.input));
    }

    let stats = normalize::normalize_file(&args.input, &args.output)?;
    println!(
        "Conversion complete ({} lines, {} changed). Saved to: {}",
        stats.lines,
        stats.changed_lines,
        args.output.display()
    );
    Ok(())
}

fn execute_fetch(args: FetchArgs) -> Result<()> {
    let config = SyncConfig {
        page_url: args.page_url,
        data_dir: args.data_dir,
        timeout: args.timeout_secs.map(Duration::from_secs),
        ..SyncConfig::default()
    };

    let fetcher = HttpFetcher::new(config.timeout)?;
    let outcome = sync::sync_spreadsheet(&config, &fetcher)?;

    println!("Found XLSX file: {}", outcome.url());
    match outcome {
        SyncOutcome::Unchanged { .. } => {
            println!("File has not changed since last download.");
        }
        SyncOutcome::Updated(report) => {
            println!("New file saved: {}", report.file_path.display());
            if !report.defined_names.is_empty() {
                println!("\nDefined names in Excel:");
                for name in &report.defined_names {
                    println!(" - {} -> {}", name.name, name.formula);
                }
            }
            println!(
                "\nExported to CSV: {} ({} rows)",
                report.csv_path.display(),
                report.rows
            );
        }
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Clean text to ASCII and mirror the public library register."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a UTF-8 text or CSV file to plain ASCII.
    Ascii(AsciiArgs),
    /// Download the library register spreadsheet if it changed and export it as CSV.
    Fetch(FetchArgs),
}

#[derive(clap::Args)]
struct AsciiArgs {
    /// UTF-8 input file.
    input: PathBuf,

    /// ASCII output file, created or truncated.
    output: PathBuf,
}

#[derive(clap::Args)]
struct FetchArgs {
    /// Page linking to the spreadsheet.
    #[arg(long, default_value = sync::DEFAULT_PAGE_URL)]
    page_url: Url,

    /// Directory for the spreadsheet, its CSV export and the hash record.
    #[arg(long, default_value = sync::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Network timeout in seconds. Waits indefinitely when omitted.
    #[arg(long)]
    timeout_secs: Option<u64>,
}
