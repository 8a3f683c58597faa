use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shift_report_parser::api::{AppState, create_router};
use shift_report_parser::config::{ConfigLoader, ParserConfig};
use shift_report_parser::pipeline::{FsSnapshotSink, NoopSnapshotSink, Pipeline, SnapshotSink};
use shift_report_parser::source::{PlainTextExtractor, TextExtractor, default_pdf_extractor};
use shift_report_parser::store::{InMemoryShiftStore, import_records};

#[derive(Parser)]
#[command(name = "shift-report-parser")]
#[command(about = "Extracts shift records from Scheduled vs Actual Hours reports")]
#[command(version)]
struct Cli {
    /// Parser configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one report and print the result
    Parse {
        /// A PDF report, or already-extracted report text
        file: PathBuf,
        /// Write stage snapshots under this directory
        #[arg(long)]
        snapshots: Option<PathBuf>,
        /// Print the parsed records as JSON instead of an import summary
        #[arg(long)]
        json: bool,
    },
    /// Start the HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ConfigLoader::load_or_default(cli.config.as_ref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    match cli.command {
        Commands::Parse {
            file,
            snapshots,
            json,
        } => parse_file(&config, &file, snapshots, json),
        Commands::Serve { port } => serve(config, port).await,
    }
}

fn parse_file(
    config: &ParserConfig,
    file: &Path,
    snapshots: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let bytes = fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let document = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    let is_pdf = file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    let lines = if is_pdf {
        default_pdf_extractor().extract_lines(&bytes)?
    } else {
        PlainTextExtractor.extract_lines(&bytes)?
    };

    let mut sink: Box<dyn SnapshotSink> = match snapshots.or_else(|| config.snapshot_dir.clone()) {
        Some(dir) => Box::new(FsSnapshotSink::new(dir)),
        None => Box::new(NoopSnapshotSink),
    };
    let output = Pipeline::new(config).run(&document, &lines, sink.as_mut());

    if json {
        println!("{}", serde_json::to_string_pretty(&output.records)?);
        return Ok(());
    }

    if output.records.is_empty() {
        println!("No records found in {}", document);
        return Ok(());
    }

    let mut store = InMemoryShiftStore::new();
    let stats = import_records(&mut store, &output.records);

    let rule = "=".repeat(60);
    println!("{}", rule);
    println!("IMPORT SUMMARY: {}", document);
    println!("{}", rule);
    println!("Record blocks found:      {}", output.report.total_blocks);
    println!("Total records parsed:     {}", stats.total_records);
    println!("Shift summaries inserted: {}", stats.summaries_inserted);
    println!("Punch records inserted:   {}", stats.punches_inserted);
    println!("Duplicates skipped:       {}", stats.duplicates());
    println!("Errors:                   {}", stats.errors);
    println!("{}", rule);
    Ok(())
}

async fn serve(config: ParserConfig, port: u16) -> Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;
    info!(port, "Starting shift report server");

    axum::serve(listener, create_router(AppState::new(config))).await?;
    Ok(())
}
