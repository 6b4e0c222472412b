//! iclr-downloader - OpenReview proceeding downloader
//!
//! Fetches the accepted papers of one ICLR venue/year and writes them to a
//! JSONL file.
//!
//! ## Usage
//!
//! ```bash
//! iclr-downloader -y 2024 -v Conference -o ./out -u user@example.com -p secret
//! ```

use anyhow::Result;
use clap::Parser;
use iclr_downloader::output::{ensure_output_dir, proceeding_filename, save_jsonl};
use iclr_downloader::proceeding::get_proceeding;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// OpenReview proceeding downloader - saves accepted ICLR papers as JSONL
#[derive(Parser)]
#[command(name = "iclr-downloader")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Year to download the proceeding of
    #[arg(short, long)]
    year: i32,

    /// Venue to download the proceeding of, e.g. `Conference`
    #[arg(short, long)]
    venue: String,

    /// Directory to save the results; must already exist
    #[arg(short, long)]
    output_dir: PathBuf,

    /// OpenReview username
    #[arg(short, long)]
    username: String,

    /// OpenReview password
    #[arg(short, long)]
    password: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .init();

    // Checked before any network activity; nothing partial is ever written.
    ensure_output_dir(&cli.output_dir)?;

    let papers = get_proceeding(cli.year, &cli.venue, &cli.username, &cli.password).await?;
    println!(
        "Fetched {} accepted papers for ICLR {} {}",
        papers.len(),
        cli.year,
        cli.venue
    );

    let path = cli.output_dir.join(proceeding_filename(cli.year, &cli.venue));
    save_jsonl(&path, &papers)?;
    println!("Saved: {}", path.display());

    Ok(())
}
