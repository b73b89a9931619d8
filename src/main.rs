//! Pagesift main entry point
//!
//! This is the command-line interface for the pagesift scraper.

use anyhow::Context;
use clap::Parser;
use pagesift::config::{load_config_with_hash, Config};
use pagesift::output::{print_run_summary, write_records};
use pagesift::scrape;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pagesift: a polite single-site scraper
///
/// Pagesift fetches a page sequence while respecting robots.txt and rate
/// limits, extracts one record per page from configured CSS rules, and
/// writes the records as CSV or JSON.
#[derive(Parser, Debug)]
#[command(name = "pagesift")]
#[command(version = "1.0.0")]
#[command(about = "A polite single-site scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without any requests
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    tracing::info!(
        "Configuration loaded successfully (hash: {})",
        &config_hash[..12]
    );

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_scrape(&config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pagesift=info,warn"),
            1 => EnvFilter::new("pagesift=debug,info"),
            2 => EnvFilter::new("pagesift=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be scraped
fn handle_dry_run(config: &Config) {
    println!("=== Pagesift Dry Run ===\n");

    println!("Target:");
    println!("  Base URL: {}", config.target.base_url);
    match &config.target.next_page {
        Some(rule) => println!("  Next page: {}", rule),
        None => println!("  Next page: (none, single page)"),
    }
    println!("  Max pages: {}", config.target.max_pages);
    println!("  Respect robots.txt: {}", config.target.respect_robots);
    println!("  Same host only: {}", config.target.same_host_only);

    println!("\nRequest:");
    println!("  User agent: {}", config.request.user_agent);
    println!("  Delay: {:.1}s", config.request.delay_seconds);
    println!("  Timeout: {}s", config.request.timeout_seconds);
    if !config.request.headers.is_empty() {
        println!("  Headers ({}):", config.request.headers.len());
        for (name, value) in &config.request.headers {
            println!("    {}: {}", name, value);
        }
    }

    println!("\nFields ({}):", config.fields.len());
    for field in &config.fields {
        match &field.pattern {
            Some(pattern) => println!("  - {}: {} (pattern: {})", field.name, field.selector, pattern),
            None => println!("  - {}: {}", field.name, field.selector),
        }
    }

    println!("\nOutput:");
    println!("  Path: {}", config.output.path);
    println!("  Format: {}", config.output.format);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would scrape up to {} pages starting at {}",
        config.target.max_pages, config.target.base_url
    );
}

/// Handles the main scrape operation
async fn handle_scrape(config: &Config) -> anyhow::Result<()> {
    let state = match scrape::run(config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            return Err(e.into());
        }
    };

    let written = write_records(&config.output, state.records())
        .context("failed to write output files")?;

    print_run_summary(&state);
    for path in &written {
        println!("Output written to: {}", path.display());
    }

    Ok(())
}
