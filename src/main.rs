//! Catalog-Crawler main entry point
//!
//! This is the command-line interface for the catalog crawler.

use anyhow::Context;
use catalog_crawler::config::{apply_overrides, load_config_with_hash, Config, ConfigOverrides};
use catalog_crawler::crawler::crawl;
use catalog_crawler::output::{
    load_report, print_statistics, write_debug_page, JsonFileSink, MarkdownSummarySink, Sink,
};
use catalog_crawler::CrawlError;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Catalog-Crawler: a paced crawler for paginated catalog listings
///
/// Fetches a listing page, follows its pagination links up to a page budget,
/// and writes every extracted record to a JSON report.
#[derive(Parser, Debug)]
#[command(name = "catalog-crawler")]
#[command(version = "1.0.0")]
#[command(about = "A paced crawler for paginated catalog listings", long_about = None)]
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

    /// Override the base URL from the config file
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Override the number of pages fetched beyond the base page
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Override the delay between page fetches (milliseconds)
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the existing JSON report and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let overrides = ConfigOverrides {
        base_url: cli.base_url.clone(),
        max_pages: cli.max_pages,
        delay_ms: cli.delay_ms,
    };
    let config = apply_overrides(config, &overrides).context("Invalid command-line override")?;

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_crawler=info,warn"),
            1 => EnvFilter::new("catalog_crawler=debug,info"),
            2 => EnvFilter::new("catalog_crawler=trace,debug"),
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

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Catalog-Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", config.crawler.base_url);
    println!("  Max additional pages: {}", config.crawler.max_pages);
    println!("  Delay between pages: {}ms", config.crawler.delay_ms);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Accept-Language: {}", config.http.accept_language);
    if let Some(referer) = &config.http.referer {
        println!("  Referer: {}", referer);
    }
    println!("  Timeout: {}s", config.http.timeout_secs);
    for (name, value) in &config.http.headers {
        println!("  Header: {}: {}", name, value);
    }

    println!("\nExtractor:");
    println!("  Items: {}", config.extractor.item_selector);
    println!("  Title: {}", config.extractor.title_selector);
    println!("  Pagination parameter: {}", config.extractor.pagination_param);
    for selector in &config.extractor.pagination_selectors {
        println!("  Pagination selector: {}", selector);
    }

    println!("\nOutput:");
    println!("  JSON report: {}", config.output.json_path);
    if let Some(summary) = &config.output.summary_path {
        println!("  Summary: {}", summary);
    }
    println!("  Debug page: {}", config.output.debug_html_path);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would crawl {} plus up to {} pagination pages",
        config.crawler.base_url, config.crawler.max_pages
    );
}

/// Handles the --stats mode: shows statistics from the JSON report
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let path = Path::new(&config.output.json_path);
    println!("Report: {}\n", path.display());

    let report = load_report(path)
        .with_context(|| format!("Failed to load report {}", path.display()))?;
    print_statistics(&report);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting crawl of {} (max {} additional pages, {}ms delay)",
        config.crawler.base_url,
        config.crawler.max_pages,
        config.crawler.delay_ms
    );

    let report = match crawl(config).await {
        Ok(report) => report,
        Err(CrawlError::StructuralMismatch { url, content }) => {
            let debug_path = Path::new(&config.output.debug_html_path);
            write_debug_page(debug_path, &content).with_context(|| {
                format!("Failed to write debug page {}", debug_path.display())
            })?;
            tracing::error!(
                "No records found on {}; the site layout may have changed. Raw page saved to {}",
                url,
                debug_path.display()
            );
            anyhow::bail!("structural mismatch on {}", url);
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    JsonFileSink::new(&config.output.json_path).persist(&report)?;
    if let Some(summary_path) = &config.output.summary_path {
        MarkdownSummarySink::new(summary_path).persist(&report)?;
    }

    tracing::info!(
        "Successfully crawled {} records from {} pages",
        report.total_records,
        report.pages_crawled
    );
    Ok(())
}
