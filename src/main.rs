//! Scrape-Relay main entry point
//!
//! This is the command-line interface for submitting scrape requests to the
//! remote scraping backend.

use clap::Parser;
use scrape_relay::backend::{build_http_client, check_health, run_scrape};
use scrape_relay::config::{self, Config};
use scrape_relay::outcome::{ScrapeOutcome, ScrapeResult};
use scrape_relay::request::{validate, ScrapeRequest};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Scrape-Relay: a validated client for a remote scraping backend
///
/// Validates the submitted URL and depth, optionally probes the backend's
/// health, issues the scrape call, and renders the structured result or a
/// categorized failure.
#[derive(Parser, Debug)]
#[command(name = "scrape-relay")]
#[command(version)]
#[command(about = "Submit a URL to the scraping backend", long_about = None)]
struct Cli {
    /// URL to scrape
    #[arg(value_name = "URL", required_unless_present = "health")]
    url: Option<String>,

    /// Crawl depth (1-3); omitted or empty defaults to 1
    #[arg(short, long, value_name = "DEPTH")]
    depth: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config file and environment)
    #[arg(long, value_name = "URL")]
    backend_url: Option<String>,

    /// Skip the liveness probe before the scrape call
    #[arg(long)]
    no_probe: bool,

    /// Check backend health and exit
    #[arg(long, conflicts_with_all = ["url", "depth", "no_probe"])]
    health: bool,

    /// Print the raw JSON result instead of rendered text
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Resolve configuration: file, environment, CLI overrides
    let config = load_configuration(&cli)?;

    if cli.health {
        handle_health(&config).await
    } else {
        handle_scrape(&config, &cli).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("scrape_relay=info,warn"),
            1 => EnvFilter::new("scrape_relay=debug,info"),
            2 => EnvFilter::new("scrape_relay=trace,debug"),
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

/// Loads the config file (when given) and applies overrides.
///
/// Base URL precedence: `--backend-url` flag, then the environment
/// variable, then the config file, then the built-in default.
fn load_configuration(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match config::load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    if let Some(base_url) = cli
        .backend_url
        .clone()
        .or_else(config::backend_url_from_env)
    {
        config.backend.base_url = base_url;
    }

    if cli.no_probe {
        config.backend.probe_liveness = false;
    }

    Ok(config)
}

/// Handles the default mode: validate input, run the pipeline, render
async fn handle_scrape(config: &Config, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let raw_url = cli.url.as_deref().unwrap_or_default();

    let request = match validate(raw_url, cli.depth.as_deref(), config.validation.depth_policy) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("invalid {}: {}", e.field(), e);
            std::process::exit(2);
        }
    };

    tracing::info!(
        "Backend: {} (probe: {})",
        config.backend.base_url,
        config.backend.probe_liveness
    );

    let client = build_http_client(&config.backend)?;
    let outcome = run_scrape(&client, &config.backend, &request).await;

    match outcome {
        ScrapeOutcome::Success { result, .. } => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&request, &result);
            }
            Ok(())
        }
        ScrapeOutcome::Failure { kind, message, .. } => {
            eprintln!("scrape failed ({}): {}", kind, message);
            std::process::exit(1);
        }
    }
}

/// Renders a scrape result for the terminal
fn print_result(request: &ScrapeRequest, result: &ScrapeResult) {
    println!("=== {} ===\n", result.title);
    println!("URL: {} (depth {})", request.url, request.depth);

    match result.fetched_at.parse::<chrono::DateTime<chrono::Utc>>() {
        Ok(fetched) => println!("Fetched: {}", fetched.to_rfc2822()),
        Err(_) => println!("Fetched: {}", result.fetched_at),
    }

    println!("\n{}", result.markdown);

    if !result.links.is_empty() {
        println!("\nLinks ({}):", result.links.len());
        for link in &result.links {
            if link.text.is_empty() {
                println!("  - {}", link.href);
            } else {
                println!("  - {} ({})", link.text, link.href);
            }
        }
    }

    if let Some(warnings) = &result.warnings {
        println!("\nWarnings ({}):", warnings.len());
        for warning in warnings {
            println!("  ! {}", warning);
        }
    }
}

/// Handles the --health mode: timed liveness check with passthrough payload
async fn handle_health(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("Backend: {}\n", config.backend.base_url);

    let client = build_http_client(&config.backend)?;
    let report = check_health(&client, &config.backend.base_url).await;

    if report.healthy {
        println!("✓ Backend is responding ({} ms)", report.elapsed.as_millis());
        if let Some(payload) = &report.payload {
            println!("{}", serde_json::to_string_pretty(payload)?);
        }
        Ok(())
    } else {
        println!(
            "✗ Backend is not responding ({} ms)",
            report.elapsed.as_millis()
        );
        if let Some(error) = &report.error {
            println!("  {}", error);
        }
        println!();
        println!("Hosted backends may take several seconds to wake; retry shortly.");
        println!(
            "For a local backend, make sure it is running at {}",
            config.backend.base_url
        );
        std::process::exit(1);
    }
}
