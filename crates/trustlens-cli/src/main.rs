//! TrustLens CLI - media trust-scoring agent
//!
//! Usage:
//!   trustlens init                 Write the default config file
//!   trustlens watch <url>          Watch a page and score its media forever
//!   trustlens analyze <file>       One-shot classification of a local image
//!   trustlens analyze --url <url>  One-shot classification of a hosted image
//!   trustlens health               Probe both scoring endpoints

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use trustlens_agent::{Agent, LogSink};
use trustlens_capture::{PageConfig, PageProbe, PageSession};
use trustlens_client::{AnalyzeRequest, ClassifierClient};
use trustlens_core::{Endpoint, LensConfig};

#[derive(Parser)]
#[command(name = "trustlens")]
#[command(author, version, about = "Media trust-scoring agent")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to the configuration file
    #[arg(long, default_value = "trustlens.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration file
    Init,

    /// Watch a page and keep scoring its media until interrupted
    Watch {
        /// URL of the page to watch
        url: String,

        /// Connect to an existing browser on this CDP port instead of
        /// launching one
        #[arg(long)]
        port: Option<u16>,

        /// Show the browser window instead of running headless
        #[arg(long)]
        headed: bool,
    },

    /// One-shot classification of a single image
    Analyze {
        /// Local image file to classify
        file: Option<PathBuf>,

        /// Classify an already-hosted image by URL instead
        #[arg(long, conflicts_with = "file")]
        url: Option<String>,
    },

    /// Probe both scoring endpoints
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to initialize logging")?;

    let config = LensConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    match cli.command {
        Commands::Init => init(&cli.config),
        Commands::Watch { url, port, headed } => watch(&config, &url, port, headed).await,
        Commands::Analyze { file, url } => analyze(&config, file, url).await,
        Commands::Health => health(&config).await,
    }
}

fn init(path: &PathBuf) -> Result<()> {
    LensConfig::write_default(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

async fn watch(config: &LensConfig, url: &str, port: Option<u16>, headed: bool) -> Result<()> {
    let session = match port {
        Some(port) => PageSession::connect(port)?,
        None => PageSession::launch_with_config(PageConfig {
            headless: !headed,
            ..PageConfig::default()
        })?,
    };

    session.navigate(url)?;
    info!("Watching {}", url);

    let probe = PageProbe::new(session, &config.sampling);
    let classifier = ClassifierClient::new(config.endpoints.clone());

    let mut agent = Agent::new(probe, classifier, LogSink, config);
    agent.run().await;

    Ok(())
}

async fn analyze(config: &LensConfig, file: Option<PathBuf>, url: Option<String>) -> Result<()> {
    let request = match (file, url) {
        (Some(path), None) => {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            AnalyzeRequest::image_b64(BASE64.encode(&bytes))
        }
        (None, Some(url)) => AnalyzeRequest::image_url(url),
        _ => anyhow::bail!("Provide an image file or --url"),
    };

    let client = ClassifierClient::new(config.endpoints.clone());
    let outcome = client.analyze(&request, Endpoint::Primary).await?;

    println!(
        "verdict: {}  score: {:.2}",
        outcome.result.verdict, outcome.result.score
    );
    for explanation in &outcome.result.explanations {
        println!("  - {}", explanation);
    }
    if outcome.switch_to.is_some() {
        println!("(answered by the fallback endpoint)");
    }

    Ok(())
}

async fn health(config: &LensConfig) -> Result<()> {
    let client = ClassifierClient::new(config.endpoints.clone());

    for endpoint in [Endpoint::Primary, Endpoint::Fallback] {
        match client.health(endpoint).await {
            Ok(true) => println!("{}: ok ({})", endpoint, config.endpoints.url_for(endpoint)),
            Ok(false) => println!(
                "{}: responding but not ok ({})",
                endpoint,
                config.endpoints.url_for(endpoint)
            ),
            Err(e) => println!(
                "{}: unreachable ({}): {}",
                endpoint,
                config.endpoints.url_for(endpoint),
                e
            ),
        }
    }

    Ok(())
}
