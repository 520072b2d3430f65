//! ESG Radar
//!
//! JSON dashboard service for ESG scoring: LLM-evaluated corporate
//! reports, news-driven sentiment alerts and a seeded market overview.

use clap::{Parser, Subcommand};
use esg_radar::{
    config::Config,
    ingest,
    scoring::{EsgScorer, LlmScorer},
    server, universe,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "esg-radar")]
#[command(about = "ESG intelligence dashboard backed by LLM scoring")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (default: config.toml, then
    /// ~/.config/esg-radar/config.toml)
    #[arg(short, long)]
    config: Option<String>,
}

fn load_config(path: Option<&str>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::load_default(),
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard API server
    Serve {
        /// Bind address override
        #[arg(long)]
        host: Option<String>,
        /// Bind port override
        #[arg(long)]
        port: Option<u16>,
    },
    /// Score a report file once and print the result
    Analyze {
        /// Path to a .txt, .csv or .pdf report
        path: PathBuf,
    },
    /// Score a single news item
    News {
        /// News headline
        title: String,
        /// Summary or excerpt
        summary: String,
    },
    /// List the seeded company universe
    Companies,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let scorer = LlmScorer::from_config(&config.llm)?;
            server::run(&config, Arc::new(scorer)).await
        }
        Commands::Analyze { path } => {
            let config = load_config(cli.config.as_deref())?;
            analyze_file(&config, &path).await
        }
        Commands::News { title, summary } => {
            let config = load_config(cli.config.as_deref())?;
            score_news(&config, &title, &summary).await
        }
        Commands::Companies => {
            list_companies();
            Ok(())
        }
    }
}

async fn analyze_file(config: &Config, path: &PathBuf) -> anyhow::Result<()> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("invalid file name: {}", path.display()))?;
    let bytes = std::fs::read(path)?;
    let text = ingest::extract_text(name, &bytes, config.ingest.max_upload_bytes)?;

    let scorer = LlmScorer::from_config(&config.llm)?;
    tracing::info!(scorer = scorer.name(), file = name, "scoring report");
    let result = scorer.analyze_report(&text).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    println!(
        "\nAverage score: {}  Suggested rating: {}",
        result.scores.average(),
        result.suggested_rating
    );
    Ok(())
}

async fn score_news(config: &Config, title: &str, summary: &str) -> anyhow::Result<()> {
    let scorer = LlmScorer::from_config(&config.llm)?;
    let impact = scorer.score_news_impact(title, summary).await?;

    println!(
        "{}: {}{}",
        impact.dimension,
        if impact.impact > 0.0 { "+" } else { "" },
        impact.impact
    );
    Ok(())
}

fn list_companies() {
    println!(
        "{:<6} {:<24} {:<16} {:>5} {:>7}",
        "TICKER", "NAME", "INDUSTRY", "AVG", "RATING"
    );
    for company in universe::seed_companies() {
        println!(
            "{:<6} {:<24} {:<16} {:>5} {:>7}",
            company.ticker,
            company.name,
            company.industry,
            company.average_score(),
            company.overall_rating
        );
    }
}
