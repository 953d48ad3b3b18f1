use anyhow::Context;
use clap::Parser;
use pulse_core::AppConfig;
use pulse_service::DefaultPipeline;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str =
    "pulse=info,pulse_service=info,reddit_client=info,llm_interface=info,sentiment_engine=info";

/// Aggregate recent Reddit sentiment about a ticker or subject.
#[derive(Debug, Parser)]
#[command(name = "pulse", version, about)]
struct Cli {
    /// Ticker or subject to analyze, e.g. AAPL
    subject: String,

    /// TOML configuration file; environment variables override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the result on a single line
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting pulse for {}", cli.subject);

    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let pipeline =
        DefaultPipeline::from_config(&config).context("failed to initialize clients")?;

    let result = pipeline.analyze(&cli.subject).await;

    let rendered = if cli.compact {
        serde_json::to_string(&result)
    } else {
        serde_json::to_string_pretty(&result)
    }
    .context("failed to render result")?;
    println!("{}", rendered);

    Ok(())
}
