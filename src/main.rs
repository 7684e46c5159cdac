use chrono::{DateTime, NaiveDate, Utc};
use clap::Parser;
use serde::Serialize;
use surfcast::analyzer::SurfAnalyzer;
use surfcast::config::Config;
use surfcast::models::SpotAnalysis;
use surfcast::scoring;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "surfcast",
    about = "Fetches marine forecasts for configured surf spots and prints ranked recommendations"
)]
struct Cli {
    /// Forecast date (UTC), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Only analyze spots in this region
    #[arg(long)]
    region: Option<String>,

    /// Number of top spots to highlight (overrides the config)
    #[arg(long)]
    top: Option<usize>,

    /// Path to the configuration file
    #[arg(long, default_value = "config/config.yaml")]
    config: String,
}

#[derive(Serialize)]
struct Report {
    date: NaiveDate,
    region: Option<String>,
    generated_at: DateTime<Utc>,
    top: Vec<SpotAnalysis>,
    spots: Vec<SpotAnalysis>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,surfcast=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    info!("Surfcast analysis service starting...");

    let config = Config::load(&cli.config).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load configuration: {}\n\n\
             Make sure:\n\
             1. {} exists\n\
             2. All required environment variables are set (check .env.example)\n\
             3. Create a .env file if needed",
            e,
            cli.config
        )
    })?;
    info!("Configuration loaded: {} spots", config.spots.len());

    let date = cli.date.unwrap_or_else(|| Utc::now().date_naive());
    let top_n = cli.top.unwrap_or(config.ranking.top_n);

    let mut analyzer = SurfAnalyzer::new(config)?;
    let analyses = analyzer.analyze_all(date, cli.region.as_deref()).await;

    if analyses.is_empty() {
        warn!(
            "No spot data available for {} (region: {})",
            date,
            cli.region.as_deref().unwrap_or("all")
        );
    }

    let ranked = scoring::rank(analyses);
    let report = Report {
        date,
        region: cli.region,
        generated_at: Utc::now(),
        top: scoring::top_n(&ranked, top_n),
        spots: ranked,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    info!("Analysis complete: {} spots ranked for {}", report.spots.len(), date);
    Ok(())
}
