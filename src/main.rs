use std::path::{Path, PathBuf};

use anyhow::Context;
use campus_health_analytics::{
    export, report, risk, AnalyticsAggregator, EngineConfig, ReportRepository, Snapshot,
};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

mod db;

#[derive(Parser)]
#[command(name = "campus-health")]
#[command(about = "Operational health analytics for campus daily checklists", long_about = None)]
struct Cli {
    /// Engine configuration (TOML); defaults apply when absent
    #[arg(long, global = true, default_value = "campus-health.toml")]
    config: PathBuf,
    /// Read centers and reports from a JSON snapshot instead of Postgres
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load realistic seed data
    Seed,
    /// Score every center as of a date
    Score {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Export analytics in tabular or structured form
    Export {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate a markdown report
    Report {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

async fn connect() -> anyhow::Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set when no --snapshot is given")?;

    PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")
}

async fn load_snapshot(
    path: Option<&Path>,
    from: NaiveDate,
    to: NaiveDate,
) -> anyhow::Result<Snapshot> {
    match path {
        Some(path) => Snapshot::load_json(path),
        None => {
            let pool = connect().await?;
            db::load_snapshot(&pool, from, to).await
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::load_from_path(&cli.config)?;
    let window_days = config.prediction.window_days;
    let aggregator = AnalyticsAggregator::new(config);

    match cli.command {
        Commands::InitDb => {
            let pool = connect().await?;
            db::init_db(&pool).await?;
            info!("schema ready");
        }
        Commands::Seed => {
            let pool = connect().await?;
            db::seed(&pool).await?;
            info!("seed data inserted");
        }
        Commands::Score { date, limit } => {
            let as_of = date.unwrap_or_else(|| Utc::now().date_naive());
            let from = risk::window_start(as_of, window_days);
            let snapshot = load_snapshot(cli.snapshot.as_deref(), from, as_of).await?;
            let analytics = aggregator.aggregate_from(&snapshot, as_of);

            if analytics.center_performance.is_empty() {
                println!("No centers found.");
                return Ok(());
            }

            println!("Centers by health score as of {as_of}:");
            for entry in report::rank_centers(&analytics).iter().take(limit) {
                println!(
                    "- {} health {} ({}, {} risk) efficiency {} compliance {}",
                    entry.center_id,
                    entry.health_score,
                    entry.trend,
                    entry.risk_level,
                    entry.efficiency,
                    entry.compliance
                );
            }
        }
        Commands::Export { date, format, out } => {
            let as_of = date.unwrap_or_else(|| Utc::now().date_naive());
            let from = risk::window_start(as_of, window_days);
            let snapshot = load_snapshot(cli.snapshot.as_deref(), from, as_of).await?;
            let analytics = aggregator.aggregate_from(&snapshot, as_of);

            let rendered = match format {
                ExportFormat::Csv => export::to_tabular(&analytics)?,
                ExportFormat::Json => format!("{}\n", export::to_structured(&analytics)?),
            };
            match out {
                Some(path) => {
                    std::fs::write(&path, rendered)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!("export written to {}", path.display());
                }
                None => print!("{rendered}"),
            }
        }
        Commands::Report { date, out } => {
            let as_of = date.unwrap_or_else(|| Utc::now().date_naive());
            let from = risk::window_start(as_of, window_days);
            let snapshot = load_snapshot(cli.snapshot.as_deref(), from, as_of).await?;
            let analytics = aggregator.aggregate_from(&snapshot, as_of);
            let reports = snapshot.list_reports_between(from, as_of);
            let markdown = report::build_report(&analytics, &reports, as_of);
            std::fs::write(&out, markdown)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
