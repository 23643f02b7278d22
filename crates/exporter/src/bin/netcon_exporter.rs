use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use exporter::{
    Collector, Denylist, PgStore, PrometheusSink, Publisher, ScoreMode, SnapshotFetcher,
    collector::DEFAULT_INTERVAL, server, snapshot::DEFAULT_IGNORED_TEAMS,
};
use storage::Database;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "netcon-exporter")]
#[command(about = "Prometheus exporter for NETCON score server metrics", long_about = None)]
#[command(version)]
struct Cli {
    /// Listen address for the metrics server
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:3000")]
    listen_addr: SocketAddr,

    /// Full connection string; overrides the --postgres-* options
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(long, env = "POSTGRES_HOST", default_value = "localhost:5432")]
    postgres_host: String,

    #[arg(long, env = "POSTGRES_USER", default_value = "postgres")]
    postgres_user: String,

    #[arg(long, env = "POSTGRES_PASSWORD", default_value = "postgres")]
    postgres_password: String,

    #[arg(long, env = "POSTGRES_DATABASE", default_value = "development")]
    postgres_database: String,

    #[arg(long, env = "POSTGRES_DISABLE_SSL_MODE")]
    postgres_disable_ssl_mode: bool,

    /// Seconds between the starts of two collection cycles
    #[arg(
        long,
        env = "COLLECT_INTERVAL_SECS",
        default_value_t = DEFAULT_INTERVAL.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    collect_interval_secs: u64,

    /// Comma-separated team names excluded from every metric
    #[arg(long, env = "IGNORED_TEAMS", default_value = DEFAULT_IGNORED_TEAMS)]
    ignored_teams: String,

    #[arg(long, env = "SCORE_MODE", value_enum, default_value_t = ScoreMode::PerProblem)]
    score_mode: ScoreMode,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

impl Cli {
    fn database_url(&self) -> String {
        if let Some(url) = &self.database_url {
            return url.clone();
        }

        let mut dsn = format!(
            "postgres://{}:{}@{}/{}",
            self.postgres_user, self.postgres_password, self.postgres_host, self.postgres_database
        );
        if self.postgres_disable_ssl_mode {
            dsn.push_str("?sslmode=disable");
        }
        dsn
    }
}

fn init_tracing(format: LogFormat, verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("netcon_exporter={0},exporter={0},storage={0}", log_level).into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_format, cli.verbose);

    tracing::info!("Starting NETCON score exporter");

    let database_url = cli.database_url();
    tracing::info!(
        "Connecting to database at: {}",
        database_url.split('@').next_back().unwrap_or("unknown")
    );
    let db = Database::new(&database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    let denylist = Denylist::from_comma_separated(&cli.ignored_teams);
    let sink = Arc::new(PrometheusSink::new().context("Failed to register metrics")?);
    let publisher = Publisher::new(sink.clone(), cli.score_mode);
    tracing::info!(
        ignored_teams = denylist.len(),
        score_mode = ?publisher.mode(),
        "Collector configured"
    );

    let collector = Collector::new(
        SnapshotFetcher::new(Arc::new(PgStore::new(db)), denylist),
        publisher,
        Duration::from_secs(cli.collect_interval_secs),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn({
        let shutdown_tx = shutdown_tx.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Received interrupt, shutting down");
                let _ = shutdown_tx.send(true);
            }
        }
    });

    // whichever side finishes first takes the other one down with it
    let collector_task = tokio::spawn({
        let shutdown_tx = shutdown_tx.clone();
        let shutdown_rx = shutdown_rx.clone();
        async move {
            let result = collector.run(shutdown_rx).await;
            let _ = shutdown_tx.send(true);
            result
        }
    });

    let server_task = tokio::spawn({
        let shutdown_tx = shutdown_tx.clone();
        let listen_addr = cli.listen_addr;
        async move {
            let result = server::serve(listen_addr, sink, shutdown_rx).await;
            let _ = shutdown_tx.send(true);
            result
        }
    });

    let (collected, served) = tokio::join!(collector_task, server_task);
    collected
        .context("Metrics collector task panicked")?
        .context("Failed to run metrics collector")?;
    served
        .context("Metrics server task panicked")?
        .context("Failed to run metrics server")?;

    tracing::info!("Exporter stopped");
    Ok(())
}
