//! FeedTriage Server
//!
//! Feedback intake service with a one-shot `analyze` mode for running the
//! pipeline from the command line.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use feedtriage_classifiers::Analyzer;
use feedtriage_core::HistoryItem;
use feedtriage_server::{create_router, AppState, ConfigOverrides, ServerConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::signal;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "feedtriage-server")]
#[command(about = "Customer feedback analysis and triage service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Listen address
        #[arg(short = 'l', long)]
        listen: Option<String>,

        /// Listen port
        #[arg(short = 'P', long, env = "PORT")]
        port: Option<u16>,

        /// JSON file of feedback items to load at startup
        #[arg(short, long)]
        seed: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Analyze one text and print the analysis as JSON
    Analyze {
        /// Feedback text
        #[arg(short, long)]
        text: String,

        /// JSON array of prior feedback to check for repeats
        #[arg(long)]
        history: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    match Cli::parse().command {
        Command::Serve {
            config,
            listen,
            port,
            seed,
            verbose,
        } => {
            init_tracing(verbose);
            let overrides = ConfigOverrides {
                listen_addr: listen,
                port,
                seed_path: seed,
            };
            serve(ServerConfig::load(&config, &overrides)?).await
        }
        Command::Analyze {
            text,
            history,
            config,
        } => {
            init_tracing(false);
            analyze(&text, history, ServerConfig::load(&config, &ConfigOverrides::default())?)
        }
    }
}

async fn serve(config: ServerConfig) -> Result<()> {
    info!("Starting FeedTriage server");

    let metrics_handle = init_metrics()?;

    let addr: SocketAddr = format!("{}:{}", config.listen_addr, config.port).parse()?;
    let state = AppState::new(config, Some(metrics_handle))?;
    info!("Application state initialized successfully");

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn analyze(text: &str, history: Option<PathBuf>, config: ServerConfig) -> Result<()> {
    let history: Vec<HistoryItem> = match history {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("reading history from {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("parsing history in {}", path.display()))?
        }
        None => Vec::new(),
    };

    let analyzer = Analyzer::with_config(config.analyzer)?;
    let record = analyzer.analyze(text, &history);
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging. Output goes to stderr so `analyze` keeps
/// stdout clean for JSON.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("feedtriage=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("feedtriage=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "feedtriage_submissions_total",
        "Total number of feedback items submitted"
    );
    metrics::describe_counter!(
        "feedtriage_repeat_issues_total",
        "Submissions matching recent feedback"
    );
    metrics::describe_histogram!(
        "feedtriage_analysis_latency_us",
        metrics::Unit::Microseconds,
        "Analysis pipeline latency in microseconds"
    );
    metrics::describe_counter!("feedtriage_errors_total", "Total number of errors by type");

    info!("Metrics exporter initialized");
    Ok(handle)
}
