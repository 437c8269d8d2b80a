//! Delete Monitor Server Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use delete_monitor::cli::{serve::ServeArgs, Cli, Commands};
use delete_monitor::config::{DatabaseConfig, RelayConfig};
use delete_monitor::db::{self, deletion_events::DeletionEventStorage};
use delete_monitor::relay::{
    metrics::RelayMetrics, orchestrator::RelayOrchestrator, worker::RelayWorker,
};
use delete_monitor::{logging, server, AppState};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Failed to initialize logging: {:#}", e);
        std::process::exit(1);
    }

    let args = match cli.command {
        Some(Commands::Serve(args)) => args,
        None => ServeArgs::from_env(),
    };

    if let Err(e) = run_server(args).await {
        error!("Server error: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server(args: ServeArgs) -> Result<()> {
    info!("Delete monitor v{} starting", env!("CARGO_PKG_VERSION"));

    let db_config = DatabaseConfig::from_env();
    let relay_config = RelayConfig::from_env();

    let pool = db::create_pool(&db_config);
    let storage = DeletionEventStorage::new(pool.clone());

    let relay_metrics = RelayMetrics::new().context("Failed to register relay metrics")?;
    let orchestrator = RelayOrchestrator::new(&relay_config, relay_metrics.clone())
        .context("Failed to build relay HTTP client")?;
    let (relay_queue, relay_worker) =
        RelayWorker::spawn(orchestrator, &relay_config, relay_metrics.clone());

    let state = AppState {
        deletion_events: Arc::new(storage),
        relay_queue,
        relay_metrics,
    };

    let bind_addr = args.bind_addr();
    let served = server::run(state, &bind_addr)
        .await
        .with_context(|| format!("Server on {} failed", bind_addr));

    // ルーターと一緒にキューの送信側が解放されたので、実行中の中継を待つ
    if !relay_worker.drain(relay_config.drain_timeout).await {
        warn!("Some relay jobs were abandoned during shutdown");
    }
    db::close_pool(&pool).await;

    served?;
    Ok(())
}
