//! axumサーバー起動・シャットダウンハンドリング

use crate::AppState;
use std::future::Future;
use tracing::info;

/// axumサーバーを起動し、Ctrl+C / SIGTERM を待機する
///
/// 戻った時点でルーターが保持していた`AppState`のクローンはすべて解放されている。
pub async fn run(state: AppState, bind_addr: &str) -> std::io::Result<()> {
    run_until(state, bind_addr, shutdown_signal()).await
}

/// `signal`が完了するまでaxumサーバーを動かす
pub async fn run_until<F>(state: AppState, bind_addr: &str, signal: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = crate::api::create_app(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;

    info!("Delete monitor server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// シャットダウンシグナルを待機
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
