//! axumサーバー起動・シャットダウンハンドリング

use crate::common::config::MonitorConfig;
use crate::common::error::{MonitorError, MonitorResult};
use crate::probe::ProbeEngine;
use crate::registry_service::RegistryService;
use crate::store::JsonFileStore;
use crate::AppState;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// 設定からアプリケーション状態を構築する
///
/// 保存済みドキュメントが破損している場合は起動しない。
pub async fn build_state(config: &MonitorConfig) -> MonitorResult<AppState> {
    let store = JsonFileStore::new(&config.data_file);
    let probe = ProbeEngine::new(Duration::from_secs(config.probe_timeout_secs))?;
    let registry = RegistryService::new(Arc::new(store), probe);

    let services = registry.ensure_readable().await?;
    info!(
        data_file = %config.data_file.display(),
        services,
        "Service registry loaded"
    );

    Ok(AppState {
        registry,
        static_dir: config.static_dir.clone(),
    })
}

/// axumサーバーを起動し、シャットダウンシグナルを待機する
pub async fn run(state: AppState, bind_addr: &str) -> MonitorResult<()> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| MonitorError::Internal(format!("Failed to bind to {}: {}", bind_addr, e)))?;

    info!("svcwatch server listening on {}", bind_addr);

    serve(listener, state, shutdown_signal()).await?;

    info!("Server shutdown complete");
    Ok(())
}

/// バインド済みのリスナーでサーバーを実行する
///
/// `shutdown` が完了すると処理中のリクエストを待ってから終了する。
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> MonitorResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = crate::api::create_app(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| MonitorError::Internal(format!("Server error: {}", e)))
}

/// シャットダウンシグナルを待機
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
