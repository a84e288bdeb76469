use tokio::signal;
use tracing::warn;

async fn ctrl_c() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            warn!("Cannot listen for SIGTERM: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

/// Ctrl+C 或 SIGTERM（容器停止）时返回
pub async fn listen_for_shutdown() {
    tokio::select! {
        _ = ctrl_c() => warn!("Ctrl+C received, shutting down"),
        _ = terminate() => warn!("SIGTERM received, shutting down"),
    }
}
