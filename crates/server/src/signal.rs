use tokio::signal;
use tracing::{info, warn};

/// Resolves on `SIGINT` or, on unix, `SIGTERM`.
///
/// If a handler can not be installed the corresponding signal is never
/// observed, the other one still is.
pub async fn shutdown() {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(cause = %e, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(cause = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => info!("received SIGINT"),
        () = terminate => info!("received SIGTERM"),
    }
}
