//! OS signal handling.
//!
//! # Responsibilities
//! - Register signal handlers (SIGTERM, SIGINT)
//! - Translate signals to the internal shutdown event
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - First signal triggers graceful shutdown; the process exits once the
//!   web listener has drained

use crate::lifecycle::shutdown::Shutdown;

/// Wait for SIGINT or SIGTERM and trigger graceful shutdown.
pub async fn listen(shutdown: Shutdown) {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        let mut terminate =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => {}
            _ = terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
    }

    tracing::info!("shutdown signal received");
    shutdown.trigger();
}
