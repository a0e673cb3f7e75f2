//! Graceful shutdown with a drain deadline

use std::future::{Future, IntoFuture};
use std::io;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};

/// How the server stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    /// Every in-flight request finished before the deadline
    Drained,
    /// The deadline passed with requests still open
    TimedOut,
}

/// Serve `app` until `signal` resolves, then give in-flight requests up to
/// `drain_timeout` to finish
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve_with_shutdown(
    listener: TcpListener,
    app: Router,
    signal: impl Future<Output = ()> + Send + 'static,
    drain_timeout: Duration,
) -> io::Result<Shutdown> {
    let (signalled_tx, signalled_rx) = oneshot::channel();

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            signal.await;
            let _ = signalled_tx.send(());
        })
        .into_future();

    let deadline = async move {
        if signalled_rx.await.is_err() {
            std::future::pending::<()>().await;
        }
        info!(timeout = ?drain_timeout, "⏳ Waiting for in-flight requests");
        tokio::time::sleep(drain_timeout).await;
    };

    tokio::select! {
        result = server => result.map(|()| Shutdown::Drained),
        () = deadline => {
            warn!(timeout = ?drain_timeout, "Shutdown deadline reached, dropping open connections");
            Ok(Shutdown::TimedOut)
        }
    }
}
