//! Hosting server for a [`Handler`], with a drain on shutdown.
//!
//! On SIGTERM or Ctrl-C the accept loop stops, open connections finish
//! their requests, then [`Server::serve`] returns. Requests answered during
//! the drain are logged like any other: the access-log line is written
//! before the response goes back to hyper.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::error::Error;
use crate::handler::Handler;
use crate::request::Request;
use crate::writer::{ResponseBuffer, ResponseWriter};

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// ```rust
    /// use accesslog::Server;
    /// let server = Server::bind("0.0.0.0:3000").unwrap();
    /// assert!(Server::bind("nowhere").is_err());
    /// ```
    pub fn bind(addr: &str) -> Result<Self, Error> {
        Ok(Self { addr: addr.parse()? })
    }

    /// Starts accepting connections and running each request through
    /// `handler`.
    ///
    /// Returns only after a full graceful shutdown (SIGTERM or Ctrl-C,
    /// followed by all in-flight requests completing).
    pub async fn serve(self, handler: impl Handler) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;
        serve_with_shutdown(listener, handler, shutdown_signal()).await
    }
}

/// Serves `handler` on an already-bound `listener` until `shutdown`
/// resolves, then drains in-flight connections.
pub async fn serve_with_shutdown<H, F>(
    listener: TcpListener,
    handler: H,
    shutdown: F,
) -> Result<(), Error>
where
    H: Handler,
    F: Future<Output = ()>,
{
    // Shared by every connection task; the handler itself is never cloned.
    let handler = Arc::new(handler);

    info!(addr = %listener.local_addr()?, "accesslog listening");

    let mut tasks = tokio::task::JoinSet::new();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            // Shutdown wins over a non-empty accept queue.
            biased;

            () = &mut shutdown => {
                info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                break;
            }

            res = listener.accept() => {
                let (stream, remote_addr) = match res {
                    Ok(v) => v,
                    Err(e) => {
                        error!("accept error: {e}");
                        continue;
                    }
                };

                let handler = Arc::clone(&handler);
                let io = TokioIo::new(stream);

                tasks.spawn(async move {
                    let svc = service_fn(move |req| {
                        let handler = Arc::clone(&handler);
                        async move { dispatch(handler, req, remote_addr).await }
                    });

                    if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                        .serve_connection(io, svc)
                        .await
                    {
                        error!(peer = %remote_addr, "connection error: {e}");
                    }
                });
            }

            // Reap finished connections.
            Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
        }
    }

    while tasks.join_next().await.is_some() {}

    info!("accesslog stopped");
    Ok(())
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Runs one request through the handler against a fresh [`ResponseBuffer`].
///
/// The error type is [`Infallible`]: a body that fails to arrive is answered
/// with `400` here, so hyper never sees an error.
async fn dispatch<H: Handler>(
    handler: Arc<H>,
    req: hyper::Request<Incoming>,
    remote_addr: SocketAddr,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let (parts, body) = req.into_parts();
    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            debug!(peer = %remote_addr, "request body error: {e}");
            let mut rejected = ResponseBuffer::new();
            rejected.write_status(StatusCode::BAD_REQUEST);
            return Ok(rejected.into_response());
        }
    };

    let req = Request::from_parts(parts, body, remote_addr.to_string());
    let mut writer = ResponseBuffer::new();
    handler.serve(&mut writer, &req).await;

    Ok(writer.into_response())
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// SIGTERM or Ctrl-C, whichever arrives first. Ctrl-C only off Unix.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("cannot listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("cannot listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => info!("interrupt received"),
        () = terminate => info!("SIGTERM received"),
    }
}
