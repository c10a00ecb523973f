//! The access-logging decorator.

use std::time::Duration;

use chrono::{DateTime, Utc};

use super::log_record::LogRecord;
use super::sink::LogSink;
use crate::handler::{BoxFuture, Handler};
use crate::request::Request;
use crate::writer::ResponseWriter;

/// Wraps a [`Handler`] and writes one Combined Log Format line per request
/// to a [`LogSink`].
///
/// The wrapped handler sees a [`LogRecord`] in place of the real response
/// sink; every write still reaches the client unchanged. The line is emitted
/// after the handler returns, so the timestamp marks completion and the
/// trailing field measures the handler alone.
///
/// ```rust,no_run
/// use accesslog::{handler_fn, LoggingHandler, Server};
///
/// # async fn run() -> Result<(), accesslog::Error> {
/// let hello = handler_fn(|w, _req| Box::pin(async move {
///     let _ = w.write(b"hello world");
/// }));
///
/// Server::bind("0.0.0.0:8000")?
///     .serve(LoggingHandler::new(hello, std::io::stdout()))
///     .await
/// # }
/// ```
pub struct LoggingHandler<H, S> {
    inner: H,
    sink: S,
}

impl<H: Handler, S: LogSink> LoggingHandler<H, S> {
    pub fn new(inner: H, sink: S) -> Self {
        Self { inner, sink }
    }
}

impl<H: Handler, S: LogSink> Handler for LoggingHandler<H, S> {
    fn serve<'a>(&'a self, w: &'a mut dyn ResponseWriter, req: &'a Request) -> BoxFuture<'a> {
        Box::pin(async move {
            let mut record = LogRecord::new(
                w,
                client_ip(req.remote_addr()),
                req.method(),
                req.uri(),
                req.protocol(),
                or_dash(req.referer().as_deref()),
                or_dash(req.user_agent().as_deref()),
            );

            let start = Utc::now();
            self.inner.serve(&mut record, req).await;
            let finish = Utc::now();

            record.finalize(finish, elapsed_between(start, finish));
            record.render(&self.sink);
        })
    }
}

/// Drops a trailing `:port`, cutting at the last colon. Addresses without a
/// colon pass through untouched.
fn client_ip(remote_addr: &str) -> &str {
    match remote_addr.rfind(':') {
        Some(colon) => &remote_addr[..colon],
        None => remote_addr,
    }
}

/// Wall-clock span of the handler call. A clock stepped backwards while the
/// handler ran yields zero.
fn elapsed_between(start: DateTime<Utc>, finish: DateTime<Utc>) -> Duration {
    (finish - start).to_std().unwrap_or(Duration::ZERO)
}

fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}
