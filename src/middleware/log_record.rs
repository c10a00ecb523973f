//! Per-request accumulator for one Combined Log Format line.

use std::fmt;
use std::io;
use std::time::Duration;

use chrono::{DateTime, Utc};
use http::{HeaderMap, StatusCode};

use super::sink::LogSink;
use crate::writer::ResponseWriter;

/// `strftime` layout of the bracketed timestamp: `10/Oct/2000:13:55:36`.
const TIME_FORMAT: &str = "%d/%b/%Y:%H:%M:%S";

/// Facts about one request/response exchange.
///
/// Stands in for the real response sink while the wrapped handler runs:
/// every status and body write is forwarded to the sink and tallied here.
/// Lives exactly as long as the request that created it.
pub struct LogRecord<'w> {
    inner: &'w mut dyn ResponseWriter,
    client_ip: String,
    method: String,
    uri: String,
    protocol: String,
    referer: String,
    user_agent: String,
    status: StatusCode,
    response_bytes: u64,
    request_time: DateTime<Utc>,
    elapsed: Duration,
}

impl<'w> LogRecord<'w> {
    /// Starts a record with status `200`, zero bytes, and unset timing.
    pub fn new(
        inner: &'w mut dyn ResponseWriter,
        client_ip: impl Into<String>,
        method: impl Into<String>,
        uri: impl Into<String>,
        protocol: impl Into<String>,
        referer: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            inner,
            client_ip: client_ip.into(),
            method: method.into(),
            uri: uri.into(),
            protocol: protocol.into(),
            referer: referer.into(),
            user_agent: user_agent.into(),
            status: StatusCode::OK,
            response_bytes: 0,
            request_time: DateTime::<Utc>::default(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn status(&self) -> StatusCode { self.status }
    pub fn response_bytes(&self) -> u64 { self.response_bytes }

    /// Stamps completion time and handler duration. Called once, after the
    /// wrapped handler has returned.
    pub fn finalize(&mut self, request_time: DateTime<Utc>, elapsed: Duration) {
        self.request_time = request_time;
        self.elapsed = elapsed;
    }

    /// Writes the rendered line, newline included, to `sink` in one call.
    ///
    /// A sink failure costs this line and nothing else.
    pub fn render(&self, sink: &dyn LogSink) {
        let _ = sink.write_line(format!("{self}\n").as_bytes());
    }
}

impl ResponseWriter for LogRecord<'_> {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.inner.headers_mut()
    }

    // Last call wins, whatever the real sink did with it.
    fn write_status(&mut self, status: StatusCode) {
        self.status = status;
        self.inner.write_status(status);
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.response_bytes += written as u64;
        Ok(written)
    }
}

/// The line without its trailing newline.
impl fmt::Display for LogRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - - [{}] \"{} {} {}\" {} {} \"{}\" \"{}\" {:.4}",
            self.client_ip,
            self.request_time.format(TIME_FORMAT),
            self.method,
            self.uri,
            self.protocol,
            self.status.as_u16(),
            self.response_bytes,
            self.referer,
            self.user_agent,
            self.elapsed.as_secs_f64(),
        )
    }
}
