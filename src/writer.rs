//! The response sink a handler writes to, and the buffer that backs it.
//!
//! Handlers never build a response value. They receive a
//! `&mut dyn ResponseWriter` and push a status and body bytes into it:
//!
//! ```text
//! handler.serve(&mut writer, &req)
//!        ↓ writer.write_status(StatusCode::CREATED)   ← optional
//!        ↓ writer.write(b"...")                       ← zero or more times
//! ResponseBuffer::into_response()                     ← server turns it into hyper's type
//! ```
//!
//! Because the sink is a trait object, a wrapper that implements the same
//! trait can stand in for the real one and observe every call on its way
//! through. That is how access logging works.

use std::io;

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use http_body_util::Full;
use tracing::warn;

// ── ResponseWriter ────────────────────────────────────────────────────────────

/// Capability set of a response sink.
///
/// `Send` is a supertrait so `&mut dyn ResponseWriter` can be held across
/// `.await` points inside a handler future that tokio moves between threads.
pub trait ResponseWriter: Send {
    /// Headers sent with the response. Changes after the first body write
    /// have no effect on the wire.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Sets the response status. Only the first call before any body byte
    /// reaches the wire; later calls are the caller's mistake.
    fn write_status(&mut self, status: StatusCode);

    /// Appends body bytes, returning how many were accepted. A write without
    /// a prior status commits `200 OK`.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
}

// ── ResponseBuffer ────────────────────────────────────────────────────────────

/// The real sink behind every request the [`Server`](crate::Server) runs.
///
/// Collects the whole response in memory and hands it to hyper once the
/// handler returns. The status is committed by the first `write_status` or
/// the first `write`, whichever comes first, just like on a streaming wire.
#[derive(Debug, Default)]
pub struct ResponseBuffer {
    headers: HeaderMap,
    status: Option<StatusCode>,
    body: Vec<u8>,
}

impl ResponseBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The committed status, `200 OK` if the handler never set one.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_response(self) -> http::Response<Full<Bytes>> {
        let status = self.status();
        let mut response = http::Response::new(Full::new(Bytes::from(self.body)));
        *response.status_mut() = status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl ResponseWriter for ResponseBuffer {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_status(&mut self, status: StatusCode) {
        match self.status {
            Some(committed) => warn!(
                committed = committed.as_u16(),
                ignored = status.as_u16(),
                "superfluous status write",
            ),
            None => self.status = Some(status),
        }
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.status.get_or_insert(StatusCode::OK);
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }
}
