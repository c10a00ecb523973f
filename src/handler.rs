//! Handler trait and type erasure.
//!
//! # How async handlers borrow their sink
//!
//! A handler writes into a `&mut dyn ResponseWriter` it does not own, and
//! reads a `&Request` it does not own, possibly across `.await` points. The
//! future it returns therefore borrows both, which is why
//! [`Handler::serve`] is tied to one lifetime `'a` shared by `self`, the
//! writer, the request and the returned [`BoxFuture`].
//!
//! ```text
//! |w, req| Box::pin(async move { … })     ← user writes this
//!        ↓ handler_fn(closure)
//! FnHandler(closure)                      ← implements Handler
//!        ↓ Server::serve / LoggingHandler::new
//! handler.serve(&mut writer, &req)        ← one call per request
//! ```
//!
//! Closures only pick up the higher-ranked `for<'a>` signature when the
//! bound sits directly on the function they are passed to, so they go
//! through [`handler_fn`] instead of a blanket impl on `Fn`.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::writer::ResponseWriter;

/// A heap-allocated, type-erased handler future borrowing for `'a`.
///
/// `Pin<Box<…>>` is required because the async runtime must be able to poll
/// the future in-place. `Send` lets tokio move it across worker threads.
pub type BoxFuture<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// Anything that can process a request by writing into a response sink.
///
/// Shared by every concurrent request, hence `Send + Sync + 'static`.
pub trait Handler: Send + Sync + 'static {
    fn serve<'a>(&'a self, w: &'a mut dyn ResponseWriter, req: &'a Request) -> BoxFuture<'a>;
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn serve<'a>(&'a self, w: &'a mut dyn ResponseWriter, req: &'a Request) -> BoxFuture<'a> {
        (**self).serve(w, req)
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn serve<'a>(&'a self, w: &'a mut dyn ResponseWriter, req: &'a Request) -> BoxFuture<'a> {
        (**self).serve(w, req)
    }
}

// ── Closure adapter ───────────────────────────────────────────────────────────

/// Turns a closure into a [`Handler`].
///
/// ```rust
/// use accesslog::{handler_fn, Handler};
/// use http::StatusCode;
///
/// let not_found = handler_fn(|w, _req| Box::pin(async move {
///     w.write_status(StatusCode::NOT_FOUND);
/// }));
/// # fn assert_handler(_: impl Handler) {}
/// # assert_handler(not_found);
/// ```
pub fn handler_fn<F>(f: F) -> FnHandler<F>
where
    F: for<'a> Fn(&'a mut dyn ResponseWriter, &'a Request) -> BoxFuture<'a> + Send + Sync + 'static,
{
    FnHandler(f)
}

/// Newtype returned by [`handler_fn`].
pub struct FnHandler<F>(F);

impl<F> Handler for FnHandler<F>
where
    F: for<'a> Fn(&'a mut dyn ResponseWriter, &'a Request) -> BoxFuture<'a> + Send + Sync + 'static,
{
    fn serve<'a>(&'a self, w: &'a mut dyn ResponseWriter, req: &'a Request) -> BoxFuture<'a> {
        (self.0)(w, req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::ResponseBuffer;
    use bytes::Bytes;
    use http::StatusCode;

    fn request(uri: &str) -> Request {
        let (parts, ()) = http::Request::builder().uri(uri).body(()).unwrap().into_parts();
        Request::from_parts(parts, Bytes::new(), "127.0.0.1:1")
    }

    #[tokio::test]
    async fn closure_handler_writes_through_the_sink() {
        let echo = handler_fn(|w, req| Box::pin(async move {
            w.write_status(StatusCode::ACCEPTED);
            let _ = w.write(req.uri().as_bytes());
        }));

        let mut buf = ResponseBuffer::new();
        echo.serve(&mut buf, &request("/echo")).await;

        assert_eq!(buf.status(), StatusCode::ACCEPTED);
        assert_eq!(buf.body(), b"/echo");
    }

    #[tokio::test]
    async fn shared_and_boxed_handlers_delegate() {
        let hello = Arc::new(handler_fn(|w, _| Box::pin(async move {
            let _ = w.write(b"hi");
        })));
        let boxed: Box<dyn Handler> = Box::new(Arc::clone(&hello));

        let mut buf = ResponseBuffer::new();
        boxed.serve(&mut buf, &request("/")).await;
        hello.serve(&mut buf, &request("/")).await;

        assert_eq!(buf.body(), b"hihi");
    }
}
