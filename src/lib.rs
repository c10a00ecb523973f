//! # accesslog
//!
//! Apache Combined Log Format access logging for HTTP handlers, with the
//! handler's wall-clock time appended to every line.
//!
//! ## The contract
//!
//! Wrap a handler in [`LoggingHandler`] and it behaves exactly as before:
//! same status, same bytes, same headers. On the side, one line per request
//! lands in a [`LogSink`] once the handler returns:
//!
//! ```text
//! 198.51.100.7 - - [16/Oct/2026:09:14:02] "GET /hello HTTP/1.1" 200 11 "-" "curl/8.5.0" 0.5012
//! ```
//!
//! Client address (port stripped), completion time in UTC, request line,
//! status, body bytes, referer, user agent, seconds spent in the handler.
//! Rotation, formats, levels, and shipping belong to whatever sits behind
//! the sink.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use accesslog::{handler_fn, LoggingHandler, Server};
//! use http::StatusCode;
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = handler_fn(|w, req| Box::pin(async move {
//!         if req.uri() != "/hello" {
//!             w.write_status(StatusCode::NOT_FOUND);
//!             return;
//!         }
//!         let _ = w.write(b"hello world");
//!     }));
//!
//!     Server::bind("0.0.0.0:8000")
//!         .unwrap()
//!         .serve(LoggingHandler::new(app, std::io::stdout()))
//!         .await
//!         .unwrap();
//! }
//! ```

mod error;
mod handler;
mod request;
mod server;
mod writer;

pub mod middleware;

pub use error::Error;
pub use handler::{BoxFuture, FnHandler, Handler, handler_fn};
pub use middleware::{LogRecord, LogSink, LoggingHandler};
pub use request::Request;
pub use server::{Server, serve_with_shutdown};
pub use writer::{ResponseBuffer, ResponseWriter};
