//! Minimal accesslog demo: one slow handler, every request logged to stdout.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example hello
//!
//! Try:
//!   curl http://localhost:8000/
//!   curl -A demo-agent -e http://example.com/ http://localhost:8000/anything?q=1
//!
//! Bind elsewhere with `ACCESSLOG_ADDR=127.0.0.1:9000`.

use std::time::Duration;

use accesslog::{LoggingHandler, Server, handler_fn};
use http::HeaderValue;
use http::header::CONTENT_TYPE;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let addr = std::env::var("ACCESSLOG_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_owned());

    let hello = handler_fn(|w, _req| Box::pin(async move {
        w.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
        let _ = w.write(b"hello world");
        // Long enough to show up in the elapsed column.
        tokio::time::sleep(Duration::from_millis(500)).await;
    }));

    Server::bind(&addr)
        .expect("invalid ACCESSLOG_ADDR")
        .serve(LoggingHandler::new(hello, std::io::stdout()))
        .await
        .expect("server error");
}
