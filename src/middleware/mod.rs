//! Middleware layer.
//!
//! Middleware wraps a [`Handler`](crate::Handler) and is itself a handler,
//! so layers stack. The one shipped here is access logging in Apache
//! Combined Log Format with the handler's wall-clock time appended:
//!
//! ```text
//! 127.0.0.1 - - [10/Oct/2000:13:55:36] "GET /apache_pb.gif HTTP/1.0" 200 2326 "http://www.example.com/start.html" "Mozilla/4.08" 0.0021
//! ```

mod log_record;
mod logging;
mod sink;

pub use log_record::LogRecord;
pub use logging::LoggingHandler;
pub use sink::LogSink;
