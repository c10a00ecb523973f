//! Incoming HTTP request type.

use std::borrow::Cow;

use bytes::Bytes;
use http::header::{AsHeaderName, REFERER, USER_AGENT};
use http::request::Parts;
use http::{HeaderMap, Method, Uri, Version};

/// An incoming HTTP request with its body fully read and the peer address
/// of the connection it arrived on.
pub struct Request {
    method: Method,
    uri: String,
    version: Version,
    headers: HeaderMap,
    body: Bytes,
    remote_addr: String,
}

impl Request {
    /// Builds a request from the head hyper parsed, the collected body and
    /// the peer address (`ip:port`, as printed by `SocketAddr`).
    pub fn from_parts(parts: Parts, body: Bytes, remote_addr: impl Into<String>) -> Self {
        Self {
            method: parts.method,
            uri: request_target(&parts.uri, parts.version),
            version: parts.version,
            headers: parts.headers,
            body,
            remote_addr: remote_addr.into(),
        }
    }

    pub fn method(&self) -> &str { self.method.as_str() }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// The request-target as the client sent it: path plus query for
    /// origin-form requests and for HTTP/2 and HTTP/3 (the `:path`
    /// pseudo-header), the full URI for absolute-form HTTP/1 requests.
    pub fn uri(&self) -> &str { &self.uri }

    /// Peer address of the connection, port included.
    pub fn remote_addr(&self) -> &str { &self.remote_addr }

    /// Protocol version as it appears in the request line, e.g. `HTTP/1.1`.
    pub fn protocol(&self) -> &'static str {
        match self.version {
            Version::HTTP_09 => "HTTP/0.9",
            Version::HTTP_10 => "HTTP/1.0",
            Version::HTTP_11 => "HTTP/1.1",
            Version::HTTP_2  => "HTTP/2.0",
            Version::HTTP_3  => "HTTP/3.0",
            _                => "HTTP/?",
        }
    }

    /// Case-insensitive header lookup. Values that are not visible ASCII
    /// are reported as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Raw `Referer` value. Bytes that are not UTF-8 come back as U+FFFD.
    pub fn referer(&self) -> Option<Cow<'_, str>> {
        self.header_text(REFERER)
    }

    /// Raw `User-Agent` value. Bytes that are not UTF-8 come back as U+FFFD.
    pub fn user_agent(&self) -> Option<Cow<'_, str>> {
        self.header_text(USER_AGENT)
    }

    fn header_text(&self, name: impl AsHeaderName) -> Option<Cow<'_, str>> {
        self.headers.get(name).map(|v| String::from_utf8_lossy(v.as_bytes()))
    }
}

/// hyper rebuilds an HTTP/2 or HTTP/3 request URI from the `:scheme` and
/// `:authority` pseudo-headers; only `:path` is what the client asked for.
fn request_target(uri: &Uri, version: Version) -> String {
    match version {
        Version::HTTP_2 | Version::HTTP_3 => uri
            .path_and_query()
            .map_or_else(|| uri.to_string(), |pq| pq.as_str().to_owned()),
        _ => uri.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(builder: http::request::Builder) -> Request {
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        Request::from_parts(parts, Bytes::new(), "10.0.0.1:4000")
    }

    #[test]
    fn exposes_request_line_fields() {
        let req = request(
            http::Request::builder()
                .method("POST")
                .uri("/search?q=rust")
                .version(Version::HTTP_10),
        );

        assert_eq!(req.method(), "POST");
        assert_eq!(req.uri(), "/search?q=rust");
        assert_eq!(req.protocol(), "HTTP/1.0");
        assert_eq!(req.remote_addr(), "10.0.0.1:4000");
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = request(
            http::Request::builder()
                .uri("/")
                .header("User-Agent", "curl/8.5.0")
                .header("referer", "https://example.com/"),
        );

        assert_eq!(req.header("user-agent"), Some("curl/8.5.0"));
        assert_eq!(req.user_agent().as_deref(), Some("curl/8.5.0"));
        assert_eq!(req.referer().as_deref(), Some("https://example.com/"));
        assert_eq!(req.header("x-missing"), None);
    }

    #[test]
    fn utf8_header_values_are_kept() {
        let ua = http::HeaderValue::from_bytes("Mozilla/5.0 (Café)".as_bytes()).unwrap();
        let referer = http::HeaderValue::from_bytes("https://例え.jp/".as_bytes()).unwrap();
        let req = request(
            http::Request::builder()
                .uri("/")
                .header(USER_AGENT, ua)
                .header(REFERER, referer),
        );

        assert_eq!(req.user_agent().as_deref(), Some("Mozilla/5.0 (Café)"));
        assert_eq!(req.referer().as_deref(), Some("https://例え.jp/"));
        assert_eq!(req.header("user-agent"), None);
    }

    #[test]
    fn non_utf8_header_bytes_are_replaced_not_dropped() {
        let value = http::HeaderValue::from_bytes(b"caf\xe9").unwrap();
        let req = request(http::Request::builder().uri("/").header(USER_AGENT, value));

        assert_eq!(req.user_agent().as_deref(), Some("caf\u{fffd}"));
    }

    #[test]
    fn http2_target_is_the_path_not_the_rebuilt_url() {
        let req = request(
            http::Request::builder()
                .uri("http://localhost:8000/hello?x=1")
                .version(Version::HTTP_2),
        );

        assert_eq!(req.uri(), "/hello?x=1");
        assert_eq!(req.protocol(), "HTTP/2.0");
    }

    #[test]
    fn http1_absolute_form_target_is_kept_whole() {
        let req = request(
            http::Request::builder()
                .uri("http://proxy.example/hello?x=1")
                .version(Version::HTTP_11),
        );

        assert_eq!(req.uri(), "http://proxy.example/hello?x=1");
    }
}
