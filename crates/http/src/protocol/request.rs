//! HTTP request header handling.
//!
//! The first invocation of a request only sees the header, so everything the
//! routing and content-type decisions need is exposed here.

use http::header::CONTENT_TYPE;
use http::request::Parts;
use http::{HeaderMap, Method, Request, Uri};
use mime::Mime;

/// Represents an HTTP request header.
///
/// Wraps a `http::Request<()>`, the body is delivered separately as
/// [`PayloadItem`](crate::protocol::PayloadItem)s.
#[derive(Debug)]
pub struct RequestHeader {
    inner: Request<()>,
}

impl RequestHeader {
    /// Returns a reference to the request's HTTP method.
    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    /// Returns a reference to the request's URI.
    pub fn uri(&self) -> &Uri {
        self.inner.uri()
    }

    /// The path component of the URI, without the query string.
    pub fn path(&self) -> &str {
        self.inner.uri().path()
    }

    /// Returns a reference to the request's headers.
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Parsed `Content-Type` header.
    ///
    /// `None` when the header is absent, not visible ASCII, or not a valid
    /// media type.
    pub fn content_type(&self) -> Option<Mime> {
        self.headers().get(CONTENT_TYPE)?.to_str().ok()?.parse().ok()
    }
}

/// Converts request parts into a `RequestHeader`.
impl From<Parts> for RequestHeader {
    #[inline]
    fn from(parts: Parts) -> Self {
        Self { inner: Request::from_parts(parts, ()) }
    }
}

/// Converts a bodyless request into a `RequestHeader`.
impl From<Request<()>> for RequestHeader {
    #[inline]
    fn from(inner: Request<()>) -> Self {
        Self { inner }
    }
}
