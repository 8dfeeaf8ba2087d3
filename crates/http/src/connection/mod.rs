//! Drives the invocation protocol for live connections.
//!
//! - [`HttpConnection`]: serves one accepted stream with HTTP/1.1 keep-alive,
//!   translating every request into the [`Handler`](crate::handler::Handler)
//!   call sequence
//! - [`RequestCall`]: the call sequence of a single request, usable without a
//!   socket

mod http_connection;
mod request_call;

pub use http_connection::HttpConnection;
pub use request_call::RequestCall;
