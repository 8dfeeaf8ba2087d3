//! The chunked invocation protocol on top of an HTTP/1.1 engine
//!
//! Request handling code in this workspace does not receive a finished
//! request. It is called several times over the lifetime of each request,
//! mirroring how the bytes arrive on the wire:
//!
//! 1. once with the header only ([`handler::Handler::begin`]), which may answer
//!    immediately without reading any body byte
//! 2. once per body chunk ([`handler::Handler::advance`] with
//!    [`protocol::PayloadItem::Chunk`])
//! 3. once with [`protocol::PayloadItem::Eof`] when the body is complete
//! 4. always, exactly once, the completion hook ([`handler::Handler::complete`])
//!
//! Parsing and writing HTTP/1.1 is delegated to hyper, this crate only owns the
//! translation and the lifecycle guarantees around per-request state.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use http::{Response, StatusCode};
//! use reachard_http::connection::HttpConnection;
//! use reachard_http::handler::{Begin, Handler, Step};
//! use reachard_http::protocol::{PayloadItem, RequestHeader, ResponseBody, Termination};
//! use tokio::net::TcpListener;
//!
//! struct Length;
//!
//! impl Handler for Length {
//!     type State = usize;
//!
//!     fn begin(&self, _header: &RequestHeader) -> Begin<usize> {
//!         Begin::Accept(0)
//!     }
//!
//!     async fn advance(&self, length: &mut usize, item: PayloadItem) -> Step {
//!         match item {
//!             PayloadItem::Chunk(bytes) => {
//!                 *length += bytes.len();
//!                 Step::Pending
//!             }
//!             PayloadItem::Eof => Step::Respond(Response::new(ResponseBody::from(length.to_string()))),
//!         }
//!     }
//!
//!     fn complete(&self, _length: Option<usize>, _termination: Termination) {}
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await.unwrap();
//!     let handler = Arc::new(Length);
//!
//!     loop {
//!         let (stream, _) = listener.accept().await.unwrap();
//!         let handler = Arc::clone(&handler);
//!         tokio::spawn(HttpConnection::new(stream).process(handler));
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! - [`protocol`]: message, header, termination and error types
//! - [`handler`]: the [`handler::Handler`] trait
//! - [`connection`]: [`connection::HttpConnection`] and [`connection::RequestCall`]

pub mod connection;
pub mod handler;
pub mod protocol;
