//! The contract between the engine and request handling code.
//!
//! A request is handled through several calls instead of one: [`Handler::begin`]
//! with only the header available, then [`Handler::advance`] once per body
//! chunk and once more with [`PayloadItem::Eof`], and finally
//! [`Handler::complete`] which always runs, whether a response was produced,
//! the request was rejected up front, or the client disappeared mid-body.

use std::future::Future;

use http::Response;

use crate::protocol::{PayloadItem, RequestHeader, ResponseBody, Termination};

/// Outcome of the first, header-only invocation.
#[derive(Debug)]
pub enum Begin<S> {
    /// Keep `S` as the request's state and deliver the body to it.
    Accept(S),
    /// Answer immediately. No body is read and no state is kept.
    Respond(Response<ResponseBody>),
}

/// Outcome of a body invocation.
#[derive(Debug)]
pub enum Step {
    /// More data expected, no response yet.
    Pending,
    /// The terminal response of the request.
    Respond(Response<ResponseBody>),
}

pub trait Handler: Send + Sync {
    /// Per-request state, owned by a single request's call sequence.
    type State: Send;

    /// First invocation. Only the header is available.
    fn begin(&self, header: &RequestHeader) -> Begin<Self::State>;

    /// Every later invocation, strictly in delivery order. The last item is
    /// always [`PayloadItem::Eof`] unless a response was produced earlier.
    fn advance(&self, state: &mut Self::State, item: PayloadItem) -> impl Future<Output = Step> + Send;

    /// Completion hook, called exactly once per request.
    ///
    /// `state` is `None` when [`begin`](Handler::begin) answered directly.
    fn complete(&self, state: Option<Self::State>, termination: Termination);
}
