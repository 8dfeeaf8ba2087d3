use std::fmt::Display;
use std::pin::pin;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use http::{Response, StatusCode};
use tracing::{debug, error, warn};

use crate::handler::{Begin, Handler, Step};
use crate::protocol::{build_error_response, Message, PayloadItem, RequestHeader, ResponseBody, Termination};

/// The call sequence of one request against a [`Handler`].
///
/// Holds the request's state between invocations and runs the completion
/// hook when dropped, so the hook fires exactly once on every path: a normal
/// response, an up-front rejection, a body read error, or the engine dropping
/// the request future because the client went away.
pub struct RequestCall<'h, H: Handler> {
    handler: &'h H,
    state: Option<H::State>,
    termination: Termination,
}

impl<'h, H: Handler> RequestCall<'h, H> {
    pub fn new(handler: &'h H) -> Self {
        // anything that ends the call before a response is an abort
        Self { handler, state: None, termination: Termination::ClientAbort }
    }

    /// Runs the whole sequence: the header, every non-empty body chunk from
    /// `payload` in order, then `Eof` once the stream is exhausted.
    ///
    /// Stops reading as soon as the handler responds.
    pub async fn run<S, E>(mut self, header: RequestHeader, payload: S) -> Response<ResponseBody>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Display,
    {
        if let Some(response) = self.invoke(Message::Header(header)).await {
            return response;
        }

        let mut payload = pin!(payload);
        loop {
            let item = match payload.next().await {
                Some(Ok(bytes)) => match PayloadItem::chunk(bytes) {
                    Some(item) => item,
                    None => continue,
                },
                Some(Err(e)) => {
                    warn!(cause = %e, "failed to read request body");
                    self.termination = Termination::ReadError;
                    return build_error_response(StatusCode::BAD_REQUEST);
                }
                None => PayloadItem::Eof,
            };

            let is_eof = item.is_eof();
            if let Some(response) = self.invoke(Message::Payload(item)).await {
                return response;
            }

            if is_eof {
                error!("handler produced no response for a complete body");
                self.termination = Termination::Completed;
                return build_error_response(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }

    /// Delivers a single invocation, returning the response if this one
    /// produced it.
    ///
    /// A header after the state was established, or a payload item before,
    /// breaks the ordering contract and is ignored.
    pub async fn invoke(&mut self, message: Message<RequestHeader>) -> Option<Response<ResponseBody>> {
        match message {
            Message::Header(header) => {
                if self.state.is_some() {
                    warn!("duplicate header invocation ignored");
                    return None;
                }

                match self.handler.begin(&header) {
                    Begin::Accept(state) => {
                        self.state = Some(state);
                        None
                    }
                    Begin::Respond(response) => {
                        self.termination = Termination::Rejected;
                        Some(response)
                    }
                }
            }

            Message::Payload(item) => {
                let Some(state) = self.state.as_mut() else {
                    warn!("payload invocation without accepted header ignored");
                    return None;
                };

                match self.handler.advance(state, item).await {
                    Step::Pending => None,
                    Step::Respond(response) => {
                        self.termination = Termination::Completed;
                        Some(response)
                    }
                }
            }
        }
    }

    /// Termination reported to the completion hook if the call ended now.
    pub fn termination(&self) -> Termination {
        self.termination
    }
}

impl<H: Handler> Drop for RequestCall<'_, H> {
    fn drop(&mut self) {
        debug!(termination = %self.termination, "request call finished");
        self.handler.complete(self.state.take(), self.termination);
    }
}

impl<H: Handler> std::fmt::Debug for RequestCall<'_, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestCall")
            .field("has_state", &self.state.is_some())
            .field("termination", &self.termination)
            .finish_non_exhaustive()
    }
}
