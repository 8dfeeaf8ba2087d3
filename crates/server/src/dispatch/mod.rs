//! Request dispatching.
//!
//! [`Dispatcher`] is the [`Handler`] the server hands to every connection. The
//! header alone decides routing and the media type check; the body is then
//! collected into a [`ConnectionState`] and the operation runs once on EOF.

mod accumulator;
mod router;
mod state;

pub use accumulator::BodyAccumulator;
pub use router::{MethodRoute, Route, RoutingTable, RoutingTableBuilder, delete, get, post};
pub use state::{ConnectionState, Phase};

use std::sync::Arc;

use http::StatusCode;
use reachard_http::handler::{Begin, Handler, Step};
use reachard_http::protocol::{PayloadItem, RequestHeader, Termination};
use tracing::{debug, info, warn};

use crate::response::plain;
use crate::storage::TargetStore;
use crate::targets::{Operation, TargetsService};

/// The only routed path.
pub const TARGETS_PATH: &str = "/targets/";

#[derive(Debug)]
pub struct Dispatcher {
    routes: RoutingTable<Operation>,
    targets: TargetsService,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn TargetStore>) -> Self {
        let routes = RoutingTable::builder()
            .route(TARGETS_PATH, get(Operation::List))
            .route(TARGETS_PATH, post(Operation::Create))
            .route(TARGETS_PATH, delete(Operation::Delete))
            .build();

        Self { routes, targets: TargetsService::new(store) }
    }
}

fn is_json(header: &RequestHeader) -> bool {
    header.content_type().is_some_and(|media| media.essence_str() == mime::APPLICATION_JSON.essence_str())
}

impl Handler for Dispatcher {
    type State = ConnectionState;

    fn begin(&self, header: &RequestHeader) -> Begin<ConnectionState> {
        let operation = match self.routes.at(header.path(), header.method()) {
            Route::Matched(operation) => operation,
            Route::UnknownPath => {
                warn!(path = header.path(), "rejected, unknown path");
                return Begin::Respond(plain(StatusCode::BAD_REQUEST, "url not allowed"));
            }
            Route::UnknownMethod => {
                warn!(method = %header.method(), path = header.path(), "rejected, unknown method");
                return Begin::Respond(plain(StatusCode::BAD_REQUEST, "method not allowed"));
            }
        };

        if operation.requires_json() && !is_json(header) {
            warn!(?operation, content_type = ?header.headers().get(http::header::CONTENT_TYPE), "rejected, not a JSON body");
            return Begin::Respond(plain(StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported media type"));
        }

        debug!(?operation, "request routed");
        Begin::Accept(ConnectionState::new(operation))
    }

    async fn advance(&self, state: &mut ConnectionState, item: PayloadItem) -> Step {
        if !state.advance(item) {
            return Step::Pending;
        }

        let response = self.targets.call(state.operation(), state.body().as_bytes()).await;
        state.finish();

        info!(operation = ?state.operation(), status = response.status().as_u16(), "request handled");
        Step::Respond(response)
    }

    fn complete(&self, state: Option<ConnectionState>, termination: Termination) {
        if termination.is_handled() {
            debug!(%termination, "request finished");
            return;
        }

        match state {
            Some(state) => warn!(
                operation = ?state.operation(),
                phase = ?state.phase(),
                received = state.body().len(),
                %termination,
                "request ended without a response"
            ),
            None => warn!(%termination, "request ended before it was routed"),
        }
    }
}
