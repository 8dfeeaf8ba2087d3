use reachard_http::protocol::PayloadItem;
use tracing::{debug, warn};

use super::accumulator::BodyAccumulator;
use crate::targets::Operation;

/// Where a request is in its call sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Routed, no body byte kept yet.
    Routed,
    /// At least one body chunk was kept.
    Accumulating,
    /// The body is complete and the operation is running.
    Dispatched,
    /// The response was produced.
    Complete,
}

/// Per-request state, created when the header routes to an operation and
/// dropped by the completion hook.
#[derive(Debug)]
pub struct ConnectionState {
    operation: Operation,
    phase: Phase,
    body: BodyAccumulator,
}

impl ConnectionState {
    pub fn new(operation: Operation) -> Self {
        Self { operation, phase: Phase::Routed, body: BodyAccumulator::new() }
    }

    /// Feeds one body invocation into the state.
    ///
    /// Returns `true` exactly once, on the end of the body, when the operation
    /// should run. Anything delivered after that is ignored.
    pub fn advance(&mut self, item: PayloadItem) -> bool {
        match (self.phase, item) {
            (Phase::Routed | Phase::Accumulating, PayloadItem::Chunk(bytes)) => {
                if self.operation.requires_json() {
                    self.body.append(&bytes);
                    self.phase = Phase::Accumulating;
                } else {
                    debug!(len = bytes.len(), operation = ?self.operation, "discarding body bytes");
                }
                false
            }
            (Phase::Routed | Phase::Accumulating, PayloadItem::Eof) => {
                self.phase = Phase::Dispatched;
                true
            }
            (phase, item) => {
                warn!(?phase, eof = item.is_eof(), "payload after dispatch, ignoring");
                false
            }
        }
    }

    /// Marks the response as produced.
    pub fn finish(&mut self) {
        self.phase = Phase::Complete;
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn body(&self) -> &BodyAccumulator {
        &self.body
    }
}
