//! The targets resource.
//!
//! Turns a complete request body into a store call and the store result into
//! exactly one response. Validation failures never reach the store.

use std::sync::Arc;

use http::{Response, StatusCode};
use reachard_http::protocol::ResponseBody;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::response::{json, plain};
use crate::storage::TargetStore;

/// Operations bound to the targets path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Delete,
}

impl Operation {
    /// Whether the operation reads a JSON request body.
    pub fn requires_json(self) -> bool {
        matches!(self, Self::Create | Self::Delete)
    }
}

#[derive(Clone)]
pub struct TargetsService {
    store: Arc<dyn TargetStore>,
}

impl TargetsService {
    pub fn new(store: Arc<dyn TargetStore>) -> Self {
        Self { store }
    }

    /// Runs `operation` with the complete request body.
    pub async fn call(&self, operation: Operation, body: &[u8]) -> Response<ResponseBody> {
        match operation {
            Operation::List => self.list().await,
            Operation::Create => self.create(body).await,
            Operation::Delete => self.delete(body).await,
        }
    }

    pub async fn list(&self) -> Response<ResponseBody> {
        let targets = match self.store.list().await {
            Ok(targets) => targets,
            Err(e) => {
                error!(cause = %e, "failed to get targets");
                return plain(StatusCode::INTERNAL_SERVER_ERROR, "failed to get the targets");
            }
        };

        match serde_json::to_vec(&targets) {
            Ok(body) => json(StatusCode::OK, body),
            Err(e) => {
                error!(cause = %e, "failed to serialize targets");
                plain(StatusCode::INTERNAL_SERVER_ERROR, "failed to convert the targets to JSON")
            }
        }
    }

    pub async fn create(&self, body: &[u8]) -> Response<ResponseBody> {
        let object = match parse_json(body) {
            Ok(object) => object,
            Err(response) => return response,
        };

        let Some(name) = object.get("name").and_then(Value::as_str) else {
            return plain(StatusCode::BAD_REQUEST, "failed to parse target name");
        };

        match self.store.add(name).await {
            Ok(id) => {
                info!(id, name, "target added");
                plain(StatusCode::OK, "")
            }
            Err(e) => {
                error!(cause = %e, name, "failed to add a target");
                plain(StatusCode::INTERNAL_SERVER_ERROR, "failed to add the target")
            }
        }
    }

    pub async fn delete(&self, body: &[u8]) -> Response<ResponseBody> {
        let object = match parse_json(body) {
            Ok(object) => object,
            Err(response) => return response,
        };

        let Some(id) = object.get("id").and_then(Value::as_i64) else {
            return plain(StatusCode::BAD_REQUEST, "failed to parse target ID");
        };

        // deleting an absent id is not an error
        match self.store.delete(id).await {
            Ok(existed) => {
                info!(id, existed, "target deleted");
                plain(StatusCode::OK, "")
            }
            Err(e) => {
                error!(cause = %e, id, "failed to delete a target");
                plain(StatusCode::INTERNAL_SERVER_ERROR, "failed to delete the target")
            }
        }
    }
}

fn parse_json(body: &[u8]) -> Result<Value, Response<ResponseBody>> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(cause = %e, "request body is not JSON");
        plain(StatusCode::BAD_REQUEST, "failed to parse as JSON")
    })
}

impl std::fmt::Debug for TargetsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetsService").finish_non_exhaustive()
    }
}
