//! Reachard keeps a registry of monitored targets and exposes it over HTTP.
//!
//! `GET /targets/` lists the targets, `POST /targets/` adds one from
//! `{"name": ...}` and `DELETE /targets/` removes one by `{"id": ...}`.
//! Requests are handled through [`reachard_http`]'s chunked invocation
//! protocol by [`dispatch::Dispatcher`], targets are kept in PostgreSQL.

pub mod config;
pub mod dispatch;
mod response;
pub mod server;
pub mod signal;
pub mod storage;
pub mod targets;

use std::sync::Arc;

use tracing::info;

pub use config::Config;
pub use server::{Server, ServerError};

/// Connects to the database, brings its schema up to date and serves until
/// a shutdown signal arrives.
pub async fn run(config: Config) -> Result<(), ServerError> {
    let store = storage::PostgresStore::connect(&config.db_url, config.db_pool_size).await?;
    let version = store.migrate().await?;
    info!(version, "database schema is up to date");

    Server::builder().address(config.socket_addr()).store(Arc::new(store)).build()?.start(signal::shutdown()).await
}
