//! Listener and connection lifecycle.

use std::fmt;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use reachard_http::connection::HttpConnection;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::dispatch::Dispatcher;
use crate::storage::{StorageError, TargetStore};

pub struct ServerBuilder {
    address: Option<SocketAddr>,
    store: Option<Arc<dyn TargetStore>>,
}

impl ServerBuilder {
    fn new() -> Self {
        Self { address: None, store: None }
    }

    #[must_use]
    pub fn address(mut self, address: SocketAddr) -> Self {
        self.address = Some(address);
        self
    }

    #[must_use]
    pub fn store(mut self, store: Arc<dyn TargetStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> Result<Server, ServerBuildError> {
        let address = self.address.ok_or(ServerBuildError::MissingAddress)?;
        let store = self.store.ok_or(ServerBuildError::MissingStore)?;
        Ok(Server { address, dispatcher: Arc::new(Dispatcher::new(store)) })
    }
}

impl fmt::Debug for ServerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerBuilder")
            .field("address", &self.address)
            .field("store", &self.store.as_ref().map(|_| ".."))
            .finish()
    }
}

#[derive(Debug)]
pub struct Server {
    address: SocketAddr,
    dispatcher: Arc<Dispatcher>,
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("address must be set")]
    MissingAddress,
    #[error("store must be set")]
    MissingStore,
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to bind {address}: {source}")]
    Bind { address: SocketAddr, source: io::Error },

    #[error("storage error: {source}")]
    Storage {
        #[from]
        source: StorageError,
    },

    #[error("invalid server setup: {source}")]
    Build {
        #[from]
        source: ServerBuildError,
    },
}

impl ServerError {
    pub fn bind(address: SocketAddr, source: io::Error) -> Self {
        Self::Bind { address, source }
    }
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Binds the configured address and serves until `shutdown` resolves.
    pub async fn start(self, shutdown: impl Future<Output = ()>) -> Result<(), ServerError> {
        let listener = TcpListener::bind(self.address).await.map_err(|e| ServerError::bind(self.address, e))?;
        self.serve(listener, shutdown).await;
        Ok(())
    }

    /// Accepts connections from `listener` until `shutdown` resolves.
    ///
    /// Connections still open at that point are aborted; requests cut short
    /// this way end as client aborts.
    pub async fn serve(self, listener: TcpListener, shutdown: impl Future<Output = ()>) {
        match listener.local_addr() {
            Ok(address) => info!(%address, "listening"),
            Err(_) => info!(address = %self.address, "listening"),
        }

        let mut connections = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                accepted = listener.accept() => {
                    let (tcp_stream, remote_addr) = match accepted {
                        Ok(stream_and_addr) => stream_and_addr,
                        Err(e) => {
                            warn!(cause = %e, "failed to accept");
                            continue;
                        }
                    };

                    let dispatcher = Arc::clone(&self.dispatcher);
                    connections.spawn(async move {
                        debug!(%remote_addr, "connection accepted");
                        match HttpConnection::new(tcp_stream).process(dispatcher).await {
                            Ok(()) => debug!(%remote_addr, "connection closed"),
                            Err(e) => warn!(%remote_addr, cause = %e, "connection closed with error"),
                        }
                    });
                }
                Some(joined) = connections.join_next(), if !connections.is_empty() => {
                    if let Err(e) = joined {
                        error!(cause = %e, "connection task failed");
                    }
                }
            }
        }

        info!(open_connections = connections.len(), "shutting down");
        connections.shutdown().await;
    }
}
