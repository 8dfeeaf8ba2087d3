use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("connection error: {source}")]
    Connection {
        #[from]
        source: hyper::Error,
    },
}

/// Failure while reading a request body from the peer.
#[derive(Error, Debug)]
pub enum ReceiveError {
    #[error("invalid body: {reason}")]
    InvalidBody { reason: String },
}

impl ReceiveError {
    pub fn invalid_body<S: ToString>(str: S) -> Self {
        Self::InvalidBody { reason: str.to_string() }
    }
}
