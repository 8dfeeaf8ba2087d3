//! Protocol types of the chunked invocation model.
//!
//! - [`Message`] / [`PayloadItem`]: the header → chunk* → EOF call sequence
//! - [`RequestHeader`]: what the first invocation sees
//! - [`Termination`]: why a request ended, reported to the completion hook
//! - [`ResponseBody`]: body type of handler responses
//! - [`HttpError`], [`ReceiveError`]: engine level failures

mod message;
pub use message::Message;
pub use message::PayloadItem;

mod request;
pub use request::RequestHeader;

mod response;
pub(crate) use response::build_error_response;
pub use response::ResponseBody;

mod termination;
pub use termination::Termination;

mod error;
pub use error::HttpError;
pub use error::ReceiveError;
