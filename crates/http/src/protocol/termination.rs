use std::fmt;

/// Reason a request's call sequence ended.
///
/// Passed to [`Handler::complete`](crate::handler::Handler::complete), which
/// runs exactly once per request whatever the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The handler produced a response after the body was delivered.
    Completed,
    /// The handler answered on the first invocation, no body was read.
    Rejected,
    /// Reading the body from the peer failed.
    ReadError,
    /// The request was dropped before a response was produced, usually
    /// because the client went away.
    ClientAbort,
}

impl Termination {
    /// Whether the handler produced the response itself.
    pub fn is_handled(self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Completed => "completed",
            Self::Rejected => "rejected",
            Self::ReadError => "read error",
            Self::ClientAbort => "client abort",
        };
        f.write_str(name)
    }
}
