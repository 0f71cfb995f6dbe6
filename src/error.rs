//! Error taxonomy shared by every accessor.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures that happen before a usable XML document is in hand.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection failure, timeout, or a request dropped mid-flight.
    #[error("request failed: {0}")]
    Request(#[from] wreq::Error),

    /// The service answered with a non-success HTTP status.
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body could not be read as XML.
    #[error("unreadable XML response: {0}")]
    Xml(String),
}

/// Every way a call into the service can fail.
#[derive(Error, Debug)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The service rejected the request outright (bad credentials, malformed parameters).
    #[error("remote service error: {0}")]
    Protocol(String),

    /// The request was well-formed but the booking operation could not complete.
    #[error("booking rejected: {0}")]
    Business(String),

    /// The success envelope is missing a required field or carries a bad value.
    #[error("unexpected response shape: {0}")]
    Shape(String),

    /// Rejected locally before any request was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Coarse classification of an [`Error`], for callers that branch on category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Protocol,
    Business,
    Shape,
    InvalidRequest,
    Config,
}

impl Error {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_) => ErrorKind::Transport,
            Error::Protocol(_) => ErrorKind::Protocol,
            Error::Business(_) => ErrorKind::Business,
            Error::Shape(_) => ErrorKind::Shape,
            Error::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Error::Config(_) => ErrorKind::Config,
        }
    }

    pub(crate) fn shape(message: impl Into<String>) -> Self {
        Error::Shape(message.into())
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidRequest(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let err = Error::from(TransportError::Status { status: 500, body: String::new() });
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(Error::Protocol("x".into()).kind(), ErrorKind::Protocol);
        assert_eq!(Error::Business("x".into()).kind(), ErrorKind::Business);
        assert_eq!(Error::shape("x").kind(), ErrorKind::Shape);
        assert_eq!(Error::invalid("x").kind(), ErrorKind::InvalidRequest);
        assert_eq!(Error::Config("x".into()).kind(), ErrorKind::Config);
    }

    #[test]
    fn test_display_carries_message() {
        let err = Error::Business("Room is no longer available".into());
        assert_eq!(err.to_string(), "booking rejected: Room is no longer available");

        let err = Error::from(TransportError::Xml("no root element".into()));
        assert!(err.to_string().contains("no root element"));
    }
}
