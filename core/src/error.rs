//! Error types for the raw-socket HTTP client.
//!
//! # Design
//! Every failure aborts the request it belongs to; nothing is retried. Socket
//! failures keep the underlying `io::Error` so callers can inspect the OS
//! error kind, and the variant tells them which pipeline stage failed.

use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Errors returned by `HttpClient` and the pieces it is built from.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The URL could not be parsed or carries no host.
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// DNS resolution or the TCP connect failed.
    #[error("could not connect to {addr}: {source}")]
    Connection {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// Writing the request to the socket failed.
    #[error("failed to send request: {0}")]
    Transmission(#[source] io::Error),

    /// Reading the response failed for a reason other than a timeout.
    #[error("failed to read response: {0}")]
    Receive(#[source] io::Error),

    /// A configured socket timeout elapsed.
    #[error("socket operation timed out: {0}")]
    Timeout(#[source] io::Error),

    /// The response bytes are not valid UTF-8.
    #[error("response is not valid utf-8: {0}")]
    Decoding(#[from] FromUtf8Error),

    /// The status line is missing or has no numeric status code.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The connection was already closed.
    #[error("connection is closed")]
    Closed,
}

impl ClientError {
    /// True for the two `io::ErrorKind`s a socket reports when its timeout
    /// elapses (`WouldBlock` on Unix, `TimedOut` on Windows).
    pub(crate) fn is_timeout(err: &io::Error) -> bool {
        matches!(
            err.kind(),
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClientError>;
