//! Socket settings applied to every connection the client opens.

use std::time::Duration;

/// Size of each read from the socket.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Per-client socket settings. The default enforces no timeouts, so a peer
/// that never closes the connection blocks the call indefinitely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub connect_timeout: Option<Duration>,
    pub read_timeout: Option<Duration>,
    pub write_timeout: Option<Duration>,
    pub chunk_size: usize,
    /// Append the URL's `?query` to the request line. Off by default: only
    /// the path is sent.
    pub forward_query: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            read_timeout: None,
            write_timeout: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            forward_query: false,
        }
    }
}

impl ClientConfig {
    /// Apply the same limit to connect, read and write.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_connect_timeout(timeout)
            .with_read_timeout(timeout)
            .with_write_timeout(timeout)
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = Some(timeout);
        self
    }

    pub fn with_forward_query(mut self, forward_query: bool) -> Self {
        self.forward_query = forward_query;
        self
    }

    /// A chunk size of zero is clamped to one byte.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}
