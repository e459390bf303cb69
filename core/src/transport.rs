//! Blocking TCP transport with read-until-close framing.
//!
//! # Design
//! A `Connection` owns exactly one socket for exactly one request. The end of
//! the response is the peer closing the connection, so reads accumulate raw
//! bytes until a zero-length read and decode them once at the end; decoding
//! per chunk would split multi-byte characters that straddle a chunk
//! boundary. Dropping a `Connection` closes it, so the socket is released on
//! every exit path, including early returns through `?`.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{debug, trace};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// One TCP connection: connect, send, receive, close. Never reused.
#[derive(Debug)]
pub struct Connection {
    stream: Option<TcpStream>,
    peer: String,
    chunk_size: usize,
}

impl Connection {
    /// Resolve `host` and open a blocking stream to the first address that
    /// accepts, applying the configured socket timeouts.
    pub fn connect(host: &str, port: u16, config: &ClientConfig) -> Result<Self> {
        let peer = if host.contains(':') {
            format!("[{host}]:{port}")
        } else {
            format!("{host}:{port}")
        };

        let stream = open_stream(host, port, config.connect_timeout.filter(|d| !d.is_zero()))
            .and_then(|stream| {
                stream.set_read_timeout(config.read_timeout.filter(|d| !d.is_zero()))?;
                stream.set_write_timeout(config.write_timeout.filter(|d| !d.is_zero()))?;
                Ok(stream)
            })
            .map_err(|source| ClientError::Connection {
                addr: peer.clone(),
                source,
            })?;

        debug!(%peer, "connected");
        Ok(Self {
            stream: Some(stream),
            peer,
            chunk_size: config.chunk_size.max(1),
        })
    }

    /// `host:port` this connection was opened to.
    pub fn peer(&self) -> &str {
        &self.peer
    }

    pub fn is_closed(&self) -> bool {
        self.stream.is_none()
    }

    /// Write all of `data`; `write_all` keeps going after partial writes.
    pub fn send(&mut self, data: &str) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(ClientError::Closed)?;
        stream
            .write_all(data.as_bytes())
            .and_then(|()| stream.flush())
            .map_err(|e| {
                if ClientError::is_timeout(&e) {
                    ClientError::Timeout(e)
                } else {
                    ClientError::Transmission(e)
                }
            })?;
        debug!(peer = %self.peer, bytes = data.len(), "request sent");
        Ok(())
    }

    /// Read until the peer closes the connection, then decode as UTF-8.
    pub fn receive_until_close(&mut self) -> Result<String> {
        let chunk_size = self.chunk_size;
        let stream = self.stream.as_mut().ok_or(ClientError::Closed)?;

        let mut buffer = Vec::new();
        let mut chunk = vec![0u8; chunk_size];
        loop {
            match stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    trace!(n, "received chunk");
                    buffer.extend_from_slice(&chunk[..n]);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if ClientError::is_timeout(&e) => return Err(ClientError::Timeout(e)),
                Err(e) => return Err(ClientError::Receive(e)),
            }
        }

        debug!(peer = %self.peer, bytes = buffer.len(), "peer closed connection");
        Ok(String::from_utf8(buffer)?)
    }

    /// Release the socket. Safe to call more than once. A failing shutdown
    /// is logged and otherwise ignored so it cannot hide an earlier error.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(e) = stream.shutdown(Shutdown::Both) {
                debug!(peer = %self.peer, error = %e, "ignoring shutdown failure");
            }
            debug!(peer = %self.peer, "connection closed");
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}

fn open_stream(host: &str, port: u16, timeout: Option<Duration>) -> io::Result<TcpStream> {
    let Some(timeout) = timeout else {
        return TcpStream::connect((host, port));
    };

    let mut last_err = None;
    for addr in (host, port).to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_err = Some(e),
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "host resolved to no addresses")
    }))
}
