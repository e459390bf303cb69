//! Minimal HTTP/1.1 client over raw TCP sockets.
//!
//! # Overview
//! Decomposes a URL, opens a fresh connection, writes a hand-built GET or
//! POST request, reads the response until the server closes the connection
//! and extracts the status code and body. No HTTP library is involved on the
//! client side.
//!
//! # Design
//! - `HttpClient` is stateless apart from its `ClientConfig`.
//! - One `Connection` per call, released on every exit path by `Drop`.
//! - Builders (`request`) and the parser (`response`) are pure functions, so
//!   the wire format is testable without sockets.
//! - Framing is read-until-close; there is no keep-alive, chunked decoding,
//!   TLS or redirect handling.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod request;
pub mod response;
pub mod transport;
pub mod url;

pub use client::HttpClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use http::{HttpMethod, HttpResponse};
pub use request::{build_get, build_post, form_body, FormArgs};
pub use response::parse_response;
pub use transport::Connection;
pub use self::url::ParsedUrl;
