//! GET/POST façade over the raw-socket pipeline.
//!
//! # Design
//! `HttpClient` holds only its `ClientConfig` and carries no state between
//! calls. Every call runs the whole pipeline on its own `Connection`:
//! decompose the URL, connect, build the request, send it, read until the
//! peer closes, close, then parse. Because the connection is a local owned by
//! the call, independent calls can run on separate threads against the same
//! client without any locking.

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpMethod, HttpResponse};
use crate::request::{build_get, build_post, FormArgs};
use crate::response::parse_response;
use crate::transport::Connection;
use crate::url::ParsedUrl;

/// Synchronous HTTP/1.1 client speaking plaintext over raw TCP.
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    config: ClientConfig,
}

impl HttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// GET `url`. Form args are not sent with a GET.
    pub fn get(&self, url: &str, args: Option<&FormArgs>) -> Result<HttpResponse> {
        self.execute(HttpMethod::Get, url, args)
    }

    /// POST `args` to `url` as an `application/x-www-form-urlencoded` body.
    pub fn post(&self, url: &str, args: Option<&FormArgs>) -> Result<HttpResponse> {
        self.execute(HttpMethod::Post, url, args)
    }

    /// Dispatch by method name: `"POST"` posts, anything else is a GET.
    pub fn command(&self, url: &str, method: &str, args: Option<&FormArgs>) -> Result<HttpResponse> {
        self.execute(HttpMethod::from_command(method), url, args)
    }

    pub fn execute(&self, method: HttpMethod, url: &str, args: Option<&FormArgs>) -> Result<HttpResponse> {
        let target = ParsedUrl::parse(url)?;
        let mut conn = Connection::connect(target.host(), target.port(), &self.config)?;

        let request_path = if self.config.forward_query {
            target.request_target()
        } else {
            target.path().to_string()
        };
        let request = match method {
            HttpMethod::Get => {
                if args.is_some_and(|a| !a.is_empty()) {
                    debug!("ignoring form args on GET");
                }
                build_get(&request_path, &target.host_header())
            }
            HttpMethod::Post => build_post(&request_path, &target.host_header(), args),
        };

        debug!(%method, peer = conn.peer(), path = %request_path, "dispatching request");
        conn.send(&request)?;
        let raw = conn.receive_until_close()?;
        conn.close();

        let response = parse_response(&raw)?;
        debug!(status = response.status_code, "response parsed");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use std::io::{Read, Write};
    use std::net::{Shutdown, TcpListener};
    use std::sync::mpsc;
    use std::thread;

    /// One-shot stub returning `reply` and handing back the request it saw.
    fn stub(reply: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut seen = Vec::new();
            let mut buf = [0u8; 512];
            while !seen.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => seen.extend_from_slice(&buf[..n]),
                }
            }
            stream.write_all(reply.as_bytes()).unwrap();
            stream.shutdown(Shutdown::Write).unwrap();
            let _ = stream.read_to_end(&mut seen);
            tx.send(String::from_utf8(seen).unwrap()).unwrap();
        });
        (url, rx)
    }

    #[test]
    fn get_sends_request_line_and_parses_reply() {
        let (url, seen) = stub("HTTP/1.1 200 OK\r\n\r\nOK");
        let response = HttpClient::new().get(&format!("{url}/hello"), None).unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "OK");

        let request = seen.recv().unwrap();
        assert_eq!(request, "GET /hello HTTP/1.1\r\nHost: 127.0.0.1\r\nConnection: close\r\n\r\n");
    }

    #[test]
    fn query_is_left_off_the_request_line_by_default() {
        let (url, seen) = stub("HTTP/1.1 200 OK\r\n\r\nOK");
        HttpClient::new().get(&format!("{url}/search?q=1#frag"), None).unwrap();
        assert!(seen.recv().unwrap().starts_with("GET /search HTTP/1.1\r\n"));
    }

    #[test]
    fn query_is_forwarded_when_enabled() {
        let (url, seen) = stub("HTTP/1.1 200 OK\r\n\r\nOK");
        let client = HttpClient::with_config(ClientConfig::default().with_forward_query(true));
        client.get(&format!("{url}/search?q=1#frag"), None).unwrap();
        assert!(seen.recv().unwrap().starts_with("GET /search?q=1 HTTP/1.1\r\n"));
    }

    #[test]
    fn get_ignores_form_args() {
        let (url, seen) = stub("HTTP/1.1 200 OK\r\n\r\nOK");
        let args: FormArgs = [("a", "1")].into_iter().collect();
        HttpClient::new().get(&url, Some(&args)).unwrap();
        let request = seen.recv().unwrap();
        assert!(request.starts_with("GET / HTTP/1.1\r\n"));
        assert!(!request.contains("a=1"));
    }

    #[test]
    fn post_sends_form_body() {
        let (url, seen) = stub("HTTP/1.1 201 Created\r\n\r\ncreated");
        let args: FormArgs = [("a", "1"), ("b", "2")].into_iter().collect();
        let response = HttpClient::new().post(&format!("{url}/submit"), Some(&args)).unwrap();
        assert_eq!(response.status_code, 201);
        assert_eq!(response.body, "created");

        let request = seen.recv().unwrap();
        assert!(request.starts_with("POST /submit HTTP/1.1\r\nHost: 127.0.0.1\r\nContent-Type: "));
        assert!(!request.contains("Connection:"));
        assert!(request.contains("Content-Length: 7\r\n"));
        assert!(request.ends_with("\r\n\r\na=1&b=2\r\n"));
    }

    #[test]
    fn command_routes_on_exact_post() {
        let (url, seen) = stub("HTTP/1.1 200 OK\r\n\r\nOK");
        HttpClient::new().command(&url, "POST", None).unwrap();
        assert!(seen.recv().unwrap().starts_with("POST / "));

        let (url, seen) = stub("HTTP/1.1 200 OK\r\n\r\nOK");
        HttpClient::new().command(&url, "post", None).unwrap();
        assert!(seen.recv().unwrap().starts_with("GET / "));

        let (url, seen) = stub("HTTP/1.1 200 OK\r\n\r\nOK");
        HttpClient::new().command(&url, "PUT", None).unwrap();
        assert!(seen.recv().unwrap().starts_with("GET / "));
    }

    #[test]
    fn malformed_reply_surfaces_after_connection_is_closed() {
        let (url, seen) = stub("garbage");
        let err = HttpClient::new().get(&url, None).unwrap_err();
        assert!(matches!(err, ClientError::MalformedResponse(_)));
        // The stub only finishes draining once the client has hung up.
        seen.recv().unwrap();
    }

    #[test]
    fn invalid_url_fails_before_connecting() {
        let err = HttpClient::new().get("not a url", None).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl { .. }));
    }
}
