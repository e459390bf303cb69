//! URL decomposition into the pieces a raw request needs.
//!
//! The port never depends on the scheme: a URL without an explicit port
//! always resolves to 80, because the client only speaks plaintext HTTP.

use url::{Host, Url};

use crate::error::{ClientError, Result};

const DEFAULT_PORT: u16 = 80;

/// Host, port and path of a URL, ready to connect to and request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    host: String,
    port: u16,
    path: String,
    query: Option<String>,
    ipv6: bool,
}

impl ParsedUrl {
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input).map_err(|e| ClientError::InvalidUrl {
            url: input.to_string(),
            reason: e.to_string(),
        })?;

        let (host, ipv6) = match url.host() {
            Some(Host::Domain(domain)) if !domain.is_empty() => (domain.to_string(), false),
            Some(Host::Ipv4(addr)) => (addr.to_string(), false),
            Some(Host::Ipv6(addr)) => (addr.to_string(), true),
            _ => {
                return Err(ClientError::InvalidUrl {
                    url: input.to_string(),
                    reason: "missing host".to_string(),
                })
            }
        };

        let port = url
            .port()
            .or_else(|| explicit_default_port(input, &url))
            .unwrap_or(DEFAULT_PORT);

        let path = match url.path() {
            "" => "/".to_string(),
            p => p.to_string(),
        };

        Ok(Self {
            host,
            port,
            path,
            query: url.query().map(str::to_string),
            ipv6,
        })
    }

    /// Host to connect to. IPv6 literals come without brackets.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Path component, never empty.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Path plus `?query`, as written on the request line.
    pub fn request_target(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{q}", self.path),
            None => self.path.clone(),
        }
    }

    /// Value for the `Host` header.
    pub fn host_header(&self) -> String {
        if self.ipv6 {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        }
    }
}

/// `Url::port` hides a port equal to the scheme default, so `https://h:443`
/// reports no port at all. Recover it from the raw authority so it is not
/// replaced by 80.
fn explicit_default_port(input: &str, url: &Url) -> Option<u16> {
    let default = url.port_or_known_default()?;
    let after_scheme = input.split_once("://")?.1;
    let authority = after_scheme
        .split(&['/', '?', '#'][..])
        .next()
        .unwrap_or_default();
    let host_port = authority.rsplit('@').next().unwrap_or_default();
    let (_, port) = host_port.rsplit_once(':')?;
    if port.ends_with(']') {
        return None;
    }
    (port.parse::<u16>().ok()? == default).then_some(default)
}
