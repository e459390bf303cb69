//! HTTP value types shared by the builder, the parser and the client.
//!
//! # Design
//! Both types are plain data with owned fields. `HttpResponse` is what every
//! successful call returns; it is never mutated after parsing.

use std::fmt;

use serde::Serialize;

/// HTTP method supported by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    /// Map a command name to a method. Only the exact string `"POST"`
    /// selects `Post`; everything else, including `"post"`, is a GET.
    pub fn from_command(command: &str) -> Self {
        if command == "POST" {
            HttpMethod::Post
        } else {
            HttpMethod::Get
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status code and body extracted from a raw response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: String,
}

impl fmt::Display for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.status_code, self.body)
    }
}
