//! Status-line and body extraction from a raw response.
//!
//! Only two things are read: the status code from the first line and the
//! body, which is the last line of the response. Headers are not parsed and
//! multi-line bodies keep only their final line.

use crate::error::{ClientError, Result};
use crate::http::HttpResponse;

pub fn parse_response(raw: &str) -> Result<HttpResponse> {
    let lines = split_lines(raw);

    let status_line = lines
        .first()
        .ok_or_else(|| ClientError::MalformedResponse("empty response".to_string()))?;

    let status_code = status_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| {
            ClientError::MalformedResponse(format!("status line {status_line:?} has no status code"))
        })?
        .parse::<u16>()
        .map_err(|e| {
            ClientError::MalformedResponse(format!("bad status code in {status_line:?}: {e}"))
        })?;

    let body = lines.last().copied().unwrap_or_default().to_string();

    Ok(HttpResponse { status_code, body })
}

/// Line boundaries: `\n`, `\r`, `\r\n`, vertical tab, form feed, the file,
/// group and record separators, NEL, and the Unicode line and paragraph
/// separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split on every line boundary, treating `\r\n` as one. A boundary at the
/// very end does not produce a trailing empty line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..i]);
        let mut end = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                end = j + 1;
            }
        }
        start = end;
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}
