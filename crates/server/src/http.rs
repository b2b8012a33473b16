#![forbid(unsafe_code)]

use serde_json::Value;
use std::io::{Read, Write};

const MAX_HEADER_BYTES: usize = 8192;
const MAX_BODY_BYTES: usize = 16 * 1024;

pub(crate) struct HttpRequest {
    pub(crate) method: String,
    pub(crate) target: String,
    pub(crate) body: Vec<u8>,
}

pub(crate) struct Response {
    pub(crate) status: &'static str,
    pub(crate) content_type: &'static str,
    pub(crate) body: Vec<u8>,
}

impl Response {
    pub(crate) fn html(status: &'static str, body: String) -> Self {
        Self {
            status,
            content_type: "text/html; charset=utf-8",
            body: body.into_bytes(),
        }
    }

    pub(crate) fn json(status: &'static str, body: &Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string().into_bytes(),
        }
    }

    pub(crate) fn text(status: &'static str, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.as_bytes().to_vec(),
        }
    }

    pub(crate) fn asset(content_type: &'static str, body: &'static str) -> Self {
        Self {
            status: "200 OK",
            content_type,
            body: body.as_bytes().to_vec(),
        }
    }

    pub(crate) fn not_found() -> Self {
        Self::text("404 Not Found", "Not found.")
    }

    pub(crate) fn method_not_allowed() -> Self {
        Self::text("405 Method Not Allowed", "Method not allowed.")
    }
}

pub(crate) fn read_request<R: Read>(stream: &mut R) -> std::io::Result<Option<HttpRequest>> {
    let mut data = Vec::<u8>::new();
    let header_end = loop {
        if let Some(pos) = find_header_end(&data) {
            break pos;
        }
        if data.len() > MAX_HEADER_BYTES || read_more(stream, &mut data, MAX_HEADER_BYTES)? == 0 {
            break data.len();
        }
    };
    if data.is_empty() {
        return Ok(None);
    }

    let (method, target, content_length) = parse_head(&data[..header_end]);
    let content_length = content_length.min(MAX_BODY_BYTES);
    let mut body = data.split_off(header_end);
    while body.len() < content_length {
        let remaining = content_length - body.len();
        if read_more(stream, &mut body, remaining)? == 0 {
            break;
        }
    }
    body.truncate(content_length);

    Ok(Some(HttpRequest {
        method,
        target,
        body,
    }))
}

fn find_header_end(data: &[u8]) -> Option<usize> {
    data.windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|pos| pos + 4)
}

/// Appends at most `limit` bytes. Zero means the peer is done or went quiet.
fn read_more<R: Read>(stream: &mut R, into: &mut Vec<u8>, limit: usize) -> std::io::Result<usize> {
    let mut buf = [0u8; 4096];
    let cap = limit.clamp(1, buf.len());
    match stream.read(&mut buf[..cap]) {
        Ok(read) => {
            into.extend_from_slice(&buf[..read]);
            Ok(read)
        }
        Err(err)
            if matches!(
                err.kind(),
                std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
            ) =>
        {
            Ok(0)
        }
        Err(err) => Err(err),
    }
}

/// Request line plus the declared body length; a bad length counts as none.
fn parse_head(head: &[u8]) -> (String, String, usize) {
    let text = String::from_utf8_lossy(head);
    let mut lines = text.split("\r\n");
    let mut parts = lines.next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let target = parts.next().unwrap_or("/").to_string();
    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    (method, target, content_length)
}

pub(crate) fn write_response<W: Write>(
    stream: &mut W,
    response: &Response,
    head_only: bool,
) -> std::io::Result<()> {
    let mut headers = String::new();
    headers.push_str("HTTP/1.1 ");
    headers.push_str(response.status);
    headers.push_str("\r\n");
    headers.push_str("Content-Type: ");
    headers.push_str(response.content_type);
    headers.push_str("\r\n");
    headers.push_str("Cache-Control: no-store\r\n");
    headers.push_str("X-Content-Type-Options: nosniff\r\n");
    headers.push_str("Content-Security-Policy: default-src 'self'; style-src 'self'; script-src 'self'; img-src 'self' data:;\r\n");
    headers.push_str("Connection: close\r\n");
    headers.push_str("Content-Length: ");
    headers.push_str(&response.body.len().to_string());
    headers.push_str("\r\n\r\n");

    stream.write_all(headers.as_bytes())?;
    if !head_only {
        stream.write_all(&response.body)?;
    }
    stream.flush()
}

/// Strips the query string. Returns `None` for targets that cannot name a route.
pub(crate) fn normalize_path(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    let raw = raw.split(['?', '#']).next().unwrap_or(raw);
    if raw.is_empty() {
        return Some("/");
    }
    if !raw.starts_with('/') || raw.len() > 512 || raw.contains('\\') {
        return None;
    }
    Some(raw)
}

/// Percent-decodes one path segment. `+` stays literal, unlike in query strings.
pub(crate) fn decode_path_segment(value: &str) -> Option<String> {
    let bytes = value.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut idx = 0usize;
    while idx < bytes.len() {
        match bytes[idx] {
            b'%' => {
                let hi = hex_value(*bytes.get(idx + 1)?)?;
                let lo = hex_value(*bytes.get(idx + 2)?)?;
                out.push((hi << 4) | lo);
                idx += 3;
            }
            byte => {
                out.push(byte);
                idx += 1;
            }
        }
    }
    String::from_utf8(out).ok()
}

pub(crate) fn encode_path_segment(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
