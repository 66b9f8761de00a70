use crate::http::request::IncomingRequest;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty request")]
    Empty,
    #[error("request line does not start with an uppercase method")]
    InvalidMethod,
    #[error("malformed request target")]
    InvalidRequest,
    #[error("request line does not name HTTP/1.x")]
    InvalidVersion,
}

/// Parses `METHOD /PATH HTTP/1.x` from the first line of `buf`.
///
/// The path runs from after the `/` up to the next space and may be empty.
/// Anything after `HTTP/1` on the line, and every following line, is ignored.
pub fn parse_request_line(buf: &[u8]) -> Result<IncomingRequest, ParseError> {
    let line = first_line(buf);
    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    let method_len = line.iter().take_while(|b| b.is_ascii_uppercase()).count();
    if method_len == 0 {
        return Err(ParseError::InvalidMethod);
    }
    let (method, rest) = line.split_at(method_len);

    let rest = rest.strip_prefix(b" /").ok_or(ParseError::InvalidRequest)?;
    let path_len = rest
        .iter()
        .position(|&b| b == b' ')
        .ok_or(ParseError::InvalidRequest)?;
    let (path, tail) = rest.split_at(path_len);

    if !tail.starts_with(VERSION_PREFIX) {
        return Err(ParseError::InvalidVersion);
    }

    Ok(IncomingRequest {
        // ASCII uppercase only, always valid UTF-8
        method: String::from_utf8_lossy(method).into_owned(),
        raw_path: String::from_utf8_lossy(path).into_owned(),
    })
}

/// Whether more bytes could still change the outcome of
/// [`parse_request_line`].
///
/// True only while `buf` holds no line break, does not parse yet, and is a
/// prefix of something that would. Anything else is already decided.
pub fn is_undecided(buf: &[u8]) -> bool {
    if buf.contains(&b'\n') || parse_request_line(buf).is_ok() {
        return false;
    }

    let method_len = buf.iter().take_while(|b| b.is_ascii_uppercase()).count();
    let rest = &buf[method_len..];
    if rest.is_empty() {
        return true;
    }
    if method_len == 0 {
        return false;
    }

    let Some(rest) = rest.strip_prefix(b" ") else {
        return false;
    };
    let Some(rest) = rest.strip_prefix(b"/") else {
        return rest.is_empty();
    };
    match rest.iter().position(|&b| b == b' ') {
        None => true,
        Some(space) => {
            let tail = &rest[space..];
            tail.len() < VERSION_PREFIX.len() && VERSION_PREFIX.starts_with(tail)
        }
    }
}

const VERSION_PREFIX: &[u8] = b" HTTP/1";

fn first_line(buf: &[u8]) -> &[u8] {
    match buf.iter().position(|&b| b == b'\n') {
        Some(end) => buf[..end].strip_suffix(b"\r").unwrap_or(&buf[..end]),
        None => buf,
    }
}

/// Decodes `%XX` escapes.
///
/// A `%` not followed by two hex digits is kept literally together with
/// whatever follows it; malformed escapes never fail. Decoded bytes that are
/// not valid UTF-8 are replaced with U+FFFD.
pub fn percent_decode(src: &str) -> String {
    let bytes = src.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
