/// The request line of a client request.
///
/// Only the first line is ever looked at; headers and body stay unread.
/// `raw_path` is the path with its leading `/` removed, still percent-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingRequest {
    /// Request method as sent, one or more uppercase ASCII letters
    pub method: String,
    /// Path after the leading slash, possibly empty
    pub raw_path: String,
}

impl IncomingRequest {
    pub fn new(method: impl Into<String>, raw_path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            raw_path: raw_path.into(),
        }
    }

    /// Percent-decoded path, `index.html` when nothing was requested.
    ///
    /// Returns the path together with a flag telling whether the default
    /// was substituted.
    pub fn target(&self) -> (String, bool) {
        let decoded = super::parser::percent_decode(&self.raw_path);
        if decoded.is_empty() {
            (DEFAULT_DOCUMENT.to_string(), true)
        } else {
            (decoded, false)
        }
    }
}

/// Served when the request path is empty.
pub const DEFAULT_DOCUMENT: &str = "index.html";
