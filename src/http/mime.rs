//! MIME type detection
//!
//! Closed table keyed on the file extension, compared without regard to case.

pub const OCTET_STREAM: &str = "application/octet-stream";

/// Content-Type for a file extension (without the dot).
///
/// # Examples
/// ```
/// use foldserve::http::mime::content_type;
/// assert_eq!(content_type("HTML"), "text/html");
/// assert_eq!(content_type("jpeg"), "image/jpeg");
/// assert_eq!(content_type(""), "application/octet-stream");
/// ```
pub fn content_type(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "html" | "htm" => "text/html",
        "txt" => "text/plain",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        _ => OCTET_STREAM,
    }
}
