//! Responses for resolved, missing and rejected files.

use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::files::ResolvedTarget;
use crate::http::mime;
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::http::writer::serialize_head;

/// Reads the whole file into a 200 response typed by its extension.
///
/// Status line, headers and body together never exceed `max_response_bytes`;
/// a larger file is silently cut short. Any failure to open or read the file
/// becomes a 404.
pub async fn serve_file(target: &ResolvedTarget, max_response_bytes: usize) -> Response {
    let path = target.absolute_path.display();
    let content_type = mime::content_type(&target.extension);

    let mut file = match File::open(&target.absolute_path).await {
        Ok(file) => file,
        Err(e) => {
            tracing::debug!(error = %e, "Could not open {}", path);
            return missing_file(&path.to_string());
        }
    };
    match file.metadata().await {
        Ok(meta) if meta.is_file() => {}
        _ => return missing_file(&path.to_string()),
    }

    tracing::info!("Serving file: {} (MIME type: {})", path, content_type);

    let mut response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", content_type)
        .build();
    let budget = max_response_bytes.saturating_sub(serialize_head(&response).len());

    let mut body = Vec::new();
    if let Err(e) = (&mut file).take(budget as u64).read_to_end(&mut body).await {
        tracing::debug!(error = %e, "Could not read {}", path);
        return missing_file(&path.to_string());
    }
    response.body = body;

    tracing::info!(
        "Sent {} bytes in response for {}",
        serialize_head(&response).len() + response.body.len(),
        path
    );
    response
}

/// 404 for a path that matched nothing or could not be read.
pub fn missing_file(requested: &str) -> Response {
    tracing::error!("File not found: {} - sending 404 response", requested);
    Response::not_found()
}

/// 400 for a path rejected by sanitization.
pub fn rejected_path(requested: &str) -> Response {
    tracing::error!("Invalid file path: {}", requested);
    Response::bad_request()
}
