use std::sync::Arc;
use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::files::ResolveError;
use crate::http::file_response::{missing_file, rejected_path, serve_file};
use crate::http::parser::{is_undecided, parse_request_line};
use crate::http::request::IncomingRequest;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::server::state::ServerState;

const READ_CHUNK: usize = 4096;

/// One request, one response, then close.
pub struct Connection<S> {
    stream: S,
    peer: String,
    state: Arc<ServerState>,
    phase: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Parsing(BytesMut),
    Resolving(IncomingRequest),
    Responding(Response),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, peer: impl Into<String>, state: Arc<ServerState>) -> Self {
        Self {
            stream,
            peer: peer.into(),
            state,
            phase: ConnectionState::Reading,
        }
    }

    /// Drives the connection to `Closed`. Transport errors are returned after
    /// the stream has been given up; protocol errors close silently.
    pub async fn run(mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.phase, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.phase = match self.read_request().await? {
                        Some(buf) => ConnectionState::Parsing(buf),
                        None => ConnectionState::Closed,
                    };
                }

                ConnectionState::Parsing(buf) => {
                    self.phase = match parse_request_line(&buf) {
                        Ok(request) => ConnectionState::Resolving(request),
                        Err(e) => {
                            tracing::debug!(peer = %self.peer, error = %e, "Dropping unparsable request");
                            ConnectionState::Closed
                        }
                    };
                }

                ConnectionState::Resolving(request) => {
                    let response = self.handle_request(&request).await;
                    self.phase = ConnectionState::Responding(response);
                }

                ConnectionState::Responding(response) => {
                    let mut writer = ResponseWriter::new(&response);
                    writer.write_to_stream(&mut self.stream).await?;
                    // The stream is dropped on Closed whatever this returns
                    let _ = self.stream.shutdown().await;
                    self.phase = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until the request line is decided one way or the other, the peer
    /// stops sending, or `max_request_bytes` is reached. Bytes that can no
    /// longer form a request line end the read at once. `None` when nothing
    /// arrived.
    async fn read_request(&mut self) -> anyhow::Result<Option<BytesMut>> {
        let limit = self.state.config.max_request_bytes;
        let deadline = self.state.config.read_timeout_ms.map(Duration::from_millis);
        let mut buf = BytesMut::with_capacity(limit.min(READ_CHUNK));

        while buf.len() < limit {
            let remaining = (limit - buf.len()) as u64;
            let mut limited = (&mut self.stream).take(remaining);
            let read = limited.read_buf(&mut buf);

            let n = match deadline {
                Some(d) => match tokio::time::timeout(d, read).await {
                    Ok(n) => n?,
                    Err(_) => {
                        tracing::warn!(peer = %self.peer, "Read timed out, closing connection");
                        return Ok(None);
                    }
                },
                None => read.await?,
            };

            if n == 0 || !is_undecided(&buf) {
                break;
            }
        }

        if buf.is_empty() {
            return Ok(None);
        }
        Ok(Some(buf))
    }

    async fn handle_request(&self, request: &IncomingRequest) -> Response {
        let (path, defaulted) = request.target();
        if defaulted {
            tracing::info!("File not provided, serving {} as default", path);
        }
        tracing::info!("{} request from {} for /{}", request.method, self.peer, path);

        match self.state.resolver.resolve(&path).await {
            Ok(target) => serve_file(&target, self.state.config.max_response_bytes).await,
            Err(ResolveError::Traversal(_)) => rejected_path(&path),
            Err(ResolveError::NotFound(_)) => missing_file(&path),
        }
    }
}
