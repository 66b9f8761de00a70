//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.x: one request line per connection, one
//! response, then close. Request headers and bodies are never read.
//!
//! # Architecture
//!
//! - **`connection`**: the per-connection state machine
//! - **`parser`**: request-line parsing and percent-decoding
//! - **`request`**: the parsed request line
//! - **`response`**: status codes, responses and their builder
//! - **`file_response`**: 200/400/404 responses for served, rejected and missing files
//! - **`writer`**: serializes and writes responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← One request's worth of bytes
//!        └──────┬──────┘
//!               │ nothing read ───────────────┐
//!               ▼                             │
//!        ┌─────────────┐                      │
//!        │   Parsing   │ ← Request line       │
//!        └──────┬──────┘                      │
//!               │ unparsable ─────────────────┤
//!               ▼                             │
//!        ┌─────────────┐                      │
//!        │  Resolving  │ ← 200 / 400 / 404    │
//!        └──────┬──────┘                      │
//!               ▼                             │
//!        ┌─────────────┐                      │
//!        │ Responding  │ ← Write everything   │
//!        └──────┬──────┘                      │
//!               ▼                             │
//!        ┌─────────────┐                      │
//!        │   Closed    │ ◄────────────────────┘
//!        └─────────────┘
//! ```

pub mod connection;
pub mod file_response;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
