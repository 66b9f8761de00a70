//! Foldserve - minimal static file server
//!
//! Core library for request parsing, case-insensitive file resolution and
//! response assembly.

pub mod config;
pub mod files;
pub mod http;
pub mod logging;
pub mod server;
