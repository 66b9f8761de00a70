//! Listening socket and per-connection dispatch.

pub mod listener;
pub mod state;

pub use state::ServerState;
