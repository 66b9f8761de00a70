use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket};
use tracing::{debug, error, info};

use crate::config::{Config, ServerConfig};
use crate::http::connection::Connection;
use crate::server::state::ServerState;

/// Binds the IPv4 listening socket with the configured backlog.
pub fn bind(cfg: &ServerConfig) -> anyhow::Result<TcpListener> {
    let addr = SocketAddr::from((cfg.host, cfg.port));
    debug!("Binding socket to port {}", cfg.port);

    let socket = TcpSocket::new_v4().context("creating socket")?;
    socket.set_reuseaddr(true)?;
    socket
        .bind(addr)
        .with_context(|| format!("binding {addr}"))?;
    let listener = socket
        .listen(cfg.backlog)
        .with_context(|| format!("listening on {addr}"))?;

    info!("Listening for connections on port {}", cfg.port);
    Ok(listener)
}

/// Accepts forever, one task per connection with no upper bound.
pub async fn serve(listener: TcpListener, state: Arc<ServerState>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Client accept failed: {}", e);
                continue;
            }
        };
        debug!("Accepted connection from {}", peer);

        let state = Arc::clone(&state);
        tokio::spawn(async move {
            let conn = Connection::new(socket, peer.ip().to_string(), state);
            if let Err(e) = conn.run().await {
                error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}

pub async fn run(cfg: Config) -> anyhow::Result<()> {
    let listener = bind(&cfg.server)?;
    info!(
        root = %cfg.server.root_dir.display(),
        lookup = %cfg.server.lookup_dir.display(),
        "Serving files"
    );
    let state = Arc::new(ServerState::new(cfg.server));
    serve(listener, state).await
}
