use crate::config::ServerConfig;
use crate::files::PathResolver;

/// Read-only state shared by every connection task.
pub struct ServerState {
    pub config: ServerConfig,
    pub resolver: PathResolver,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        let resolver = PathResolver::from_config(&config);
        Self { config, resolver }
    }
}
