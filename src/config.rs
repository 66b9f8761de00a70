//! Server configuration.
//!
//! Loaded once at startup from an optional YAML file plus a handful of
//! environment overrides, then shared read-only by every connection.

use anyhow::Context;
use serde::Deserialize;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

/// Environment variable naming the YAML config file.
pub const CONFIG_ENV: &str = "FOLDSERVE_CONFIG";

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "foldserve.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Listener and file-serving settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// IPv4 address to bind (all interfaces by default)
    pub host: Ipv4Addr,
    pub port: u16,
    /// Pending-connection queue handed to `listen(2)`
    pub backlog: u32,
    /// Directory request paths are joined onto
    pub root_dir: PathBuf,
    /// Directory scanned for case-insensitive name matches
    pub lookup_dir: PathBuf,
    /// Upper bound on bytes read from a client before parsing
    pub max_request_bytes: usize,
    /// Upper bound on status line + headers + body; the body is truncated to fit
    pub max_response_bytes: usize,
    /// Read deadline; absent means a silent client holds its task forever
    pub read_timeout_ms: Option<u64>,
    /// How long a directory listing may be reused; absent means rescan per request
    pub name_index_ttl_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Append lines to `file` in addition to stdout
    pub persist: bool,
    pub file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED,
            port: 8080,
            backlog: 10,
            root_dir: executable_dir(),
            lookup_dir: PathBuf::from("."),
            max_request_bytes: 64 * 1024,
            max_response_bytes: 100 * 1024 * 1024,
            read_timeout_ms: None,
            name_index_ttl_ms: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            persist: false,
            file: PathBuf::from("foldserve_log.txt"),
        }
    }
}

/// Directory holding the running binary, or `.` when it cannot be determined.
fn executable_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Config {
    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(text).context("invalid configuration")
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml(&text)
    }

    /// Applies `FOLDSERVE_*` overrides taken from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("FOLDSERVE_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("FOLDSERVE_PORT is not a port: {port}"))?;
        }
        if let Some(root) = lookup("FOLDSERVE_ROOT") {
            self.server.root_dir = PathBuf::from(root);
        }
        if let Some(dir) = lookup("FOLDSERVE_LOOKUP_DIR") {
            self.server.lookup_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup("FOLDSERVE_LOG_LEVEL") {
            self.logging.level = level;
        }
        Ok(())
    }

    /// Reads `$FOLDSERVE_CONFIG` (or `foldserve.yaml` if it exists), then
    /// applies environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            Err(_) => Self::default(),
        };
        cfg.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }
}
