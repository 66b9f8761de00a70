#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use foldserve::config::ServerConfig;

static NEXT: AtomicUsize = AtomicUsize::new(0);

/// Fresh, empty directory under the system temp dir.
pub fn fixture_dir(tag: &str) -> PathBuf {
    let n = NEXT.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("foldserve-{}-{}-{}", tag, std::process::id(), n));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn write_file(dir: &Path, name: &str, contents: &[u8]) {
    std::fs::write(dir.join(name), contents).unwrap();
}

/// Config serving and looking up files in `dir`.
pub fn config_for(dir: &Path) -> ServerConfig {
    ServerConfig {
        root_dir: dir.to_path_buf(),
        lookup_dir: dir.to_path_buf(),
        port: 0,
        ..ServerConfig::default()
    }
}
