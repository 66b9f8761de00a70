//! Case-insensitive name lookup over a single directory.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

struct Listing {
    names: Vec<String>,
    taken: Instant,
}

/// Entry names of one directory, in the order the OS lists them.
///
/// Without a TTL every lookup lists the directory again. With a TTL the
/// listing is reused until it is older than the TTL. Never recursive.
pub struct NameIndex {
    dir: PathBuf,
    ttl: Option<Duration>,
    cached: RwLock<Option<Listing>>,
}

impl NameIndex {
    pub fn new(dir: impl Into<PathBuf>, ttl: Option<Duration>) -> Self {
        Self {
            dir: dir.into(),
            ttl,
            cached: RwLock::new(None),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// First entry whose name equals `wanted` ignoring ASCII case.
    pub async fn find(&self, wanted: &str) -> io::Result<Option<String>> {
        let Some(ttl) = self.ttl else {
            let names = list_names(&self.dir).await?;
            return Ok(first_match(&names, wanted));
        };

        {
            let cached = self.cached.read().await;
            if let Some(listing) = cached.as_ref() {
                if listing.taken.elapsed() < ttl {
                    return Ok(first_match(&listing.names, wanted));
                }
            }
        }

        let names = list_names(&self.dir).await?;
        let found = first_match(&names, wanted);
        tracing::debug!(dir = %self.dir.display(), entries = names.len(), "Refreshed name index");
        *self.cached.write().await = Some(Listing {
            names,
            taken: Instant::now(),
        });
        Ok(found)
    }
}

fn first_match(names: &[String], wanted: &str) -> Option<String> {
    names
        .iter()
        .find(|name| name.eq_ignore_ascii_case(wanted))
        .cloned()
}

/// Non-UTF-8 names are skipped; they can never equal a decoded request path.
async fn list_names(dir: &Path) -> io::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    Ok(names)
}
