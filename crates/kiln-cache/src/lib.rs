//! Compiled-artifact cache.
//!
//! Artifacts are addressed by a fingerprint of the originating template's
//! resolved path — the key is stable per path — while cache *validity* is
//! decided by comparing content fingerprints: a freshly compiled artifact is
//! written through only when its fingerprint differs from what is on disk.
//!
//! Writes go through a temp file plus rename so a crashed writer never
//! leaves a torn artifact behind. Single-process access is assumed; there is
//! no cross-process locking.

use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File extension of cached artifacts (serialized instruction trees).
pub const ARTIFACT_EXT: &str = "json";

/// SHA-256 content fingerprint, lowercase hex.
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// On-disk artifact store rooted at a cache directory.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The stable artifact location for a template identity (its resolved
    /// source path as a string).
    pub fn artifact_path(&self, identity: &str) -> PathBuf {
        self.root
            .join(format!("{}.{ARTIFACT_EXT}", fingerprint(identity.as_bytes())))
    }

    /// Persist `artifact` for `identity` unless the on-disk copy already has
    /// the same fingerprint. Returns the artifact location either way.
    ///
    /// After this call the file at the returned path is byte-identical to
    /// `artifact`. Write failures are fatal to the render and propagate.
    pub fn ensure_cached(&self, identity: &str, artifact: &[u8]) -> io::Result<PathBuf> {
        let path = self.artifact_path(identity);
        let fresh = fingerprint(artifact);
        let stale = match fs::read(&path) {
            Ok(existing) => fingerprint(&existing) != fresh,
            Err(_) => true,
        };
        if stale {
            let tmp = path.with_extension("tmp");
            fs::write(&tmp, artifact)?;
            fs::rename(&tmp, &path)?;
        }
        Ok(path)
    }
}
