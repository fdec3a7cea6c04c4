//! Screenshot artifact storage
//!
//! Every file is namespaced by scenario name, so two scenarios can never
//! silently clobber each other's evidence.

use bmx_core::{HarnessError, Outcome, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Writes PNG artifacts into the configured output directory
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Store the final per-scenario screenshot
    ///
    /// Passed scenarios get `<scenario>.png`; failures and errors get an
    /// outcome suffix so the evidence of a bad run is never overwritten by a
    /// later good one.
    pub async fn store_final(
        &self,
        scenario: &str,
        outcome: &Outcome,
        data: &[u8],
    ) -> Result<PathBuf> {
        self.store(scenario, outcome.artifact_suffix(), data).await
    }

    /// Store an explicitly requested screenshot under its label
    pub async fn store_labeled(
        &self,
        scenario: &str,
        label: &str,
        data: &[u8],
    ) -> Result<PathBuf> {
        self.store(scenario, Some(label), data).await
    }

    async fn store(&self, scenario: &str, suffix: Option<&str>, data: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            HarnessError::Artifact(format!(
                "failed to create artifact directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let filename = match suffix {
            Some(suffix) => format!("{}-{}.png", sanitize(scenario), sanitize(suffix)),
            None => format!("{}.png", sanitize(scenario)),
        };
        let path = self.dir.join(filename);

        fs::write(&path, data).await.map_err(|e| {
            HarnessError::Artifact(format!("failed to write {}: {}", path.display(), e))
        })?;

        debug!("Stored artifact {} ({} bytes)", path.display(), data.len());
        Ok(path)
    }
}

/// Make a name filesystem-safe and deterministic
fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash && !out.is_empty() {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        out.push_str("unnamed");
    }
    out
}
