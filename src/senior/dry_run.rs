//! Dry-run sink: envelopes go to disk instead of the wire.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::submit::{BatchOutcome, BatchSubmitter};

/// Writes each batch envelope to `batch_NNN.xml` in a directory.
pub struct EnvelopeDirWriter {
    dir: PathBuf,
}

impl EnvelopeDirWriter {
    /// Creates the output directory if it does not exist yet.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        Ok(EnvelopeDirWriter { dir })
    }

    pub fn file_path(&self, batch: usize) -> PathBuf {
        self.dir.join(format!("batch_{batch:03}.xml"))
    }
}

#[async_trait]
impl BatchSubmitter for EnvelopeDirWriter {
    async fn submit(&self, batch: usize, envelope: &[u8]) -> Result<BatchOutcome> {
        let path = self.file_path(batch);
        std::fs::write(&path, envelope)
            .with_context(|| format!("Failed to write envelope: {}", path.display()))?;
        debug!("Wrote envelope to {}", path.display());

        Ok(BatchOutcome {
            result: Some("OK".to_string()),
            message: Some("dry-run".to_string()),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_writes_numbered_envelope_files() {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("envelopes");
        let writer = EnvelopeDirWriter::new(&out_dir).unwrap();

        let outcome = writer.submit(1, b"<one/>").await.unwrap();
        writer.submit(12, b"<twelve/>").await.unwrap();

        assert!(outcome.is_ok());
        assert_eq!(outcome.message.as_deref(), Some("dry-run"));
        assert_eq!(
            std::fs::read(out_dir.join("batch_001.xml")).unwrap(),
            b"<one/>"
        );
        assert!(out_dir.join("batch_012.xml").exists());
    }

    #[tokio::test]
    async fn test_existing_directory_is_reused() {
        let temp_dir = TempDir::new().unwrap();
        // Second construction over the same path must not fail.
        EnvelopeDirWriter::new(temp_dir.path()).unwrap();
        let writer = EnvelopeDirWriter::new(temp_dir.path()).unwrap();
        writer.submit(1, b"<x/>").await.unwrap();
    }
}
