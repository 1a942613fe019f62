use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

/// Persists the negotiation draft.
#[cfg_attr(test, mockall::automock)]
pub trait OutputSink: Send + Sync {
    fn write_draft(&self, draft: &str) -> Result<()>;
}

/// Writes the draft to a single file, replacing previous contents.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for FileSink {
    fn write_draft(&self, draft: &str) -> Result<()> {
        let mut file = File::create(&self.path)
            .with_context(|| format!("Failed to create {}", self.path.display()))?;
        file.write_all(draft.as_bytes())
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        file.flush()?;
        info!(path = %self.path.display(), "negotiation draft saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_draft() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("Negotiation_Draft.txt"));
        sink.write_draft("Dear Vendor,").unwrap();
        assert_eq!(std::fs::read_to_string(sink.path()).unwrap(), "Dear Vendor,");
    }

    #[test]
    fn overwrites_previous_draft() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("Negotiation_Draft.txt"));
        sink.write_draft("a much longer first draft").unwrap();
        sink.write_draft("second").unwrap();
        assert_eq!(std::fs::read_to_string(sink.path()).unwrap(), "second");
    }

    #[test]
    fn unwritable_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("missing-dir").join("draft.txt"));
        let err = sink.write_draft("x").unwrap_err();
        assert!(err.to_string().contains("Failed to create"));
    }
}
