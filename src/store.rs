use std::path::{Path, PathBuf};

use crate::error::Result;

/// Flat filesystem area holding raw uploaded document bytes
///
/// Files are keyed by sanitized filename only, with no per-user namespacing:
/// two users uploading `notes.pdf` share one slot and the last write wins.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Create the store directory if it doesn't exist
    pub async fn ensure_root(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    pub fn path_for(&self, stored_name: &str) -> PathBuf {
        self.root.join(stored_name)
    }

    /// Write document bytes under a sanitized name, replacing any existing
    /// file of that name
    pub async fn save(&self, stored_name: &str, bytes: &[u8]) -> Result<()> {
        tokio::fs::write(self.path_for(stored_name), bytes).await?;
        Ok(())
    }

    /// Read back a stored document
    pub async fn load(&self, stored_name: &str) -> Result<Vec<u8>> {
        let bytes = tokio::fs::read(self.path_for(stored_name)).await?;
        Ok(bytes)
    }
}

/// Reduce a client-supplied filename to a safe single path component
///
/// Everything up to the last `/` or `\` is dropped, characters outside
/// `[A-Za-z0-9._-]` become `_`, and leading or trailing dots and underscores
/// are trimmed. Returns None when nothing usable remains, which callers
/// treat as a rejected upload.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
