//! Editor sources
//!
//! The submitter never holds on to configuration text: it asks its editor
//! for the current value at the moment of each submission.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tokio::io::AsyncReadExt;

use crate::{Error, Result};

/// Something that can report the text it currently holds
#[async_trait::async_trait]
pub trait EditorSource: Send + Sync {
    /// Current editor contents
    async fn current_text(&self) -> Result<String>;

    /// Name used in logs and errors
    fn describe(&self) -> String;
}

/// Editor backed by a file on disk, re-read on every call
#[derive(Debug, Clone)]
pub struct FileEditor {
    path: PathBuf,
}

impl FileEditor {
    /// Create a file editor for `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path being read
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl EditorSource for FileEditor {
    async fn current_text(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::editor(self.describe(), e.to_string()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Editor reading standard input to the end
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinEditor;

#[async_trait::async_trait]
impl EditorSource for StdinEditor {
    async fn current_text(&self) -> Result<String> {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .map_err(|e| Error::editor(self.describe(), e.to_string()))?;
        Ok(text)
    }

    fn describe(&self) -> String {
        "stdin".to_string()
    }
}

/// Shared in-memory buffer. Clones see the same text.
#[derive(Debug, Clone, Default)]
pub struct MemoryEditor {
    text: Arc<RwLock<String>>,
}

impl MemoryEditor {
    /// Create an editor holding `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Arc::new(RwLock::new(text.into())),
        }
    }

    /// Replace the buffer contents
    pub fn set_text(&self, text: impl Into<String>) {
        let mut guard = self.text.write().unwrap_or_else(|e| e.into_inner());
        *guard = text.into();
    }
}

#[async_trait::async_trait]
impl EditorSource for MemoryEditor {
    async fn current_text(&self) -> Result<String> {
        let guard = self.text.read().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Pick the editor for a CLI path argument; `-` means stdin
pub fn editor_for_path(path: &str) -> Box<dyn EditorSource> {
    if path == "-" {
        Box::new(StdinEditor)
    } else {
        Box::new(FileEditor::new(path))
    }
}
