//! File layout of a data directory.

use std::path::{Path, PathBuf};

pub const CATALOG_FILE: &str = "procedures.json";
pub const CONFIG_FILE: &str = "config.json";
pub const HISTORY_FILE: &str = "checklist_history.json";
pub const DOCUMENTS_DIR: &str = "documents";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn catalog(&self) -> PathBuf {
        self.root.join(CATALOG_FILE)
    }

    pub fn config(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn history(&self) -> PathBuf {
        self.root.join(HISTORY_FILE)
    }

    /// Where generated PDFs go.
    pub fn documents(&self) -> PathBuf {
        self.root.join(DOCUMENTS_DIR)
    }
}
