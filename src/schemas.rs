use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Directory holding the built frontend
    pub assets_dir: PathBuf,
}

impl AppState {
    pub fn new(assets_dir: impl AsRef<Path>) -> Self {
        Self {
            assets_dir: assets_dir.as_ref().to_path_buf(),
        }
    }

    pub fn index_path(&self) -> PathBuf {
        self.assets_dir.join("index.html")
    }

    pub fn has_index(&self) -> bool {
        self.index_path().is_file()
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Application version
    pub version: String,
    /// Whether the frontend bundle is present
    pub frontend: String,
}
