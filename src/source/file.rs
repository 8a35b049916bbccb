//! File-based history source.
//!
//! Reads a saved `history.json`, e.g. one downloaded from the sensor with
//! `curl`, so the chart can be inspected without the device.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{FetchError, HistorySource};
use crate::data::Series;

/// A source that re-reads a JSON file on every fetch.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HistorySource for FileSource {
    async fn fetch(&self) -> Result<Series, FetchError> {
        let content = tokio::fs::read(&self.path).await?;
        let series = serde_json::from_slice(&content)?;
        Ok(series)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
