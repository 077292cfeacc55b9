//! Filesystem document source
//!
//! Reads the documents from a directory laid out like the dashboard's
//! static folder:
//!
//! ```text
//! <root>/status.json
//! <root>/data/dimensions.json
//! <root>/data/shab_monthly.json
//! ```

use super::source::{DocumentSource, LoadError};
use crate::data::{
    parse_dimensions, parse_facts, parse_status, DataError, DataVersion, Dimensions, RawFact,
    StatusDocument,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub const STATUS_FILE: &str = "status.json";
pub const DIMENSIONS_FILE: &str = "data/dimensions.json";
pub const FACTS_FILE: &str = "data/shab_monthly.json";

/// Reads documents from a static directory
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read(&self, document: &'static str, relative: &str) -> Result<Vec<u8>, LoadError> {
        let path = self.root.join(relative);
        tracing::debug!(path = %path.display(), "Reading {}", document);

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(LoadError::NotFound {
                document,
                path: path.display().to_string(),
            }),
            Err(e) => Err(LoadError::Data(DataError::Io(e))),
        }
    }
}

#[async_trait]
impl DocumentSource for FsSource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    async fn fetch_status(&self) -> Result<StatusDocument, LoadError> {
        let bytes = self.read("status", STATUS_FILE).await?;
        Ok(parse_status(&bytes)?)
    }

    // Files on disk are never stale, the version is not needed
    async fn fetch_dimensions(
        &self,
        _version: Option<&DataVersion>,
    ) -> Result<Dimensions, LoadError> {
        let bytes = self.read("dimensions.json", DIMENSIONS_FILE).await?;
        Ok(parse_dimensions(&bytes)?)
    }

    async fn fetch_facts(&self, _version: Option<&DataVersion>) -> Result<Vec<RawFact>, LoadError> {
        let bytes = self.read("shab_monthly.json", FACTS_FILE).await?;
        Ok(parse_facts(&bytes)?)
    }
}
