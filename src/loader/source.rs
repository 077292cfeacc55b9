//! Document sources and the load sequence

use crate::data::{DataError, DataSet, DataVersion, Dimensions, RawFact, StatusDocument};
use async_trait::async_trait;
use thiserror::Error;

/// Something that can hand out the three dashboard documents
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Short description for logs (URL or directory)
    fn describe(&self) -> String;

    /// The optional status document
    async fn fetch_status(&self) -> Result<StatusDocument, LoadError>;

    /// Month axis and canton set
    async fn fetch_dimensions(&self, version: Option<&DataVersion>)
        -> Result<Dimensions, LoadError>;

    /// Long-form fact rows
    async fn fetch_facts(&self, version: Option<&DataVersion>) -> Result<Vec<RawFact>, LoadError>;
}

/// Load everything a session needs, in order: status, dimensions, facts
///
/// Status failures are logged and ignored. Dimension or fact failures abort.
pub async fn load_data_set(source: &dyn DocumentSource) -> Result<DataSet, LoadError> {
    tracing::info!(source = %source.describe(), "Loading dashboard data");

    let status = match source.fetch_status().await {
        Ok(status) => Some(status),
        Err(e) => {
            tracing::warn!("Could not load status: {}", e);
            None
        }
    };
    let version = status.as_ref().and_then(|s| s.data_version.as_ref());

    let dimensions = source.fetch_dimensions(version).await?;
    tracing::debug!(
        months = dimensions.months.len(),
        cantons = dimensions.cantons.len(),
        "Dimensions loaded"
    );

    let facts = source.fetch_facts(version).await?;
    tracing::debug!(rows = facts.len(), "Facts loaded");

    Ok(DataSet::new(dimensions, facts, status))
}

/// Errors that abort loading a document
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request timeout: {url}")]
    Timeout { url: String },

    #[error("Missing {document} ({url} returned {status})")]
    Status {
        document: &'static str,
        url: String,
        status: u16,
    },

    #[error("Missing {document} ({path})")]
    NotFound { document: &'static str, path: String },

    #[error(transparent)]
    Data(#[from] DataError),
}

impl LoadError {
    /// Single human-readable line shown when initialization fails
    pub fn status_message(&self) -> String {
        format!("Error loading data: {}", self)
    }
}
