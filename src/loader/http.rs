//! HTTP document source
//!
//! Fetches the documents from the dashboard server with `reqwest`. The data
//! version from the status document is appended as `?v=<version>` so stale
//! browser or proxy caches are bypassed after a refresh.

use super::source::{DocumentSource, LoadError};
use crate::config::SourceConfig;
use crate::data::{
    parse_dimensions, parse_facts, parse_status, DataVersion, Dimensions, RawFact, StatusDocument,
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Fetches documents over HTTP
pub struct HttpSource {
    client: Client,
    config: SourceConfig,
}

impl HttpSource {
    /// Create a new source with the given configuration
    pub fn new(config: SourceConfig) -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Absolute URL for a path, with the cache-busting version when known
    pub fn document_url(&self, path: &str, version: Option<&DataVersion>) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        match version {
            Some(v) => format!(
                "{}/{}?v={}",
                base,
                path,
                urlencoding::encode(&v.to_string())
            ),
            None => format!("{}/{}", base, path),
        }
    }

    async fn get_bytes(&self, document: &'static str, url: &str) -> Result<Vec<u8>, LoadError> {
        tracing::debug!(%url, "Fetching {}", document);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                LoadError::Timeout {
                    url: url.to_string(),
                }
            } else {
                LoadError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                document,
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    fn describe(&self) -> String {
        self.config.base_url.clone()
    }

    async fn fetch_status(&self) -> Result<StatusDocument, LoadError> {
        let url = self.document_url(&self.config.status_path, None);
        let bytes = self.get_bytes("status", &url).await?;
        Ok(parse_status(&bytes)?)
    }

    async fn fetch_dimensions(
        &self,
        version: Option<&DataVersion>,
    ) -> Result<Dimensions, LoadError> {
        let url = self.document_url(&self.config.dimensions_path, version);
        let bytes = self.get_bytes("dimensions.json", &url).await?;
        Ok(parse_dimensions(&bytes)?)
    }

    async fn fetch_facts(&self, version: Option<&DataVersion>) -> Result<Vec<RawFact>, LoadError> {
        let url = self.document_url(&self.config.facts_path, version);
        let bytes = self.get_bytes("shab_monthly.json", &url).await?;
        Ok(parse_facts(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base_url: &str) -> HttpSource {
        HttpSource::new(SourceConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_document_url_without_version() {
        let source = source("http://localhost:5000/");
        assert_eq!(
            source.document_url("/static/data/dimensions.json", None),
            "http://localhost:5000/static/data/dimensions.json"
        );
    }

    #[test]
    fn test_document_url_with_version() {
        let source = source("http://localhost:5000");
        let version = DataVersion::Number(1700000000);
        assert_eq!(
            source.document_url("/static/data/shab_monthly.json", Some(&version)),
            "http://localhost:5000/static/data/shab_monthly.json?v=1700000000"
        );

        let version = DataVersion::Text("2024 03&x".into());
        assert_eq!(
            source.document_url("data.json", Some(&version)),
            "http://localhost:5000/data.json?v=2024%2003%26x"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_error() {
        // Port 9 (discard) is closed on test machines
        let source = HttpSource::new(SourceConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: 2,
            ..Default::default()
        })
        .unwrap();

        assert!(source.fetch_dimensions(None).await.is_err());
        assert!(source.fetch_status().await.is_err());
    }
}
