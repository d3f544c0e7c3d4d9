//! Pricing dataset retrieval

use super::PricingSource;
use crate::dataset::PriceDataset;
use crate::error::{RdsriError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Public RDS pricing dataset
pub const DEFAULT_DATASET_URL: &str = "https://instances.vantage.sh/rds/instances.json";

/// Downloads the dataset over HTTP(S)
pub struct HttpPricingSource {
    url: String,
    timeout: Duration,
}

impl HttpPricingSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl PricingSource for HttpPricingSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    async fn fetch_dataset(&self) -> Result<PriceDataset> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| RdsriError::pricing(&self.url, "Failed to build HTTP client", e))?;

        debug!("Downloading pricing dataset from {}", self.url);
        let response = client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| RdsriError::pricing(&self.url, "Request failed", e))?;

        response
            .json::<PriceDataset>()
            .await
            .map_err(|e| RdsriError::pricing(&self.url, "Invalid dataset", e))
    }
}

/// Reads a previously downloaded copy of the dataset
pub struct FilePricingSource {
    path: PathBuf,
}

impl FilePricingSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PricingSource for FilePricingSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_dataset(&self) -> Result<PriceDataset> {
        let location = self.location();
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| RdsriError::pricing(&location, "Failed to read dataset file", e))?;
        serde_json::from_str(&content)
            .map_err(|e| RdsriError::pricing(&location, "Invalid dataset", e))
    }
}
