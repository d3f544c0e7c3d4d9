//! Inventory snapshot read from disk

use super::InventorySource;
use crate::error::{RdsriError, Result};
use crate::types::RunningInstance;
use async_trait::async_trait;
use std::path::PathBuf;

/// JSON array of [`RunningInstance`] observations
///
/// `count` defaults to 1 when omitted, so a snapshot can list one object per
/// instance or pre-aggregated entries. The region argument is ignored.
pub struct FileInventory {
    path: PathBuf,
}

impl FileInventory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl InventorySource for FileInventory {
    async fn running_instances(&self, region: &str) -> Result<Vec<RunningInstance>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            RdsriError::inventory(
                region,
                format!("Failed to read inventory file {}", self.path.display()),
                e,
            )
        })?;
        serde_json::from_str(&content).map_err(|e| {
            RdsriError::inventory(
                region,
                format!("Failed to parse inventory file {}", self.path.display()),
                e,
            )
        })
    }
}
