//! Live inventory from the RDS API

use super::InventorySource;
use crate::error::{RdsriError, Result};
use crate::types::{Engine, RunningInstance};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_rds::Client as RdsClient;
use tracing::debug;

/// RDS status of an instance that is up and billed
const AVAILABLE_STATUS: &str = "available";

/// Lists `available` DB instances with `DescribeDBInstances`
pub struct RdsInventory {
    profile: Option<String>,
}

impl RdsInventory {
    pub fn new(profile: Option<String>) -> Self {
        Self { profile }
    }

    async fn client(&self, region: &str) -> RdsClient {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_sdk_rds::config::Region::new(region.to_string()));
        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }
        let sdk_config = loader.load().await;
        RdsClient::new(&sdk_config)
    }
}

#[async_trait]
impl InventorySource for RdsInventory {
    async fn running_instances(&self, region: &str) -> Result<Vec<RunningInstance>> {
        let client = self.client(region).await;
        let mut instances = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let response = client
                .describe_db_instances()
                .set_marker(marker.take())
                .send()
                .await
                .map_err(|e| RdsriError::inventory(region, "Failed to describe DB instances", e))?;

            for db in response.db_instances() {
                if db.db_instance_status() != Some(AVAILABLE_STATUS) {
                    continue;
                }
                let Some(class) = db.db_instance_class() else {
                    continue;
                };
                let engine = Engine::from_rds_engine(db.engine().unwrap_or_default());
                instances.push(RunningInstance::new(class, engine));
            }

            marker = response.marker().map(str::to_string);
            if marker.is_none() {
                break;
            }
        }

        debug!("Found {} available DB instances in {}", instances.len(), region);
        Ok(instances)
    }
}
