//! External collaborators of the pricing engine
//!
//! The engine itself only needs two things per run: the running instances of
//! a region and the pricing dataset. Both are fetched exactly once through
//! the traits below; any failure aborts the run.
//!
//! Implementations:
//! - `rds`: `RdsInventory`, live inventory through the RDS API
//! - `file`: `FileInventory`, a JSON inventory snapshot for offline runs
//! - `pricing`: `HttpPricingSource` and `FilePricingSource` for the dataset

mod file;
mod pricing;
mod rds;

pub use file::FileInventory;
pub use pricing::{FilePricingSource, HttpPricingSource, DEFAULT_DATASET_URL};
pub use rds::RdsInventory;

use crate::dataset::PriceDataset;
use crate::error::Result;
use crate::types::RunningInstance;
use async_trait::async_trait;

/// Source of running database instances
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// One entry per running instance in `region`
    async fn running_instances(&self, region: &str) -> Result<Vec<RunningInstance>>;
}

/// Source of the raw pricing dataset
#[async_trait]
pub trait PricingSource: Send + Sync {
    /// Where the dataset comes from, for messages
    fn location(&self) -> String;

    async fn fetch_dataset(&self) -> Result<PriceDataset>;
}
