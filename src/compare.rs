//! One comparison run: fetch, normalize, aggregate
//!
//! This is the only place where the pricing engine meets the external
//! sources. Inventory is fetched first (no point downloading the dataset for
//! an empty region), then the dataset; either failure ends the run.

use crate::dataset::PriceDataset;
use crate::diagnostics::{PricingEvent, Reporter};
use crate::error::{RdsriError, Result};
use crate::inventory::InventoryCount;
use crate::pricing::{aggregate_by_term_and_engine, price_inventory, HorizonRecords};
use crate::sources::{InventorySource, PricingSource};
use crate::types::{CostRecord, Engine, TermLength};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result of one run, before presentation
#[derive(Debug, Clone)]
pub struct Comparison {
    pub region: String,
    pub generated_at: DateTime<Utc>,
    pub inventory: InventoryCount,
    pub records: HorizonRecords,
}

/// Aggregated records of one engine for one reservation term
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineView {
    pub engine: Engine,
    pub term: TermLength,
    pub records: Vec<CostRecord>,
}

impl Comparison {
    /// Price an inventory against an already loaded dataset
    pub fn build(
        region: &str,
        inventory: InventoryCount,
        dataset: &PriceDataset,
        reporter: &dyn Reporter,
    ) -> Self {
        let points = dataset.price_points_for(region, &inventory);
        let records = price_inventory(&points, &inventory, region, reporter);
        Self {
            region: region.to_string(),
            generated_at: Utc::now(),
            inventory,
            records,
        }
    }

    /// One view per known engine in the inventory for `term`
    pub fn views(&self, term: TermLength) -> Vec<EngineView> {
        self.inventory
            .engines()
            .into_iter()
            .filter(Engine::is_known)
            .map(|engine| EngineView {
                engine,
                term,
                records: aggregate_by_term_and_engine(
                    self.records.for_term(term),
                    &self.inventory,
                    term,
                    engine,
                ),
            })
            .collect()
    }

    /// Views for both terms, 1-year first
    pub fn all_views(&self) -> Vec<EngineView> {
        TermLength::ALL
            .into_iter()
            .flat_map(|term| self.views(term))
            .collect()
    }
}

/// Fetch inventory and pricing for `region` and compare them
pub async fn run_comparison(
    region: &str,
    inventory_source: &dyn InventorySource,
    pricing_source: &dyn PricingSource,
    reporter: &dyn Reporter,
) -> Result<Comparison> {
    if region.trim().is_empty() {
        return Err(RdsriError::Validation {
            field: "region".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let instances = inventory_source.running_instances(region).await?;
    let inventory = InventoryCount::from_instances(&instances);
    reporter.report(&PricingEvent::InventoryLoaded {
        region: region.to_string(),
        observations: instances.len(),
        distinct_keys: inventory.len(),
    });

    if inventory.is_empty() {
        return Ok(Comparison {
            region: region.to_string(),
            generated_at: Utc::now(),
            inventory,
            records: HorizonRecords::default(),
        });
    }

    let dataset = pricing_source.fetch_dataset().await?;
    reporter.report(&PricingEvent::DatasetLoaded {
        location: pricing_source.location(),
        entries: dataset.len(),
    });

    Ok(Comparison::build(region, inventory, &dataset, reporter))
}
