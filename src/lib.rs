//! rdsri library
//!
//! Compares On-Demand and Reserved Instance pricing for the RDS instances
//! currently running in a region.
//!
//! The pricing engine (`inventory`, `pricing`) is synchronous and I/O free;
//! `sources` fetches the inventory and the pricing dataset, `compare` ties a
//! run together and `report` renders it.

pub mod compare;
pub mod config;
pub mod dataset;
pub mod diagnostics;
pub mod error;
pub mod exit_codes;
pub mod inventory;
pub mod pricing;
pub mod report;
pub mod sources;
pub mod types;

// Re-export commonly used types
pub use compare::{run_comparison, Comparison, EngineView};
pub use inventory::InventoryCount;
pub use types::{CostRecord, Engine, RawPricePoint, RunningInstance, TermLabel, TermLength};
