//! Pricing normalization and aggregation engine
//!
//! ## Module Organization
//!
//! - `calculator`: pure arithmetic (hourly to monthly, payment splits, savings)
//! - `normalizer`: one raw price point into On-Demand and Reserved cost records
//! - `pipeline`: normalizes every running (instance type, engine) pair into
//!   the 1-year and 3-year collections
//! - `aggregate`: rewrites counts and totals from the authoritative inventory
//!
//! Everything here is synchronous and free of I/O. Fetching inventory and
//! pricing data lives in `crate::sources`.

pub mod aggregate;
pub mod calculator;
pub mod normalizer;
pub mod pipeline;

pub use aggregate::{aggregate_by_term_and_engine, reconcile_counts};
pub use calculator::HOURS_PER_MONTH;
pub use normalizer::{normalize, NormalizedPricing};
pub use pipeline::{price_inventory, HorizonRecords};
