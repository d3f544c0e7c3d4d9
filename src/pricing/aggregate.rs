//! Count-weighted aggregation of cost records
//!
//! The counts baked into records by the pipeline are whatever the caller
//! passed at normalization time. Both functions here re-read the count for
//! each record from the inventory and recompute every `total_*` field.

use crate::inventory::InventoryCount;
use crate::types::{CostRecord, Engine, TermLabel, TermLength};

/// Records of one engine for one term, plus that engine's On-Demand baseline
///
/// A record is kept when `record.engine == engine` and its term is either
/// `term` or On-Demand. Records whose key has no running instances are dropped.
pub fn aggregate_by_term_and_engine(
    records: &[CostRecord],
    inventory: &InventoryCount,
    term: TermLength,
    engine: Engine,
) -> Vec<CostRecord> {
    let label = term.label();
    records
        .iter()
        .filter(|r| r.engine == engine && (r.term == label || r.term == TermLabel::OnDemand))
        .filter_map(|r| with_inventory_count(r, inventory))
        .collect()
}

/// Rewrite counts and totals without filtering by term or engine
///
/// Used when the caller already narrowed the records down. Records whose key
/// is no longer in the inventory are dropped.
pub fn reconcile_counts(records: &[CostRecord], inventory: &InventoryCount) -> Vec<CostRecord> {
    records
        .iter()
        .filter_map(|r| with_inventory_count(r, inventory))
        .collect()
}

fn with_inventory_count(record: &CostRecord, inventory: &InventoryCount) -> Option<CostRecord> {
    match inventory.count(&record.key()) {
        0 => None,
        count => Some(record.with_count(count)),
    }
}
