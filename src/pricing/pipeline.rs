//! Normalize every running instance type into 1-year and 3-year views

use super::normalizer::normalize;
use crate::diagnostics::{PricingEvent, Reporter};
use crate::inventory::InventoryCount;
use crate::types::{CostRecord, InventoryKey, RawPricePoint, TermLength};
use std::collections::HashSet;

/// Cost records for both reservation horizons
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HorizonRecords {
    pub one_year: Vec<CostRecord>,
    pub three_year: Vec<CostRecord>,
}

impl HorizonRecords {
    pub fn for_term(&self, term: TermLength) -> &[CostRecord] {
        match term {
            TermLength::OneYear => &self.one_year,
            TermLength::ThreeYear => &self.three_year,
        }
    }

    fn for_term_mut(&mut self, term: TermLength) -> &mut Vec<CostRecord> {
        match term {
            TermLength::OneYear => &mut self.one_year,
            TermLength::ThreeYear => &mut self.three_year,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.one_year.is_empty() && self.three_year.is_empty()
    }
}

/// Price every (instance type, engine) pair of `inventory` found in `points`
///
/// Points are walked in dataset order. Each key is normalized once, using the
/// first matching point; later duplicates are reported and ignored. Unknown
/// engines and keys without a price point are reported and produce nothing.
pub fn price_inventory(
    points: &[RawPricePoint],
    inventory: &InventoryCount,
    region: &str,
    reporter: &dyn Reporter,
) -> HorizonRecords {
    let mut records = HorizonRecords::default();
    let mut seen: HashSet<InventoryKey> = HashSet::new();

    for point in points.iter().filter(|p| p.region == region) {
        let key = point.key();
        let count = inventory.count(&key);
        if count == 0 || !key.engine.is_known() {
            continue;
        }
        if !seen.insert(key.clone()) {
            reporter.report(&PricingEvent::DuplicatePricePoint { key });
            continue;
        }

        let normalized = normalize(point, count, reporter);
        for term in TermLength::ALL {
            records
                .for_term_mut(term)
                .extend(normalized.horizon(term));
        }
    }

    for (key, count) in inventory.iter() {
        if !key.engine.is_known() {
            reporter.report(&PricingEvent::UnknownEngine {
                instance_type: key.instance_type.clone(),
                count,
            });
        } else if !seen.contains(key) {
            reporter.report(&PricingEvent::MissingPriceData {
                instance_type: key.instance_type.clone(),
                engine: key.engine,
                region: region.to_string(),
            });
        }
    }

    records
}
