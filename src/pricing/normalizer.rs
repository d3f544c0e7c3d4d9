//! Raw price point to cost records

use super::calculator::{self, UnitCosts};
use crate::diagnostics::{PricingEvent, Reporter};
use crate::types::{CostRecord, RawPricePoint, ReservedSlot, TermLabel, TermLength};

/// Every cost record derived from one price point
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPricing {
    /// On-Demand baseline for the 1-year view (12-month cost for term)
    pub on_demand_one_year: CostRecord,
    /// On-Demand baseline for the 3-year view (36-month cost for term)
    pub on_demand_three_year: CostRecord,
    /// One record per offered reserved slot, in slot order
    pub reserved: Vec<CostRecord>,
}

impl NormalizedPricing {
    pub fn on_demand(&self, term: TermLength) -> &CostRecord {
        match term {
            TermLength::OneYear => &self.on_demand_one_year,
            TermLength::ThreeYear => &self.on_demand_three_year,
        }
    }

    /// Records belonging to one horizon: its On-Demand baseline first, then
    /// the reserved records of that term
    pub fn horizon(&self, term: TermLength) -> Vec<CostRecord> {
        let label = term.label();
        std::iter::once(self.on_demand(term).clone())
            .chain(self.reserved.iter().filter(|r| r.term == label).cloned())
            .collect()
    }
}

/// Derive the On-Demand and Reserved cost records for one price point
///
/// Reserved slots with a zero rate are not offered and yield no record.
pub fn normalize(point: &RawPricePoint, count: u32, reporter: &dyn Reporter) -> NormalizedPricing {
    let reserved: Vec<CostRecord> = point
        .reserved
        .slots()
        .into_iter()
        .filter_map(|(slot, rate)| {
            if rate > 0.0 {
                Some(reserved_record(point, slot, rate, count))
            } else {
                reporter.report(&PricingEvent::OfferingNotAvailable {
                    instance_type: point.instance_type.clone(),
                    slot,
                });
                None
            }
        })
        .collect();

    reporter.report(&PricingEvent::Normalized {
        key: point.key(),
        count,
        reserved_records: reserved.len(),
    });

    NormalizedPricing {
        on_demand_one_year: on_demand_record(point, TermLength::OneYear, count),
        on_demand_three_year: on_demand_record(point, TermLength::ThreeYear, count),
        reserved,
    }
}

/// On-Demand baseline for the view spanning `horizon`
pub fn on_demand_record(point: &RawPricePoint, horizon: TermLength, count: u32) -> CostRecord {
    let months = horizon.months();
    let monthly = calculator::monthly_from_hourly(point.on_demand_hourly);

    build_record(
        point,
        TermLabel::OnDemand,
        None,
        months,
        count,
        UnitCosts {
            upfront: 0.0,
            monthly,
            amortized_monthly: monthly,
            cost_for_term: calculator::cost_for_months(monthly, months),
        },
        calculator::Savings {
            absolute: 0.0,
            percent: 0.0,
        },
    )
}

/// Reserved record for one offered slot
pub fn reserved_record(
    point: &RawPricePoint,
    slot: ReservedSlot,
    hourly: f64,
    count: u32,
) -> CostRecord {
    let months = slot.term.months();
    let amortized_monthly = calculator::monthly_from_hourly(hourly);
    let split = calculator::payment_split(slot.payment, amortized_monthly, months);
    let cost_for_term = calculator::cost_for_months(amortized_monthly, months);
    let savings = calculator::savings(point.on_demand_hourly, cost_for_term, months);

    build_record(
        point,
        slot.term.label(),
        Some(slot),
        months,
        count,
        UnitCosts {
            upfront: split.upfront,
            monthly: split.monthly,
            amortized_monthly,
            cost_for_term,
        },
        savings,
    )
}

fn build_record(
    point: &RawPricePoint,
    term: TermLabel,
    slot: Option<ReservedSlot>,
    months_in_term: u32,
    count: u32,
    unit: UnitCosts,
    savings: calculator::Savings,
) -> CostRecord {
    let totals = calculator::weighted_totals(unit, count);
    CostRecord {
        region: point.region.clone(),
        instance_type: point.instance_type.clone(),
        engine: point.engine,
        term,
        offering: slot.map(|s| s.offering),
        payment_option: slot.map(|s| s.payment),
        months_in_term,
        count,
        amortized_monthly_cost: unit.amortized_monthly,
        monthly_cost: unit.monthly,
        upfront_cost: unit.upfront,
        cost_for_term: unit.cost_for_term,
        savings: savings.absolute,
        savings_percent: savings.percent,
        total_upfront_cost: totals.upfront,
        total_monthly_cost: totals.monthly,
        total_amortized_monthly_cost: totals.amortized_monthly,
        total_cost_for_term: totals.cost_for_term,
    }
}
