//! Cost arithmetic
//!
//! All figures are plain `f64` dollars. Nothing is rounded here; rounding to
//! cents happens only when a report is rendered.

use crate::types::PaymentOption;

/// Average hours in a month
pub const HOURS_PER_MONTH: f64 = 730.0;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Share of a partial-upfront reservation paid at purchase
const PARTIAL_UPFRONT_SHARE: f64 = 0.5;

/// Monthly cost of running one instance at `hourly` for a whole month
pub fn monthly_from_hourly(hourly: f64) -> f64 {
    hourly * HOURS_PER_MONTH
}

/// Cost of `months` at a fixed monthly rate
pub fn cost_for_months(monthly: f64, months: u32) -> f64 {
    monthly * f64::from(months)
}

/// Upfront/monthly split of a reservation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentSplit {
    pub upfront: f64,
    pub monthly: f64,
}

/// Split an amortized monthly cost according to the payment option
///
/// The split always reconstructs the full amortized total:
/// `upfront + monthly * months == amortized_monthly * months`.
pub fn payment_split(payment: PaymentOption, amortized_monthly: f64, months: u32) -> PaymentSplit {
    match payment {
        PaymentOption::NoUpfront => PaymentSplit {
            upfront: 0.0,
            monthly: amortized_monthly,
        },
        PaymentOption::PartialUpfront => PaymentSplit {
            upfront: cost_for_months(amortized_monthly, months) * PARTIAL_UPFRONT_SHARE,
            monthly: amortized_monthly * (1.0 - PARTIAL_UPFRONT_SHARE),
        },
        PaymentOption::AllUpfront => PaymentSplit {
            upfront: cost_for_months(amortized_monthly, months),
            monthly: 0.0,
        },
    }
}

/// Savings of a reservation against running On-Demand for the same term
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Savings {
    pub absolute: f64,
    pub percent: f64,
}

/// Savings against `on_demand_hourly` over `months`
///
/// The percentage is 0 when the On-Demand total is 0.
pub fn savings(on_demand_hourly: f64, cost_for_term: f64, months: u32) -> Savings {
    let on_demand_total = cost_for_months(monthly_from_hourly(on_demand_hourly), months);
    let absolute = on_demand_total - cost_for_term;
    let percent = if on_demand_total == 0.0 {
        0.0
    } else {
        absolute / on_demand_total * 100.0
    };
    Savings { absolute, percent }
}

/// Per-instance figures that get weighted by instance count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitCosts {
    pub upfront: f64,
    pub monthly: f64,
    pub amortized_monthly: f64,
    pub cost_for_term: f64,
}

/// Count-weighted totals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub upfront: f64,
    pub monthly: f64,
    pub amortized_monthly: f64,
    pub cost_for_term: f64,
}

pub fn weighted_totals(unit: UnitCosts, count: u32) -> Totals {
    let n = f64::from(count);
    Totals {
        upfront: unit.upfront * n,
        monthly: unit.monthly * n,
        amortized_monthly: unit.amortized_monthly * n,
        cost_for_term: unit.cost_for_term * n,
    }
}
