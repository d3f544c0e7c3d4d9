//! Type definitions shared across the pricing engine
//!
//! Contains the inventory observation types, the reserved-offering
//! enumerations and the `CostRecord` output unit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Database engine of a running instance
///
/// Only engines with a known pricing dataset key are priced. Everything else
/// is tagged `Unknown` and skipped by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Engine {
    MySQL,
    PostgreSQL,
    Unknown,
}

impl Engine {
    /// Map an RDS API engine string (e.g. `mysql`, `postgres`)
    pub fn from_rds_engine(engine: &str) -> Self {
        match engine.to_ascii_lowercase().as_str() {
            "mysql" => Engine::MySQL,
            "postgres" => Engine::PostgreSQL,
            _ => Engine::Unknown,
        }
    }

    /// Key of this engine inside a region entry of the pricing dataset
    pub fn dataset_key(&self) -> Option<&'static str> {
        match self {
            Engine::MySQL => Some("2"),
            Engine::PostgreSQL => Some("14"),
            Engine::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Engine::Unknown)
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::MySQL => write!(f, "MySQL"),
            Engine::PostgreSQL => write!(f, "PostgreSQL"),
            Engine::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A single observed database instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningInstance {
    pub instance_type: String,
    pub engine: Engine,
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

impl RunningInstance {
    pub fn new(instance_type: impl Into<String>, engine: Engine) -> Self {
        Self {
            instance_type: instance_type.into(),
            engine,
            count: 1,
        }
    }

    pub fn key(&self) -> InventoryKey {
        InventoryKey::new(self.instance_type.clone(), self.engine)
    }
}

/// Grouping key for inventory counts and cost records
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct InventoryKey {
    pub instance_type: String,
    pub engine: Engine,
}

impl InventoryKey {
    pub fn new(instance_type: impl Into<String>, engine: Engine) -> Self {
        Self {
            instance_type: instance_type.into(),
            engine,
        }
    }
}

impl fmt::Display for InventoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.instance_type, self.engine)
    }
}

/// Reservation term length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TermLength {
    OneYear,
    ThreeYear,
}

impl TermLength {
    pub const ALL: [TermLength; 2] = [TermLength::OneYear, TermLength::ThreeYear];

    pub fn years(&self) -> u32 {
        match self {
            TermLength::OneYear => 1,
            TermLength::ThreeYear => 3,
        }
    }

    pub fn months(&self) -> u32 {
        self.years() * crate::pricing::calculator::MONTHS_PER_YEAR
    }

    pub fn label(&self) -> TermLabel {
        match self {
            TermLength::OneYear => TermLabel::OneYear,
            TermLength::ThreeYear => TermLabel::ThreeYear,
        }
    }
}

impl fmt::Display for TermLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Reserved offering class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferingClass {
    Standard,
    Convertible,
}

impl fmt::Display for OfferingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfferingClass::Standard => write!(f, "Standard"),
            OfferingClass::Convertible => write!(f, "Convertible"),
        }
    }
}

/// How a reservation is paid for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentOption {
    NoUpfront,
    PartialUpfront,
    AllUpfront,
}

impl fmt::Display for PaymentOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentOption::NoUpfront => write!(f, "noUpfront"),
            PaymentOption::PartialUpfront => write!(f, "partialUpfront"),
            PaymentOption::AllUpfront => write!(f, "allUpfront"),
        }
    }
}

/// One of the 12 reserved rate slots of a price point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ReservedSlot {
    pub term: TermLength,
    pub offering: OfferingClass,
    pub payment: PaymentOption,
}

impl ReservedSlot {
    pub const fn new(term: TermLength, offering: OfferingClass, payment: PaymentOption) -> Self {
        Self {
            term,
            offering,
            payment,
        }
    }
}

impl fmt::Display for ReservedSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.term, self.offering, self.payment)
    }
}

/// Hourly reserved rates, one per slot. 0 means "not offered".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReservedRates {
    pub standard_no_upfront_1yr: f64,
    pub standard_partial_upfront_1yr: f64,
    pub standard_all_upfront_1yr: f64,
    pub standard_no_upfront_3yr: f64,
    pub standard_partial_upfront_3yr: f64,
    pub standard_all_upfront_3yr: f64,
    pub convertible_no_upfront_1yr: f64,
    pub convertible_partial_upfront_1yr: f64,
    pub convertible_all_upfront_1yr: f64,
    pub convertible_no_upfront_3yr: f64,
    pub convertible_partial_upfront_3yr: f64,
    pub convertible_all_upfront_3yr: f64,
}

impl ReservedRates {
    /// All 12 slots with their hourly rate, zero rates included
    pub fn slots(&self) -> [(ReservedSlot, f64); 12] {
        use OfferingClass::*;
        use PaymentOption::*;
        use TermLength::*;
        [
            (ReservedSlot::new(OneYear, Standard, NoUpfront), self.standard_no_upfront_1yr),
            (ReservedSlot::new(ThreeYear, Standard, NoUpfront), self.standard_no_upfront_3yr),
            (ReservedSlot::new(OneYear, Standard, PartialUpfront), self.standard_partial_upfront_1yr),
            (ReservedSlot::new(ThreeYear, Standard, PartialUpfront), self.standard_partial_upfront_3yr),
            (ReservedSlot::new(OneYear, Standard, AllUpfront), self.standard_all_upfront_1yr),
            (ReservedSlot::new(ThreeYear, Standard, AllUpfront), self.standard_all_upfront_3yr),
            (ReservedSlot::new(OneYear, Convertible, NoUpfront), self.convertible_no_upfront_1yr),
            (ReservedSlot::new(ThreeYear, Convertible, NoUpfront), self.convertible_no_upfront_3yr),
            (ReservedSlot::new(OneYear, Convertible, PartialUpfront), self.convertible_partial_upfront_1yr),
            (ReservedSlot::new(ThreeYear, Convertible, PartialUpfront), self.convertible_partial_upfront_3yr),
            (ReservedSlot::new(OneYear, Convertible, AllUpfront), self.convertible_all_upfront_1yr),
            (ReservedSlot::new(ThreeYear, Convertible, AllUpfront), self.convertible_all_upfront_3yr),
        ]
    }

    /// Set the rate of a single slot
    pub fn with_rate(mut self, slot: ReservedSlot, rate: f64) -> Self {
        use OfferingClass::*;
        use PaymentOption::*;
        use TermLength::*;
        let field = match (slot.term, slot.offering, slot.payment) {
            (OneYear, Standard, NoUpfront) => &mut self.standard_no_upfront_1yr,
            (OneYear, Standard, PartialUpfront) => &mut self.standard_partial_upfront_1yr,
            (OneYear, Standard, AllUpfront) => &mut self.standard_all_upfront_1yr,
            (ThreeYear, Standard, NoUpfront) => &mut self.standard_no_upfront_3yr,
            (ThreeYear, Standard, PartialUpfront) => &mut self.standard_partial_upfront_3yr,
            (ThreeYear, Standard, AllUpfront) => &mut self.standard_all_upfront_3yr,
            (OneYear, Convertible, NoUpfront) => &mut self.convertible_no_upfront_1yr,
            (OneYear, Convertible, PartialUpfront) => &mut self.convertible_partial_upfront_1yr,
            (OneYear, Convertible, AllUpfront) => &mut self.convertible_all_upfront_1yr,
            (ThreeYear, Convertible, NoUpfront) => &mut self.convertible_no_upfront_3yr,
            (ThreeYear, Convertible, PartialUpfront) => &mut self.convertible_partial_upfront_3yr,
            (ThreeYear, Convertible, AllUpfront) => &mut self.convertible_all_upfront_3yr,
        };
        *field = rate;
        self
    }
}

/// Raw prices for one instance type, engine and region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawPricePoint {
    pub instance_type: String,
    pub region: String,
    pub engine: Engine,
    pub on_demand_hourly: f64,
    pub reserved: ReservedRates,
}

impl RawPricePoint {
    pub fn new(
        instance_type: impl Into<String>,
        region: impl Into<String>,
        engine: Engine,
        on_demand_hourly: f64,
    ) -> Self {
        Self {
            instance_type: instance_type.into(),
            region: region.into(),
            engine,
            on_demand_hourly,
            reserved: ReservedRates::default(),
        }
    }

    pub fn with_reserved(mut self, slot: ReservedSlot, rate: f64) -> Self {
        self.reserved = self.reserved.with_rate(slot, rate);
        self
    }

    pub fn key(&self) -> InventoryKey {
        InventoryKey::new(self.instance_type.clone(), self.engine)
    }
}

/// Term column of a cost record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TermLabel {
    #[serde(rename = "On-Demand")]
    OnDemand,
    #[serde(rename = "1 Year")]
    OneYear,
    #[serde(rename = "3 Year")]
    ThreeYear,
}

impl fmt::Display for TermLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermLabel::OnDemand => write!(f, "On-Demand"),
            TermLabel::OneYear => write!(f, "1 Year"),
            TermLabel::ThreeYear => write!(f, "3 Year"),
        }
    }
}

/// Normalized cost breakdown for one instance type under one pricing option
///
/// Per-instance figures are fixed at creation. `count` and the `total_*`
/// fields are rewritten by the aggregation step through [`CostRecord::with_count`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostRecord {
    pub region: String,
    pub instance_type: String,
    pub engine: Engine,
    pub term: TermLabel,
    /// `None` for On-Demand
    pub offering: Option<OfferingClass>,
    /// `None` for On-Demand
    pub payment_option: Option<PaymentOption>,
    /// Months covered by `cost_for_term` (12 or 36)
    pub months_in_term: u32,
    pub count: u32,
    pub amortized_monthly_cost: f64,
    pub monthly_cost: f64,
    pub upfront_cost: f64,
    pub cost_for_term: f64,
    pub savings: f64,
    pub savings_percent: f64,
    pub total_upfront_cost: f64,
    pub total_monthly_cost: f64,
    pub total_amortized_monthly_cost: f64,
    pub total_cost_for_term: f64,
}

impl CostRecord {
    pub fn key(&self) -> InventoryKey {
        InventoryKey::new(self.instance_type.clone(), self.engine)
    }

    pub fn is_on_demand(&self) -> bool {
        self.term == TermLabel::OnDemand
    }

    /// Payment option column text (`N/A` for On-Demand)
    pub fn payment_label(&self) -> String {
        self.payment_option
            .map(|p| p.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    /// Offering class column text (`N/A` for On-Demand)
    pub fn offering_label(&self) -> String {
        self.offering
            .map(|o| o.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    /// Copy of this record with `count` and every count-weighted total recomputed
    pub fn with_count(&self, count: u32) -> Self {
        let totals = crate::pricing::calculator::weighted_totals(
            crate::pricing::calculator::UnitCosts {
                upfront: self.upfront_cost,
                monthly: self.monthly_cost,
                amortized_monthly: self.amortized_monthly_cost,
                cost_for_term: self.cost_for_term,
            },
            count,
        );
        Self {
            count,
            total_upfront_cost: totals.upfront,
            total_monthly_cost: totals.monthly,
            total_amortized_monthly_cost: totals.amortized_monthly,
            total_cost_for_term: totals.cost_for_term,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_mapping() {
        assert_eq!(Engine::from_rds_engine("mysql"), Engine::MySQL);
        assert_eq!(Engine::from_rds_engine("postgres"), Engine::PostgreSQL);
        assert_eq!(Engine::from_rds_engine("aurora-mysql"), Engine::Unknown);
        assert_eq!(Engine::from_rds_engine("oracle-ee"), Engine::Unknown);
        assert_eq!(Engine::Unknown.dataset_key(), None);
    }

    #[test]
    fn test_reserved_slots_are_distinct() {
        let slots = ReservedRates::default().slots();
        let unique: std::collections::HashSet<_> = slots.iter().map(|(s, _)| *s).collect();
        assert_eq!(unique.len(), 12);
    }

    #[test]
    fn test_with_rate_targets_one_slot() {
        let slot = ReservedSlot::new(
            TermLength::ThreeYear,
            OfferingClass::Convertible,
            PaymentOption::PartialUpfront,
        );
        let rates = ReservedRates::default().with_rate(slot, 0.42);
        let non_zero: Vec<_> = rates.slots().into_iter().filter(|(_, r)| *r > 0.0).collect();
        assert_eq!(non_zero, vec![(slot, 0.42)]);
    }

    #[test]
    fn test_term_months() {
        assert_eq!(TermLength::OneYear.months(), 12);
        assert_eq!(TermLength::ThreeYear.months(), 36);
        assert_eq!(TermLength::ThreeYear.to_string(), "3 Year");
    }

    #[test]
    fn test_labels() {
        assert_eq!(PaymentOption::PartialUpfront.to_string(), "partialUpfront");
        assert_eq!(TermLabel::OnDemand.to_string(), "On-Demand");
        assert_eq!(
            serde_json::to_string(&TermLabel::OneYear).unwrap(),
            "\"1 Year\""
        );
    }
}
