//! Tests for the pricing engine: normalization, pipeline and aggregation
//!
//! Covers the worked db.r5.large scenarios, count scaling, and the
//! non-fatal skip paths (unknown engine, missing price data, duplicates).

use rdsri::diagnostics::{NoopReporter, PricingEvent, Reporter};
use rdsri::pricing::{aggregate_by_term_and_engine, normalize, price_inventory};
use rdsri::types::{
    Engine, InventoryKey, OfferingClass, PaymentOption, RawPricePoint, ReservedSlot,
    RunningInstance, TermLabel, TermLength,
};
use rdsri::InventoryCount;
use std::cell::RefCell;

const REGION: &str = "us-east-1";

fn slot(term: TermLength, offering: OfferingClass, payment: PaymentOption) -> ReservedSlot {
    ReservedSlot::new(term, offering, payment)
}

fn r5_large() -> RawPricePoint {
    RawPricePoint::new("db.r5.large", REGION, Engine::MySQL, 0.24)
        .with_reserved(
            slot(TermLength::OneYear, OfferingClass::Standard, PaymentOption::NoUpfront),
            0.15,
        )
        .with_reserved(
            slot(TermLength::OneYear, OfferingClass::Standard, PaymentOption::AllUpfront),
            0.12,
        )
}

fn assert_money(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.005,
        "expected {:.2}, got {}",
        expected,
        actual
    );
}

#[derive(Default)]
struct CollectingReporter {
    events: RefCell<Vec<PricingEvent>>,
}

impl Reporter for CollectingReporter {
    fn report(&self, event: &PricingEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

impl CollectingReporter {
    fn count(&self, pred: impl Fn(&PricingEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }
}

#[test]
fn test_single_instance_no_upfront_scenario() {
    let normalized = normalize(&r5_large(), 1, &NoopReporter);

    let on_demand = &normalized.on_demand_one_year;
    assert_money(on_demand.monthly_cost, 175.20);
    assert_money(on_demand.cost_for_term, 2102.40);
    assert_eq!(on_demand.upfront_cost, 0.0);
    assert_eq!(on_demand.savings, 0.0);
    assert_eq!(on_demand.savings_percent, 0.0);

    let no_upfront = normalized
        .reserved
        .iter()
        .find(|r| r.payment_option == Some(PaymentOption::NoUpfront))
        .unwrap();
    assert_eq!(no_upfront.term, TermLabel::OneYear);
    assert_money(no_upfront.amortized_monthly_cost, 109.50);
    assert_money(no_upfront.monthly_cost, 109.50);
    assert_eq!(no_upfront.upfront_cost, 0.0);
    assert_money(no_upfront.cost_for_term, 1314.00);
    assert_money(no_upfront.savings, 788.40);
    assert_money(no_upfront.savings_percent, 37.50);
}

#[test]
fn test_single_instance_all_upfront_scenario() {
    let normalized = normalize(&r5_large(), 1, &NoopReporter);

    let all_upfront = normalized
        .reserved
        .iter()
        .find(|r| r.payment_option == Some(PaymentOption::AllUpfront))
        .unwrap();
    assert_money(all_upfront.amortized_monthly_cost, 87.60);
    assert_money(all_upfront.upfront_cost, 1051.20);
    assert_eq!(all_upfront.monthly_cost, 0.0);
    assert_money(all_upfront.cost_for_term, 1051.20);
    assert_money(all_upfront.total_upfront_cost, 1051.20);
}

#[test]
fn test_three_instances_scale_totals_only() {
    let one = normalize(&r5_large(), 1, &NoopReporter);
    let three = normalize(&r5_large(), 3, &NoopReporter);

    let pairs = std::iter::once((&one.on_demand_one_year, &three.on_demand_one_year))
        .chain(std::iter::once((&one.on_demand_three_year, &three.on_demand_three_year)))
        .chain(one.reserved.iter().zip(three.reserved.iter()));

    for (a, b) in pairs {
        assert_eq!(b.count, 3);
        assert_eq!(a.monthly_cost, b.monthly_cost);
        assert_eq!(a.upfront_cost, b.upfront_cost);
        assert_eq!(a.cost_for_term, b.cost_for_term);
        assert_eq!(a.savings, b.savings);
        assert_money(b.total_monthly_cost, a.total_monthly_cost * 3.0);
        assert_money(b.total_upfront_cost, a.total_upfront_cost * 3.0);
        assert_money(b.total_amortized_monthly_cost, a.total_amortized_monthly_cost * 3.0);
        assert_money(b.total_cost_for_term, a.total_cost_for_term * 3.0);
    }
}

#[test]
fn test_zero_count_keeps_unit_costs() {
    let normalized = normalize(&r5_large(), 0, &NoopReporter);
    let on_demand = &normalized.on_demand_one_year;
    assert_money(on_demand.monthly_cost, 175.20);
    assert_eq!(on_demand.total_monthly_cost, 0.0);
    assert_eq!(on_demand.total_cost_for_term, 0.0);
}

#[test]
fn test_zero_rate_slots_are_omitted() {
    let normalized = normalize(&r5_large(), 1, &NoopReporter);
    assert_eq!(normalized.reserved.len(), 2);
    assert!(normalized.reserved.iter().all(|r| r.upfront_cost >= 0.0));
    assert!(normalized
        .reserved
        .iter()
        .all(|r| r.offering == Some(OfferingClass::Standard)));
}

#[test]
fn test_pipeline_splits_horizons() {
    let point = r5_large().with_reserved(
        slot(TermLength::ThreeYear, OfferingClass::Convertible, PaymentOption::PartialUpfront),
        0.11,
    );
    let inventory = InventoryCount::from_instances(&[
        RunningInstance::new("db.r5.large", Engine::MySQL),
        RunningInstance::new("db.r5.large", Engine::MySQL),
    ]);

    let records = price_inventory(&[point], &inventory, REGION, &NoopReporter);

    // On-Demand + two 1-year reservations
    assert_eq!(records.one_year.len(), 3);
    // On-Demand + one 3-year reservation
    assert_eq!(records.three_year.len(), 2);
    assert!(records.one_year.iter().all(|r| r.count == 2));
    assert!(records
        .three_year
        .iter()
        .all(|r| r.term == TermLabel::OnDemand || r.term == TermLabel::ThreeYear));

    let od3 = records.three_year.iter().find(|r| r.is_on_demand()).unwrap();
    assert_eq!(od3.months_in_term, 36);
    assert_money(od3.cost_for_term, 175.2 * 36.0);
}

#[test]
fn test_pipeline_ignores_duplicate_dataset_entries() {
    let inventory =
        InventoryCount::from_instances(&[RunningInstance::new("db.r5.large", Engine::MySQL)]);
    let reporter = CollectingReporter::default();

    let mut cheaper = r5_large();
    cheaper.on_demand_hourly = 0.01;
    let records = price_inventory(&[r5_large(), cheaper], &inventory, REGION, &reporter);

    assert_eq!(records.one_year.len(), 3);
    let on_demand = records.one_year.iter().find(|r| r.is_on_demand()).unwrap();
    assert_money(on_demand.monthly_cost, 175.20);
    assert_eq!(
        reporter.count(|e| matches!(e, PricingEvent::DuplicatePricePoint { .. })),
        1
    );
}

#[test]
fn test_pipeline_reports_unknown_engine_and_missing_prices() {
    let inventory = InventoryCount::from_instances(&[
        RunningInstance::new("db.r5.large", Engine::MySQL),
        RunningInstance::new("db.m5.large", Engine::PostgreSQL),
        RunningInstance::new("db.r5.large", Engine::Unknown),
    ]);
    let reporter = CollectingReporter::default();

    let records = price_inventory(&[r5_large()], &inventory, REGION, &reporter);

    assert!(records
        .one_year
        .iter()
        .chain(&records.three_year)
        .all(|r| r.key() == InventoryKey::new("db.r5.large", Engine::MySQL)));
    assert_eq!(
        reporter.count(|e| matches!(e, PricingEvent::UnknownEngine { count: 1, .. })),
        1
    );
    assert_eq!(
        reporter.count(|e| matches!(
            e,
            PricingEvent::MissingPriceData { engine: Engine::PostgreSQL, .. }
        )),
        1
    );
}

#[test]
fn test_pipeline_skips_other_regions() {
    let inventory =
        InventoryCount::from_instances(&[RunningInstance::new("db.r5.large", Engine::MySQL)]);
    let records = price_inventory(&[r5_large()], &inventory, "eu-west-1", &NoopReporter);
    assert!(records.is_empty());
}

#[test]
fn test_aggregation_by_engine_is_disjoint() {
    let mysql = r5_large();
    let postgres = RawPricePoint::new("db.m5.xlarge", REGION, Engine::PostgreSQL, 0.356)
        .with_reserved(
            slot(TermLength::OneYear, OfferingClass::Standard, PaymentOption::PartialUpfront),
            0.22,
        );
    let inventory = InventoryCount::from_instances(&[
        RunningInstance::new("db.r5.large", Engine::MySQL),
        RunningInstance::new("db.m5.xlarge", Engine::PostgreSQL),
        RunningInstance::new("db.m5.xlarge", Engine::PostgreSQL),
    ]);

    let records = price_inventory(&[mysql, postgres], &inventory, REGION, &NoopReporter);

    let my = aggregate_by_term_and_engine(
        &records.one_year,
        &inventory,
        TermLength::OneYear,
        Engine::MySQL,
    );
    let pg = aggregate_by_term_and_engine(
        &records.one_year,
        &inventory,
        TermLength::OneYear,
        Engine::PostgreSQL,
    );

    assert_eq!(my.len(), 3);
    assert_eq!(pg.len(), 2);
    assert!(my.iter().all(|r| r.instance_type == "db.r5.large"));
    assert!(pg.iter().all(|r| r.instance_type == "db.m5.xlarge" && r.count == 2));
}

#[test]
fn test_aggregation_uses_authoritative_count() {
    let inventory_at_pricing =
        InventoryCount::from_instances(&[RunningInstance::new("db.r5.large", Engine::MySQL)]);
    let records = price_inventory(&[r5_large()], &inventory_at_pricing, REGION, &NoopReporter);

    let mut final_inventory = InventoryCount::new();
    final_inventory.add(InventoryKey::new("db.r5.large", Engine::MySQL), 5);

    let out = aggregate_by_term_and_engine(
        &records.one_year,
        &final_inventory,
        TermLength::OneYear,
        Engine::MySQL,
    );
    let on_demand = out.iter().find(|r| r.is_on_demand()).unwrap();
    assert_eq!(on_demand.count, 5);
    assert_money(on_demand.total_monthly_cost, 876.00);
    assert_money(on_demand.total_cost_for_term, 10512.00);
}
