//! Diagnostic events emitted by the pricing engine
//!
//! Core functions never log directly. They receive a `&dyn Reporter` and emit
//! structured [`PricingEvent`]s; the CLI wires in [`TracingReporter`], tests
//! and library callers can pass [`NoopReporter`] or collect events themselves.

use crate::types::{Engine, InventoryKey, ReservedSlot};
use tracing::{debug, info, warn};

/// Something noteworthy that happened during a pricing run
#[derive(Debug, Clone, PartialEq)]
pub enum PricingEvent {
    /// Inventory discovery finished
    InventoryLoaded {
        region: String,
        observations: usize,
        distinct_keys: usize,
    },
    /// Pricing dataset downloaded or read
    DatasetLoaded { location: String, entries: usize },
    /// Running instances whose engine has no pricing mapping
    UnknownEngine { instance_type: String, count: u32 },
    /// Running instance type with no usable dataset entry
    MissingPriceData {
        instance_type: String,
        engine: Engine,
        region: String,
    },
    /// A second dataset entry for an already processed key
    DuplicatePricePoint { key: InventoryKey },
    /// Reserved slot with a zero rate
    OfferingNotAvailable {
        instance_type: String,
        slot: ReservedSlot,
    },
    /// Normalization of one key finished
    Normalized {
        key: InventoryKey,
        count: u32,
        reserved_records: usize,
    },
}

/// Sink for [`PricingEvent`]s
pub trait Reporter {
    fn report(&self, event: &PricingEvent);
}

/// Forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: &PricingEvent) {
        match event {
            PricingEvent::InventoryLoaded {
                region,
                observations,
                distinct_keys,
            } => info!(
                "Found {} running instances ({} instance type/engine pairs) in {}",
                observations, distinct_keys, region
            ),
            PricingEvent::DatasetLoaded { location, entries } => {
                info!("Loaded {} pricing entries from {}", entries, location)
            }
            PricingEvent::UnknownEngine {
                instance_type,
                count,
            } => warn!(
                "Skipping {} {} instance(s) with an unsupported engine",
                count, instance_type
            ),
            PricingEvent::MissingPriceData {
                instance_type,
                engine,
                region,
            } => warn!(
                "No {} pricing for {} in {}, skipping",
                engine, instance_type, region
            ),
            PricingEvent::DuplicatePricePoint { key } => {
                debug!("Ignoring duplicate pricing entry for {}", key)
            }
            PricingEvent::OfferingNotAvailable {
                instance_type,
                slot,
            } => debug!("{} not offered for {}", slot, instance_type),
            PricingEvent::Normalized {
                key,
                count,
                reserved_records,
            } => debug!(
                "Normalized {} x{}: {} reserved options",
                key, count, reserved_records
            ),
        }
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&self, _event: &PricingEvent) {}
}
