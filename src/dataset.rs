//! Model of the public RDS pricing dataset
//!
//! The dataset is a JSON array with one entry per instance type:
//!
//! ```json
//! [{
//!   "instance_type": "db.r5.large",
//!   "pricing": {
//!     "us-east-1": {
//!       "2":  { "ondemand": "0.24", "reserved": { "yrTerm1Standard.noUpfront": "0.15" } },
//!       "14": { "ondemand": "0.26" }
//!     }
//!   }
//! }]
//! ```
//!
//! Region entries are keyed by engine code (see [`Engine::dataset_key`]).
//! Prices may be numbers or numeric strings. Missing, empty or unparseable
//! prices read as 0, which the pricing engine treats as "not offered".

use crate::inventory::InventoryCount;
use crate::types::{Engine, RawPricePoint, ReservedRates};
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeSet, HashMap};

/// Whole dataset as downloaded
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct PriceDataset {
    pub instances: Vec<DatasetInstance>,
}

/// One instance type with its per-region prices
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetInstance {
    pub instance_type: String,
    #[serde(default)]
    pub pricing: HashMap<String, HashMap<String, EnginePricing>>,
}

/// Prices of one engine in one region
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnginePricing {
    #[serde(default, deserialize_with = "price")]
    pub ondemand: f64,
    #[serde(default)]
    pub reserved: Option<DatasetReserved>,
}

/// Reserved hourly rates as laid out in the dataset
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DatasetReserved {
    #[serde(rename = "yrTerm1Standard.noUpfront", default, deserialize_with = "price")]
    pub standard_no_upfront_1yr: f64,
    #[serde(rename = "yrTerm1Standard.partialUpfront", default, deserialize_with = "price")]
    pub standard_partial_upfront_1yr: f64,
    #[serde(rename = "yrTerm1Standard.allUpfront", default, deserialize_with = "price")]
    pub standard_all_upfront_1yr: f64,
    #[serde(rename = "yrTerm3Standard.noUpfront", default, deserialize_with = "price")]
    pub standard_no_upfront_3yr: f64,
    #[serde(rename = "yrTerm3Standard.partialUpfront", default, deserialize_with = "price")]
    pub standard_partial_upfront_3yr: f64,
    #[serde(rename = "yrTerm3Standard.allUpfront", default, deserialize_with = "price")]
    pub standard_all_upfront_3yr: f64,
    #[serde(rename = "yrTerm1Convertible.noUpfront", default, deserialize_with = "price")]
    pub convertible_no_upfront_1yr: f64,
    #[serde(rename = "yrTerm1Convertible.partialUpfront", default, deserialize_with = "price")]
    pub convertible_partial_upfront_1yr: f64,
    #[serde(rename = "yrTerm1Convertible.allUpfront", default, deserialize_with = "price")]
    pub convertible_all_upfront_1yr: f64,
    #[serde(rename = "yrTerm3Convertible.noUpfront", default, deserialize_with = "price")]
    pub convertible_no_upfront_3yr: f64,
    #[serde(rename = "yrTerm3Convertible.partialUpfront", default, deserialize_with = "price")]
    pub convertible_partial_upfront_3yr: f64,
    #[serde(rename = "yrTerm3Convertible.allUpfront", default, deserialize_with = "price")]
    pub convertible_all_upfront_3yr: f64,
}

impl From<DatasetReserved> for ReservedRates {
    fn from(r: DatasetReserved) -> Self {
        ReservedRates {
            standard_no_upfront_1yr: r.standard_no_upfront_1yr,
            standard_partial_upfront_1yr: r.standard_partial_upfront_1yr,
            standard_all_upfront_1yr: r.standard_all_upfront_1yr,
            standard_no_upfront_3yr: r.standard_no_upfront_3yr,
            standard_partial_upfront_3yr: r.standard_partial_upfront_3yr,
            standard_all_upfront_3yr: r.standard_all_upfront_3yr,
            convertible_no_upfront_1yr: r.convertible_no_upfront_1yr,
            convertible_partial_upfront_1yr: r.convertible_partial_upfront_1yr,
            convertible_all_upfront_1yr: r.convertible_all_upfront_1yr,
            convertible_no_upfront_3yr: r.convertible_no_upfront_3yr,
            convertible_partial_upfront_3yr: r.convertible_partial_upfront_3yr,
            convertible_all_upfront_3yr: r.convertible_all_upfront_3yr,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
    Null(()),
}

fn price<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(n) => n,
        RawPrice::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        RawPrice::Null(()) => 0.0,
    };
    Ok(if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    })
}

impl DatasetInstance {
    /// Price point for `engine` in `region`
    ///
    /// `None` when the region has no entry for the engine or the engine is not
    /// sold On-Demand there.
    pub fn price_point(&self, region: &str, engine: Engine) -> Option<RawPricePoint> {
        let engine_key = engine.dataset_key()?;
        let pricing = self.pricing.get(region)?.get(engine_key)?;
        if pricing.ondemand == 0.0 {
            return None;
        }
        Some(RawPricePoint {
            instance_type: self.instance_type.clone(),
            region: region.to_string(),
            engine,
            on_demand_hourly: pricing.ondemand,
            reserved: pricing.reserved.map(ReservedRates::from).unwrap_or_default(),
        })
    }
}

impl PriceDataset {
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Every price point supporting `engine` in `region`, in dataset order
    pub fn price_points(&self, region: &str, engine: Engine) -> Vec<RawPricePoint> {
        self.instances
            .iter()
            .filter_map(|i| i.price_point(region, engine))
            .collect()
    }

    /// Price points relevant to the inventory: one pass per engine present,
    /// restricted to the instance types actually running
    pub fn price_points_for(&self, region: &str, inventory: &InventoryCount) -> Vec<RawPricePoint> {
        let running: BTreeSet<(&str, Engine)> = inventory
            .iter()
            .map(|(k, _)| (k.instance_type.as_str(), k.engine))
            .collect();
        let running = &running;

        inventory
            .engines()
            .into_iter()
            .filter(Engine::is_known)
            .flat_map(|engine| {
                self.instances.iter().filter_map(move |i| {
                    if running.contains(&(i.instance_type.as_str(), engine)) {
                        i.price_point(region, engine)
                    } else {
                        None
                    }
                })
            })
            .collect()
    }
}
