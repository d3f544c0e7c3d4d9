//! Running-instance counts per (instance type, engine)

use crate::types::{Engine, InventoryKey, RunningInstance};
use std::collections::{BTreeMap, BTreeSet};

/// Summed instance counts keyed by [`InventoryKey`]
///
/// Keys are kept in sorted order so every table built from the inventory
/// comes out in the same order between runs. A key never maps to 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryCount {
    counts: BTreeMap<InventoryKey, u32>,
}

impl InventoryCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapse raw observations into per-key counts
    pub fn from_instances<'a, I>(instances: I) -> Self
    where
        I: IntoIterator<Item = &'a RunningInstance>,
    {
        let mut inventory = Self::new();
        for instance in instances {
            inventory.add(instance.key(), instance.count);
        }
        inventory
    }

    pub fn add(&mut self, key: InventoryKey, count: u32) {
        if count == 0 {
            return;
        }
        let entry = self.counts.entry(key).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Count for a key, 0 when the key is absent
    pub fn count(&self, key: &InventoryKey) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn contains(&self, key: &InventoryKey) -> bool {
        self.counts.contains_key(key)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Distinct engines present, in sorted order
    pub fn engines(&self) -> BTreeSet<Engine> {
        self.counts.keys().map(|k| k.engine).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&InventoryKey, u32)> {
        self.counts.iter().map(|(k, &c)| (k, c))
    }
}
