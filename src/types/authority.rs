use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::types::KeyWeight;

/// A weighted-threshold signing authority for a single actor.
///
/// Key order is preserved and is part of the binary encoding. Authorization
/// checks treat the key list as a set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Authority {
    actor: u64,
    threshold: u32,
    #[serde(default)]
    keys: Vec<KeyWeight>,
}

impl Authority {
    pub fn new(actor: u64, threshold: u32) -> Self {
        Self {
            actor,
            threshold,
            keys: Vec::new(),
        }
    }

    /// Basic permission for an actor: one key of weight 1 against threshold 1.
    pub fn single_key(actor: u64, key: impl Into<String>) -> Self {
        Self::new(actor, 1).with_key(key, 1)
    }

    pub fn with_key(mut self, key: impl Into<String>, weight: u32) -> Self {
        self.push_key(key, weight);
        self
    }

    pub fn actor(&self) -> u64 {
        self.actor
    }

    pub fn set_actor(&mut self, actor: u64) {
        self.actor = actor;
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: u32) {
        self.threshold = threshold;
    }

    pub fn keys(&self) -> &[KeyWeight] {
        &self.keys
    }

    pub fn keys_mut(&mut self) -> &mut Vec<KeyWeight> {
        &mut self.keys
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeyWeight> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn add_key(&mut self, entry: KeyWeight) {
        self.keys.push(entry);
    }

    pub fn push_key(&mut self, key: impl Into<String>, weight: u32) {
        self.add_key(KeyWeight::new(key, weight));
    }

    /// Removes the first entry for `key`, keeping the order of the rest.
    pub fn remove_key(&mut self, key: &str) -> Option<KeyWeight> {
        let index = self.keys.iter().position(|entry| entry.key() == key)?;
        Some(self.keys.remove(index))
    }

    pub fn clear_keys(&mut self) {
        self.keys.clear();
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.iter().any(|entry| entry.key() == key)
    }

    pub fn weight_of(&self, key: &str) -> Option<u32> {
        self.keys
            .iter()
            .find(|entry| entry.key() == key)
            .map(KeyWeight::weight)
    }

    pub fn total_weight(&self) -> u64 {
        self.keys.iter().map(|entry| u64::from(entry.weight())).sum()
    }

    /// Checks the weights offered by `signers` against the threshold.
    ///
    /// Only signers whose key appears in this authority count, and each key
    /// counts once. When a key is offered more than once the largest weight
    /// is used.
    pub fn is_satisfied<'a, I>(&self, signers: I) -> bool
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let mut offered: BTreeMap<&str, u32> = BTreeMap::new();
        for (key, weight) in signers {
            if !self.contains_key(key) {
                continue;
            }
            let slot = offered.entry(key).or_insert(0);
            *slot = (*slot).max(weight);
        }

        let sum: u64 = offered.values().map(|weight| u64::from(*weight)).sum();
        sum >= u64::from(self.threshold)
    }

    /// Same check as [`Authority::is_satisfied`], using the weights recorded
    /// in this authority for each key that signed.
    pub fn is_satisfied_by_keys<'a, I>(&self, signed: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let signed: BTreeSet<&str> = signed.into_iter().collect();
        let mut counted = BTreeSet::new();
        let sum: u64 = self
            .keys
            .iter()
            .filter(|entry| signed.contains(entry.key()) && counted.insert(entry.key()))
            .map(|entry| u64::from(entry.weight()))
            .sum();
        sum >= u64::from(self.threshold)
    }

    pub fn validate(&self) -> Result<()> {
        if let Err(err) = self.check_invariants() {
            tracing::warn!(actor = self.actor, error = %err, "authority failed validation");
            return Err(err.into());
        }
        Ok(())
    }

    fn check_invariants(&self) -> std::result::Result<(), ValidationError> {
        let mut seen = BTreeSet::new();
        for (index, entry) in self.keys.iter().enumerate() {
            if entry.key().is_empty() {
                return Err(ValidationError::EmptyKey(index));
            }
            if entry.weight() == 0 {
                return Err(ValidationError::ZeroWeight(entry.key().to_string()));
            }
            if !seen.insert(entry.key()) {
                return Err(ValidationError::DuplicateKey(entry.key().to_string()));
            }
        }

        let total = self.total_weight();
        if total < u64::from(self.threshold) {
            return Err(ValidationError::UnreachableThreshold {
                threshold: self.threshold,
                total,
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Authority {
    type Item = &'a KeyWeight;
    type IntoIter = std::slice::Iter<'a, KeyWeight>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
