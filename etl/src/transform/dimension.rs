//! Surrogate key assignment for categorical values.
//!
//! A [`Dimension`] interns values in first-appearance order and hands out
//! dense 1-based keys. Fact rows take their keys straight from the lookup,
//! so every fact row survives and every key it holds exists in the
//! dimension.

use std::collections::HashMap;
use std::hash::Hash;

use crate::models::SurrogateKey;

/// Distinct values of one column, keyed by order of first appearance.
#[derive(Debug, Clone)]
pub struct Dimension<T> {
    values: Vec<T>,
    keys: HashMap<T, SurrogateKey>,
}

impl<T: Eq + Hash + Clone> Dimension<T> {
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            keys: HashMap::new(),
        }
    }

    /// Key for `value`, assigning the next key if it is new.
    pub fn intern(&mut self, value: T) -> SurrogateKey {
        if let Some(&key) = self.keys.get(&value) {
            return key;
        }
        self.values.push(value.clone());
        let key = self.values.len() as SurrogateKey;
        self.keys.insert(value, key);
        key
    }

    pub fn key_of(&self, value: &T) -> Option<SurrogateKey> {
        self.keys.get(value).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(key, value)` pairs in key order.
    pub fn into_entries(self) -> Vec<(SurrogateKey, T)> {
        self.values
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i as SurrogateKey + 1, v))
            .collect()
    }
}

impl<T: Eq + Hash + Clone> Default for Dimension<T> {
    fn default() -> Self {
        Self::new()
    }
}
