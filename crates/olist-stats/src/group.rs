//! Grouped aggregation
//!
//! A [`GroupIndex`] maps each distinct key to the row indices carrying it.
//! Aggregations are folds over those row lists, producing one value per
//! group in key order.

use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

/// Key → row indices, keys in lexicographic order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupIndex {
    groups: BTreeMap<String, Vec<usize>>,
}

impl GroupIndex {
    /// Group rows by key; rows with a missing key belong to no group
    pub fn from_keys(keys: &[Option<String>]) -> Self {
        let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (row, key) in keys.iter().enumerate() {
            if let Some(key) = key {
                groups.entry(key.clone()).or_default().push(row);
            }
        }
        Self { groups }
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group keys in order
    pub fn keys(&self) -> Vec<Option<String>> {
        self.groups.keys().cloned().map(Some).collect()
    }

    /// Row indices of one group
    pub fn rows(&self, key: &str) -> Option<&[usize]> {
        self.groups.get(key).map(|r| r.as_slice())
    }

    /// Fold each group's cells into one value
    pub fn fold<T, A, F>(&self, values: &[T], init: A, f: F) -> Vec<A>
    where
        A: Clone,
        F: Fn(A, &T) -> A,
    {
        self.groups
            .values()
            .map(|rows| rows.iter().fold(init.clone(), |acc, &i| f(acc, &values[i])))
            .collect()
    }

    /// Count of present cells per group
    pub fn count<T>(&self, values: &[Option<T>]) -> Vec<i64> {
        self.fold(values, 0i64, |n, v| n + i64::from(v.is_some()))
    }

    /// Count of distinct present cells per group
    pub fn count_distinct<T: Eq + Hash>(&self, values: &[Option<T>]) -> Vec<i64> {
        self.groups
            .values()
            .map(|rows| {
                let distinct: HashSet<&T> =
                    rows.iter().filter_map(|&i| values[i].as_ref()).collect();
                distinct.len() as i64
            })
            .collect()
    }

    /// Sum of present cells per group; `None` when a group has none
    pub fn sum(&self, values: &[Option<f64>]) -> Vec<Option<f64>> {
        self.fold(values, None, |acc: Option<f64>, v| match (acc, v) {
            (Some(a), Some(x)) => Some(a + x),
            (None, Some(x)) => Some(*x),
            (acc, None) => acc,
        })
    }

    /// Mean of present cells per group; `None` when a group has none
    pub fn mean(&self, values: &[Option<f64>]) -> Vec<Option<f64>> {
        self.fold(values, (0.0f64, 0usize), |(sum, n), v| match v {
            Some(x) => (sum + x, n + 1),
            None => (sum, n),
        })
        .into_iter()
        .map(|(sum, n)| (n > 0).then(|| sum / n as f64))
        .collect()
    }

    /// First present cell per group
    pub fn first<T: Clone>(&self, values: &[Option<T>]) -> Vec<Option<T>> {
        self.groups
            .values()
            .map(|rows| rows.iter().find_map(|&i| values[i].clone()))
            .collect()
    }
}
