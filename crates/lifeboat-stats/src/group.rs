//! Group-by-then-broadcast averaging
//!
//! [`GroupMeans`] reduces a flat sequence of `(key, value)` pairs into one
//! mean per observed key, then answers "what is the mean of the group this
//! row belongs to" for every row. This is the explicit equivalent of a
//! partitioned window aggregate such as `AVG(x) OVER (PARTITION BY key)`.
//!
//! Only keys that actually occur in the input get an entry, so every stored
//! group has at least one member and no mean is ever computed over an empty
//! group.
//!
//! # Examples
//!
//! ```
//! use lifeboat_stats::group::GroupMeans;
//!
//! let rows = [("First", 1.0), ("First", 1.0), ("Third", 0.0), ("Third", 1.0)];
//! let means = GroupMeans::from_pairs(rows);
//!
//! assert_eq!(means.mean_of(&"First"), Some(1.0));
//! assert_eq!(means.mean_of(&"Third"), Some(0.5));
//! assert_eq!(means.overall_mean(), Some(0.75));
//!
//! // Broadcast the group mean back onto every row
//! let broadcast = rows
//!     .iter()
//!     .map(|(key, _)| means.mean_of(key).unwrap())
//!     .collect::<Vec<_>>();
//! assert_eq!(broadcast, vec![1.0, 1.0, 0.5, 0.5]);
//! ```

use std::collections::{BTreeMap, btree_map};

use serde::{Deserialize, Serialize};

/// Running sum and count for one group.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupAccumulator {
    /// Number of values in the group
    pub count: usize,
    /// Sum of values in the group
    pub sum: f64,
}

impl GroupAccumulator {
    fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
    }

    /// Arithmetic mean of the group (`sum / count`).
    ///
    /// Returns `None` for an accumulator that has seen no values.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Per-key means over a flat dataset, plus the mean over all rows.
#[derive(Debug, Clone)]
pub struct GroupMeans<K> {
    groups: BTreeMap<K, GroupAccumulator>,
    overall: GroupAccumulator,
}

impl<K> Default for GroupMeans<K> {
    fn default() -> Self {
        Self {
            groups: BTreeMap::new(),
            overall: GroupAccumulator::default(),
        }
    }
}

impl<K> GroupMeans<K>
where
    K: Ord,
{
    /// Creates an empty set of groups.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds group means from `(key, value)` pairs in a single pass.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut means = Self::new();
        for (key, value) in pairs {
            means.push(key, value);
        }
        means
    }

    /// Builds group means and broadcasts each row's group mean back onto it.
    ///
    /// Returns the group means together with one value per input pair, in
    /// input order: the mean of the group that pair belongs to.
    ///
    /// # Examples
    ///
    /// ```
    /// use lifeboat_stats::group::GroupMeans;
    ///
    /// let (means, per_row) =
    ///     GroupMeans::broadcast([("male", 0.0), ("female", 1.0), ("male", 1.0)]);
    /// assert_eq!(per_row, vec![0.5, 1.0, 0.5]);
    /// assert_eq!(means.num_groups(), 2);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn broadcast<I>(pairs: I) -> (Self, Vec<f64>)
    where
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut slots = BTreeMap::<K, usize>::new();
        let mut accumulators = Vec::<GroupAccumulator>::new();
        let mut row_slots = Vec::new();
        let mut overall = GroupAccumulator::default();

        for (key, value) in pairs {
            let slot = *slots.entry(key).or_insert_with(|| {
                accumulators.push(GroupAccumulator::default());
                accumulators.len() - 1
            });
            accumulators[slot].push(value);
            overall.push(value);
            row_slots.push(slot);
        }

        // every slot was created by a pushed value, so count > 0
        let slot_means = accumulators
            .iter()
            .map(|acc| acc.sum / acc.count as f64)
            .collect::<Vec<_>>();
        let per_row = row_slots.iter().map(|&slot| slot_means[slot]).collect();

        let groups = slots
            .into_iter()
            .map(|(key, slot)| (key, accumulators[slot]))
            .collect();

        (Self { groups, overall }, per_row)
    }

    /// Adds one value to the group identified by `key`.
    pub fn push(&mut self, key: K, value: f64) {
        self.groups.entry(key).or_default().push(value);
        self.overall.push(value);
    }

    /// Mean of the group identified by `key`, or `None` if the key was never
    /// observed.
    #[must_use]
    pub fn mean_of(&self, key: &K) -> Option<f64> {
        self.groups.get(key).and_then(GroupAccumulator::mean)
    }

    /// Accumulated count and sum for `key`.
    #[must_use]
    pub fn group(&self, key: &K) -> Option<&GroupAccumulator> {
        self.groups.get(key)
    }

    /// Mean over every pushed value regardless of key.
    #[must_use]
    pub fn overall_mean(&self) -> Option<f64> {
        self.overall.mean()
    }

    /// Total number of pushed values.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.overall.count
    }

    /// Number of distinct keys observed.
    #[must_use]
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterates over observed groups in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, K, GroupAccumulator> {
        self.groups.iter()
    }

    /// Consumes the groups, yielding them in key order.
    pub fn into_groups(self) -> btree_map::IntoIter<K, GroupAccumulator> {
        self.groups.into_iter()
    }
}

impl<'a, K> IntoIterator for &'a GroupMeans<K> {
    type Item = (&'a K, &'a GroupAccumulator);
    type IntoIter = btree_map::Iter<'a, K, GroupAccumulator>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
