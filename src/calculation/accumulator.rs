//! Insertion-ordered keyed accumulator.
//!
//! Rollups group entries by a natural key and keep a mutable tally per key.
//! Keys are remembered in first-seen order so that rows sharing a sort key
//! come out in the same order on every run.

use std::collections::HashMap;
use std::hash::Hash;

/// A map from key to tally that preserves first-insertion order.
///
/// # Example
///
/// ```
/// use work_report_engine::calculation::KeyedAccumulator;
///
/// let mut counts: KeyedAccumulator<String, u32> = KeyedAccumulator::new();
/// for name in ["b", "a", "b"] {
///     *counts.entry_or_default(name.to_string()) += 1;
/// }
///
/// let entries = counts.into_entries();
/// assert_eq!(entries, vec![("b".to_string(), 2), ("a".to_string(), 1)]);
/// ```
#[derive(Debug, Clone)]
pub struct KeyedAccumulator<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> KeyedAccumulator<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Returns the tally for `key`, inserting `default()` on first sight.
    pub fn entry_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        let position = match self.index.get(&key) {
            Some(&position) => position,
            None => {
                let position = self.entries.len();
                self.index.insert(key.clone(), position);
                self.entries.push((key, default()));
                position
            }
        };
        &mut self.entries[position].1
    }

    /// Returns the tally for `key`, inserting `V::default()` on first sight.
    pub fn entry_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.entry_or_insert_with(key, V::default)
    }

    /// Returns the tally for `key`, if present.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over keys and tallies in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    /// Consumes the accumulator, returning entries in first-seen order.
    pub fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}

impl<K, V> Default for KeyedAccumulator<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
