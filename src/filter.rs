// SPDX-License-Identifier: MPL-2.0
//! Filter store holding a schema-shaped set of active filter values.
//!
//! The schema is fixed by the defaults mapping passed at construction:
//! those keys, and only those keys, exist for the store's lifetime. Unknown
//! keys are reported back as a no-op rather than an error; callers that
//! want the schema enforced at compile time instantiate `K` with an enum,
//! which makes out-of-schema keys unrepresentable.

use std::collections::BTreeMap;

/// Holds current filter values against an immutable defaults mapping.
///
/// # Example
///
/// ```
/// use statekit::filter::FilterStore;
/// use std::collections::BTreeMap;
///
/// let defaults = BTreeMap::from([("status", "all"), ("search", "")]);
/// let mut filters = FilterStore::new(defaults);
///
/// filters.set(&"status", "active");
/// assert!(filters.has_active_filters());
///
/// filters.reset();
/// assert!(!filters.has_active_filters());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FilterStore<K, V> {
    filters: BTreeMap<K, V>,
    defaults: BTreeMap<K, V>,
}

impl<K, V> FilterStore<K, V>
where
    K: Ord + Clone,
    V: Clone + PartialEq,
{
    /// Creates a store whose schema and reset values are `defaults`.
    #[must_use]
    pub fn new(defaults: BTreeMap<K, V>) -> Self {
        Self {
            filters: defaults.clone(),
            defaults,
        }
    }

    /// Sets the current value for a schema key.
    ///
    /// Returns `false` without touching the store when `key` is not part
    /// of the schema.
    pub fn set(&mut self, key: &K, value: V) -> bool {
        match self.filters.get_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Restores every key to its default value. Idempotent.
    pub fn reset(&mut self) {
        self.filters = self.defaults.clone();
    }

    /// Restores a single key to its default, leaving the rest untouched.
    ///
    /// Returns `false` when `key` is not part of the schema.
    pub fn clear(&mut self, key: &K) -> bool {
        let Some(default) = self.defaults.get(key) else {
            return false;
        };
        // Schema keys always exist in both maps.
        if let Some(slot) = self.filters.get_mut(key) {
            *slot = default.clone();
        }
        true
    }

    /// Returns the current value for a schema key.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.filters.get(key)
    }

    /// Returns the default value for a schema key.
    #[must_use]
    pub fn default_value(&self, key: &K) -> Option<&V> {
        self.defaults.get(key)
    }

    /// True iff at least one current value differs from its default, by
    /// value equality.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.filters
            .iter()
            .any(|(key, value)| self.defaults.get(key) != Some(value))
    }

    /// Iterates the entries whose current value differs from the default.
    pub fn active_filters(&self) -> impl Iterator<Item = (&K, &V)> {
        self.filters
            .iter()
            .filter(|(key, value)| self.defaults.get(*key) != Some(*value))
    }

    /// Iterates the schema's keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.filters.keys()
    }

    /// Number of keys in the schema.
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether the schema is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
