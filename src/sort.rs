// SPDX-License-Identifier: MPL-2.0
//! Sorting engine ordering sequences through a named comparator table.
//!
//! Comparator registration happens once, at setup; sorting then resolves a
//! [`SortSpec`] by name. A name with no registered comparator degrades to
//! input order rather than erroring; [`Sorter::sort_strict`] gives callers
//! the reporting path instead.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Sort direction applied on top of a named comparator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortDirection {
    /// Comparator order as registered.
    #[default]
    Ascending,
    /// Comparator order, then reversed.
    ///
    /// Reversal flips ties along with everything else, so equal elements
    /// appear in reverse of their source order. Callers that need stable
    /// descending order register a dedicated comparator under its own name.
    Descending,
}

/// A named sort request: which comparator, which direction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SortSpec {
    /// Name of a registered comparator.
    pub sort_by: String,
    /// Direction applied to the comparator's output.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    /// Creates a sort request for the given comparator name and direction.
    #[must_use]
    pub fn new(sort_by: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            sort_by: sort_by.into(),
            direction,
        }
    }

    /// Creates an ascending sort request.
    #[must_use]
    pub fn ascending(sort_by: impl Into<String>) -> Self {
        Self::new(sort_by, SortDirection::Ascending)
    }

    /// Creates a descending sort request.
    #[must_use]
    pub fn descending(sort_by: impl Into<String>) -> Self {
        Self::new(sort_by, SortDirection::Descending)
    }
}

type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Orders sequences by named comparators without mutating the source.
///
/// # Example
///
/// ```
/// use statekit::sort::{SortSpec, Sorter};
///
/// let sorter = Sorter::new().with("len", |a: &String, b: &String| a.len().cmp(&b.len()));
/// let rows = vec!["ccc".to_string(), "a".to_string(), "bb".to_string()];
///
/// let sorted = sorter.sort(&rows, &SortSpec::ascending("len"));
/// assert_eq!(sorted, vec!["a".to_string(), "bb".to_string(), "ccc".to_string()]);
///
/// // The source order is untouched.
/// assert_eq!(rows[0], "ccc");
/// ```
pub struct Sorter<T> {
    comparators: BTreeMap<String, Comparator<T>>,
}

impl<T> Sorter<T> {
    /// Creates a sorter with an empty comparator table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            comparators: BTreeMap::new(),
        }
    }

    /// Registers a comparator under `name`, replacing any previous entry.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        comparator: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    ) {
        self.comparators.insert(name.into(), Box::new(comparator));
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with(
        mut self,
        name: impl Into<String>,
        comparator: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.register(name, comparator);
        self
    }

    /// Whether a comparator is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.comparators.contains_key(name)
    }

    /// Iterates the registered comparator names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.comparators.keys().map(String::as_str)
    }

    /// Number of registered comparators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.comparators.len()
    }

    /// Whether the comparator table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }

    /// Returns a newly allocated ordering of `source`; the source is never
    /// mutated.
    ///
    /// An unregistered `sort_by` name returns the input order unchanged,
    /// regardless of direction.
    #[must_use]
    pub fn sort(&self, source: &[T], spec: &SortSpec) -> Vec<T>
    where
        T: Clone,
    {
        let mut items: Vec<T> = source.to_vec();
        match self.comparators.get(&spec.sort_by) {
            Some(comparator) => {
                items.sort_by(|a, b| comparator(a, b));
                if spec.direction == SortDirection::Descending {
                    items.reverse();
                }
            }
            None => {
                debug!(sort_by = %spec.sort_by, "no comparator registered; keeping input order");
            }
        }
        items
    }

    /// Like [`sort`](Self::sort), but reports an unknown comparator name
    /// instead of falling back to input order.
    pub fn sort_strict(&self, source: &[T], spec: &SortSpec) -> Result<Vec<T>>
    where
        T: Clone,
    {
        if !self.contains(&spec.sort_by) {
            return Err(Error::UnknownComparator(spec.sort_by.clone()));
        }
        Ok(self.sort(source, spec))
    }
}

impl<T> Default for Sorter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Sorter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sorter")
            .field("comparators", &self.names().collect::<Vec<_>>())
            .finish()
    }
}
