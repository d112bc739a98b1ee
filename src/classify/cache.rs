//! Breakpoint Cache
//!
//! Memoizes equal-interval breakpoints per attribute for the session.
//! Entries are never invalidated; the loaded data cannot change.

use std::collections::HashMap;
use tracing::{debug, info};

use super::{compute_equal_breaks, BreakpointSet};

#[derive(Debug, Default)]
pub struct BreakpointCache {
    entries: HashMap<String, BreakpointSet>,
    computations: usize,
}

impl BreakpointCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, attribute: &str) -> Option<&BreakpointSet> {
        self.entries.get(attribute)
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.entries.contains_key(attribute)
    }

    /// Return the cached set, computing it from `values` on first use.
    ///
    /// `values` is only evaluated on a miss. A miss that yields no
    /// breakpoints leaves the cache untouched so a later call may retry.
    pub fn get_or_compute<F>(&mut self, attribute: &str, values: F) -> Option<BreakpointSet>
    where
        F: FnOnce() -> Vec<f64>,
    {
        if let Some(breaks) = self.entries.get(attribute) {
            debug!("Breakpoint cache hit for {}", attribute);
            return Some(*breaks);
        }

        self.computations += 1;
        let values = values();
        match compute_equal_breaks(&values) {
            Some(breaks) => {
                info!("Computed equal-interval breaks for {} from {} values: {}", attribute, values.len(), breaks);
                self.entries.insert(attribute.to_string(), breaks);
                Some(breaks)
            }
            None => {
                debug!("No usable values for {}; breaks deferred", attribute);
                None
            }
        }
    }

    /// Number of times a computation was attempted (cache misses)
    pub fn computations(&self) -> usize {
        self.computations
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
