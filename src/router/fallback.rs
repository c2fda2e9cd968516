//! Fallback expansion: turns a primary collection plus a confidence value
//! into the ordered list of collections the search layer should try.
//!
//! The table is static configuration keyed by collection name. A primary
//! with no table entry simply expands to itself; that is expected for
//! collections outside the legacy naming scheme and is not an error.

use crate::config::{FallbackEntry, ThresholdConfig};

/// Holds the static fallback table and the confidence tier thresholds.
pub struct FallbackManager {
    table: Vec<FallbackEntry>,
    high: f32,
    low: f32,
}

impl FallbackManager {
    pub fn new(table: Vec<FallbackEntry>, thresholds: &ThresholdConfig) -> Self {
        Self {
            table,
            high: thresholds.high,
            low: thresholds.low,
        }
    }

    /// Number of fallbacks to surface for a confidence value:
    /// high tier gets none, medium tier gets one, low tier gets up to
    /// `min(max_fallbacks, 3)`.
    fn fallback_count(&self, confidence: f32, max_fallbacks: usize) -> usize {
        if confidence >= self.high {
            0
        } else if confidence >= self.low {
            1
        } else {
            max_fallbacks.min(3)
        }
    }

    /// Expand a primary collection into the ordered list to try.
    ///
    /// The result always starts with `primary`, contains no duplicates, and
    /// has at most 1 + min(max_fallbacks, 3) entries. Alternatives are taken
    /// in table order.
    pub fn expand(&self, primary: &str, confidence: f32, max_fallbacks: usize) -> Vec<String> {
        let mut collections = vec![primary.to_string()];
        let wanted = self.fallback_count(confidence, max_fallbacks);
        if wanted == 0 {
            return collections;
        }
        for alternative in self.chain(primary) {
            if collections.len() > wanted {
                break;
            }
            if !collections.iter().any(|c| c == alternative) {
                collections.push(alternative.clone());
            }
        }
        collections
    }

    /// Full, unfiltered fallback chain for a collection (debugging surface).
    /// Empty for collections without a table entry.
    pub fn chain(&self, collection: &str) -> &[String] {
        self.table
            .iter()
            .find(|entry| entry.collection == collection)
            .map(|entry| entry.alternatives.as_slice())
            .unwrap_or(&[])
    }
}
