//! PositionMetrics: key-length health statistics for a collection
//!
//! A background housekeeping job collects these per collection and triggers
//! a [`RebalanceEngine`](crate::RebalanceEngine) pass when
//! `needs_rebalance` flips. The struct serializes cleanly so callers can
//! export it to their observability stack as-is.

use crate::OrderedItem;
use serde::{Deserialize, Serialize};

/// A single key longer than this flags the collection for rebalancing
pub const MAX_LENGTH_THRESHOLD: usize = 8;

/// An average key length above this flags the collection for rebalancing
pub const AVG_LENGTH_THRESHOLD: f64 = 5.0;

/// Key-length statistics over one collection snapshot
///
/// # Example
///
/// ```rust
/// use orderkit_core::{get_position_metrics, OrderedItem};
///
/// let items = vec![
///     OrderedItem::new("card-1", "list-1", "V"),
///     OrderedItem::new("card-2", "list-1", "Vz"),
/// ];
///
/// let metrics = get_position_metrics(&items);
/// assert_eq!(metrics.count, 2);
/// assert_eq!(metrics.max_length, 2);
/// assert!(!metrics.needs_rebalance);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionMetrics {
    /// Items in the snapshot
    pub count: usize,

    /// Mean key length
    pub avg_length: f64,

    /// Longest key length
    pub max_length: usize,

    /// Shortest key length
    pub min_length: usize,

    /// Whether the collection crossed a rebalance threshold
    pub needs_rebalance: bool,
}

impl PositionMetrics {
    /// Compute metrics over a collection snapshot
    ///
    /// Empty input yields a zeroed result with `needs_rebalance = false`.
    pub fn collect(items: &[OrderedItem]) -> Self {
        if items.is_empty() {
            return Self {
                count: 0,
                avg_length: 0.0,
                max_length: 0,
                min_length: 0,
                needs_rebalance: false,
            };
        }

        let mut total = 0usize;
        let mut max_length = 0usize;
        let mut min_length = usize::MAX;
        for item in items {
            let len = item.position.len();
            total += len;
            max_length = max_length.max(len);
            min_length = min_length.min(len);
        }
        let avg_length = total as f64 / items.len() as f64;

        Self {
            count: items.len(),
            avg_length,
            max_length,
            min_length,
            needs_rebalance: max_length > MAX_LENGTH_THRESHOLD
                || avg_length > AVG_LENGTH_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, key: &str) -> OrderedItem {
        OrderedItem::new(id, "list-1", key)
    }

    #[test]
    fn test_empty_snapshot_is_zeroed() {
        let metrics = PositionMetrics::collect(&[]);
        assert_eq!(metrics.count, 0);
        assert_eq!(metrics.avg_length, 0.0);
        assert_eq!(metrics.max_length, 0);
        assert_eq!(metrics.min_length, 0);
        assert!(!metrics.needs_rebalance);
    }

    #[test]
    fn test_basic_statistics() {
        let items = vec![item("card-1", "V"), item("card-2", "Vz"), item("card-3", "Vzz")];
        let metrics = PositionMetrics::collect(&items);

        assert_eq!(metrics.count, 3);
        assert_eq!(metrics.min_length, 1);
        assert_eq!(metrics.max_length, 3);
        assert!((metrics.avg_length - 2.0).abs() < f64::EPSILON);
        assert!(!metrics.needs_rebalance);
    }

    #[test]
    fn test_max_length_threshold_boundary() {
        // Exactly at the threshold: still fine
        let at = vec![item("card-1", &"a".repeat(MAX_LENGTH_THRESHOLD))];
        assert!(!PositionMetrics::collect(&at).needs_rebalance);

        // One symbol past it: flagged
        let over = vec![item("card-1", &"a".repeat(MAX_LENGTH_THRESHOLD + 1))];
        assert!(PositionMetrics::collect(&over).needs_rebalance);
    }

    #[test]
    fn test_avg_length_threshold() {
        // Average of 6 with every key under the max threshold
        let items = vec![item("card-1", "aaaaaa"), item("card-2", "bbbbbb")];
        let metrics = PositionMetrics::collect(&items);

        assert!(metrics.max_length <= MAX_LENGTH_THRESHOLD);
        assert!(metrics.avg_length > AVG_LENGTH_THRESHOLD);
        assert!(metrics.needs_rebalance);
    }

    #[test]
    fn test_serialization() {
        let metrics = PositionMetrics::collect(&[item("card-1", "V")]);

        let json = serde_json::to_string(&metrics).unwrap();
        let deserialized: PositionMetrics = serde_json::from_str(&json).unwrap();

        assert_eq!(metrics, deserialized);
    }
}
