//! RebalanceEngine: bulk reassignment of short, evenly spaced keys
//!
//! Keys only ever grow: every insertion into a crowded gap adds a symbol.
//! A housekeeping pass runs this engine when
//! [`PositionMetrics`](crate::PositionMetrics) says keys got too long, and
//! writes the returned map back in one transaction.
//!
//! The output preserves relative order exactly and nothing else: absolute
//! key values change for every item in the collection.

use crate::error::{PositionError, Result};
use crate::position::KeyAlphabet;
use crate::{ItemId, OrderedItem, PositionKey};
use std::collections::{HashMap, HashSet};

/// Recomputes all keys of a collection into evenly spaced short ones
#[derive(Debug, Clone, Copy, Default)]
pub struct RebalanceEngine {
    alphabet: KeyAlphabet,
}

impl RebalanceEngine {
    /// Create a rebalancer over the given alphabet
    pub fn new(alphabet: KeyAlphabet) -> Self {
        Self { alphabet }
    }

    /// Compute replacement keys when any key exceeds `max_key_length`
    ///
    /// Returns an empty map when no key is over the limit (the common case;
    /// not an error). Otherwise every item gets a new fixed-width key spread
    /// evenly across the alphabet's range: one symbol while the collection
    /// fits in the alphabet, more as it grows. Relative order is preserved
    /// for every pair of items.
    ///
    /// The caller must apply the returned map as a single atomic write.
    /// Partially applied, old long keys and new short keys interleave and
    /// the collection's order is corrupted. Concurrent moves on the same
    /// collection must be serialized against that write as well.
    ///
    /// Fails with [`PositionError::DuplicateItem`] when two items share an
    /// id, since the output could not name both.
    pub fn rebalance(
        &self,
        items: &[OrderedItem],
        max_key_length: usize,
    ) -> Result<HashMap<ItemId, PositionKey>> {
        if !items.iter().any(|item| item.position.len() > max_key_length) {
            return Ok(HashMap::new());
        }

        let mut seen = HashSet::with_capacity(items.len());
        for item in items {
            if !seen.insert(item.id.as_str()) {
                return Err(PositionError::DuplicateItem(item.id.clone()));
            }
        }

        let mut sorted: Vec<&OrderedItem> = items.iter().collect();
        sorted.sort_by(|a, b| a.position.cmp(&b.position));

        // Smallest fixed width whose key space strictly exceeds the item
        // count, so the spacing step stays >= 1.
        let base = self.alphabet.len();
        let mut width = 1;
        let mut space = base;
        while space <= sorted.len() {
            width += 1;
            space *= base;
        }
        let step = space / (sorted.len() + 1);

        let mut replacements = HashMap::with_capacity(sorted.len());
        for (rank, item) in sorted.iter().enumerate() {
            let key = self.encode((rank + 1) * step, width);
            replacements.insert(item.id.clone(), key);
        }
        Ok(replacements)
    }

    /// Fixed-width positional encoding, most significant symbol first
    ///
    /// Fixed width is what makes numeric order and lexicographic order agree
    /// across the whole batch.
    fn encode(&self, mut value: usize, width: usize) -> PositionKey {
        let base = self.alphabet.len();
        let mut symbols = vec![0u8; width];
        for slot in symbols.iter_mut().rev() {
            *slot = self.alphabet.symbol_at(value % base);
            value /= base;
        }
        symbols.into_iter().map(char::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> RebalanceEngine {
        RebalanceEngine::default()
    }

    fn long_key(seed: u8) -> String {
        format!("a{}", (seed as char).to_string().repeat(9))
    }

    #[test]
    fn test_noop_when_keys_are_short() {
        let items = vec![
            OrderedItem::new("card-1", "list-1", "G"),
            OrderedItem::new("card-2", "list-1", "Q"),
        ];
        assert!(engine().rebalance(&items, 8).unwrap().is_empty());
    }

    #[test]
    fn test_three_long_keys_get_short_replacements() {
        let items = vec![
            OrderedItem::new("card-1", "list-1", long_key(b'1')),
            OrderedItem::new("card-2", "list-1", long_key(b'5')),
            OrderedItem::new("card-3", "list-1", long_key(b'9')),
        ];

        let map = engine().rebalance(&items, 8).unwrap();
        assert_eq!(map.len(), 3);

        for key in map.values() {
            assert!(key.len() <= 8);
        }
        assert!(map["card-1"] < map["card-2"]);
        assert!(map["card-2"] < map["card-3"]);
    }

    #[test]
    fn test_single_long_key_rebalances_whole_collection() {
        let items = vec![
            OrderedItem::new("card-1", "list-1", "B"),
            OrderedItem::new("card-2", "list-1", "aaaaaaaaaaaaaaa"),
            OrderedItem::new("card-3", "list-1", "x"),
        ];

        let map = engine().rebalance(&items, 8).unwrap();
        assert_eq!(map.len(), 3, "every item gets a new key, not just the long one");
        assert!(map["card-1"] < map["card-2"]);
        assert!(map["card-2"] < map["card-3"]);
    }

    #[test]
    fn test_order_preserved_for_every_pair() {
        let mut items = Vec::new();
        for i in 0..40 {
            items.push(OrderedItem::new(
                format!("card-{i}"),
                "list-1",
                // Nested keys of varying depth, already in order
                format!("a{}{}", "z".repeat(i % 11), char::from(b'0' + (i % 10) as u8)),
            ));
        }

        let map = engine().rebalance(&items, 4).unwrap();
        assert_eq!(map.len(), items.len());

        let mut sorted = items.clone();
        sorted.sort_by(|a, b| a.position.cmp(&b.position));
        for pair in sorted.windows(2) {
            assert!(
                map[&pair[0].id] < map[&pair[1].id],
                "relative order must survive: {} vs {}",
                pair[0].id,
                pair[1].id
            );
        }
    }

    #[test]
    fn test_large_collection_uses_two_symbols() {
        let items: Vec<OrderedItem> = (0..200)
            .map(|i| OrderedItem::new(format!("card-{i:03}"), "list-1", format!("a{:09}", i)))
            .collect();

        let map = engine().rebalance(&items, 8).unwrap();
        assert_eq!(map.len(), 200);

        for key in map.values() {
            assert_eq!(key.len(), 2, "200 items need two base-62 symbols");
        }

        let mut sorted = items.clone();
        sorted.sort_by(|a, b| a.position.cmp(&b.position));
        for pair in sorted.windows(2) {
            assert!(map[&pair[0].id] < map[&pair[1].id]);
        }
    }

    #[test]
    fn test_duplicate_item_id_rejected() {
        let items = vec![
            OrderedItem::new("card-1", "list-1", long_key(b'1')),
            OrderedItem::new("card-1", "list-1", long_key(b'5')),
        ];

        assert_eq!(
            engine().rebalance(&items, 8).unwrap_err(),
            PositionError::DuplicateItem("card-1".to_string())
        );
    }

    #[test]
    fn test_empty_input_is_a_noop() {
        assert!(engine().rebalance(&[], 8).unwrap().is_empty());
    }
}
