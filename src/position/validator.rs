//! PositionValidator: accept-or-repair for client-proposed keys
//!
//! Clients compute a key for the slot they dragged an item into and send it
//! with the move request. The key is a server-owned optimization detail, not
//! user data, so a malformed or conflicting proposal is never a reason to
//! fail the move: the validator silently swaps in a safe key instead and
//! reports that it did so, letting the caller log the correction.
//!
//! # Example
//!
//! ```rust
//! use orderkit_core::{OrderedItem, PositionValidator};
//!
//! let validator = PositionValidator::default();
//! let items = vec![
//!     OrderedItem::new("card-1", "list-1", "M"),
//!     OrderedItem::new("card-2", "list-1", "T"),
//! ];
//!
//! // A key that slots in cleanly is kept as-is
//! let (key, fixed) = validator.validate_and_fix("card-3", "list-1", "P", &items);
//! assert_eq!((key.as_str(), fixed), ("P", false));
//!
//! // A conflicting key is replaced, never rejected
//! let (key, fixed) = validator.validate_and_fix("card-3", "list-1", "M", &items);
//! assert!(fixed);
//! assert!("M" < key.as_str() && key.as_str() < "T");
//! ```

use crate::position::PositionGenerator;
use crate::{OrderedItem, PositionKey};

/// Validates and repairs client-proposed position keys
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionValidator {
    generator: PositionGenerator,
}

impl PositionValidator {
    /// Create a validator backed by the given generator
    pub fn new(generator: PositionGenerator) -> Self {
        Self { generator }
    }

    /// Accept `requested` if it preserves order and uniqueness, otherwise
    /// compute a safe replacement
    ///
    /// The snapshot is filtered to `collection_id` and the moving item itself
    /// is excluded, so an item keeping its own key is not a conflict. Returns
    /// the key to persist and whether the proposal was replaced. Feeding the
    /// returned key back in yields `false`: repairs are idempotent.
    ///
    /// This function never fails; see the module docs for why.
    pub fn validate_and_fix(
        &self,
        item_id: &str,
        collection_id: &str,
        requested: &str,
        items: &[OrderedItem],
    ) -> (PositionKey, bool) {
        let mut peers: Vec<&OrderedItem> = items
            .iter()
            .filter(|item| item.collection_id == collection_id && item.id != item_id)
            .collect();
        peers.sort_by(|a, b| a.position.cmp(&b.position));

        if !self.generator.alphabet().is_valid_key(requested) {
            return (self.append_key(&peers), true);
        }

        // Where the proposal would land among its sorted peers
        let slot = peers.partition_point(|item| item.position.as_str() < requested);
        let collides = slot < peers.len() && peers[slot].position == requested;
        if !collides {
            return (requested.to_string(), false);
        }

        // Taken: slide in directly after the colliding key, before whatever
        // follows it. The open interval holds no peers, so the replacement
        // is unique by construction.
        let next = peers.get(slot + 1).map(|item| item.position.as_str());
        match self.generator.generate(Some(requested), next) {
            Ok(key) => (key, true),
            // Algorithmically empty interval (or duplicated stored keys):
            // fall back to the end of the collection.
            Err(_) => (self.append_key(&peers), true),
        }
    }

    /// A fresh key after the collection's current last item
    fn append_key(&self, peers: &[&OrderedItem]) -> PositionKey {
        let last = peers.last().map(|item| item.position.as_str());
        self.generator.generate(last, None).unwrap_or_else(|_| {
            // Only reachable when the stored tail key is itself malformed;
            // keys are server-owned, so that means corrupted data. The mid
            // key keeps the move functional.
            (self.generator.alphabet().mid_symbol() as char).to_string()
        })
    }
}
