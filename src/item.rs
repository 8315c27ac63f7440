//! OrderedItem: the engine's view of a card or list
//!
//! The engine never stores items. Callers pass the current snapshot of a
//! collection by reference; persistence and transaction boundaries stay on
//! their side.

use crate::{CollectionId, ItemId, PositionKey};
use serde::{Deserialize, Serialize};

/// One item of an ordered collection
///
/// `collection_id` scopes uniqueness and ordering: two items may share a
/// position key as long as they live in different collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedItem {
    /// Item identifier, unique within its collection
    pub id: ItemId,

    /// Collection the item belongs to (a list for cards, a board for lists)
    pub collection_id: CollectionId,

    /// Sortable position key
    pub position: PositionKey,
}

impl OrderedItem {
    /// Create a new ordered item
    pub fn new(
        id: impl Into<ItemId>,
        collection_id: impl Into<CollectionId>,
        position: impl Into<PositionKey>,
    ) -> Self {
        Self {
            id: id.into(),
            collection_id: collection_id.into(),
            position: position.into(),
        }
    }
}

impl std::fmt::Display for OrderedItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}@{}", self.collection_id, self.id, self.position)
    }
}
