//! OrderKit Core - Fractional-indexing position engine
//!
//! This is the ordering core of OrderKit, compiled to both native and WASM.
//! It implements:
//! - Lexicographic position keys over a fixed ordered alphabet
//! - Key generation strictly between arbitrary neighbors
//! - Repair of client-supplied keys that would break collection order
//! - Rebalancing to keep key length bounded over a collection's lifetime
//! - Health metrics that drive rebalance scheduling
//!
//! The engine holds no state and performs no I/O: every operation is a pure
//! function over the snapshot the caller passes in. Serializing the
//! read-compute-persist cycle per collection (for example with a row lock or
//! a transaction spanning the neighbor read and the key write) is the
//! caller's responsibility; two callers racing on stale snapshots can compute
//! colliding keys.
//!
//! # Examples
//!
//! ```rust
//! use orderkit_core::{generate_position, compare_positions};
//!
//! let first = generate_position(None, None).unwrap();
//! let second = generate_position(Some(&first), None).unwrap();
//! assert!(compare_positions(&first, &second).is_lt());
//! ```

pub mod engine;
pub mod error;
pub mod item;
pub mod position;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-exports for convenience
pub use engine::{PositionEngine, PositionUsecase};
pub use error::{PositionError, Result};
pub use item::OrderedItem;
pub use position::{
    KeyAlphabet, PositionGenerator, PositionMetrics, PositionValidator, RebalanceEngine,
};

use std::cmp::Ordering;
use std::collections::HashMap;

/// Item identifier type
pub type ItemId = String;

/// Collection identifier type (a list's cards, a board's lists)
pub type CollectionId = String;

/// Sortable position key type
pub type PositionKey = String;

/// Generate a key strictly between two optional neighbors using the default
/// base-62 engine. See [`PositionGenerator::generate`].
pub fn generate_position(before: Option<&str>, after: Option<&str>) -> Result<PositionKey> {
    PositionEngine::base62().generate_position(before, after)
}

/// Accept or repair a client-proposed key against a collection snapshot using
/// the default base-62 engine. See [`PositionValidator::validate_and_fix`].
pub fn validate_and_fix_position(
    item_id: &str,
    collection_id: &str,
    requested: &str,
    items: &[OrderedItem],
) -> (PositionKey, bool) {
    PositionEngine::base62().validate_and_fix_position(item_id, collection_id, requested, items)
}

/// Compute replacement keys for a collection whose keys grew too long, using
/// the default base-62 engine. See [`RebalanceEngine::rebalance`].
pub fn rebalance_positions(
    items: &[OrderedItem],
    max_key_length: usize,
) -> Result<HashMap<ItemId, PositionKey>> {
    PositionEngine::base62().rebalance_positions(items, max_key_length)
}

/// Generate `count` strictly increasing keys inside a boundary pair using the
/// default base-62 engine. See [`PositionGenerator::generate_batch`].
pub fn batch_generate_positions(
    count: usize,
    before: Option<&str>,
    after: Option<&str>,
) -> Result<Vec<PositionKey>> {
    PositionEngine::base62().batch_generate_positions(count, before, after)
}

/// Compute key-length health metrics over a collection snapshot.
/// See [`PositionMetrics::collect`].
pub fn get_position_metrics(items: &[OrderedItem]) -> PositionMetrics {
    PositionEngine::base62().get_position_metrics(items)
}

/// Compare two position keys.
///
/// Key order is plain byte-wise lexicographic comparison; this exists so
/// callers order items without knowing that detail.
pub fn compare_positions(a: &str, b: &str) -> Ordering {
    a.as_bytes().cmp(b.as_bytes())
}

/// Check whether `s` is a well-formed key for the default base-62 alphabet:
/// non-empty and made only of alphabet symbols.
pub fn is_valid_position_string(s: &str) -> bool {
    KeyAlphabet::base62().is_valid_key(s)
}

/// Verify that a key sequence is strictly increasing.
///
/// Returns [`PositionError::OutOfSequence`] naming the first offending index
/// and key pair. Useful as a post-write assertion after bulk operations.
pub fn validate_position_sequence<S: AsRef<str>>(keys: &[S]) -> Result<()> {
    for (index, pair) in keys.windows(2).enumerate() {
        let (previous, current) = (pair[0].as_ref(), pair[1].as_ref());
        if previous >= current {
            return Err(PositionError::OutOfSequence {
                index: index + 1,
                previous: previous.to_string(),
                current: current.to_string(),
            });
        }
    }
    Ok(())
}
