//! Position key machinery: alphabet, generation, validation, rebalancing
//!
//! Items in an ordered collection carry a string key whose lexicographic
//! comparison reproduces the intended item order. Inserting or moving an item
//! only ever writes that one item's key; neighbors keep theirs. The cost is
//! that keys grow when insertions keep landing in the same gap, which the
//! rebalancer repairs in bulk.
//!
//! # Components
//!
//! - **KeyAlphabet:** the ordered symbol set keys are built from
//! - **PositionGenerator:** a key strictly between two neighbors (or at an
//!   open end), plus batch generation
//! - **PositionValidator:** accept-or-repair for client-proposed keys
//! - **RebalanceEngine:** bulk reassignment of short, evenly spaced keys
//! - **PositionMetrics:** key-length health statistics
//!
//! # References
//!
//! - "Implementing Fractional Indexing" (Figma engineering)
//! - "A List is a Monoid" / LexoRank as used by issue trackers

pub mod alphabet;
pub mod generator;
pub mod metrics;
pub mod rebalance;
pub mod validator;

pub use alphabet::KeyAlphabet;
pub use generator::PositionGenerator;
pub use metrics::{PositionMetrics, AVG_LENGTH_THRESHOLD, MAX_LENGTH_THRESHOLD};
pub use rebalance::RebalanceEngine;
pub use validator::PositionValidator;
