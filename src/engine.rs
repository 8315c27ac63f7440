//! PositionEngine: the facade the card/list use-cases talk to
//!
//! One trait, one concrete implementation. The trait exists so callers can
//! substitute a canned engine in their own tests; there is no runtime
//! polymorphism beyond that seam.

use crate::error::Result;
use crate::position::{
    KeyAlphabet, PositionGenerator, PositionMetrics, PositionValidator, RebalanceEngine,
};
use crate::{ItemId, OrderedItem, PositionKey};
use std::collections::HashMap;

/// The position operations a collection use-case depends on
///
/// See the component types for the semantics of each operation:
/// [`PositionGenerator`], [`PositionValidator`], [`RebalanceEngine`],
/// [`PositionMetrics`].
pub trait PositionUsecase {
    /// Generate a key strictly between two optional neighbors
    fn generate_position(&self, before: Option<&str>, after: Option<&str>)
        -> Result<PositionKey>;

    /// Accept or repair a client-proposed key against a snapshot
    fn validate_and_fix_position(
        &self,
        item_id: &str,
        collection_id: &str,
        requested: &str,
        items: &[OrderedItem],
    ) -> (PositionKey, bool);

    /// Compute replacement keys for an over-long collection
    fn rebalance_positions(
        &self,
        items: &[OrderedItem],
        max_key_length: usize,
    ) -> Result<HashMap<ItemId, PositionKey>>;

    /// Generate `count` strictly increasing keys inside a boundary pair
    fn batch_generate_positions(
        &self,
        count: usize,
        before: Option<&str>,
        after: Option<&str>,
    ) -> Result<Vec<PositionKey>>;

    /// Key-length health metrics over a snapshot
    fn get_position_metrics(&self, items: &[OrderedItem]) -> PositionMetrics;
}

/// The real engine: generator, validator and rebalancer over one alphabet
#[derive(Debug, Clone, Copy)]
pub struct PositionEngine {
    generator: PositionGenerator,
    validator: PositionValidator,
    rebalancer: RebalanceEngine,
}

impl PositionEngine {
    /// Build an engine over a custom alphabet
    pub fn new(alphabet: KeyAlphabet) -> Self {
        let generator = PositionGenerator::new(alphabet);
        Self {
            generator,
            validator: PositionValidator::new(generator),
            rebalancer: RebalanceEngine::new(alphabet),
        }
    }

    /// The canonical engine over the base-62 alphabet
    pub fn base62() -> Self {
        Self::new(KeyAlphabet::base62())
    }

    /// The underlying generator
    pub fn generator(&self) -> &PositionGenerator {
        &self.generator
    }

    /// The alphabet keys are built from
    pub fn alphabet(&self) -> &KeyAlphabet {
        self.generator.alphabet()
    }
}

impl Default for PositionEngine {
    fn default() -> Self {
        Self::base62()
    }
}

impl PositionUsecase for PositionEngine {
    fn generate_position(
        &self,
        before: Option<&str>,
        after: Option<&str>,
    ) -> Result<PositionKey> {
        self.generator.generate(before, after)
    }

    fn validate_and_fix_position(
        &self,
        item_id: &str,
        collection_id: &str,
        requested: &str,
        items: &[OrderedItem],
    ) -> (PositionKey, bool) {
        self.validator
            .validate_and_fix(item_id, collection_id, requested, items)
    }

    fn rebalance_positions(
        &self,
        items: &[OrderedItem],
        max_key_length: usize,
    ) -> Result<HashMap<ItemId, PositionKey>> {
        self.rebalancer.rebalance(items, max_key_length)
    }

    fn batch_generate_positions(
        &self,
        count: usize,
        before: Option<&str>,
        after: Option<&str>,
    ) -> Result<Vec<PositionKey>> {
        self.generator.generate_batch(count, before, after)
    }

    fn get_position_metrics(&self, items: &[OrderedItem]) -> PositionMetrics {
        PositionMetrics::collect(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PositionError;

    #[test]
    fn test_engine_wires_components_together() {
        let engine = PositionEngine::base62();

        let first = engine.generate_position(None, None).unwrap();
        assert_eq!(first, "V");

        let items = vec![OrderedItem::new("card-1", "list-1", first.clone())];
        let (second, fixed) =
            engine.validate_and_fix_position("card-2", "list-1", &first, &items);
        assert!(fixed);
        assert!(second > first);

        let metrics = engine.get_position_metrics(&items);
        assert_eq!(metrics.count, 1);
        assert!(!metrics.needs_rebalance);
    }

    #[test]
    fn test_engine_insert_move_rebalance_cycle() {
        let engine = PositionEngine::base62();
        let mut items: Vec<OrderedItem> = Vec::new();

        // Insert ten cards at the end, the way the create use-case does
        for i in 0..10 {
            let last = items.last().map(|item| item.position.as_str());
            let key = engine.generate_position(last, None).unwrap();
            items.push(OrderedItem::new(format!("card-{i}"), "list-1", key));
        }

        // Repeatedly move a card into the same top gap until keys grow
        for i in 0..12 {
            let key = engine
                .generate_position(
                    Some(&items[0].position),
                    Some(&items[1].position),
                )
                .unwrap();
            items[1].position = key;
            assert!(items[0].position < items[1].position, "move {i} broke order");
        }

        // Housekeeping: rebalance once metrics flag the collection
        let metrics = engine.get_position_metrics(&items);
        if metrics.needs_rebalance {
            let map = engine.rebalance_positions(&items, 8).unwrap();
            for item in &mut items {
                if let Some(key) = map.get(&item.id) {
                    item.position = key.clone();
                }
            }
        }

        let mut keys: Vec<&str> = items.iter().map(|item| item.position.as_str()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), items.len(), "keys must stay unique");
    }

    #[test]
    fn test_engine_batch_delegates() {
        let engine = PositionEngine::base62();

        let keys = engine.batch_generate_positions(4, None, None).unwrap();
        assert_eq!(keys.len(), 4);

        assert_eq!(
            engine.batch_generate_positions(0, None, None).unwrap_err(),
            PositionError::InvalidCount(0)
        );
    }

    /// A canned engine standing in for the real one, the substitution the
    /// trait exists for
    struct FixedPositions;

    impl PositionUsecase for FixedPositions {
        fn generate_position(
            &self,
            _before: Option<&str>,
            _after: Option<&str>,
        ) -> Result<PositionKey> {
            Ok("fixed".to_string())
        }

        fn validate_and_fix_position(
            &self,
            _item_id: &str,
            _collection_id: &str,
            requested: &str,
            _items: &[OrderedItem],
        ) -> (PositionKey, bool) {
            (requested.to_string(), false)
        }

        fn rebalance_positions(
            &self,
            _items: &[OrderedItem],
            _max_key_length: usize,
        ) -> Result<HashMap<ItemId, PositionKey>> {
            Ok(HashMap::new())
        }

        fn batch_generate_positions(
            &self,
            count: usize,
            _before: Option<&str>,
            _after: Option<&str>,
        ) -> Result<Vec<PositionKey>> {
            Ok(vec!["fixed".to_string(); count])
        }

        fn get_position_metrics(&self, items: &[OrderedItem]) -> PositionMetrics {
            PositionMetrics::collect(items)
        }
    }

    fn create_item(engine: &dyn PositionUsecase) -> Result<PositionKey> {
        engine.generate_position(None, None)
    }

    #[test]
    fn test_trait_accepts_a_test_double() {
        assert_eq!(create_item(&FixedPositions).unwrap(), "fixed");
        assert_eq!(create_item(&PositionEngine::base62()).unwrap(), "V");
    }
}
