//! JavaScript bindings for the OrderKit position engine

use crate::engine::{PositionEngine, PositionUsecase};
use crate::item::OrderedItem;
use wasm_bindgen::prelude::*;

/// JavaScript-friendly wrapper for PositionEngine
///
/// Collection snapshots cross the boundary as JSON strings:
/// `[{"id": "...", "collection_id": "...", "position": "..."}]`.
#[wasm_bindgen]
pub struct WasmPositionEngine {
    inner: PositionEngine,
}

impl Default for WasmPositionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmPositionEngine {
    /// Create an engine over the canonical base-62 alphabet
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: PositionEngine::base62(),
        }
    }

    /// Generate a key strictly between two optional neighbors
    #[wasm_bindgen(js_name = generatePosition)]
    pub fn generate_position(
        &self,
        before: Option<String>,
        after: Option<String>,
    ) -> Result<String, JsValue> {
        self.inner
            .generate_position(before.as_deref(), after.as_deref())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Accept or repair a proposed key (pass the snapshot as a JSON array)
    ///
    /// Returns `{"position": "...", "fixed": bool}` as a JSON string.
    #[wasm_bindgen(js_name = validateAndFixPosition)]
    pub fn validate_and_fix_position(
        &self,
        item_id: String,
        collection_id: String,
        requested: String,
        items_json: String,
    ) -> Result<String, JsValue> {
        let items = parse_items(&items_json)?;
        let (position, fixed) =
            self.inner
                .validate_and_fix_position(&item_id, &collection_id, &requested, &items);

        serde_json::to_string(&serde_json::json!({
            "position": position,
            "fixed": fixed,
        }))
        .map_err(|e| JsValue::from_str(&format!("Failed to encode result: {}", e)))
    }

    /// Compute replacement keys for an over-long collection
    ///
    /// Returns a JSON object mapping item id to new key; empty when no key
    /// exceeds `max_key_length`. Apply the whole map in one transaction.
    #[wasm_bindgen(js_name = rebalancePositions)]
    pub fn rebalance_positions(
        &self,
        items_json: String,
        max_key_length: usize,
    ) -> Result<String, JsValue> {
        let items = parse_items(&items_json)?;
        let map = self
            .inner
            .rebalance_positions(&items, max_key_length)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        serde_json::to_string(&map)
            .map_err(|e| JsValue::from_str(&format!("Failed to encode result: {}", e)))
    }

    /// Generate `count` strictly increasing keys inside a boundary pair
    #[wasm_bindgen(js_name = batchGeneratePositions)]
    pub fn batch_generate_positions(
        &self,
        count: usize,
        before: Option<String>,
        after: Option<String>,
    ) -> Result<Vec<String>, JsValue> {
        self.inner
            .batch_generate_positions(count, before.as_deref(), after.as_deref())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Key-length health metrics for a snapshot (returns a JSON object)
    #[wasm_bindgen(js_name = getPositionMetrics)]
    pub fn get_position_metrics(&self, items_json: String) -> Result<String, JsValue> {
        let items = parse_items(&items_json)?;
        let metrics = self.inner.get_position_metrics(&items);

        serde_json::to_string(&metrics)
            .map_err(|e| JsValue::from_str(&format!("Failed to encode result: {}", e)))
    }

    /// Compare two keys: -1, 0 or 1
    #[wasm_bindgen(js_name = comparePositions)]
    pub fn compare_positions(&self, a: String, b: String) -> i32 {
        match crate::compare_positions(&a, &b) {
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
            std::cmp::Ordering::Greater => 1,
        }
    }

    /// Whether `s` is a well-formed key for this engine's alphabet
    #[wasm_bindgen(js_name = isValidPositionString)]
    pub fn is_valid_position_string(&self, s: String) -> bool {
        self.inner.alphabet().is_valid_key(&s)
    }
}

fn parse_items(items_json: &str) -> Result<Vec<OrderedItem>, JsValue> {
    serde_json::from_str(items_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid items JSON: {}", e)))
}
