//! WASM bindings for OrderKit
//!
//! This module provides JavaScript-friendly bindings for the position engine.

#[cfg(feature = "wasm")]
pub mod bindings;

#[cfg(feature = "wasm")]
pub mod utils;

// Re-export main types
#[cfg(feature = "wasm")]
pub use bindings::WasmPositionEngine;
