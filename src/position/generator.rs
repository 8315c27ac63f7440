//! PositionGenerator: a key strictly between two neighbors
//!
//! The generator is the heart of the engine. Given the keys of an item's
//! intended left and right neighbors (either may be absent at an open end),
//! it produces a new key that byte-compares strictly between them, without
//! touching any other item.
//!
//! All of it is plain positional arithmetic over the alphabet: decrement
//! with borrow to slide below a key, increment or extend to slide above one,
//! and midpoint-or-extend to land between two. Keys grow in length only when
//! the gap between neighbors has no free symbol, so repeated insertion into
//! the same gap is what eventually triggers a rebalance.
//!
//! # Example
//!
//! ```rust
//! use orderkit_core::{KeyAlphabet, PositionGenerator};
//!
//! let generator = PositionGenerator::new(KeyAlphabet::base62());
//!
//! // First key in an empty collection
//! assert_eq!(generator.generate(None, None).unwrap(), "V");
//!
//! // Midpoint when the neighbors leave a gap
//! assert_eq!(generator.generate(Some("a"), Some("c")).unwrap(), "b");
//!
//! // Adjacent neighbors force a longer key
//! let key = generator.generate(Some("a"), Some("b")).unwrap();
//! assert!("a" < key.as_str() && key.as_str() < "b");
//! ```

use crate::error::{PositionError, Result};
use crate::position::KeyAlphabet;
use crate::PositionKey;

/// Generates position keys over a [`KeyAlphabet`]
///
/// Stateless and cheap to copy; every call is a pure function of its
/// arguments.
#[derive(Debug, Clone, Copy)]
pub struct PositionGenerator {
    alphabet: KeyAlphabet,
}

impl PositionGenerator {
    /// Create a generator over the given alphabet
    pub fn new(alphabet: KeyAlphabet) -> Self {
        Self { alphabet }
    }

    /// The alphabet this generator builds keys from
    pub fn alphabet(&self) -> &KeyAlphabet {
        &self.alphabet
    }

    /// Generate a key strictly between `before` and `after`
    ///
    /// Either boundary may be `None` for an open end:
    ///
    /// - both absent: the alphabet's mid symbol (first key of a collection)
    /// - only `after`: a key sorting strictly below it, or
    ///   [`PositionError::CannotGenerateBefore`] when `after` is all-minimal
    /// - only `before`: a key sorting strictly above it (never fails; keys
    ///   extend in length instead of overflowing)
    /// - both present: a key strictly inside the interval; requires
    ///   `before < after` ([`PositionError::InvalidOrder`] otherwise)
    ///
    /// Supplied keys must be non-empty and alphabet-valid
    /// ([`PositionError::InvalidKey`]).
    pub fn generate(&self, before: Option<&str>, after: Option<&str>) -> Result<PositionKey> {
        if let Some(key) = before {
            self.check_key(key)?;
        }
        if let Some(key) = after {
            self.check_key(key)?;
        }

        match (before, after) {
            (None, None) => Ok((self.alphabet.mid_symbol() as char).to_string()),
            (None, Some(after)) => self.key_before(after),
            (Some(before), None) => Ok(self.key_after(before)),
            (Some(before), Some(after)) => {
                if before >= after {
                    return Err(PositionError::InvalidOrder {
                        before: before.to_string(),
                        after: after.to_string(),
                    });
                }
                self.key_between(before, after)
            }
        }
    }

    /// Generate `count` strictly increasing keys inside `(before, after)`
    ///
    /// Each produced key becomes the left boundary of the next call while the
    /// original `after` bounds every call, so the whole batch lands inside
    /// the interval in order. `count == 0` is rejected with
    /// [`PositionError::InvalidCount`].
    pub fn generate_batch(
        &self,
        count: usize,
        before: Option<&str>,
        after: Option<&str>,
    ) -> Result<Vec<PositionKey>> {
        if count == 0 {
            return Err(PositionError::InvalidCount(count));
        }

        let mut keys: Vec<PositionKey> = Vec::with_capacity(count);
        let mut cursor = before.map(str::to_string);

        for _ in 0..count {
            let key = self.generate(cursor.as_deref(), after)?;
            cursor = Some(key.clone());
            keys.push(key);
        }

        Ok(keys)
    }

    /// Greatest-below construction: a key sorting strictly below `key`
    ///
    /// Walks right to left past minimal symbols (the borrow of positional
    /// subtraction), decrements the first decrementable one and appends the
    /// max symbol to leave room below the result. A key made entirely of the
    /// minimal symbol has nothing below it.
    fn key_before(&self, key: &str) -> Result<PositionKey> {
        let bytes = key.as_bytes();

        for i in (0..bytes.len()).rev() {
            let index = self.symbol_index(bytes[i], key)?;
            if index > 0 {
                let mut out = String::with_capacity(i + 2);
                out.push_str(&key[..i]);
                out.push(self.symbol_at(index - 1));
                out.push(self.alphabet.max_symbol() as char);
                return Ok(out);
            }
        }

        Err(PositionError::CannotGenerateBefore(key.to_string()))
    }

    /// Least-above construction: a key sorting strictly above `key`
    ///
    /// Increments the final symbol when it is not maximal. A saturated tail
    /// extends with the min symbol instead of carrying leftward: a carry
    /// would rewrite the prefix and could drop the result below other keys
    /// that share it.
    fn key_after(&self, key: &str) -> PositionKey {
        let bytes = key.as_bytes();
        let last = bytes[bytes.len() - 1];

        match self.alphabet.symbol_to_index(last) {
            Some(index) if index + 1 < self.alphabet.len() => {
                let mut out = String::with_capacity(key.len());
                out.push_str(&key[..key.len() - 1]);
                out.push(self.symbol_at(index + 1));
                out
            }
            _ => {
                let mut out = String::with_capacity(key.len() + 1);
                out.push_str(key);
                out.push(self.alphabet.min_symbol() as char);
                out
            }
        }
    }

    /// A key strictly inside `(before, after)`, `before < after` guaranteed
    fn key_between(&self, before: &str, after: &str) -> Result<PositionKey> {
        let a = before.as_bytes();
        let b = after.as_bytes();

        let prefix_len = a.iter().zip(b).take_while(|(x, y)| x == y).count();
        let prefix = &before[..prefix_len];

        if prefix_len == a.len() {
            // `before` is a proper prefix of `after`: the result keeps the
            // prefix and squeezes in below the remainder of `after`.
            let suffix = self.key_before(&after[prefix_len..]).map_err(|err| {
                match err {
                    PositionError::CannotGenerateBefore(_) => {
                        // Name the full boundary key, not the suffix
                        PositionError::CannotGenerateBefore(after.to_string())
                    }
                    other => other,
                }
            })?;
            return Ok(format!("{prefix}{suffix}"));
        }

        let low = self.symbol_index(a[prefix_len], before)?;
        let high = self.symbol_index(b[prefix_len], after)?;

        if high - low > 1 {
            // A free symbol exists at this position: take the midpoint.
            let mid = self.symbol_at((low + high) / 2);
            return Ok(format!("{prefix}{mid}"));
        }

        // Adjacent symbols at the first difference: the result must extend
        // into one of the suffixes.
        let before_suffix = &before[prefix_len + 1..];
        if !before_suffix.is_empty() {
            // Anything above the before-suffix still sorts below `after`,
            // because the symbol at this position is already smaller.
            let suffix = self.key_after(before_suffix);
            return Ok(format!("{prefix}{}{suffix}", a[prefix_len] as char));
        }

        let after_suffix = &after[prefix_len + 1..];
        if !after_suffix.is_empty() {
            if let Ok(suffix) = self.key_before(after_suffix) {
                return Ok(format!("{prefix}{}{suffix}", b[prefix_len] as char));
            }
            // All-minimal after-suffix ("b0"): nothing fits below it, so
            // extend the before side instead.
        }

        Ok(format!(
            "{prefix}{}{}",
            a[prefix_len] as char,
            self.alphabet.mid_symbol() as char
        ))
    }

    /// Index of a symbol inside a key that already passed validation
    fn symbol_index(&self, symbol: u8, key: &str) -> Result<usize> {
        self.alphabet
            .symbol_to_index(symbol)
            .ok_or_else(|| PositionError::InvalidKey(key.to_string()))
    }

    fn symbol_at(&self, index: usize) -> char {
        self.alphabet.symbol_at(index) as char
    }

    fn check_key(&self, key: &str) -> Result<()> {
        if self.alphabet.is_valid_key(key) {
            Ok(())
        } else {
            Err(PositionError::InvalidKey(key.to_string()))
        }
    }
}

impl Default for PositionGenerator {
    fn default() -> Self {
        Self::new(KeyAlphabet::base62())
    }
}
