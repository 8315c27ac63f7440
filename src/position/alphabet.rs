//! KeyAlphabet: the ordered symbol set position keys are built from
//!
//! Every other component manipulates keys only through this type, so the
//! symbol set can be swapped (base-36, base-62, ...) without touching
//! generation logic. Symbols must be strictly increasing ASCII bytes: that is
//! what makes index arithmetic and byte-wise string comparison agree, which
//! the whole engine relies on.

/// Canonical base-62 symbol set in ASCII order: digits, uppercase, lowercase
const BASE62_SYMBOLS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// An ordered, fixed symbol set for building position keys
///
/// # Example
///
/// ```rust
/// use orderkit_core::KeyAlphabet;
///
/// let alphabet = KeyAlphabet::base62();
/// assert_eq!(alphabet.min_symbol(), b'0');
/// assert_eq!(alphabet.max_symbol(), b'z');
/// assert_eq!(alphabet.mid_symbol(), b'V');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyAlphabet {
    symbols: &'static [u8],
}

impl KeyAlphabet {
    /// The canonical base-62 alphabet (`0-9A-Za-z`)
    pub const fn base62() -> Self {
        Self {
            symbols: BASE62_SYMBOLS,
        }
    }

    /// Build an alphabet from a custom symbol set
    ///
    /// # Panics
    ///
    /// Panics unless `symbols` holds at least two strictly increasing ASCII
    /// bytes. Strict ordering is what keeps `symbol_to_index` monotonic with
    /// byte comparison, so it is enforced at construction.
    pub fn new(symbols: &'static [u8]) -> Self {
        assert!(symbols.len() >= 2, "alphabet needs at least two symbols");
        assert!(
            symbols.windows(2).all(|w| w[0] < w[1]),
            "alphabet symbols must be strictly increasing"
        );
        assert!(
            symbols.iter().all(|s| s.is_ascii()),
            "alphabet symbols must be ASCII"
        );
        Self { symbols }
    }

    /// Number of symbols (the base)
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false`; present for API completeness alongside `len`
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Smallest symbol (sorts first)
    pub fn min_symbol(&self) -> u8 {
        self.symbols[0]
    }

    /// Largest symbol (sorts last)
    pub fn max_symbol(&self) -> u8 {
        self.symbols[self.symbols.len() - 1]
    }

    /// Middle symbol, used for the very first key in an empty collection
    pub fn mid_symbol(&self) -> u8 {
        self.symbols[self.symbols.len() / 2]
    }

    /// Index of a symbol, or `None` for bytes outside the alphabet
    pub fn symbol_to_index(&self, symbol: u8) -> Option<usize> {
        // Symbols are sorted, so membership is a binary search
        self.symbols.binary_search(&symbol).ok()
    }

    /// Symbol at an index, or `None` past the end
    pub fn index_to_symbol(&self, index: usize) -> Option<u8> {
        self.symbols.get(index).copied()
    }

    /// Symbol at an index that is known to be in range
    ///
    /// Internal callers only pass indices derived from validated symbols, so
    /// a miss here is a bug and panics via slice indexing.
    pub(crate) fn symbol_at(&self, index: usize) -> u8 {
        self.symbols[index]
    }

    /// Whether a byte is one of the alphabet's symbols
    pub fn contains(&self, symbol: u8) -> bool {
        self.symbol_to_index(symbol).is_some()
    }

    /// Whether `key` is a well-formed position key: non-empty, symbols only
    pub fn is_valid_key(&self, key: &str) -> bool {
        !key.is_empty() && key.bytes().all(|b| self.contains(b))
    }
}

impl Default for KeyAlphabet {
    fn default() -> Self {
        Self::base62()
    }
}
