//! Tables of strings already present in the stream.
//!
//! [`SharedStrings`] is owned by an [`Encoder`](crate::Encoder) and remembers
//! where each string was last written, so a repeated string can be replaced
//! with a back-reference. [`ResolvedStrings`] is owned by a
//! [`Decoder`](crate::Decoder) and memoizes strings already resolved at a
//! given offset.
#[cfg(feature = "std")]
use std::{collections::{BTreeMap, BTreeSet}, string::String, sync::Arc};
#[cfg(all(feature = "alloc",not(feature = "std")))]
use alloc::{collections::{BTreeMap, BTreeSet}, string::String, sync::Arc};

/// Strings shorter than this are never shared.
pub const MINIMUM_STRING_LENGTH: usize = 3;
/// Upper bound on the total byte size of the tracked strings.
pub const MAXIMUM_BYTE_SIZE: usize = 20_971_520;

/// Size limits of a strings table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheLimits {
    /// Strings shorter than this many bytes are not tracked.
    pub minimum_length: usize,
    /// The total size of the tracked strings stays below this many bytes.
    /// Single strings of at least this size are not tracked.
    pub maximum_byte_size: usize,
}

impl Default for CacheLimits {
    fn default() -> Self {
        CacheLimits {
            minimum_length: MINIMUM_STRING_LENGTH,
            maximum_byte_size: MAXIMUM_BYTE_SIZE
        }
    }
}

impl CacheLimits {
    #[inline]
    fn admits(&self, size: usize) -> bool {
        size >= self.minimum_length && size < self.maximum_byte_size
    }
}

/// The framing found at a recorded offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    /// Offset of the raw UTF-8 bytes of a string.
    Standalone,
    /// Offset of a `varint(length + 1)` framing or of a pointer to one.
    PrefixLengthVarintPlusOne,
}

impl Kind {
    #[inline]
    const fn slot(self) -> usize {
        match self {
            Kind::Standalone => 0,
            Kind::PrefixLengthVarintPlusOne => 1
        }
    }
}

/// Encoder side table: the most recent offset of every string, per [`Kind`].
///
/// Offsets recorded for a string only ever increase. When the table would
/// grow past [`CacheLimits::maximum_byte_size`] the entries with the lowest
/// offsets are evicted first.
#[derive(Debug, Clone, Default)]
pub struct SharedStrings {
    limits: CacheLimits,
    data: BTreeMap<Arc<str>, [Option<u64>; 2]>,
    order: BTreeSet<(u64, Kind, Arc<str>)>,
    byte_size: usize,
}

impl SharedStrings {
    /// Create an empty table with default limits
    pub fn new() -> Self {
        Self::default()
    }
    /// Create an empty table with custom limits
    pub fn with_limits(limits: CacheLimits) -> Self {
        SharedStrings { limits, ..Self::default() }
    }
    /// Return the number of tracked entries
    pub fn len(&self) -> usize {
        self.order.len()
    }
    /// Return `true` if nothing is tracked
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
    /// Return the total byte size of the tracked strings
    pub fn byte_size(&self) -> usize {
        self.byte_size
    }
    /// Return the offset at which `value` was last recorded as `kind`.
    pub fn find(&self, value: &str, kind: Kind) -> Option<u64> {
        self.data.get(value).and_then(|slots| slots[kind.slot()])
    }
    /// Record that `value` can be found at `offset` as `kind`.
    ///
    /// Strings outside of the configured limits are ignored and an offset
    /// lower than the one already recorded is ignored too.
    pub fn record(&mut self, value: &str, offset: u64, kind: Kind) {
        let size = value.len();
        if !self.limits.admits(size) {
            return
        }

        while !self.order.is_empty() && self.byte_size + size >= self.limits.maximum_byte_size {
            self.remove_oldest();
        }

        let key = match self.data.get_key_value(value) {
            Some((key, _)) => Arc::clone(key),
            None => {
                let key: Arc<str> = Arc::from(value);
                self.data.insert(Arc::clone(&key), [None, None]);
                key
            }
        };
        let Some(slots) = self.data.get_mut(value) else { return };
        match slots[kind.slot()] {
            Some(current) if current >= offset => {}
            Some(current) => {
                slots[kind.slot()] = Some(offset);
                self.order.remove(&(current, kind, Arc::clone(&key)));
                self.order.insert((offset, kind, key));
            }
            None => {
                slots[kind.slot()] = Some(offset);
                self.byte_size += size;
                self.order.insert((offset, kind, key));
            }
        }
    }
    /// Evict the entry with the lowest offset.
    pub fn remove_oldest(&mut self) {
        let Some((_, kind, key)) = self.order.pop_first() else { return };
        self.byte_size -= key.len();
        if let Some(slots) = self.data.get_mut(&*key) {
            slots[kind.slot()] = None;
            if slots.iter().all(Option::is_none) {
                self.data.remove(&*key);
            }
        }
    }
}

/// Decoder side table: strings already resolved at a given offset.
///
/// The total size of the memoized strings is bounded the same way as
/// [`SharedStrings`], evicting the lowest offsets first.
#[derive(Debug, Clone, Default)]
pub struct ResolvedStrings {
    limits: CacheLimits,
    data: BTreeMap<(u64, Kind), String>,
    byte_size: usize,
}

impl ResolvedStrings {
    /// Create an empty table with default limits
    pub fn new() -> Self {
        Self::default()
    }
    /// Create an empty table with custom limits
    pub fn with_limits(limits: CacheLimits) -> Self {
        ResolvedStrings { limits, ..Self::default() }
    }
    /// Return the number of memoized strings
    pub fn len(&self) -> usize {
        self.data.len()
    }
    /// Return `true` if nothing is memoized
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    /// Return the string resolved at `offset` as `kind`.
    pub fn get(&self, offset: u64, kind: Kind) -> Option<&str> {
        self.data.get(&(offset, kind)).map(String::as_str)
    }
    /// Memoize `value` found at `offset` as `kind`.
    pub fn insert(&mut self, offset: u64, kind: Kind, value: &str) {
        let size = value.len();
        if !self.limits.admits(size) || self.data.contains_key(&(offset, kind)) {
            return
        }
        while self.byte_size + size >= self.limits.maximum_byte_size {
            match self.data.pop_first() {
                Some((_, evicted)) => self.byte_size -= evicted.len(),
                None => break
            }
        }
        self.byte_size += size;
        self.data.insert((offset, kind), String::from(value));
    }
}
