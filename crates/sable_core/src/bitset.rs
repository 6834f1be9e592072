//! # Dynamic Bitset
//!
//! A growable bit vector backed by a byte array. Bits that were never set
//! read as 0, including bits past the current capacity, so callers can treat
//! the set as conceptually infinite and zero-filled.

/// Growable bit vector.
///
/// Used for entity liveness tracking and for the per-entity index of
/// attached component types.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DynamicBitset {
    bytes: Vec<u8>,
}

impl DynamicBitset {
    /// Creates an empty bitset.
    #[must_use]
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Creates a bitset with room for at least `bits` bits, all zero.
    ///
    /// Capacity rounds up to a whole number of bytes.
    #[must_use]
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: vec![0; bits.div_ceil(8)],
        }
    }

    /// Returns the bit at `index`.
    ///
    /// Bits beyond the current capacity read as 0.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        match self.bytes.get(index / 8) {
            Some(byte) => byte & (1 << (index % 8)) != 0,
            None => false,
        }
    }

    /// Sets the bit at `index` to `value`, growing to cover it if needed.
    ///
    /// Growth zero-fills; setting a far bit leaves everything between as 0.
    #[inline]
    pub fn set(&mut self, index: usize, value: bool) {
        if index >= self.capacity() {
            self.grow(index + 1);
        }
        let byte = &mut self.bytes[index / 8];
        let mask = 1 << (index % 8);
        if value {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }

    /// Extends capacity to at least `bits` bits. Never shrinks.
    pub fn grow(&mut self, bits: usize) {
        let bytes = bits.div_ceil(8);
        if bytes > self.bytes.len() {
            self.bytes.resize(bytes, 0);
        }
    }

    /// Current capacity in bits.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes.len() * 8
    }

    /// Number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Iterates the indices of set bits in ascending order.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bytes.iter().enumerate().flat_map(|(i, byte)| {
            (0..8)
                .filter(move |bit| byte & (1 << bit) != 0)
                .map(move |bit| i * 8 + bit)
        })
    }

    /// Clears every bit without releasing capacity.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }
}
