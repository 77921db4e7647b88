// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! Primitive types shared by the `ssz`, `ssz_types`, and `tree_hash` crates.
//!
//! [`FixedBytes`] is the one primitive the codec core needs: a fixed-length
//! byte array with the small set of conversions every `Vector<u8, N>`-shaped
//! SSZ value (hashes, addresses, signatures, ...) ends up wanting. `U256`/
//! `U128` and the `ruint` dependency that backed them are gone — the value
//! universe this codec serves is `bool`/`u8`/`u16`/`u32`/`u64` plus
//! composites of those, and nothing here needs a big-integer type.

use std::str::FromStr;

#[cfg(feature = "rand")]
use rand::RngCore;

/// A fixed-size byte array type.
///
/// A simple wrapper around `[u8; N]` with convenient methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedBytes<const N: usize>(pub [u8; N]);

impl<const N: usize> FixedBytes<N> {
    /// Create a new FixedBytes filled with zeros
    pub const fn zero() -> Self {
        Self([0u8; N])
    }

    /// Create a new FixedBytes filled with random bytes
    #[cfg(feature = "rand")]
    pub fn random() -> Self {
        let mut bytes = Self::zero();
        bytes.randomize();
        bytes
    }

    /// Fill this FixedBytes with random bytes
    #[cfg(feature = "rand")]
    pub fn randomize(&mut self) {
        rand::thread_rng().fill_bytes(&mut self.0);
    }

    /// Create filled with a specific byte
    pub const fn repeat_byte(byte: u8) -> Self {
        Self([byte; N])
    }

    /// Create from a slice, padding with zeros if needed
    pub fn from_slice(slice: &[u8]) -> Self {
        Self::right_padding_from(slice)
    }

    /// Create with right padding from the given slice
    pub fn right_padding_from(slice: &[u8]) -> Self {
        let mut result = [0u8; N];
        let len = slice.len().min(N);
        result[..len].copy_from_slice(&slice[..len]);
        Self(result)
    }

    /// Create with left padding from the given slice
    pub fn left_padding_from(slice: &[u8]) -> Self {
        let mut result = [0u8; N];
        let len = slice.len().min(N);
        let offset = N - len;
        result[offset..].copy_from_slice(&slice[..len]);
        Self(result)
    }

    /// Get as a byte slice
    pub const fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Convert to the inner byte array
    pub const fn into_inner(self) -> [u8; N] {
        self.0
    }

    /// Create from a hex string (with or without 0x prefix)
    pub fn from_hex_str(s: &str) -> Result<Self, hex::FromHexError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        if bytes.len() != N {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut result = [0u8; N];
        result.copy_from_slice(&bytes);
        Ok(Self(result))
    }
}

impl<const N: usize> From<[u8; N]> for FixedBytes<N> {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes)
    }
}

impl<const N: usize> AsRef<[u8]> for FixedBytes<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> AsMut<[u8]> for FixedBytes<N> {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl<const N: usize> Default for FixedBytes<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> FromStr for FixedBytes<N> {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_str(s)
    }
}

/// A 256-bit hash type (32 bytes).
pub type Hash256 = FixedBytes<32>;

impl Hash256 {
    /// A hash filled with zeros
    pub const ZERO: Self = Self::zero();
}
