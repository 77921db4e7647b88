// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! Provides encoding (serialization) and decoding (deserialization) in the
//! SimpleSerialize (SSZ) format designed for use in Ethereum consensus.
//!
//! Dispatch is static: [`Encode`]/[`Decode`] are implemented once per type
//! in the supported value universe (`bool`, `u8`/`u16`/`u32`/`u64`, fixed
//! arrays, `Vec<T>`, `Box<T>`/`Arc<T>`, and `#[derive(Encode, Decode)]`
//! containers), so there is no runtime type switch to cache.
//!
//! ```rust
//! use ssz_derive::{Encode, Decode};
//! use ssz::{Decode, Encode};
//!
//! #[derive(PartialEq, Debug, Encode, Decode)]
//! struct Foo {
//!     a: u64,
//!     b: Vec<u16>,
//! }
//!
//! fn ssz_encode_decode_example() {
//!     let foo = Foo {
//!         a: 42,
//!         b: vec![1, 3, 3, 7]
//!     };
//!
//!     let ssz_bytes: Vec<u8> = foo.as_ssz_bytes();
//!     let decoded_foo = Foo::from_ssz_bytes(&ssz_bytes).unwrap();
//!     assert_eq!(foo, decoded_foo);
//! }
//! ```
//!
//! See `examples/` for encode/decode throughput benchmarks.

pub mod decode;
pub mod encode;
pub mod layout;

pub use decode::{Decode, DecodeError, SszDecoder, SszDecoderBuilder, decode_list_of_variable_length_items, read_offset, unmarshal};
pub use encode::{Encode, EncodeError, SszEncoder, encode_length, marshal};

/// The number of bytes used to represent a length offset.
pub const BYTES_PER_LENGTH_OFFSET: usize = 4;
/// The maximum value that can be represented using `BYTES_PER_LENGTH_OFFSET`.
#[cfg(target_pointer_width = "32")]
pub const MAX_LENGTH_VALUE: usize = (u32::MAX >> (8 * (4 - BYTES_PER_LENGTH_OFFSET))) as usize;
/// The maximum value that can be represented using `BYTES_PER_LENGTH_OFFSET`.
#[cfg(target_pointer_width = "64")]
pub const MAX_LENGTH_VALUE: usize = (u64::MAX >> (8 * (8 - BYTES_PER_LENGTH_OFFSET))) as usize;

/// Convenience function to SSZ encode an object supporting [`Encode`].
///
/// Equivalent to `val.as_ssz_bytes()`.
pub fn ssz_encode<T>(val: &T) -> Vec<u8>
where
    T: Encode,
{
    val.as_ssz_bytes()
}

/// Two values are deep-equal under SSZ if and only if their encodings
/// match. Fields marked `#[ssz(skip)]` are never serialized, so they are
/// automatically excluded from this comparison.
pub fn deep_equal<T: Encode>(a: &T, b: &T) -> bool {
    a.as_ssz_bytes() == b.as_ssz_bytes()
}
