//! The SSZ unmarshaller.
//!
//! Dispatch is driven by the target's static type, mirroring [`crate::encode`]
//! exactly: fixed-size values consume their declared byte length, composite
//! values read an offset table before decoding any element.

use std::sync::Arc;

use crate::BYTES_PER_LENGTH_OFFSET;
use crate::layout::{ContainerLayout, FieldLayout, FieldOffset, FieldType, resolve_variable_starts};

/// Returned by [`Decode::from_ssz_bytes`] and [`crate::unmarshal`] when a
/// byte sequence cannot be decoded into the target type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The unmarshal target was null or otherwise non-mutable.
    ///
    /// Unreachable through the safe API: `unmarshal` takes `&mut T`, which
    /// the type system guarantees is non-null. Kept for parity with the
    /// error taxonomy this codec implements.
    #[error("unmarshal target is null or non-mutable")]
    NilTarget,

    /// The static type being decoded falls outside the supported value
    /// universe (bool, u8/u16/u32/u64, Vector, List, Container, Indirect).
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// A `bool`'s wire byte was neither `0x00` nor `0x01`.
    #[error("invalid bool byte {0:#04x}, expected 0x00 or 0x01")]
    BadBool(u8),

    /// Not enough bytes remained to satisfy a type's declared fixed size.
    #[error("insufficient bytes: got {len}, expected {expected}")]
    ShortInput {
        /// The number of bytes actually available.
        len: usize,
        /// The number of bytes required.
        expected: usize,
    },

    /// A decoded offset fell outside `[0, len(input)]`.
    #[error("offset {offset} out of range for input of length {len}")]
    OffsetOutOfRange {
        /// The out-of-range offset.
        offset: usize,
        /// The length of the input buffer.
        len: usize,
    },

    /// Successive offsets in an offset table decreased.
    #[error("offsets are not monotonically increasing: {offset} follows {previous}")]
    NonMonotonicOffsets {
        /// The offset that violated monotonicity.
        offset: usize,
        /// The offset immediately before it.
        previous: usize,
    },

    /// An `ssz-size`/`ssz-max` field tag did not parse as an integer (or
    /// `?`).
    #[error("malformed field size tag: {0}")]
    BadFieldTag(String),

    /// A fixed-length vector's wire length did not match its declared
    /// length.
    #[error("vector length mismatch: got {len} bytes, expected {expected}")]
    BadVectorLength {
        /// The number of bytes actually available.
        len: usize,
        /// The number of bytes the vector's declared length requires.
        expected: usize,
    },

    /// `signing_root` was called on a value whose type is not a container.
    ///
    /// In this codec that restriction is enforced by a trait bound at
    /// compile time (see `tree_hash::signing_root`), so this variant is
    /// never constructed at runtime; it exists for taxonomy completeness.
    #[error("signing_root called on a non-container type")]
    NotAContainer,
}

/// A type that can be decoded from SSZ-serialized bytes.
pub trait Decode: Sized {
    /// Returns `true` if this type's encoded length is the same for all
    /// values of the type.
    fn is_ssz_fixed_len() -> bool;

    /// The number of bytes this type occupies in a container's fixed
    /// portion. See [`crate::Encode::ssz_fixed_len`].
    fn ssz_fixed_len() -> usize {
        BYTES_PER_LENGTH_OFFSET
    }

    /// Decode `bytes` as a complete, standalone value of `Self`.
    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError>;
}

/// Top-level entry point for the unmarshaller: `unmarshal(bytes, target) ->
/// ()`, writing the decoded value into the caller-owned `target`.
pub fn unmarshal<T: Decode>(bytes: &[u8], target: &mut T) -> Result<(), DecodeError> {
    *target = T::from_ssz_bytes(bytes)?;
    Ok(())
}

/// Reads a single 4-byte little-endian length offset from the start of
/// `bytes`.
pub fn read_offset(bytes: &[u8]) -> Result<usize, DecodeError> {
    if bytes.len() < BYTES_PER_LENGTH_OFFSET {
        return Err(DecodeError::ShortInput {
            len: bytes.len(),
            expected: BYTES_PER_LENGTH_OFFSET,
        });
    }
    let mut array = [0u8; BYTES_PER_LENGTH_OFFSET];
    array.copy_from_slice(&bytes[..BYTES_PER_LENGTH_OFFSET]);
    Ok(u32::from_le_bytes(array) as usize)
}

/// Decodes a `List`/`Vector` of variable-size elements: the first offset
/// gives `4 * N`, from which the element count `N` falls out; reading `N`
/// offsets (plus a synthetic terminal offset of `bytes.len()`) and slicing
/// between consecutive pairs recovers each element's bytes.
pub fn decode_list_of_variable_length_items<T: Decode>(bytes: &[u8]) -> Result<Vec<T>, DecodeError> {
    if bytes.is_empty() {
        return Ok(vec![]);
    }

    let first_offset = read_offset(bytes)?;
    if first_offset < BYTES_PER_LENGTH_OFFSET
        || first_offset % BYTES_PER_LENGTH_OFFSET != 0
        || first_offset > bytes.len()
    {
        return Err(DecodeError::OffsetOutOfRange {
            offset: first_offset,
            len: bytes.len(),
        });
    }
    let num_items = first_offset / BYTES_PER_LENGTH_OFFSET;

    let mut offsets = Vec::with_capacity(num_items + 1);
    offsets.push(first_offset);
    let mut prev = first_offset;
    for i in 1..num_items {
        let pos = i * BYTES_PER_LENGTH_OFFSET;
        let offset = read_offset(&bytes[pos..])?;
        if offset < prev {
            return Err(DecodeError::NonMonotonicOffsets {
                offset,
                previous: prev,
            });
        }
        if offset > bytes.len() {
            return Err(DecodeError::OffsetOutOfRange {
                offset,
                len: bytes.len(),
            });
        }
        offsets.push(offset);
        prev = offset;
    }
    offsets.push(bytes.len());

    offsets
        .windows(2)
        .map(|pair| T::from_ssz_bytes(&bytes[pair[0]..pair[1]]))
        .collect()
}

impl Decode for bool {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        1
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != 1 {
            return Err(DecodeError::ShortInput {
                len: bytes.len(),
                expected: 1,
            });
        }
        match bytes[0] {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DecodeError::BadBool(other)),
        }
    }
}

macro_rules! impl_decode_for_uint {
    ($ty: ty, $byte_size: expr) => {
        impl Decode for $ty {
            fn is_ssz_fixed_len() -> bool {
                true
            }

            fn ssz_fixed_len() -> usize {
                $byte_size
            }

            fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
                if bytes.len() != $byte_size {
                    return Err(DecodeError::ShortInput {
                        len: bytes.len(),
                        expected: $byte_size,
                    });
                }
                let mut array = [0u8; $byte_size];
                array.copy_from_slice(bytes);
                Ok(<$ty>::from_le_bytes(array))
            }
        }
    };
}

impl_decode_for_uint!(u8, 1);
impl_decode_for_uint!(u16, 2);
impl_decode_for_uint!(u32, 4);
impl_decode_for_uint!(u64, 8);

impl<T: Decode> Decode for Box<T> {
    fn is_ssz_fixed_len() -> bool {
        T::is_ssz_fixed_len()
    }

    fn ssz_fixed_len() -> usize {
        T::ssz_fixed_len()
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        T::from_ssz_bytes(bytes).map(Box::new)
    }
}

impl<T: Decode> Decode for Arc<T> {
    fn is_ssz_fixed_len() -> bool {
        T::is_ssz_fixed_len()
    }

    fn ssz_fixed_len() -> usize {
        T::ssz_fixed_len()
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        T::from_ssz_bytes(bytes).map(Arc::new)
    }
}

/// `Vec<T>` is always List-shaped: empty input decodes to an empty list,
/// never an error.
impl<T: Decode> Decode for Vec<T> {
    fn is_ssz_fixed_len() -> bool {
        false
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.is_empty() {
            return Ok(vec![]);
        }

        if T::is_ssz_fixed_len() {
            let elem_size = T::ssz_fixed_len();
            if elem_size == 0 || bytes.len() % elem_size != 0 {
                return Err(DecodeError::BadVectorLength {
                    len: bytes.len(),
                    expected: elem_size,
                });
            }
            bytes.chunks(elem_size).map(T::from_ssz_bytes).collect()
        } else {
            decode_list_of_variable_length_items(bytes)
        }
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn is_ssz_fixed_len() -> bool {
        T::is_ssz_fixed_len()
    }

    fn ssz_fixed_len() -> usize {
        if T::is_ssz_fixed_len() {
            T::ssz_fixed_len() * N
        } else {
            BYTES_PER_LENGTH_OFFSET
        }
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let items: Vec<T> = if T::is_ssz_fixed_len() {
            let elem_size = T::ssz_fixed_len();
            let expected = elem_size * N;
            if bytes.len() < expected {
                return Err(DecodeError::ShortInput {
                    len: bytes.len(),
                    expected,
                });
            }
            if bytes.len() != expected {
                return Err(DecodeError::BadVectorLength {
                    len: bytes.len(),
                    expected,
                });
            }
            bytes
                .chunks(elem_size)
                .map(T::from_ssz_bytes)
                .collect::<Result<_, _>>()?
        } else {
            decode_list_of_variable_length_items(bytes)?
        };

        let len = items.len();
        items.try_into().map_err(|_| DecodeError::BadVectorLength {
            len,
            expected: N,
        })
    }
}

/// Builds a [`SszDecoder`] for a container: fields are registered in
/// declared order, the fixed portion and offset pointers are validated
/// once all fields are known, then each field's byte slice is resolved.
pub struct SszDecoderBuilder<'a> {
    bytes: &'a [u8],
    fields: Vec<FieldLayout>,
    fixed_bytes_sum: usize,
    num_variable: usize,
}

impl<'a> SszDecoderBuilder<'a> {
    /// Start building a decoder over `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            fields: Vec::new(),
            fixed_bytes_sum: 0,
            num_variable: 0,
        }
    }

    /// Register the next field's type in declared order.
    pub fn register_type<T: Decode>(&mut self) -> Result<(), DecodeError> {
        let index = self.fields.len();
        if T::is_ssz_fixed_len() {
            let size = T::ssz_fixed_len();
            self.fields.push(FieldLayout {
                name: index.to_string(),
                offset: FieldOffset::Fixed(self.fixed_bytes_sum),
                ty: FieldType::Basic { size },
            });
            self.fixed_bytes_sum += size;
        } else {
            // The pointer's own byte position, not an index into a
            // trailing table: a variable field's offset can be preceded
            // or followed by fixed fields.
            self.fields.push(FieldLayout {
                name: index.to_string(),
                offset: FieldOffset::Variable(self.fixed_bytes_sum),
                ty: FieldType::Composite,
            });
            self.num_variable += 1;
            self.fixed_bytes_sum += BYTES_PER_LENGTH_OFFSET;
        }
        Ok(())
    }

    /// Validate the registered layout against the input and resolve each
    /// field's byte slice, ready for sequential [`SszDecoder::decode_next`]
    /// calls.
    pub fn build(self) -> Result<SszDecoder<'a>, DecodeError> {
        let bytes = self.bytes;
        let fixed_portion_size = self.fixed_bytes_sum;
        let num_variable = self.num_variable;

        let layout = ContainerLayout {
            fields: self.fields,
            fixed_portion_size,
            fixed_size: if num_variable == 0 {
                Some(fixed_portion_size)
            } else {
                None
            },
        };
        layout.validate(bytes)?;

        // Resolve each variable field's body start, in declared order,
        // then pair consecutive starts (with the container's end as the
        // final terminal) to get each field's slice.
        let variable_positions = layout.variable_positions();
        let variable_starts = resolve_variable_starts(bytes, &variable_positions, fixed_portion_size)
            .expect("validated by ContainerLayout::validate");

        let mut next_variable = 0usize;
        let slices = layout
            .fields
            .iter()
            .map(|field| match field.offset {
                FieldOffset::Fixed(start) => {
                    let size = match field.ty {
                        FieldType::Basic { size } => size,
                        FieldType::Composite => unreachable!("fixed offset implies basic field"),
                    };
                    &bytes[start..start + size]
                }
                FieldOffset::Variable(_) => {
                    let start = variable_starts[next_variable];
                    let end = variable_starts
                        .get(next_variable + 1)
                        .copied()
                        .unwrap_or(bytes.len());
                    next_variable += 1;
                    &bytes[start..end]
                }
            })
            .collect();

        Ok(SszDecoder { slices, index: 0 })
    }
}

/// Decodes container fields in declared order from slices resolved by
/// [`SszDecoderBuilder`].
pub struct SszDecoder<'a> {
    slices: Vec<&'a [u8]>,
    index: usize,
}

impl<'a> SszDecoder<'a> {
    /// Decode the next registered field.
    pub fn decode_next<T: Decode>(&mut self) -> Result<T, DecodeError> {
        let slice = self.slices.get(self.index).ok_or(DecodeError::ShortInput {
            len: 0,
            expected: 0,
        })?;
        self.index += 1;
        T::from_ssz_bytes(slice)
    }
}
