//! Container layout computation and validation.
//!
//! Field positions within a container are computed once, up front, without
//! eagerly decoding any field: fixed fields sit at a known offset from the
//! start of the container, and each variable field's 4-byte offset pointer
//! sits in place, interleaved with the fixed fields in declared order —
//! exactly where [`crate::encode::SszEncoder::append`] wrote it, not
//! grouped into a trailing table. [`ContainerLayout`] captures that shape;
//! [`ContainerLayout::validate`] checks an input buffer against it before
//! any field is decoded, so [`SszDecoderBuilder`](crate::decode::SszDecoderBuilder)
//! never has to unwind partial work on a malformed offset table.

use crate::{BYTES_PER_LENGTH_OFFSET, DecodeError};

/// Describes how to locate a field within an SSZ container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    /// The name of the field (for debugging).
    pub name: String,

    /// How to compute the field's offset.
    pub offset: FieldOffset,

    /// The type characteristics of the field.
    pub ty: FieldType,
}

/// Describes where a field is located within an SSZ container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOffset {
    /// Fixed offset from the start of the container (in bytes).
    ///
    /// Used for fixed-size fields.
    Fixed(usize),

    /// Byte position, within the container's fixed portion, of this
    /// field's 4-byte length-offset pointer.
    ///
    /// This is the field's own position in declared order — not an index
    /// into a trailing table — since a variable field's pointer can sit
    /// between two fixed fields.
    Variable(usize),
}

/// Describes the type characteristics of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// A basic fixed-size type (primitives, fixed arrays, etc.).
    Basic {
        /// The size of the type in bytes.
        size: usize,
    },

    /// A composite or variable-length type (containers, lists, etc.).
    Composite,
}

/// Describes the complete layout of an SSZ container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerLayout {
    /// The fields in the container, in order.
    pub fields: Vec<FieldLayout>,

    /// The total size of the fixed portion (in bytes).
    ///
    /// For containers with only fixed-size fields, this is the total size.
    /// For containers with variable-length fields, this is the size of the
    /// fixed portion (fixed fields in place, plus one 4-byte offset pointer
    /// per variable field, each at its own declared position).
    pub fixed_portion_size: usize,

    /// The total size of the container if all fields are fixed-size.
    ///
    /// [`None`] if the container has any variable-length fields.
    pub fixed_size: Option<usize>,
}

impl ContainerLayout {
    /// Validates that the given bytes conform to this container layout.
    ///
    /// This performs structural validation without decoding field values:
    ///
    /// - For fixed-size containers: checks byte length matches expected size
    /// - For variable-size containers: validates offset pointers in declared
    ///   order, wherever in the fixed portion they fall
    ///
    /// # Errors
    ///
    /// Returns an error if:
    ///
    /// - The byte length is incorrect for a fixed-size container
    /// - An offset pointer is malformed
    /// - Offsets are out of order or out of bounds
    pub fn validate(&self, bytes: &[u8]) -> Result<(), DecodeError> {
        if let Some(expected_size) = self.fixed_size {
            if bytes.len() != expected_size {
                return Err(DecodeError::ShortInput {
                    len: bytes.len(),
                    expected: expected_size,
                });
            }
            return Ok(());
        }

        let positions = self.variable_positions();
        if positions.is_empty() {
            return Ok(());
        }

        if bytes.len() < self.fixed_portion_size {
            return Err(DecodeError::ShortInput {
                len: bytes.len(),
                expected: self.fixed_portion_size,
            });
        }

        resolve_variable_starts(bytes, &positions, self.fixed_portion_size).map(|_| ())
    }

    /// The byte position of each variable field's offset pointer, in
    /// declared order.
    pub(crate) fn variable_positions(&self) -> Vec<usize> {
        self.fields
            .iter()
            .filter_map(|f| match f.offset {
                FieldOffset::Variable(pos) => Some(pos),
                FieldOffset::Fixed(_) => None,
            })
            .collect()
    }
}

/// Reads the 4-byte little-endian offset pointer at `pos` within `bytes`.
fn read_offset_at(bytes: &[u8], pos: usize) -> Result<usize, DecodeError> {
    let end = pos + BYTES_PER_LENGTH_OFFSET;
    if end > bytes.len() {
        return Err(DecodeError::ShortInput {
            len: bytes.len(),
            expected: end,
        });
    }
    let offset_bytes = &bytes[pos..end];
    Ok(u32::from_le_bytes([
        offset_bytes[0],
        offset_bytes[1],
        offset_bytes[2],
        offset_bytes[3],
    ]) as usize)
}

/// Reads and validates the offset pointer at each of `positions`, in
/// declared order, returning the resolved start byte of each variable
/// field's body.
///
/// The first variable field's body must start exactly at the end of the
/// fixed portion (no gap); each subsequent offset must be non-decreasing
/// and within `bytes`. This holds regardless of where, among the fixed
/// fields, a variable field's pointer itself is interleaved — the bodies
/// it points at are still appended to the buffer in declared order.
pub(crate) fn resolve_variable_starts(
    bytes: &[u8],
    positions: &[usize],
    fixed_portion_size: usize,
) -> Result<Vec<usize>, DecodeError> {
    let mut starts = Vec::with_capacity(positions.len());
    let mut prev: Option<usize> = None;

    for (i, &pos) in positions.iter().enumerate() {
        let offset = read_offset_at(bytes, pos)?;

        if i == 0 {
            if offset != fixed_portion_size {
                return Err(DecodeError::OffsetOutOfRange {
                    offset,
                    len: bytes.len(),
                });
            }
        } else if let Some(p) = prev
            && offset < p
        {
            return Err(DecodeError::NonMonotonicOffsets {
                offset,
                previous: p,
            });
        }

        if offset > bytes.len() {
            return Err(DecodeError::OffsetOutOfRange {
                offset,
                len: bytes.len(),
            });
        }

        starts.push(offset);
        prev = Some(offset);
    }

    Ok(starts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_size_container_validation() {
        let layout = ContainerLayout {
            fields: vec![
                FieldLayout {
                    name: "a".to_string(),
                    offset: FieldOffset::Fixed(0),
                    ty: FieldType::Basic { size: 1 },
                },
                FieldLayout {
                    name: "b".to_string(),
                    offset: FieldOffset::Fixed(1),
                    ty: FieldType::Basic { size: 1 },
                },
            ],
            fixed_portion_size: 2,
            fixed_size: Some(2),
        };

        assert!(layout.validate(&[0x01, 0x02]).is_ok());
        assert!(layout.validate(&[0x01]).is_err());
        assert!(layout.validate(&[0x01, 0x02, 0x03]).is_err());
    }

    #[test]
    fn variable_size_container_validation() {
        let layout = ContainerLayout {
            fields: vec![
                FieldLayout {
                    name: "a".to_string(),
                    offset: FieldOffset::Fixed(0),
                    ty: FieldType::Basic { size: 1 },
                },
                FieldLayout {
                    name: "b".to_string(),
                    offset: FieldOffset::Variable(1),
                    ty: FieldType::Composite,
                },
            ],
            fixed_portion_size: 5,
            fixed_size: None,
        };

        let valid_bytes = vec![0x01, 0x05, 0x00, 0x00, 0x00, 0xAA, 0xBB];
        assert!(layout.validate(&valid_bytes).is_ok());

        let invalid_bytes = vec![0x01, 0x03, 0x00, 0x00, 0x00, 0xAA, 0xBB];
        assert!(layout.validate(&invalid_bytes).is_err());

        let invalid_bytes = vec![0x01, 0x10, 0x00, 0x00, 0x00, 0xAA];
        assert!(layout.validate(&invalid_bytes).is_err());

        assert!(layout.validate(&[0x01]).is_err());
    }

    #[test]
    fn multiple_variable_fields_validation() {
        let layout = ContainerLayout {
            fields: vec![
                FieldLayout {
                    name: "a".to_string(),
                    offset: FieldOffset::Variable(0),
                    ty: FieldType::Composite,
                },
                FieldLayout {
                    name: "b".to_string(),
                    offset: FieldOffset::Variable(4),
                    ty: FieldType::Composite,
                },
            ],
            fixed_portion_size: 8,
            fixed_size: None,
        };

        let valid_bytes = vec![
            0x08, 0x00, 0x00, 0x00, // offset 0 = 8
            0x0A, 0x00, 0x00, 0x00, // offset 1 = 10
            0xAA, 0xBB, // field a data
            0xCC, // field b data
        ];
        assert!(layout.validate(&valid_bytes).is_ok());

        let invalid_bytes = vec![
            0x0A, 0x00, 0x00, 0x00, // offset 0 = 10 (should be 8)
            0x08, 0x00, 0x00, 0x00, // offset 1 = 8 (< offset 0, and wrong first offset anyway)
            0xAA, 0xBB, 0xCC,
        ];
        assert!(layout.validate(&invalid_bytes).is_err());
    }

    #[test]
    fn interleaved_variable_field_validation() {
        // a: Vec<u8> (variable, pointer at byte 0), b: u16 (fixed, at byte 4).
        // Fixed portion is 6 bytes: [offset(4)][b(2)].
        let layout = ContainerLayout {
            fields: vec![
                FieldLayout {
                    name: "a".to_string(),
                    offset: FieldOffset::Variable(0),
                    ty: FieldType::Composite,
                },
                FieldLayout {
                    name: "b".to_string(),
                    offset: FieldOffset::Fixed(4),
                    ty: FieldType::Basic { size: 2 },
                },
            ],
            fixed_portion_size: 6,
            fixed_size: None,
        };

        let valid_bytes = vec![
            0x06, 0x00, 0x00, 0x00, // offset for a = 6 (end of fixed portion)
            0x2a, 0x00, // b = 42
            0x01, 0x02, 0x03, // a's body
        ];
        assert!(layout.validate(&valid_bytes).is_ok());
    }

    #[test]
    fn resolve_variable_starts_reads_positions_in_declared_order() {
        let bytes = vec![
            0x08, 0x00, 0x00, 0x00, // offset 0 = 8
            0x0A, 0x00, 0x00, 0x00, // offset 1 = 10
            0xAA, 0xBB, 0xCC,
        ];

        let starts = resolve_variable_starts(&bytes, &[0, 4], 8).unwrap();
        assert_eq!(starts, vec![8, 10]);

        assert!(resolve_variable_starts(&bytes, &[0, 4], 4).is_err());
    }
}
