// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! Tree hash implementations for different types

use std::sync::Arc;

use ssz_primitives::FixedBytes;

use super::*;

fn int_to_hasher_output<H: TreeHashDigest>(int: u64) -> H::Output {
    let mut bytes = vec![0; H::HASH_SIZE];
    bytes[0..8].copy_from_slice(&int.to_le_bytes());
    H::from_bytes(&bytes)
}

macro_rules! impl_for_bitsize {
    ($type: ident, $bit_size: expr) => {
        impl<H: TreeHashDigest> TreeHash<H> for $type {
            fn tree_hash_type() -> TreeHashType {
                TreeHashType::Basic
            }

            fn tree_hash_packed_encoding(&self) -> PackedEncoding {
                PackedEncoding::from_slice(&self.to_le_bytes())
            }

            fn tree_hash_packing_factor() -> usize {
                H::HASH_SIZE / ($bit_size / 8)
            }

            #[allow(clippy::cast_lossless)] // Lint does not apply to all uses of this macro.
            fn tree_hash_root(&self) -> H::Output {
                int_to_hasher_output::<H>(*self as u64)
            }
        }
    };
}

impl_for_bitsize!(u8, 8);
impl_for_bitsize!(u16, 16);
impl_for_bitsize!(u32, 32);
impl_for_bitsize!(u64, 64);
impl_for_bitsize!(usize, 64);

impl<H: TreeHashDigest> TreeHash<H> for bool {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Basic
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        <u8 as TreeHash<H>>::tree_hash_packed_encoding(&(*self as u8))
    }

    fn tree_hash_packing_factor() -> usize {
        <u8 as TreeHash<H>>::tree_hash_packing_factor()
    }

    fn tree_hash_root(&self) -> H::Output {
        int_to_hasher_output::<H>(*self as u64)
    }
}

impl<const N: usize, H: TreeHashDigest> TreeHash<H> for [u8; N] {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Vector
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        unreachable!("Vector should never be packed.")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("Vector should never be packed.")
    }

    fn tree_hash_root(&self) -> H::Output {
        let values_per_chunk = BYTES_PER_CHUNK;
        let minimum_chunk_count = N.div_ceil(values_per_chunk);
        merkle_root_with_hasher::<H>(self, minimum_chunk_count)
    }
}

// This implementation covers `Hash256` as well.
impl<const N: usize, H: TreeHashDigest> TreeHash<H> for FixedBytes<N> {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Vector
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        unreachable!("Vector should never be packed.")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("Vector should never be packed.")
    }

    fn tree_hash_root(&self) -> H::Output {
        if N <= 32 {
            H::from_bytes(&self.0)
        } else {
            let values_per_chunk = BYTES_PER_CHUNK;
            let minimum_chunk_count = N.div_ceil(values_per_chunk);
            merkle_root_with_hasher::<H>(&self.0, minimum_chunk_count)
        }
    }
}

impl<T: TreeHash<H>, H: TreeHashDigest> TreeHash<H> for Box<T> {
    fn tree_hash_type() -> TreeHashType {
        T::tree_hash_type()
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        self.as_ref().tree_hash_packed_encoding()
    }

    fn tree_hash_packing_factor() -> usize {
        T::tree_hash_packing_factor()
    }

    fn tree_hash_root(&self) -> H::Output {
        self.as_ref().tree_hash_root()
    }
}

impl<T: TreeHash<H>, H: TreeHashDigest> TreeHash<H> for Arc<T> {
    fn tree_hash_type() -> TreeHashType {
        T::tree_hash_type()
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        self.as_ref().tree_hash_packed_encoding()
    }

    fn tree_hash_packing_factor() -> usize {
        T::tree_hash_packing_factor()
    }

    fn tree_hash_root(&self) -> H::Output {
        self.as_ref().tree_hash_root()
    }
}

/// `Vec<T>` is always List-shaped, with no maximum capacity:
/// [`crate::TreeHash`] for the capacity-bearing `VariableList` lives in the
/// `ssz_types` crate and follows the same packing rules.
impl<T: TreeHash<H>, H: TreeHashDigest> TreeHash<H> for Vec<T> {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::List
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        unreachable!("List should never be packed.")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("List should never be packed.")
    }

    fn tree_hash_root(&self) -> H::Output {
        let root = vec_tree_hash_root::<T, H>(self);
        mix_in_length_with_hasher::<H>(&root, self.len())
    }
}

/// Computes the chunks-root (before length mixing) of a sequence of
/// `TreeHash` elements, honoring packing for basic-typed elements.
pub(crate) fn vec_tree_hash_root<T: TreeHash<H>, H: TreeHashDigest>(values: &[T]) -> H::Output {
    match T::tree_hash_type() {
        TreeHashType::Basic => {
            let mut packed = Vec::with_capacity(values.len() * std::mem::size_of::<T>().max(1));
            for value in values {
                packed.extend_from_slice(&value.tree_hash_packed_encoding());
            }
            merkle_root_with_hasher::<H>(&packed, 0)
        }
        _ => {
            if values.is_empty() {
                return H::get_zero_hash(0);
            }
            let mut hasher = MerkleHasher::<H>::with_leaves(values.len());
            for value in values {
                hasher
                    .write(value.tree_hash_root().as_ref())
                    .expect("hasher has sufficient leaves");
            }
            hasher.finish().expect("hasher has sufficient leaves")
        }
    }
}
