// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! Capacity-bounded Vector and List types.
//!
//! `Vec<T>` (in `ssz`) and [`std::vec::Vec`]'s tree hash (in `tree_hash`) are
//! always List-shaped with no declared maximum: that's sufficient for the
//! codec itself, but SSZ's Merkleization and a schema's `ssz-max`/`ssz-size`
//! bound both need a capacity baked into the type. [`FixedVector`] and
//! [`VariableList`] carry that capacity as a const generic: a `FixedVector`
//! must hold exactly `N` elements (SSZ `Vector[T, N]`), a `VariableList` may
//! hold up to `N` elements (SSZ `List[T, N]`).

mod tree_hash;

use std::ops::{Deref, DerefMut};
use std::slice::{Iter, IterMut};

use ::ssz::{Decode, DecodeError, Encode, SszEncoder, decode_list_of_variable_length_items};
use ::tree_hash::{Hash256, Sha256Hasher, TreeHash, TreeHashType, mix_in_length_with_hasher};

/// Errors arising from constructing or mutating a capacity-bounded type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A [`FixedVector`] was built from the wrong number of elements.
    #[error("fixed vector of length {len} does not match its declared length {expected}")]
    InvalidLength {
        /// The number of elements given.
        len: usize,
        /// The vector's declared, exact length.
        expected: usize,
    },
    /// A [`VariableList`] was pushed past its maximum capacity.
    #[error("{len} elements exceed maximum capacity {max}")]
    OutOfBounds {
        /// The number of elements that were attempted.
        len: usize,
        /// The maximum capacity of the list.
        max: usize,
    },
}

/// A homogeneous, exactly `N`-element list (SSZ `Vector[T, N]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixedVector<T, const N: usize> {
    vec: Vec<T>,
}

impl<T, const N: usize> FixedVector<T, N> {
    /// The declared length of this vector.
    pub const fn capacity() -> usize {
        N
    }

    /// Wraps `vec`, provided it holds exactly `N` elements.
    pub fn new(vec: Vec<T>) -> Result<Self, Error> {
        if vec.len() == N {
            Ok(Self { vec })
        } else {
            Err(Error::InvalidLength {
                len: vec.len(),
                expected: N,
            })
        }
    }

    /// Builds a vector of `N` clones of `elem`.
    pub fn from_elem(elem: T) -> Self
    where
        T: Clone,
    {
        Self {
            vec: vec![elem; N],
        }
    }

    /// Consumes `self`, returning the underlying `Vec<T>`.
    pub fn into_vec(self) -> Vec<T> {
        self.vec
    }

    /// Borrows the underlying elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.vec
    }

    /// Returns an iterator over references to the elements.
    pub fn iter(&self) -> Iter<'_, T> {
        self.vec.iter()
    }

    /// Returns an iterator over mutable references to the elements.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.vec.iter_mut()
    }
}

impl<T: Default + Clone, const N: usize> Default for FixedVector<T, N> {
    fn default() -> Self {
        Self::from_elem(T::default())
    }
}

/// Pads or truncates `vec` to exactly `N` elements.
impl<T: Default, const N: usize> From<Vec<T>> for FixedVector<T, N> {
    fn from(mut vec: Vec<T>) -> Self {
        vec.resize_with(N, T::default);
        Self { vec }
    }
}

impl<T, const N: usize> Deref for FixedVector<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.vec
    }
}

impl<T, const N: usize> DerefMut for FixedVector<T, N> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.vec
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a FixedVector<T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.vec.iter()
    }
}

impl<T, const N: usize> IntoIterator for FixedVector<T, N> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.vec.into_iter()
    }
}

impl<T: Encode, const N: usize> Encode for FixedVector<T, N> {
    fn is_ssz_fixed_len() -> bool {
        T::is_ssz_fixed_len()
    }

    fn ssz_fixed_len() -> usize {
        if T::is_ssz_fixed_len() {
            T::ssz_fixed_len() * N
        } else {
            ::ssz::BYTES_PER_LENGTH_OFFSET
        }
    }

    fn ssz_bytes_len(&self) -> usize {
        if T::is_ssz_fixed_len() {
            T::ssz_fixed_len() * N
        } else {
            let offsets = N * ::ssz::BYTES_PER_LENGTH_OFFSET;
            self.vec
                .iter()
                .map(|item| item.ssz_bytes_len())
                .fold(offsets, |acc, len| acc + len)
        }
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        if T::is_ssz_fixed_len() {
            for item in &self.vec {
                item.ssz_append(buf);
            }
        } else {
            let mut encoder = SszEncoder::container(buf, N * ::ssz::BYTES_PER_LENGTH_OFFSET);
            for item in &self.vec {
                encoder.append(item);
            }
            encoder.finalize();
        }
    }
}

impl<T: Decode, const N: usize> Decode for FixedVector<T, N> {
    fn is_ssz_fixed_len() -> bool {
        T::is_ssz_fixed_len()
    }

    fn ssz_fixed_len() -> usize {
        if T::is_ssz_fixed_len() {
            T::ssz_fixed_len() * N
        } else {
            ::ssz::BYTES_PER_LENGTH_OFFSET
        }
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let items: Vec<T> = if T::is_ssz_fixed_len() {
            let elem_size = T::ssz_fixed_len();
            let expected = elem_size * N;
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
        Self::new(items).map_err(|_| DecodeError::BadVectorLength { len, expected: N })
    }
}

impl<T: TreeHash, const N: usize> TreeHash<Sha256Hasher> for FixedVector<T, N> {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Vector
    }

    fn tree_hash_packed_encoding(&self) -> ::tree_hash::PackedEncoding {
        unreachable!("Vector should never be packed.")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("Vector should never be packed.")
    }

    fn tree_hash_root(&self) -> Hash256 {
        crate::tree_hash::vec_tree_hash_root::<T, N>(&self.vec)
    }
}

/// A homogeneous list of up to `N` elements (SSZ `List[T, N]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableList<T, const N: usize> {
    vec: Vec<T>,
}

impl<T, const N: usize> VariableList<T, N> {
    /// The maximum number of elements this list may hold.
    pub const fn max_len() -> usize {
        N
    }

    /// An empty list.
    pub fn empty() -> Self {
        Self { vec: Vec::new() }
    }

    /// Wraps `vec`, provided it holds no more than `N` elements.
    pub fn new(vec: Vec<T>) -> Result<Self, Error> {
        if vec.len() <= N {
            Ok(Self { vec })
        } else {
            Err(Error::OutOfBounds {
                len: vec.len(),
                max: N,
            })
        }
    }

    /// Appends `value`, provided this does not exceed the list's capacity.
    pub fn push(&mut self, value: T) -> Result<(), Error> {
        if self.vec.len() < N {
            self.vec.push(value);
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                len: self.vec.len() + 1,
                max: N,
            })
        }
    }

    /// Consumes `self`, returning the underlying `Vec<T>`.
    pub fn into_vec(self) -> Vec<T> {
        self.vec
    }

    /// Borrows the underlying elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.vec
    }

    /// Returns an iterator over references to the elements.
    pub fn iter(&self) -> Iter<'_, T> {
        self.vec.iter()
    }

    /// Returns an iterator over mutable references to the elements.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.vec.iter_mut()
    }
}

impl<T, const N: usize> Default for VariableList<T, N> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Truncates `vec` to `N` elements if it is over capacity.
impl<T, const N: usize> From<Vec<T>> for VariableList<T, N> {
    fn from(mut vec: Vec<T>) -> Self {
        vec.truncate(N);
        Self { vec }
    }
}

impl<T, const N: usize> Deref for VariableList<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.vec
    }
}

impl<T, const N: usize> DerefMut for VariableList<T, N> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.vec
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a VariableList<T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.vec.iter()
    }
}

impl<T, const N: usize> IntoIterator for VariableList<T, N> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.vec.into_iter()
    }
}

impl<T: Encode, const N: usize> Encode for VariableList<T, N> {
    fn is_ssz_fixed_len() -> bool {
        false
    }

    fn ssz_bytes_len(&self) -> usize {
        if T::is_ssz_fixed_len() {
            T::ssz_fixed_len() * self.vec.len()
        } else {
            let offsets = self.vec.len() * ::ssz::BYTES_PER_LENGTH_OFFSET;
            self.vec
                .iter()
                .map(|item| item.ssz_bytes_len())
                .fold(offsets, |acc, len| acc + len)
        }
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        if T::is_ssz_fixed_len() {
            for item in &self.vec {
                item.ssz_append(buf);
            }
        } else {
            let mut encoder =
                SszEncoder::container(buf, self.vec.len() * ::ssz::BYTES_PER_LENGTH_OFFSET);
            for item in &self.vec {
                encoder.append(item);
            }
            encoder.finalize();
        }
    }
}

impl<T: Decode, const N: usize> Decode for VariableList<T, N> {
    fn is_ssz_fixed_len() -> bool {
        false
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let items: Vec<T> = if bytes.is_empty() {
            vec![]
        } else if T::is_ssz_fixed_len() {
            let elem_size = T::ssz_fixed_len();
            if elem_size == 0 || bytes.len() % elem_size != 0 {
                return Err(DecodeError::BadVectorLength {
                    len: bytes.len(),
                    expected: elem_size,
                });
            }
            bytes.chunks(elem_size).map(T::from_ssz_bytes).collect::<Result<_, _>>()?
        } else {
            decode_list_of_variable_length_items(bytes)?
        };

        let len = items.len();
        Self::new(items).map_err(|_| DecodeError::BadVectorLength { len, expected: N })
    }
}

impl<T: TreeHash, const N: usize> TreeHash<Sha256Hasher> for VariableList<T, N> {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::List
    }

    fn tree_hash_packed_encoding(&self) -> ::tree_hash::PackedEncoding {
        unreachable!("List should never be packed.")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("List should never be packed.")
    }

    fn tree_hash_root(&self) -> Hash256 {
        let root = crate::tree_hash::vec_tree_hash_root::<T, N>(&self.vec);
        mix_in_length_with_hasher::<Sha256Hasher>(&root, self.vec.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_vector_rejects_wrong_length() {
        assert!(FixedVector::<u64, 4>::new(vec![1, 2, 3]).is_err());
        assert!(FixedVector::<u64, 4>::new(vec![1, 2, 3, 4]).is_ok());
    }

    #[test]
    fn fixed_vector_from_vec_pads_with_default() {
        let v: FixedVector<u64, 4> = vec![1, 2].into();
        assert_eq!(&*v, &[1, 2, 0, 0]);
    }

    #[test]
    fn fixed_vector_ssz_round_trip() {
        let v = FixedVector::<u16, 3>::new(vec![7, 8, 9]).unwrap();
        let bytes = v.as_ssz_bytes();
        let decoded = FixedVector::<u16, 3>::from_ssz_bytes(&bytes).unwrap();
        assert_eq!(v, decoded);
    }

    #[test]
    fn fixed_vector_decode_rejects_wrong_length() {
        let bytes = 7u16.to_le_bytes().to_vec();
        assert!(FixedVector::<u16, 3>::from_ssz_bytes(&bytes).is_err());
    }

    #[test]
    fn variable_list_rejects_over_capacity() {
        assert!(VariableList::<u64, 2>::new(vec![1, 2, 3]).is_err());
        let mut list = VariableList::<u64, 2>::new(vec![1, 2]).unwrap();
        assert!(list.push(3).is_err());
    }

    #[test]
    fn variable_list_from_vec_truncates() {
        let list: VariableList<u64, 2> = vec![1, 2, 3].into();
        assert_eq!(&*list, &[1, 2]);
    }

    #[test]
    fn variable_list_ssz_round_trip() {
        let list = VariableList::<u16, 8>::new(vec![1, 2, 3]).unwrap();
        let bytes = list.as_ssz_bytes();
        let decoded = VariableList::<u16, 8>::from_ssz_bytes(&bytes).unwrap();
        assert_eq!(list, decoded);
    }

    #[test]
    fn fixed_vector_tree_hash_is_vector_shaped() {
        let v = FixedVector::<u64, 4>::new(vec![1, 2, 3, 4]).unwrap();
        assert_eq!(
            <FixedVector<u64, 4> as TreeHash<Sha256Hasher>>::tree_hash_type(),
            TreeHashType::Vector
        );
        // Deterministic, not a hardcoded root.
        assert_eq!(
            TreeHash::<Sha256Hasher>::tree_hash_root(&v),
            TreeHash::<Sha256Hasher>::tree_hash_root(&v)
        );
    }

    #[test]
    fn variable_list_tree_hash_mixes_in_length() {
        let empty = VariableList::<u64, 4>::empty();
        let root = TreeHash::<Sha256Hasher>::tree_hash_root(&empty);
        let expected = mix_in_length_with_hasher::<Sha256Hasher>(&::tree_hash::Hash256::ZERO, 0);
        assert_eq!(root, expected);
    }
}
