// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! Incremental Merkleization.
//!
//! [`MerkleHasher`] accepts leaf bytes one `write` at a time and produces the
//! same root as merkleizing the full, zero-padded leaf list up front, without
//! ever holding more than `depth` half-finished hashes in memory. This is the
//! same "incremental Merkle tree" construction used by the Ethereum deposit
//! contract: a `pending` slot per tree level stands in for an unfinished left
//! sibling, and `finish` combines whatever was written with the appropriate
//! precomputed zero hash for every level that was never completed.

use crate::{BYTES_PER_CHUNK, TreeHashDigest};

/// Errors that can occur when incrementally merkleizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// More leaves were written than the hasher was initialized to hold.
    #[error("merkle hasher received more leaves than its capacity of {max_leaves}")]
    MaximumLeavesExceeded {
        /// The maximum number of leaves the hasher can hold.
        max_leaves: usize,
    },
}

/// Incrementally builds a Merkle root over a sequence of 32-byte leaves.
///
/// Constructed with the number of leaves the tree will hold (rounded up
/// internally to the next power of two); bytes are pushed via [`Self::write`]
/// and the root is produced by [`Self::finish`]. Any bytes left over that
/// don't fill a whole chunk are zero-padded into a final leaf.
pub struct MerkleHasher<H: TreeHashDigest> {
    /// Depth of the zero-padded tree (number of levels above the leaves).
    depth: usize,
    /// Number of complete leaves written so far.
    next_leaf: usize,
    /// Bytes not yet consumed into a full leaf chunk.
    buffer: Vec<u8>,
    /// `pending[level]` holds a left sibling at `level` still waiting for its
    /// right sibling, or (at index `depth`) the root once a perfectly full
    /// tree has been written.
    pending: Vec<Option<H::Output>>,
}

impl<H: TreeHashDigest> MerkleHasher<H> {
    /// Creates a new hasher sized to hold at least `min_leaves` leaves.
    pub fn with_leaves(min_leaves: usize) -> Self {
        let depth = min_leaves.max(1).next_power_of_two().trailing_zeros() as usize;
        Self {
            depth,
            next_leaf: 0,
            buffer: Vec::with_capacity(BYTES_PER_CHUNK),
            pending: vec![None; depth + 1],
        }
    }

    /// The number of leaves this hasher can hold (`2^depth`).
    fn capacity(&self) -> usize {
        1usize << self.depth
    }

    /// Appends `bytes` to the internal buffer, processing every full leaf
    /// chunk (`BYTES_PER_CHUNK` bytes) as it becomes available.
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.buffer.extend_from_slice(bytes);

        while self.buffer.len() >= BYTES_PER_CHUNK {
            let chunk: Vec<u8> = self.buffer.drain(..BYTES_PER_CHUNK).collect();
            self.process_leaf(&chunk)?;
        }

        Ok(())
    }

    /// Consumes a single, full-width leaf chunk.
    fn process_leaf(&mut self, chunk: &[u8]) -> Result<(), Error> {
        if self.next_leaf >= self.capacity() {
            return Err(Error::MaximumLeavesExceeded {
                max_leaves: self.capacity(),
            });
        }

        let mut node = H::from_bytes(chunk);
        let size = self.next_leaf + 1;

        for level in 0..self.depth {
            if (size >> level) & 1 == 1 {
                self.pending[level] = Some(node);
                self.next_leaf += 1;
                return Ok(());
            }

            let left = self.pending[level]
                .take()
                .expect("a zero bit at this level implies a stashed left sibling");
            node = H::hash32_concat(left.as_ref(), node.as_ref());
        }

        // Every level carried, so this leaf completed a perfectly full tree.
        self.pending[self.depth] = Some(node);
        self.next_leaf += 1;
        Ok(())
    }

    /// Finalizes the tree, zero-padding any unwritten leaves, and returns
    /// the Merkle root.
    pub fn finish(mut self) -> Result<H::Output, Error> {
        if !self.buffer.is_empty() {
            let mut last = std::mem::take(&mut self.buffer);
            last.resize(BYTES_PER_CHUNK, 0);
            self.process_leaf(&last)?;
        }

        if self.next_leaf == self.capacity() {
            return Ok(self.pending[self.depth]
                .clone()
                .expect("a perfectly full tree leaves its root in the top pending slot"));
        }

        let mut node = H::get_zero_hash(0);
        for level in 0..self.depth {
            node = if (self.next_leaf >> level) & 1 == 1 {
                let left = self.pending[level]
                    .clone()
                    .expect("a populated bit must have a stashed left sibling");
                H::hash32_concat(left.as_ref(), node.as_ref())
            } else {
                H::hash32_concat(node.as_ref(), H::get_zero_hash(level).as_ref())
            };
        }
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sha256Hasher;

    #[test]
    fn empty_tree_matches_zero_hash() {
        let hasher = MerkleHasher::<Sha256Hasher>::with_leaves(4);
        let root = hasher.finish().unwrap();
        assert_eq!(root, Sha256Hasher::get_zero_hash(2));
    }

    #[test]
    fn single_leaf_is_identity() {
        let mut hasher = MerkleHasher::<Sha256Hasher>::with_leaves(1);
        let leaf = [7u8; 32];
        hasher.write(&leaf).unwrap();
        let root = hasher.finish().unwrap();
        assert_eq!(root.as_ref(), &leaf[..]);
    }

    #[test]
    fn two_leaves_hash_together() {
        let mut hasher = MerkleHasher::<Sha256Hasher>::with_leaves(2);
        hasher.write(&[1u8; 32]).unwrap();
        hasher.write(&[2u8; 32]).unwrap();
        let root = hasher.finish().unwrap();
        let expected = Sha256Hasher::hash32_concat(&[1u8; 32], &[2u8; 32]);
        assert_eq!(root, expected);
    }

    #[test]
    fn partial_leaf_is_zero_padded() {
        let mut hasher = MerkleHasher::<Sha256Hasher>::with_leaves(1);
        hasher.write(&[9u8; 3]).unwrap();
        let root = hasher.finish().unwrap();
        let mut expected_leaf = [0u8; 32];
        expected_leaf[0..3].copy_from_slice(&[9u8; 3]);
        assert_eq!(root.as_ref(), &expected_leaf[..]);
    }

    #[test]
    fn incomplete_leaves_are_zero_padded_up_to_capacity() {
        let mut hasher = MerkleHasher::<Sha256Hasher>::with_leaves(4);
        hasher.write(&[1u8; 32]).unwrap();
        let root = hasher.finish().unwrap();

        let mut full = MerkleHasher::<Sha256Hasher>::with_leaves(4);
        full.write(&[1u8; 32]).unwrap();
        full.write(&[0u8; 32]).unwrap();
        full.write(&[0u8; 32]).unwrap();
        full.write(&[0u8; 32]).unwrap();
        let expected = full.finish().unwrap();

        assert_eq!(root, expected);
    }

    #[test]
    fn writing_beyond_capacity_errors() {
        let mut hasher = MerkleHasher::<Sha256Hasher>::with_leaves(1);
        hasher.write(&[1u8; 32]).unwrap();
        assert_eq!(
            hasher.write(&[2u8; 32]),
            Err(Error::MaximumLeavesExceeded { max_leaves: 1 })
        );
    }

    #[test]
    fn perfectly_full_tree_matches_incremental_padding() {
        let mut hasher = MerkleHasher::<Sha256Hasher>::with_leaves(4);
        for i in 0..4u8 {
            hasher.write(&[i; 32]).unwrap();
        }
        let root = hasher.finish().unwrap();

        let left = Sha256Hasher::hash32_concat(&[0u8; 32], &[1u8; 32]);
        let right = Sha256Hasher::hash32_concat(&[2u8; 32], &[3u8; 32]);
        let expected = Sha256Hasher::hash32_concat(left.as_ref(), right.as_ref());

        assert_eq!(root, expected);
    }
}
