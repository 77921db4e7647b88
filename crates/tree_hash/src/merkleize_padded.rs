// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! Merkleization of an arbitrary, already-serialized byte slice.

use crate::{BYTES_PER_CHUNK, MerkleHasher, TreeHashDigest};

/// Merkleizes `bytes`, zero-padding the final chunk if `bytes.len()` is not a
/// multiple of [`BYTES_PER_CHUNK`], and the whole tree up to `min_leaves`
/// leaves if it has fewer chunks than that.
///
/// This is the byte-slice counterpart to [`MerkleHasher`]: it exists for
/// types (e.g. `Bytes`-style vectors) whose tree hash root is defined in
/// terms of their raw serialized encoding rather than a sequence of already
/// computed child roots.
pub fn merkleize_padded_with_hasher<H: TreeHashDigest>(
    bytes: &[u8],
    min_leaves: usize,
) -> H::Output {
    let leaf_count = std::cmp::max(bytes.len().div_ceil(BYTES_PER_CHUNK), min_leaves.max(1));

    let mut hasher = MerkleHasher::<H>::with_leaves(leaf_count);
    hasher
        .write(bytes)
        .expect("leaf count is derived from the byte length being written");
    hasher
        .finish()
        .expect("leaf count is derived from the byte length being written")
}
