// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

//! Tree hash tests

use digest as _;
use rand as _;
use sha2 as _;
use smallvec as _;
use ssz_derive::Encode;
use ssz_primitives as _;
use ssz_types::VariableList;
use thiserror as _;
use tree_hash::{BYTES_PER_CHUNK, MerkleHasher, PackedEncoding, Sha256Hasher, TreeHash};

#[derive(Encode)]
struct HashVec {
    vec: Vec<u8>,
}

#[derive(Encode)]
struct MacroList(VariableList<u8, 64>);

tree_hash::tree_hash_ssz_encoding_as_list!(MacroList);

impl From<Vec<u8>> for HashVec {
    fn from(vec: Vec<u8>) -> Self {
        Self { vec }
    }
}

impl tree_hash::TreeHash<tree_hash::Sha256Hasher> for HashVec {
    fn tree_hash_type() -> tree_hash::TreeHashType {
        tree_hash::TreeHashType::List
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        unreachable!("List should never be packed.")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("List should never be packed.")
    }

    fn tree_hash_root(&self) -> <tree_hash::Sha256Hasher as tree_hash::TreeHashDigest>::Output {
        let mut hasher = MerkleHasher::<tree_hash::Sha256Hasher>::with_leaves(
            self.vec.len().div_ceil(BYTES_PER_CHUNK),
        );

        for item in &self.vec {
            hasher
                .write(&<u8 as TreeHash<tree_hash::Sha256Hasher>>::tree_hash_packed_encoding(item))
                .unwrap()
        }

        let root = hasher.finish().unwrap();

        tree_hash::mix_in_length_with_hasher::<tree_hash::Sha256Hasher>(&root, self.vec.len())
    }
}

#[test]
fn macro_list_tree_hash_matches_variable_list() {
    let list: VariableList<u8, 64> = vec![0x42].into();
    let macro_list = MacroList(list.clone());

    let list_root = TreeHash::<Sha256Hasher>::tree_hash_root(&list);
    let macro_root = TreeHash::<Sha256Hasher>::tree_hash_root(&macro_list);

    assert_eq!(macro_root, list_root);
}
