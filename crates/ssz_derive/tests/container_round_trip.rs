// Modified in 2025 from the original version
// Original source licensed under the Apache License 2.0

use ssz::{Decode, Encode};
use ssz_derive::{Decode, Encode};
use ssz_types::VariableList;

#[derive(PartialEq, Debug, Encode, Decode)]
struct Fixed {
    a: u64,
    b: u32,
    c: bool,
}

#[derive(PartialEq, Debug, Encode, Decode)]
struct Mixed {
    a: u16,
    b: Vec<u8>,
    c: u16,
}

#[derive(PartialEq, Debug, Encode, Decode)]
struct Nested {
    header: Fixed,
    body: VariableList<u64, 8>,
}

#[derive(PartialEq, Debug, Encode, Decode)]
struct WithSkip {
    a: u64,
    #[ssz(skip)]
    cached: u64,
    b: u64,
}

#[derive(PartialEq, Debug, Encode, Decode)]
struct TupleList(VariableList<u8, 64>);

#[derive(PartialEq, Debug, Encode, Decode)]
struct VarThenFixed {
    a: Vec<u8>,
    b: u16,
}

fn round_trip<T: Encode + Decode + PartialEq + std::fmt::Debug>(value: T) {
    let bytes = value.as_ssz_bytes();
    let decoded = T::from_ssz_bytes(&bytes).expect("decoding should succeed");
    assert_eq!(value, decoded);
}

#[test]
fn all_fixed_container_round_trips() {
    round_trip(Fixed {
        a: 42,
        b: 7,
        c: true,
    });
}

#[test]
fn all_fixed_container_has_no_offsets() {
    let value = Fixed {
        a: 1,
        b: 2,
        c: true,
    };
    assert_eq!(value.as_ssz_bytes().len(), 8 + 4 + 1);
    assert!(<Fixed as Encode>::is_ssz_fixed_len());
}

#[test]
fn mixed_container_round_trips() {
    round_trip(Mixed {
        a: 1,
        b: vec![1, 2, 3],
        c: 2,
    });
    round_trip(Mixed {
        a: 1,
        b: vec![],
        c: 2,
    });
}

#[test]
fn nested_container_round_trips() {
    let body: VariableList<u64, 8> = vec![1, 2, 3].into();
    round_trip(Nested {
        header: Fixed {
            a: 1,
            b: 2,
            c: false,
        },
        body,
    });
}

#[test]
fn skipped_field_is_excluded_from_the_wire_and_restored_as_default() {
    let value = WithSkip {
        a: 1,
        cached: 999,
        b: 2,
    };
    let bytes = value.as_ssz_bytes();

    // `cached` occupies no space on the wire.
    assert_eq!(bytes.len(), 8 + 8);

    let decoded = WithSkip::from_ssz_bytes(&bytes).unwrap();
    assert_eq!(decoded.cached, 0);
    assert_eq!(decoded.a, 1);
    assert_eq!(decoded.b, 2);
}

#[test]
fn tuple_struct_round_trips() {
    let list: VariableList<u8, 64> = vec![1, 2, 3].into();
    round_trip(TupleList(list));
}

#[test]
fn variable_field_before_fixed_field_round_trips() {
    round_trip(VarThenFixed {
        a: vec![1, 2, 3],
        b: 42,
    });
    round_trip(VarThenFixed { a: vec![], b: 0 });
}
