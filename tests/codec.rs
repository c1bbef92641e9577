// Integration tests for the top-level codec re-exports and composite key
// builders: Column::encode, z_order_key, concat_sort_key.

use compactcore::codec::{decode_i32, encode_i32, Column};

#[test]
fn column_encode_matches_direct_function_call() {
    let direct = encode_i32(-42).to_vec();
    let via_column = Column::Int32(-42).encode(16);
    assert_eq!(direct, via_column);
}

#[test]
fn int32_roundtrips_through_column_encode() {
    for v in [i32::MIN, -1, 0, 1, i32::MAX] {
        let encoded = Column::Int32(v).encode(8);
        let bytes: [u8; 4] = encoded.try_into().unwrap();
        assert_eq!(decode_i32(bytes), v);
    }
}

#[test]
fn z_order_key_of_single_column_equals_its_own_encoding() {
    let columns = [compactcore::codec::Column::Int32(7)];
    let key = compactcore::codec::z_order_key(&columns, 8);
    assert_eq!(key, encode_i32(7).to_vec());
}

#[test]
fn concat_sort_key_is_leading_column_dominant() {
    let lower = compactcore::codec::concat_sort_key(
        &[Column::Int32(1), Column::Str("zzz".to_string())],
        8,
    );
    let higher = compactcore::codec::concat_sort_key(
        &[Column::Int32(2), Column::Str("aaa".to_string())],
        8,
    );
    assert!(lower < higher);
}
