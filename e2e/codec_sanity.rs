// Codec ordering sanity checks against the crate's public API.

use compactcore::codec::{encode_f64, encode_i32};

#[test]
fn negative_one_precedes_zero_as_i32() {
    assert!(encode_i32(-1) < encode_i32(0));
}

#[test]
fn negative_zero_precedes_positive_zero_as_f64() {
    assert!(encode_f64(-0.0) < encode_f64(0.0));
}

#[test]
fn ascending_integers_encode_in_ascending_order() {
    let mut prev = encode_i32(i32::MIN);
    for v in [-1_000_000, -1, 0, 1, 1_000_000, i32::MAX] {
        let cur = encode_i32(v);
        assert!(cur > prev, "encode_i32({v}) should exceed the previous sample");
        prev = cur;
    }
}
