// Interleaver known-vector scenario.

use compactcore::codec::interleave_bits;

#[test]
fn known_four_input_vector_interleaves_as_expected() {
    let inputs: [&[u8]; 4] = [
        &[0x01, 0xFF, 0x00, 0x0F],
        &[0x01, 0x00, 0xFF],
        &[0x01],
        &[0x01],
    ];
    let expected = [0x00, 0x00, 0x00, 0x0F, 0xAA, 0xAA, 0x55, 0x55, 0x0F];
    assert_eq!(interleave_bits(&inputs), expected);
}
