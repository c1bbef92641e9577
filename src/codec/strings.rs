//! Order-preserving, capped-width encoding for UTF-8 strings.
//!
//! The encoding is UTF-8 bytes, truncated to `cap` bytes, then right-padded
//! with `0x00` to exactly `cap` bytes. For inputs whose UTF-8 encodings
//! share no common prefix longer than `cap`, unsigned lexicographic compare
//! of the output equals code-point compare of the inputs — UTF-8 is
//! specifically designed so that byte-wise lexicographic order matches
//! code-point order.
//!
//! Truncation may land mid-codepoint; this is intentional byte-level
//! behavior rather than rounding back to a codepoint boundary.

/// Default width used when no explicit cap is configured.
pub const DEFAULT_STRING_CAP: usize = 128;

/// Encodes `value` into exactly `cap` bytes: UTF-8 bytes truncated to `cap`,
/// then zero-padded to `cap`.
pub fn encode_str(value: &str, cap: usize) -> Vec<u8> {
    let bytes = value.as_bytes();
    let mut out = vec![0u8; cap];
    let take = bytes.len().min(cap);
    out[..take].copy_from_slice(&bytes[..take]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn width_matches_cap() {
        assert_eq!(encode_str("hi", 8).len(), 8);
        assert_eq!(encode_str("", 8).len(), 8);
        assert_eq!(encode_str("way too long for four", 4).len(), 4);
    }

    #[test]
    fn pads_with_zero_bytes() {
        let out = encode_str("ab", 5);
        assert_eq!(out, vec![b'a', b'b', 0, 0, 0]);
    }

    #[test]
    fn truncates_over_cap() {
        let out = encode_str("abcdef", 3);
        assert_eq!(out, vec![b'a', b'b', b'c']);
    }

    #[test]
    fn order_law_for_strings_within_cap() {
        let samples = [
            "", "a", "aa", "ab", "ac", "b", "apple", "apply", "app", "zzz", "Zzz", "0", "9",
        ];
        let cap = 16;
        for &a in &samples {
            for &b in &samples {
                let expect = a.cmp(b);
                let got = encode_str(a, cap).cmp(&encode_str(b, cap));
                assert_eq!(
                    got, expect,
                    "order law violated for a={a:?}, b={b:?}: expected {expect:?}, got {got:?}"
                );
            }
        }
    }

    #[test]
    fn order_law_holds_for_multibyte_code_points_within_cap() {
        // Code-point order for UTF-8 coincides with byte-wise order; exercise
        // multi-byte sequences (Latin-1 supplement, CJK) to confirm the
        // encoding doesn't disturb that property.
        let samples = ["a", "\u{e9}", "\u{3042}", "\u{3044}", "z", "\u{10000}"];
        let cap = 16;
        for &a in &samples {
            for &b in &samples {
                let expect = a.cmp(b);
                let got = encode_str(a, cap).cmp(&encode_str(b, cap));
                assert_eq!(got, expect, "a={a:?} b={b:?}");
            }
        }
    }

    #[test]
    fn truncation_can_split_a_multi_byte_sequence() {
        // "\u{e9}" (Ã©) encodes as two bytes [0xC3, 0xA9]; a cap of 1 splits it.
        let out = encode_str("\u{e9}", 1);
        assert_eq!(out, vec![0xC3]);
    }

    #[test]
    fn default_cap_constant() {
        assert_eq!(DEFAULT_STRING_CAP, 128);
        assert_eq!(encode_str("x", DEFAULT_STRING_CAP).len(), 128);
    }

    #[test]
    fn ordering_is_unspecified_but_total_beyond_cap() {
        // Beyond the cap the contract only promises *some* total order, not
        // code-point order; this test merely documents that encode_str never
        // panics and always returns `Ordering` comparable output.
        let a = "a".repeat(200);
        let b = "a".repeat(199) + "b";
        let cap = 128;
        let ord = encode_str(&a, cap).cmp(&encode_str(&b, cap));
        assert_eq!(ord, Ordering::Equal);
    }
}
