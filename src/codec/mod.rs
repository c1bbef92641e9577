//! Ordered-byte codec and bit interleaver.
//!
//! Stateless pure functions turning scalars into fixed-width byte arrays
//! whose unsigned lexicographic order equals the natural order of the
//! input, plus a function combining several such arrays into a single
//! Z-order byte array.
//!
//! Submodules:
//! - [`ints`]       — signed 32/64-bit integer encoding
//! - [`floats`]      — IEEE-754 32/64-bit float encoding
//! - [`strings`]     — capped-width UTF-8 string encoding
//! - [`interleave`]  — bit-level Z-order interleaving

pub mod floats;
pub mod ints;
pub mod interleave;
pub mod strings;

pub use floats::{decode_f32, decode_f64, encode_f32, encode_f64};
pub use ints::{decode_i32, decode_i64, encode_i32, encode_i64};
pub use interleave::interleave_bits;
pub use strings::{encode_str, DEFAULT_STRING_CAP};

/// A single sort-key column to be encoded and interleaved into a composite
/// Z-order key, or concatenated into a composite single-dimension sort key.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Str(String),
}

impl Column {
    /// Encodes this column using its type's fixed-width (or capped-width,
    /// for strings) ordered-byte encoding.
    pub fn encode(&self, string_cap: usize) -> Vec<u8> {
        match self {
            Column::Int32(v) => encode_i32(*v).to_vec(),
            Column::Int64(v) => encode_i64(*v).to_vec(),
            Column::Float32(v) => encode_f32(*v).to_vec(),
            Column::Float64(v) => encode_f64(*v).to_vec(),
            Column::Str(v) => encode_str(v, string_cap),
        }
    }
}

/// Builds a Z-order key by encoding each column in order and bit-interleaving
/// the results. `string_cap` bounds any [`Column::Str`] entries.
pub fn z_order_key(columns: &[Column], string_cap: usize) -> Vec<u8> {
    let encoded: Vec<Vec<u8>> = columns.iter().map(|c| c.encode(string_cap)).collect();
    let refs: Vec<&[u8]> = encoded.iter().map(|v| v.as_slice()).collect();
    interleave_bits(&refs)
}

/// Builds a composite sort key by concatenating each column's ordered
/// encoding in column order, without interleaving. Useful when
/// single-dimension range scans matter more than multi-dimension locality.
pub fn concat_sort_key(columns: &[Column], string_cap: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for c in columns {
        out.extend(c.encode(string_cap));
    }
    out
}
