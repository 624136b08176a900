//! Little-endian integer fields.
//!
//! Every multi-byte integer in a matrix list is stored as four little-endian
//! bytes.

/// Extract an unsigned 32-bit integer from four little-endian bytes.
pub fn read_u32_le(r: [u8; 4]) -> u32 {
    u32::from_le_bytes(r)
}

/// Encode an unsigned 32-bit integer as four little-endian bytes.
pub fn write_u32_le(v: u32) -> [u8; 4] {
    v.to_le_bytes()
}

/// Extract a signed 32-bit integer from four little-endian bytes.
///
/// The bytes hold a two's-complement value, so this is a reinterpretation of
/// [`read_u32_le`]: values from `0x8000_0000` upward are negative, and
/// `0x8000_0000` itself is [`i32::MIN`]. As `i32` is exactly 32 bits wide on
/// every target, no value can fall outside its range.
pub fn read_i32_le(r: [u8; 4]) -> i32 {
    read_u32_le(r) as i32
}

/// Encode a signed 32-bit integer as four little-endian bytes.
pub fn write_i32_le(v: i32) -> [u8; 4] {
    write_u32_le(v as u32)
}
