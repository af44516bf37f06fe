//! Low-level bit and byte-order utilities.
//!
//! Integers are encoded explicitly byte by byte so that any width from 1 to 8
//! bytes is handled by the same routine.

use crate::dtype::Endianness;

/// Mask with the low `bits` bits set. `bits` may be 0..=64.
pub fn low_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Returns true if `value` fits in `bits` unsigned bits.
pub fn fits_unsigned(value: u64, bits: u32) -> bool {
    value & !low_mask(bits) == 0
}

/// Sign-extends the low `bits` of `value` to a full `i64`.
pub fn sign_extend(value: u64, bits: u32) -> i64 {
    let shift = 64 - bits;
    ((value << shift) as i64) >> shift
}

/// Appends the low `size` bytes of `value` to `dst` in the given byte order.
pub fn write_uint(value: u64, size: usize, endianness: Endianness, dst: &mut Vec<u8>) {
    debug_assert!((1..=8).contains(&size));

    match endianness {
        Endianness::Big => {
            for i in (0..size).rev() {
                dst.push((value >> (i * 8)) as u8);
            }
        }
        Endianness::Little => {
            for i in 0..size {
                dst.push((value >> (i * 8)) as u8);
            }
        }
    }
}

/// Reads an unsigned integer spanning all of `data` (at most 8 bytes).
pub fn read_uint(data: &[u8], endianness: Endianness) -> u64 {
    debug_assert!(data.len() <= 8);

    match endianness {
        Endianness::Big => data
            .iter()
            .fold(0u64, |acc, &byte| (acc << 8) | byte as u64),
        Endianness::Little => data
            .iter()
            .rev()
            .fold(0u64, |acc, &byte| (acc << 8) | byte as u64),
    }
}
