//! Bit packing helpers for codeword halves.
//!
//! Everything is most-significant-bit first: index 0 of a bool slice lands in
//! bit 31 of the packed word, matching the fixed-width binary rendering of
//! the value.

/// Width of one codeword half in bits.
pub(crate) const WORD_BITS: usize = 32;

/// Packs up to 32 flags into a `u32`, first flag in the most significant bit.
///
/// Extra flags beyond 32 are ignored; missing trailing flags read as `false`.
pub(crate) fn pack_msb_first(bits: &[bool]) -> u32 {
    bits.iter()
        .take(WORD_BITS)
        .enumerate()
        .fold(0u32, |acc, (i, &b)| {
            if b {
                acc | (1 << (WORD_BITS - 1 - i))
            } else {
                acc
            }
        })
}

/// Unpacks a `u32` into 32 flags, most significant bit first.
pub(crate) fn unpack_msb_first(word: u32) -> [bool; WORD_BITS] {
    let mut out = [false; WORD_BITS];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = (word >> (WORD_BITS - 1 - i)) & 1 == 1;
    }
    out
}

/// Appends the `width` low bits of `value` as `'0'`/`'1'` characters, MSB first.
pub(crate) fn push_bit_chars(value: u64, width: usize, out: &mut String) {
    for i in (0..width).rev() {
        out.push(if (value >> i) & 1 == 1 { '1' } else { '0' });
    }
}
