//! Conversions between plaintext bytes, bit sequences and codewords.
//!
//! Bytes are unpacked most-significant-bit first, matching the fixed-width
//! binary rendering of each byte value. Codewords travel as 8 big-endian
//! bytes each, or as 64 `'0'`/`'1'` characters each in text form.

use crate::error::{PdeError, PdeResult};
use crate::translucent::{Codeword, CODEWORD_BYTES};

/// Expands each byte into 8 bits, most significant first.
pub fn bytes_to_bits(input: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(input.len() * 8);
    for &byte in input {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1 == 1);
        }
    }
    bits
}

/// Packs bits back into bytes, 8 per byte, most significant first.
///
/// # Errors
/// Returns [`PdeError::InvalidBitCount`] if `bits.len()` is not a multiple of 8.
pub fn bits_to_bytes(bits: &[bool]) -> PdeResult<Vec<u8>> {
    if !bits.len().is_multiple_of(8) {
        return Err(PdeError::InvalidBitCount { bits: bits.len() });
    }
    Ok(bits
        .chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &b| (acc << 1) | b as u8))
        .collect())
}

/// Serializes codewords as consecutive 8-byte big-endian blocks.
pub fn codewords_to_bytes(codewords: &[Codeword]) -> Vec<u8> {
    let mut output = Vec::with_capacity(codewords.len() * CODEWORD_BYTES);
    for cw in codewords {
        output.extend_from_slice(&cw.to_bytes());
    }
    output
}

/// Splits ciphertext bytes into codewords.
///
/// # Errors
/// Returns [`PdeError::InvalidBlockLength`] if `input.len()` is not a
/// multiple of 8; a short trailing block is never decoded.
pub fn bytes_to_codewords(input: &[u8]) -> PdeResult<Vec<Codeword>> {
    if !input.len().is_multiple_of(CODEWORD_BYTES) {
        return Err(PdeError::InvalidBlockLength { len: input.len() });
    }
    Ok(input
        .chunks_exact(CODEWORD_BYTES)
        .map(|chunk| {
            let mut block = [0u8; CODEWORD_BYTES];
            block.copy_from_slice(chunk);
            Codeword::from_bytes(block)
        })
        .collect())
}

/// Renders codewords as one continuous `'0'`/`'1'` string.
pub fn codewords_to_bit_string(codewords: &[Codeword]) -> String {
    let mut s = String::with_capacity(codewords.len() * 64);
    for cw in codewords {
        s.push_str(&cw.to_bit_string());
    }
    s
}

/// Parses a `'0'`/`'1'` string into codewords.
///
/// # Errors
/// - [`PdeError::InvalidBitString`] on any other character.
/// - [`PdeError::InvalidBitCount`] if the length is not a multiple of 64.
pub fn bit_string_to_codewords(text: &str) -> PdeResult<Vec<Codeword>> {
    let mut words = Vec::with_capacity(text.len() / 64);
    let mut acc: u64 = 0;
    let mut count = 0usize;
    for (position, ch) in text.chars().enumerate() {
        let bit = match ch {
            '0' => 0,
            '1' => 1,
            found => return Err(PdeError::InvalidBitString { position, found }),
        };
        acc = (acc << 1) | bit;
        count += 1;
        if count.is_multiple_of(64) {
            words.push(Codeword::from_u64(acc));
            acc = 0;
        }
    }
    if !count.is_multiple_of(64) {
        return Err(PdeError::InvalidBitCount { bits: count });
    }
    Ok(words)
}
