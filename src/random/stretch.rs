//! Deterministic key stretching for the symmetric mode.
//!
//! A short key is extended one byte at a time. Each new byte depends on the
//! whole key so far:
//!
//! ```text
//! base = Σ key[i] * i          (wrapping u32)
//! seed = avalanche_hash(base)
//! byte = MT19937-64(seed) draw in [32, 255]
//! ```

use super::avalanche::avalanche_hash;
use super::mersenne_twister::MersenneTwister;
use crate::error::{PdeError, PdeResult};

/// Lowest byte value appended by the stretch.
pub const STRETCH_BYTE_MIN: u8 = 32;
/// Highest byte value appended by the stretch.
pub const STRETCH_BYTE_MAX: u8 = 255;

/// Position-weighted byte sum of `key`.
fn weighted_sum(key: &[u8]) -> u32 {
    key.iter()
        .enumerate()
        .fold(0u32, |acc, (i, &b)| acc.wrapping_add((b as u32).wrapping_mul(i as u32)))
}

/// Extends `key` to exactly `target_len` bytes.
///
/// The original bytes are kept as a prefix. The result is a pure function
/// of `(key, target_len)`.
///
/// # Errors
/// Returns [`PdeError::KeyLongerThanTarget`] if `key` is already longer than
/// `target_len`; callers truncate before stretching.
///
/// # Examples
///
/// ```
/// use translucent_pde::random::stretch::stretch_key;
///
/// let stretched = stretch_key(b"AB", 5).unwrap();
/// assert_eq!(stretched.len(), 5);
/// assert_eq!(&stretched[..2], b"AB");
/// assert_eq!(stretched, stretch_key(b"AB", 5).unwrap());
/// ```
pub fn stretch_key(key: &[u8], target_len: usize) -> PdeResult<Vec<u8>> {
    if key.len() > target_len {
        return Err(PdeError::KeyLongerThanTarget {
            key_len: key.len(),
            target_len,
        });
    }
    let mut stretched = Vec::with_capacity(target_len);
    stretched.extend_from_slice(key);
    // Running form of weighted_sum(&stretched).
    let mut base = weighted_sum(key);
    while stretched.len() < target_len {
        let mut rng = MersenneTwister::with_seed(avalanche_hash(base) as u64);
        let byte = rng.next_in_range(STRETCH_BYTE_MIN, STRETCH_BYTE_MAX);
        base = base.wrapping_add((byte as u32).wrapping_mul(stretched.len() as u32));
        stretched.push(byte);
    }
    Ok(stretched)
}
