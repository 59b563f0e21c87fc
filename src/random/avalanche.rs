//! 32-bit avalanche mix used for seed diversification.
//!
//! Deterministic and cheap. Not a cryptographic hash; collisions are
//! harmless because every output is further diversified through the CPRNG.

const XOR_CONSTANT: u32 = 2_747_636_419;
const MUL_CONSTANT: u32 = 2_654_435_769;
const ROUNDS: usize = 3;

/// Mixes `x` so that flipping one input bit flips about half the output bits.
///
/// One initial XOR with a fixed constant, then three rounds of
/// multiply followed by a 16-bit xor-shift.
///
/// # Examples
///
/// ```
/// use translucent_pde::random::avalanche::avalanche_hash;
///
/// assert_eq!(avalanche_hash(7), avalanche_hash(7));
/// assert_ne!(avalanche_hash(7), avalanche_hash(6));
/// ```
pub fn avalanche_hash(x: u32) -> u32 {
    let mut state = x ^ XOR_CONSTANT;
    for _ in 0..ROUNDS {
        state = state.wrapping_mul(MUL_CONSTANT);
        state ^= state >> 16;
    }
    state
}
