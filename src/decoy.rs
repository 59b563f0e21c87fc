//! Non-member (decoy) elements encoding a `0` bit.
//!
//! A decoy is plain pseudorandomness: two chained avalanche hashes of a
//! seed, one of them pushed through a CPRNG on an unrelated prime pair, then
//! XOR-folded. Nothing steers it away from valid codewords; it simply has
//! no orbit structure, so the membership test rejects it with probability
//! about `1 - 2^-32`.

use rand_core::RngCore;

use crate::random::avalanche::avalanche_hash;
use crate::random::bbs::BlumBlumShub;
use crate::translucent::Codeword;

/// Builds the decoy element for a fixed seed.
///
/// ```text
/// left   = H(seed)
/// right  = CPRNG(H(left))
/// left'  = right ^ (left ^ seed)
/// right' = left
/// ```
pub fn generate_from_seed(seed: u32, diversifier: &BlumBlumShub, iterations: usize) -> Codeword {
    let left = avalanche_hash(seed);
    let chained = avalanche_hash(left);
    let right = diversifier
        .sequence(chained, iterations)
        .last()
        .unwrap_or(chained);
    let folded_left = right ^ (left ^ seed);
    let folded_right = left;
    Codeword::new(folded_left, folded_right)
}

/// Draws a fresh decoy element from the entropy source.
pub fn generate<R>(diversifier: &BlumBlumShub, iterations: usize, rng: &mut R) -> Codeword
where
    R: RngCore + ?Sized,
{
    generate_from_seed(rng.next_u32(), diversifier, iterations)
}
