//! Translucent-set codewords: encoding a `1` bit and testing membership.
//!
//! # Wire layout
//!
//! ```text
//!  63                              32 31                               0
//! ┌──────────────────────────────────┬──────────────────────────────────┐
//! │ x0: last iterate f^(K-1)(seed)   │ predicates b_0 .. b_(K-1)        │
//! └──────────────────────────────────┴──────────────────────────────────┘
//! ```
//!
//! Both halves are big-endian. `b_i = predicate(f^i(seed))` sits in bit
//! `31 - i`, so the predicate half is stored in forward iteration order.
//! The published `x0` is the *last* iterate, so the decoder consumes the
//! predicate half in reverse: it checks `b_(K-1)` against `x0`, inverts once
//! to reach `f^(K-2)(seed)`, checks `b_(K-2)`, and so on back to `b_0`.

use std::fmt;

use rand_core::RngCore;

use crate::error::{PdeError, PdeResult};
use crate::number_theory::gcd;
use crate::random::avalanche::avalanche_hash;
use crate::random::bbs::BlumBlumShub;
use crate::trapdoor::TrapdoorPermutation;
use crate::utils::bits::{pack_msb_first, push_bit_chars, unpack_msb_first};

/// Length of the predicate sequence. The encoder's iteration count and the
/// decoder's verification loop both use this constant.
pub const K: usize = 32;

/// Size of one codeword on the wire.
pub const CODEWORD_BYTES: usize = 8;

/// Draws from the entropy source before giving up on finding a seed in `Z_n*`.
const MAX_SEED_ATTEMPTS: usize = 64;

/// One 64-bit unit of ciphertext.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Codeword(u64);

impl Codeword {
    /// Joins an `x0` half and a packed predicate half.
    pub fn new(x0: u32, predicate_bits: u32) -> Self {
        Codeword(((x0 as u64) << 32) | predicate_bits as u64)
    }

    pub fn from_u64(raw: u64) -> Self {
        Codeword(raw)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// The published iterate (high half).
    pub fn x0(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// The packed predicate half (low half).
    pub fn predicate_bits(self) -> u32 {
        self.0 as u32
    }

    /// Predicate sequence in forward iteration order.
    pub fn predicates(self) -> [bool; K] {
        unpack_msb_first(self.predicate_bits())
    }

    pub fn to_bytes(self) -> [u8; CODEWORD_BYTES] {
        self.0.to_be_bytes()
    }

    pub fn from_bytes(bytes: [u8; CODEWORD_BYTES]) -> Self {
        Codeword(u64::from_be_bytes(bytes))
    }

    /// 64 `'0'`/`'1'` characters, `x0` half first.
    pub fn to_bit_string(self) -> String {
        let mut s = String::with_capacity(64);
        push_bit_chars(self.0, 64, &mut s);
        s
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:064b}", self.0)
    }
}

/// Result of the membership test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// All `K` predicate checks passed; decodes to `1`.
    Member,
    /// The check at `step` (0 = most recent iterate) failed; decodes to `0`.
    Rejected { step: usize },
}

impl Membership {
    pub fn is_member(self) -> bool {
        matches!(self, Membership::Member)
    }

    /// The plaintext bit this outcome decodes to.
    pub fn bit(self) -> bool {
        self.is_member()
    }
}

/// Iterates the permutation `K - 1` times from `x0`, recording the predicate
/// of every iterate (including `x0` itself).
///
/// Returns the predicates in forward order and the last iterate reached.
pub fn predicate_sequence<P>(perm: &P, x0: u32) -> ([bool; K], u32)
where
    P: TrapdoorPermutation + ?Sized,
{
    let mut predicates = [false; K];
    let mut current = x0;
    for (i, slot) in predicates.iter_mut().enumerate() {
        if i > 0 {
            current = perm.forward(current);
        }
        *slot = perm.predicate(current);
    }
    (predicates, current)
}

/// Builds the translucent element for a fixed starting iterate `x0`.
///
/// `x0` must lie in the permutation's domain (for the quadratic variant, a
/// quadratic residue coprime to `n`) or the codeword will not verify.
pub fn encode_one_from_seed<P>(perm: &P, x0: u32) -> Codeword
where
    P: TrapdoorPermutation + ?Sized,
{
    let (predicates, last) = predicate_sequence(perm, x0);
    tracing::trace!(x0, last, "encoded translucent element");
    Codeword::new(last, pack_msb_first(&predicates))
}

/// Derives a starting iterate from the entropy source.
///
/// The raw draw is avalanche-hashed, reduced into `Z_n*`, then squared
/// through the CPRNG; the last CPRNG output is the starting iterate, which
/// makes it a quadratic residue of `n`.
///
/// # Errors
/// Returns [`PdeError::EntropyExhausted`] if no usable seed appears within
/// a bounded number of draws.
pub fn derive_x0<R>(diversifier: &BlumBlumShub, iterations: usize, rng: &mut R) -> PdeResult<u32>
where
    R: RngCore + ?Sized,
{
    let n = diversifier.modulus();
    for _ in 0..MAX_SEED_ATTEMPTS {
        let seed = avalanche_hash(rng.next_u32()) as u64 % n;
        if seed < 2 || gcd(seed, n) != 1 {
            continue;
        }
        if let Some(x0) = diversifier.sequence(seed as u32, iterations.max(1)).last() {
            return Ok(x0);
        }
    }
    Err(PdeError::EntropyExhausted {
        attempts: MAX_SEED_ATTEMPTS,
    })
}

/// Encodes a `1` bit as a fresh translucent element.
///
/// `diversifier` must be built on the same modulus as `perm` so the starting
/// iterate lands in the permutation's domain.
pub fn encode_one<P, R>(
    perm: &P,
    diversifier: &BlumBlumShub,
    iterations: usize,
    rng: &mut R,
) -> PdeResult<Codeword>
where
    P: TrapdoorPermutation + ?Sized,
    R: RngCore + ?Sized,
{
    let x0 = derive_x0(diversifier, iterations, rng)?;
    Ok(encode_one_from_seed(perm, x0))
}

/// Membership test with the trapdoor.
///
/// Walks the orbit backward from the published `x0`, checking the recorded
/// predicates most-recent first. Stops at the first iterate that falls
/// outside the permutation's domain or whose predicate mismatches.
///
/// # Errors
/// Returns [`PdeError::InversionFailed`] only if the permutation cannot
/// invert an iterate it reports as inside its domain.
pub fn decode<P>(perm: &P, codeword: Codeword) -> PdeResult<Membership>
where
    P: TrapdoorPermutation + ?Sized,
{
    let mut expected = codeword.predicates();
    expected.reverse();

    let mut current = codeword.x0();
    for (step, &bit) in expected.iter().enumerate() {
        if !perm.contains(current) {
            tracing::debug!(step, value = current, "iterate outside domain, membership rejected");
            return Ok(Membership::Rejected { step });
        }
        if perm.predicate(current) != bit {
            tracing::debug!(step, "membership rejected");
            return Ok(Membership::Rejected { step });
        }
        if step + 1 < K {
            current = perm.invert(current)?;
        }
    }
    Ok(Membership::Member)
}
