//! Fixed-public-exponent trapdoor permutation (textbook RSA on a toy modulus).

use super::{Trapdoor, TrapdoorPermutation};
use crate::error::{PdeError, PdeResult};
use crate::number_theory::{gcd, mod_inverse, mod_pow};

/// Default public exponent.
pub const DEFAULT_EXPONENT: u32 = 17;

/// Forward step `x -> x^e mod n`; inverse `a -> a^d mod n`.
#[derive(Debug, Clone)]
pub struct ExponentPermutation {
    trapdoor: Trapdoor,
    n: u64,
    e: u32,
    d: u64,
}

impl ExponentPermutation {
    /// Builds the permutation and derives the private exponent
    /// `d = e^-1 mod phi(n)`.
    ///
    /// # Errors
    /// - [`PdeError::TrapdoorRejected`] if `p`, `q` are not distinct primes
    ///   with `p·q <= u32::MAX`.
    /// - [`PdeError::InvalidExponent`] if `e <= 1` or `gcd(e, phi(n)) != 1`.
    pub fn new(trapdoor: Trapdoor, e: u32) -> PdeResult<Self> {
        trapdoor.check_rsa_shape()?;
        let phi = trapdoor.phi();
        if e <= 1 || gcd(e as u64, phi) != 1 {
            return Err(PdeError::InvalidExponent { e });
        }
        let d = mod_inverse(e as u64, phi).ok_or(PdeError::InvalidExponent { e })?;
        Ok(ExponentPermutation {
            trapdoor,
            n: trapdoor.modulus(),
            e,
            d,
        })
    }

    /// Uses [`DEFAULT_EXPONENT`].
    pub fn with_default_exponent(trapdoor: Trapdoor) -> PdeResult<Self> {
        Self::new(trapdoor, DEFAULT_EXPONENT)
    }

    pub fn public_exponent(&self) -> u32 {
        self.e
    }

    pub fn private_exponent(&self) -> u64 {
        self.d
    }
}

impl TrapdoorPermutation for ExponentPermutation {
    fn trapdoor(&self) -> Trapdoor {
        self.trapdoor
    }

    fn modulus(&self) -> u64 {
        self.n
    }

    fn forward(&self, x: u32) -> u32 {
        mod_pow(x as u64, self.e as u64, self.n) as u32
    }

    fn invert(&self, x: u32) -> PdeResult<u32> {
        if x as u64 >= self.n {
            return Err(PdeError::InversionFailed { value: x });
        }
        Ok(mod_pow(x as u64, self.d, self.n) as u32)
    }
}
