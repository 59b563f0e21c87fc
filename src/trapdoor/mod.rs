//! Trapdoor permutations over `Z_n`, `n = p·q`, and their hardcore predicate.
//!
//! Two interchangeable constructions sit behind [`TrapdoorPermutation`]:
//!
//! ```text
//! QuadraticPermutation   x -> x^2 mod n     inverse: CRT square roots mod p, q
//! ExponentPermutation    x -> x^e mod n     inverse: x^d, d = e^-1 mod phi(n)
//! ```
//!
//! Anyone holding `n` can run `forward`; only the holder of `{p, q}` can run
//! `invert`. The codec is written once against the trait.

pub mod exponent;
pub mod quadratic;

use serde::{Deserialize, Serialize};

use crate::error::{PdeError, PdeResult};
use crate::number_theory::is_prime;

pub use exponent::ExponentPermutation;
pub use quadratic::QuadraticPermutation;

/// The secret factor pair of the public modulus.
///
/// Fixed for the life of an encryption session and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trapdoor {
    pub p: u32,
    pub q: u32,
}

impl Trapdoor {
    /// Demonstration trapdoor. Both primes pass the Blum screen, `p·q` fits
    /// in 32 bits and `gcd(17, phi(n)) = 1`, so the pair serves both variants.
    pub const DEMO: Trapdoor = Trapdoor { p: 65267, q: 65147 };

    /// Small unrelated pair used to diversify decoy elements.
    pub const DECOY: Trapdoor = Trapdoor { p: 1019, q: 1187 };

    pub const fn new(p: u32, q: u32) -> Self {
        Trapdoor { p, q }
    }

    /// Public modulus `n = p·q`, widened so it never overflows.
    pub fn modulus(&self) -> u64 {
        self.p as u64 * self.q as u64
    }

    /// Euler's totient `(p - 1)(q - 1)`.
    pub fn phi(&self) -> u64 {
        (self.p as u64).saturating_sub(1) * (self.q as u64).saturating_sub(1)
    }

    fn reject(&self, reason: impl Into<String>) -> PdeError {
        let err = PdeError::TrapdoorRejected {
            p: self.p,
            q: self.q,
            reason: reason.into(),
        };
        tracing::warn!(p = self.p, q = self.q, "{}", err);
        err
    }

    /// Checks that both factors are distinct primes and `n` fits in a `u32`.
    pub(crate) fn check_rsa_shape(&self) -> PdeResult<()> {
        if !is_prime(self.p as u64) {
            return Err(self.reject("p is not prime"));
        }
        if !is_prime(self.q as u64) {
            return Err(self.reject("q is not prime"));
        }
        if self.p == self.q {
            return Err(self.reject("p and q must differ"));
        }
        if self.modulus() > u32::MAX as u64 {
            return Err(self.reject("modulus p*q does not fit in 32 bits"));
        }
        Ok(())
    }

    /// Blum screen applied by the CPRNG and the quadratic variant.
    ///
    /// Requires `p ≡ q ≡ 3 (mod 4)` and that `p / 2` and `q / 2` (integer
    /// division) are prime, on top of [`check_rsa_shape`](Self::check_rsa_shape).
    pub fn screen(&self) -> PdeResult<()> {
        self.check_rsa_shape()?;
        if self.p % 4 != 3 {
            return Err(self.reject("p is not congruent to 3 mod 4"));
        }
        if self.q % 4 != 3 {
            return Err(self.reject("q is not congruent to 3 mod 4"));
        }
        if !is_prime((self.p / 2) as u64) {
            return Err(self.reject("p / 2 is not prime"));
        }
        if !is_prime((self.q / 2) as u64) {
            return Err(self.reject("q / 2 is not prime"));
        }
        Ok(())
    }
}

impl Default for Trapdoor {
    fn default() -> Self {
        Trapdoor::DEMO
    }
}

/// Hardcore predicate: XOR-parity of all 32 bits of `x`.
///
/// # Examples
///
/// ```
/// use translucent_pde::trapdoor::predicate;
///
/// assert!(!predicate(0b1010));
/// assert!(predicate(0b1011));
/// ```
pub fn predicate(x: u32) -> bool {
    x.count_ones() % 2 == 1
}

/// A bijection on its domain that only the trapdoor holder can invert.
///
/// Object safe so a codec can hold `Box<dyn TrapdoorPermutation>` chosen
/// at runtime from configuration.
pub trait TrapdoorPermutation {
    /// The secret factor pair.
    fn trapdoor(&self) -> Trapdoor;

    /// Public modulus of the permutation.
    fn modulus(&self) -> u64;

    /// Applies the permutation once. Inputs are reduced modulo `n` first.
    fn forward(&self, x: u32) -> u32;

    /// Inverts one application of [`forward`](Self::forward).
    ///
    /// # Errors
    /// Returns [`PdeError::InversionFailed`] if `x` is outside the domain.
    fn invert(&self, x: u32) -> PdeResult<u32>;

    /// Whether `x` lies in the set the permutation acts on.
    ///
    /// Every iterate on a genuine orbit is in the domain, so the decoder
    /// treats anything outside it as a non-member rather than an error.
    fn contains(&self, x: u32) -> bool {
        (x as u64) < self.modulus()
    }

    /// The bit revealed by one forward step.
    fn predicate(&self, x: u32) -> bool {
        predicate(x)
    }
}

impl<T: TrapdoorPermutation + ?Sized> TrapdoorPermutation for Box<T> {
    fn trapdoor(&self) -> Trapdoor {
        (**self).trapdoor()
    }

    fn modulus(&self) -> u64 {
        (**self).modulus()
    }

    fn forward(&self, x: u32) -> u32 {
        (**self).forward(x)
    }

    fn invert(&self, x: u32) -> PdeResult<u32> {
        (**self).invert(x)
    }

    fn contains(&self, x: u32) -> bool {
        (**self).contains(x)
    }

    fn predicate(&self, x: u32) -> bool {
        (**self).predicate(x)
    }
}

impl<T: TrapdoorPermutation + ?Sized> TrapdoorPermutation for &T {
    fn trapdoor(&self) -> Trapdoor {
        (**self).trapdoor()
    }

    fn modulus(&self) -> u64 {
        (**self).modulus()
    }

    fn forward(&self, x: u32) -> u32 {
        (**self).forward(x)
    }

    fn invert(&self, x: u32) -> PdeResult<u32> {
        (**self).invert(x)
    }

    fn contains(&self, x: u32) -> bool {
        (**self).contains(x)
    }

    fn predicate(&self, x: u32) -> bool {
        (**self).predicate(x)
    }
}
