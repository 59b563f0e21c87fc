//! Quadratic-residue trapdoor permutation (Rabin squaring on Blum integers).
//!
//! With `p ≡ q ≡ 3 (mod 4)`, squaring permutes the quadratic residues of
//! `Z_n*`. Every residue `a` has four square roots `±c·x ± d·y mod n`, where
//! `x = a^((p+1)/4) mod p`, `y = a^((q+1)/4) mod q` and `c`, `d` are the CRT
//! coefficients; exactly one of them is itself a quadratic residue, and that
//! one is the inverse image.

use super::{Trapdoor, TrapdoorPermutation};
use crate::error::{PdeError, PdeResult};
use crate::number_theory::{gcd, is_quadratic_residue, mod_inverse, mod_pow};

/// Forward step `x -> x^2 mod n`.
#[derive(Debug, Clone)]
pub struct QuadraticPermutation {
    trapdoor: Trapdoor,
    n: u64,
    /// `c ≡ 1 (mod p)`, `c ≡ 0 (mod q)`
    c: u64,
    /// `d ≡ 0 (mod p)`, `d ≡ 1 (mod q)`
    d: u64,
}

impl QuadraticPermutation {
    /// Builds the permutation after running the Blum screen on `trapdoor`.
    ///
    /// # Errors
    /// Returns [`PdeError::TrapdoorRejected`] if the primes fail the screen.
    pub fn new(trapdoor: Trapdoor) -> PdeResult<Self> {
        trapdoor.screen()?;
        let p = trapdoor.p as u64;
        let q = trapdoor.q as u64;
        let n = trapdoor.modulus();
        // Screen guarantees p != q, both prime, so the inverses exist.
        let q_inv_p = mod_inverse(q, p).ok_or_else(|| PdeError::TrapdoorRejected {
            p: trapdoor.p,
            q: trapdoor.q,
            reason: "q has no inverse mod p".to_string(),
        })?;
        let p_inv_q = mod_inverse(p, q).ok_or_else(|| PdeError::TrapdoorRejected {
            p: trapdoor.p,
            q: trapdoor.q,
            reason: "p has no inverse mod q".to_string(),
        })?;
        let c = ((q as u128 * q_inv_p as u128) % n as u128) as u64;
        let d = ((p as u128 * p_inv_q as u128) % n as u128) as u64;
        Ok(QuadraticPermutation { trapdoor, n, c, d })
    }

    /// All four square roots of `a` modulo `n`, principal root first.
    fn candidate_roots(&self, a: u64) -> [u64; 4] {
        let p = self.trapdoor.p as u64;
        let q = self.trapdoor.q as u64;
        let n = self.n as u128;
        let x = mod_pow(a, (p + 1) / 4, p) as u128;
        let y = mod_pow(a, (q + 1) / 4, q) as u128;
        let cx = self.c as u128 * x % n;
        let dy = self.d as u128 * y % n;
        let neg = |v: u128| (n - v) % n;
        [
            ((cx + dy) % n) as u64,
            ((cx + neg(dy)) % n) as u64,
            ((neg(cx) + dy) % n) as u64,
            ((neg(cx) + neg(dy)) % n) as u64,
        ]
    }

    fn is_residue(&self, v: u64) -> bool {
        is_quadratic_residue(v, self.trapdoor.p as u64)
            && is_quadratic_residue(v, self.trapdoor.q as u64)
    }
}

impl TrapdoorPermutation for QuadraticPermutation {
    fn trapdoor(&self) -> Trapdoor {
        self.trapdoor
    }

    fn modulus(&self) -> u64 {
        self.n
    }

    fn forward(&self, x: u32) -> u32 {
        mod_pow(x as u64, 2, self.n) as u32
    }

    /// Quadratic residues of `Z_n*`.
    fn contains(&self, x: u32) -> bool {
        let a = x as u64;
        a < self.n && gcd(a, self.n) == 1 && self.is_residue(a)
    }

    fn invert(&self, x: u32) -> PdeResult<u32> {
        if !self.contains(x) {
            return Err(PdeError::InversionFailed { value: x });
        }
        let a = x as u64;
        self.candidate_roots(a)
            .into_iter()
            .find(|&r| mod_pow(r, 2, self.n) == a && self.is_residue(r))
            .map(|r| r as u32)
            .ok_or(PdeError::InversionFailed { value: x })
    }
}
