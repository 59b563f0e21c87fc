//! Number-theory primitives for the toy trapdoor constructions.
//!
//! All modular arithmetic widens to `u128` (or `i128` for the extended
//! Euclidean algorithm) so products of two 64-bit residues never overflow.

/// Deterministic primality test by trial division over the 6k±1 wheel.
///
/// Returns `true` for 2 and 3, `false` for 0, 1 and any multiple of 2 or 3.
/// Covers the whole `u64` domain; the `i * i` bound is evaluated in `u128`.
///
/// # Examples
///
/// ```
/// use translucent_pde::number_theory::is_prime;
///
/// assert!(is_prime(65267));
/// assert!(!is_prime(65267 * 3));
/// ```
pub fn is_prime(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i: u64 = 5;
    while (i as u128) * (i as u128) <= n as u128 {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Greatest common divisor (Euclid).
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Computes `base^exponent mod modulus` by square-and-multiply.
///
/// A modulus of 0 or 1 yields 0.
pub fn mod_pow(base: u64, mut exponent: u64, modulus: u64) -> u64 {
    if modulus <= 1 {
        return 0;
    }
    let m = modulus as u128;
    let mut result: u128 = 1;
    let mut b = (base as u128) % m;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result * b % m;
        }
        b = b * b % m;
        exponent >>= 1;
    }
    result as u64
}

/// Modular inverse of `a` modulo `m` via the extended Euclidean algorithm.
///
/// The result is reduced to the positive residue in `[0, m)`. Returns
/// `None` when `gcd(a, m) != 1` or `m < 2`.
pub fn mod_inverse(a: u64, m: u64) -> Option<u64> {
    if m < 2 {
        return None;
    }
    let (mut old_r, mut r) = ((a % m) as i128, m as i128);
    let (mut old_s, mut s) = (1i128, 0i128);
    while r != 0 {
        let quotient = old_r / r;
        (old_r, r) = (r, old_r - quotient * r);
        (old_s, s) = (s, old_s - quotient * s);
    }
    if old_r != 1 {
        return None;
    }
    Some(old_s.rem_euclid(m as i128) as u64)
}

/// Euler criterion: `a` is a non-zero quadratic residue modulo the odd prime `p`.
///
/// Always `false` for `p < 3`.
pub fn is_quadratic_residue(a: u64, p: u64) -> bool {
    if p < 3 {
        return false;
    }
    let a = a % p;
    a != 0 && mod_pow(a, (p - 1) / 2, p) == 1
}
