//! Plausibly deniable encryption over translucent sets.
//!
//! A demonstration cryptosystem. Each plaintext bit becomes a 64-bit
//! codeword: a `1` is a translucent element, built by walking the orbit of
//! a trapdoor permutation and recording a hardcore predicate at every step;
//! a `0` is pseudorandom noise. Only the holder of the trapdoor primes can
//! walk the orbit backward and tell the two apart. A symmetric XOR mode
//! with a derived decoy key is included alongside.
//!
//! Key sizes are toy-scale (`p·q < 2^32`) and seeding is not
//! cryptographic. Nothing here resists a real adversary.
//!
//! # Architecture
//!
//! ```text
//! number_theory        (primality, mod_pow, mod_inverse, Euler criterion)
//!     ↓
//! random               (avalanche hash, MT19937-64, BBS CPRNG, key stretch)
//!     ↓
//! trapdoor             (Trapdoor{p,q}, TrapdoorPermutation, predicate)
//!     ↓                  QuadraticPermutation | ExponentPermutation
//! translucent / decoy  (encode `1`, membership test / encode `0`)
//!     ↓
//! codec                (AsymmetricCodec: bytes <-> codewords <-> wire bytes)
//! ```
//!
//! # Examples
//!
//! Encrypt and decrypt with the quadratic-residue permutation:
//!
//! ```
//! use translucent_pde::config::SchemeConfig;
//! use translucent_pde::random::MersenneTwister;
//!
//! let codec = SchemeConfig::default().build().unwrap();
//! let mut rng = MersenneTwister::with_seed(42);
//!
//! let ciphertext = codec.encrypt_to_bytes(b"secret", &mut rng).unwrap();
//! let outcome = codec.decrypt_bytes(&ciphertext).unwrap();
//! assert_eq!(outcome.plaintext, b"secret");
//! ```
//!
//! Deniable symmetric mode:
//!
//! ```
//! use translucent_pde::symmetric;
//!
//! let sealed = symmetric::encrypt(b"HELLO", b"WORLD", b"XO").unwrap();
//! assert_eq!(sealed.open(sealed.decoy_key()).unwrap(), b"XO   ");
//! ```

#![deny(clippy::all)]

pub mod codec;
pub mod config;
pub mod decoy;
pub mod error;
pub mod number_theory;
pub mod random;
pub mod symmetric;
pub mod translucent;
pub mod trapdoor;
pub mod utils;

pub use codec::{AsymmetricCodec, DecodeOutcome};
pub use config::{PermutationKind, SchemeConfig};
pub use error::{PdeError, PdeResult};
pub use translucent::{Codeword, Membership};
pub use trapdoor::{ExponentPermutation, QuadraticPermutation, Trapdoor, TrapdoorPermutation};
