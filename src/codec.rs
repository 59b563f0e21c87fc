//! AsymmetricCodec: message-level translucent-set encryption.
//!
//! ```text
//! plaintext bytes ─► bits (MSB first) ─► per bit:
//!                                          1 ─► translucent element (encoder)
//!                                          0 ─► decoy element      (generator)
//!                                        ─► codewords ─► 8 bytes each
//! ```
//!
//! Decryption splits the ciphertext into 64-bit blocks, runs the membership
//! test on each and reassembles the bits. Every plaintext byte becomes 64
//! ciphertext bytes.

use rand_core::RngCore;

use crate::decoy;
use crate::error::{PdeError, PdeResult};
use crate::random::bbs::BlumBlumShub;
use crate::translucent::{self, Codeword};
use crate::trapdoor::{Trapdoor, TrapdoorPermutation};
use crate::utils::converter;

/// Default CPRNG iterations used to diversify seeds.
pub const DEFAULT_CPRNG_ITERATIONS: usize = 16;

/// Plaintext recovered by [`AsymmetricCodec::decrypt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOutcome {
    pub plaintext: Vec<u8>,
    /// Blocks the permutation failed to invert inside its own domain. Each
    /// one decoded to a `0` bit. Honest decoys never land here.
    pub inversion_failures: usize,
}

/// Translucent-set encryptor/decryptor over a chosen trapdoor permutation.
///
/// # Examples
///
/// ```
/// use translucent_pde::codec::AsymmetricCodec;
/// use translucent_pde::random::MersenneTwister;
/// use translucent_pde::trapdoor::{QuadraticPermutation, Trapdoor};
///
/// let perm = QuadraticPermutation::new(Trapdoor::DEMO).unwrap();
/// let codec = AsymmetricCodec::new(perm).unwrap();
/// let mut rng = MersenneTwister::with_seed(1);
///
/// let ciphertext = codec.encrypt_to_bytes(b"hi", &mut rng).unwrap();
/// assert_eq!(ciphertext.len(), 2 * 64);
/// assert_eq!(codec.decrypt_bytes(&ciphertext).unwrap().plaintext, b"hi");
/// ```
#[derive(Debug, Clone)]
pub struct AsymmetricCodec<P> {
    permutation: P,
    diversifier: BlumBlumShub,
    decoy_diversifier: BlumBlumShub,
    cprng_iterations: usize,
}

impl<P: TrapdoorPermutation> AsymmetricCodec<P> {
    /// Creates a codec with the default decoy pair and CPRNG iterations.
    ///
    /// # Errors
    /// Returns [`PdeError::TrapdoorRejected`] if the permutation's trapdoor
    /// fails the Blum screen needed by the seed diversifier.
    pub fn new(permutation: P) -> PdeResult<Self> {
        Self::with_options(permutation, Trapdoor::DECOY, DEFAULT_CPRNG_ITERATIONS)
    }

    /// Creates a codec with an explicit decoy pair and iteration count.
    ///
    /// # Errors
    /// - [`PdeError::InvalidIterations`] if `cprng_iterations` is zero.
    /// - [`PdeError::TrapdoorRejected`] if either trapdoor fails the Blum
    ///   screen.
    pub fn with_options(
        permutation: P,
        decoy_trapdoor: Trapdoor,
        cprng_iterations: usize,
    ) -> PdeResult<Self> {
        if cprng_iterations == 0 {
            return Err(PdeError::InvalidIterations {
                iterations: cprng_iterations,
            });
        }
        let diversifier = BlumBlumShub::new(permutation.trapdoor())?;
        let decoy_diversifier = BlumBlumShub::new(decoy_trapdoor)?;
        Ok(AsymmetricCodec {
            permutation,
            diversifier,
            decoy_diversifier,
            cprng_iterations,
        })
    }

    pub fn permutation(&self) -> &P {
        &self.permutation
    }

    pub fn cprng_iterations(&self) -> usize {
        self.cprng_iterations
    }

    /// Encodes one plaintext bit as a codeword.
    pub fn encode_bit<R>(&self, bit: bool, rng: &mut R) -> PdeResult<Codeword>
    where
        R: RngCore + ?Sized,
    {
        if bit {
            translucent::encode_one(
                &self.permutation,
                &self.diversifier,
                self.cprng_iterations,
                rng,
            )
        } else {
            Ok(decoy::generate(
                &self.decoy_diversifier,
                self.cprng_iterations,
                rng,
            ))
        }
    }

    /// Encodes a bit sequence, one codeword per bit.
    pub fn encode_bits<R>(&self, bits: &[bool], rng: &mut R) -> PdeResult<Vec<Codeword>>
    where
        R: RngCore + ?Sized,
    {
        bits.iter().map(|&bit| self.encode_bit(bit, rng)).collect()
    }

    /// Encrypts plaintext bytes into `8 * len` codewords.
    pub fn encrypt<R>(&self, plaintext: &[u8], rng: &mut R) -> PdeResult<Vec<Codeword>>
    where
        R: RngCore + ?Sized,
    {
        let codewords = self.encode_bits(&converter::bytes_to_bits(plaintext), rng)?;
        tracing::debug!(
            plaintext_len = plaintext.len(),
            codewords = codewords.len(),
            "encrypted message"
        );
        Ok(codewords)
    }

    /// Encrypts plaintext bytes straight to the 64-bytes-per-byte wire form.
    pub fn encrypt_to_bytes<R>(&self, plaintext: &[u8], rng: &mut R) -> PdeResult<Vec<u8>>
    where
        R: RngCore + ?Sized,
    {
        Ok(converter::codewords_to_bytes(&self.encrypt(plaintext, rng)?))
    }

    /// Decodes a single codeword.
    ///
    /// # Errors
    /// Returns [`PdeError::InversionFailed`] if the permutation could not
    /// invert an in-domain iterate.
    pub fn decode_bit(&self, codeword: Codeword) -> PdeResult<bool> {
        Ok(translucent::decode(&self.permutation, codeword)?.bit())
    }

    /// Decodes codewords back to plaintext.
    ///
    /// An inversion failure affects only its own block, which decodes to `0`.
    ///
    /// # Errors
    /// Returns [`PdeError::InvalidBitCount`] if the codeword count is not a
    /// multiple of 8.
    pub fn decrypt(&self, codewords: &[Codeword]) -> PdeResult<DecodeOutcome> {
        let mut bits = Vec::with_capacity(codewords.len());
        let mut inversion_failures = 0;
        for (index, &cw) in codewords.iter().enumerate() {
            match self.decode_bit(cw) {
                Ok(bit) => bits.push(bit),
                Err(PdeError::InversionFailed { value }) => {
                    tracing::debug!(index, value, "inversion failed, block decodes to 0");
                    inversion_failures += 1;
                    bits.push(false);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(DecodeOutcome {
            plaintext: converter::bits_to_bytes(&bits)?,
            inversion_failures,
        })
    }

    /// Decodes the 8-bytes-per-codeword wire form.
    ///
    /// # Errors
    /// Returns [`PdeError::InvalidBlockLength`] on a trailing partial block.
    pub fn decrypt_bytes(&self, ciphertext: &[u8]) -> PdeResult<DecodeOutcome> {
        self.decrypt(&converter::bytes_to_codewords(ciphertext)?)
    }

    /// Decodes the `'0'`/`'1'` text form.
    pub fn decrypt_bit_string(&self, text: &str) -> PdeResult<DecodeOutcome> {
        self.decrypt(&converter::bit_string_to_codewords(text)?)
    }
}
