//! Symmetric deniable mode: XOR with a real key and a derived decoy key.
//!
//! ```text
//! ciphertext = plaintext ^ key
//! decoy_key  = decoy_plaintext ^ ciphertext
//! ```
//!
//! The ciphertext and either key are published together; each key opens
//! the ciphertext to a plausible plaintext.

use crate::error::{PdeError, PdeResult};
use crate::random::stretch::stretch_key;

/// Byte used to pad a short decoy plaintext up to the key length.
pub const DECOY_PADDING: u8 = b' ';

/// Ciphertext plus the two keys that open it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeniableXor {
    ciphertext: Vec<u8>,
    real_key: Vec<u8>,
    decoy_key: Vec<u8>,
}

impl DeniableXor {
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Key that reveals the genuine plaintext.
    pub fn real_key(&self) -> &[u8] {
        &self.real_key
    }

    /// Key that reveals the padded decoy plaintext.
    pub fn decoy_key(&self) -> &[u8] {
        &self.decoy_key
    }

    /// XORs `key` with the ciphertext.
    ///
    /// # Errors
    /// Returns [`PdeError::LengthMismatch`] if `key` is not exactly as long
    /// as the ciphertext.
    pub fn open(&self, key: &[u8]) -> PdeResult<Vec<u8>> {
        xor_bytes(&self.ciphertext, key)
    }
}

/// XORs two equal-length buffers.
///
/// # Errors
/// Returns [`PdeError::LengthMismatch`] if the lengths differ.
pub fn xor_bytes(left: &[u8], right: &[u8]) -> PdeResult<Vec<u8>> {
    if left.len() != right.len() {
        return Err(PdeError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(left.iter().zip(right).map(|(a, b)| a ^ b).collect())
}

/// Fits `key` to `len` bytes: truncated when longer, stretched when shorter.
fn fit_key(key: &[u8], len: usize) -> PdeResult<Vec<u8>> {
    if key.len() >= len {
        Ok(key[..len].to_vec())
    } else {
        stretch_key(key, len)
    }
}

/// Encrypts `plaintext` under `key` and derives the key that opens the
/// result to `decoy_plaintext`.
///
/// # Errors
/// - [`PdeError::EmptyKey`] if `key` is empty.
/// - [`PdeError::DecoyTooLong`] if the decoy is longer than the fitted key.
///
/// # Examples
///
/// ```
/// use translucent_pde::symmetric;
///
/// let sealed = symmetric::encrypt(b"HELLO", b"WORLD", b"XO").unwrap();
/// assert_eq!(sealed.open(sealed.real_key()).unwrap(), b"HELLO");
/// assert_eq!(sealed.open(sealed.decoy_key()).unwrap(), b"XO   ");
/// ```
pub fn encrypt(plaintext: &[u8], key: &[u8], decoy_plaintext: &[u8]) -> PdeResult<DeniableXor> {
    if key.is_empty() {
        return Err(PdeError::EmptyKey);
    }
    let real_key = fit_key(key, plaintext.len())?;
    if decoy_plaintext.len() > real_key.len() {
        return Err(PdeError::DecoyTooLong {
            decoy_len: decoy_plaintext.len(),
            key_len: real_key.len(),
        });
    }
    let ciphertext = xor_bytes(plaintext, &real_key)?;

    let mut decoy = decoy_plaintext.to_vec();
    decoy.resize(real_key.len(), DECOY_PADDING);
    let decoy_key = xor_bytes(&decoy, &ciphertext)?;

    Ok(DeniableXor {
        ciphertext,
        real_key,
        decoy_key,
    })
}
