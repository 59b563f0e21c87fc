//! Error types for the translucent-set PDE library.

use thiserror::Error;

/// Errors produced by the translucent-set PDE library.
///
/// A codeword that fails predicate verification is not an error: the
/// decoder reports it as [`Membership::Rejected`](crate::translucent::Membership)
/// and it decodes to a `0` bit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PdeError {
    /// Trapdoor primes failed the residuosity/safety screen.
    #[error("trapdoor rejected (p = {p}, q = {q}): {reason}")]
    TrapdoorRejected { p: u32, q: u32, reason: String },

    /// CPRNG state repeated before the requested iteration count.
    #[error("CPRNG cycle detected after {produced} of {requested} values")]
    CycleDetected { produced: usize, requested: usize },

    /// No square root candidate validated, or the value lies outside the permutation domain.
    #[error("trapdoor inversion failed for value {value}")]
    InversionFailed { value: u32 },

    /// The entropy source kept producing seeds outside `Z_n*`.
    #[error("no usable seed after {attempts} draws from the entropy source")]
    EntropyExhausted { attempts: usize },

    /// The seed diversifier needs at least one CPRNG step.
    #[error("CPRNG iteration count must be at least 1, got {iterations}")]
    InvalidIterations { iterations: usize },

    /// Public exponent is not invertible modulo phi(n).
    #[error("public exponent {e} is not invertible modulo phi(n)")]
    InvalidExponent { e: u32 },

    /// Ciphertext byte length is not a multiple of the 8-byte codeword size.
    #[error("ciphertext length {len} is not a multiple of 8 bytes")]
    InvalidBlockLength { len: usize },

    /// Bit count is not a multiple of 8 (or of 64 for codeword bit strings).
    #[error("bit count {bits} does not align to the required width")]
    InvalidBitCount { bits: usize },

    /// Bit string contains a character other than `0` or `1`.
    #[error("invalid bit character {found:?} at position {position}")]
    InvalidBitString { position: usize, found: char },

    /// Key is already longer than the requested stretch target.
    #[error("key length {key_len} exceeds stretch target {target_len}")]
    KeyLongerThanTarget { key_len: usize, target_len: usize },

    /// Symmetric mode requires a non-empty key.
    #[error("key must not be empty")]
    EmptyKey,

    /// Decoy plaintext does not fit inside the key.
    #[error("decoy plaintext length {decoy_len} exceeds key length {key_len}")]
    DecoyTooLong { decoy_len: usize, key_len: usize },

    /// Two buffers that must be combined have different lengths.
    #[error("length mismatch: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },
}

/// Convenience alias used across the crate.
pub type PdeResult<T> = Result<T, PdeError>;
