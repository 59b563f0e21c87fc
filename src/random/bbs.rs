//! Blum-Blum-Shub style quadratic-residue CPRNG over `Z_n*`.
//!
//! Repeatedly squares the running state modulo `n = p·q`. Used both as a
//! seed diversifier for the encoder and decoy generator and, because each
//! output is the square of the previous one, as a walk along the orbit of
//! the quadratic trapdoor permutation.

use std::collections::HashSet;

use crate::error::{PdeError, PdeResult};
use crate::trapdoor::Trapdoor;

/// Output of one CPRNG run.
///
/// A cycle is not fatal: the values produced before the repeat are kept and
/// the caller decides whether a short sequence is acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BbsSequence {
    values: Vec<u32>,
    requested: usize,
    cycle_detected: bool,
}

impl BbsSequence {
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Last value produced, if any.
    pub fn last(&self) -> Option<u32> {
        self.values.last().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn cycle_detected(&self) -> bool {
        self.cycle_detected
    }

    /// Returns the values only if the run reached the requested length.
    ///
    /// # Errors
    /// Returns [`PdeError::CycleDetected`] if the state repeated early.
    pub fn into_complete(self) -> PdeResult<Vec<u32>> {
        if self.cycle_detected {
            return Err(PdeError::CycleDetected {
                produced: self.values.len(),
                requested: self.requested,
            });
        }
        Ok(self.values)
    }
}

/// Quadratic-residue generator bound to a screened trapdoor.
#[derive(Debug, Clone)]
pub struct BlumBlumShub {
    n: u64,
}

impl BlumBlumShub {
    /// Screens `trapdoor` and builds the generator.
    ///
    /// # Errors
    /// Returns [`PdeError::TrapdoorRejected`] if the primes fail the Blum screen.
    pub fn new(trapdoor: Trapdoor) -> PdeResult<Self> {
        trapdoor.screen()?;
        Ok(BlumBlumShub {
            n: trapdoor.modulus(),
        })
    }

    pub fn modulus(&self) -> u64 {
        self.n
    }

    /// Squares the state `iterations` times starting from `seed mod n`.
    ///
    /// Stops early, flagging the result, as soon as a state repeats (the
    /// seed itself counts as seen).
    pub fn sequence(&self, seed: u32, iterations: usize) -> BbsSequence {
        let mut state = seed as u64 % self.n;
        let mut seen = HashSet::with_capacity(iterations + 1);
        seen.insert(state);
        let mut values = Vec::with_capacity(iterations);
        let mut cycle_detected = false;

        for _ in 0..iterations {
            state = ((state as u128 * state as u128) % self.n as u128) as u64;
            if !seen.insert(state) {
                cycle_detected = true;
                tracing::debug!(
                    produced = values.len(),
                    requested = iterations,
                    "CPRNG state repeated"
                );
                break;
            }
            values.push(state as u32);
        }

        BbsSequence {
            values,
            requested: iterations,
            cycle_detected,
        }
    }
}

/// One-shot form: screen `(p, q)` and run `iterations` squarings from `seed`.
///
/// # Errors
/// Returns [`PdeError::TrapdoorRejected`] if the primes fail the screen; no
/// output is produced in that case.
pub fn blum_blum_shub(p: u32, q: u32, seed: u32, iterations: usize) -> PdeResult<BbsSequence> {
    Ok(BlumBlumShub::new(Trapdoor::new(p, q))?.sequence(seed, iterations))
}
