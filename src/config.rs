//! Scheme configuration.
//!
//! The trapdoor primes are explicit values rather than compiled-in
//! literals, so a caller (or a test) can run the codec over any screened
//! pair. The struct deserializes from any serde format; missing fields fall
//! back to the demonstration defaults.

use serde::{Deserialize, Serialize};

use crate::codec::{AsymmetricCodec, DEFAULT_CPRNG_ITERATIONS};
use crate::error::PdeResult;
use crate::trapdoor::exponent::DEFAULT_EXPONENT;
use crate::trapdoor::{ExponentPermutation, QuadraticPermutation, Trapdoor, TrapdoorPermutation};

/// Runtime-selected permutation.
pub type DynPermutation = Box<dyn TrapdoorPermutation + Send + Sync>;

/// Which trapdoor permutation the codec runs on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PermutationKind {
    /// `x -> x^2 mod n`
    #[default]
    QuadraticResidue,
    /// `x -> x^e mod n`
    Exponent {
        #[serde(default = "default_exponent")]
        e: u32,
    },
}

fn default_exponent() -> u32 {
    DEFAULT_EXPONENT
}

/// Everything needed to build an [`AsymmetricCodec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeConfig {
    pub trapdoor: Trapdoor,
    pub decoy_trapdoor: Trapdoor,
    pub permutation: PermutationKind,
    /// Squarings per seed diversification. Must be at least 1.
    pub cprng_iterations: usize,
}

impl Default for SchemeConfig {
    fn default() -> Self {
        SchemeConfig {
            trapdoor: Trapdoor::DEMO,
            decoy_trapdoor: Trapdoor::DECOY,
            permutation: PermutationKind::default(),
            cprng_iterations: DEFAULT_CPRNG_ITERATIONS,
        }
    }
}

impl SchemeConfig {
    /// Instantiates the configured permutation.
    pub fn permutation(&self) -> PdeResult<DynPermutation> {
        let permutation: DynPermutation = match self.permutation {
            PermutationKind::QuadraticResidue => {
                Box::new(QuadraticPermutation::new(self.trapdoor)?)
            }
            PermutationKind::Exponent { e } => Box::new(ExponentPermutation::new(self.trapdoor, e)?),
        };
        Ok(permutation)
    }

    /// Validates the configuration and builds the codec.
    pub fn build(&self) -> PdeResult<AsymmetricCodec<DynPermutation>> {
        AsymmetricCodec::with_options(
            self.permutation()?,
            self.decoy_trapdoor,
            self.cprng_iterations,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdeError;
    use crate::random::mersenne_twister::MersenneTwister;

    #[test]
    fn test_default_builds() {
        let codec = SchemeConfig::default().build().unwrap();
        assert_eq!(codec.permutation().modulus(), Trapdoor::DEMO.modulus());
        assert_eq!(codec.cprng_iterations(), DEFAULT_CPRNG_ITERATIONS);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: SchemeConfig =
            serde_json::from_str(r#"{"permutation":{"kind":"exponent"}}"#).unwrap();
        assert_eq!(cfg.permutation, PermutationKind::Exponent { e: 17 });
        assert_eq!(cfg.trapdoor, Trapdoor::DEMO);
        assert_eq!(cfg.cprng_iterations, DEFAULT_CPRNG_ITERATIONS);
    }

    #[test]
    fn test_json_roundtrip() {
        let cfg = SchemeConfig {
            trapdoor: Trapdoor::new(64763, 65063),
            permutation: PermutationKind::Exponent { e: 65537 },
            cprng_iterations: 4,
            ..SchemeConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SchemeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_bad_trapdoor_rejected_at_build() {
        let cfg = SchemeConfig {
            trapdoor: Trapdoor::new(13, 47),
            ..SchemeConfig::default()
        };
        assert!(matches!(
            cfg.build(),
            Err(PdeError::TrapdoorRejected { p: 13, .. })
        ));
    }

    #[test]
    fn test_zero_iterations_rejected_at_build() {
        let cfg: SchemeConfig = serde_json::from_str(r#"{"cprng_iterations":0}"#).unwrap();
        assert_eq!(
            cfg.build().err(),
            Some(PdeError::InvalidIterations { iterations: 0 })
        );
    }

    #[test]
    fn test_dyn_codec_roundtrip_both_variants() {
        for permutation in [
            PermutationKind::QuadraticResidue,
            PermutationKind::Exponent { e: 17 },
        ] {
            let cfg = SchemeConfig {
                permutation,
                ..SchemeConfig::default()
            };
            let codec = cfg.build().unwrap();
            let mut rng = MersenneTwister::with_seed(77);
            let ct = codec.encrypt_to_bytes(b"cfg", &mut rng).unwrap();
            assert_eq!(codec.decrypt_bytes(&ct).unwrap().plaintext, b"cfg");
        }
    }
}
