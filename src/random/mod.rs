//! Random number generation subsystem.
//!
//! Seed mixing, the seeded generator behind key stretching and the default
//! entropy source, and the quadratic-residue CPRNG that diversifies seeds.

pub mod avalanche;
pub mod bbs;
pub mod mersenne_twister;
pub mod stretch;

pub use bbs::{blum_blum_shub, BbsSequence, BlumBlumShub};
pub use mersenne_twister::MersenneTwister;
