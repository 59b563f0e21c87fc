//! Bit and byte conversion helpers.

pub(crate) mod bits;
pub mod converter;
