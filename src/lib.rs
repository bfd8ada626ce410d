//! Kepler - two-body orbit integration and Kepler-law verification
//!
//! A library crate that integrates the restricted two-body problem with a
//! fixed-step symplectic scheme and checks the resulting trajectory against
//! Kepler's first and second laws and against long-run conservation.

pub mod analysis;
pub mod diagnostics;
pub mod elements;
pub mod error;
pub mod geometry;
pub mod physics;
pub mod scenarios;
pub mod trajectory;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use error::{KeplerError, Result};
