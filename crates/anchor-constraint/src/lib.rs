//! Constraint normalization for Anchor stack layouts.
//!
//! This crate implements:
//! - Detection of over-determined or unsupported attribute combinations
//! - A fixed, deterministic repair order
//! - One diagnostic per dropped attribute

mod normalize;

pub use normalize::{Diagnostic, Normalized, Normalizer, Rule};
