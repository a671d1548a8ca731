//! Core types, constraint records, and error types for the Anchor layout resolver.
//!
//! This crate provides the foundational types used across the other anchor crates:
//! - Node handles and edge/dimension values
//! - The per-child constraint record and its resolved counterpart
//! - Error types

pub mod errors;
pub mod record;
pub mod resolved;
pub mod types;

pub use errors::*;
pub use record::*;
pub use resolved::*;
pub use types::*;
