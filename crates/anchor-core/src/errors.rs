//! Error types for the Anchor layout resolver.
//!
//! Malformed constraint records are never errors; they are repaired by the
//! normalizer and reported as diagnostics. The enums here cover misuse that
//! must be surfaced to the caller immediately.

use crate::types::NodeId;
use thiserror::Error;

/// Errors while constructing or binding a stack layout configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid spacing {spacing}: spacing must not be negative")]
    NegativeSpacing { spacing: f64 },

    #[error("Invalid spacing: {spacing} is not a finite number")]
    NonFiniteSpacing { spacing: f64 },

    #[error("Unknown alignment '{value}': expected one of left, right, centerX, stretchX")]
    UnknownAlignment { value: String },

    #[error("Incompatible layout: a stack container only accepts a stack layout, got {layout}")]
    IncompatibleLayout { layout: &'static str },
}

/// Errors while manipulating a layout tree.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Unknown node {node}")]
    UnknownNode { node: NodeId },

    #[error("Node {node} is not a container")]
    NotAContainer { node: NodeId },

    #[error("Appending {child} to {parent} would create a cycle")]
    CycleDetected { parent: NodeId, child: NodeId },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
