//! Stack layout resolution for Anchor containers.
//!
//! This crate turns the partially specified constraint records of a
//! container's children into fully resolved, sibling-chained constraints.
//!
//! # Architecture
//!
//! 1. **Invalidation**: record and child-set changes register the container
//!    on the tree's [`LayoutQueue`]
//! 2. **Normalization**: each child's record is repaired by
//!    `anchor-constraint`, with one diagnostic per dropped attribute
//! 3. **Resolution**: [`StackResolver`] walks the children once and chains
//!    them vertically
//! 4. **Application**: results are handed to a [`LayoutHost`]
//!
//! # Example
//!
//! ```
//! use anchor_layout::{Alignment, CollectingHost, LayoutTree, StackOptions};
//!
//! let mut tree = LayoutTree::new();
//! let stack = tree
//!     .create_stack(StackOptions::new().with_spacing(16.0).with_alignment(Alignment::StretchX))
//!     .unwrap();
//! let first = tree.create_node();
//! let second = tree.create_node();
//! tree.append_all(stack, [first, second]).unwrap();
//!
//! let mut host = CollectingHost::new();
//! tree.flush(&mut host);
//! assert_eq!(host.latest(second).unwrap().to_string(), "{top: [#1, 16], left: 0, right: 0}");
//! ```

mod config;
mod host;
mod queue;
mod resolver;
mod tree;

pub use config::{Alignment, Layout, StackLayoutConfig, StackOptions};
pub use host::{CollectingHost, LayoutHost};
pub use queue::LayoutQueue;
pub use resolver::{Chain, StackChild, StackResolver};
pub use tree::{FlushReport, LayoutNode, LayoutTree, Resolution};

pub use anchor_constraint::{Diagnostic, Rule};
pub use anchor_core::{
    Attribute, ConfigError, ConstraintRecord, Dimension, Edge, EdgeAnchor, LayoutError, NodeId,
    ResolvedConstraints,
};
