//! The rendering host's side of a flush.

use anchor_constraint::Diagnostic;
use anchor_core::{NodeId, ResolvedConstraints};
use tracing::warn;

use crate::tree::LayoutTree;

/// Receives resolved constraints and normalization warnings during a flush.
///
/// `apply` is handed the tree so a host can react to a resolution by
/// mutating it; containers invalidated that way are resolved on the next
/// flush, not the current one.
pub trait LayoutHost {
    /// Apply the final constraints of one child.
    fn apply(&mut self, tree: &mut LayoutTree, child: NodeId, constraints: &ResolvedConstraints);

    /// Report a repaired record. Logs at warn level by default.
    fn warn(&mut self, diagnostic: &Diagnostic) {
        warn!(
            node = %diagnostic.node,
            attribute = %diagnostic.attribute,
            "{}",
            diagnostic
        );
    }
}

/// A host that records everything it is given.
#[derive(Debug, Clone, Default)]
pub struct CollectingHost {
    /// Applied constraints, in call order
    pub applied: Vec<(NodeId, ResolvedConstraints)>,
    /// Diagnostics, in report order
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent constraints applied to a child.
    pub fn latest(&self, child: NodeId) -> Option<&ResolvedConstraints> {
        self.applied
            .iter()
            .rev()
            .find(|(id, _)| *id == child)
            .map(|(_, constraints)| constraints)
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.applied.clear();
        self.diagnostics.clear();
    }
}

impl LayoutHost for CollectingHost {
    fn apply(&mut self, _tree: &mut LayoutTree, child: NodeId, constraints: &ResolvedConstraints) {
        self.applied.push((child, *constraints));
    }

    fn warn(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(*diagnostic);
    }
}
