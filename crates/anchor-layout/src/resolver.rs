//! Stack resolution.
//!
//! Turns the normalized records of a container's children into
//! sibling-chained constraints. Children are chained top-down by default.
//! When the last child asks for a bottom offset the chain has to end at the
//! container's bottom edge, so the resolver either chains everything
//! bottom-up or, if the first child is also pinned to the top, picks one
//! stretch anchor whose height is implied by both chains.
//!
//! A baseline child is placed against its target instead of a neighbour, so
//! the target must already be placed in the chain direction.

use anchor_constraint::{Diagnostic, Rule};
use anchor_core::{Attribute, ConstraintRecord, Edge, NodeId, ResolvedConstraints};

use crate::config::{Alignment, StackLayoutConfig};

/// A normalized child, as seen by the resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackChild {
    pub id: NodeId,
    pub record: ConstraintRecord,
}

impl StackChild {
    pub fn new(id: NodeId, record: ConstraintRecord) -> Self {
        Self { id, record }
    }

    fn is_stretch_candidate(&self) -> bool {
        self.record.baseline.is_none() && self.record.height.is_none()
    }
}

/// Direction in which the vertical anchors of a stack reference each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chain {
    /// Every child hangs off its predecessor's bottom edge
    Forward,
    /// Every child sits on its successor's top edge
    Backward,
    /// Forward up to the anchor, backward after it; the anchor gets both
    Stretch(usize),
}

impl Chain {
    /// Pick the chain direction for a list of normalized children.
    ///
    /// Returns `None` for an empty list.
    pub fn detect(children: &[StackChild]) -> Option<Chain> {
        let first = children.first()?;
        let last = children.last()?;

        if last.record.bottom.is_none() {
            return Some(Chain::Forward);
        }
        if first.record.top.is_none() {
            return Some(Chain::Backward);
        }

        let anchor = children
            .iter()
            .position(|c| {
                c.is_stretch_candidate() && c.record.top.is_some() && c.record.bottom.is_some()
            })
            .or_else(|| children.iter().rposition(StackChild::is_stretch_candidate))
            .unwrap_or(children.len() - 1);
        Some(Chain::Stretch(anchor))
    }

    fn directions(&self, index: usize) -> (bool, bool) {
        match *self {
            Chain::Forward => (true, false),
            Chain::Backward => (false, true),
            Chain::Stretch(anchor) => (index <= anchor, index >= anchor),
        }
    }

    /// Whether the child at `target` is placed before the child at `index`.
    fn places_before(&self, target: usize, index: usize) -> bool {
        match self.directions(index) {
            (true, false) => target < index,
            (false, true) => target > index,
            _ => false,
        }
    }
}

/// Resolves the children of one stack container.
#[derive(Debug, Clone, Copy)]
pub struct StackResolver<'a> {
    config: &'a StackLayoutConfig,
}

impl<'a> StackResolver<'a> {
    pub fn new(config: &'a StackLayoutConfig) -> Self {
        Self { config }
    }

    /// Resolve every child, in order.
    ///
    /// The input must already be normalized.
    pub fn resolve(&self, children: &[StackChild]) -> Vec<ResolvedConstraints> {
        self.resolve_reporting(children, &mut Vec::new())
    }

    /// Resolve every child, pushing a diagnostic for each baseline whose
    /// target is not placed ahead of it in the chain.
    pub fn resolve_reporting(
        &self,
        children: &[StackChild],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<ResolvedConstraints> {
        let Some(chain) = Chain::detect(children) else {
            return Vec::new();
        };

        children
            .iter()
            .enumerate()
            .map(|(index, child)| {
                let baseline = child.record.baseline.filter(|target| {
                    children
                        .iter()
                        .position(|c| c.id == *target)
                        .is_some_and(|position| chain.places_before(position, index))
                });
                if child.record.baseline.is_some() && baseline.is_none() {
                    diagnostics.push(Diagnostic {
                        node: child.id,
                        attribute: Attribute::Baseline,
                        rule: Rule::BaselineTarget,
                    });
                }

                let mut out = ResolvedConstraints::new();
                self.resolve_horizontal(&child.record, &mut out);
                self.resolve_vertical(children, index, chain, baseline, &mut out);
                out
            })
            .collect()
    }

    fn resolve_horizontal(&self, record: &ConstraintRecord, out: &mut ResolvedConstraints) {
        out.width = record.width;

        // Alternate alignment: the child positions itself.
        if record.has_horizontal_position() {
            out.left = record.left;
            out.right = record.right;
            out.center_x = record.center_x;
            return;
        }

        let zero = Edge::offset(0.0);
        match self.config.alignment() {
            Alignment::Left => out.left = Some(zero),
            Alignment::Right => out.right = Some(zero),
            Alignment::CenterX => out.center_x = Some(0.0),
            Alignment::StretchX => {
                out.left = Some(zero);
                if record.width.is_none() {
                    out.right = Some(zero);
                }
            }
        }
    }

    fn resolve_vertical(
        &self,
        children: &[StackChild],
        index: usize,
        chain: Chain,
        baseline: Option<NodeId>,
        out: &mut ResolvedConstraints,
    ) {
        let record = &children[index].record;

        if let Some(target) = baseline {
            out.baseline = Some(target);
            out.height = record.height;
            return;
        }

        let (forward, backward) = chain.directions(index);
        if forward {
            out.top = Some(self.forward_top(children, index));
        }
        if backward {
            out.bottom = Some(self.backward_bottom(children, index));
        }
        // A stretch anchor's height comes from its two anchors.
        if !(forward && backward) {
            out.height = record.height;
        }
    }

    fn forward_top(&self, children: &[StackChild], index: usize) -> Edge {
        let current = &children[index].record;
        match index.checked_sub(1).map(|i| &children[i]) {
            None => Edge::offset(current.top_offset()),
            Some(prev) => Edge::sibling(
                prev.id,
                self.config.spacing() + prev.record.bottom_offset() + current.top_offset(),
            ),
        }
    }

    fn backward_bottom(&self, children: &[StackChild], index: usize) -> Edge {
        let current = &children[index].record;
        match children.get(index + 1) {
            None => Edge::offset(current.bottom_offset()),
            Some(next) => Edge::sibling(
                next.id,
                self.config.spacing() + next.record.top_offset() + current.bottom_offset(),
            ),
        }
    }
}
