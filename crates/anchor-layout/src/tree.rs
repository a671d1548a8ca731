//! Layout tree data structures.
//!
//! The tree is an arena of nodes addressed by [`NodeId`]. Containers own an
//! ordered list of child handles; children keep a non-owning handle to their
//! parent. Every structural change or record change invalidates the affected
//! container on the tree's [`LayoutQueue`].

use std::collections::HashMap;

use anchor_constraint::{Diagnostic, Normalizer};
use anchor_core::{ConfigError, ConstraintRecord, LayoutError, NodeId, ResolvedConstraints};
use tracing::debug;

use crate::config::{Alignment, Layout, StackLayoutConfig, StackOptions};
use crate::host::LayoutHost;
use crate::queue::LayoutQueue;
use crate::resolver::{StackChild, StackResolver};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Container {
    layout: Layout,
    /// Stack containers refuse any other layout variant
    stack_only: bool,
}

/// A node in the layout tree.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    id: NodeId,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    record: ConstraintRecord,
    container: Option<Container>,
}

impl LayoutNode {
    fn new(id: NodeId, record: ConstraintRecord) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            record,
            container: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The node's own constraint record, as last written.
    pub fn record(&self) -> &ConstraintRecord {
        &self.record
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.container.as_ref().map(|c| &c.layout)
    }

    pub fn is_container(&self) -> bool {
        self.container.is_some()
    }
}

/// Resolved constraints of one container, computed before anything is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub container: NodeId,
    /// One entry per child, in chain order
    pub constraints: Vec<(NodeId, ResolvedConstraints)>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Summary of one flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlushReport {
    /// Containers resolved
    pub containers: usize,
    /// Apply calls made
    pub applied: usize,
    /// Diagnostics reported
    pub diagnostics: usize,
    /// Containers removed before the flush reached them
    pub skipped: usize,
}

/// Arena of layout nodes plus the queue of dirty containers.
#[derive(Debug, Clone)]
pub struct LayoutTree {
    nodes: HashMap<NodeId, LayoutNode>,
    next_id: u64,
    queue: LayoutQueue,
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutTree {
    /// Create an empty tree with its own queue.
    pub fn new() -> Self {
        Self::with_queue(LayoutQueue::new())
    }

    /// Create an empty tree that schedules on the given queue.
    pub fn with_queue(queue: LayoutQueue) -> Self {
        Self {
            nodes: HashMap::new(),
            next_id: 0,
            queue,
        }
    }

    fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, record: ConstraintRecord, container: Option<Container>) -> NodeId {
        let id = self.next_id();
        let mut node = LayoutNode::new(id, record);
        node.container = container;
        self.nodes.insert(id, node);
        id
    }

    /// Create a detached leaf node with an empty record.
    pub fn create_node(&mut self) -> NodeId {
        self.create_node_with(ConstraintRecord::new())
    }

    /// Create a detached leaf node with the given record.
    pub fn create_node_with(&mut self, record: ConstraintRecord) -> NodeId {
        self.insert(record, None)
    }

    /// Create a container that accepts any layout variant.
    pub fn create_composite(&mut self, layout: Layout) -> NodeId {
        self.insert(
            ConstraintRecord::new(),
            Some(Container {
                layout,
                stack_only: false,
            }),
        )
    }

    /// Create a stack container.
    ///
    /// Fails before creating anything if the options carry a non-stack
    /// layout or an out-of-range value.
    pub fn create_stack(&mut self, options: StackOptions) -> Result<NodeId, ConfigError> {
        let config = options.into_config()?;
        let id = self.insert(
            ConstraintRecord::new(),
            Some(Container {
                layout: Layout::Stack(config),
                stack_only: true,
            }),
        );
        debug!(node = %id, %config, "created stack container");
        Ok(id)
    }

    fn node(&self, id: NodeId) -> Result<&LayoutNode, LayoutError> {
        self.nodes.get(&id).ok_or(LayoutError::UnknownNode { node: id })
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut LayoutNode, LayoutError> {
        self.nodes
            .get_mut(&id)
            .ok_or(LayoutError::UnknownNode { node: id })
    }

    fn container(&self, id: NodeId) -> Result<Container, LayoutError> {
        self.node(id)?
            .container
            .ok_or(LayoutError::NotAContainer { node: id })
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&LayoutNode> {
        self.nodes.get(&id)
    }

    /// Check whether a node is still part of the tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of a container in chain order. Empty for unknown nodes.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map_or(&[], |n| n.children.as_slice())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn record(&self, id: NodeId) -> Option<&ConstraintRecord> {
        self.nodes.get(&id).map(|n| &n.record)
    }

    /// Replace a node's record and invalidate its container.
    pub fn set_record(&mut self, id: NodeId, record: ConstraintRecord) -> Result<(), LayoutError> {
        self.update_record(id, |r| *r = record)
    }

    /// Edit a node's record in place and invalidate its container.
    ///
    /// Nothing is validated here; conflicting attributes are repaired at
    /// flush time.
    pub fn update_record(
        &mut self,
        id: NodeId,
        edit: impl FnOnce(&mut ConstraintRecord),
    ) -> Result<(), LayoutError> {
        let node = self.node_mut(id)?;
        edit(&mut node.record);
        if let Some(parent) = node.parent {
            self.invalidate(parent);
        }
        Ok(())
    }

    pub fn layout(&self, id: NodeId) -> Option<&Layout> {
        self.nodes.get(&id).and_then(LayoutNode::layout)
    }

    /// The stack configuration of a stack container.
    pub fn stack_config(&self, id: NodeId) -> Option<&StackLayoutConfig> {
        self.layout(id).and_then(Layout::as_stack)
    }

    /// Try to replace a container's layout.
    ///
    /// Layouts are bound once at construction, so this never changes
    /// anything and returns `Ok(false)`. A non-stack layout on a stack
    /// container is a configuration error.
    pub fn set_layout(&mut self, id: NodeId, layout: Layout) -> Result<bool, LayoutError> {
        let container = self.container(id)?;
        if container.stack_only && layout.as_stack().is_none() {
            return Err(ConfigError::IncompatibleLayout {
                layout: layout.name(),
            }
            .into());
        }
        debug!(node = %id, layout = layout.name(), "layout already bound, ignoring replacement");
        Ok(false)
    }

    /// Spacing is frozen after construction; always returns `Ok(false)`.
    pub fn set_spacing(&mut self, id: NodeId, spacing: f64) -> Result<bool, LayoutError> {
        self.require_stack(id)?;
        debug!(node = %id, spacing, "spacing is frozen after construction");
        Ok(false)
    }

    /// Alignment is frozen after construction; always returns `Ok(false)`.
    pub fn set_alignment(&mut self, id: NodeId, alignment: Alignment) -> Result<bool, LayoutError> {
        self.require_stack(id)?;
        debug!(node = %id, %alignment, "alignment is frozen after construction");
        Ok(false)
    }

    fn require_stack(&self, id: NodeId) -> Result<&StackLayoutConfig, LayoutError> {
        self.container(id)?;
        self.stack_config(id)
            .ok_or(LayoutError::NotAContainer { node: id })
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Append a child to the end of a container, moving it out of its
    /// previous parent if needed. Both containers are invalidated.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<(), LayoutError> {
        self.container(parent)?;
        self.node(child)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(LayoutError::CycleDetected { parent, child });
        }

        self.unlink(child);
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        self.invalidate(parent);
        Ok(())
    }

    /// Append several children in order.
    pub fn append_all(
        &mut self,
        parent: NodeId,
        children: impl IntoIterator<Item = NodeId>,
    ) -> Result<(), LayoutError> {
        for child in children {
            self.append(parent, child)?;
        }
        Ok(())
    }

    /// Detach a node from its parent, keeping it (and its record) alive.
    pub fn detach(&mut self, child: NodeId) -> Result<(), LayoutError> {
        self.node(child)?;
        self.unlink(child);
        Ok(())
    }

    /// Remove a node and its whole subtree. Records are discarded.
    ///
    /// A removed container that is still queued is skipped by the next flush.
    pub fn remove(&mut self, id: NodeId) -> Result<(), LayoutError> {
        self.node(id)?;
        self.unlink(id);

        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                pending.extend(node.children);
            }
        }
        Ok(())
    }

    fn unlink(&mut self, child: NodeId) {
        let Some(parent) = self.nodes.get_mut(&child).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.retain(|c| *c != child);
        }
        self.invalidate(parent);
    }

    /// Mark a container dirty. Returns false for non-containers and for
    /// containers that are already pending.
    pub fn invalidate(&mut self, container: NodeId) -> bool {
        match self.nodes.get(&container) {
            Some(node) if node.is_container() => self.queue.invalidate(container),
            _ => false,
        }
    }

    pub fn queue(&self) -> &LayoutQueue {
        &self.queue
    }

    /// Compute the final constraints of a container's children without
    /// applying them.
    ///
    /// Returns `None` if the node is gone or is not a container.
    pub fn resolve(&self, container: NodeId) -> Option<Resolution> {
        let node = self.nodes.get(&container)?;
        let layout = node.container?.layout;
        let children = node
            .children
            .iter()
            .filter_map(|id| self.nodes.get(id).map(|child| (*id, &child.record)));

        let resolution = match layout {
            // The generic engine lives in the host; records pass through.
            Layout::Constraint => Resolution {
                container,
                constraints: children
                    .map(|(id, record)| (id, ResolvedConstraints::from_record(record)))
                    .collect(),
                diagnostics: Vec::new(),
            },
            Layout::Stack(config) => {
                let normalizer = Normalizer::with_siblings(&node.children);
                let mut diagnostics = Vec::new();
                let stack: Vec<StackChild> = children
                    .map(|(id, record)| {
                        let normalized = normalizer.normalize(id, record);
                        diagnostics.extend(normalized.diagnostics);
                        StackChild::new(id, normalized.record)
                    })
                    .collect();
                let resolved =
                    StackResolver::new(&config).resolve_reporting(&stack, &mut diagnostics);
                Resolution {
                    container,
                    constraints: stack.iter().map(|c| c.id).zip(resolved).collect(),
                    diagnostics,
                }
            }
        };
        Some(resolution)
    }

    /// Resolve every pending container once, in registration order, and hand
    /// the results to the host.
    ///
    /// Containers invalidated while this runs are resolved by the next flush.
    /// A container still waiting in the current batch is resolved from its
    /// records as they are when the flush reaches it, and again next time.
    pub fn flush<H: LayoutHost + ?Sized>(&mut self, host: &mut H) -> FlushReport {
        let batch = self.queue.take_batch();
        let mut report = FlushReport::default();
        if batch.is_empty() {
            return report;
        }
        debug!(containers = batch.len(), "flushing layout queue");

        for container in batch {
            let Some(resolution) = self.resolve(container) else {
                debug!(node = %container, "container removed before flush, skipping");
                report.skipped += 1;
                continue;
            };

            for diagnostic in &resolution.diagnostics {
                host.warn(diagnostic);
            }
            report.diagnostics += resolution.diagnostics.len();

            for (child, constraints) in &resolution.constraints {
                // An earlier apply in this pass may have removed the child.
                if !self.contains(*child) {
                    continue;
                }
                debug!(node = %child, %constraints, "applying resolved constraints");
                host.apply(self, *child, constraints);
                report.applied += 1;
            }
            report.containers += 1;
        }
        report
    }
}
