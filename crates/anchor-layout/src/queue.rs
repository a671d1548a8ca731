//! Deferred layout queue.
//!
//! Containers are registered when their children or their children's records
//! change. The scheduling host drains the queue once per tick through
//! [`LayoutTree::flush`](crate::LayoutTree::flush); any number of
//! invalidations between two flushes collapse into one resolution pass.

use indexmap::IndexSet;

use anchor_core::NodeId;

/// Registry of dirty containers, kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct LayoutQueue {
    dirty: IndexSet<NodeId>,
}

impl LayoutQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            dirty: IndexSet::new(),
        }
    }

    /// Mark a container dirty. Returns false if it was already pending.
    pub fn invalidate(&mut self, container: NodeId) -> bool {
        self.dirty.insert(container)
    }

    /// Check whether a container is pending.
    pub fn contains(&self, container: NodeId) -> bool {
        self.dirty.contains(&container)
    }

    /// Number of pending containers.
    pub fn len(&self) -> usize {
        self.dirty.len()
    }

    /// Check if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.dirty.is_empty()
    }

    /// Pending containers in registration order.
    pub fn pending(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.dirty.iter().copied()
    }

    /// Remove and return everything pending.
    ///
    /// Invalidations made after this call belong to the next batch.
    pub fn take_batch(&mut self) -> IndexSet<NodeId> {
        std::mem::take(&mut self.dirty)
    }
}
