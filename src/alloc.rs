//! Node allocation for a single tree.
//!
//! Nodes are built in two phases. Construction (`leaf`, `branch`, `prefix`)
//! performs every fallible reservation but links nothing; once the caller has
//! everything it needs it splices the nodes in and calls [`commit`]. A failed
//! insert therefore never leaves a partial split behind.
//!
//! Fallible here means the node budget and the `SmallVec` buffers. The node
//! boxes themselves come from `Box::new` and abort on exhaustion.
//!
//! [`commit`]: NodeAllocator::commit

use crate::error::{Error, Result};
use crate::node::{Node, Prefix};
use crate::tracing_helpers::{trace_log, warn_log};

#[derive(Debug, Clone)]
pub(crate) struct NodeAllocator {
    max_nodes: Option<usize>,
    live: usize,
}

impl NodeAllocator {
    pub(crate) fn new(max_nodes: Option<usize>) -> Self {
        Self { max_nodes, live: 0 }
    }

    /// Number of nodes currently linked into the tree.
    #[inline]
    pub(crate) fn live(&self) -> usize {
        self.live
    }

    /// Checks that `count` more nodes fit in the budget.
    pub(crate) fn reserve(&self, count: usize) -> Result<()> {
        if let Some(limit) = self.max_nodes {
            if self.live.saturating_add(count) > limit {
                warn_log!(live = self.live, count, limit, "node budget exhausted");
                return Err(Error::NodeLimit { limit });
            }
        }
        Ok(())
    }

    pub(crate) fn prefix(&self, bytes: &[u8]) -> Result<Prefix> {
        let mut prefix = Prefix::new();
        prefix.try_reserve_exact(bytes.len()).map_err(|err| {
            warn_log!(len = bytes.len(), "prefix allocation failed");
            Error::from(err)
        })?;
        prefix.extend_from_slice(bytes);
        Ok(prefix)
    }

    /// A childless node holding `value` under `suffix`.
    pub(crate) fn leaf<V>(&self, suffix: &[u8], value: V) -> Result<Box<Node<V>>> {
        Ok(Box::new(Node::new(self.prefix(suffix)?, Some(value))))
    }

    /// A value-less node with room for `fanout` children.
    pub(crate) fn branch<V>(&self, prefix: &[u8], fanout: usize) -> Result<Box<Node<V>>> {
        let mut node = Box::new(Node::new(self.prefix(prefix)?, None));
        node.children.try_reserve(fanout)?;
        Ok(node)
    }

    /// Records `count` freshly built nodes as linked.
    pub(crate) fn commit(&mut self, count: usize) {
        self.live += count;
        trace_log!(live = self.live, count, "nodes linked");
    }

    /// Records `count` nodes as unlinked.
    pub(crate) fn release(&mut self, count: usize) {
        debug_assert!(count <= self.live, "releasing more nodes than are live");
        self.live -= count;
    }
}
