use crate::node::Node;
use crate::tracing_helpers::debug_log;
use crate::RadixTree;

/// Structural statistics, gathered by walking the whole tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Nodes reachable from the root.
    pub nodes: usize,
    /// Nodes holding a value; equals [`RadixTree::len`].
    pub values: usize,
    /// Nodes with two or more children.
    pub branches: usize,
    /// Prefix bytes stored across all nodes.
    pub prefix_bytes: usize,
    /// Longest root-to-node path, counting the root as depth 1.
    pub max_depth: usize,
    /// Heap bytes owned by the nodes (boxes, spilled prefixes and child maps).
    pub heap_bytes: usize,
}

impl<V> RadixTree<V> {
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        self.walk(|node, depth| {
            stats.nodes += 1;
            stats.values += usize::from(node.value.is_some());
            stats.branches += usize::from(node.children.len() >= 2);
            stats.prefix_bytes += node.prefix.len();
            stats.max_depth = stats.max_depth.max(depth);
            stats.heap_bytes += node.heap_bytes();
            true
        });
        stats
    }

    pub fn memory_usage(&self) -> usize {
        self.stats().heap_bytes
    }

    /// Checks the structural invariants:
    ///
    /// - a value-less node has at least two children (the absent root stands
    ///   in for an empty tree);
    /// - child maps are strictly sorted by dispatch byte;
    /// - the number of reachable nodes matches the allocator's live count and
    ///   the number of values matches [`len`](Self::len).
    pub fn is_well_formed(&self) -> bool {
        let mut nodes = 0usize;
        let mut values = 0usize;
        let shape_ok = self.walk(|node, _| {
            nodes += 1;
            values += usize::from(node.value.is_some());
            if node.value.is_none() && node.children.len() < 2 {
                debug_log!(
                    children = node.children.len(),
                    "value-less node with fewer than two children"
                );
                return false;
            }
            if !node.children.is_strictly_sorted() {
                debug_log!("child map out of order");
                return false;
            }
            true
        });
        if !shape_ok {
            return false;
        }
        if nodes != self.alloc.live() || values != self.len {
            debug_log!(
                nodes,
                live = self.alloc.live(),
                values,
                len = self.len,
                "node or value count mismatch"
            );
            return false;
        }
        true
    }

    /// Visits every node with its depth until `visit` returns false.
    /// Returns whether the walk completed.
    fn walk<'a, F>(&'a self, mut visit: F) -> bool
    where
        F: FnMut(&'a Node<V>, usize) -> bool,
    {
        let mut stack: Vec<(&Node<V>, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 1));
        }
        while let Some((node, depth)) = stack.pop() {
            if !visit(node, depth) {
                return false;
            }
            stack.extend(node.children.iter().map(|(_, child)| (child, depth + 1)));
        }
        true
    }
}
