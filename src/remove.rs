use crate::node::{Collapse, Node};
use crate::tracing_helpers::trace_log;
use crate::traverse::{step, Step};
use crate::RadixTree;

impl<V> RadixTree<V> {
    /// Removes `key`, returning its value if it was present.
    ///
    /// Nodes left without a value are pruned or merged with their only child
    /// on the way back up, so the tree never keeps a value-less node with
    /// fewer than two children.
    pub fn remove(&mut self, key: &[u8]) -> Option<V> {
        let mut path = Vec::new();
        let removed = take_value(self.root.as_deref_mut()?, key, &mut path)?;
        self.len -= 1;
        self.collapse_path(&path);
        Some(removed)
    }

    /// Repairs the nodes along `path` bottom-up after a value was taken from
    /// the node it leads to. Each level fixes the child it descended into;
    /// the root is fixed last.
    fn collapse_path(&mut self, path: &[usize]) {
        let Some(root) = self.root.as_deref_mut() else {
            return;
        };

        for depth in (0..path.len()).rev() {
            let parent = descend(&mut *root, &path[..depth]);
            let idx = path[depth];
            match parent.children.at(idx).collapse() {
                Collapse::Keep => return,
                Collapse::Prune => {
                    parent.children.remove_at(idx);
                    self.alloc.release(1);
                    trace_log!(depth, "pruned empty node");
                }
                Collapse::Merge => {
                    parent.children.at_mut(idx).merge_only_child();
                    self.alloc.release(1);
                    trace_log!(depth, "merged node into its only child");
                    return;
                }
            }
        }

        match root.collapse() {
            Collapse::Keep => {}
            Collapse::Prune => {
                self.root = None;
                self.alloc.release(1);
                trace_log!("tree emptied");
            }
            Collapse::Merge => {
                root.merge_only_child();
                self.alloc.release(1);
                trace_log!("merged root into its only child");
            }
        }
    }
}

/// Takes the value `key` addresses below `node`, recording the child index
/// taken at every level.
fn take_value<V>(mut node: &mut Node<V>, mut key: &[u8], path: &mut Vec<usize>) -> Option<V> {
    loop {
        match step(&node.prefix, key) {
            Step::Exact => return node.value.take(),
            Step::Diverge { .. } => return None,
            Step::Dispatch { byte, rest } => {
                let idx = node.children.search(byte).ok()?;
                path.push(idx);
                node = &mut **node.children.at_mut(idx);
                key = rest;
            }
        }
    }
}

fn descend<'n, V>(mut node: &'n mut Node<V>, path: &[usize]) -> &'n mut Node<V> {
    for &idx in path {
        node = &mut **node.children.at_mut(idx);
    }
    node
}
