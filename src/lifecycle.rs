use crate::node::Node;
use crate::tracing_helpers::debug_log;
use crate::RadixTree;

impl<V> RadixTree<V> {
    /// Tears the tree down, handing every stored value to `on_value` first.
    ///
    /// Use this when values refer to resources the tree does not own, e.g.
    /// handles to objects that must be freed explicitly. Whatever state the
    /// callback needs is captured by the closure.
    pub fn destroy<F>(mut self, on_value: F)
    where
        F: FnMut(V),
    {
        self.teardown(on_value);
    }

    /// Removes every entry, dropping the values. The tree stays usable.
    pub fn clear(&mut self) {
        self.teardown(drop);
    }

    /// Releases all nodes without recursing, so arbitrarily deep trees are
    /// safe to drop.
    fn teardown<F>(&mut self, mut on_value: F)
    where
        F: FnMut(V),
    {
        let Some(root) = self.root.take() else {
            return;
        };

        let mut released = 0usize;
        let mut stack = vec![root];
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.drain());
            if let Some(value) = node.value.take() {
                on_value(value);
            }
            released += 1;
        }

        debug_assert_eq!(released, self.alloc.live());
        self.alloc.release(released);
        debug_log!(released, values = self.len, "tree torn down");
        self.len = 0;
    }
}

impl<V> Drop for RadixTree<V> {
    fn drop(&mut self) {
        self.teardown(drop);
    }
}

/// Deep-copies the subtree under `root` without recursing.
///
/// Each frame owns the copy of one source node; a finished frame is linked
/// into its parent's copy under the dispatch byte it was reached by.
pub(crate) fn clone_root<V: Clone>(root: Option<&Node<V>>) -> Option<Box<Node<V>>> {
    struct Frame<'a, V> {
        src: &'a Node<V>,
        byte: u8,
        next_child: usize,
        out: Box<Node<V>>,
    }

    fn load_frame<V: Clone>(src: &Node<V>, byte: u8) -> Frame<'_, V> {
        Frame {
            src,
            byte,
            next_child: 0,
            out: Box::new(Node::new(src.prefix.clone(), src.value.clone())),
        }
    }

    let mut stack: Vec<Frame<'_, V>> = root.map(|node| load_frame(node, 0)).into_iter().collect();
    let mut cloned = None;
    while let Some(frame) = stack.last_mut() {
        let src = frame.src;
        if let Some((byte, child)) = src.children.entry(frame.next_child) {
            frame.next_child += 1;
            stack.push(load_frame(child, byte));
            continue;
        }

        let Some(done) = stack.pop() else {
            break;
        };
        match stack.last_mut() {
            Some(parent) => parent.out.children.insert(done.byte, done.out),
            None => cloned = Some(done.out),
        }
    }
    cloned
}
