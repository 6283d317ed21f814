//! Trie node layout.
//!
//! Every node has the same shape: a prefix fragment, an optional value and a
//! child map keyed by the dispatch byte. A node that holds a value may also
//! have children, which is how a key can be a strict prefix of another key.

use smallvec::SmallVec;

use crate::error::Result;

/// Prefixes up to this many bytes live inside the node itself.
pub(crate) const INLINE_PREFIX_LEN: usize = 16;

/// Child slots kept inline before the map spills to the heap.
const INLINE_CHILDREN: usize = 4;

pub(crate) type Prefix = SmallVec<[u8; INLINE_PREFIX_LEN]>;

/// What a node needs after a value below (or in) it was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Collapse {
    /// Holds a value or still branches.
    Keep,
    /// No value and no children: unlink it.
    Prune,
    /// No value and a single child: the child moves up into this slot.
    Merge,
}

pub(crate) struct Node<V> {
    /// Key bytes this node contributes after its dispatch byte.
    pub(crate) prefix: Prefix,
    pub(crate) value: Option<V>,
    pub(crate) children: Children<V>,
}

impl<V> Node<V> {
    pub(crate) fn new(prefix: Prefix, value: Option<V>) -> Self {
        Self {
            prefix,
            value,
            children: Children::new(),
        }
    }

    pub(crate) fn collapse(&self) -> Collapse {
        if self.value.is_some() {
            return Collapse::Keep;
        }
        match self.children.len() {
            0 => Collapse::Prune,
            1 => Collapse::Merge,
            _ => Collapse::Keep,
        }
    }

    /// Replaces this node with its only child.
    ///
    /// The child's prefix becomes `self.prefix ++ [dispatch byte] ++
    /// child.prefix`, so every key below keeps its address.
    pub(crate) fn merge_only_child(&mut self) {
        debug_assert_eq!(self.collapse(), Collapse::Merge);
        let (byte, mut child) = self.children.remove_at(0);
        let mut prefix = std::mem::take(&mut self.prefix);
        prefix.reserve(1 + child.prefix.len());
        prefix.push(byte);
        prefix.extend_from_slice(&child.prefix);
        child.prefix = prefix;
        *self = *child;
    }

    /// Heap bytes owned directly by this node, including its own box.
    pub(crate) fn heap_bytes(&self) -> usize {
        let prefix = if self.prefix.spilled() {
            self.prefix.capacity()
        } else {
            0
        };
        std::mem::size_of::<Self>() + prefix + self.children.heap_bytes()
    }
}

/// Child map: dispatch bytes kept sorted, with the nodes in a parallel array.
pub(crate) struct Children<V> {
    bytes: SmallVec<[u8; INLINE_CHILDREN]>,
    nodes: SmallVec<[Box<Node<V>>; INLINE_CHILDREN]>,
}

impl<V> Children<V> {
    pub(crate) fn new() -> Self {
        Self {
            bytes: SmallVec::new(),
            nodes: SmallVec::new(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `Ok(idx)` if `byte` has a child, otherwise `Err(idx)` where it would go.
    #[inline]
    pub(crate) fn search(&self, byte: u8) -> std::result::Result<usize, usize> {
        self.bytes.binary_search(&byte)
    }

    pub(crate) fn get(&self, byte: u8) -> Option<&Node<V>> {
        let idx = self.search(byte).ok()?;
        Some(&*self.nodes[idx])
    }

    pub(crate) fn get_mut(&mut self, byte: u8) -> Option<&mut Node<V>> {
        let idx = self.search(byte).ok()?;
        Some(&mut *self.nodes[idx])
    }

    pub(crate) fn entry(&self, idx: usize) -> Option<(u8, &Node<V>)> {
        Some((*self.bytes.get(idx)?, &**self.nodes.get(idx)?))
    }

    #[inline]
    pub(crate) fn at(&self, idx: usize) -> &Node<V> {
        &self.nodes[idx]
    }

    #[inline]
    pub(crate) fn at_mut(&mut self, idx: usize) -> &mut Box<Node<V>> {
        &mut self.nodes[idx]
    }

    /// Makes room for `additional` children so a later insert cannot allocate.
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<()> {
        self.bytes.try_reserve(additional)?;
        self.nodes.try_reserve(additional)?;
        Ok(())
    }

    /// Links `node` under `byte`, which must not be present yet.
    pub(crate) fn insert(&mut self, byte: u8, node: Box<Node<V>>) {
        match self.search(byte) {
            Ok(_) => unreachable!("dispatch byte {byte:#04x} already linked"),
            Err(idx) => {
                self.bytes.insert(idx, byte);
                self.nodes.insert(idx, node);
            }
        }
    }

    pub(crate) fn remove_at(&mut self, idx: usize) -> (u8, Box<Node<V>>) {
        (self.bytes.remove(idx), self.nodes.remove(idx))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (u8, &Node<V>)> {
        self.bytes
            .iter()
            .copied()
            .zip(self.nodes.iter().map(|node| &**node))
    }

    /// Unlinks every child, handing ownership to the caller.
    pub(crate) fn drain(&mut self) -> impl Iterator<Item = Box<Node<V>>> + '_ {
        self.bytes.clear();
        self.nodes.drain(..)
    }

    pub(crate) fn is_strictly_sorted(&self) -> bool {
        self.bytes.windows(2).all(|w| w[0] < w[1]) && self.bytes.len() == self.nodes.len()
    }

    fn heap_bytes(&self) -> usize {
        let mut bytes = 0;
        if self.bytes.spilled() {
            bytes += self.bytes.capacity();
        }
        if self.nodes.spilled() {
            bytes += self.nodes.capacity() * std::mem::size_of::<Box<Node<V>>>();
        }
        bytes
    }
}
