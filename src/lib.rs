//! # radix-tree
//!
//! A compressed radix trie (PATRICIA-style) keyed by arbitrary byte strings.
//!
//! Keys are raw `&[u8]`: any byte value is allowed, including `0x00`, and the
//! empty slice is a valid key. Common prefixes are stored once, and a key may
//! be stored alongside keys it is a strict prefix of.
//!
//! ## Example
//!
//! ```rust
//! use radix_tree::RadixTree;
//!
//! let mut tree: RadixTree<u64> = RadixTree::new();
//! tree.insert(b"vg0", 1).unwrap();
//! tree.insert(b"vg0/lvol0", 2).unwrap();
//!
//! assert_eq!(tree.get(b"vg0"), Some(&1));
//! assert_eq!(tree.get(b"vg0/lvol0"), Some(&2));
//! assert_eq!(tree.get(b"vg0/"), None);
//!
//! assert_eq!(tree.remove(b"vg0"), Some(1));
//! assert_eq!(tree.get(b"vg0/lvol0"), Some(&2));
//!
//! // Values that reference external resources can be released on teardown.
//! let mut released = Vec::new();
//! tree.destroy(|value| released.push(value));
//! assert_eq!(released, vec![2]);
//! ```
//!
//! Insertion is the only fallible operation. With a [`Config`] node budget or
//! key length limit, or when a prefix or child map reservation fails, insert
//! returns an [`Error`] and leaves the tree unchanged. See
//! [`Error::OutOfMemory`] for which allocations are covered.

#![deny(unsafe_code)]

mod alloc;
mod config;
mod error;
mod insert;
mod lifecycle;
mod node;
mod remove;
mod stats;
mod tracing_helpers;
mod traverse;

pub use config::Config;
pub use error::{Error, Result};
pub use stats::TreeStats;

use crate::alloc::NodeAllocator;
use crate::node::Node;

// =============================================================================
// Tree handle
// =============================================================================

/// A map from byte strings to `V`, stored as a compressed radix trie.
///
/// Every node carries a prefix fragment, an optional value and children keyed
/// by the next byte. Value-less nodes always branch, so the node count is
/// bounded by the number of keys plus branching points, not by key length.
pub struct RadixTree<V> {
    root: Option<Box<Node<V>>>,
    alloc: NodeAllocator,
    len: usize,
    config: Config,
}

impl<V> RadixTree<V> {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            root: None,
            alloc: NodeAllocator::new(config.max_nodes),
            len: 0,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of stored keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, key: &[u8]) -> Option<&V> {
        let root = self.root.as_deref()?;
        traverse::find(root, key)?.value.as_ref()
    }

    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        let root = self.root.as_deref_mut()?;
        traverse::find_mut(root, key)?.value.as_mut()
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }
}

impl<V> Default for RadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for RadixTree<V> {
    fn clone(&self) -> Self {
        Self {
            root: lifecycle::clone_root(self.root.as_deref()),
            alloc: self.alloc.clone(),
            len: self.len,
            config: self.config.clone(),
        }
    }
}

impl<V> std::fmt::Debug for RadixTree<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadixTree")
            .field("len", &self.len)
            .field("nodes", &self.alloc.live())
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod proptests;
