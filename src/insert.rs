use crate::alloc::NodeAllocator;
use crate::error::{Error, Result};
use crate::node::Node;
use crate::tracing_helpers::{trace_log, warn_log};
use crate::traverse::{step, Step};
use crate::RadixTree;

impl<V> RadixTree<V> {
    /// Stores `value` under `key`, returning the value it replaced.
    ///
    /// On error the tree is left exactly as it was and `value` is dropped.
    pub fn insert(&mut self, key: &[u8], value: V) -> Result<Option<V>> {
        if let Some(max) = self.config.max_key_len {
            if key.len() > max {
                warn_log!(len = key.len(), max, "rejecting oversized key");
                return Err(Error::KeyTooLong {
                    len: key.len(),
                    max,
                });
            }
        }

        let old = match self.root {
            None => {
                self.alloc.reserve(1)?;
                self.root = Some(self.alloc.leaf(key, value)?);
                self.alloc.commit(1);
                None
            }
            Some(ref mut root) => insert_at(root, key, value, &mut self.alloc)?,
        };

        if old.is_none() {
            self.len += 1;
        }
        Ok(old)
    }
}

/// Walks down from `node` to the slot where `key` lands, then overwrites,
/// attaches a leaf or splits there. Does not recurse: nested keys can make
/// the path one node per byte.
fn insert_at<V>(
    mut node: &mut Box<Node<V>>,
    mut key: &[u8],
    value: V,
    alloc: &mut NodeAllocator,
) -> Result<Option<V>> {
    loop {
        match step(&node.prefix, key) {
            Step::Exact => return Ok(node.value.replace(value)),
            Step::Dispatch { byte, rest } => match node.children.search(byte) {
                Ok(idx) => {
                    node = node.children.at_mut(idx);
                    key = rest;
                }
                Err(_) => {
                    alloc.reserve(1)?;
                    node.children.try_reserve(1)?;
                    let leaf = alloc.leaf(rest, value)?;
                    node.children.insert(byte, leaf);
                    alloc.commit(1);
                    return Ok(None);
                }
            },
            Step::Diverge { matched } => {
                split(node, key, matched, value, alloc)?;
                return Ok(None);
            }
        }
    }
}

/// Breaks `node`'s prefix at `matched` so `key` can branch off there.
///
/// ```text
///   [abcd]          [ab]
///     |      =>    c/  \x
///    ...         [d]   [yz]   (inserting "abxyz")
///                 |
///                ...
/// ```
///
/// If `key` ends exactly at the divergence point the upper node takes the
/// value itself and no leaf is created.
fn split<V>(
    node: &mut Box<Node<V>>,
    key: &[u8],
    matched: usize,
    value: V,
    alloc: &mut NodeAllocator,
) -> Result<()> {
    let branch_leaf = matched < key.len();
    let created = if branch_leaf { 2 } else { 1 };
    alloc.reserve(created)?;

    let mut upper = alloc.branch(&node.prefix[..matched], created)?;
    let lower_prefix = alloc.prefix(&node.prefix[matched + 1..])?;
    let leaf = if branch_leaf {
        Some((key[matched], alloc.leaf(&key[matched + 1..], value)?))
    } else {
        upper.value = Some(value);
        None
    };

    // Everything is allocated; splice without further failure points.
    let lower_byte = node.prefix[matched];
    node.prefix = lower_prefix;
    let lower = std::mem::replace(node, upper);
    node.children.insert(lower_byte, lower);
    if let Some((byte, leaf)) = leaf {
        node.children.insert(byte, leaf);
    }
    alloc.commit(created);

    trace_log!(matched, created, "split node");
    Ok(())
}
