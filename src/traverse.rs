//! Byte matching shared by lookup, insert and remove.

use crate::node::Node;

/// Outcome of matching a key against one node's prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step<'k> {
    /// Prefix and key end together: the key addresses this node's value slot.
    Exact,
    /// Prefix fully matched with bytes left over. `byte` selects the child,
    /// `rest` is what that child has to match.
    Dispatch { byte: u8, rest: &'k [u8] },
    /// The key left the prefix after `matched` bytes, either on a differing
    /// byte or by running out first.
    Diverge { matched: usize },
}

#[inline]
pub(crate) fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

#[inline]
pub(crate) fn step<'k>(prefix: &[u8], key: &'k [u8]) -> Step<'k> {
    let matched = common_prefix_len(prefix, key);
    if matched < prefix.len() {
        return Step::Diverge { matched };
    }
    match key[matched..].split_first() {
        None => Step::Exact,
        Some((&byte, rest)) => Step::Dispatch { byte, rest },
    }
}

/// The node whose value slot `key` addresses, if the path exists.
pub(crate) fn find<'n, V>(mut node: &'n Node<V>, mut key: &[u8]) -> Option<&'n Node<V>> {
    loop {
        match step(&node.prefix, key) {
            Step::Exact => return Some(node),
            Step::Dispatch { byte, rest } => {
                node = node.children.get(byte)?;
                key = rest;
            }
            Step::Diverge { .. } => return None,
        }
    }
}

pub(crate) fn find_mut<'n, V>(mut node: &'n mut Node<V>, mut key: &[u8]) -> Option<&'n mut Node<V>> {
    loop {
        match step(&node.prefix, key) {
            Step::Exact => return Some(node),
            Step::Dispatch { byte, rest } => {
                node = node.children.get_mut(byte)?;
                key = rest;
            }
            Step::Diverge { .. } => return None,
        }
    }
}
