use core::mem;

use super::handle::Handle;
use crate::Key;

/// A single AVL tree node.
///
/// Children are owned by the tree's arena; `parent` is a lookup link used only
/// for upward traversal and rebalancing.
#[derive(Clone)]
pub(crate) struct Node<V> {
    key: Key,
    value: V,
    // Height of the subtree rooted here; a leaf is 1, an absent child counts as 0.
    height: u8,
    left: Option<Handle>,
    right: Option<Handle>,
    parent: Option<Handle>,
}

impl<V> Node<V> {
    /// Creates a detached leaf hanging off `parent`.
    pub(crate) const fn leaf(key: Key, value: V, parent: Option<Handle>) -> Self {
        Self {
            key,
            value,
            height: 1,
            left: None,
            right: None,
            parent,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> Key {
        self.key
    }

    #[inline]
    pub(crate) const fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    #[inline]
    pub(crate) const fn height(&self) -> u8 {
        self.height
    }

    pub(crate) fn set_height(&mut self, height: u8) {
        self.height = height;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    pub(crate) fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    pub(crate) fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    /// Returns true if `child` is this node's left child.
    #[inline]
    pub(crate) fn is_left_child(&self, child: Handle) -> bool {
        self.left == Some(child)
    }

    /// Overwrites the entry stored here, returning the previous one. Links are untouched.
    pub(crate) fn replace_entry(&mut self, key: Key, value: V) -> (Key, V) {
        let old_key = mem::replace(&mut self.key, key);
        let old_value = mem::replace(&mut self.value, value);
        (old_key, old_value)
    }

    /// Consumes the node, discarding its links.
    pub(crate) fn into_entry(self) -> (Key, V) {
        (self.key, self.value)
    }
}
