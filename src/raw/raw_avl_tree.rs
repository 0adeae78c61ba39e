use core::cmp::Ordering;
use core::mem;

use alloc::vec::Vec;
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;
use crate::Key;
use crate::error::Result;

/// Inline capacity of explicit traversal stacks.
///
/// An AVL tree of `n` nodes is at most ~1.44 * log2(n) tall, so this covers any
/// tree the handle space can address without spilling.
const STACK_DEPTH: usize = 64;

/// Where a cursor sits relative to the tree's elements.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Location {
    BeforeFirst,
    At(Handle),
    PastRear,
}

/// The AVL tree backing `AvlSequence`.
#[derive(Clone)]
pub(crate) struct RawAvlTree<V> {
    /// Arena owning every node; the only owner in the structure.
    nodes: Arena<Node<V>>,
    root: Option<Handle>,
    /// Number of entries, maintained on every structural insert/remove.
    len: usize,
}

impl<V> RawAvlTree<V> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<V> {
        self.nodes.get(handle)
    }

    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<V> {
        self.nodes.get_mut(handle)
    }

    /// Releases every node, children before their parent.
    pub(crate) fn clear(&mut self) {
        log::trace!("clearing tree of {} nodes", self.len);

        let mut stack: SmallVec<[(Handle, bool); STACK_DEPTH]> = SmallVec::new();
        if let Some(root) = self.root.take() {
            stack.push((root, false));
        }
        while let Some((handle, children_done)) = stack.pop() {
            if children_done {
                self.nodes.free(handle);
                continue;
            }
            stack.push((handle, true));
            let node = self.nodes.get(handle);
            if let Some(right) = node.right() {
                stack.push((right, false));
            }
            if let Some(left) = node.left() {
                stack.push((left, false));
            }
        }

        debug_assert!(self.nodes.is_empty());
        self.nodes.clear();
        self.len = 0;
    }

    /// Moves every entry out of the tree in ascending key order, leaving it empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(Key, V)> {
        let mut order = Vec::with_capacity(self.len);
        let mut current = self.first();
        while let Some(handle) = current {
            order.push(handle);
            current = self.successor(handle);
        }

        let entries = order.into_iter().map(|h| self.nodes.take(h).into_entry()).collect();
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        entries
    }

    // ─── Search and navigation ──────────────────────────────────────────────

    /// Exact-key BST descent.
    pub(crate) fn search(&self, key: Key) -> Option<Handle> {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match key.cmp(&node.key()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    /// Leftmost node of the subtree rooted at `handle`.
    pub(crate) fn min_from(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.nodes.get(handle).left() {
            handle = left;
        }
        handle
    }

    /// Rightmost node of the subtree rooted at `handle`.
    pub(crate) fn max_from(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.nodes.get(handle).right() {
            handle = right;
        }
        handle
    }

    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.min_from(root))
    }

    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.max_from(root))
    }

    /// In-order successor, or `None` if `handle` holds the largest key.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.nodes.get(handle).right() {
            return Some(self.min_from(right));
        }
        // Climb until we leave a left subtree.
        let mut child = handle;
        let mut parent = self.nodes.get(handle).parent();
        while let Some(p) = parent {
            let node = self.nodes.get(p);
            if node.is_left_child(child) {
                return Some(p);
            }
            child = p;
            parent = node.parent();
        }
        None
    }

    /// In-order predecessor, or `None` if `handle` holds the smallest key.
    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.nodes.get(handle).left() {
            return Some(self.max_from(left));
        }
        let mut child = handle;
        let mut parent = self.nodes.get(handle).parent();
        while let Some(p) = parent {
            let node = self.nodes.get(p);
            if !node.is_left_child(child) {
                return Some(p);
            }
            child = p;
            parent = node.parent();
        }
        None
    }

    /// One step forward through the before-first / element / past-rear states.
    pub(crate) fn advance(&self, location: Location) -> Location {
        match location {
            Location::BeforeFirst => self.first().map_or(Location::PastRear, Location::At),
            Location::At(handle) => self.successor(handle).map_or(Location::PastRear, Location::At),
            Location::PastRear => Location::PastRear,
        }
    }

    /// One step backward through the before-first / element / past-rear states.
    pub(crate) fn rewind(&self, location: Location) -> Location {
        match location {
            Location::BeforeFirst => Location::BeforeFirst,
            Location::At(handle) => self.predecessor(handle).map_or(Location::BeforeFirst, Location::At),
            Location::PastRear => self.last().map_or(Location::BeforeFirst, Location::At),
        }
    }

    // ─── Balancing ──────────────────────────────────────────────────────────

    #[inline]
    fn height(&self, handle: Option<Handle>) -> u8 {
        handle.map_or(0, |h| self.nodes.get(h).height())
    }

    /// Left height minus right height.
    fn balance_factor(&self, handle: Handle) -> i16 {
        let node = self.nodes.get(handle);
        i16::from(self.height(node.left())) - i16::from(self.height(node.right()))
    }

    fn fix_height(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let height = 1 + self.height(node.left()).max(self.height(node.right()));
        self.nodes.get_mut(handle).set_height(height);
    }

    /// Puts `replacement` where `node` hangs from its parent (or at the root).
    fn replace_in_parent(&mut self, node: Handle, replacement: Option<Handle>) {
        let parent = self.nodes.get(node).parent();
        if let Some(r) = replacement {
            self.nodes.get_mut(r).set_parent(parent);
        }
        match parent {
            None => self.root = replacement,
            Some(p) => {
                let parent_node = self.nodes.get_mut(p);
                if parent_node.is_left_child(node) {
                    parent_node.set_left(replacement);
                } else {
                    parent_node.set_right(replacement);
                }
            }
        }
    }

    /// Promotes `handle`'s right child into its place.
    fn rotate_left(&mut self, handle: Handle) {
        let pivot = self.nodes.get(handle).right().expect("`rotate_left()` - node has no right child!");
        log::trace!(
            "rotate left at key {} (pivot {})",
            self.nodes.get(handle).key(),
            self.nodes.get(pivot).key()
        );

        self.replace_in_parent(handle, Some(pivot));
        let inner = self.nodes.get(pivot).left();
        self.nodes.get_mut(handle).set_right(inner);
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).set_parent(Some(handle));
        }
        self.nodes.get_mut(handle).set_parent(Some(pivot));
        self.nodes.get_mut(pivot).set_left(Some(handle));

        self.fix_height(handle);
        self.fix_height(pivot);
    }

    /// Promotes `handle`'s left child into its place.
    fn rotate_right(&mut self, handle: Handle) {
        let pivot = self.nodes.get(handle).left().expect("`rotate_right()` - node has no left child!");
        log::trace!(
            "rotate right at key {} (pivot {})",
            self.nodes.get(handle).key(),
            self.nodes.get(pivot).key()
        );

        self.replace_in_parent(handle, Some(pivot));
        let inner = self.nodes.get(pivot).right();
        self.nodes.get_mut(handle).set_left(inner);
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).set_parent(Some(handle));
        }
        self.nodes.get_mut(handle).set_parent(Some(pivot));
        self.nodes.get_mut(pivot).set_right(Some(handle));

        self.fix_height(handle);
        self.fix_height(pivot);
    }

    /// Restores heights and AVL balance on the path from `start` to the root.
    ///
    /// Always walks the full path: a removal can need rotations at several
    /// non-adjacent levels.
    fn rebalance(&mut self, start: Option<Handle>) {
        let mut current = start;
        while let Some(handle) = current {
            self.fix_height(handle);
            // Captured before rotating; a rotation re-parents `handle`.
            let parent = self.nodes.get(handle).parent();

            match self.balance_factor(handle) {
                2 => {
                    let left = self.nodes.get(handle).left().expect("left-heavy node has a left child");
                    if self.balance_factor(left) < 0 {
                        self.rotate_left(left);
                    }
                    self.rotate_right(handle);
                }
                -2 => {
                    let right = self.nodes.get(handle).right().expect("right-heavy node has a right child");
                    if self.balance_factor(right) > 0 {
                        self.rotate_right(right);
                    }
                    self.rotate_left(handle);
                }
                _ => {}
            }

            current = parent;
        }
    }

    // ─── Mutation ───────────────────────────────────────────────────────────

    /// Inserts `key`, or overwrites its value in place if it is already present.
    ///
    /// Returns the previous value on overwrite. An overwrite never changes the
    /// tree's shape. If allocating the new node fails the tree is untouched.
    pub(crate) fn try_insert(&mut self, key: Key, value: V) -> Result<Option<V>> {
        let Some(mut parent) = self.root else {
            let handle = self.nodes.try_alloc(Node::leaf(key, value, None))?;
            self.root = Some(handle);
            self.len += 1;
            return Ok(None);
        };

        loop {
            let node = self.nodes.get(parent);
            let next = match key.cmp(&node.key()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => {
                    let slot = self.nodes.get_mut(parent).value_mut();
                    return Ok(Some(mem::replace(slot, value)));
                }
            };
            match next {
                Some(child) => parent = child,
                None => break,
            }
        }

        let leaf = self.nodes.try_alloc(Node::leaf(key, value, Some(parent)))?;
        let parent_node = self.nodes.get_mut(parent);
        if key < parent_node.key() {
            parent_node.set_left(Some(leaf));
        } else {
            parent_node.set_right(Some(leaf));
        }
        self.len += 1;
        self.rebalance(Some(parent));
        Ok(None)
    }

    /// Removes `key` and returns its entry, or `None` if it is absent.
    pub(crate) fn remove(&mut self, key: Key) -> Option<(Key, V)> {
        let handle = self.search(key)?;
        Some(self.remove_node(handle))
    }

    /// Removes the entry stored at `handle`.
    ///
    /// A node with two children is not itself unlinked: its in-order successor
    /// is, and the successor's entry is moved into `handle`'s slot. Afterwards
    /// `handle` is still live and holds the next-larger entry. In every other
    /// case `handle` is freed.
    pub(crate) fn remove_node(&mut self, handle: Handle) -> (Key, V) {
        let node = self.nodes.get(handle);
        let (rebalance_from, entry) = match (node.left(), node.right()) {
            (Some(_), Some(right)) => {
                let successor = self.min_from(right);
                let parent = self.nodes.get(successor).parent();
                // The leftmost node of a subtree has no left child.
                let orphan = self.nodes.get(successor).right();
                self.replace_in_parent(successor, orphan);

                let (key, value) = self.nodes.take(successor).into_entry();
                log::trace!("moving successor {key} into slot {handle:?}");
                let entry = self.nodes.get_mut(handle).replace_entry(key, value);
                (parent, entry)
            }
            (child, None) | (None, child) => {
                let parent = node.parent();
                self.replace_in_parent(handle, child);
                (parent, self.nodes.take(handle).into_entry())
            }
        };

        self.len -= 1;
        self.rebalance(rebalance_from);
        entry
    }

    pub(crate) fn remove_first(&mut self) -> Option<(Key, V)> {
        let handle = self.first()?;
        Some(self.remove_node(handle))
    }

    pub(crate) fn remove_last(&mut self) -> Option<(Key, V)> {
        let handle = self.last()?;
        Some(self.remove_node(handle))
    }
}
