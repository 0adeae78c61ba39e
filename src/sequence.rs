use core::fmt;
use core::iter::FusedIterator;
use core::ops::Index;

use alloc::vec::IntoIter as VecIntoIter;

use crate::Key;
use crate::error::Result;
use crate::raw::{Location, RawAvlTree};

mod cursor;

pub use cursor::{Cursor, CursorMut};

/// An ordered map from [`Key`]s to values, kept balanced as an AVL tree.
///
/// Keys are unique signed integers and need not be contiguous. Lookup,
/// insertion and removal by key are O(log n). Walking the elements in key order
/// is done either with the std-style iterators ([`iter`](Self::iter),
/// [`keys`](Self::keys), [`values`](Self::values)) or with an external
/// [`Cursor`], which can stop, reverse, and be repositioned by rank.
///
/// # Examples
///
/// ```
/// use avl_sequence::AvlSequence;
///
/// let mut seq = AvlSequence::new();
/// seq.insert(1, 12);
/// seq.insert(5, 17);
/// seq.insert(2, 13);
/// seq.insert(4, 16);
///
/// assert_eq!(seq.len(), 4);
/// assert!(seq.contains_key(2));
/// assert!(!seq.contains_key(3));
/// assert_eq!(seq[4], 16);
///
/// // Inserting an existing key overwrites its value.
/// assert_eq!(seq.insert(1, 1), Some(12));
///
/// assert_eq!(seq.remove(2), Some(13));
/// assert_eq!(seq.iter().collect::<Vec<_>>(), [(1, &1), (4, &16), (5, &17)]);
/// ```
pub struct AvlSequence<V> {
    raw: RawAvlTree<V>,
}

impl<V> AvlSequence<V> {
    /// Makes a new, empty `AvlSequence`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> Self {
        AvlSequence { raw: RawAvlTree::new() }
    }

    /// Returns the number of elements in the sequence.
    ///
    /// # Complexity
    ///
    /// O(1) - the count is maintained by every insert and remove.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the sequence contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every element, releasing each node exactly once.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_sequence::AvlSequence;
    ///
    /// let mut seq = AvlSequence::from([(1, "a"), (2, "b")]);
    /// seq.clear();
    /// assert!(seq.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Inserts a key-value pair.
    ///
    /// If the key was absent a new element is added and `None` is returned. If
    /// it was present, its value is overwritten in place and the old value is
    /// returned; the tree's shape does not change.
    ///
    /// # Panics
    ///
    /// Panics if a new node cannot be allocated. Use
    /// [`try_insert`](Self::try_insert) to handle that case.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_sequence::AvlSequence;
    ///
    /// let mut seq = AvlSequence::new();
    /// assert_eq!(seq.insert(37, "a"), None);
    /// assert_eq!(seq.insert(37, "b"), Some("a"));
    /// assert_eq!(seq[37], "b");
    /// ```
    pub fn insert(&mut self, key: Key, value: V) -> Option<V> {
        match self.raw.try_insert(key, value) {
            Ok(old) => old,
            Err(err) => panic!("`AvlSequence::insert()` - {err}"),
        }
    }

    /// Inserts a key-value pair, reporting allocation failure instead of panicking.
    ///
    /// On error the sequence is left unchanged and `value` is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`](crate::Error::AllocationFailure) if
    /// memory for the node cannot be reserved, or
    /// [`Error::CapacityExceeded`](crate::Error::CapacityExceeded) if the
    /// sequence cannot address another node. Overwriting an existing key never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_sequence::AvlSequence;
    ///
    /// let mut seq = AvlSequence::new();
    /// assert_eq!(seq.try_insert(-1, 'x'), Ok(None));
    /// assert_eq!(seq.try_insert(-1, 'y'), Ok(Some('x')));
    /// ```
    pub fn try_insert(&mut self, key: Key, value: V) -> Result<Option<V>> {
        self.raw.try_insert(key, value).inspect_err(|err| {
            log::debug!("insert of key {key} failed: {err}");
        })
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get(&self, key: Key) -> Option<&V> {
        let handle = self.raw.search(key)?;
        Some(self.raw.node(handle).value())
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_sequence::AvlSequence;
    ///
    /// let mut seq = AvlSequence::from([(1, 10)]);
    /// if let Some(v) = seq.get_mut(1) {
    ///     *v += 1;
    /// }
    /// assert_eq!(seq[1], 11);
    /// ```
    pub fn get_mut(&mut self, key: Key) -> Option<&mut V> {
        let handle = self.raw.search(key)?;
        Some(self.raw.node_mut(handle).value_mut())
    }

    /// Returns `true` if the sequence holds `key`.
    #[must_use]
    pub fn contains_key(&self, key: Key) -> bool {
        self.raw.search(key).is_some()
    }

    /// Returns the element with the smallest key.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(Key, &V)> {
        let node = self.raw.node(self.raw.first()?);
        Some((node.key(), node.value()))
    }

    /// Returns the element with the largest key.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(Key, &V)> {
        let node = self.raw.node(self.raw.last()?);
        Some((node.key(), node.value()))
    }

    /// Removes `key`, returning its value if it was present.
    ///
    /// Removing an absent key is a no-op.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_sequence::AvlSequence;
    ///
    /// let mut seq = AvlSequence::from([(1, "a")]);
    /// assert_eq!(seq.remove(1), Some("a"));
    /// assert_eq!(seq.remove(1), None);
    /// ```
    pub fn remove(&mut self, key: Key) -> Option<V> {
        self.raw.remove(key).map(|(_, value)| value)
    }

    /// Removes `key`, returning the stored key and value if it was present.
    pub fn remove_entry(&mut self, key: Key) -> Option<(Key, V)> {
        self.raw.remove(key)
    }

    /// Removes and returns the element with the smallest key.
    ///
    /// Does nothing and returns `None` on an empty sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_sequence::AvlSequence;
    ///
    /// let mut seq = AvlSequence::from([(3, 'c'), (1, 'a'), (2, 'b')]);
    /// assert_eq!(seq.remove_front(), Some((1, 'a')));
    /// assert_eq!(seq.remove_rear(), Some((3, 'c')));
    /// assert_eq!(seq.len(), 1);
    /// ```
    pub fn remove_front(&mut self) -> Option<(Key, V)> {
        self.raw.remove_first()
    }

    /// Removes and returns the element with the largest key.
    ///
    /// Does nothing and returns `None` on an empty sequence.
    pub fn remove_rear(&mut self) -> Option<(Key, V)> {
        self.raw.remove_last()
    }

    /// Gets an iterator over the elements in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_sequence::AvlSequence;
    ///
    /// let seq = AvlSequence::from([(3, "c"), (1, "a"), (2, "b")]);
    /// let mut iter = seq.iter();
    /// assert_eq!(iter.next(), Some((1, &"a")));
    /// assert_eq!(iter.next_back(), Some((3, &"c")));
    /// assert_eq!(iter.next(), Some((2, &"b")));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            tree: &self.raw,
            front: Location::BeforeFirst,
            back: Location::PastRear,
            remaining: self.raw.len(),
        }
    }

    /// Gets an iterator over the keys in ascending order.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values in ascending key order.
    pub fn values(&self) -> Values<'_, V> {
        Values { inner: self.iter() }
    }
}

impl<V: Clone> Clone for AvlSequence<V> {
    fn clone(&self) -> Self {
        AvlSequence { raw: self.raw.clone() }
    }
}

impl<V: PartialEq> PartialEq for AvlSequence<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<V: Eq> Eq for AvlSequence<V> {}

impl<V: fmt::Debug> fmt::Debug for AvlSequence<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V> Default for AvlSequence<V> {
    fn default() -> Self {
        AvlSequence::new()
    }
}

impl<V> FromIterator<(Key, V)> for AvlSequence<V> {
    fn from_iter<T: IntoIterator<Item = (Key, V)>>(iter: T) -> Self {
        let mut seq = AvlSequence::new();
        seq.extend(iter);
        seq
    }
}

impl<V> Extend<(Key, V)> for AvlSequence<V> {
    fn extend<T: IntoIterator<Item = (Key, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<V, const N: usize> From<[(Key, V); N]> for AvlSequence<V> {
    fn from(arr: [(Key, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<V> Index<Key> for AvlSequence<V> {
    type Output = V;

    /// Returns the value stored under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present.
    fn index(&self, key: Key) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<'a, V> IntoIterator for &'a AvlSequence<V> {
    type Item = (Key, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

impl<V> IntoIterator for AvlSequence<V> {
    type Item = (Key, V);
    type IntoIter = IntoIter<V>;

    /// Gets an owning iterator over the elements, sorted by key.
    fn into_iter(mut self) -> IntoIter<V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

/// An iterator over the elements of an `AvlSequence`, in key order.
///
/// This `struct` is created by [`AvlSequence::iter`].
pub struct Iter<'a, V> {
    tree: &'a RawAvlTree<V>,
    front: Location,
    back: Location,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (Key, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.front = self.tree.advance(self.front);
        let Location::At(handle) = self.front else {
            return None;
        };
        self.remaining -= 1;
        let node = self.tree.node(handle);
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.back = self.tree.rewind(self.back);
        let Location::At(handle) = self.back else {
            return None;
        };
        self.remaining -= 1;
        let node = self.tree.node(handle);
        Some((node.key(), node.value()))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<V: fmt::Debug> fmt::Debug for Iter<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over the keys of an `AvlSequence`.
///
/// This `struct` is created by [`AvlSequence::keys`].
pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<V> Iterator for Keys<'_, V> {
    type Item = Key;

    fn next(&mut self) -> Option<Key> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Keys<'_, V> {
    fn next_back(&mut self) -> Option<Key> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}

impl<V> FusedIterator for Keys<'_, V> {}

impl<V> Clone for Keys<'_, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

/// An iterator over the values of an `AvlSequence`, in key order.
///
/// This `struct` is created by [`AvlSequence::values`].
pub struct Values<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Values<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}

impl<V> FusedIterator for Values<'_, V> {}

impl<V> Clone for Values<'_, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

/// An owning iterator over the elements of an `AvlSequence`, sorted by key.
///
/// This `struct` is created by the `into_iter` method on [`AvlSequence`].
pub struct IntoIter<V> {
    inner: VecIntoIter<(Key, V)>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (Key, V);

    fn next(&mut self) -> Option<(Key, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for IntoIter<V> {
    fn next_back(&mut self) -> Option<(Key, V)> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> FusedIterator for IntoIter<V> {}

impl<V: fmt::Debug> fmt::Debug for IntoIter<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}
