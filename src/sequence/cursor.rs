use core::fmt;

use super::AvlSequence;
use crate::error::{Error, Result};
use crate::raw::{Location, RawAvlTree};
use crate::{Key, Position};

fn position_of(location: Location) -> Position {
    match location {
        Location::BeforeFirst => Position::BeforeFirst,
        Location::At(_) => Position::Dereferencable,
        Location::PastRear => Position::PastRear,
    }
}

/// Takes `|delta|` single steps, forward if positive. Stops early once a ghost
/// position is reached, since further steps in the same direction are no-ops.
fn shifted<V>(tree: &RawAvlTree<V>, mut location: Location, delta: isize) -> Location {
    if delta >= 0 {
        for _ in 0..delta.unsigned_abs() {
            location = tree.advance(location);
            if location == Location::PastRear {
                break;
            }
        }
    } else {
        for _ in 0..delta.unsigned_abs() {
            location = tree.rewind(location);
            if location == Location::BeforeFirst {
                break;
            }
        }
    }
    location
}

/// Resets to before-first, then advances `pos + 1` times: `pos` 0 is the
/// smallest key.
fn at_rank<V>(tree: &RawAvlTree<V>, pos: usize) -> Location {
    let mut location = Location::BeforeFirst;
    for _ in 0..=pos {
        location = tree.advance(location);
        if location == Location::PastRear {
            break;
        }
    }
    location
}

impl<V> AvlSequence<V> {
    /// Returns a cursor on the element whose key is exactly `key`, or a
    /// past-rear cursor if there is none.
    ///
    /// This is a key search, not a rank lookup: keys may be sparse, and
    /// `element_at_key(3)` finds key 3 wherever it sits in the order. Use
    /// [`Cursor::set_position`] to reach the element at a given rank.
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
    /// let seq = AvlSequence::from([(10, "ten"), (30, "thirty")]);
    /// assert_eq!(seq.element_at_key(30).value(), Ok(&"thirty"));
    /// assert!(seq.element_at_key(1).is_past_rear());
    /// ```
    #[must_use]
    pub fn element_at_key(&self, key: Key) -> Cursor<'_, V> {
        let location = self.raw.search(key).map_or(Location::PastRear, Location::At);
        Cursor::new(&self.raw, location)
    }

    /// Mutable variant of [`element_at_key`](Self::element_at_key).
    pub fn element_at_key_mut(&mut self, key: Key) -> CursorMut<'_, V> {
        let location = self.raw.search(key).map_or(Location::PastRear, Location::At);
        CursorMut::new(&mut self.raw, location)
    }

    /// Returns a cursor on the smallest key, or a past-rear cursor if the
    /// sequence is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_sequence::AvlSequence;
    ///
    /// let seq = AvlSequence::from([(2, 'b'), (1, 'a')]);
    /// assert_eq!(seq.front().key(), Ok(1));
    ///
    /// let empty: AvlSequence<char> = AvlSequence::new();
    /// assert!(empty.front().is_past_rear());
    /// ```
    #[must_use]
    pub fn front(&self) -> Cursor<'_, V> {
        Cursor::new(&self.raw, self.raw.advance(Location::BeforeFirst))
    }

    /// Mutable variant of [`front`](Self::front).
    pub fn front_mut(&mut self) -> CursorMut<'_, V> {
        let location = self.raw.advance(Location::BeforeFirst);
        CursorMut::new(&mut self.raw, location)
    }

    /// Returns a past-rear cursor, whatever the sequence holds.
    ///
    /// Rewinding it once reaches the largest key.
    #[must_use]
    pub fn past_rear(&self) -> Cursor<'_, V> {
        Cursor::new(&self.raw, Location::PastRear)
    }

    /// Mutable variant of [`past_rear`](Self::past_rear).
    pub fn past_rear_mut(&mut self) -> CursorMut<'_, V> {
        CursorMut::new(&mut self.raw, Location::PastRear)
    }
}

/// A read-only cursor over an [`AvlSequence`].
///
/// The cursor is before the first element, on an element, or past the rear
/// element (see [`Position`]), and moves one element at a time in key order.
/// It borrows the sequence, so the sequence cannot change underneath it.
///
/// Created by [`AvlSequence::element_at_key`], [`AvlSequence::front`] and
/// [`AvlSequence::past_rear`].
pub struct Cursor<'a, V> {
    tree: &'a RawAvlTree<V>,
    location: Location,
}

impl<'a, V> Cursor<'a, V> {
    fn new(tree: &'a RawAvlTree<V>, location: Location) -> Self {
        Cursor { tree, location }
    }

    /// Returns which of the three states the cursor is in.
    #[must_use]
    pub fn position(&self) -> Position {
        position_of(self.location)
    }

    /// Returns `true` if the cursor is on an element.
    #[must_use]
    pub fn is_dereferencable(&self) -> bool {
        matches!(self.location, Location::At(_))
    }

    /// Returns `true` if the cursor is before the first element.
    #[must_use]
    pub fn is_before_first(&self) -> bool {
        self.location == Location::BeforeFirst
    }

    /// Returns `true` if the cursor is past the rear element.
    #[must_use]
    pub fn is_past_rear(&self) -> bool {
        self.location == Location::PastRear
    }

    /// Returns the key of the element under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotDereferencable`] if the cursor is not on an element.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_sequence::{AvlSequence, Error, Position};
    ///
    /// let seq = AvlSequence::from([(-1, ())]);
    /// assert_eq!(seq.front().key(), Ok(-1));
    /// assert_eq!(seq.past_rear().key(), Err(Error::NotDereferencable(Position::PastRear)));
    /// ```
    pub fn key(&self) -> Result<Key> {
        self.entry().map(|(key, _)| key)
    }

    /// Returns the value of the element under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotDereferencable`] if the cursor is not on an element.
    pub fn value(&self) -> Result<&'a V> {
        self.entry().map(|(_, value)| value)
    }

    /// Returns the key and value of the element under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotDereferencable`] if the cursor is not on an element.
    pub fn entry(&self) -> Result<(Key, &'a V)> {
        let Location::At(handle) = self.location else {
            return Err(Error::NotDereferencable(self.position()));
        };
        let node = self.tree.node(handle);
        Ok((node.key(), node.value()))
    }

    /// Moves to the next element in key order.
    ///
    /// From before-first this reaches the smallest key. From the largest key it
    /// reaches past-rear, where further advances do nothing.
    ///
    /// # Complexity
    ///
    /// O(log n) worst case, amortized O(1) over a full walk.
    pub fn advance(&mut self) {
        self.location = self.tree.advance(self.location);
    }

    /// Moves to the previous element in key order.
    ///
    /// From past-rear this reaches the largest key. From the smallest key it
    /// reaches before-first, where further rewinds do nothing.
    pub fn rewind(&mut self) {
        self.location = self.tree.rewind(self.location);
    }

    /// Advances `delta` times if positive, or rewinds `-delta` times if negative.
    ///
    /// # Complexity
    ///
    /// O(|delta|) steps.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_sequence::AvlSequence;
    ///
    /// let seq: AvlSequence<()> = [10, 20, 30, 40].into_iter().map(|k| (k, ())).collect();
    /// let mut cursor = seq.front();
    /// cursor.shift(2);
    /// assert_eq!(cursor.key(), Ok(30));
    /// cursor.shift(-3);
    /// assert!(cursor.is_before_first());
    /// ```
    pub fn shift(&mut self, delta: isize) {
        self.location = shifted(self.tree, self.location, delta);
    }

    /// Moves to the element of rank `pos` (0 is the smallest key), or past-rear
    /// if the sequence has no more than `pos` elements.
    ///
    /// This walks the sorted order from the front; unlike
    /// [`AvlSequence::element_at_key`] it does not search by key.
    ///
    /// # Complexity
    ///
    /// O(pos) steps.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_sequence::AvlSequence;
    ///
    /// let seq = AvlSequence::from([(100, 'a'), (7, 'b'), (-3, 'c')]);
    /// let mut cursor = seq.past_rear();
    /// cursor.set_position(1);
    /// assert_eq!(cursor.key(), Ok(7));
    /// cursor.set_position(3);
    /// assert!(cursor.is_past_rear());
    /// ```
    pub fn set_position(&mut self, pos: usize) {
        self.location = at_rank(self.tree, pos);
    }
}

impl<V> Clone for Cursor<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Cursor<'_, V> {}

impl<V: fmt::Debug> fmt::Debug for Cursor<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position())
            .field("entry", &self.entry().ok())
            .finish()
    }
}

/// A cursor over an [`AvlSequence`] that can modify the element under it.
///
/// Navigation works exactly as for [`Cursor`]. In addition the value under the
/// cursor can be changed in place, and the element can be removed with
/// [`remove_current`](Self::remove_current).
///
/// Created by [`AvlSequence::element_at_key_mut`], [`AvlSequence::front_mut`]
/// and [`AvlSequence::past_rear_mut`].
pub struct CursorMut<'a, V> {
    tree: &'a mut RawAvlTree<V>,
    location: Location,
}

impl<'a, V> CursorMut<'a, V> {
    fn new(tree: &'a mut RawAvlTree<V>, location: Location) -> Self {
        CursorMut { tree, location }
    }

    /// Returns a read-only view of this cursor at its current location.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, V> {
        Cursor::new(&*self.tree, self.location)
    }

    #[must_use]
    pub fn position(&self) -> Position {
        position_of(self.location)
    }

    #[must_use]
    pub fn is_dereferencable(&self) -> bool {
        matches!(self.location, Location::At(_))
    }

    #[must_use]
    pub fn is_before_first(&self) -> bool {
        self.location == Location::BeforeFirst
    }

    #[must_use]
    pub fn is_past_rear(&self) -> bool {
        self.location == Location::PastRear
    }

    /// Returns the key of the element under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotDereferencable`] if the cursor is not on an element.
    pub fn key(&self) -> Result<Key> {
        self.as_cursor().key()
    }

    /// Returns the value of the element under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotDereferencable`] if the cursor is not on an element.
    pub fn value(&self) -> Result<&V> {
        let Location::At(handle) = self.location else {
            return Err(Error::NotDereferencable(self.position()));
        };
        Ok(self.tree.node(handle).value())
    }

    /// Returns a mutable reference to the value of the element under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotDereferencable`] if the cursor is not on an element.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_sequence::AvlSequence;
    ///
    /// let mut seq = AvlSequence::from([(4, 16)]);
    /// let mut cursor = seq.element_at_key_mut(4);
    /// *cursor.value_mut().unwrap() = 4;
    /// assert_eq!(seq[4], 4);
    /// ```
    pub fn value_mut(&mut self) -> Result<&mut V> {
        let Location::At(handle) = self.location else {
            return Err(Error::NotDereferencable(self.position()));
        };
        Ok(self.tree.node_mut(handle).value_mut())
    }

    pub fn advance(&mut self) {
        self.location = self.tree.advance(self.location);
    }

    pub fn rewind(&mut self) {
        self.location = self.tree.rewind(self.location);
    }

    /// See [`Cursor::shift`].
    pub fn shift(&mut self, delta: isize) {
        self.location = shifted(self.tree, self.location, delta);
    }

    /// See [`Cursor::set_position`].
    pub fn set_position(&mut self, pos: usize) {
        self.location = at_rank(self.tree, pos);
    }

    /// Removes the element under the cursor and returns it, leaving the cursor
    /// on the next element in key order (or past-rear).
    ///
    /// Removal of a node with two children is copy-based: the in-order successor
    /// is unlinked and its entry is moved into the removed element's node. The
    /// cursor keeps referring to that same node, which now holds the successor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotDereferencable`] if the cursor is not on an element;
    /// the sequence is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_sequence::AvlSequence;
    ///
    /// let mut seq = AvlSequence::from([(1, 'a'), (2, 'b'), (3, 'c')]);
    /// let mut cursor = seq.element_at_key_mut(2);
    /// assert_eq!(cursor.remove_current(), Ok((2, 'b')));
    /// assert_eq!(cursor.key(), Ok(3));
    /// assert_eq!(seq.len(), 2);
    /// ```
    pub fn remove_current(&mut self) -> Result<(Key, V)> {
        let Location::At(handle) = self.location else {
            return Err(Error::NotDereferencable(self.position()));
        };

        let node = self.tree.node(handle);
        let next = if node.left().is_some() && node.right().is_some() {
            // The slot survives and receives the successor's entry.
            Some(handle)
        } else {
            self.tree.successor(handle)
        };

        let entry = self.tree.remove_node(handle);
        self.location = next.map_or(Location::PastRear, Location::At);
        Ok(entry)
    }
}

impl<V: fmt::Debug> fmt::Debug for CursorMut<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("position", &self.position())
            .field("entry", &self.as_cursor().entry().ok())
            .finish()
    }
}
