use core::fmt;

/// The three states a [`Cursor`](crate::Cursor) can be in.
///
/// A cursor is either on an element, or in one of the two ghost positions that
/// bracket the sequence: just before the smallest key and just after the
/// largest one.
///
/// # Examples
///
/// ```
/// use avl_sequence::{AvlSequence, Position};
///
/// let seq = AvlSequence::from([(1, "a")]);
/// let mut cursor = seq.front();
/// assert_eq!(cursor.position(), Position::Dereferencable);
///
/// cursor.advance();
/// assert_eq!(cursor.position(), Position::PastRear);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Position {
    /// Before the first element; advancing moves to the smallest key.
    BeforeFirst,
    /// On an element, whose key and value can be read.
    Dereferencable,
    /// After the last element; rewinding moves to the largest key.
    PastRear,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Position::BeforeFirst => "before the first element",
            Position::Dereferencable => "on an element",
            Position::PastRear => "past the rear element",
        })
    }
}
