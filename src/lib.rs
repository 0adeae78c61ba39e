//! An integer-keyed ordered sequence backed by an AVL tree.
//!
//! This crate provides [`AvlSequence`], an associative container from signed
//! integer keys to arbitrary values, together with [`Cursor`] and [`CursorMut`]:
//! external, bidirectional cursors that walk the elements in key order.
//!
//! Two access patterns are offered and deliberately kept apart:
//!
//! - [`element_at_key`](AvlSequence::element_at_key) - O(log n) lookup of an exact key
//!   (keys may be sparse, this is *not* an ordinal index)
//! - [`set_position`](Cursor::set_position) / [`shift`](Cursor::shift) - O(k) rank walks
//!   of k steps through the sorted order
//!
//! # Example
//!
//! ```
//! use avl_sequence::{AvlSequence, Position};
//!
//! let mut seq = AvlSequence::new();
//! for key in [5, 2, 8, 1, 9] {
//!     seq.insert(key, key * 100);
//! }
//!
//! // Key lookup.
//! let cursor = seq.element_at_key(8);
//! assert_eq!(cursor.value(), Ok(&800));
//!
//! // Rank walk from the front.
//! let mut cursor = seq.front();
//! assert_eq!(cursor.key(), Ok(1));
//! cursor.shift(4);
//! assert_eq!(cursor.key(), Ok(9));
//! cursor.advance();
//! assert_eq!(cursor.position(), Position::PastRear);
//!
//! seq.remove(5);
//! assert_eq!(seq.keys().collect::<Vec<_>>(), [1, 2, 8, 9]);
//! ```
//!
//! # Cursor states
//!
//! A cursor is in one of three [`Position`]s. Advancing from before-first lands on
//! the smallest key; advancing past the largest key lands past-rear, where further
//! advances do nothing. Rewinding mirrors this. Reading a key or value from a cursor
//! that is not on an element returns [`Error::NotDereferencable`] rather than a
//! sentinel.
//!
//! Cursors borrow the sequence, so it cannot be modified while a cursor is alive.
//! The one exception is [`CursorMut::remove_current`], which re-seats the cursor
//! itself.
//!
//! # Implementation
//!
//! Nodes live in a slot arena and are linked by compact handles, including a
//! parent link used for in-order stepping and bottom-up rebalancing. Every node
//! keeps its subtree height; after each insert or remove the path to the root is
//! re-measured and rotated back into AVL balance.

#![no_std]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod position;
mod raw;

pub mod sequence;

pub use error::{Error, Result};
pub use position::Position;
pub use sequence::{AvlSequence, Cursor, CursorMut};

/// The key type: a signed integer, unique within a sequence.
pub type Key = i64;
