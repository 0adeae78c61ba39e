use core::fmt;
use core::num::NonZero;

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Index of a node slot in the tree's arena.
///
/// Stored off-by-one in a `NonZero` so that `Option<Handle>` (used for every
/// child and parent link) is the same size as the handle itself.
#[derive(Clone, Copy, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    /// The largest slot index a handle can address.
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    /// Returns the handle for slot `index`, or `None` if the handle space is exhausted.
    #[inline]
    pub(crate) fn try_from_index(index: usize) -> Option<Self> {
        if index > Self::MAX {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        NonZero::new((index + 1) as RawHandle).map(Self)
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_index())
    }
}
