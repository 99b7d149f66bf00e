//! Compact handle types for the segment arena.

use core::hash::Hash;
use std::fmt::Debug;

/// A sealed-by-convention trait for integer types used as **segment handles**.
///
/// Segments are not linked by pointers. They live in one arena `Vec` and refer to their
/// neighbours by index, which keeps the chain free of reference cycles and lets a deque of small
/// capacity spend 2 or 4 bytes per link instead of 8.
pub trait IndexType: Copy + Eq + Hash + Debug + 'static {
    /// Sentinel value indicating "no segment" (analogous to a null pointer).
    /// Marks both ends of the chain and the end of the free list.
    const NONE: Self;

    /// Converts this handle to a `usize` for arena access.
    fn as_usize(self) -> usize;

    /// Converts an arena slot index to this compact type.
    ///
    /// # Panics
    /// May panic in debug builds if `i` does not fit the underlying type. Deques validate their
    /// capacity against [`IndexType::MAX_HANDLES`] at construction so this never happens.
    fn from_usize(i: usize) -> Self;

    /// Number of distinct handles usable before colliding with [`IndexType::NONE`].
    const MAX_HANDLES: usize;

    /// Returns true if this is the [`IndexType::NONE`] sentinel.
    #[inline(always)]
    fn is_none(self) -> bool {
        self == Self::NONE
    }
}

macro_rules! impl_index_type {
    ($($ty:ty),*) => {
        $(
            impl IndexType for $ty {
                const NONE: Self = <$ty>::MAX;
                const MAX_HANDLES: usize = <$ty>::MAX as usize;
                #[inline(always)]
                fn as_usize(self) -> usize {
                    self as usize
                }
                #[inline(always)]
                fn from_usize(i: usize) -> Self {
                    debug_assert!(i < Self::MAX_HANDLES, "segment handle overflow");
                    i as $ty
                }
            }
        )*
    };
}

impl_index_type!(u16, u32, usize);
