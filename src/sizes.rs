//! Sources of per-line sizes for building offset tables.
//!
//! The ragged and sparse containers are constructed from a sequence of
//! line sizes. Any [`Sizes`] can supply the sequence: slices, `Vec`s,
//! fixed-size arrays, and the dense [`Array`]s and [`View`]s of this crate.
//! The items may be of any integer type that implements [`Extent`]; negative
//! items are rejected when the table is built.

use std::fmt::{Debug};

use super::{Array, View, Layout, Origin};

/// An integer that can be used as the size of one line of a ragged
/// container.
pub trait Extent: Copy + Debug {
    /// Returns `self` as a `usize`, or `None` if it is negative or too large.
    fn to_extent(self) -> Option<usize>;
}

macro_rules! impl_extent {
    ($($t:ty),*) => {
        $(
            impl Extent for $t {
                #[inline(always)]
                fn to_extent(self) -> Option<usize> { usize::try_from(self).ok() }
            }
        )*
    };
}

impl_extent!(usize, u8, u16, u32, u64, u128, isize, i8, i16, i32, i64, i128);

// ----------------------------------------------------------------------------

/// A sequence of line sizes.
///
/// ```
/// use simarrays::{Sizes};
/// let mut total = 0;
/// [3usize, 1, 4].each(|s| total += s);
/// assert_eq!(total, 8);
/// assert_eq!(vec![2u32, 7].count(), 2);
/// ```
pub trait Sizes {
    /// The type of each size.
    type Item: Extent;

    /// The number of sizes, i.e. the number of lines.
    fn count(&self) -> usize;

    /// Calls `f` with each size in turn.
    fn each(&self, f: impl FnMut(Self::Item));
}

impl<E: Extent> Sizes for [E] {
    type Item = E;
    fn count(&self) -> usize { self.len() }
    fn each(&self, f: impl FnMut(Self::Item)) { self.iter().copied().for_each(f) }
}

impl<E: Extent, const N: usize> Sizes for [E; N] {
    type Item = E;
    fn count(&self) -> usize { N }
    fn each(&self, f: impl FnMut(Self::Item)) { self.iter().copied().for_each(f) }
}

impl<E: Extent> Sizes for Vec<E> {
    type Item = E;
    fn count(&self) -> usize { self.len() }
    fn each(&self, f: impl FnMut(Self::Item)) { self.iter().copied().for_each(f) }
}

impl<S: Sizes + ?Sized> Sizes for &S {
    type Item = S::Item;
    fn count(&self) -> usize { S::count(self) }
    fn each(&self, f: impl FnMut(Self::Item)) { S::each(self, f) }
}

/// The sizes are the elements of the array, in storage order.
impl<E: Extent, L: Layout, O: Origin> Sizes for Array<E, L, O> {
    type Item = E;
    fn count(&self) -> usize { self.size() }
    fn each(&self, f: impl FnMut(Self::Item)) { self.borrow().iter().copied().for_each(f) }
}

/// The sizes are the elements of the view, in storage order.
impl<'a, E: Extent, L: Layout, O: Origin> Sizes for View<'a, E, L, O> {
    type Item = E;
    fn count(&self) -> usize { self.size() }
    fn each(&self, f: impl FnMut(Self::Item)) { self.as_slice().iter().copied().for_each(f) }
}

// ----------------------------------------------------------------------------
