use std::fmt::{self, Debug};
use std::marker::{PhantomData};

use super::{Index, Shape, Layout, RowMajor, Origin, ZeroBased, Error, Result};
use super::error::{fail};

/// A dense multi-dimensional window onto memory owned by someone else.
///
/// A `View` pairs a [`Shape`] with a borrowed `&mut [T]`. It never allocates
/// or frees, and it cannot outlive the memory it borrows. Element access uses
/// exactly the same formulas as [`Array`], so a `View` and an `Array` of the
/// same shape, layout and origin agree about where every element lives.
///
/// ```
/// use simarrays::{View, ColMajor};
/// let mut buffer = [0.0; 6];
/// let mut v: View<f32, ColMajor> = View::new(&mut buffer, &[2, 3]).unwrap();
/// v[(1, 2)] = 4.0;
/// assert_eq!(buffer[5], 4.0);
/// ```
///
/// [`Array`]: super::Array
pub struct View<'a, T, L: Layout = RowMajor, O: Origin = ZeroBased> {
    shape: Shape,
    items: &'a mut [T],
    marker: PhantomData<(L, O)>,
}

impl<'a, T, L: Layout, O: Origin> View<'a, T, L, O> {
    pub(crate) fn from_parts(shape: Shape, items: &'a mut [T]) -> Self {
        debug_assert_eq!(shape.length(), items.len());
        Self {shape, items, marker: PhantomData}
    }

    /// Constructs a `View` with extents `dims` onto the first elements of
    /// `items`.
    ///
    /// Fails if `dims` is not a valid shape or if `items` is shorter than the
    /// product of `dims`. Any excess elements of `items` are not part of the
    /// view.
    pub fn new(items: &'a mut [T], dims: &[usize]) -> Result<Self> {
        let shape = Shape::new(dims)?;
        let needed = shape.length();
        if items.len() < needed {
            return Err(Error::BufferTooSmall {needed, got: items.len()});
        }
        Ok(Self::from_parts(shape, &mut items[..needed]))
    }

    /// Returns a shorter-lived `View` of the same elements.
    pub fn reborrow(&mut self) -> View<'_, T, L, O> {
        View::from_parts(self.shape, self.items)
    }

    /// Returns the viewed elements, in storage order.
    pub fn into_slice(self) -> &'a mut [T] { self.items }

    #[inline(always)]
    pub fn shape(&self) -> &Shape { &self.shape }

    /// The extent of axis `i`. See [`Shape::dims()`].
    #[inline(always)]
    pub fn dims(&self, i: usize) -> usize { self.shape.dims(i) }

    /// The number of axes.
    #[inline(always)]
    pub fn order(&self) -> usize { self.shape.order() }

    /// The number of elements.
    #[inline(always)]
    pub fn size(&self) -> usize { self.shape.length() }

    /// The viewed elements, in storage order.
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] { self.items }

    /// The viewed elements, in storage order.
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] { self.items }

    /// Returns the element at `index`, or fails if `index` is invalid.
    #[inline]
    pub fn get(&self, index: impl Index) -> Result<&T> {
        let i = self.shape.offset::<L, O>(index)?;
        Ok(&self.items[i])
    }

    /// Returns the element at `index`, or fails if `index` is invalid.
    #[inline]
    pub fn get_mut(&mut self, index: impl Index) -> Result<&mut T> {
        let i = self.shape.offset::<L, O>(index)?;
        Ok(&mut self.items[i])
    }

    /// Returns the element at `index` without checking it.
    ///
    /// # Safety
    ///
    /// `index` must have `order()` coordinates, each in range for its axis.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: impl Index) -> &T {
        let i = self.shape.offset_unchecked::<L, O>(index);
        self.items.get_unchecked(i)
    }

    /// Returns the element at `index` without checking it.
    ///
    /// # Safety
    ///
    /// `index` must have `order()` coordinates, each in range for its axis.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: impl Index) -> &mut T {
        let i = self.shape.offset_unchecked::<L, O>(index);
        self.items.get_unchecked_mut(i)
    }

    /// Overwrites every element with a clone of `value`.
    pub fn fill(&mut self, value: T) where T: Clone {
        self.items.fill(value);
    }
}

impl<'a, T, L: Layout, O: Origin, I: Index> std::ops::Index<I> for View<'a, T, L, O> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: I) -> &T {
        match self.shape.offset::<L, O>(index) {
            Ok(i) => &self.items[i],
            Err(e) => fail(e),
        }
    }
}

impl<'a, T, L: Layout, O: Origin, I: Index> std::ops::IndexMut<I> for View<'a, T, L, O> {
    #[track_caller]
    fn index_mut(&mut self, index: I) -> &mut T {
        match self.shape.offset::<L, O>(index) {
            Ok(i) => &mut self.items[i],
            Err(e) => fail(e),
        }
    }
}

impl<'a, T: Debug, L: Layout, O: Origin> Debug for View<'a, T, L, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("layout", &L::NAME)
            .field("first", &O::FIRST)
            .field("dims", &self.shape.as_slice())
            .field("items", &self.items)
            .finish()
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColMajor, OneBased, Array};

    #[test]
    fn too_small() {
        let mut buffer = [0u8; 5];
        assert_eq!(
            View::<u8>::new(&mut buffer, &[2, 3]).unwrap_err(),
            Error::BufferTooSmall {needed: 6, got: 5},
        );
    }

    #[test]
    fn prefix() {
        let mut buffer = [1, 2, 3, 4, 5];
        let v: View<i32> = View::new(&mut buffer, &[2, 2]).unwrap();
        assert_eq!(v.as_slice(), [1, 2, 3, 4]);
        assert_eq!(v[(1, 1)], 4);
    }

    #[test]
    fn one_based() {
        let mut buffer: Vec<i32> = (0..12).collect();
        let v: View<i32, ColMajor, OneBased> = View::new(&mut buffer, &[3, 4]).unwrap();
        assert_eq!(v[(1, 1)], 0);
        assert_eq!(v[(3, 1)], 2);
        assert_eq!(v[(1, 2)], 3);
        assert_eq!(v[(3, 4)], 11);
        assert!(v.get((0, 1)).is_err());
        assert!(v.get((4, 1)).is_err());
    }

    #[test]
    fn agrees_with_array() {
        let a: Array<usize> = Array::from_fn(&[2, 3, 2], |c| c[0] * 100 + c[1] * 10 + c[2]).unwrap();
        let mut raw = a.borrow().to_vec();
        let v: View<usize> = View::new(&mut raw, &[2, 3, 2]).unwrap();
        a.shape().each::<RowMajor, ZeroBased>(|c| {
            assert_eq!(v[&c[..3]], *a.at(&c[..3]));
        });
    }

    #[test]
    fn unchecked() {
        let mut buffer = [0u16; 8];
        let mut v: View<u16, ColMajor> = View::new(&mut buffer, &[2, 2, 2]).unwrap();
        unsafe { *v.get_unchecked_mut((1, 0, 1)) = 3; }
        assert_eq!(unsafe { *v.get_unchecked((1, 0, 1)) }, 3);
        assert_eq!(buffer[5], 3);
    }

    #[test]
    fn reborrow() {
        let mut buffer = [0u8; 3];
        let mut v: View<u8> = View::new(&mut buffer, &[3]).unwrap();
        v.reborrow()[2] = 1;
        v.reborrow().fill(4);
        assert_eq!(v.into_slice(), [4, 4, 4]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_out_of_bounds() {
        let mut buffer = [0u8; 6];
        let v: View<u8> = View::new(&mut buffer, &[2, 3]).unwrap();
        let _ = v[(0, 3)];
    }
}
