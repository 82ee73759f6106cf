use super::{Index, Layout, Origin, Error, Result, MAX_ORDER};

/// The extents of a dense container of order 1 to [`MAX_ORDER`].
///
/// Axes past [`Shape::order()`] report an extent of 1, so that a shape of
/// order 2 behaves like a shape of order 7 with five trailing unit axes.
///
/// ```
/// use simarrays::{Shape};
/// let s = Shape::new(&[3, 4]).unwrap();
/// assert_eq!(s.order(), 2);
/// assert_eq!(s.length(), 12);
/// assert_eq!(s.dims(1), 4);
/// assert_eq!(s.dims(5), 1);
/// ```
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct Shape {
    dims: [usize; MAX_ORDER],
    order: usize,
    length: usize,
}

impl Shape {
    /// Constructs a `Shape` with one axis per entry of `dims`.
    ///
    /// Fails if `dims` is empty or has more than [`MAX_ORDER`] entries, or if
    /// the product of the extents does not fit in a `usize`.
    pub fn new(dims: &[usize]) -> Result<Self> {
        let order = dims.len();
        if order == 0 || order > MAX_ORDER {
            return Err(Error::InvalidOrder {order});
        }
        let length = dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| Error::LengthOverflow {dims: dims.to_vec()})?;
        let mut padded = [1; MAX_ORDER];
        padded[..order].copy_from_slice(dims);
        Ok(Self {dims: padded, order, length})
    }

    /// The number of axes.
    #[inline(always)]
    pub fn order(&self) -> usize { self.order }

    /// The extent of axis `i`. Axes in `order()..MAX_ORDER` have extent 1.
    ///
    /// Panics if `i` is not less than [`MAX_ORDER`].
    #[inline(always)]
    pub fn dims(&self, i: usize) -> usize { self.dims[i] }

    /// The extents of the first `order()` axes.
    #[inline(always)]
    pub fn as_slice(&self) -> &[usize] { &self.dims[..self.order] }

    /// The number of elements, i.e. the product of the extents.
    #[inline(always)]
    pub fn length(&self) -> usize { self.length }

    /// The distance in a flat buffer between neighbours along each axis,
    /// under layout `L`. Entries past `order()` are zero.
    pub fn strides<L: Layout>(&self) -> [usize; MAX_ORDER] {
        L::strides(self.as_slice())
    }

    /// Returns the position of `index` in a flat buffer with layout `L`,
    /// where coordinates count from `O::FIRST`.
    ///
    /// Fails if `index` has the wrong number of coordinates, or if any
    /// coordinate is out of range.
    ///
    /// ```
    /// use simarrays::{Shape, RowMajor, ColMajor, ZeroBased, OneBased};
    /// let s = Shape::new(&[2, 3]).unwrap();
    /// assert_eq!(s.offset::<RowMajor, ZeroBased>((1, 2)), Ok(5));
    /// assert_eq!(s.offset::<ColMajor, ZeroBased>((1, 2)), Ok(5));
    /// assert_eq!(s.offset::<RowMajor, OneBased>((1, 2)), Ok(1));
    /// assert!(s.offset::<RowMajor, ZeroBased>((2, 0)).is_err());
    /// assert!(s.offset::<RowMajor, ZeroBased>(1).is_err());
    /// ```
    #[inline]
    pub fn offset<L: Layout, O: Origin>(&self, index: impl Index) -> Result<usize> {
        let got = index.arity();
        if got != self.order {
            return Err(Error::RankMismatch {expected: self.order, got});
        }
        for axis in 0..self.order {
            let i = index.coord(axis);
            let extent = self.dims[axis];
            if O::to_zero_based(i, extent).is_none() {
                return Err(Error::IndexOutOfBounds {axis, index: i, extent});
            }
        }
        Ok(self.offset_unchecked::<L, O>(index))
    }

    /// Like [`offset()`], but without validating `index`.
    ///
    /// The result is meaningless, but not unsafe, if `index` is invalid.
    ///
    /// [`offset()`]: Self::offset
    #[inline(always)]
    pub fn offset_unchecked<L: Layout, O: Origin>(&self, index: impl Index) -> usize {
        L::offset(self.as_slice(), |d| index.coord(d).wrapping_sub(O::FIRST))
    }

    /// Calls `f` with the coordinates of every element, in the order that
    /// the elements are stored under layout `L`. Coordinates count from
    /// `O::FIRST`, and entries past `order()` are zero.
    pub fn each<L: Layout, O: Origin>(&self, mut f: impl FnMut([usize; MAX_ORDER])) {
        for offset in 0..self.length {
            let mut coords = L::coords(self.as_slice(), offset);
            for c in &mut coords[..self.order] { *c += O::FIRST; }
            f(coords);
        }
    }
}

impl TryFrom<&[usize]> for Shape {
    type Error = Error;
    fn try_from(dims: &[usize]) -> Result<Self> { Self::new(dims) }
}

impl<const N: usize> TryFrom<[usize; N]> for Shape {
    type Error = Error;
    fn try_from(dims: [usize; N]) -> Result<Self> { Self::new(&dims) }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RowMajor, ColMajor, ZeroBased, OneBased};

    #[test]
    fn invalid_orders() {
        assert_eq!(Shape::new(&[]), Err(Error::InvalidOrder {order: 0}));
        assert_eq!(Shape::new(&[1; 8]), Err(Error::InvalidOrder {order: 8}));
        assert!(Shape::new(&[1; 7]).is_ok());
    }

    #[test]
    fn overflow() {
        assert!(matches!(Shape::new(&[usize::MAX, 2]), Err(Error::LengthOverflow {..})));
    }

    #[test]
    fn trailing_dims() {
        let s = Shape::new(&[5]).unwrap();
        assert_eq!(s.as_slice(), [5]);
        for i in 1..MAX_ORDER { assert_eq!(s.dims(i), 1); }
    }

    #[test]
    fn zero_extent() {
        let s = Shape::new(&[3, 0]).unwrap();
        assert_eq!(s.length(), 0);
        assert!(s.offset::<RowMajor, ZeroBased>((0, 0)).is_err());
        let mut count = 0;
        s.each::<RowMajor, ZeroBased>(|_| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn rank_mismatch() {
        let s = Shape::new(&[2, 2, 2]).unwrap();
        assert_eq!(s.offset::<ColMajor, ZeroBased>((1, 1)), Err(Error::RankMismatch {expected: 3, got: 2}));
        assert_eq!(s.offset::<ColMajor, ZeroBased>([0, 0, 0, 0]), Err(Error::RankMismatch {expected: 3, got: 4}));
    }

    #[test]
    fn one_based_bounds() {
        let s = Shape::new(&[2, 3]).unwrap();
        assert_eq!(
            s.offset::<ColMajor, OneBased>((0, 1)),
            Err(Error::IndexOutOfBounds {axis: 0, index: 0, extent: 2}),
        );
        assert_eq!(s.offset::<ColMajor, OneBased>((2, 3)), Ok(5));
        assert!(s.offset::<ColMajor, OneBased>((2, 4)).is_err());
    }

    #[test]
    fn each_visits_storage_order() {
        let s = Shape::new(&[2, 3]).unwrap();
        let mut offsets = Vec::new();
        s.each::<ColMajor, OneBased>(|c| offsets.push(s.offset::<ColMajor, OneBased>(&c[..2]).unwrap()));
        assert_eq!(offsets, [0, 1, 2, 3, 4, 5]);
    }
}
