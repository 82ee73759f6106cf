//! Strategies for mapping a tuple of coordinates to a position in a flat
//! buffer.
//!
//! A dense container is parameterised by two tags: a [`Layout`], which says
//! which coordinate varies fastest, and an [`Origin`], which says whether
//! coordinates count from 0 or from 1. A ragged container is parameterised by
//! a [`Direction`], which says whether its variable-length lines are rows or
//! columns. The tags are types that cannot be instantiated, so that generic
//! code can be specialised on them at compile-time.

use super::{MAX_ORDER};

/// Maps zero-based, in-range coordinates to a position in a flat buffer.
///
/// This trait has no methods that take `self`. It makes sense to implement it
/// for types that cannot be instantiated, such as empty enumerations.
pub trait Layout: 'static {
    /// A short human-readable name, used in log messages.
    const NAME: &'static str;

    /// Returns the position of the element whose coordinate on axis `d` is
    /// `coord(d)`, in an array whose extents are `dims`.
    ///
    /// The coordinates must already be validated; the result is in
    /// `0..dims.iter().product()`.
    fn offset(dims: &[usize], coord: impl Fn(usize) -> usize) -> usize;

    /// Inverse of [`offset()`]: the coordinates of position `offset`.
    ///
    /// Entries past `dims.len()` are zero. `offset` must be less than the
    /// product of `dims`.
    ///
    /// [`offset()`]: Layout::offset
    fn coords(dims: &[usize], offset: usize) -> [usize; MAX_ORDER];

    /// The distance in the flat buffer between neighbours along each axis.
    ///
    /// Entries past `dims.len()` are zero.
    fn strides(dims: &[usize]) -> [usize; MAX_ORDER];
}

// ----------------------------------------------------------------------------

/// The last coordinate varies fastest ("C order").
///
/// `offset = i[N-1] + i[N-2]*dims[N-1] + ... + i[0]*dims[1]*...*dims[N-1]`.
pub enum RowMajor {}

impl Layout for RowMajor {
    const NAME: &'static str = "row-major";

    #[inline(always)]
    fn offset(dims: &[usize], coord: impl Fn(usize) -> usize) -> usize {
        let mut index = 0;
        for (d, &dim) in dims.iter().enumerate() {
            index = index * dim + coord(d);
        }
        index
    }

    fn coords(dims: &[usize], offset: usize) -> [usize; MAX_ORDER] {
        let mut ret = [0; MAX_ORDER];
        let mut index = offset;
        for (d, &dim) in dims.iter().enumerate().rev() {
            ret[d] = index % dim;
            index /= dim;
        }
        ret
    }

    fn strides(dims: &[usize]) -> [usize; MAX_ORDER] {
        let mut ret = [0; MAX_ORDER];
        let mut stride = 1;
        for (d, &dim) in dims.iter().enumerate().rev() {
            ret[d] = stride;
            stride *= dim;
        }
        ret
    }
}

// ----------------------------------------------------------------------------

/// The first coordinate varies fastest ("Fortran order").
///
/// `offset = i[0] + i[1]*dims[0] + ... + i[N-1]*dims[0]*...*dims[N-2]`.
pub enum ColMajor {}

impl Layout for ColMajor {
    const NAME: &'static str = "column-major";

    #[inline(always)]
    fn offset(dims: &[usize], coord: impl Fn(usize) -> usize) -> usize {
        let mut index = 0;
        for (d, &dim) in dims.iter().enumerate().rev() {
            index = index * dim + coord(d);
        }
        index
    }

    fn coords(dims: &[usize], offset: usize) -> [usize; MAX_ORDER] {
        let mut ret = [0; MAX_ORDER];
        let mut index = offset;
        for (d, &dim) in dims.iter().enumerate() {
            ret[d] = index % dim;
            index /= dim;
        }
        ret
    }

    fn strides(dims: &[usize]) -> [usize; MAX_ORDER] {
        let mut ret = [0; MAX_ORDER];
        let mut stride = 1;
        for (d, &dim) in dims.iter().enumerate() {
            ret[d] = stride;
            stride *= dim;
        }
        ret
    }
}

// ----------------------------------------------------------------------------

/// Says whether user-facing coordinates count from 0 or from 1.
pub trait Origin: 'static {
    /// The smallest valid coordinate.
    const FIRST: usize;

    /// Converts `index` to a zero-based coordinate, or returns `None` if it
    /// is out of range for an axis of extent `extent`.
    #[inline(always)]
    fn to_zero_based(index: usize, extent: usize) -> Option<usize> {
        index.checked_sub(Self::FIRST).filter(|&i| i < extent)
    }
}

/// Coordinates are in `0..extent`. Used by arrays.
pub enum ZeroBased {}

impl Origin for ZeroBased {
    const FIRST: usize = 0;
}

/// Coordinates are in `1..=extent`. Used by matrices.
pub enum OneBased {}

impl Origin for OneBased {
    const FIRST: usize = 1;
}

// ----------------------------------------------------------------------------

/// Says which coordinate of a ragged container selects a line.
///
/// Every ragged container is indexed by `(i, j)`. Its lines are either rows,
/// selected by `i` ([`Right`]), or columns, selected by `j` ([`Down`]).
pub trait Direction: 'static {
    /// A short human-readable name, used in log messages.
    const NAME: &'static str;

    /// The axis of `(i, j)` that selects a line.
    const LINE_AXIS: usize;

    /// Splits `(i, j)` into a line and a position within that line.
    fn split(i: usize, j: usize) -> (usize, usize);
}

/// Lines are rows that extend to the right: `(i, j)` is element `j` of line
/// `i`.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum Right {}

impl Direction for Right {
    const NAME: &'static str = "right";
    const LINE_AXIS: usize = 0;
    #[inline(always)]
    fn split(i: usize, j: usize) -> (usize, usize) { (i, j) }
}

/// Lines are columns that extend downwards: `(i, j)` is element `i` of line
/// `j`.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum Down {}

impl Direction for Down {
    const NAME: &'static str = "down";
    const LINE_AXIS: usize = 1;
    #[inline(always)]
    fn split(i: usize, j: usize) -> (usize, usize) { (j, i) }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major() {
        let dims = [2, 3, 4];
        let c = [1, 2, 3];
        assert_eq!(RowMajor::offset(&dims, |d| c[d]), 3 + 2 * 4 + 1 * 4 * 3);
        assert_eq!(RowMajor::strides(&dims)[..3], [12, 4, 1]);
        assert_eq!(RowMajor::coords(&dims, 23)[..3], c);
    }

    #[test]
    fn col_major() {
        let dims = [2, 3, 4];
        let c = [1, 2, 3];
        assert_eq!(ColMajor::offset(&dims, |d| c[d]), 1 + 2 * 2 + 3 * 2 * 3);
        assert_eq!(ColMajor::strides(&dims)[..3], [1, 2, 6]);
        assert_eq!(ColMajor::coords(&dims, 23)[..3], c);
    }

    #[test]
    fn strides_agree_with_offset() {
        let dims = [3, 1, 5, 2];
        let rs = RowMajor::strides(&dims);
        let cs = ColMajor::strides(&dims);
        let c = [2, 0, 4, 1];
        let dot = |s: &[usize; MAX_ORDER]| (0..4).map(|d| s[d] * c[d]).sum::<usize>();
        assert_eq!(RowMajor::offset(&dims, |d| c[d]), dot(&rs));
        assert_eq!(ColMajor::offset(&dims, |d| c[d]), dot(&cs));
    }

    #[test]
    fn directions() {
        assert_eq!(Right::split(2, 5), (2, 5));
        assert_eq!(Down::split(2, 5), (5, 2));
        assert_eq!(Right::LINE_AXIS, 0);
        assert_eq!(Down::LINE_AXIS, 1);
    }

    #[test]
    fn origins() {
        assert_eq!(ZeroBased::to_zero_based(0, 3), Some(0));
        assert_eq!(ZeroBased::to_zero_based(3, 3), None);
        assert_eq!(OneBased::to_zero_based(0, 3), None);
        assert_eq!(OneBased::to_zero_based(1, 3), Some(0));
        assert_eq!(OneBased::to_zero_based(3, 3), Some(2));
        assert_eq!(OneBased::to_zero_based(4, 3), None);
    }
}
