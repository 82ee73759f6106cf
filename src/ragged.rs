//! Ragged containers whose line sizes are known up front.
//!
//! A ragged container is a two-dimensional collection whose lines (rows or
//! columns, depending on the [`Direction`]) may have different lengths. All
//! the lines are packed one after another into a single buffer, and an
//! [`OffsetTable`] records where each line starts.

use std::marker::{PhantomData};

use super::{Sizes, OffsetTable, Direction, Right, Down, Error, Result};
use super::error::{fail};

/// A ragged container whose line sizes are fixed at construction.
///
/// `Ragged<T, Right>` (alias [`RaggedRight`]) has rows of varying length:
/// `(i, j)` is element `j` of row `i`, and `j` must be less than
/// `stride(i)`. `Ragged<T, Down>` (alias [`RaggedDown`]) has columns of
/// varying length: `(i, j)` is element `i` of column `j`, and `i` must be
/// less than `stride(j)`.
///
/// `clone()` copies the buffer and the offset table.
///
/// ```
/// use simarrays::{RaggedRight};
/// let mut r: RaggedRight<i32> = RaggedRight::new([2, 0, 3]).unwrap();
/// assert_eq!(r.size(), 5);
/// assert_eq!(r.stride(2), 3);
/// r[(2, 1)] = 7;
/// assert_eq!(r.as_slice(), [0, 0, 0, 7, 0]);
/// assert!(r.get(0, 2).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ragged<T, D: Direction = Right> {
    table: OffsetTable,
    items: Box<[T]>,
    marker: PhantomData<D>,
}

/// A [`Ragged`] container whose lines are rows.
pub type RaggedRight<T> = Ragged<T, Right>;

/// A [`Ragged`] container whose lines are columns.
pub type RaggedDown<T> = Ragged<T, Down>;

impl<T, D: Direction> Ragged<T, D> {
    pub(crate) fn from_parts(table: OffsetTable, items: Box<[T]>) -> Self {
        assert_eq!(table.length(), items.len());
        Self {table, items, marker: PhantomData}
    }

    /// Constructs a `Ragged` with one line per entry of `strides`, filled
    /// with `T::default()`.
    ///
    /// `strides` can be a slice, a `Vec`, or a dense [`Array`] or [`View`].
    /// Fails if any stride is negative or the total length overflows.
    ///
    /// [`Array`]: super::Array
    /// [`View`]: super::View
    pub fn new(strides: impl Sizes) -> Result<Self> where T: Default {
        let table = OffsetTable::from_sizes(strides)?;
        let items = std::iter::repeat_with(T::default).take(table.length()).collect();
        log::debug!("Allocated ragged-{} container with {} lines", D::NAME, table.lines());
        Ok(Self::from_parts(table, items))
    }

    /// Constructs a `Ragged` with one line per entry of `strides`, filled
    /// with clones of `value`.
    pub fn from_elem(strides: impl Sizes, value: T) -> Result<Self> where T: Clone {
        let table = OffsetTable::from_sizes(strides)?;
        let items = vec![value; table.length()].into();
        Ok(Self::from_parts(table, items))
    }

    /// Constructs a `Ragged` with one line per entry of `strides`, given its
    /// elements line by line.
    pub fn from_vec(strides: impl Sizes, items: impl Into<Box<[T]>>) -> Result<Self> {
        let table = OffsetTable::from_sizes(strides)?;
        let items = items.into();
        if items.len() != table.length() {
            return Err(Error::LengthMismatch {expected: table.length(), got: items.len()});
        }
        Ok(Self::from_parts(table, items))
    }

    /// The number of lines.
    #[inline(always)]
    pub fn dim(&self) -> usize { self.table.lines() }

    /// The total number of elements.
    #[inline(always)]
    pub fn size(&self) -> usize { self.items.len() }

    /// The offset table.
    #[inline(always)]
    pub fn table(&self) -> &OffsetTable { &self.table }

    /// The offset table as a slice of `dim() + 1` line starts.
    #[inline(always)]
    pub fn starts(&self) -> &[usize] { self.table.starts() }

    /// The number of elements in `line`.
    ///
    /// # Panics
    ///
    /// Panics if `line` is not less than `dim()`.
    #[track_caller]
    pub fn stride(&self, line: usize) -> usize {
        self.table.stride(line).unwrap_or_else(|e| fail(e))
    }

    /// The elements of `line`.
    ///
    /// # Panics
    ///
    /// Panics if `line` is not less than `dim()`.
    #[track_caller]
    pub fn line(&self, line: usize) -> &[T] {
        let range = self.table.range(line).unwrap_or_else(|e| fail(e));
        &self.items[range]
    }

    /// The elements of `line`.
    ///
    /// # Panics
    ///
    /// Panics if `line` is not less than `dim()`.
    #[track_caller]
    pub fn line_mut(&mut self, line: usize) -> &mut [T] {
        let range = self.table.range(line).unwrap_or_else(|e| fail(e));
        &mut self.items[range]
    }

    #[inline]
    fn locate(&self, i: usize, j: usize) -> Result<usize> {
        let (line, index) = D::split(i, j);
        self.table.locate_on_axis(D::LINE_AXIS, line, index)
    }

    #[inline(always)]
    fn locate_unchecked(&self, i: usize, j: usize) -> usize {
        let (line, index) = D::split(i, j);
        self.table.locate_unchecked(line, index)
    }
}

impl_pair_access!(Ragged);

impl<T> Ragged<T, Right> {
    /// The elements of row `i`. See [`line()`](Self::line).
    #[track_caller]
    pub fn row(&self, i: usize) -> &[T] { self.line(i) }

    /// The elements of row `i`. See [`line_mut()`](Self::line_mut).
    #[track_caller]
    pub fn row_mut(&mut self, i: usize) -> &mut [T] { self.line_mut(i) }
}

impl<T> Ragged<T, Down> {
    /// The elements of column `j`. See [`line()`](Self::line).
    #[track_caller]
    pub fn column(&self, j: usize) -> &[T] { self.line(j) }

    /// The elements of column `j`. See [`line_mut()`](Self::line_mut).
    #[track_caller]
    pub fn column_mut(&mut self, j: usize) -> &mut [T] { self.line_mut(j) }
}

// ----------------------------------------------------------------------------

/// A ragged container of rows, where each element of a row is a vector of
/// fixed length `vector_dim()`.
///
/// `(i, j, k)` is component `k` of vector `j` of row `i`. The offset table
/// counts components, so a row of `s` vectors occupies `s * vector_dim()`
/// positions of the buffer.
///
/// ```
/// use simarrays::{RaggedRightOfVectors};
/// let mut r: RaggedRightOfVectors<f64> = RaggedRightOfVectors::new([1, 2], 3).unwrap();
/// assert_eq!(r.size(), 9);
/// assert_eq!(r.starts(), [0, 3, 9]);
/// assert_eq!(r.stride(1), 2);
/// r[(1, 1, 2)] = 1.5;
/// assert_eq!(r.as_slice()[8], 1.5);
/// assert!(r.get(1, 1, 3).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaggedRightOfVectors<T> {
    table: OffsetTable,
    items: Box<[T]>,
    vector_dim: usize,
}

impl<T> RaggedRightOfVectors<T> {
    pub(crate) fn from_parts(table: OffsetTable, items: Box<[T]>, vector_dim: usize) -> Self {
        assert_eq!(table.length(), items.len());
        assert!(vector_dim > 0);
        Self {table, items, vector_dim}
    }

    /// Constructs a `RaggedRightOfVectors` with one row per entry of
    /// `strides`, where row `i` holds `strides[i]` vectors of length
    /// `vector_dim`, filled with `T::default()`.
    ///
    /// Fails if `vector_dim` is zero, if any stride is negative, or if the
    /// total length overflows.
    pub fn new(strides: impl Sizes, vector_dim: usize) -> Result<Self> where T: Default {
        if vector_dim == 0 {
            return Err(Error::ZeroVectorDim);
        }
        let table = OffsetTable::from_scaled_sizes(strides, vector_dim)?;
        let items = std::iter::repeat_with(T::default).take(table.length()).collect();
        Ok(Self::from_parts(table, items, vector_dim))
    }

    /// The number of rows.
    #[inline(always)]
    pub fn dim(&self) -> usize { self.table.lines() }

    /// The length of each vector.
    #[inline(always)]
    pub fn vector_dim(&self) -> usize { self.vector_dim }

    /// The total number of components of all vectors.
    #[inline(always)]
    pub fn size(&self) -> usize { self.items.len() }

    /// The offset table, counting components.
    #[inline(always)]
    pub fn starts(&self) -> &[usize] { self.table.starts() }

    /// The number of vectors in `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not less than `dim()`.
    #[track_caller]
    pub fn stride(&self, row: usize) -> usize {
        self.table.stride(row).unwrap_or_else(|e| fail(e)) / self.vector_dim
    }

    /// The components of vector `j` of row `i`, or an error if `(i, j)` is
    /// out of bounds.
    pub fn vector(&self, i: usize, j: usize) -> Result<&[T]> {
        let start = self.locate(i, j, 0)?;
        Ok(&self.items[start..start + self.vector_dim])
    }

    /// The components of vector `j` of row `i`, or an error if `(i, j)` is
    /// out of bounds.
    pub fn vector_mut(&mut self, i: usize, j: usize) -> Result<&mut [T]> {
        let start = self.locate(i, j, 0)?;
        Ok(&mut self.items[start..start + self.vector_dim])
    }

    /// Returns component `k` of vector `j` of row `i`, or fails if it is out
    /// of bounds.
    pub fn get(&self, i: usize, j: usize, k: usize) -> Result<&T> {
        let n = self.locate(i, j, k)?;
        Ok(&self.items[n])
    }

    /// Returns component `k` of vector `j` of row `i`, or fails if it is out
    /// of bounds.
    pub fn get_mut(&mut self, i: usize, j: usize, k: usize) -> Result<&mut T> {
        let n = self.locate(i, j, k)?;
        Ok(&mut self.items[n])
    }

    /// Returns component `k` of vector `j` of row `i` without checking the
    /// bounds.
    ///
    /// # Safety
    ///
    /// `get(i, j, k)` must succeed.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, i: usize, j: usize, k: usize) -> &T {
        let n = self.table.locate_unchecked(i, j * self.vector_dim + k);
        self.items.get_unchecked(n)
    }

    /// Returns component `k` of vector `j` of row `i` without checking the
    /// bounds.
    ///
    /// # Safety
    ///
    /// `get(i, j, k)` must succeed.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, i: usize, j: usize, k: usize) -> &mut T {
        let n = self.table.locate_unchecked(i, j * self.vector_dim + k);
        self.items.get_unchecked_mut(n)
    }

    /// The whole buffer.
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] { &self.items }

    /// The whole buffer.
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] { &mut self.items }

    fn locate(&self, i: usize, j: usize, k: usize) -> Result<usize> {
        let v = self.vector_dim;
        if k >= v {
            return Err(Error::IndexOutOfBounds {axis: 2, index: k, extent: v});
        }
        let stride = self.table.stride(i)? / v;
        if j >= stride {
            return Err(Error::StrideOutOfBounds {line: i, index: j, stride});
        }
        Ok(self.table.locate_unchecked(i, j * v + k))
    }
}

impl<T> std::ops::Index<(usize, usize, usize)> for RaggedRightOfVectors<T> {
    type Output = T;
    #[track_caller]
    fn index(&self, (i, j, k): (usize, usize, usize)) -> &T {
        self.get(i, j, k).unwrap_or_else(|e| fail(e))
    }
}

impl<T> std::ops::IndexMut<(usize, usize, usize)> for RaggedRightOfVectors<T> {
    #[track_caller]
    fn index_mut(&mut self, (i, j, k): (usize, usize, usize)) -> &mut T {
        self.get_mut(i, j, k).unwrap_or_else(|e| fail(e))
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Array, View, ErrorKind};

    #[test]
    fn strides_match_sizes() {
        let sizes = [3usize, 0, 1, 4];
        let r: RaggedRight<u8> = RaggedRight::new(sizes).unwrap();
        assert_eq!(r.dim(), 4);
        for (i, &s) in sizes.iter().enumerate() {
            assert_eq!(r.stride(i), s);
            assert_eq!(r.line(i).len(), s);
        }
        assert_eq!(r.size(), sizes.iter().sum::<usize>());
    }

    #[test]
    fn input_forms_agree() {
        let raw = [2usize, 5, 1];
        let a: Array<usize> = Array::from_vec(&[3], raw.to_vec()).unwrap();
        let mut buffer = raw;
        let v: View<usize> = View::new(&mut buffer, &[3]).unwrap();
        let from_raw: RaggedDown<i32> = RaggedDown::new(&raw[..]).unwrap();
        let from_array: RaggedDown<i32> = RaggedDown::new(&a).unwrap();
        let from_view: RaggedDown<i32> = RaggedDown::new(&v).unwrap();
        assert_eq!(from_raw.starts(), from_array.starts());
        assert_eq!(from_raw.starts(), from_view.starts());
        assert_eq!(from_raw.starts(), [0, 2, 7, 8]);
    }

    #[test]
    fn right_bounds() {
        let r: RaggedRight<i32> = RaggedRight::new([2, 2]).unwrap();
        // (0, 2) would land on (1, 0) if only the buffer length were checked.
        assert_eq!(r.get(0, 2), Err(Error::StrideOutOfBounds {line: 0, index: 2, stride: 2}));
        assert_eq!(r.get(2, 0), Err(Error::IndexOutOfBounds {axis: 0, index: 2, extent: 2}));
        assert!(r.get(1, 1).is_ok());
    }

    #[test]
    fn down_layout() {
        let mut r: RaggedDown<i32> = RaggedDown::new([1, 3]).unwrap();
        r[(0, 0)] = 1;
        r[(0, 1)] = 2;
        r[(2, 1)] = 4;
        assert_eq!(r.as_slice(), [1, 2, 0, 4]);
        assert_eq!(r.column(1), [2, 0, 4]);
        assert_eq!(r.get(1, 0), Err(Error::StrideOutOfBounds {line: 0, index: 1, stride: 1}));
        assert_eq!(r.get(0, 2), Err(Error::IndexOutOfBounds {axis: 1, index: 2, extent: 2}));
    }

    #[test]
    fn deep_copy() {
        let mut a: RaggedRight<i32> = RaggedRight::from_elem([1, 2], 3).unwrap();
        let b = a.clone();
        a[(1, 1)] = 0;
        assert_eq!(b.as_slice(), [3, 3, 3]);
        assert_ne!(a, b);
    }

    #[test]
    fn from_vec() {
        let r: RaggedRight<char> = RaggedRight::from_vec([1, 2], vec!['a', 'b', 'c']).unwrap();
        assert_eq!(r[(1, 0)], 'b');
        assert_eq!(
            RaggedRight::<char>::from_vec([1, 2], vec!['a']).unwrap_err(),
            Error::LengthMismatch {expected: 3, got: 1},
        );
    }

    #[test]
    fn negative_stride() {
        let e = RaggedRight::<f32>::new([1i64, -1]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::OffsetTableInconsistency);
    }

    #[test]
    fn unchecked() {
        let mut r: RaggedRight<i32> = RaggedRight::new([1, 2]).unwrap();
        unsafe { *r.get_unchecked_mut(1, 1) = 5; }
        assert_eq!(unsafe { *r.get_unchecked(1, 1) }, 5);
        assert_eq!(r.at(1, 1), &5);
    }

    #[test]
    fn vectors() {
        let mut r: RaggedRightOfVectors<i32> = RaggedRightOfVectors::new(vec![2, 0, 1], 2).unwrap();
        assert_eq!(r.stride(0), 2);
        assert_eq!(r.stride(1), 0);
        r.vector_mut(0, 1).unwrap().copy_from_slice(&[7, 8]);
        r[(2, 0, 0)] = 9;
        assert_eq!(r.as_slice(), [0, 0, 7, 8, 9, 0]);
        assert_eq!(r.vector(0, 1).unwrap(), [7, 8]);
        assert_eq!(r.get(0, 2, 0), Err(Error::StrideOutOfBounds {line: 0, index: 2, stride: 2}));
        assert_eq!(r.get(1, 0, 0), Err(Error::StrideOutOfBounds {line: 1, index: 0, stride: 0}));
        assert_eq!(r.get(0, 0, 2), Err(Error::IndexOutOfBounds {axis: 2, index: 2, extent: 2}));
        assert_eq!(RaggedRightOfVectors::<i32>::new([1], 0).unwrap_err(), Error::ZeroVectorDim);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_panics() {
        let r: RaggedDown<i32> = RaggedDown::new([1]).unwrap();
        let _ = r[(1, 0)];
    }
}
