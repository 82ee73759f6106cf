//! Compressed sparse rows and columns.
//!
//! A sparse container is a [`Ragged`] container of values with a parallel
//! buffer of companion indices. In a [`SparseRow`], line `i` lists the
//! non-zero entries of row `i`, and the companion index of each entry is its
//! column. In a [`SparseCol`], line `j` lists the entries of column `j`, and
//! the companion index of each is its row.
//!
//! [`Ragged`]: super::Ragged

use std::marker::{PhantomData};

use super::{Sizes, OffsetTable, Direction, Right, Down, Error, Result};
use super::error::{fail};

/// Values and companion indices packed by line.
///
/// `(i, j)` addresses an entry exactly as in [`Ragged<T, D>`]: with
/// [`Right`] it is entry `j` of row `i`, and with [`Down`] it is entry `i`
/// of column `j`. It does not address a position in the logical matrix; use
/// [`find()`] for that.
///
/// ```
/// use simarrays::{SparseRow};
/// let mut s: SparseRow<f64> = SparseRow::new([2, 1]).unwrap();
/// *s.value_mut(0, 0) = 1.5;
/// *s.column_index_mut(0, 0) = 3;
/// *s.value_mut(0, 1) = 2.5;
/// *s.column_index_mut(0, 1) = 7;
/// assert_eq!(s.row(0), (&[3, 7][..], &[1.5, 2.5][..]));
/// assert_eq!(s.find(0, 7), Some(&2.5));
/// assert_eq!(s.find(0, 4), None);
/// ```
///
/// [`Ragged<T, D>`]: super::Ragged
/// [`find()`]: Self::find
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sparse<T, D: Direction = Right> {
    table: OffsetTable,
    items: Box<[T]>,
    indices: Box<[usize]>,
    marker: PhantomData<D>,
}

/// Compressed sparse rows. Each entry records its column.
pub type SparseRow<T> = Sparse<T, Right>;

/// Compressed sparse columns. Each entry records its row.
pub type SparseCol<T> = Sparse<T, Down>;

impl<T, D: Direction> Sparse<T, D> {
    /// Constructs a `Sparse` with `strides[k]` entries in line `k`. Values
    /// are `T::default()` and companion indices are zero.
    pub fn new(strides: impl Sizes) -> Result<Self> where T: Default {
        let table = OffsetTable::from_sizes(strides)?;
        let items = std::iter::repeat_with(T::default).take(table.length()).collect();
        let indices = vec![0; table.length()].into();
        log::debug!("Allocated sparse-{} container with {} entries", D::NAME, table.length());
        Ok(Self {table, items, indices, marker: PhantomData})
    }

    /// Constructs a `Sparse` with `strides[k]` entries in line `k`, given the
    /// companion indices and values line by line.
    pub fn from_vecs(
        strides: impl Sizes,
        indices: impl Into<Box<[usize]>>,
        values: impl Into<Box<[T]>>,
    ) -> Result<Self> {
        let table = OffsetTable::from_sizes(strides)?;
        let (indices, items) = (indices.into(), values.into());
        for got in [indices.len(), items.len()] {
            if got != table.length() {
                return Err(Error::LengthMismatch {expected: table.length(), got});
            }
        }
        Ok(Self {table, items, indices, marker: PhantomData})
    }

    /// The number of lines.
    #[inline(always)]
    pub fn dim(&self) -> usize { self.table.lines() }

    /// The total number of entries.
    #[inline(always)]
    pub fn size(&self) -> usize { self.items.len() }

    /// The offset table as a slice of `dim() + 1` line starts.
    #[inline(always)]
    pub fn starts(&self) -> &[usize] { self.table.starts() }

    /// All companion indices, line by line.
    #[inline(always)]
    pub fn indices(&self) -> &[usize] { &self.indices }

    /// The number of entries in `line`.
    ///
    /// # Panics
    ///
    /// Panics if `line` is not less than `dim()`.
    #[track_caller]
    pub fn stride(&self, line: usize) -> usize {
        self.table.stride(line).unwrap_or_else(|e| fail(e))
    }

    /// The value of entry `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` is out of bounds.
    #[track_caller]
    pub fn value(&self, i: usize, j: usize) -> &T { self.at(i, j) }

    /// The value of entry `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` is out of bounds.
    #[track_caller]
    pub fn value_mut(&mut self, i: usize, j: usize) -> &mut T { self.at_mut(i, j) }

    /// The companion index of entry `(i, j)`, or an error if it is out of
    /// bounds.
    pub fn get_index(&self, i: usize, j: usize) -> Result<&usize> {
        let k = self.locate(i, j)?;
        Ok(&self.indices[k])
    }

    /// The companion index of entry `(i, j)`, or an error if it is out of
    /// bounds.
    pub fn get_index_mut(&mut self, i: usize, j: usize) -> Result<&mut usize> {
        let k = self.locate(i, j)?;
        Ok(&mut self.indices[k])
    }

    /// The companion indices and values of `line`.
    ///
    /// # Panics
    ///
    /// Panics if `line` is not less than `dim()`.
    #[track_caller]
    pub fn line(&self, line: usize) -> (&[usize], &[T]) {
        let range = self.table.range(line).unwrap_or_else(|e| fail(e));
        (&self.indices[range.clone()], &self.items[range])
    }

    /// The companion indices and values of `line`.
    ///
    /// # Panics
    ///
    /// Panics if `line` is not less than `dim()`.
    #[track_caller]
    pub fn line_mut(&mut self, line: usize) -> (&mut [usize], &mut [T]) {
        let range = self.table.range(line).unwrap_or_else(|e| fail(e));
        (&mut self.indices[range.clone()], &mut self.items[range])
    }

    /// Returns the value of the first entry of `line` whose companion index
    /// is `other`, if there is one.
    ///
    /// # Panics
    ///
    /// Panics if `line` is not less than `dim()`.
    #[track_caller]
    pub fn find(&self, line: usize, other: usize) -> Option<&T> {
        let (indices, values) = self.line(line);
        indices.iter().position(|&x| x == other).map(|k| &values[k])
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

impl_pair_access!(Sparse);

impl<T> Sparse<T, Right> {
    /// The column of entry `j` of row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` is out of bounds.
    #[track_caller]
    pub fn column_index(&self, i: usize, j: usize) -> &usize {
        self.get_index(i, j).unwrap_or_else(|e| fail(e))
    }

    /// The column of entry `j` of row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` is out of bounds.
    #[track_caller]
    pub fn column_index_mut(&mut self, i: usize, j: usize) -> &mut usize {
        self.get_index_mut(i, j).unwrap_or_else(|e| fail(e))
    }

    /// The columns and values of the entries of row `i`.
    #[track_caller]
    pub fn row(&self, i: usize) -> (&[usize], &[T]) { self.line(i) }
}

impl<T> Sparse<T, Down> {
    /// The row of entry `i` of column `j`.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` is out of bounds.
    #[track_caller]
    pub fn row_index(&self, i: usize, j: usize) -> &usize {
        self.get_index(i, j).unwrap_or_else(|e| fail(e))
    }

    /// The row of entry `i` of column `j`.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` is out of bounds.
    #[track_caller]
    pub fn row_index_mut(&mut self, i: usize, j: usize) -> &mut usize {
        self.get_index_mut(i, j).unwrap_or_else(|e| fail(e))
    }

    /// The rows and values of the entries of column `j`.
    #[track_caller]
    pub fn column(&self, j: usize) -> (&[usize], &[T]) { self.line(j) }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Array};

    /// The 3x3 matrix
    /// ```text
    /// [1 0 2]
    /// [0 0 3]
    /// [4 0 0]
    /// ```
    fn dense() -> [[i32; 3]; 3] { [[1, 0, 2], [0, 0, 3], [4, 0, 0]] }

    #[test]
    fn row_round_trip() {
        let m = dense();
        let sizes: Vec<usize> = m.iter().map(|r| r.iter().filter(|&&x| x != 0).count()).collect();
        let mut s: SparseRow<i32> = SparseRow::new(&sizes).unwrap();
        for i in 0..3 {
            let mut j = 0;
            for (c, &x) in m[i].iter().enumerate() {
                if x != 0 {
                    *s.column_index_mut(i, j) = c;
                    *s.value_mut(i, j) = x;
                    j += 1;
                }
            }
        }
        assert_eq!(s.starts(), [0, 2, 3, 4]);
        let mut back = [[0; 3]; 3];
        for i in 0..3 {
            for j in 0..s.stride(i) {
                back[i][*s.column_index(i, j)] = *s.value(i, j);
            }
        }
        assert_eq!(back, m);
    }

    #[test]
    fn col_round_trip() {
        let m = dense();
        let sizes = Array::<u8>::from_vec(&[3], vec![2, 0, 2]).unwrap();
        let mut s: SparseCol<i32> = SparseCol::new(&sizes).unwrap();
        for j in 0..3 {
            let mut i = 0;
            for r in 0..3 {
                if m[r][j] != 0 {
                    *s.row_index_mut(i, j) = r;
                    *s.value_mut(i, j) = m[r][j];
                    i += 1;
                }
            }
        }
        assert_eq!(s.column(0), (&[0, 2][..], &[1, 4][..]));
        assert_eq!(s.column(2), (&[0, 1][..], &[2, 3][..]));
        assert_eq!(s.find(2, 1), Some(&3));
        assert_eq!(s.get_index(0, 1), Err(Error::StrideOutOfBounds {line: 1, index: 0, stride: 0}));
        assert_eq!(s.get_index(0, 3), Err(Error::IndexOutOfBounds {axis: 1, index: 3, extent: 3}));
    }

    #[test]
    fn from_vecs() {
        let s: SparseRow<char> = SparseRow::from_vecs([1, 1], vec![4, 2], vec!['x', 'y']).unwrap();
        assert_eq!(*s.column_index(1, 0), 2);
        assert_eq!(s[(1, 0)], 'y');
        assert_eq!(
            SparseRow::<char>::from_vecs([1, 1], vec![4], vec!['x', 'y']).unwrap_err(),
            Error::LengthMismatch {expected: 2, got: 1},
        );
    }

    #[test]
    fn line_mut() {
        let mut s: SparseRow<u8> = SparseRow::new([0, 2]).unwrap();
        let (indices, values) = s.line_mut(1);
        indices.copy_from_slice(&[5, 6]);
        values.fill(9);
        assert_eq!(s.indices(), [5, 6]);
        assert_eq!(s.as_slice(), [9, 9]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn value_panics() {
        let s: SparseRow<u8> = SparseRow::new([1]).unwrap();
        let _ = s.value(0, 1);
    }
}
