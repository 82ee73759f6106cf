//! Ragged containers that grow one element at a time.
//!
//! The buffer is allocated up front for `dim` lines of at most `buffer_cap`
//! elements each, but the lines are packed: each append reserves the next
//! free position after everything appended so far. This means lines must be
//! filled in order, first to last; see [`OffsetBuilder`].

use std::marker::{PhantomData};

use super::{OffsetBuilder, Ragged, RaggedRightOfVectors, Direction, Right, Down, Error, Result};
use super::error::{fail};

fn buffer_length(dims: &[usize]) -> Result<usize> {
    dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| Error::LengthOverflow {dims: dims.to_vec()})
}

/// A ragged container whose lines grow by appending.
///
/// Indexing follows [`Ragged`]: with [`Right`], `(i, j)` is element `j` of
/// row `i`; with [`Down`], it is element `i` of column `j`. Only appended
/// elements can be accessed.
///
/// ```
/// use simarrays::{DynamicRaggedRight};
/// let mut r: DynamicRaggedRight<i32> = DynamicRaggedRight::new(3, 4).unwrap();
/// r.push(0, 10).unwrap();
/// r.push(0, 11).unwrap();
/// r.push(2, 12).unwrap();
/// assert_eq!(r.stride(0), 2);
/// assert_eq!(r.stride(1), 0);
/// assert_eq!(r[(2, 0)], 12);
/// assert!(r.push(1, 13).is_err());
///
/// let frozen = r.freeze();
/// assert_eq!(frozen.starts(), [0, 2, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicRagged<T, D: Direction = Right> {
    builder: OffsetBuilder,
    items: Box<[T]>,
    marker: PhantomData<D>,
}

/// A [`DynamicRagged`] container whose lines are rows.
pub type DynamicRaggedRight<T> = DynamicRagged<T, Right>;

/// A [`DynamicRagged`] container whose lines are columns.
pub type DynamicRaggedDown<T> = DynamicRagged<T, Down>;

impl<T, D: Direction> DynamicRagged<T, D> {
    /// Constructs an empty container with `dim` lines, each of which can
    /// hold up to `buffer_cap` elements.
    ///
    /// The whole buffer is allocated and filled with `T::default()` now.
    pub fn new(dim: usize, buffer_cap: usize) -> Result<Self> where T: Default {
        let length = buffer_length(&[dim, buffer_cap])?;
        let items = std::iter::repeat_with(T::default).take(length).collect();
        log::debug!(
            "Allocated dynamic ragged-{} container with {} lines of capacity {}",
            D::NAME, dim, buffer_cap,
        );
        Ok(Self {builder: OffsetBuilder::new(dim, buffer_cap, 1), items, marker: PhantomData})
    }

    /// The number of lines.
    #[inline(always)]
    pub fn dim(&self) -> usize { self.builder.lines() }

    /// The number of elements appended so far.
    #[inline(always)]
    pub fn size(&self) -> usize { self.builder.length() }

    /// The number of elements allocated.
    #[inline(always)]
    pub fn capacity(&self) -> usize { self.items.len() }

    /// The maximum number of elements in each line.
    #[inline(always)]
    pub fn buffer_cap(&self) -> usize { self.builder.capacity() }

    /// The number of elements appended to `line`. Lines that have not yet
    /// been reached are empty.
    ///
    /// # Panics
    ///
    /// Panics if `line` is not less than `dim()`.
    #[track_caller]
    pub fn stride(&self, line: usize) -> usize {
        self.check_line(line)
            .and_then(|()| self.builder.stride(line))
            .unwrap_or_else(|e| fail(e))
    }

    /// Adds an element to the end of `line`, and returns its index within
    /// `line`. The element keeps whatever value its slot already had.
    ///
    /// Fails if `line` is out of range, if a later line has already been
    /// appended to, or if `line` is full.
    pub fn append(&mut self, line: usize) -> Result<usize> {
        self.check_line(line)?;
        let position = self.builder.append(line)?;
        Ok(position - self.builder.span(line).start)
    }

    /// Adds `value` to the end of `line`, and returns its index within
    /// `line`.
    pub fn push(&mut self, line: usize, value: T) -> Result<usize> {
        self.check_line(line)?;
        let position = self.builder.append(line)?;
        self.items[position] = value;
        Ok(position - self.builder.span(line).start)
    }

    /// The elements appended to `line`.
    ///
    /// # Panics
    ///
    /// Panics if `line` is not less than `dim()`.
    #[track_caller]
    pub fn line(&self, line: usize) -> &[T] {
        if let Err(e) = self.check_line(line) { fail(e) }
        &self.items[self.builder.span(line)]
    }

    /// The elements appended to `line`.
    ///
    /// # Panics
    ///
    /// Panics if `line` is not less than `dim()`.
    #[track_caller]
    pub fn line_mut(&mut self, line: usize) -> &mut [T] {
        if let Err(e) = self.check_line(line) { fail(e) }
        let span = self.builder.span(line);
        &mut self.items[span]
    }

    /// Converts `self` into a [`Ragged`] container with the same lines,
    /// releasing the unused part of the buffer.
    pub fn freeze(self) -> Ragged<T, D> {
        let table = self.builder.finish();
        let mut items = self.items.into_vec();
        items.truncate(table.length());
        log::debug!("Froze dynamic ragged-{} container with {} elements", D::NAME, table.length());
        Ragged::from_parts(table, items.into_boxed_slice())
    }

    fn check_line(&self, line: usize) -> Result<()> {
        let extent = self.dim();
        if line >= extent {
            return Err(Error::IndexOutOfBounds {axis: D::LINE_AXIS, index: line, extent});
        }
        Ok(())
    }

    #[inline]
    fn locate(&self, i: usize, j: usize) -> Result<usize> {
        let (line, index) = D::split(i, j);
        self.builder.locate_on_axis(D::LINE_AXIS, line, index)
    }

    #[inline(always)]
    fn locate_unchecked(&self, i: usize, j: usize) -> usize {
        let (line, index) = D::split(i, j);
        self.builder.span(line).start.wrapping_add(index)
    }
}

impl_pair_access!(DynamicRagged);

// ----------------------------------------------------------------------------

/// A ragged container of rows of vectors, whose rows grow by appending one
/// vector at a time.
///
/// `(i, j, k)` is component `k` of vector `j` of row `i`.
///
/// ```
/// use simarrays::{DynamicRaggedRightOfVectors};
/// let mut r: DynamicRaggedRightOfVectors<u8> = DynamicRaggedRightOfVectors::new(2, 3, 2).unwrap();
/// assert_eq!(r.capacity(), 12);
/// r.push(0, &[1, 2]).unwrap();
/// let j = r.append(1).unwrap();
/// r.vector_mut(1, j).unwrap()[1] = 9;
/// assert_eq!(r[(1, 0, 1)], 9);
/// assert_eq!(r.freeze().as_slice(), [1, 2, 0, 9]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicRaggedRightOfVectors<T> {
    builder: OffsetBuilder,
    items: Box<[T]>,
}

impl<T> DynamicRaggedRightOfVectors<T> {
    /// Constructs an empty container with `dim` rows, each of which can
    /// hold up to `buffer_cap` vectors of length `vector_dim`.
    pub fn new(dim: usize, buffer_cap: usize, vector_dim: usize) -> Result<Self> where T: Default {
        if vector_dim == 0 {
            return Err(Error::ZeroVectorDim);
        }
        let length = buffer_length(&[dim, buffer_cap, vector_dim])?;
        let items = std::iter::repeat_with(T::default).take(length).collect();
        log::debug!(
            "Allocated dynamic container of {} rows of up to {} vectors of length {}",
            dim, buffer_cap, vector_dim,
        );
        Ok(Self {builder: OffsetBuilder::new(dim, buffer_cap, vector_dim), items})
    }

    /// The number of rows.
    #[inline(always)]
    pub fn dim(&self) -> usize { self.builder.lines() }

    /// The length of each vector.
    #[inline(always)]
    pub fn vector_dim(&self) -> usize { self.builder.step() }

    /// The number of components appended so far.
    #[inline(always)]
    pub fn size(&self) -> usize { self.builder.length() }

    /// The number of components allocated.
    #[inline(always)]
    pub fn capacity(&self) -> usize { self.items.len() }

    /// The number of vectors appended to row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not less than `dim()`.
    #[track_caller]
    pub fn stride(&self, i: usize) -> usize {
        self.builder.stride(i).unwrap_or_else(|e| fail(e))
    }

    /// Adds a vector to the end of row `i`, and returns its index within the
    /// row.
    pub fn append(&mut self, i: usize) -> Result<usize> {
        let position = self.builder.append(i)?;
        Ok((position - self.builder.span(i).start) / self.vector_dim())
    }

    /// Adds a copy of `components` to the end of row `i`, and returns its
    /// index within the row.
    ///
    /// Fails if `components` does not have `vector_dim()` elements.
    pub fn push(&mut self, i: usize, components: &[T]) -> Result<usize> where T: Clone {
        let v = self.vector_dim();
        if components.len() != v {
            return Err(Error::LengthMismatch {expected: v, got: components.len()});
        }
        let position = self.builder.append(i)?;
        self.items[position..position + v].clone_from_slice(components);
        Ok((position - self.builder.span(i).start) / v)
    }

    /// The components of vector `j` of row `i`.
    pub fn vector(&self, i: usize, j: usize) -> Result<&[T]> {
        let start = self.builder.locate(i, j)?;
        Ok(&self.items[start..start + self.vector_dim()])
    }

    /// The components of vector `j` of row `i`.
    pub fn vector_mut(&mut self, i: usize, j: usize) -> Result<&mut [T]> {
        let start = self.builder.locate(i, j)?;
        let end = start + self.vector_dim();
        Ok(&mut self.items[start..end])
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

    /// The whole buffer, including the part not yet appended to.
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] { &self.items }

    /// Converts `self` into a [`RaggedRightOfVectors`] with the same rows,
    /// releasing the unused part of the buffer.
    pub fn freeze(self) -> RaggedRightOfVectors<T> {
        let v = self.vector_dim();
        let table = self.builder.finish();
        let mut items = self.items.into_vec();
        items.truncate(table.length());
        RaggedRightOfVectors::from_parts(table, items.into_boxed_slice(), v)
    }

    fn locate(&self, i: usize, j: usize, k: usize) -> Result<usize> {
        let v = self.vector_dim();
        if k >= v {
            return Err(Error::IndexOutOfBounds {axis: 2, index: k, extent: v});
        }
        Ok(self.builder.locate(i, j)? + k)
    }
}

impl<T> std::ops::Index<(usize, usize, usize)> for DynamicRaggedRightOfVectors<T> {
    type Output = T;
    #[track_caller]
    fn index(&self, (i, j, k): (usize, usize, usize)) -> &T {
        self.get(i, j, k).unwrap_or_else(|e| fail(e))
    }
}

impl<T> std::ops::IndexMut<(usize, usize, usize)> for DynamicRaggedRightOfVectors<T> {
    #[track_caller]
    fn index_mut(&mut self, (i, j, k): (usize, usize, usize)) -> &mut T {
        self.get_mut(i, j, k).unwrap_or_else(|e| fail(e))
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind};

    #[test]
    fn strides_count_appends() {
        let mut r: DynamicRaggedRight<u32> = DynamicRaggedRight::new(4, 3).unwrap();
        for (line, n) in [(0, 3), (2, 1), (3, 2)] {
            for k in 0..n {
                assert_eq!(r.append(line), Ok(k));
            }
        }
        assert_eq!([0, 1, 2, 3].map(|i| r.stride(i)), [3, 0, 1, 2]);
        assert_eq!(r.size(), 6);
        assert_eq!(r.capacity(), 12);
    }

    #[test]
    fn not_yet_reached() {
        let mut r: DynamicRaggedRight<u32> = DynamicRaggedRight::new(3, 2).unwrap();
        assert_eq!(r.stride(2), 0);
        r.push(0, 5).unwrap();
        assert_eq!(r.stride(1), 0);
        assert!(r.line(2).is_empty());
        assert_eq!(r.get(1, 0), Err(Error::StrideOutOfBounds {line: 1, index: 0, stride: 0}));
    }

    #[test]
    fn order_and_capacity() {
        let mut r: DynamicRaggedRight<u32> = DynamicRaggedRight::new(2, 1).unwrap();
        r.push(1, 1).unwrap();
        let e = r.push(0, 2).unwrap_err();
        assert_eq!(e, Error::OutOfOrderAppend {line: 0, last: 1});
        assert_eq!(e.kind(), ErrorKind::OffsetTableInconsistency);
        assert_eq!(r.push(1, 3), Err(Error::CapacityExceeded {line: 1, capacity: 1}));
        assert_eq!(r.size(), 1);
    }

    #[test]
    fn down() {
        let mut r: DynamicRaggedDown<char> = DynamicRaggedDown::new(2, 2).unwrap();
        r.push(0, 'a').unwrap();
        r.push(1, 'b').unwrap();
        r.push(1, 'c').unwrap();
        assert_eq!(r[(0, 0)], 'a');
        assert_eq!(r[(1, 1)], 'c');
        assert_eq!(r.get(1, 0), Err(Error::StrideOutOfBounds {line: 0, index: 1, stride: 1}));
        assert_eq!(r.append(2), Err(Error::IndexOutOfBounds {axis: 1, index: 2, extent: 2}));
        let frozen = r.freeze();
        assert_eq!(frozen.column(1), ['b', 'c']);
        assert_eq!(frozen.as_slice(), ['a', 'b', 'c']);
    }

    #[test]
    fn overflow() {
        let e = DynamicRaggedRight::<u8>::new(usize::MAX, 2).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidShape);
    }

    #[test]
    fn vectors() {
        let mut r: DynamicRaggedRightOfVectors<i32> = DynamicRaggedRightOfVectors::new(3, 2, 3).unwrap();
        assert_eq!(r.push(0, &[1, 2, 3]), Ok(0));
        assert_eq!(r.push(2, &[4, 5, 6]), Ok(0));
        assert_eq!(r.push(2, &[7, 8, 9]), Ok(1));
        assert_eq!(r.push(2, &[0, 0, 0]), Err(Error::CapacityExceeded {line: 2, capacity: 2}));
        assert_eq!(r.push(2, &[0]), Err(Error::LengthMismatch {expected: 3, got: 1}));
        assert_eq!(r.stride(2), 2);
        assert_eq!(r.vector(2, 1).unwrap(), [7, 8, 9]);
        assert_eq!(r.get(0, 0, 3), Err(Error::IndexOutOfBounds {axis: 2, index: 3, extent: 3}));
        assert_eq!(r.size(), 9);
        let frozen = r.freeze();
        assert_eq!(frozen.starts(), [0, 3, 3, 9]);
        assert_eq!(frozen.stride(2), 2);
        assert_eq!(frozen[(2, 0, 1)], 5);
    }
}
