//! Ragged containers with a fixed capacity per line and mutable strides.

use std::marker::{PhantomData};

use super::{Direction, Right, Down, Error, Result};
use super::error::{fail};

/// A `dim1` by `dim2` rectangle of storage, in which each line has a logical
/// extent that can be changed at any time.
///
/// With [`Right`], line `i` is row `i`, which can hold up to `dim2`
/// elements, and `(i, j)` is stored at `i * dim2 + j`. With [`Down`], line
/// `j` is column `j`, which can hold up to `dim1` elements, and `(i, j)` is
/// stored at `j * dim1 + i`.
///
/// Unlike [`DynamicRagged`], lines can be filled in any order.
///
/// ```
/// use simarrays::{FixedRaggedRight};
/// let mut r: FixedRaggedRight<i32> = FixedRaggedRight::new(2, 3).unwrap();
/// *r.stride_mut(1) = 2;
/// r[(1, 1)] = 5;
/// assert_eq!(r.as_slice(), [0, 0, 0, 0, 5, 0]);
/// assert!(r.get(0, 0).is_err());
/// r.push(0, 7).unwrap();
/// assert_eq!(r[(0, 0)], 7);
/// ```
///
/// [`DynamicRagged`]: super::DynamicRagged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedRagged<T, D: Direction = Right> {
    dim1: usize,
    dim2: usize,
    extents: Vec<usize>,
    items: Box<[T]>,
    marker: PhantomData<D>,
}

/// A [`FixedRagged`] container whose lines are rows.
pub type FixedRaggedRight<T> = FixedRagged<T, Right>;

/// A [`FixedRagged`] container whose lines are columns.
pub type FixedRaggedDown<T> = FixedRagged<T, Down>;

impl<T, D: Direction> FixedRagged<T, D> {
    /// Constructs a container of `dim1` by `dim2` elements, filled with
    /// `T::default()`, in which every line is empty.
    pub fn new(dim1: usize, dim2: usize) -> Result<Self> where T: Default {
        let length = dim1.checked_mul(dim2)
            .ok_or_else(|| Error::LengthOverflow {dims: vec![dim1, dim2]})?;
        let (lines, _) = D::split(dim1, dim2);
        let items = std::iter::repeat_with(T::default).take(length).collect();
        log::debug!("Allocated fixed ragged-{} container of {} by {}", D::NAME, dim1, dim2);
        Ok(Self {dim1, dim2, extents: vec![0; lines], items, marker: PhantomData})
    }

    /// The extent of the first axis.
    #[inline(always)]
    pub fn dim1(&self) -> usize { self.dim1 }

    /// The extent of the second axis.
    #[inline(always)]
    pub fn dim2(&self) -> usize { self.dim2 }

    /// The number of lines.
    #[inline(always)]
    pub fn lines(&self) -> usize { self.extents.len() }

    /// The maximum extent of each line.
    #[inline(always)]
    pub fn capacity(&self) -> usize { D::split(self.dim1, self.dim2).1 }

    /// The number of elements allocated.
    #[inline(always)]
    pub fn size(&self) -> usize { self.items.len() }

    /// The logical extents of all lines.
    #[inline(always)]
    pub fn strides(&self) -> &[usize] { &self.extents }

    /// The logical extent of `line`.
    ///
    /// # Panics
    ///
    /// Panics if `line` is not less than `lines()`.
    #[track_caller]
    pub fn stride(&self, line: usize) -> usize {
        if let Err(e) = self.check_line(line) { fail(e) }
        self.extents[line]
    }

    /// The logical extent of `line`, which the caller may overwrite.
    ///
    /// An extent larger than `capacity()` is harmless: accesses are bounded
    /// by the capacity too.
    ///
    /// # Panics
    ///
    /// Panics if `line` is not less than `lines()`.
    #[track_caller]
    pub fn stride_mut(&mut self, line: usize) -> &mut usize {
        if let Err(e) = self.check_line(line) { fail(e) }
        &mut self.extents[line]
    }

    /// Sets the logical extent of `line` to `extent`.
    ///
    /// Fails if `line` is out of range or `extent` exceeds `capacity()`.
    pub fn set_stride(&mut self, line: usize, extent: usize) -> Result<()> {
        self.check_line(line)?;
        let capacity = self.capacity();
        if extent > capacity {
            return Err(Error::ExtentTooLarge {line, extent, capacity});
        }
        self.extents[line] = extent;
        log::trace!("Set extent of line {} to {}", line, extent);
        Ok(())
    }

    /// Increments the extent of `line` and stores `value` in the new
    /// element. Returns the index of `value` within `line`.
    pub fn push(&mut self, line: usize, value: T) -> Result<usize> {
        self.check_line(line)?;
        let capacity = self.capacity();
        let index = self.extents[line];
        if index >= capacity {
            return Err(Error::CapacityExceeded {line, capacity});
        }
        self.items[line * capacity + index] = value;
        self.extents[line] = index + 1;
        log::trace!("Pushed to line {} at index {}", line, index);
        Ok(index)
    }

    /// The elements of `line` within its logical extent.
    ///
    /// # Panics
    ///
    /// Panics if `line` is not less than `lines()`.
    #[track_caller]
    pub fn line(&self, line: usize) -> &[T] {
        let range = self.line_range(line);
        &self.items[range]
    }

    /// The elements of `line` within its logical extent.
    ///
    /// # Panics
    ///
    /// Panics if `line` is not less than `lines()`.
    #[track_caller]
    pub fn line_mut(&mut self, line: usize) -> &mut [T] {
        let range = self.line_range(line);
        &mut self.items[range]
    }

    #[track_caller]
    fn line_range(&self, line: usize) -> std::ops::Range<usize> {
        if let Err(e) = self.check_line(line) { fail(e) }
        let capacity = self.capacity();
        let start = line * capacity;
        start..start + self.extents[line].min(capacity)
    }

    fn check_line(&self, line: usize) -> Result<()> {
        let extent = self.lines();
        if line >= extent {
            return Err(Error::IndexOutOfBounds {axis: D::LINE_AXIS, index: line, extent});
        }
        Ok(())
    }

    fn locate(&self, i: usize, j: usize) -> Result<usize> {
        if i >= self.dim1 {
            return Err(Error::IndexOutOfBounds {axis: 0, index: i, extent: self.dim1});
        }
        if j >= self.dim2 {
            return Err(Error::IndexOutOfBounds {axis: 1, index: j, extent: self.dim2});
        }
        let (line, index) = D::split(i, j);
        let stride = self.extents[line];
        if index >= stride {
            return Err(Error::StrideOutOfBounds {line, index, stride});
        }
        Ok(self.locate_unchecked(i, j))
    }

    #[inline(always)]
    fn locate_unchecked(&self, i: usize, j: usize) -> usize {
        let (line, index) = D::split(i, j);
        line.wrapping_mul(self.capacity()).wrapping_add(index)
    }
}

impl_pair_access!(FixedRagged);

// ----------------------------------------------------------------------------
