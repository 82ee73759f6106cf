//! Offset tables: the prefix sums that pack variable-length lines into one
//! flat buffer.
//!
//! An [`OffsetTable`] for `n` lines is an array `start[0..=n]` with
//! `start[0] = 0`, where line `i` occupies `start[i]..start[i + 1]` of the
//! buffer. It is built in one go from a sequence of [`Sizes`].
//!
//! An [`OffsetBuilder`] builds the same table one element at a time. It has a
//! single cursor into the buffer, so lines must be appended to in
//! non-decreasing order; this is checked.

use std::ops::{Range};

use super::{Sizes, Extent, Error, Result};

/// Prefix sums of a sequence of line sizes.
///
/// ```
/// use simarrays::{OffsetTable};
/// let t = OffsetTable::from_sizes([2, 0, 3]).unwrap();
/// assert_eq!(t.starts(), [0, 2, 2, 5]);
/// assert_eq!(t.length(), 5);
/// assert_eq!(t.stride(2), Ok(3));
/// assert_eq!(t.locate(2, 1), Ok(3));
/// assert!(t.locate(0, 2).is_err());
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct OffsetTable {
    start: Vec<usize>,
}

impl OffsetTable {
    /// Builds the table for lines of the given sizes.
    ///
    /// Fails if any size is negative, or if the total does not fit in a
    /// `usize`.
    pub fn from_sizes(sizes: impl Sizes) -> Result<Self> {
        Self::from_scaled_sizes(sizes, 1)
    }

    /// Builds the table for lines of the given sizes, each multiplied by
    /// `scale`.
    pub fn from_scaled_sizes(sizes: impl Sizes, scale: usize) -> Result<Self> {
        let mut start = Vec::with_capacity(sizes.count() + 1);
        start.push(0usize);
        let mut result = Ok(());
        sizes.each(|s| {
            if result.is_err() { return; }
            let position = start.len() - 1;
            let count = start[position];
            result = extent(s, position)
                .and_then(|s| s.checked_mul(scale).and_then(|s| count.checked_add(s))
                    .ok_or(Error::TableOverflow {position}))
                .map(|count| start.push(count));
        });
        result?;
        let table = Self {start};
        log::debug!("Built offset table for {} lines, length {}", table.lines(), table.length());
        Ok(table)
    }

    /// The number of lines.
    #[inline(always)]
    pub fn lines(&self) -> usize { self.start.len() - 1 }

    /// The total number of elements in all lines.
    #[inline(always)]
    pub fn length(&self) -> usize { self.start[self.lines()] }

    /// The whole table, `lines() + 1` entries long.
    #[inline(always)]
    pub fn starts(&self) -> &[usize] { &self.start }

    /// The position in the buffer of the first element of `line`.
    pub fn start(&self, line: usize) -> Result<usize> {
        self.check_line(0, line)?;
        Ok(self.start[line])
    }

    /// The number of elements in `line`.
    pub fn stride(&self, line: usize) -> Result<usize> {
        self.check_line(0, line)?;
        Ok(self.stride_unchecked(line))
    }

    /// The positions in the buffer occupied by `line`.
    pub fn range(&self, line: usize) -> Result<Range<usize>> {
        self.check_line(0, line)?;
        Ok(self.start[line]..self.start[line + 1])
    }

    /// The position in the buffer of element `index` of `line`.
    ///
    /// Fails unless `line < lines()` and `index < stride(line)`.
    #[inline]
    pub fn locate(&self, line: usize, index: usize) -> Result<usize> {
        self.locate_on_axis(0, line, index)
    }

    /// Like [`locate()`], but reports a bad `line` as an error on `axis`.
    ///
    /// [`locate()`]: Self::locate
    #[inline]
    pub(crate) fn locate_on_axis(&self, axis: usize, line: usize, index: usize) -> Result<usize> {
        self.check_line(axis, line)?;
        let stride = self.stride_unchecked(line);
        if index >= stride {
            return Err(Error::StrideOutOfBounds {line, index, stride});
        }
        Ok(self.start[line] + index)
    }

    /// Like [`locate()`], but without any checks.
    ///
    /// The result is meaningless, but not unsafe, if the arguments are
    /// invalid and `line < lines()`.
    ///
    /// [`locate()`]: Self::locate
    #[inline(always)]
    pub fn locate_unchecked(&self, line: usize, index: usize) -> usize {
        self.start[line].wrapping_add(index)
    }

    #[inline(always)]
    fn stride_unchecked(&self, line: usize) -> usize {
        self.start[line + 1] - self.start[line]
    }

    #[inline(always)]
    fn check_line(&self, axis: usize, line: usize) -> Result<()> {
        let extent = self.lines();
        if line >= extent {
            return Err(Error::IndexOutOfBounds {axis, index: line, extent});
        }
        Ok(())
    }
}

fn extent<E: Extent>(s: E, position: usize) -> Result<usize> {
    s.to_extent().ok_or_else(|| Error::InvalidExtent {position, value: format!("{:?}", s)})
}

// ----------------------------------------------------------------------------

/// Builds an [`OffsetTable`] incrementally, one append at a time.
///
/// Each line may hold at most `capacity` appends, and each append reserves
/// `step` consecutive positions in the buffer. Appends must be made in
/// non-decreasing line order. Lines that are skipped over are empty.
///
/// ```
/// use simarrays::{OffsetBuilder};
/// let mut b = OffsetBuilder::new(3, 4, 1);
/// assert_eq!(b.append(0), Ok(0));
/// assert_eq!(b.append(0), Ok(1));
/// assert_eq!(b.append(2), Ok(2));
/// assert!(b.append(1).is_err());
/// assert_eq!(b.stride(1), Ok(0));
/// assert_eq!(b.finish().starts(), [0, 2, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetBuilder {
    start: Vec<usize>,
    cursor: usize,
    last: Option<usize>,
    capacity: usize,
    step: usize,
}

impl OffsetBuilder {
    /// A builder for `lines` lines of at most `capacity` appends each, with
    /// `step` positions per append.
    pub fn new(lines: usize, capacity: usize, step: usize) -> Self {
        Self {start: vec![0; lines + 1], cursor: 0, last: None, capacity, step}
    }

    /// The number of lines.
    #[inline(always)]
    pub fn lines(&self) -> usize { self.start.len() - 1 }

    /// The maximum number of appends per line.
    #[inline(always)]
    pub fn capacity(&self) -> usize { self.capacity }

    /// The number of buffer positions reserved by each append.
    #[inline(always)]
    pub fn step(&self) -> usize { self.step }

    /// The number of buffer positions reserved so far.
    #[inline(always)]
    pub fn length(&self) -> usize { self.cursor }

    /// The last line appended to, if any.
    #[inline(always)]
    pub fn last(&self) -> Option<usize> { self.last }

    /// Reserves `step()` positions at the end of `line` and returns the
    /// position of the first.
    ///
    /// Fails if `line` is out of range, if a later line has already been
    /// appended to, or if `line` already holds `capacity()` appends.
    pub fn append(&mut self, line: usize) -> Result<usize> {
        let extent = self.lines();
        if line >= extent {
            return Err(Error::IndexOutOfBounds {axis: 0, index: line, extent});
        }
        let first = match self.last {
            Some(last) if line < last => return Err(Error::OutOfOrderAppend {line, last}),
            Some(last) => last + 1,
            None => 0,
        };
        for skipped in first..line { self.start[skipped + 1] = self.cursor; }
        if self.cursor - self.start[line] >= self.capacity * self.step {
            return Err(Error::CapacityExceeded {line, capacity: self.capacity});
        }
        let position = self.cursor;
        self.cursor += self.step;
        self.start[line + 1] = self.cursor;
        self.last = Some(line);
        log::trace!("Appended to line {} at position {}", line, position);
        Ok(position)
    }

    /// The number of appends made to `line`.
    pub fn stride(&self, line: usize) -> Result<usize> {
        let extent = self.lines();
        if line >= extent {
            return Err(Error::IndexOutOfBounds {axis: 0, index: line, extent});
        }
        Ok(self.span(line).len() / self.step.max(1))
    }

    /// Like [`OffsetTable::locate()`], where `index` counts appends.
    ///
    /// Returns the position of the first of the `step()` positions reserved
    /// by the `index`th append to `line`.
    pub fn locate(&self, line: usize, index: usize) -> Result<usize> {
        self.locate_on_axis(0, line, index)
    }

    pub(crate) fn locate_on_axis(&self, axis: usize, line: usize, index: usize) -> Result<usize> {
        let extent = self.lines();
        if line >= extent {
            return Err(Error::IndexOutOfBounds {axis, index: line, extent});
        }
        let span = self.span(line);
        let stride = span.len() / self.step.max(1);
        if index >= stride {
            return Err(Error::StrideOutOfBounds {line, index, stride});
        }
        Ok(span.start + index * self.step)
    }

    /// The positions reserved by `line`. Lines after `last()` are empty.
    pub fn span(&self, line: usize) -> Range<usize> {
        match self.last {
            Some(last) if line <= last => self.start[line]..self.start[line + 1],
            _ => self.cursor..self.cursor,
        }
    }

    /// Closes the remaining lines and returns the finished table.
    pub fn finish(mut self) -> OffsetTable {
        let first = self.last.map_or(0, |last| last + 1);
        for line in first..self.lines() { self.start[line + 1] = self.cursor; }
        OffsetTable {start: self.start}
    }
}

// ----------------------------------------------------------------------------
