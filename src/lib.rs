//! A pure-Rust library of the containers that numerical simulation codes are
//! built from: dense multi-dimensional arrays, ragged arrays, and compressed
//! sparse rows and columns.
//!
//! [`Array<T, L, O>`] is a dense array of `T` with between 1 and
//! [`MAX_ORDER`] axes. The elements are stored in a single reference-counted
//! buffer in the order given by the [`Layout`] `L`: [`RowMajor`] (the last
//! coordinate varies fastest) or [`ColMajor`] (the first coordinate varies
//! fastest). The [`Origin`] `O` says whether coordinates count from 0
//! ([`ZeroBased`]) or from 1 ([`OneBased`]); a [`Matrix`] is an `Array` with
//! one-based coordinates. [`View`] and [`MatrixView`] are the same thing over
//! memory borrowed from elsewhere. Coordinates can be passed as a `usize`, a
//! tuple, an array or a slice; see [`Index`].
//!
//! A ragged container is a two-dimensional collection whose lines have
//! different lengths. The [`Direction`] `D` says whether the lines are rows
//! ([`Right`]) or columns ([`Down`]). There are three families:
//!
//! - [`Ragged`]: the line sizes are fixed at construction, and the lines are
//!   packed into one buffer using an [`OffsetTable`].
//! - [`DynamicRagged`]: the lines grow by appending, first line to last, into
//!   a buffer that is allocated up front.
//! - [`FixedRagged`]: every line has the same capacity, and the logical
//!   extent of each line can be changed at any time.
//!
//! [`Sparse`] containers ([`SparseRow`] and [`SparseCol`]) are static ragged
//! containers of values with a parallel buffer of column or row indices.
//!
//! Every container has three kinds of element accessor: `get()` and
//! `get_mut()` return a [`Result`], `at()`, `at_mut()` and the `[]`
//! operator panic on a bad index, and `get_unchecked()` and
//! `get_unchecked_mut()` are `unsafe` and do not check anything.
//!
//! ```
//! use simarrays::{Array, ColMajor, RaggedRight};
//! let a: Array<f64, ColMajor> = Array::new(&[2, 3]).unwrap();
//! *a.at_mut((1, 2)) = 1.0;
//! assert_eq!(a.borrow()[5], 1.0);
//!
//! let r: RaggedRight<f64> = RaggedRight::new([3, 1]).unwrap();
//! assert_eq!(r.stride(0), 3);
//! assert!(r.get(1, 1).is_err());
//! ```

/// The maximum number of axes of a dense container.
pub const MAX_ORDER: usize = 7;

#[macro_use]
mod access;

mod error;
pub use error::{Error, ErrorKind, Result};

mod layout;
pub use layout::{Layout, RowMajor, ColMajor, Origin, ZeroBased, OneBased, Direction, Right, Down};

mod index;
pub use index::{Index};

mod shape;
pub use shape::{Shape};

mod sizes;
pub use sizes::{Extent, Sizes};

mod array;
pub use array::{Array};

mod view;
pub use view::{View};

mod offsets;
pub use offsets::{OffsetTable, OffsetBuilder};

mod ragged;
pub use ragged::{Ragged, RaggedRight, RaggedDown, RaggedRightOfVectors};

mod dynamic;
pub use dynamic::{DynamicRagged, DynamicRaggedRight, DynamicRaggedDown, DynamicRaggedRightOfVectors};

mod fixed;
pub use fixed::{FixedRagged, FixedRaggedRight, FixedRaggedDown};

mod sparse;
pub use sparse::{Sparse, SparseRow, SparseCol};

/// A dense array whose coordinates count from 1.
pub type Matrix<T, L = RowMajor> = Array<T, L, OneBased>;

/// A dense view whose coordinates count from 1.
pub type MatrixView<'a, T, L = RowMajor> = View<'a, T, L, OneBased>;
