use std::cell::{Ref, RefCell, RefMut};
use std::fmt::{self, Debug};
use std::marker::{PhantomData};
use std::rc::{Rc};

use super::{Index, Shape, Layout, RowMajor, Origin, ZeroBased, View, Error, Result, MAX_ORDER};
use super::error::{fail};

/// A dense array of `T`s with between 1 and [`MAX_ORDER`] axes.
///
/// The elements are stored in a single reference-counted buffer, in the order
/// given by the layout `L`. Coordinates count from `O::FIRST`.
///
/// ### Sharing
///
/// An `Array` is a handle. [`Array::share()`] returns another handle to the
/// same buffer, and a write through either handle is visible through both.
/// [`Array::duplicate()`] copies the buffer instead. `Array` does not
/// implement `Clone`, so that it is always clear which of the two is meant.
///
/// ```
/// use simarrays::{Array};
/// let a: Array<i32> = Array::new(&[3]).unwrap();
/// let b = a.share();
/// *b.at_mut(0) = 5;
/// assert_eq!(*a.at(0), 5);
///
/// let c = a.duplicate();
/// *c.at_mut(0) = 6;
/// assert_eq!(*a.at(0), 5);
/// ```
///
/// The buffer lives in a [`RefCell`], so it is a run-time error (a panic) to
/// hold a mutable borrow of an element while any other borrow is alive, even
/// through a different handle.
pub struct Array<T, L: Layout = RowMajor, O: Origin = ZeroBased> {
    shape: Shape,
    items: Rc<RefCell<Box<[T]>>>,
    marker: PhantomData<(L, O)>,
}

impl<T, L: Layout, O: Origin> Array<T, L, O> {
    fn new_inner(shape: Shape, items: Box<[T]>) -> Self {
        assert_eq!(shape.length(), items.len());
        log::debug!("Allocated {} array of shape {:?}", L::NAME, shape.as_slice());
        Self {shape, items: Rc::new(RefCell::new(items)), marker: PhantomData}
    }

    /// Constructs an `Array` with extents `dims`, filled with
    /// `T::default()`.
    ///
    /// ```
    /// use simarrays::{Array, ColMajor};
    /// let a: Array<f64, ColMajor> = Array::new(&[2, 3, 4]).unwrap();
    /// assert_eq!(a.order(), 3);
    /// assert_eq!(a.size(), 24);
    /// assert_eq!(*a.at((1, 2, 3)), 0.0);
    /// ```
    pub fn new(dims: &[usize]) -> Result<Self> where T: Default {
        let shape = Shape::new(dims)?;
        let items = std::iter::repeat_with(T::default).take(shape.length()).collect();
        Ok(Self::new_inner(shape, items))
    }

    /// Constructs an `Array` with extents `dims`, filled with clones of
    /// `value`.
    pub fn from_elem(dims: &[usize], value: T) -> Result<Self> where T: Clone {
        let shape = Shape::new(dims)?;
        Ok(Self::new_inner(shape, vec![value; shape.length()].into()))
    }

    /// Constructs an `Array` with extents `dims` given its elements in
    /// storage order.
    ///
    /// ```
    /// use simarrays::{Array, RowMajor, ColMajor};
    /// let a: Array<_, RowMajor> = Array::from_vec(&[2, 2], vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(*a.at((0, 1)), 2);
    /// let a: Array<_, ColMajor> = Array::from_vec(&[2, 2], vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(*a.at((0, 1)), 3);
    /// ```
    pub fn from_vec(dims: &[usize], items: impl Into<Box<[T]>>) -> Result<Self> {
        let shape = Shape::new(dims)?;
        let items = items.into();
        if items.len() != shape.length() {
            return Err(Error::LengthMismatch {expected: shape.length(), got: items.len()});
        }
        Ok(Self::new_inner(shape, items))
    }

    /// Constructs an `Array` with extents `dims` from a function of the
    /// coordinates. Entries of the coordinate array past `order()` are zero.
    ///
    /// ```
    /// use simarrays::{Matrix};
    /// let m: Matrix<usize> = Matrix::from_fn(&[2, 3], |c| 10 * c[0] + c[1]).unwrap();
    /// assert_eq!(*m.at((1, 1)), 11);
    /// assert_eq!(*m.at((2, 3)), 23);
    /// ```
    pub fn from_fn(
        dims: &[usize],
        mut f: impl FnMut([usize; MAX_ORDER]) -> T,
    ) -> Result<Self> {
        let shape = Shape::new(dims)?;
        let mut items = Vec::with_capacity(shape.length());
        shape.each::<L, O>(|c| items.push(f(c)));
        Ok(Self::new_inner(shape, items.into()))
    }

    /// Returns another handle to the same buffer.
    pub fn share(&self) -> Self {
        Self {shape: self.shape, items: Rc::clone(&self.items), marker: PhantomData}
    }

    /// Returns an `Array` of the same shape with a copy of the buffer.
    pub fn duplicate(&self) -> Self where T: Clone {
        Self::new_inner(self.shape, self.borrow().to_vec().into())
    }

    /// Returns `true` if `self` and `other` are handles to the same buffer.
    pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.items, &other.items) }

    /// The number of handles to the buffer of `self`, including `self`.
    pub fn handle_count(&self) -> usize { Rc::strong_count(&self.items) }

    /// Returns the raw elements if `self` is the only handle to them, and
    /// otherwise returns `self`.
    pub fn try_into_raw(self) -> std::result::Result<Box<[T]>, Self> {
        let shape = self.shape;
        Rc::try_unwrap(self.items)
            .map(RefCell::into_inner)
            .map_err(|items| Self {shape, items, marker: PhantomData})
    }

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

    /// Borrows the whole buffer, in storage order.
    pub fn borrow(&self) -> Ref<'_, [T]> { Ref::map(self.items.borrow(), |b| &**b) }

    /// Mutably borrows the whole buffer, in storage order.
    pub fn borrow_mut(&self) -> RefMut<'_, [T]> { RefMut::map(self.items.borrow_mut(), |b| &mut **b) }

    /// Borrows the element at `index`, or fails if `index` is invalid.
    pub fn get(&self, index: impl Index) -> Result<Ref<'_, T>> {
        let i = self.shape.offset::<L, O>(index)?;
        Ok(Ref::map(self.borrow(), |b| &b[i]))
    }

    /// Mutably borrows the element at `index`, or fails if `index` is
    /// invalid.
    pub fn get_mut(&self, index: impl Index) -> Result<RefMut<'_, T>> {
        let i = self.shape.offset::<L, O>(index)?;
        Ok(RefMut::map(self.borrow_mut(), |b| &mut b[i]))
    }

    /// Borrows the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` has the wrong number of coordinates or any
    /// coordinate is out of range.
    #[track_caller]
    pub fn at(&self, index: impl Index) -> Ref<'_, T> {
        self.get(index).unwrap_or_else(|e| fail(e))
    }

    /// Mutably borrows the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` has the wrong number of coordinates or any
    /// coordinate is out of range.
    #[track_caller]
    pub fn at_mut(&self, index: impl Index) -> RefMut<'_, T> {
        self.get_mut(index).unwrap_or_else(|e| fail(e))
    }

    /// Overwrites the element at `index`, or fails if `index` is invalid.
    pub fn set(&self, index: impl Index, value: T) -> Result<()> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Overwrites every element with a clone of `value`.
    pub fn fill(&self, value: T) where T: Clone {
        self.borrow_mut().fill(value);
    }

    /// Calls `f` with a [`View`] of the buffer, and returns its result.
    ///
    /// The buffer is mutably borrowed for the duration of the call.
    ///
    /// ```
    /// use simarrays::{Array};
    /// let a: Array<u8> = Array::new(&[2, 2]).unwrap();
    /// a.with_view(|v| v[(1, 0)] = 7);
    /// assert_eq!(*a.at((1, 0)), 7);
    /// ```
    pub fn with_view<R>(&self, f: impl FnOnce(&mut View<'_, T, L, O>) -> R) -> R {
        let mut items = self.borrow_mut();
        let mut view = View::from_parts(self.shape, &mut items);
        f(&mut view)
    }
}

impl<T: Debug, L: Layout, O: Origin> Debug for Array<T, L, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("layout", &L::NAME)
            .field("first", &O::FIRST)
            .field("dims", &self.shape.as_slice())
            .field("items", &&*self.borrow())
            .finish()
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColMajor, OneBased};

    #[test]
    fn shared_handles() {
        let a: Array<i32> = Array::new(&[2, 3]).unwrap();
        let b = a.share();
        assert!(a.ptr_eq(&b));
        assert_eq!(a.handle_count(), 2);
        b.set((1, 2), 9).unwrap();
        assert_eq!(*a.at((1, 2)), 9);
        drop(b);
        assert_eq!(a.handle_count(), 1);
    }

    #[test]
    fn duplicate_is_deep() {
        let a = Array::<i32>::from_elem(&[4], 1).unwrap();
        let b = a.duplicate();
        assert!(!a.ptr_eq(&b));
        b.fill(2);
        assert_eq!(&*a.borrow(), [1, 1, 1, 1]);
        assert_eq!(&*b.borrow(), [2, 2, 2, 2]);
    }

    #[test]
    fn into_raw() {
        let a = Array::<u8, ColMajor>::from_vec(&[3], vec![1, 2, 3]).unwrap();
        let b = a.share();
        let a = a.try_into_raw().unwrap_err();
        drop(b);
        assert_eq!(&*a.try_into_raw().unwrap(), [1, 2, 3]);
    }

    #[test]
    fn from_vec_length() {
        assert_eq!(
            Array::<u8>::from_vec(&[2, 2], vec![0; 3]).unwrap_err(),
            Error::LengthMismatch {expected: 4, got: 3},
        );
    }

    #[test]
    fn from_fn_storage_order() {
        let a = Array::<usize, ColMajor>::from_fn(&[2, 3], |c| 10 * c[0] + c[1]).unwrap();
        assert_eq!(&*a.borrow(), [0, 10, 1, 11, 2, 12]);
        let a = Array::<usize, RowMajor, OneBased>::from_fn(&[2, 3], |c| 10 * c[0] + c[1]).unwrap();
        assert_eq!(&*a.borrow(), [11, 12, 13, 21, 22, 23]);
    }

    #[test]
    fn checked_access() {
        let a: Array<i32, ColMajor, OneBased> = Array::new(&[2, 2]).unwrap();
        assert!(a.get((0, 1)).is_err());
        assert!(a.get((1, 1, 1)).is_err());
        assert_eq!(
            a.set((3, 1), 0).unwrap_err(),
            Error::IndexOutOfBounds {axis: 0, index: 3, extent: 2},
        );
    }

    #[test]
    #[should_panic(expected = "rank mismatch")]
    fn at_wrong_arity() {
        let a: Array<i32> = Array::new(&[2, 2]).unwrap();
        let _ = a.at(1);
    }

    #[test]
    #[should_panic]
    fn overlapping_borrows() {
        let a: Array<i32> = Array::new(&[2]).unwrap();
        let b = a.share();
        let _x = a.at(0);
        let _y = b.at_mut(1);
    }
}
