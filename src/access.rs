/// Implement the element accessors of a two-index container.
///
/// The container must be generic over `<T, D: Direction>`, must have a field
/// `items: Box<[T]>`, and must have methods
///
/// - `fn locate(&self, i: usize, j: usize) -> Result<usize>`, which returns
///   the position of `(i, j)` in `items`, or an error if it is out of bounds.
/// - `fn locate_unchecked(&self, i: usize, j: usize) -> usize`, which returns
///   the same position without checking anything.
///
/// The macro generates `get()`, `get_mut()`, `at()`, `at_mut()`,
/// `get_unchecked()`, `get_unchecked_mut()`, `as_slice()` and
/// `as_mut_slice()`, and implementations of `std::ops::Index<(usize, usize)>`
/// and `std::ops::IndexMut<(usize, usize)>`.
macro_rules! impl_pair_access {
    ($name:ident) => {
        impl<T, D: $crate::Direction> $name<T, D> {
            /// Returns the element at `(i, j)`, or fails if it is out of
            /// bounds.
            #[inline]
            pub fn get(&self, i: usize, j: usize) -> $crate::Result<&T> {
                let k = self.locate(i, j)?;
                Ok(&self.items[k])
            }

            /// Returns the element at `(i, j)`, or fails if it is out of
            /// bounds.
            #[inline]
            pub fn get_mut(&mut self, i: usize, j: usize) -> $crate::Result<&mut T> {
                let k = self.locate(i, j)?;
                Ok(&mut self.items[k])
            }

            /// Returns the element at `(i, j)`.
            ///
            /// # Panics
            ///
            /// Panics if `(i, j)` is out of bounds.
            #[inline]
            #[track_caller]
            pub fn at(&self, i: usize, j: usize) -> &T {
                match self.locate(i, j) {
                    Ok(k) => &self.items[k],
                    Err(e) => $crate::error::fail(e),
                }
            }

            /// Returns the element at `(i, j)`.
            ///
            /// # Panics
            ///
            /// Panics if `(i, j)` is out of bounds.
            #[inline]
            #[track_caller]
            pub fn at_mut(&mut self, i: usize, j: usize) -> &mut T {
                match self.locate(i, j) {
                    Ok(k) => &mut self.items[k],
                    Err(e) => $crate::error::fail(e),
                }
            }

            /// Returns the element at `(i, j)` without checking the bounds.
            ///
            /// # Safety
            ///
            /// `(i, j)` must be in bounds, i.e. `get(i, j)` must succeed.
            #[inline(always)]
            pub unsafe fn get_unchecked(&self, i: usize, j: usize) -> &T {
                let k = self.locate_unchecked(i, j);
                self.items.get_unchecked(k)
            }

            /// Returns the element at `(i, j)` without checking the bounds.
            ///
            /// # Safety
            ///
            /// `(i, j)` must be in bounds, i.e. `get(i, j)` must succeed.
            #[inline(always)]
            pub unsafe fn get_unchecked_mut(&mut self, i: usize, j: usize) -> &mut T {
                let k = self.locate_unchecked(i, j);
                self.items.get_unchecked_mut(k)
            }

            /// The whole buffer.
            #[inline(always)]
            pub fn as_slice(&self) -> &[T] { &self.items }

            /// The whole buffer.
            #[inline(always)]
            pub fn as_mut_slice(&mut self) -> &mut [T] { &mut self.items }
        }

        impl<T, D: $crate::Direction> std::ops::Index<(usize, usize)> for $name<T, D> {
            type Output = T;
            #[inline]
            #[track_caller]
            fn index(&self, (i, j): (usize, usize)) -> &T { self.at(i, j) }
        }

        impl<T, D: $crate::Direction> std::ops::IndexMut<(usize, usize)> for $name<T, D> {
            #[inline]
            #[track_caller]
            fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T { self.at_mut(i, j) }
        }
    };
}
