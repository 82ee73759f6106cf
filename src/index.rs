/// Implemented by types that can be used as a coordinate tuple for a dense
/// container such as an [`Array`] or a [`View`].
///
/// The number of coordinates, [`Index::arity()`], must equal the order of
/// the container being indexed. Implementations are provided for `usize`,
/// tuples of up to seven `usize`s, arrays `[usize; N]` and slices.
///
/// ```
/// use simarrays::{Index};
/// assert_eq!((4, 5, 6).arity(), 3);
/// assert_eq!((4, 5, 6).coord(1), 5);
/// assert_eq!([7, 8].coord(0), 7);
/// ```
///
/// [`Array`]: super::Array
/// [`View`]: super::View
pub trait Index: Copy {
    /// The number of coordinates in `self`.
    fn arity(&self) -> usize;

    /// The coordinate on axis `d`.
    ///
    /// Panics if `d` is not less than `self.arity()`.
    fn coord(&self, d: usize) -> usize;
}

impl Index for usize {
    #[inline(always)]
    fn arity(&self) -> usize { 1 }

    #[inline(always)]
    fn coord(&self, d: usize) -> usize {
        assert_eq!(d, 0, "Axis {:?} is out of bounds for a scalar index", d);
        *self
    }
}

impl<const N: usize> Index for [usize; N] {
    #[inline(always)]
    fn arity(&self) -> usize { N }

    #[inline(always)]
    fn coord(&self, d: usize) -> usize { self[d] }
}

impl Index for &[usize] {
    #[inline(always)]
    fn arity(&self) -> usize { self.len() }

    #[inline(always)]
    fn coord(&self, d: usize) -> usize { self[d] }
}

macro_rules! impl_index_for_tuple {
    ($n:literal; $($t:ident $i:tt),*) => {
        impl Index for ($($t,)*) {
            #[inline(always)]
            fn arity(&self) -> usize { $n }

            #[inline(always)]
            fn coord(&self, d: usize) -> usize {
                match d {
                    $($i => self.$i,)*
                    _ => panic!("Axis {:?} is out of bounds for a {}-tuple index", d, $n),
                }
            }
        }
    };
}

impl_index_for_tuple!(1; usize 0);
impl_index_for_tuple!(2; usize 0, usize 1);
impl_index_for_tuple!(3; usize 0, usize 1, usize 2);
impl_index_for_tuple!(4; usize 0, usize 1, usize 2, usize 3);
impl_index_for_tuple!(5; usize 0, usize 1, usize 2, usize 3, usize 4);
impl_index_for_tuple!(6; usize 0, usize 1, usize 2, usize 3, usize 4, usize 5);
impl_index_for_tuple!(7; usize 0, usize 1, usize 2, usize 3, usize 4, usize 5, usize 6);

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn coords<I: Index>(i: I) -> Vec<usize> {
        (0..i.arity()).map(|d| i.coord(d)).collect()
    }

    #[test]
    fn tuples() {
        assert_eq!(coords(3), [3]);
        assert_eq!(coords((3,)), [3]);
        assert_eq!(coords((3, 1)), [3, 1]);
        assert_eq!(coords((1, 2, 3, 4, 5, 6, 7)), [1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn arrays_and_slices() {
        assert_eq!(coords([9, 8, 7]), [9, 8, 7]);
        let v = vec![1, 0, 1, 0];
        assert_eq!(coords(&v[..]), v);
        assert_eq!(coords::<[usize; 0]>([]), Vec::<usize>::new());
    }

    #[test]
    #[should_panic]
    fn bad_axis() {
        (1, 2).coord(2);
    }
}
