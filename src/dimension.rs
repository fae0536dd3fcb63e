use std::fmt;

pub type Ix1 = [usize; 1];

pub type Ix2 = [usize; 2];

pub(crate) fn zip<I, J>(i: I, j: J) -> std::iter::Zip<I::IntoIter, J::IntoIter>
where
    I: IntoIterator,
    J: IntoIterator,
{
    i.into_iter().zip(j)
}

#[inline(always)]
pub fn stride_offset(n: usize, stride: isize) -> isize {
    (n as isize).wrapping_mul(stride)
}

/// Fixed-rank shape. Strides are signed so views may walk backwards.
pub trait Dimension: Copy + PartialEq + fmt::Debug {
    type Strides: Copy + PartialEq + fmt::Debug + AsRef<[isize]> + AsMut<[isize]>;

    const NDIM: usize;

    fn as_slice(&self) -> &[usize];

    fn as_slice_mut(&mut self) -> &mut [usize];

    fn zero() -> Self;

    fn zero_strides() -> Self::Strides;

    fn size(&self) -> usize {
        self.as_slice().iter().product()
    }

    // [a, b, c] => strides [b * c, c, 1]
    fn default_strides(&self) -> Self::Strides {
        let mut x = Self::zero_strides();
        let mut prod = 1isize;
        for (m, &dim) in zip(x.as_mut().iter_mut().rev(), self.as_slice().iter().rev()) {
            *m = prod;
            prod *= dim as isize;
        }
        x
    }

    // [a, b, c] => strides [1, a, a * b]
    fn fortran_strides(&self) -> Self::Strides {
        let mut x = Self::zero_strides();
        let mut prod = 1isize;
        for (m, &dim) in zip(x.as_mut().iter_mut(), self.as_slice().iter()) {
            *m = prod;
            prod *= dim as isize;
        }
        x
    }

    #[inline]
    fn in_range(&self, index: &Self) -> bool {
        zip(index.as_slice(), self.as_slice()).all(|(&i, &d)| i < d)
    }

    #[inline]
    fn first_index(&self) -> Option<Self> {
        for ax in self.as_slice().iter() {
            if *ax == 0 {
                return None;
            }
        }
        Some(Self::zero())
    }

    /// Next index in logical (last axis fastest) order.
    #[inline]
    fn next_for(&self, index: Self) -> Option<Self> {
        let mut index = index;
        let mut done = false;
        for (&dim, ix) in zip(self.as_slice(), index.as_slice_mut()).rev() {
            *ix += 1;
            if *ix == dim {
                *ix = 0;
            } else {
                done = true;
                break;
            }
        }
        if done {
            Some(index)
        } else {
            None
        }
    }

    #[inline]
    fn stride_offset(index: &Self, strides: &Self::Strides) -> isize {
        let mut offset = 0isize;
        for (&i, &s) in zip(index.as_slice(), strides.as_ref()) {
            offset = offset.wrapping_add(stride_offset(i, s));
        }
        offset
    }

    fn indices(&self) -> Indices<Self> {
        Indices {
            dim: *self,
            index: self.first_index(),
        }
    }
}

macro_rules! dimension_impl_array {
    ($n:expr) => {
        impl Dimension for [usize; $n] {
            type Strides = [isize; $n];

            const NDIM: usize = $n;

            fn as_slice(&self) -> &[usize] {
                self
            }

            fn as_slice_mut(&mut self) -> &mut [usize] {
                self
            }

            fn zero() -> Self {
                [0usize; $n]
            }

            fn zero_strides() -> Self::Strides {
                [0isize; $n]
            }
        }
    };
}

dimension_impl_array!(1);
dimension_impl_array!(2);

/// Every index of a shape, in logical order.
pub struct Indices<D> {
    dim: D,
    index: Option<D>,
}

impl<D: Dimension> Iterator for Indices<D> {
    type Item = D;

    #[inline]
    fn next(&mut self) -> Option<D> {
        let ix = self.index?;
        self.index = self.dim.next_for(ix);
        Some(ix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strides() {
        let d: Ix2 = [4, 5];
        assert_eq!(d.default_strides(), [5, 1]);
        assert_eq!(d.fortran_strides(), [1, 4]);
        let v: Ix1 = [7];
        assert_eq!(v.default_strides(), [1]);
        assert_eq!(v.fortran_strides(), [1]);
    }

    #[test]
    fn test_logical_order() {
        let d: Ix2 = [2, 3];
        let ix: Vec<Ix2> = d.indices().collect();
        assert_eq!(ix, vec![[0, 0], [0, 1], [0, 2], [1, 0], [1, 1], [1, 2]]);
        assert_eq!([0usize, 3].indices().count(), 0);
        assert_eq!(d.size(), 6);
    }

    #[test]
    fn test_stride_offset() {
        let strides = [10isize, -1];
        assert_eq!(<Ix2 as Dimension>::stride_offset(&[2, 3], &strides), 17);
        assert!([3usize, 2].in_range(&[2, 1]));
        assert!(![3usize, 2].in_range(&[3, 0]));
    }
}
