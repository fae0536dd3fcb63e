use crate::buffer::Buffer;
use crate::dimension::{zip, Dimension, Indices};
use crate::element::Element;
use crate::error::{NarError, NarResult};

/// A strided view into a shared [`Buffer`].
///
/// Logical index `ix` lives in physical slot `offset + Σ ix[k] * strides[k]`.
/// Any number of views may alias the same buffer; a write through one is
/// seen by all of them. `Clone` makes another alias, [`copy`](Self::copy)
/// makes an independent array.
pub struct ArrayBase<T, D: Dimension> {
    pub(crate) data: Buffer<T>,
    pub(crate) offset: isize,
    pub(crate) dim: D,
    pub(crate) strides: D::Strides,
}

impl<T, D: Dimension> Clone for ArrayBase<T, D> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            offset: self.offset,
            dim: self.dim,
            strides: self.strides,
        }
    }
}

impl<T, D> ArrayBase<T, D>
where
    T: Element,
    D: Dimension,
{
    pub(crate) fn new_view(data: Buffer<T>, offset: isize, dim: D, strides: D::Strides) -> Self {
        Self {
            data,
            offset,
            dim,
            strides,
        }
    }

    pub(crate) fn from_vec_dim(v: Vec<T>, dim: D, strides: D::Strides) -> Self {
        debug_assert_eq!(v.len(), dim.size());
        Self::new_view(Buffer::from_vec(v), 0, dim, strides)
    }

    pub(crate) fn zeros_dim(dim: D, strides: D::Strides) -> Self {
        Self::new_view(Buffer::allocate(dim.size()), 0, dim, strides)
    }

    /// Builds a view over `data`, checking that every slot it can address
    /// lies inside the buffer. A zero stride is only accepted on an axis of
    /// length one or less.
    pub(crate) fn from_parts_dim(
        data: Buffer<T>,
        offset: usize,
        dim: D,
        strides: D::Strides,
    ) -> NarResult<Self> {
        let shape = dim.as_slice().to_vec();
        for (&d, &s) in zip(dim.as_slice(), strides.as_ref()) {
            if s == 0 && d > 1 {
                return Err(NarError::out_of_range("from_parts", &[d], &shape));
            }
        }
        let len = data.len();
        let origin = isize::try_from(offset)
            .map_err(|_| NarError::out_of_range("from_parts", &[offset], &[len]))?;
        if dim.as_slice().iter().all(|&d| d > 0) {
            match physical_extent(origin, &dim, &strides) {
                Some((lo, hi)) if lo >= 0 && (hi as usize) < len => {}
                _ => return Err(NarError::out_of_range("from_parts", &[offset], &[len])),
            }
        }
        Ok(Self::new_view(data, origin, dim, strides))
    }

    #[inline]
    pub(crate) fn slot(&self, index: &D) -> usize {
        self.offset
            .wrapping_add(D::stride_offset(index, &self.strides)) as usize
    }

    /// Reads logical `index` without checking it against the shape.
    ///
    /// Panics if the computed slot falls outside the backing buffer.
    #[inline]
    pub fn get_index(&self, index: &D) -> T {
        self.data.get(self.slot(index))
    }

    /// Writes logical `index` without checking it against the shape.
    ///
    /// Panics if the computed slot falls outside the backing buffer.
    #[inline]
    pub fn set_index(&self, index: &D, x: T) {
        self.data.set(self.slot(index), x)
    }

    /// # Safety
    ///
    /// `index` must address a slot inside the backing buffer.
    #[inline]
    pub unsafe fn get_index_unchecked(&self, index: &D) -> T {
        *self.as_ptr().offset(D::stride_offset(index, &self.strides))
    }

    /// # Safety
    ///
    /// `index` must address a slot inside the backing buffer.
    #[inline]
    pub unsafe fn set_index_unchecked(&self, index: &D, x: T) {
        *self.as_ptr().offset(D::stride_offset(index, &self.strides)) = x
    }

    pub fn at_index(&self, index: &D) -> NarResult<T> {
        if !self.dim.in_range(index) {
            return Err(NarError::out_of_range("at", index.as_slice(), self.shape()));
        }
        Ok(self.get_index(index))
    }

    pub fn set_at_index(&self, index: &D, x: T) -> NarResult<()> {
        if !self.dim.in_range(index) {
            return Err(NarError::out_of_range("set_at", index.as_slice(), self.shape()));
        }
        self.set_index(index, x);
        Ok(())
    }

    /// Copies the logical contents into a fresh, densely packed array
    /// (stride 1 for vectors, row-major for matrices).
    pub fn copy(&self) -> Self {
        Self::from_vec_dim(self.to_vec(), self.dim, self.dim.default_strides())
    }

    /// Overwrites every element with the matching element of `other`.
    ///
    /// Fails without touching either operand when the shapes differ. Overlapping
    /// views of the same buffer are handled by reading `other` first.
    pub fn assign(&self, other: &ArrayBase<T, D>) -> NarResult<()> {
        if self.dim != other.dim {
            return Err(NarError::DimensionMismatch {
                op: "assign",
                expected: self.shape().to_vec(),
                got: other.shape().to_vec(),
            });
        }
        if self.data.ptr_eq(&other.data) {
            let src = other.to_vec();
            for (ix, x) in zip(self.dim.indices(), src) {
                self.set_index(&ix, x);
            }
        } else {
            for ix in self.dim.indices() {
                self.set_index(&ix, other.get_index(&ix));
            }
        }
        Ok(())
    }

    /// Structural equality: same shape and same logical elements.
    pub fn equals(&self, other: &ArrayBase<T, D>) -> bool {
        self.dim == other.dim && self.iter().eq(other.iter())
    }

    pub fn fill(&self, x: T) {
        for ix in self.dim.indices() {
            self.set_index(&ix, x);
        }
    }

    pub fn iter(&self) -> Iter<'_, T, D> {
        Iter {
            array: self,
            indices: self.dim.indices(),
        }
    }

    /// Logical contents in logical order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }
}

impl<T, D: Dimension> ArrayBase<T, D> {
    pub fn shape(&self) -> &[usize] {
        self.dim.as_slice()
    }

    pub fn strides(&self) -> &[isize] {
        self.strides.as_ref()
    }

    pub fn raw_dim(&self) -> D {
        self.dim
    }

    pub fn size(&self) -> usize {
        self.dim.size()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn buffer(&self) -> &Buffer<T> {
        &self.data
    }

    /// Pointer to logical element zero, for native interop.
    ///
    /// Only meaningful while the buffer is alive; writes through it are
    /// visible to every alias.
    pub fn as_ptr(&self) -> *mut T {
        self.data.base_address().wrapping_offset(self.offset)
    }
}

impl<T: Element, D: Dimension> PartialEq for ArrayBase<T, D> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

/// Logical-order iterator over the elements of a view.
pub struct Iter<'a, T, D: Dimension> {
    array: &'a ArrayBase<T, D>,
    indices: Indices<D>,
}

impl<'a, T: Element, D: Dimension> Iterator for Iter<'a, T, D> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        let ix = self.indices.next()?;
        Some(self.array.get_index(&ix))
    }
}

impl<'a, T: Element, D: Dimension> IntoIterator for &'a ArrayBase<T, D> {
    type Item = T;
    type IntoIter = Iter<'a, T, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Lowest and highest slot a non-empty view touches, or `None` when the
// arithmetic overflows.
fn physical_extent<D: Dimension>(offset: isize, dim: &D, strides: &D::Strides) -> Option<(isize, isize)> {
    let mut lo = offset;
    let mut hi = offset;
    for (&d, &s) in zip(dim.as_slice(), strides.as_ref()) {
        let reach = isize::try_from(d - 1).ok()?.checked_mul(s)?;
        if reach < 0 {
            lo = lo.checked_add(reach)?;
        } else {
            hi = hi.checked_add(reach)?;
        }
    }
    Some((lo, hi))
}
