use crate::array::ArrayBase;
use crate::buffer::Buffer;
use crate::dimension::Ix1;
use crate::element::Element;
use crate::error::{NarError, NarResult};
use rawpointer::PointerExt;

/// Strided 1-D view.
pub type Vector<T> = ArrayBase<T, Ix1>;

impl<T: Element> ArrayBase<T, Ix1> {
    /// Fresh zeroed vector of length `n`.
    pub fn zeros(n: usize) -> Self {
        Self::zeros_dim([n], [1])
    }

    pub fn from_elem(x: T, n: usize) -> Self {
        Self::new_view(Buffer::from_elem(x, n), 0, [n], [1])
    }

    pub fn from_vec(v: Vec<T>) -> Self {
        let n = v.len();
        Self::from_vec_dim(v, [n], [1])
    }

    /// View of `len` elements of `data` starting at slot `offset`, `stride`
    /// slots apart. Fails if any of them lies outside the buffer.
    pub fn from_parts(data: Buffer<T>, offset: usize, stride: isize, len: usize) -> NarResult<Self> {
        Self::from_parts_dim(data, offset, [len], [stride])
    }

    pub fn len(&self) -> usize {
        self.dim[0]
    }

    pub fn stride(&self) -> isize {
        self.strides[0]
    }

    pub fn in_range(&self, i: usize) -> bool {
        i < self.len()
    }

    pub fn at(&self, i: usize) -> NarResult<T> {
        self.at_index(&[i])
    }

    pub fn set_at(&self, i: usize, x: T) -> NarResult<()> {
        self.set_at_index(&[i], x)
    }

    /// Element `i`, not checked against the length.
    #[inline]
    pub fn get(&self, i: usize) -> T {
        self.get_index(&[i])
    }

    #[inline]
    pub fn set(&self, i: usize, x: T) {
        self.set_index(&[i], x)
    }

    /// # Safety
    ///
    /// `offset + stride * i` must be a slot of the backing buffer.
    #[inline]
    pub unsafe fn get_unchecked(&self, i: usize) -> T {
        *self.as_ptr().stride_offset(self.stride(), i)
    }

    /// # Safety
    ///
    /// `offset + stride * i` must be a slot of the backing buffer.
    #[inline]
    pub unsafe fn set_unchecked(&self, i: usize, x: T) {
        *self.as_ptr().stride_offset(self.stride(), i) = x
    }

    /// View of logical elements `[start, end)`, sharing this buffer.
    ///
    /// Bounds are not validated; a view reaching past the buffer panics on
    /// access through the safe accessors. See [`slice_checked`](Self::slice_checked).
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let offset = self.offset + start as isize * self.stride();
        Self::new_view(self.data.clone(), offset, [end.saturating_sub(start)], self.strides)
    }

    /// Like [`slice`](Self::slice), but `start` and `end - 1` must both be
    /// valid indices and `start <= end`.
    pub fn slice_checked(&self, start: usize, end: usize) -> NarResult<Self> {
        if !self.in_range(start) || end == 0 || !self.in_range(end - 1) || start > end {
            return Err(NarError::out_of_range("slice", &[start, end], self.shape()));
        }
        Ok(self.slice(start, end))
    }

    /// Same elements in reverse order, sharing this buffer.
    pub fn reversed(&self) -> Self {
        let n = self.len();
        if n == 0 {
            return self.clone();
        }
        let offset = self.offset + (n as isize - 1) * self.stride();
        Self::new_view(self.data.clone(), offset, self.dim, [-self.stride()])
    }
}
