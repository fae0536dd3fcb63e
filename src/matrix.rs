use crate::array::ArrayBase;
use crate::buffer::Buffer;
use crate::dimension::{Dimension, Ix2};
use crate::element::Element;
use crate::error::{NarError, NarResult};
use crate::vector::Vector;
use rawpointer::PointerExt;

/// Strided 2-D view. Row- and column-major are just stride choices.
pub type Matrix<T> = ArrayBase<T, Ix2>;

/// Storage order, derived from the strides alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Order {
    RowMajor = 0,
    ColMajor = 1,
    Unknown = 2,
}

impl<T: Element> ArrayBase<T, Ix2> {
    /// Fresh zeroed `rows x cols` matrix in the requested storage order.
    pub fn zeros(rows: usize, cols: usize, row_major: bool) -> Self {
        let dim = [rows, cols];
        let strides = if row_major {
            dim.default_strides()
        } else {
            dim.fortran_strides()
        };
        Self::zeros_dim(dim, strides)
    }

    /// Row-major matrix from `rows * cols` elements in row-major order.
    pub fn from_vec(rows: usize, cols: usize, v: Vec<T>) -> NarResult<Self> {
        let dim = [rows, cols];
        if v.len() != dim.size() {
            return Err(NarError::DimensionMismatch {
                op: "from_vec",
                expected: vec![rows * cols],
                got: vec![v.len()],
            });
        }
        Ok(Self::from_vec_dim(v, dim, dim.default_strides()))
    }

    pub fn from_rows<const N: usize>(xs: Vec<[T; N]>) -> Self {
        let dim = [xs.len(), N];
        let v = xs.into_iter().flatten().collect();
        Self::from_vec_dim(v, dim, dim.default_strides())
    }

    /// View over `data` with element `(i, j)` at
    /// `offset + row_stride * i + col_stride * j`. Fails if any addressed slot
    /// lies outside the buffer.
    pub fn from_parts(
        data: Buffer<T>,
        offset: usize,
        row_stride: isize,
        col_stride: isize,
        rows: usize,
        cols: usize,
    ) -> NarResult<Self> {
        Self::from_parts_dim(data, offset, [rows, cols], [row_stride, col_stride])
    }

    pub fn rows(&self) -> usize {
        self.dim[0]
    }

    pub fn cols(&self) -> usize {
        self.dim[1]
    }

    pub fn row_stride(&self) -> isize {
        self.strides[0]
    }

    pub fn col_stride(&self) -> isize {
        self.strides[1]
    }

    pub fn in_range(&self, i: usize, j: usize) -> bool {
        i < self.rows() && j < self.cols()
    }

    pub fn at(&self, i: usize, j: usize) -> NarResult<T> {
        self.at_index(&[i, j])
    }

    pub fn set_at(&self, i: usize, j: usize, x: T) -> NarResult<()> {
        self.set_at_index(&[i, j], x)
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.get_index(&[i, j])
    }

    #[inline]
    pub fn set(&self, i: usize, j: usize, x: T) {
        self.set_index(&[i, j], x)
    }

    /// # Safety
    ///
    /// `(i, j)` must map to a slot of the backing buffer.
    #[inline]
    pub unsafe fn get_unchecked(&self, i: usize, j: usize) -> T {
        *self
            .as_ptr()
            .stride_offset(self.row_stride(), i)
            .stride_offset(self.col_stride(), j)
    }

    /// # Safety
    ///
    /// `(i, j)` must map to a slot of the backing buffer.
    #[inline]
    pub unsafe fn set_unchecked(&self, i: usize, j: usize, x: T) {
        *self
            .as_ptr()
            .stride_offset(self.row_stride(), i)
            .stride_offset(self.col_stride(), j) = x
    }

    #[inline]
    fn offset_of(&self, i: usize, j: usize) -> isize {
        self.offset + <Ix2 as Dimension>::stride_offset(&[i, j], &self.strides)
    }

    /// Row `i` as a vector sharing this buffer. `i` is not validated.
    pub fn row(&self, i: usize) -> Vector<T> {
        Vector::new_view(
            self.data.clone(),
            self.offset_of(i, 0),
            [self.cols()],
            [self.col_stride()],
        )
    }

    /// Column `j` as a vector sharing this buffer. `j` is not validated.
    pub fn col(&self, j: usize) -> Vector<T> {
        Vector::new_view(
            self.data.clone(),
            self.offset_of(0, j),
            [self.rows()],
            [self.row_stride()],
        )
    }

    pub fn row_checked(&self, i: usize) -> NarResult<Vector<T>> {
        if i >= self.rows() {
            return Err(NarError::out_of_range("row", &[i, 0], self.shape()));
        }
        Ok(self.row(i))
    }

    pub fn col_checked(&self, j: usize) -> NarResult<Vector<T>> {
        if j >= self.cols() {
            return Err(NarError::out_of_range("col", &[0, j], self.shape()));
        }
        Ok(self.col(j))
    }

    /// The half-open block `[start_row, end_row) x [start_col, end_col)`,
    /// sharing this buffer and keeping its strides. Corners are not validated.
    pub fn subarray(&self, start_row: usize, start_col: usize, end_row: usize, end_col: usize) -> Self {
        Self::new_view(
            self.data.clone(),
            self.offset_of(start_row, start_col),
            [
                end_row.saturating_sub(start_row),
                end_col.saturating_sub(start_col),
            ],
            self.strides,
        )
    }

    /// Like [`subarray`](Self::subarray), but both `(start_row, start_col)`
    /// and `(end_row - 1, end_col - 1)` must be valid positions.
    pub fn subarray_checked(
        &self,
        start_row: usize,
        start_col: usize,
        end_row: usize,
        end_col: usize,
    ) -> NarResult<Self> {
        let valid = self.in_range(start_row, start_col)
            && end_row > 0
            && end_col > 0
            && self.in_range(end_row - 1, end_col - 1)
            && start_row <= end_row
            && start_col <= end_col;
        if !valid {
            return Err(NarError::out_of_range(
                "subarray",
                &[start_row, start_col, end_row, end_col],
                self.shape(),
            ));
        }
        Ok(self.subarray(start_row, start_col, end_row, end_col))
    }

    /// Same buffer with rows and columns swapped.
    pub fn transpose(&self) -> Self {
        Self::new_view(
            self.data.clone(),
            self.offset,
            [self.cols(), self.rows()],
            [self.col_stride(), self.row_stride()],
        )
    }

    pub fn order(&self) -> Order {
        if self.col_stride() == 1 {
            Order::RowMajor
        } else if self.row_stride() == 1 {
            Order::ColMajor
        } else {
            Order::Unknown
        }
    }

    /// Distance between consecutive rows (row-major) or columns
    /// (column-major), as BLAS expects it.
    pub fn leading_dimension(&self) -> NarResult<isize> {
        match self.order() {
            Order::RowMajor => Ok(self.row_stride()),
            Order::ColMajor => Ok(self.col_stride()),
            Order::Unknown => Err(NarError::NoLeadingDimension {
                row_stride: self.row_stride(),
                col_stride: self.col_stride(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn iota(rows: usize, cols: usize, row_major: bool) -> Matrix<i32> {
        let m = Matrix::zeros(rows, cols, row_major);
        let mut k = 0;
        for i in 0..rows {
            for j in 0..cols {
                m.set(i, j, k);
                k += 1;
            }
        }
        m
    }

    #[test]
    fn test_subarray_example() {
        let m = iota(3, 3, true);
        let s = m.subarray(1, 1, 3, 3);
        assert_eq!(s.rows(), 2);
        assert_eq!(s.cols(), 2);
        assert_eq!(s, Matrix::from_rows(vec![[4, 5], [7, 8]]));
        s.set(0, 0, -4);
        assert_eq!(m.get(1, 1), -4);
    }

    #[test]
    fn test_layouts() {
        let r = iota(2, 3, true);
        let c = iota(2, 3, false);
        assert_eq!(r.strides(), &[3, 1]);
        assert_eq!(c.strides(), &[1, 2]);
        assert_eq!(r.order(), Order::RowMajor);
        assert_eq!(c.order(), Order::ColMajor);
        assert!(r.equals(&c));
        assert_eq!(r.buffer().to_vec(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(c.buffer().to_vec(), vec![0, 3, 1, 4, 2, 5]);
    }

    #[test]
    fn test_at_and_unchecked() {
        for &row_major in &[true, false] {
            let m = iota(3, 4, row_major);
            for i in 0..3 {
                for j in 0..4 {
                    assert_eq!(m.at(i, j).unwrap(), m.get(i, j));
                    assert_eq!(unsafe { m.get_unchecked(i, j) }, (i * 4 + j) as i32);
                }
            }
            assert_eq!(m.at(3, 0).unwrap_err().kind(), ErrorKind::OutOfRange);
            assert_eq!(m.at(0, 4).unwrap_err().kind(), ErrorKind::OutOfRange);
            unsafe { m.set_unchecked(2, 3, 99) };
            assert_eq!(m.at(2, 3).unwrap(), 99);
            assert!(m.set_at(5, 5, 1).is_err());
        }
    }

    #[test]
    fn test_rows_and_cols() {
        for &row_major in &[true, false] {
            let m = iota(3, 4, row_major);
            for i in 0..3 {
                let expect = Vector::from_vec((0..4).map(|j| m.get(i, j)).collect());
                let row = m.row(i);
                assert_eq!(row.stride(), m.col_stride());
                assert!(row.equals(&expect));
            }
            let col = m.col(2);
            assert_eq!(col.len(), 3);
            assert_eq!(col.stride(), m.row_stride());
            assert_eq!(col.to_vec(), vec![2, 6, 10]);
            col.set(1, -6);
            assert_eq!(m.get(1, 2), -6);
        }
    }

    #[test]
    fn test_checked_views() {
        let m = iota(3, 4, true);
        assert!(m.row_checked(2).is_ok());
        assert_eq!(m.row_checked(3).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert!(m.col_checked(3).is_ok());
        assert_eq!(m.col_checked(4).unwrap_err().kind(), ErrorKind::OutOfRange);

        let s = m.subarray_checked(0, 1, 3, 4).unwrap();
        assert_eq!(s.to_vec(), vec![1, 2, 3, 5, 6, 7, 9, 10, 11]);
        assert!(m.subarray_checked(0, 0, 4, 4).is_err());
        assert!(m.subarray_checked(0, 0, 0, 2).is_err());
        assert!(m.subarray_checked(2, 2, 1, 3).is_err());
    }

    #[test]
    fn test_from_parts_checks_strides() {
        let m = Matrix::<i32>::zeros(4, 4, true);
        let buf = m.buffer().clone();
        for (rs, cs) in [(0, 0), (4, 0), (0, 1), (isize::MAX, 1), (4, isize::MIN)] {
            let e = Matrix::from_parts(buf.clone(), 0, rs, cs, 4, 4).unwrap_err();
            assert_eq!(e.kind(), ErrorKind::OutOfRange);
        }
        let row = Matrix::from_parts(buf.clone(), 4, 0, 1, 1, 4).unwrap();
        assert_eq!(row.shape(), &[1, 4]);
        let col = Matrix::from_parts(buf, 3, 4, 0, 4, 1).unwrap();
        col.set(3, 0, 7);
        assert_eq!(m.get(3, 3), 7);
    }

    #[test]
    fn test_leading_dimension() {
        let m = Matrix::<f64>::zeros(4, 5, true);
        assert_eq!(m.leading_dimension().unwrap(), 5);
        let c = Matrix::<f64>::zeros(4, 5, false);
        assert_eq!(c.leading_dimension().unwrap(), 4);

        let big = Matrix::<f64>::zeros(6, 6, true);
        let strided = Matrix::from_parts(big.buffer().clone(), 0, 12, 2, 3, 3).unwrap();
        assert_eq!(strided.order(), Order::Unknown);
        let e = strided.leading_dimension().unwrap_err();
        assert_eq!(e.kind(), ErrorKind::NoLeadingDimension);

        let sub = strided.subarray(1, 0, 3, 2);
        assert_eq!(sub.order(), Order::Unknown);
        assert!(sub.leading_dimension().is_err());
    }

    #[test]
    fn test_copy_normalizes_layout() {
        let m = iota(3, 3, false);
        let s = m.subarray(0, 1, 2, 3);
        let c = s.copy();
        assert_eq!(c.order(), Order::RowMajor);
        assert_eq!(c.strides(), &[2, 1]);
        assert_eq!(c.buffer().to_vec(), vec![1, 2, 4, 5]);
        assert!(c.equals(&s));
        c.set(0, 0, 100);
        assert_eq!(m.get(0, 1), 1);
    }

    #[test]
    fn test_assign_and_mismatch() {
        let a = iota(2, 3, true);
        let b = iota(2, 3, false);
        b.fill(7);
        a.assign(&b).unwrap();
        assert!(a.iter().all(|x| x == 7));
        assert_eq!(a.order(), Order::RowMajor);

        let t = iota(3, 2, true);
        let e = a.assign(&t).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::DimensionMismatch);
        assert!(a.iter().all(|x| x == 7));
        assert_eq!(t.to_vec(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_transpose() {
        let m = iota(2, 3, true);
        let t = m.transpose();
        assert_eq!(t.shape(), &[3, 2]);
        assert_eq!(t.order(), Order::ColMajor);
        assert_eq!(t.get(2, 1), m.get(1, 2));
        t.set(0, 1, 50);
        assert_eq!(m.get(1, 0), 50);
    }

    #[test]
    fn test_from_vec_len_check() {
        assert!(Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).is_ok());
        let e = Matrix::from_vec(2, 2, vec![1, 2, 3]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::DimensionMismatch);
    }
}
