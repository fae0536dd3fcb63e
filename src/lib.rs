//! Strided vector and matrix views over shared, reference-counted buffers,
//! with text-table and binary file encodings.
//!
//! A [`Buffer`] owns the elements. [`Vector`] and [`Matrix`] are views that
//! describe an affine mapping from logical indices to buffer slots, so
//! slicing, taking rows or columns, and cutting sub-matrices never copy.
//! Every view of a buffer sees writes made through any other view.
//!
//! ```
//! use numarray::{matrix, Matrix};
//!
//! let m: Matrix<i32> = matrix![[0, 1, 2], [3, 4, 5], [6, 7, 8]];
//! let s = m.subarray(1, 1, 3, 3);
//! assert_eq!(s, matrix![[4, 5], [7, 8]]);
//! s.set(0, 0, 40);
//! assert_eq!(m.get(1, 1), 40);
//! ```
//!
//! Operations that can fail come in two flavours: an unchecked fast path
//! (`get`, `slice`, `row`, `subarray`, ...) and a checked one returning
//! [`NarResult`] (`at`, `slice_checked`, `row_checked`, ...).

#[macro_use]
mod macros;

mod array;
mod buffer;
mod dimension;
mod element;
pub mod error;
mod format;
pub mod io;
mod matrix;
mod vector;

pub use crate::array::{ArrayBase, Iter};
pub use crate::buffer::Buffer;
pub use crate::dimension::{Dimension, Indices, Ix1, Ix2};
pub use crate::element::{DType, Element};
pub use crate::error::{ErrorKind, FormatErrorKind, NarError, NarResult};
pub use crate::io::{BinaryFile, OpenMode, TextFile, TextFormat};
pub use crate::matrix::{Matrix, Order};
pub use crate::vector::Vector;

#[cfg(feature = "complex")]
pub use num_complex::Complex;
