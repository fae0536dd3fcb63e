//! Native-endian frames.
//!
//! ```text
//! vector: [len: i32][len x T]
//! matrix: [rows: i32][cols: i32][rows * cols x T, row by row]
//! ```
//!
//! Scalars are stored in the host's byte order with no magic or version tag,
//! so a file only reads back correctly on a machine with the same endianness
//! and with the same element type it was written with.

use super::{invalid_data, io_err, open_file, rewind, truncate_here, OpenMode};
use crate::element::Element;
use crate::error::NarResult;
use crate::{Matrix, Vector};
use log::debug;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

// Caps the up-front allocation so a corrupt header can't reserve more than
// the stream actually holds.
const READ_CHUNK: usize = 1 << 16;

fn read_header<R: Read>(r: &mut R) -> NarResult<usize> {
    let mut b = [0u8; 4];
    r.read_exact(&mut b)
        .map_err(io_err("couldn't read header"))?;
    let n = i32::from_ne_bytes(b);
    usize::try_from(n).map_err(|_| invalid_data(format!("unreadable header: dimension {}", n)))
}

fn write_header<W: Write>(w: &mut W, n: usize) -> NarResult<()> {
    let n = i32::try_from(n)
        .map_err(|_| invalid_data(format!("dimension {} doesn't fit in a frame header", n)))?;
    w.write_all(&n.to_ne_bytes())
        .map_err(io_err("couldn't write file"))?;
    Ok(())
}

fn read_elements<T: Element, R: Read>(r: &mut R, n: usize) -> NarResult<Vec<T>> {
    let mut v = Vec::with_capacity(n.min(READ_CHUNK));
    let mut b = vec![0u8; T::WIDTH];
    for _ in 0..n {
        r.read_exact(&mut b).map_err(io_err("couldn't read file"))?;
        v.push(T::read_ne_bytes(&b));
    }
    Ok(v)
}

fn write_elements<T: Element, W: Write, I: Iterator<Item = T>>(w: &mut W, xs: I) -> NarResult<()> {
    let mut b = vec![0u8; T::WIDTH];
    for x in xs {
        x.write_ne_bytes(&mut b);
        w.write_all(&b).map_err(io_err("couldn't write file"))?;
    }
    Ok(())
}

pub fn read_vector<T: Element, R: Read>(mut r: R) -> NarResult<Vector<T>> {
    let n = read_header(&mut r)?;
    Ok(Vector::from_vec(read_elements(&mut r, n)?))
}

pub fn write_vector<T: Element, W: Write>(mut w: W, v: &Vector<T>) -> NarResult<()> {
    write_header(&mut w, v.len())?;
    write_elements(&mut w, v.iter())?;
    w.flush().map_err(io_err("couldn't write file"))?;
    Ok(())
}

/// Reads a matrix frame into a fresh matrix of the requested storage order.
/// The frame is always row by row, whatever order is requested.
pub fn read_matrix<T: Element, R: Read>(mut r: R, row_major: bool) -> NarResult<Matrix<T>> {
    let rows = read_header(&mut r)?;
    let cols = read_header(&mut r)?;
    let n = rows
        .checked_mul(cols)
        .ok_or_else(|| invalid_data(format!("unreadable header: {} x {}", rows, cols)))?;
    let xs = read_elements::<T, _>(&mut r, n)?;
    let m = Matrix::zeros(rows, cols, row_major);
    let mut xs = xs.into_iter();
    for i in 0..rows {
        for j in 0..cols {
            if let Some(x) = xs.next() {
                m.set(i, j, x);
            }
        }
    }
    Ok(m)
}

pub fn write_matrix<T: Element, W: Write>(mut w: W, m: &Matrix<T>) -> NarResult<()> {
    write_header(&mut w, m.rows())?;
    write_header(&mut w, m.cols())?;
    write_elements(&mut w, m.iter())?;
    w.flush().map_err(io_err("couldn't write file"))?;
    Ok(())
}

/// A binary frame file on disk. Every operation starts at the beginning of
/// the file; a write replaces the whole content.
pub struct BinaryFile<T> {
    file: File,
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Element> BinaryFile<T> {
    pub fn open<P: AsRef<Path>>(path: P, mode: OpenMode) -> NarResult<Self> {
        let path = path.as_ref();
        Ok(Self {
            file: open_file(path, mode)?,
            path: path.to_path_buf(),
            _marker: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_vector(&mut self) -> NarResult<Vector<T>> {
        rewind(&mut self.file)?;
        let v = read_vector(BufReader::new(&mut self.file))?;
        debug!("read {} {} elements from {}", v.len(), T::DTYPE, self.path.display());
        Ok(v)
    }

    pub fn write_vector(&mut self, v: &Vector<T>) -> NarResult<()> {
        rewind(&mut self.file)?;
        write_vector(BufWriter::new(&mut self.file), v)?;
        truncate_here(&mut self.file)?;
        debug!("wrote {} {} elements to {}", v.len(), T::DTYPE, self.path.display());
        Ok(())
    }

    pub fn read_matrix(&mut self, row_major: bool) -> NarResult<Matrix<T>> {
        rewind(&mut self.file)?;
        let m = read_matrix(BufReader::new(&mut self.file), row_major)?;
        debug!(
            "read {} x {} {} matrix from {}",
            m.rows(),
            m.cols(),
            T::DTYPE,
            self.path.display()
        );
        Ok(m)
    }

    pub fn write_matrix(&mut self, m: &Matrix<T>) -> NarResult<()> {
        rewind(&mut self.file)?;
        write_matrix(BufWriter::new(&mut self.file), m)?;
        truncate_here(&mut self.file)?;
        debug!(
            "wrote {} x {} {} matrix to {}",
            m.rows(),
            m.cols(),
            T::DTYPE,
            self.path.display()
        );
        Ok(())
    }
}
