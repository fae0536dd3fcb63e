use super::{io_err, open_file, rewind, truncate_here, OpenMode};
use crate::element::Element;
use crate::error::{FormatErrorKind, NarError, NarResult};
use crate::{Matrix, Vector};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Table layout options.
///
/// Lines are always split on whitespace. Any non-whitespace character of
/// `separator` also splits tokens, so a table written with `","` reads back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFormat {
    /// Written between entries of a row.
    pub separator: String,
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            separator: " ".to_string(),
        }
    }
}

impl TextFormat {
    pub fn with_separator(separator: &str) -> Self {
        Self {
            separator: separator.to_string(),
        }
    }

    /// Fails when the separator would be confused with the entries it
    /// separates: an empty string, or one holding digits, letters, signs or
    /// a decimal point.
    pub fn validate(&self) -> NarResult<()> {
        check_separator(&self.separator)
    }

    fn is_delimiter(&self, c: char) -> bool {
        c.is_whitespace() || self.separator.contains(c)
    }

    fn tokens<'a>(&'a self, line: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        line.split(move |c: char| self.is_delimiter(c))
            .filter(|t| !t.is_empty())
    }
}

fn check_separator(sep: &str) -> NarResult<()> {
    let numeric = |c: char| c.is_alphanumeric() || matches!(c, '+' | '-' | '.');
    if sep.is_empty() || sep.chars().any(numeric) {
        return Err(FormatErrorKind::InvalidSeparator(sep.to_string()).into());
    }
    Ok(())
}

fn parse_token<T: Element>(token: &str, line: usize) -> NarResult<T> {
    token.parse::<T>().map_err(|_| {
        NarError::from(FormatErrorKind::UnparsableToken {
            line,
            token: token.to_string(),
        })
    })
}

fn scan_dimensions<T: Element, R: BufRead>(r: R, format: &TextFormat) -> NarResult<(usize, usize)> {
    let mut lines = 0;
    let mut file_cols: Option<usize> = None;
    for line in r.lines() {
        let line = line.map_err(io_err("couldn't read line"))?;
        lines += 1;
        let mut line_cols = 0;
        for token in format.tokens(&line) {
            parse_token::<T>(token, lines)?;
            line_cols += 1;
        }
        match file_cols {
            None => file_cols = Some(line_cols),
            Some(expected) if expected != line_cols => {
                return Err(FormatErrorKind::UnevenLineLengths {
                    line: lines,
                    expected,
                    got: line_cols,
                }
                .into())
            }
            Some(_) => {}
        }
    }
    Ok((lines, file_cols.unwrap_or(0)))
}

/// Counts lines and columns of a whitespace-separated table, checking every
/// line has the same number of parseable tokens. The stream is left where it
/// started.
pub fn infer_dimensions<T: Element, R: BufRead + Seek>(r: &mut R) -> NarResult<(usize, usize)> {
    infer_dimensions_with::<T, R>(r, &TextFormat::default())
}

pub fn infer_dimensions_with<T: Element, R: BufRead + Seek>(
    r: &mut R,
    format: &TextFormat,
) -> NarResult<(usize, usize)> {
    format.validate()?;
    let start = r.stream_position().map_err(io_err("couldn't seek file"))?;
    let dims = scan_dimensions::<T, _>(&mut *r, format);
    r.seek(SeekFrom::Start(start))
        .map_err(io_err("couldn't seek file"))?;
    let dims = dims?;
    debug!("inferred {} x {} table", dims.0, dims.1);
    Ok(dims)
}

/// Reads every whitespace-separated token to end of input, ignoring line
/// breaks.
pub fn read_vector<T: Element, R: BufRead>(r: R) -> NarResult<Vector<T>> {
    read_vector_with(r, &TextFormat::default())
}

pub fn read_vector_with<T: Element, R: BufRead>(r: R, format: &TextFormat) -> NarResult<Vector<T>> {
    format.validate()?;
    let mut v = Vec::new();
    for (n, line) in r.lines().enumerate() {
        let line = line.map_err(io_err("couldn't read line"))?;
        for token in format.tokens(&line) {
            v.push(parse_token(token, n + 1)?);
        }
    }
    Ok(Vector::from_vec(v))
}

/// Writes the elements in logical order with `sep` between them and nothing
/// after the last one.
pub fn write_vector<T: Element, W: Write>(mut w: W, v: &Vector<T>, sep: &str) -> NarResult<()> {
    check_separator(sep)?;
    for (i, x) in v.iter().enumerate() {
        if i > 0 {
            w.write_all(sep.as_bytes())
                .map_err(io_err("couldn't write file"))?;
        }
        write!(w, "{}", x).map_err(io_err("couldn't write file"))?;
    }
    w.flush().map_err(io_err("couldn't write file"))?;
    Ok(())
}

/// Reads a whitespace-separated table into a fresh matrix with the requested
/// storage order.
pub fn read_matrix<T: Element, R: BufRead + Seek>(r: &mut R, row_major: bool) -> NarResult<Matrix<T>> {
    read_matrix_with(r, row_major, &TextFormat::default())
}

pub fn read_matrix_with<T: Element, R: BufRead + Seek>(
    r: &mut R,
    row_major: bool,
    format: &TextFormat,
) -> NarResult<Matrix<T>> {
    let (rows, cols) = infer_dimensions_with::<T, R>(r, format)?;
    let m = Matrix::zeros(rows, cols, row_major);
    for (i, line) in (&mut *r).lines().take(rows).enumerate() {
        let line = line.map_err(io_err("couldn't read line"))?;
        let mut tokens = format.tokens(&line);
        for j in 0..cols {
            let x = match tokens.next() {
                Some(token) => parse_token(token, i + 1)?,
                None => {
                    return Err(FormatErrorKind::UnevenLineLengths {
                        line: i + 1,
                        expected: cols,
                        got: j,
                    }
                    .into())
                }
            };
            m.set(i, j, x);
        }
    }
    Ok(m)
}

/// Writes one line per row, entries separated by `sep`.
///
/// A matrix with rows but no columns writes nothing and so reads back as
/// `0 x 0`.
pub fn write_matrix<T: Element, W: Write>(mut w: W, m: &Matrix<T>, sep: &str) -> NarResult<()> {
    check_separator(sep)?;
    let cols = m.cols();
    for i in 0..m.rows() {
        for j in 0..cols {
            write!(w, "{}", m.get(i, j)).map_err(io_err("couldn't write file"))?;
            let tail = if j + 1 == cols { "\n" } else { sep };
            w.write_all(tail.as_bytes())
                .map_err(io_err("couldn't write file"))?;
        }
    }
    w.flush().map_err(io_err("couldn't write file"))?;
    Ok(())
}

/// A text table on disk.
///
/// Every operation starts from the beginning of the file; a write replaces
/// the whole content.
pub struct TextFile<T> {
    file: File,
    path: PathBuf,
    format: TextFormat,
    _marker: PhantomData<T>,
}

impl<T: Element> TextFile<T> {
    pub fn open<P: AsRef<Path>>(path: P, mode: OpenMode) -> NarResult<Self> {
        let path = path.as_ref();
        Ok(Self {
            file: open_file(path, mode)?,
            path: path.to_path_buf(),
            format: TextFormat::default(),
            _marker: PhantomData,
        })
    }

    pub fn with_format(mut self, format: TextFormat) -> Self {
        self.format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> &TextFormat {
        &self.format
    }

    pub fn dimensions(&mut self) -> NarResult<(usize, usize)> {
        rewind(&mut self.file)?;
        infer_dimensions_with::<T, _>(&mut BufReader::new(&mut self.file), &self.format)
    }

    pub fn read_vector(&mut self) -> NarResult<Vector<T>> {
        rewind(&mut self.file)?;
        let v = read_vector_with(BufReader::new(&mut self.file), &self.format)?;
        debug!("read vector of {} from {}", v.len(), self.path.display());
        Ok(v)
    }

    pub fn write_vector(&mut self, v: &Vector<T>) -> NarResult<()> {
        rewind(&mut self.file)?;
        write_vector(BufWriter::new(&mut self.file), v, &self.format.separator)?;
        truncate_here(&mut self.file)?;
        debug!("wrote vector of {} to {}", v.len(), self.path.display());
        Ok(())
    }

    pub fn read_matrix(&mut self, row_major: bool) -> NarResult<Matrix<T>> {
        rewind(&mut self.file)?;
        let m = read_matrix_with(&mut BufReader::new(&mut self.file), row_major, &self.format)?;
        debug!(
            "read {} x {} matrix from {}",
            m.rows(),
            m.cols(),
            self.path.display()
        );
        Ok(m)
    }

    pub fn write_matrix(&mut self, m: &Matrix<T>) -> NarResult<()> {
        rewind(&mut self.file)?;
        write_matrix(BufWriter::new(&mut self.file), m, &self.format.separator)?;
        truncate_here(&mut self.file)?;
        debug!(
            "wrote {} x {} matrix to {}",
            m.rows(),
            m.cols(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Cursor;

    fn cursor(s: &str) -> Cursor<Vec<u8>> {
        Cursor::new(s.as_bytes().to_vec())
    }

    #[test]
    fn test_infer_dimensions() {
        let mut c = cursor("1 2\n3 4\n5 6\n");
        assert_eq!(infer_dimensions::<i32, _>(&mut c).unwrap(), (3, 2));
        assert_eq!(c.position(), 0);

        let mut c = cursor("1 2\n3 4\n5 6 7\n");
        let e = infer_dimensions::<i32, _>(&mut c).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Format);
        assert!(matches!(
            e,
            NarError::Format(FormatErrorKind::UnevenLineLengths {
                line: 3,
                expected: 2,
                got: 3
            })
        ));
        assert_eq!(c.position(), 0);

        assert_eq!(infer_dimensions::<f64, _>(&mut cursor("")).unwrap(), (0, 0));
        assert_eq!(
            infer_dimensions::<f64, _>(&mut cursor("  1.5\t2 \n3 4")).unwrap(),
            (2, 2)
        );
    }

    #[test]
    fn test_infer_restores_position() {
        let mut c = cursor("skip\n1 2\n3 4\n");
        c.set_position(5);
        assert_eq!(infer_dimensions::<u8, _>(&mut c).unwrap(), (2, 2));
        assert_eq!(c.position(), 5);
    }

    #[test]
    fn test_read_vector_ignores_lines() {
        let v: Vector<i64> = read_vector(cursor("1 2\n 3\n\n4   5\n")).unwrap();
        assert_eq!(v.to_vec(), vec![1, 2, 3, 4, 5]);
        let empty: Vector<f32> = read_vector(cursor("")).unwrap();
        assert!(empty.is_empty());

        let e = read_vector::<i32, _>(cursor("1 2\n3 x\n")).unwrap_err();
        assert!(matches!(
            e,
            NarError::Format(FormatErrorKind::UnparsableToken { line: 2, .. })
        ));
    }

    #[test]
    fn test_write_vector() {
        let mut out: Vec<u8> = Vec::new();
        write_vector(&mut out, &Vector::from_vec(vec![1, 2, 3]), ",").unwrap();
        assert_eq!(out, b"1,2,3");

        let mut out: Vec<u8> = Vec::new();
        let v = Vector::from_vec(vec![0.5f64, 1.0, 2.5, 3.0]).reversed();
        write_vector(&mut out, &v, " ").unwrap();
        assert_eq!(out, b"3 2.5 1 0.5");
    }

    #[test]
    fn test_matrix_round_trip() {
        let m = Matrix::from_rows(vec![[1, -2, 3], [4, 5, -6]]);
        for sep in [" ", ",", "\t"] {
            let mut out: Vec<u8> = Vec::new();
            write_matrix(&mut out, &m, sep).unwrap();
            let text = String::from_utf8(out.clone()).unwrap();
            assert_eq!(text.lines().count(), 2);
            assert!(text.ends_with('\n'));
            if sep == "," {
                assert_eq!(text, "1,-2,3\n4,5,-6\n");
                // commas only split tokens when the format says so
                assert!(read_matrix::<i32, _>(&mut Cursor::new(out.clone()), true).is_err());
            }
            let format = TextFormat::with_separator(sep);
            for row_major in [true, false] {
                let back =
                    read_matrix_with::<i32, _>(&mut Cursor::new(out.clone()), row_major, &format)
                        .unwrap();
                assert!(back.equals(&m));
                assert_eq!(back.order() == crate::Order::RowMajor, row_major);
            }
        }
    }

    #[test]
    fn test_separator_tokens() {
        let format = TextFormat::with_separator(", ");
        let v: Vector<f64> = read_vector_with(cursor("1.5, 2,3\n4"), &format).unwrap();
        assert_eq!(v.to_vec(), vec![1.5, 2.0, 3.0, 4.0]);
        let mut c = cursor("1;2\n3;4\n");
        let fmt = TextFormat::with_separator(";");
        assert_eq!(infer_dimensions_with::<u16, _>(&mut c, &fmt).unwrap(), (2, 2));
        assert_eq!(TextFormat::default().separator, " ");
    }

    #[test]
    fn test_numeric_separators_rejected() {
        let m = Matrix::from_rows(vec![[1, -2], [3, 4]]);
        for sep in ["-", "+", ".", "e", "0", "", " x "] {
            let mut out: Vec<u8> = Vec::new();
            let e = write_matrix(&mut out, &m, sep).unwrap_err();
            assert!(matches!(e, NarError::Format(FormatErrorKind::InvalidSeparator(_))));
            assert!(out.is_empty());
            assert!(write_vector(&mut out, &m.row(0), sep).is_err());

            let format = TextFormat::with_separator(sep);
            assert_eq!(format.validate().unwrap_err().kind(), ErrorKind::Format);
            let e = read_matrix_with::<i32, _>(&mut cursor("1-2\n3-4\n"), true, &format);
            assert_eq!(e.unwrap_err().kind(), ErrorKind::Format);
            assert!(read_vector_with::<i32, _>(cursor("1 2"), &format).is_err());
        }
        for sep in [" ", ",", ", ", "\t", ";", "|"] {
            assert!(TextFormat::with_separator(sep).validate().is_ok());
        }
    }

    #[test]
    fn test_zero_column_matrix_writes_nothing() {
        let mut out: Vec<u8> = Vec::new();
        write_matrix(&mut out, &Matrix::<i32>::zeros(3, 0, true), " ").unwrap();
        assert!(out.is_empty());
        let back = read_matrix::<i32, _>(&mut Cursor::new(out), true).unwrap();
        assert_eq!(back.shape(), &[0, 0]);
    }

    #[test]
    fn test_read_matrix_bad_token() {
        let e = read_matrix::<f64, _>(&mut cursor("1 2\n3 four\n"), true).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_write_strided_submatrix() {
        let m = Matrix::from_rows(vec![[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        let mut out: Vec<u8> = Vec::new();
        write_matrix(&mut out, &m.subarray(1, 0, 3, 2).transpose(), " ").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "4 7\n5 8\n");
    }
}
