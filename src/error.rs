use std::io;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatErrorKind {
    #[error("uneven line lengths: line {line} has {got} columns, expected {expected}")]
    UnevenLineLengths {
        line: usize,
        expected: usize,
        got: usize,
    },
    #[error("couldn't read value {token:?} on line {line}")]
    UnparsableToken { line: usize, token: String },
    #[error("separator {0:?} is empty or contains characters of a number")]
    InvalidSeparator(String),
}

/// Coarse classification of a [`NarError`], one per failure class a flat
/// binding has to tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    OutOfRange,
    DimensionMismatch,
    NoLeadingDimension,
    File,
    Format,
}

impl ErrorKind {
    /// Integer code reported across a C boundary. Zero is reserved for success.
    pub fn code(&self) -> i32 {
        match self {
            ErrorKind::Format => 2,
            _ => 1,
        }
    }
}

pub type NarResult<T> = Result<T, NarError>;

#[derive(Error, Debug)]
pub enum NarError {
    #[error("{op}: index {index:?} is out of range for shape {shape:?}")]
    OutOfRange {
        op: &'static str,
        index: Vec<usize>,
        shape: Vec<usize>,
    },
    #[error("{op}: can't assign shape {got:?} to shape {expected:?}")]
    DimensionMismatch {
        op: &'static str,
        expected: Vec<usize>,
        got: Vec<usize>,
    },
    #[error("matrix has no leading dimension (row stride {row_stride}, col stride {col_stride})")]
    NoLeadingDimension { row_stride: isize, col_stride: isize },
    #[error("file error: {0}, {1}")]
    File(String, io::Error),
    #[error("format error: {0}")]
    Format(FormatErrorKind),
}

impl NarError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NarError::OutOfRange { .. } => ErrorKind::OutOfRange,
            NarError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            NarError::NoLeadingDimension { .. } => ErrorKind::NoLeadingDimension,
            NarError::File(..) => ErrorKind::File,
            NarError::Format(_) => ErrorKind::Format,
        }
    }

    pub(crate) fn out_of_range(op: &'static str, index: &[usize], shape: &[usize]) -> Self {
        NarError::OutOfRange {
            op,
            index: index.to_vec(),
            shape: shape.to_vec(),
        }
    }
}

impl From<FormatErrorKind> for NarError {
    fn from(e: FormatErrorKind) -> Self {
        NarError::Format(e)
    }
}

impl From<(&str, io::Error)> for NarError {
    fn from(e: (&str, io::Error)) -> Self {
        NarError::File(e.0.to_string(), e.1)
    }
}

impl From<(String, io::Error)> for NarError {
    fn from(e: (String, io::Error)) -> Self {
        NarError::File(e.0, e.1)
    }
}

impl From<NarError> for String {
    fn from(e: NarError) -> Self {
        format!("{}", e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes() {
        let e = NarError::from(("couldn't open a.txt", io::Error::from(io::ErrorKind::NotFound)));
        assert_eq!(e.kind(), ErrorKind::File);
        assert_eq!(e.kind().code(), 1);

        let e = NarError::from(FormatErrorKind::UnparsableToken {
            line: 3,
            token: "x".to_string(),
        });
        assert_eq!(e.kind(), ErrorKind::Format);
        assert_eq!(e.kind().code(), 2);

        let e = NarError::out_of_range("at", &[4], &[3]);
        assert_eq!(e.kind(), ErrorKind::OutOfRange);
        let msg: String = e.into();
        assert!(msg.contains("[4]"));
    }
}
