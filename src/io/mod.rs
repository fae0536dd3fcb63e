//! File encodings for vectors and matrices.
//!
//! [`text`] is a whitespace-separated table, one matrix row per line.
//! [`binary`] is a native-endian frame: `i32` dimensions followed by the
//! raw elements in logical row-major order.
//!
//! Both modules offer free functions over any `Read`/`Write` stream plus a
//! file handle type ([`TextFile`], [`BinaryFile`]) that opens a path and
//! reports a [`NarError::File`] before any data is touched.

pub mod binary;
pub mod text;

pub use binary::BinaryFile;
pub use text::{TextFile, TextFormat};

use crate::error::{NarError, NarResult};
use log::debug;
use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom};
use std::path::Path;

/// How a file handle opens its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Existing file, read only.
    Read,
    /// Created if missing, truncated if present.
    Write,
    /// Existing file, read and write.
    ReadWrite,
}

impl OpenMode {
    fn options(&self) -> OpenOptions {
        let mut opts = OpenOptions::new();
        match self {
            OpenMode::Read => {
                opts.read(true);
            }
            OpenMode::Write => {
                opts.write(true).create(true).truncate(true);
            }
            OpenMode::ReadWrite => {
                opts.read(true).write(true);
            }
        }
        opts
    }
}

pub(crate) fn open_file(path: &Path, mode: OpenMode) -> NarResult<File> {
    let file = mode
        .options()
        .open(path)
        .map_err(|e| NarError::File(format!("couldn't open {}", path.display()), e))?;
    debug!("opened {} ({:?})", path.display(), mode);
    Ok(file)
}

pub(crate) fn io_err(msg: &'static str) -> impl FnOnce(io::Error) -> NarError {
    move |e| NarError::from((msg, e))
}

pub(crate) fn invalid_data(msg: String) -> NarError {
    NarError::File(msg.clone(), io::Error::new(io::ErrorKind::InvalidData, msg))
}

pub(crate) fn rewind(file: &mut File) -> NarResult<()> {
    file.seek(SeekFrom::Start(0)).map_err(io_err("couldn't rewind file"))?;
    Ok(())
}

// Drops whatever an earlier, longer write left behind the current position.
pub(crate) fn truncate_here(file: &mut File) -> NarResult<()> {
    let pos = file.stream_position().map_err(io_err("couldn't seek file"))?;
    file.set_len(pos).map_err(io_err("couldn't truncate file"))?;
    Ok(())
}
