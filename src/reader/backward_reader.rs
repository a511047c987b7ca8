use super::WindowSource;
use crate::error::{Result, TailError};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// One block of bytes read from the file, addressed by absolute position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    /// Absolute byte position of `bytes[0]` in the file
    pub start: u64,
    pub bytes: Vec<u8>,
    /// File size the window was read against
    pub file_size: u64,
}

impl Window {
    /// A window with no bytes, positioned at `start`.
    pub fn empty(start: u64, file_size: u64) -> Self {
        Self {
            start,
            bytes: Vec::new(),
            file_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Absolute position one past the last byte.
    pub fn end(&self) -> u64 {
        self.start + self.bytes.len() as u64
    }

    pub fn reaches_bof(&self) -> bool {
        self.start == 0
    }

    pub fn reaches_eof(&self) -> bool {
        self.end() == self.file_size
    }
}

/// Random-access reader that hands out windows counted back from EOF.
///
/// The file size is captured once when the reader is created; a scan works
/// against that snapshot. If the file shrinks afterwards, the next read comes
/// up short and fails with an I/O error instead of returning shifted bytes.
pub struct BackwardReader<R> {
    path: PathBuf,
    inner: R,
    file_size: u64,
}

impl BackwardReader<File> {
    /// Open a log file read-only. The handle is closed when the reader drops.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| TailError::io(&path, e))?;
        let file_size = file.metadata().map_err(|e| TailError::io(&path, e))?.len();
        Ok(Self {
            path,
            inner: file,
            file_size,
        })
    }
}

impl<R: Read + Seek> BackwardReader<R> {
    /// Wrap any seekable source. `label` is only used in error messages.
    pub fn from_reader(label: impl Into<PathBuf>, mut inner: R) -> Result<Self> {
        let path = label.into();
        let file_size = inner
            .seek(SeekFrom::End(0))
            .map_err(|e| TailError::io(&path, e))?;
        Ok(Self {
            path,
            inner,
            file_size,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<R: Read + Seek> WindowSource for BackwardReader<R> {
    fn file_size(&self) -> u64 {
        self.file_size
    }

    fn read_window(&mut self, offset: u64, size: usize) -> Result<Window> {
        if offset >= self.file_size || size == 0 {
            return Ok(Window::empty(
                self.file_size.saturating_sub(offset),
                self.file_size,
            ));
        }

        let available = self.file_size - offset;
        let len = available.min(size as u64);
        let start = available - len;

        let mut bytes = vec![0u8; len as usize];
        self.inner
            .seek(SeekFrom::Start(start))
            .map_err(|e| TailError::io(&self.path, e))?;
        self.inner
            .read_exact(&mut bytes)
            .map_err(|e| TailError::io(&self.path, e))?;

        tracing::trace!(offset, start, len, "read window");

        Ok(Window {
            start,
            bytes,
            file_size: self.file_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn reader(content: &[u8]) -> BackwardReader<Cursor<Vec<u8>>> {
        BackwardReader::from_reader("mem", Cursor::new(content.to_vec())).unwrap()
    }

    #[test]
    fn test_reads_last_window() -> Result<()> {
        let mut r = reader(b"0123456789");
        let w = r.read_window(0, 4)?;
        assert_eq!(w.bytes, b"6789");
        assert_eq!(w.start, 6);
        assert!(w.reaches_eof());
        assert!(!w.reaches_bof());
        Ok(())
    }

    #[test]
    fn test_window_behind_offset() -> Result<()> {
        let mut r = reader(b"0123456789");
        let w = r.read_window(4, 4)?;
        assert_eq!(w.bytes, b"2345");
        assert_eq!(w.start, 2);
        assert!(!w.reaches_eof());
        Ok(())
    }

    #[test]
    fn test_window_clipped_at_file_start() -> Result<()> {
        let mut r = reader(b"0123456789");
        let w = r.read_window(8, 4)?;
        assert_eq!(w.bytes, b"01");
        assert!(w.reaches_bof());
        Ok(())
    }

    #[test]
    fn test_offset_at_or_past_size_is_exhausted() -> Result<()> {
        let mut r = reader(b"abc");
        assert!(r.read_window(3, 16)?.is_empty());
        assert!(r.read_window(100, 16)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_zero_size_window_is_empty() -> Result<()> {
        let mut r = reader(b"abc\n");
        assert!(r.read_window(0, 0)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_empty_file() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        let mut r = BackwardReader::open(temp_file.path())?;
        assert_eq!(r.file_size(), 0);
        assert!(r.read_window(0, 128)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_open_missing_file() {
        let err = BackwardReader::open("/definitely/not/here.log")
            .err()
            .expect("open should fail");
        assert!(matches!(err, TailError::FileNotFound { .. }));
    }

    #[test]
    fn test_truncated_file_fails_fast() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(b"line one\nline two\nline three\n")?;
        temp_file.flush()?;

        let mut r = BackwardReader::open(temp_file.path())?;
        temp_file.as_file().set_len(5)?;

        let err = r.read_window(0, 8).err().expect("short read must fail");
        assert!(matches!(err, TailError::Io { .. }));
        Ok(())
    }
}
