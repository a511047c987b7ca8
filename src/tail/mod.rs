//! Reading the most recent lines of a log file, newest first.
//!
//! [`tail`] is the resumable entry point: it returns a [`TailPage`] whose cursor
//! can be passed back to continue exactly where the previous call stopped.
//! [`peek`] reads a single window and makes no completeness promise; it is meant
//! for display-only callers and its output must not be mixed with paginated
//! scans.

pub mod cancel;
pub mod cursor;
pub mod driver;

pub use cancel::CancelToken;
pub use cursor::Cursor;
pub use driver::Scan;

use crate::error::Result;
use crate::filter::KeywordFilter;
use crate::reader::{BackwardReader, WindowSource};
use std::borrow::Cow;
use std::path::Path;

/// Default window size, which is also the longest line a scan accepts.
pub const DEFAULT_WINDOW_SIZE: usize = 32 * 1024;

/// Parameters for one call into the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailRequest {
    /// Number of lines wanted, must be positive
    pub count: usize,
    /// Substring filter; `None` or empty keeps every line
    pub keyword: Option<String>,
    pub case_sensitive: bool,
    pub cursor: Cursor,
    /// Bytes per backward read; also the maximum line length
    pub window_size: usize,
}

impl TailRequest {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            keyword: None,
            case_sensitive: true,
            cursor: Cursor::START,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    fn filter(&self) -> KeywordFilter {
        KeywordFilter::new(self.keyword.as_deref().unwrap_or(""), self.case_sensitive)
    }
}

/// A complete line and the cursor pointing at its start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailLine {
    bytes: Vec<u8>,
    cursor: Cursor,
}

impl TailLine {
    pub fn new(bytes: Vec<u8>, cursor: Cursor) -> Self {
        Self { bytes, cursor }
    }

    /// Raw bytes, trailing newline included when the line has one.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Line content without the trailing newline.
    pub fn content(&self) -> &[u8] {
        self.bytes.strip_suffix(b"\n").unwrap_or(&self.bytes)
    }

    /// Human-readable text: newline stripped, invalid UTF-8 replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.content())
    }

    /// Text with the trailing newline kept.
    pub fn raw_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Distance from EOF to the first byte of this line.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Result of a paginated call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailPage {
    /// Matching lines, most recent first
    pub lines: Vec<TailLine>,
    /// Where the next call resumes
    pub cursor: Cursor,
    /// The cursor reached the beginning of the file
    pub exhausted: bool,
}

impl TailPage {
    pub fn texts(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.text().into_owned()).collect()
    }

    pub fn raw_texts(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.raw_text().into_owned()).collect()
    }
}

/// Return up to `request.count` of the most recent matching lines before
/// `request.cursor`.
pub fn tail<P: AsRef<Path>>(path: P, request: &TailRequest) -> Result<TailPage> {
    let reader = BackwardReader::open(path)?;
    tail_source(reader, request, None)
}

/// Same as [`tail`], but the scan stops with `TailError::Cancelled` when the
/// token fires between two window reads.
pub fn tail_with_cancel<P: AsRef<Path>>(
    path: P,
    request: &TailRequest,
    cancel: &CancelToken,
) -> Result<TailPage> {
    let reader = BackwardReader::open(path)?;
    tail_source(reader, request, Some(cancel))
}

/// Run a paginated scan over any window source.
pub fn tail_source<S: WindowSource>(
    source: S,
    request: &TailRequest,
    cancel: Option<&CancelToken>,
) -> Result<TailPage> {
    let filter = request.filter();
    let mut scan = Scan::new(
        source,
        &filter,
        request.count,
        request.window_size,
        request.cursor,
    );
    if let Some(cancel) = cancel {
        scan = scan.with_cancel(cancel);
    }
    scan.run()
}

/// Best-effort read of the last window only. Always starts at EOF; the cursor
/// in `request` is ignored. Lines that do not fit in one window are left out.
pub fn peek<P: AsRef<Path>>(path: P, request: &TailRequest) -> Result<Vec<TailLine>> {
    let reader = BackwardReader::open(path)?;
    let filter = request.filter();
    let page = Scan::new(
        reader,
        &filter,
        request.count,
        request.window_size,
        Cursor::START,
    )
    .with_window_budget(1)
    .run()?;
    Ok(page.lines)
}
