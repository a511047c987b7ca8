//! The backward scan state machine.
//!
//! Each step reads one window, stitches it to the carried remainder, filters the
//! lines that became complete and accumulates matches. The scan stops once it
//! has enough lines, runs out of window budget, or reaches the beginning of the
//! file.

use super::cancel::CancelToken;
use super::cursor::Cursor;
use super::{TailLine, TailPage};
use crate::error::{BoundaryFault, Result, TailError};
use crate::filter::Filter;
use crate::reader::{combine, segment, Fragment, WindowSource};

/// Outcome of one scan step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// More windows are needed
    Continue,
    /// Collected the requested number of lines
    Full,
    /// Hit the window budget before either of the other stops
    BudgetSpent,
    /// Reached the beginning of the file
    Exhausted,
}

pub struct Scan<'a, S> {
    source: S,
    filter: &'a dyn Filter,
    cancel: Option<&'a CancelToken>,
    window_size: usize,
    wanted: usize,
    window_budget: Option<usize>,
    resume: Cursor,
    file_size: u64,
    /// Distance from EOF already covered by window reads
    read_offset: u64,
    windows_read: usize,
    /// Partial line waiting for the bytes that precede it
    remainder: Option<Fragment>,
    /// Absolute start of the earliest line handed to the filter
    consumed_from: u64,
    lines: Vec<TailLine>,
}

impl<'a, S: WindowSource> Scan<'a, S> {
    pub fn new(
        source: S,
        filter: &'a dyn Filter,
        wanted: usize,
        window_size: usize,
        resume: Cursor,
    ) -> Self {
        let file_size = source.file_size();
        Self {
            source,
            filter,
            cancel: None,
            window_size,
            wanted,
            window_budget: None,
            resume,
            file_size,
            read_offset: resume.get(),
            windows_read: 0,
            remainder: None,
            consumed_from: resume.position(file_size),
            lines: Vec::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: &'a CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Stop after reading at most `windows` windows.
    pub fn with_window_budget(mut self, windows: usize) -> Self {
        self.window_budget = Some(windows);
        self
    }

    pub fn run(mut self) -> Result<TailPage> {
        if self.wanted == 0 {
            return Err(TailError::InvalidLineCount);
        }
        if self.resume.get() > self.file_size {
            return Err(TailError::CursorOutOfRange {
                cursor: self.resume.get(),
                file_size: self.file_size,
            });
        }

        tracing::debug!(
            file_size = self.file_size,
            cursor = %self.resume,
            wanted = self.wanted,
            window_size = self.window_size,
            filter = %self.filter.description(),
            "starting backward scan"
        );

        if self.window_size == 0 {
            // a zero-byte window can never make progress
            return Ok(self.finish(Step::BudgetSpent));
        }

        let stop = loop {
            match self.step()? {
                Step::Continue => continue,
                stop => break stop,
            }
        };

        Ok(self.finish(stop))
    }

    fn step(&mut self) -> Result<Step> {
        if self.cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(TailError::Cancelled);
        }
        if self.window_budget == Some(self.windows_read) {
            return Ok(Step::BudgetSpent);
        }

        let window = self.source.read_window(self.read_offset, self.window_size)?;
        if window.is_empty() {
            // Anything still carried begins at BOF
            if let Some(mut first_line) = self.remainder.take() {
                first_line.open_start = false;
                self.check_length(&first_line)?;
                self.accept(first_line);
            }
            self.consumed_from = 0;
            return Ok(Step::Exhausted);
        }

        if self.windows_read == 0
            && !self.resume.is_start()
            && window.bytes.last() != Some(&b'\n')
        {
            return Err(TailError::BoundaryMismatch {
                offset: self.resume.get(),
                window_size: self.window_size,
                fault: BoundaryFault::CursorNotAtDelimiter,
            });
        }

        self.windows_read += 1;
        self.read_offset += window.len() as u64;

        let carried: Vec<Fragment> = self.remainder.take().into_iter().collect();
        let mut fragments = combine(carried, segment(&window));

        // The earliest fragment waits for the next window unless it already starts a line
        if fragments.last().is_some_and(|f| f.open_start) {
            self.remainder = fragments.pop();
        }
        if let Some(remainder) = &self.remainder {
            self.check_length(remainder)?;
        }

        for fragment in fragments {
            self.check_length(&fragment)?;
            debug_assert!(fragment.is_complete(), "filtering a partial line");
            if self.accept(fragment) {
                return Ok(Step::Full);
            }
        }

        Ok(Step::Continue)
    }

    /// Filter a complete line and keep it if it matches. Returns true once full.
    fn accept(&mut self, fragment: Fragment) -> bool {
        self.consumed_from = fragment.start;
        if self.filter.matches(fragment.content()) {
            let cursor = Cursor::new(self.file_size - fragment.start);
            self.lines.push(TailLine::new(fragment.bytes, cursor));
        }
        self.lines.len() >= self.wanted
    }

    fn check_length(&self, fragment: &Fragment) -> Result<()> {
        if fragment.len() > self.window_size {
            return Err(TailError::BoundaryMismatch {
                offset: self.file_size - fragment.start,
                window_size: self.window_size,
                fault: BoundaryFault::LineExceedsWindow,
            });
        }
        Ok(())
    }

    fn finish(self, stop: Step) -> TailPage {
        let cursor = Cursor::new(self.file_size - self.consumed_from);
        tracing::debug!(
            lines = self.lines.len(),
            windows = self.windows_read,
            cursor = %cursor,
            stop = ?stop,
            "backward scan finished"
        );
        TailPage {
            lines: self.lines,
            cursor,
            exhausted: cursor.is_exhausted(self.file_size),
        }
    }
}
