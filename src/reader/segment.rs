//! Splitting windows into line fragments and stitching fragments back together.
//!
//! Fragments always keep their trailing `\n` when they have one. Fragment lists
//! are ordered most-recent-first: index 0 is the fragment closest to EOF.

use super::backward_reader::Window;
use memchr::{memchr, memrchr, memrchr_iter};

const DELIMITER: u8 = b'\n';

/// A newline-delimited run of bytes cut out of one or more windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Absolute position of the first byte in the file
    pub start: u64,
    /// Owned bytes, trailing delimiter included when present
    pub bytes: Vec<u8>,
    /// The bytes before `start` belong to this line but were not read yet
    pub open_start: bool,
    /// The bytes after this fragment belong to this line (window edge, not EOF)
    pub open_end: bool,
}

impl Fragment {
    pub fn is_complete(&self) -> bool {
        !self.open_start && !self.open_end
    }

    pub fn ends_with_delimiter(&self) -> bool {
        self.bytes.last() == Some(&DELIMITER)
    }

    /// The line content without its trailing delimiter.
    pub fn content(&self) -> &[u8] {
        match self.bytes.split_last() {
            Some((&DELIMITER, rest)) => rest,
            _ => &self.bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Split a window into fragments, most recent first.
pub fn segment(window: &Window) -> Vec<Fragment> {
    let data = &window.bytes;
    if data.is_empty() {
        return Vec::new();
    }

    let at_bof = window.reaches_bof();
    let at_eof = window.reaches_eof();
    let fragment = |from: usize, to: usize, open_start: bool, open_end: bool| Fragment {
        start: window.start + from as u64,
        bytes: data[from..to].to_vec(),
        open_start,
        open_end,
    };

    // No delimiter anywhere: the whole window is one piece of some line
    if memchr(DELIMITER, data).is_none() {
        return vec![fragment(0, data.len(), !at_bof, !at_eof)];
    }

    let mut fragments = Vec::new();
    // `end` is the exclusive end of the next fragment to emit
    let mut end = data.len();

    if data[end - 1] != DELIMITER {
        // Tail after the last delimiter; only complete if it runs into EOF
        let tail_start = memrchr(DELIMITER, data).map_or(0, |idx| idx + 1);
        fragments.push(fragment(tail_start, end, false, !at_eof));
        end = tail_start;
    }

    // Each earlier delimiter marks the start of a complete line
    for delim in memrchr_iter(DELIMITER, &data[..end - 1]) {
        fragments.push(fragment(delim + 1, end, false, false));
        end = delim + 1;
    }

    // Head up to and including the first delimiter
    fragments.push(fragment(0, end, !at_bof, false));

    fragments
}

/// Merge two adjacent fragment lists into one, `near` first.
///
/// `far` covers the bytes immediately before `near`. When `far` ends with a
/// delimiter the boundary is clean and `near`'s earliest fragment is known to
/// start a line. Otherwise that fragment is joined with `far`'s most recent one.
pub fn combine(mut near: Vec<Fragment>, far: Vec<Fragment>) -> Vec<Fragment> {
    let mut far = far.into_iter();
    let Some(far_head) = far.next() else {
        return near;
    };
    let Some(mut near_tail) = near.pop() else {
        return std::iter::once(far_head).chain(far).collect();
    };

    if far_head.ends_with_delimiter() {
        near_tail.open_start = false;
        near.push(near_tail);
        near.push(far_head);
    } else {
        let mut bytes = Vec::with_capacity(far_head.len() + near_tail.len());
        bytes.extend_from_slice(&far_head.bytes);
        bytes.extend_from_slice(&near_tail.bytes);
        near.push(Fragment {
            start: far_head.start,
            bytes,
            open_start: far_head.open_start,
            open_end: near_tail.open_end,
        });
    }

    near.extend(far);
    near
}
