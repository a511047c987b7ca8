use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Resume point for paginated scans: bytes already consumed, counted back from EOF.
///
/// A cursor always sits on a line boundary. `0` means "start at EOF"; a cursor
/// equal to the file size means the whole file has been consumed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cursor(u64);

impl Cursor {
    pub const START: Cursor = Cursor(0);

    pub fn new(consumed: u64) -> Self {
        Self(consumed)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub fn is_start(self) -> bool {
        self.0 == 0
    }

    pub fn is_exhausted(self, file_size: u64) -> bool {
        self.0 >= file_size
    }

    /// Absolute file position this cursor points at.
    pub fn position(self, file_size: u64) -> u64 {
        file_size.saturating_sub(self.0)
    }
}

impl From<u64> for Cursor {
    fn from(consumed: u64) -> Self {
        Self(consumed)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Cursor {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Cursor)
    }
}
