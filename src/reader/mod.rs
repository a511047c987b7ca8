pub mod backward_reader;
pub mod segment;

pub use backward_reader::{BackwardReader, Window};
pub use segment::{combine, segment, Fragment};

use crate::error::Result;

/// Source of byte windows addressed by their distance from EOF.
pub trait WindowSource {
    /// File size snapshot the source reads against
    fn file_size(&self) -> u64;

    /// Read up to `size` bytes ending `offset` bytes before EOF.
    ///
    /// Returns an empty window once `offset` reaches the file size.
    fn read_window(&mut self, offset: u64, size: usize) -> Result<Window>;
}
