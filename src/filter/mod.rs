pub mod keyword;

pub use keyword::KeywordFilter;

/// Predicate over a complete line, delimiter already stripped
pub trait Filter {
    fn matches(&self, line: &[u8]) -> bool;

    fn description(&self) -> String;
}
