use super::Filter;
use memchr::memmem;

/// Plain substring filter backed by SIMD `memmem`
pub struct KeywordFilter {
    finder: memmem::Finder<'static>,
    keyword: String,
    case_sensitive: bool,
}

impl KeywordFilter {
    pub fn new(keyword: &str, case_sensitive: bool) -> Self {
        let needle = if case_sensitive {
            keyword.as_bytes().to_vec()
        } else {
            keyword.as_bytes().to_ascii_lowercase()
        };
        Self {
            finder: memmem::Finder::new(&needle).into_owned(),
            keyword: keyword.to_string(),
            case_sensitive,
        }
    }

    /// True for an empty keyword, which lets every line through.
    pub fn is_match_all(&self) -> bool {
        self.keyword.is_empty()
    }
}

impl Filter for KeywordFilter {
    fn matches(&self, line: &[u8]) -> bool {
        if self.is_match_all() {
            return true;
        }
        if self.case_sensitive {
            self.finder.find(line).is_some()
        } else {
            self.finder.find(&line.to_ascii_lowercase()).is_some()
        }
    }

    fn description(&self) -> String {
        format!(
            "Keyword: {} ({})",
            self.keyword,
            if self.case_sensitive {
                "case-sensitive"
            } else {
                "case-insensitive"
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_keyword_matches_everything() {
        let filter = KeywordFilter::new("", true);
        assert!(filter.matches(b"anything"));
        assert!(filter.matches(b""));
    }

    #[test]
    fn test_case_sensitive() {
        let filter = KeywordFilter::new("Tiger", true);
        assert!(filter.matches(b"Line 3 animal: Tiger"));
        assert!(!filter.matches(b"Line 3 animal: tiger"));
    }

    #[test]
    fn test_case_insensitive() {
        let filter = KeywordFilter::new("TIGER", false);
        assert!(filter.matches(b"Line 3 animal: tiger"));
        assert!(filter.matches(b"Line 3 animal: TiGeR"));
        assert!(!filter.matches(b"Line 3 animal: ox"));
    }

    #[test]
    fn test_non_utf8_line() {
        let filter = KeywordFilter::new("ok", true);
        assert!(filter.matches(b"\xff\xfe ok"));
    }

    #[test]
    fn test_description() {
        let filter = KeywordFilter::new("error", false);
        assert_eq!(filter.description(), "Keyword: error (case-insensitive)");
    }
}
