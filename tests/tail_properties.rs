//! Property-based tests for the backward scan.
//!
//! Tests validate:
//! 1. Paginating to exhaustion reproduces the file byte for byte
//! 2. Each page's cursor advances by exactly the bytes of the lines it returned
//! 3. Keyword scans agree with a naive forward filter, whatever the window size

use backtail::{tail, Cursor, TailPage, TailRequest};
use proptest::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const MAX_LINE: usize = 20;

fn write_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn build_content(lines: &[String], trailing_newline: bool) -> String {
    let mut content = lines.join("\n");
    if trailing_newline && !lines.is_empty() {
        content.push('\n');
    }
    content
}

/// Lines as the engine sees them, in file order, delimiters stripped.
fn oracle_lines(content: &str) -> Vec<&str> {
    content
        .split_inclusive('\n')
        .map(|l| l.strip_suffix('\n').unwrap_or(l))
        .collect()
}

fn paginate(file: &NamedTempFile, per_call: usize, window: usize, keyword: Option<&str>) -> Vec<TailPage> {
    let mut pages = Vec::new();
    let mut cursor = Cursor::START;
    loop {
        let mut request = TailRequest::new(per_call).cursor(cursor).window_size(window);
        if let Some(keyword) = keyword {
            request = request.keyword(keyword);
        }
        let page = tail(file.path(), &request).unwrap();
        cursor = page.cursor;
        let done = page.exhausted;
        pages.push(page);
        if done {
            return pages;
        }
    }
}

fn line_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[abxy ]{0,20}", 0..40)
}

// ===== Property 1: Round Trip =====

proptest! {
    #[test]
    fn pagination_reproduces_file(
        lines in line_strategy(),
        trailing_newline in any::<bool>(),
        per_call in 1usize..6,
        window in (MAX_LINE + 1)..64,
    ) {
        let content = build_content(&lines, trailing_newline);
        let file = write_file(&content);

        let pages = paginate(&file, per_call, window, None);

        let mut rebuilt: Vec<u8> = Vec::new();
        for page in pages.iter().rev() {
            for line in page.lines.iter().rev() {
                rebuilt.extend_from_slice(line.as_bytes());
            }
        }
        prop_assert_eq!(rebuilt, content.as_bytes().to_vec());
    }
}

// ===== Property 2: Cursor Partition =====

proptest! {
    #[test]
    fn cursor_advances_by_returned_bytes(
        lines in line_strategy(),
        per_call in 1usize..6,
        window in (MAX_LINE + 1)..64,
    ) {
        let content = build_content(&lines, true);
        let file = write_file(&content);

        let mut consumed = 0u64;
        for page in paginate(&file, per_call, window, None) {
            let returned: u64 = page.lines.iter().map(|l| l.as_bytes().len() as u64).sum();
            consumed += returned;
            prop_assert_eq!(page.cursor.get(), consumed);
            prop_assert!(page.lines.len() <= per_call);
        }
        prop_assert_eq!(consumed, content.len() as u64);
    }

    #[test]
    fn repeated_calls_are_identical(
        lines in line_strategy(),
        count in 1usize..10,
        window in (MAX_LINE + 1)..64,
    ) {
        let file = write_file(&build_content(&lines, true));
        let request = TailRequest::new(count).window_size(window);

        prop_assert_eq!(
            tail(file.path(), &request).unwrap(),
            tail(file.path(), &request).unwrap()
        );
    }
}

// ===== Property 3: Keyword Filtering =====

proptest! {
    #[test]
    fn keyword_scan_matches_naive_filter(
        lines in line_strategy(),
        trailing_newline in any::<bool>(),
        per_call in 1usize..6,
        window in (MAX_LINE + 1)..64,
    ) {
        let content = build_content(&lines, trailing_newline);
        let file = write_file(&content);

        let expected: Vec<&str> = oracle_lines(&content)
            .into_iter()
            .rev()
            .filter(|l| l.contains("xy"))
            .collect();

        let found: Vec<String> = paginate(&file, per_call, window, Some("xy"))
            .iter()
            .flat_map(|p| p.texts())
            .collect();

        prop_assert_eq!(found, expected);
    }
}
