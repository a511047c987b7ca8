//! `backtail tail`: print the most recent lines of a file.

use crate::cli::TailArgs;
use crate::config::Config;
use crate::tail::{self, TailLine, TailPage, TailRequest};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use memchr::memmem;
use std::io::{self, Write};
use std::ops::Range;

pub fn run(args: &TailArgs, config: &Config) -> Result<()> {
    let request = build_request(args, config)?;

    let (page, is_peek) = if args.peek {
        let lines = tail::peek(&args.file, &request)
            .with_context(|| format!("Failed to peek {}", args.file.display()))?;
        (
            TailPage {
                lines,
                cursor: request.cursor,
                exhausted: false,
            },
            true,
        )
    } else {
        let page = tail::tail(&args.file, &request)
            .with_context(|| format!("Failed to read {}", args.file.display()))?;
        (page, false)
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = if args.json {
        write_json(&mut out, &page, is_peek)
    } else {
        write_plain(&mut out, &page.lines, &request, args.oldest_first)
    };
    match written {
        // `backtail tail ... | head` closes the pipe early
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => return Ok(()),
        other => other.context("Failed to write output")?,
    }

    if !args.json && !is_peek {
        let state = if page.exhausted {
            " (exhausted)".dimmed().to_string()
        } else {
            String::new()
        };
        eprintln!("{} {}{}", "next cursor:".dimmed(), page.cursor, state);
    }
    Ok(())
}

fn build_request(args: &TailArgs, config: &Config) -> Result<TailRequest> {
    let window_size = args.window_size.unwrap_or(config.window_size);
    if window_size == 0 {
        bail!("--window-size must be greater than 0");
    }

    let mut request = TailRequest::new(args.lines.unwrap_or(config.default_lines))
        .case_sensitive(!args.ignore_case)
        .window_size(window_size);
    if let Some(cursor) = args.cursor {
        request = request.cursor(cursor);
    }
    if let Some(keyword) = args.keyword.as_deref().filter(|k| !k.is_empty()) {
        request = request.keyword(keyword);
    }
    Ok(request)
}

fn write_json(out: &mut impl Write, page: &TailPage, is_peek: bool) -> io::Result<()> {
    let lines: Vec<String> = page.texts();
    let value = if is_peek {
        serde_json::json!({ "lines": lines })
    } else {
        serde_json::json!({
            "lines": lines,
            "cursor": page.cursor,
            "exhausted": page.exhausted,
        })
    };
    writeln!(out, "{}", value)
}

fn write_plain(
    out: &mut impl Write,
    lines: &[TailLine],
    request: &TailRequest,
    oldest_first: bool,
) -> io::Result<()> {
    let keyword = request.keyword.as_deref().unwrap_or("");
    let mut emit = |line: &TailLine| -> io::Result<()> {
        let text = line.text();
        writeln!(out, "{}", highlight(&text, keyword, request.case_sensitive))
    };

    if oldest_first {
        lines.iter().rev().try_for_each(&mut emit)
    } else {
        lines.iter().try_for_each(&mut emit)
    }
}

/// Render `text` with every keyword occurrence highlighted.
fn highlight(text: &str, keyword: &str, case_sensitive: bool) -> String {
    let ranges = match_ranges(text, keyword, case_sensitive);
    if ranges.is_empty() {
        return text.to_string();
    }

    let mut rendered = String::with_capacity(text.len() + ranges.len() * 16);
    let mut last = 0;
    for range in ranges {
        rendered.push_str(&text[last..range.start]);
        rendered.push_str(&text[range.clone()].red().bold().to_string());
        last = range.end;
    }
    rendered.push_str(&text[last..]);
    rendered
}

/// Non-overlapping byte ranges of `keyword` in `text`.
///
/// Case folding is ASCII only, so offsets in the folded copy are valid in
/// `text` and always fall on character boundaries.
fn match_ranges(text: &str, keyword: &str, case_sensitive: bool) -> Vec<Range<usize>> {
    if keyword.is_empty() {
        return Vec::new();
    }
    let (haystack, needle) = if case_sensitive {
        (text.as_bytes().to_vec(), keyword.as_bytes().to_vec())
    } else {
        (
            text.as_bytes().to_ascii_lowercase(),
            keyword.as_bytes().to_ascii_lowercase(),
        )
    };

    let mut ranges = Vec::new();
    let mut from = 0;
    while let Some(pos) = memmem::find(&haystack[from..], &needle) {
        let start = from + pos;
        let end = start + needle.len();
        ranges.push(start..end);
        from = end;
    }
    ranges
}
