//! Derived text fields: excerpts, read time and line previews.

use crate::models::{Preview, PreviewLine};
use regex::Regex;
use std::sync::OnceLock;

/// Maximum excerpt length in characters, before the ellipsis
pub const EXCERPT_LENGTH: usize = 200;

/// Appended to excerpts that were cut short
pub const ELLIPSIS: &str = "...";

/// Reading speed used for read-time estimates
pub const WORDS_PER_MINUTE: usize = 200;

/// Number of body lines shown by a preview
pub const PREVIEW_LINES: usize = 10;

static MARKUP_REGEX: OnceLock<Regex> = OnceLock::new();
static NEWLINES_REGEX: OnceLock<Regex> = OnceLock::new();

fn markup_regex() -> &'static Regex {
    MARKUP_REGEX.get_or_init(|| Regex::new(r"[#*`]").expect("valid markup pattern"))
}

fn newlines_regex() -> &'static Regex {
    NEWLINES_REGEX.get_or_init(|| Regex::new(r"(?:\r?\n)+").expect("valid newline pattern"))
}

/// Build an excerpt from a document body.
///
/// Heading, emphasis and code markers are dropped, runs of newlines become a
/// single space, and the result is cut at [`EXCERPT_LENGTH`] characters.
pub fn generate_excerpt(body: &str) -> String {
    let plain = markup_regex().replace_all(body, "");
    let flat = newlines_regex().replace_all(&plain, " ");
    truncate_excerpt(flat.trim())
}

/// Cut text to [`EXCERPT_LENGTH`] characters, appending [`ELLIPSIS`] when cut
pub fn truncate_excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_LENGTH {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(EXCERPT_LENGTH).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Estimated reading time in whole minutes, never less than one
pub fn read_time(body: &str) -> u32 {
    let words = body.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Classify the first `max_lines` lines of a body for a quick preview
pub fn preview(body: &str, max_lines: usize) -> Preview {
    let all: Vec<&str> = body.lines().collect();
    let lines = all
        .iter()
        .take(max_lines)
        .map(|line| classify_line(line))
        .collect();

    Preview {
        lines,
        truncated: all.len() > max_lines,
    }
}

fn classify_line(line: &str) -> PreviewLine {
    if let Some(text) = line.strip_prefix("### ") {
        PreviewLine::Heading {
            level: 3,
            text: text.to_string(),
        }
    } else if let Some(text) = line.strip_prefix("## ") {
        PreviewLine::Heading {
            level: 2,
            text: text.to_string(),
        }
    } else if let Some(text) = line.strip_prefix("# ") {
        PreviewLine::Heading {
            level: 1,
            text: text.to_string(),
        }
    } else if line.trim().is_empty() {
        PreviewLine::Break
    } else {
        PreviewLine::Paragraph {
            text: line.to_string(),
        }
    }
}
