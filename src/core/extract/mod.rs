//! Fact extractors: pure functions that turn raw file text into sets used by
//! cross-reference rules.
//!
//! Extractors are heuristic and line-oriented. A pattern that finds nothing
//! yields an empty set, never an error; callers treat "nothing extracted" as
//! a valid input.
//!
//! - `code`: class and namespace declarations in C# source
//! - `di`: constructor dependencies and service registrations
//! - `project`: properties, attributes and package items in XML project files
//! - `resources`: resource table identity and keys
//! - `views`: view/logic-component naming, tab flags, navigation triggers

pub mod code;
pub mod di;
pub mod project;
pub mod resources;
pub mod views;

use std::ops::Range;

use super::suppression::is_comment;

/// Line range of the brace-delimited block opened at or after line `start`.
///
/// Counts `{` and `}` per line, skipping comment lines. The range runs from
/// `start` to the line where the block closes, or to the end of the file
/// when it never closes. Returns an empty range when no block opens.
pub fn block_range(lines: &[String], start: usize) -> Range<usize> {
    let mut depth: usize = 0;
    let mut opened = false;

    for (index, line) in lines.iter().enumerate().skip(start) {
        if is_comment(line) {
            continue;
        }
        for c in line.chars() {
            match c {
                '{' => {
                    depth += 1;
                    opened = true;
                }
                '}' if opened => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return start..index + 1;
                    }
                }
                _ => {}
            }
        }
        // A statement ending before any brace means `start` was not a block header.
        if !opened && line.trim_end().ends_with(';') {
            return start..start;
        }
    }

    if opened { start..lines.len() } else { start..start }
}

/// Split `text` at top-level commas, ignoring commas nested in `<>`, `()`, `[]`.
pub fn split_top_level(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut current = String::new();

    for c in text.chars() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }
    parts
}
