use std::fmt::Write;

use crate::content::{FrontMatter, Post};

pub const DELIMITER: &str = "---";

/// Splits a document into its front matter block and the remaining body.
///
/// The block must start on the very first line and end with a line holding only
/// `---`. A document without a block, or with a block that is never closed, comes
/// back untouched with an empty mapping.
///
/// ```text
/// ---
/// title: "What I learned"
/// section: "Notes"
/// ---
///
/// # What I learned
/// ```
pub fn parse(document: &str) -> (FrontMatter, String) {
    let lines: Vec<&str> = document.split('\n').collect();

    if lines.first().map(|l| l.trim()) != Some(DELIMITER) {
        return (FrontMatter::new(), document.to_string());
    }

    let mut front_matter = FrontMatter::new();
    let mut body_start = None;

    for (i, line) in lines.iter().enumerate().skip(1) {
        let line = line.trim();
        if line == DELIMITER {
            body_start = Some(i + 1);
            break;
        }

        if let Some((key, val)) = extract_key_value(line) {
            front_matter.insert(key.to_string(), val.to_string());
        }
    }

    match body_start {
        Some(start) => (front_matter, lines[start..].join("\n")),
        None => (FrontMatter::new(), document.to_string()),
    }
}

/// Writes the post back with its fields in a fixed order. Values are always
/// double quoted and quotes inside them are not escaped.
pub fn serialize(post: &Post) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "{}", DELIMITER);
    for (key, val) in post.front_matter_fields() {
        let _ = writeln!(&mut buf, "{}: \"{}\"", key, val);
    }
    let _ = writeln!(&mut buf, "{}", DELIMITER);
    let _ = writeln!(&mut buf);
    buf.push_str(&post.content);

    buf
}

fn extract_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, val) = line.split_once(':')?;
    Some((key.trim(), strip_quotes(val.trim())))
}

fn strip_quotes(val: &str) -> &str {
    for quote in ['"', '\''] {
        if val.len() >= 2 && val.starts_with(quote) && val.ends_with(quote) {
            return &val[1..val.len() - 1];
        }
    }
    val
}
