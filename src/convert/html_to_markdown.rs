//! Best-effort conversion of legacy HTML posts into Markdown posts.
//!
//! This is pattern substitution over raw text, not an HTML parser. Nested inline
//! tags, tables and every attribute except `href` are lost, and the output is not
//! meant to render back into the same HTML.

use std::io;
use std::path::Path;

use lazy_static::lazy_static;
use quick_xml::escape::unescape;
use regex::Regex;
use spdlog::{debug, info};

use crate::content::content_file::ContentFormat;
use crate::content::{front_matter, FrontMatter, Post};
use crate::post_list::PostList;
use crate::util::fs_helper::{create_dir_all, read_file, write_atomic};

pub const DEFAULT_SECTION: &str = "Notes";
pub const DEFAULT_TYPE: &str = "note";

lazy_static! {
    static ref METADATA_REGEX: Regex = Regex::new(
        r"<!--\s*(?P<key>Title|Description|Section|Tags|Created|Updated|Type):\s*(?P<value>.*?)\s*-->"
    ).unwrap();

    static ref CONTENT_REGEX: Regex = Regex::new(
        r#"(?s)<div class="post-content">(?P<content>.*?)</div>"#
    ).unwrap();

    /// Applied in order, each one over the output of the previous.
    static ref SUBSTITUTIONS: Vec<(Regex, &'static str)> = [
        (r"<p(?:\s[^>]*)?>", "\n\n"),
        (r"</p>", "\n\n"),
        (r"<br\s*/?>", "\n"),
        (r"<h1(?:\s[^>]*)?>(.*?)</h1>", "\n\n# ${1}\n\n"),
        (r"<h2(?:\s[^>]*)?>(.*?)</h2>", "\n\n## ${1}\n\n"),
        (r"<h3(?:\s[^>]*)?>(.*?)</h3>", "\n\n### ${1}\n\n"),
        (r#"<a\s[^>]*?href="([^"]*)"[^>]*>(.*?)</a>"#, "[${2}](${1})"),
        (r"<(?:strong|b)(?:\s[^>]*)?>(.*?)</(?:strong|b)>", "**${1}**"),
        (r"<(?:em|i)(?:\s[^>]*)?>(.*?)</(?:em|i)>", "*${1}*"),
        // whatever markup is left goes away
        (r"<[^>]*>", ""),
        // indentation of the HTML source
        (r"(?m)^[ \t]+|[ \t]+$", ""),
        (r"\n{3,}", "\n\n"),
    ]
    .iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), *replacement))
    .collect();
}

/// Reads the `<!-- Key: value -->` comments of a legacy post. Only the first
/// comment of each key counts. Values written by the page template are HTML
/// escaped, so entities are decoded; a value with a broken entity is kept as is.
pub fn extract_html_metadata(html: &str) -> FrontMatter {
    let mut metadata = FrontMatter::new();

    for cap in METADATA_REGEX.captures_iter(html) {
        let (Some(key), Some(val)) = (cap.name("key"), cap.name("value")) else {
            continue;
        };
        metadata.entry(key.as_str().to_lowercase())
            .or_insert_with(|| {
                let val = val.as_str().trim();
                unescape(val).map(|v| v.into_owned()).unwrap_or_else(|_| val.to_string())
            });
    }

    for (key, default) in [("section", DEFAULT_SECTION), ("type", DEFAULT_TYPE)] {
        let val = metadata.entry(key.to_string()).or_default();
        if val.is_empty() {
            *val = default.to_string();
        }
    }

    metadata
}

/// Inner HTML of the first `<div class="post-content">`, empty when there is none.
/// The match ends at the first `</div>`, so a nested div cuts the content short.
pub fn extract_post_content(html: &str) -> &str {
    CONTENT_REGEX.captures(html)
        .and_then(|cap| cap.name("content"))
        .map(|m| m.as_str())
        .unwrap_or("")
}

pub fn html_to_markdown(html: &str) -> String {
    let mut markdown = html.to_string();
    for (regex, replacement) in SUBSTITUTIONS.iter() {
        markdown = regex.replace_all(&markdown, *replacement).into_owned();
    }
    markdown.trim().to_string()
}

/// Post built from a legacy HTML document; the slug comes from the file name.
pub fn convert_html_post(file_path: &Path, html: &str) -> Post {
    let metadata = extract_html_metadata(html);
    let mut body = html_to_markdown(extract_post_content(html));
    body.push('\n');

    Post::from_front_matter(file_path, &metadata, body)
}

/// Converts every HTML post under `posts_dir` into `<output_dir>/<stem>.md`.
/// Returns how many files were written.
pub fn convert_directory(posts_dir: &Path, output_dir: &Path) -> io::Result<usize> {
    let files = PostList::new(posts_dir, ContentFormat::Html).retrieve_files()?;
    create_dir_all(output_dir)?;

    for file in &files {
        let html = read_file(file)?;
        let post = convert_html_post(file, &html);

        let out_path = output_dir.join(format!("{}.{}", post.slug, ContentFormat::Markdown.extension()));
        write_atomic(&out_path, front_matter::serialize(&post).as_bytes())?;
        debug!("Converted {} into {}", file.display(), out_path.display());
    }

    info!("Converted {} HTML posts from {} into {}", files.len(), posts_dir.display(), output_dir.display());
    Ok(files.len())
}
