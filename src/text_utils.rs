use chrono::NaiveDate;

const LONG_DATE_FORMAT: &str = "%B %-d, %Y";
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Turns a title into the identifier used for file names and URLs.
/// "Hello, World!  2024" becomes "hello-world-2024".
pub fn slugify(text: &str) -> String {
    let kept: String = text.to_lowercase()
        .chars()
        .filter(|&c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_ascii_whitespace() || c == '-')
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut prev_sep = false;

    for c in kept.chars() {
        if c == '-' || c.is_ascii_whitespace() {
            if !prev_sep {
                slug.push('-');
            }
            prev_sep = true;
        } else {
            slug.push(c);
            prev_sep = false;
        }
    }

    slug.trim_matches('-').to_string()
}

/// Long form used in post front matter, e.g. "January 2, 2006".
pub fn format_date(date: &NaiveDate) -> String {
    date.format(LONG_DATE_FORMAT).to_string()
}

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Posts carry either the long form written by `new-post` or a plain ISO date.
/// Anything else is not a date as far as ordering and the sitemap are concerned.
pub fn parse_post_date(buf: &str) -> Option<NaiveDate> {
    let buf = buf.trim();
    if buf.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(buf, ISO_DATE_FORMAT) {
        return Some(date);
    }

    // ISO timestamps, "2024-01-01T10:00:00Z" and alike
    if let Some(prefix) = buf.get(0..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, ISO_DATE_FORMAT) {
            return Some(date);
        }
    }

    NaiveDate::parse_from_str(buf, "%B %d, %Y").ok()
}
