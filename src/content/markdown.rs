use std::io;
use std::io::ErrorKind;

use lazy_static::lazy_static;
use markdown::Options;
use regex::Regex;

/// Renders a post body. Raw HTML in the body is kept as is, which legacy posts rely on.
pub fn render_markdown(md_text: &str) -> io::Result<String> {
    let mut options = Options::gfm();
    options.compile.allow_dangerous_html = true;

    let html = match markdown::to_html_with_options(md_text, &options) {
        Ok(x) => x,
        Err(e) => return Err(io::Error::new(ErrorKind::InvalidInput, e.reason)),
    };

    Ok(open_external_links_in_new_tab(&html))
}

/// Absolute links get `target="_blank"`, site-relative ones stay in the same tab.
fn open_external_links_in_new_tab(html: &str) -> String {
    lazy_static! {
        static ref EXTERNAL_LINK_REGEX: Regex = Regex::new(
            r#"<a href="(?P<href>https?://[^"]*)"(?P<title> title="[^"]*")?>"#
        ).unwrap();
    }

    EXTERNAL_LINK_REGEX
        .replace_all(html, r#"<a href="${href}"${title} target="_blank">"#)
        .to_string()
}
