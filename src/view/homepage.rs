use std::cmp::Ordering;
use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::Post;
use crate::text_utils::parse_post_date;

pub const NOTES_PLACEHOLDER: &str = "<!-- Notes will be dynamically inserted here -->";
pub const NOTES_SECTION: &str = "Notes";
pub const UNKNOWN_DATE: &str = "Unknown date";

const NOTE_ROWS_TEMPLATE: &str = r##"{{#notes}}<a href="posts/{{slug}}.html" class="note-row">
      <div class="note-header">
        <time>{{date}}</time>
        <h3>{{title}}</h3>
      </div>
      <p>{{description}}</p>
    </a>{{/notes}}"##;

#[derive(ramhorns::Content)]
struct NoteList<'a> {
    notes: Vec<NoteRow<'a>>,
}

#[derive(ramhorns::Content)]
struct NoteRow<'a> {
    slug: &'a str,
    date: &'a str,
    title: &'a str,
    description: &'a str,
}

pub struct HomepageRenderer<'a> {
    pub template: Template<'a>,
}

impl HomepageRenderer<'_> {
    pub fn new(rows_tpl_src: &str) -> io::Result<HomepageRenderer> {
        let template = match Template::new(rows_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing note rows template: {}", e)));
            }
        };

        Ok(HomepageRenderer {
            template,
        })
    }

    pub fn with_default_template() -> io::Result<HomepageRenderer<'static>> {
        HomepageRenderer::new(NOTE_ROWS_TEMPLATE)
    }

    /// Markup for every post of the Notes section, newest first.
    pub fn render(&self, posts: &[Post]) -> String {
        let mut notes: Vec<&Post> = posts.iter()
            .filter(|p| p.section == NOTES_SECTION)
            .collect();
        notes.sort_by(|a, b| newest_first(a, b));

        let notes = notes.iter()
            .map(|post| NoteRow {
                slug: &post.slug,
                date: if post.created.is_empty() { UNKNOWN_DATE } else { post.created.as_str() },
                title: &post.title,
                description: &post.description,
            })
            .collect();

        self.template.render(&NoteList { notes })
    }
}

/// Newest `created` first. Posts without a readable date go last, and ties keep
/// file name order.
pub fn newest_first(a: &Post, b: &Post) -> Ordering {
    let date_a = parse_post_date(&a.created);
    let date_b = parse_post_date(&b.created);

    let by_date = match (date_a, date_b) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };

    by_date.then_with(|| a.filename.cmp(&b.filename))
}

/// Swaps the placeholder comment for the generated markup. The page must hold
/// exactly one placeholder, otherwise there is no unambiguous place for the notes.
pub fn replace_placeholder(page: &str, notes_html: &str) -> Option<String> {
    if page.matches(NOTES_PLACEHOLDER).count() != 1 {
        return None;
    }
    Some(page.replacen(NOTES_PLACEHOLDER, notes_html, 1))
}
