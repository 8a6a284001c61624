use std::io;
use std::io::ErrorKind;

use quick_xml::escape::escape;
use ramhorns::Template;

use crate::content::markdown::render_markdown;
use crate::content::Post;

pub const DEFAULT_POST_TEMPLATE: &str = include_str!("../../res/template/post.html");

#[derive(ramhorns::Content)]
struct PostPage<'a> {
    title: &'a str,
    description: &'a str,
    section: &'a str,
    tags: &'a str,
    created: &'a str,
    updated: &'a str,
    post_type: &'a str,
    author: &'a str,
    author_initial: String,
    html_content: &'a str,
    tags_html: &'a str,
}

/// Renders full post pages. Plain fields go through `{{field}}` and get HTML
/// escaped; `{{{html_content}}}` and `{{{tags_html}}}` are already markup.
pub struct PostRenderer<'a> {
    pub template: Template<'a>,
    pub author: String,
}

impl PostRenderer<'_> {
    pub fn new(post_tpl_src: &str, author: String) -> io::Result<PostRenderer> {
        let template = match Template::new(post_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing post template: {}", e)));
            }
        };

        Ok(PostRenderer {
            template,
            author,
        })
    }

    pub fn render(&self, post: &Post) -> io::Result<String> {
        let html_content = render_markdown(&post.content)?;
        let tags_html = render_tags(post);
        let author_initial = self.author.chars().next().map(String::from).unwrap_or_default();

        let rendered_page = self.template.render(&PostPage {
            title: &post.title,
            description: &post.description,
            section: &post.section,
            tags: &post.tags,
            created: &post.created,
            updated: &post.updated,
            post_type: &post.post_type,
            author: &self.author,
            author_initial,
            html_content: &html_content,
            tags_html: &tags_html,
        });

        Ok(rendered_page)
    }
}

pub fn render_tags(post: &Post) -> String {
    post.tag_list()
        .iter()
        .map(|tag| format!(r#"<span class="post-tag">{}</span>"#, escape(*tag)))
        .collect()
}
