use std::fs::OpenOptions;
use std::io;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use spdlog::{debug, info};

use crate::config::Config;
use crate::content::content_file::ContentFormat;
use crate::content::{front_matter, Post};
use crate::post_list::PostList;
use crate::text_utils::{format_date, slugify};
use crate::util::fs_helper::{create_dir_all, read_file, with_path, write_atomic};
use crate::view::homepage::{replace_placeholder, HomepageRenderer, NOTES_PLACEHOLDER};
use crate::view::post_renderer::{PostRenderer, DEFAULT_POST_TEMPLATE};
use crate::view::sitemap_renderer::Sitemap;

pub const NEW_POST_TYPE: &str = "note";
pub const NEW_POST_PLACEHOLDER: &str = "<!-- Your content here -->";

pub struct NewPost<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub tags: &'a str,
    pub section: &'a str,
}

/// Local wall-clock date, the one written into new posts.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Every Markdown post under `posts_dir`, in file name order.
pub fn load_posts(posts_dir: &Path) -> io::Result<Vec<Post>> {
    let files = PostList::new(posts_dir, ContentFormat::Markdown).retrieve_files()?;

    let mut posts = Vec::with_capacity(files.len());
    for file in files {
        let post = Post::from_file(&file)?;
        debug!("Loaded post {}", post.filename);
        posts.push(post);
    }

    Ok(posts)
}

/// Writes `<posts_dir>/<slug>.md`. An existing file is never overwritten.
pub fn create_post(posts_dir: &Path, new_post: &NewPost, date: NaiveDate) -> io::Result<PathBuf> {
    let title = new_post.title.trim();
    if title.is_empty() {
        return Err(io::Error::new(ErrorKind::InvalidInput, "The post title cannot be empty"));
    }

    let slug = slugify(title);
    if slug.is_empty() {
        return Err(io::Error::new(ErrorKind::InvalidInput,
                                  format!("The post title \"{}\" has no characters usable in a file name", title)));
    }

    let created = format_date(&date);
    let post = Post {
        title: title.to_string(),
        description: new_post.description.to_string(),
        section: new_post.section.to_string(),
        tags: new_post.tags.to_string(),
        created: created.clone(),
        updated: created,
        post_type: NEW_POST_TYPE.to_string(),
        content: format!("# {}\n\n{}\n\n{}\n", title, new_post.description, NEW_POST_PLACEHOLDER),
        slug,
        filename: String::new(),
    };

    create_dir_all(posts_dir)?;
    let file_path = posts_dir.join(format!("{}.{}", post.slug, ContentFormat::Markdown.extension()));

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&file_path)
        .map_err(|e| with_path(e, "creating post", &file_path))?;
    file.write_all(front_matter::serialize(&post).as_bytes())
        .map_err(|e| with_path(e, "writing post", &file_path))?;

    info!("Created post {}", file_path.display());
    Ok(file_path)
}

/// Template source from `paths.post_template`, or the compiled-in page.
pub fn load_post_template(config: &Config) -> io::Result<String> {
    match config.paths.post_template {
        Some(ref path) => read_file(path),
        None => Ok(DEFAULT_POST_TEMPLATE.to_string()),
    }
}

/// Renders every Markdown post into `<posts_dir>/<slug>.html`.
pub fn render_posts(config: &Config) -> io::Result<usize> {
    let template_src = load_post_template(config)?;
    let renderer = PostRenderer::new(&template_src, config.author()).map_err(|e| {
        let template_name = match config.paths.post_template {
            Some(ref path) => path.display().to_string(),
            None => "built-in template".to_string(),
        };
        io::Error::new(e.kind(), format!("{} - template={}", e, template_name))
    })?;

    render_posts_with(&renderer, &config.paths.posts_dir)
}

pub fn render_posts_with(renderer: &PostRenderer, posts_dir: &Path) -> io::Result<usize> {
    let posts = load_posts(posts_dir)?;

    for post in &posts {
        let page = renderer.render(post)
            .map_err(|e| io::Error::new(e.kind(), format!("{} - file={}", e, post.filename)))?;
        let out_path = posts_dir.join(format!("{}.{}", post.slug, ContentFormat::Html.extension()));
        write_atomic(&out_path, page.as_bytes())?;
        debug!("Rendered {} into {}", post.filename, out_path.display());
    }

    info!("Rendered {} posts in {}", posts.len(), posts_dir.display());
    Ok(posts.len())
}

/// Replaces the notes placeholder of `homepage` with the Notes section posts.
/// Returns how many posts were read.
pub fn update_homepage(posts_dir: &Path, homepage: &Path) -> io::Result<usize> {
    let posts = load_posts(posts_dir)?;
    let page = read_file(homepage)?;

    let renderer = HomepageRenderer::with_default_template()?;
    let notes_html = renderer.render(&posts);

    let Some(page) = replace_placeholder(&page, &notes_html) else {
        return Err(io::Error::new(ErrorKind::InvalidData,
                                  format!("The homepage must contain {} exactly once - file={}", NOTES_PLACEHOLDER, homepage.display())));
    };

    write_atomic(homepage, page.as_bytes())?;
    info!("Updated homepage {} with {} posts", homepage.display(), posts.len());
    Ok(posts.len())
}

pub fn update_sitemap(posts_dir: &Path, sitemap: &Path, base_url: &str) -> io::Result<usize> {
    update_sitemap_at(posts_dir, sitemap, base_url, today())
}

/// Same as [`update_sitemap`] with a fixed date for pages without one.
pub fn update_sitemap_at(posts_dir: &Path, sitemap: &Path, base_url: &str, today: NaiveDate) -> io::Result<usize> {
    let posts = load_posts(posts_dir)?;

    let xml = Sitemap { base_url, today }.render(&posts)
        .map_err(|e| io::Error::new(ErrorKind::Other, format!("Error writing sitemap XML: {} - file={}", e, sitemap.display())))?;

    write_atomic(sitemap, &xml)?;
    info!("Wrote sitemap {} with {} posts", sitemap.display(), posts.len());
    Ok(posts.len())
}

pub fn update_library() -> io::Result<usize> {
    Err(io::Error::new(ErrorKind::Unsupported, "update-library is not implemented"))
}

pub fn start_editor(port: u16) -> io::Result<()> {
    Err(io::Error::new(ErrorKind::Unsupported, format!("The editor (port {}) is not implemented", port)))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::config::parse_config;
    use crate::test_data::{HOMEPAGE_HTML, POST_DATA_MD};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn write_post(dir: &Path, file: &str, section: &str, created: &str, updated: &str) {
        let doc = format!("---\ntitle: \"Title of {}\"\nsection: \"{}\"\ncreated: \"{}\"\nupdated: \"{}\"\n---\n\nBody of {}\n",
                          file, section, created, updated, file);
        fs::write(dir.join(file), doc).unwrap();
    }

    #[test]
    fn test_create_post() -> io::Result<()> {
        let dir = TempDir::new()?;
        let posts_dir = dir.path().join("posts");
        let new_post = NewPost {
            title: "Hello, World!  2024",
            description: "First one",
            tags: "rust, blog",
            section: "Notes",
        };

        let path = create_post(&posts_dir, &new_post, date(2024, 3, 5))?;
        assert_eq!(path, posts_dir.join("hello-world-2024.md"));

        let doc = fs::read_to_string(&path)?;
        assert_eq!(doc, r##"---
title: "Hello, World!  2024"
description: "First one"
section: "Notes"
tags: "rust, blog"
created: "March 5, 2024"
updated: "March 5, 2024"
type: "note"
---

# Hello, World!  2024

First one

<!-- Your content here -->
"##);

        let post = Post::from_document(&path, &doc);
        assert_eq!(post.slug, "hello-world-2024");
        assert_eq!(post.content, "# Hello, World!  2024\n\nFirst one\n\n<!-- Your content here -->\n");
        Ok(())
    }

    #[test]
    fn test_create_post_errors() -> io::Result<()> {
        let dir = TempDir::new()?;
        let mut new_post = NewPost { title: "  ", description: "", tags: "", section: "Notes" };

        let err = create_post(dir.path(), &new_post, date(2024, 1, 1)).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        new_post.title = "!!!";
        let err = create_post(dir.path(), &new_post, date(2024, 1, 1)).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        new_post.title = "Twice";
        create_post(dir.path(), &new_post, date(2024, 1, 1))?;
        let err = create_post(dir.path(), &new_post, date(2024, 1, 2)).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert!(err.to_string().contains("twice.md"));
        assert!(fs::read_to_string(dir.path().join("twice.md"))?.contains("January 1, 2024"));
        Ok(())
    }

    #[test]
    fn test_update_homepage_notes_only() -> io::Result<()> {
        let dir = TempDir::new()?;
        write_post(dir.path(), "a.md", "Notes", "January 1, 2024", "");
        write_post(dir.path(), "b.md", "Projects", "January 2, 2024", "");
        let homepage = dir.path().join("index.html");
        fs::write(&homepage, HOMEPAGE_HTML)?;

        assert_eq!(update_homepage(dir.path(), &homepage)?, 2);

        let page = fs::read_to_string(&homepage)?;
        assert!(page.contains(r#"<a href="posts/a.html" class="note-row">"#));
        assert!(!page.contains("posts/b.html"));
        assert!(!page.contains(NOTES_PLACEHOLDER));
        assert!(page.ends_with("</html>\n"));
        Ok(())
    }

    #[test]
    fn test_update_homepage_requires_placeholder() -> io::Result<()> {
        let dir = TempDir::new()?;
        write_post(dir.path(), "a.md", "Notes", "", "");
        let homepage = dir.path().join("index.html");
        fs::write(&homepage, "<html><body></body></html>")?;

        let err = update_homepage(dir.path(), &homepage).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().contains("index.html"));
        assert_eq!(fs::read_to_string(&homepage)?, "<html><body></body></html>");

        let err = update_homepage(dir.path(), &dir.path().join("missing.html")).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        Ok(())
    }

    #[test]
    fn test_update_sitemap() -> io::Result<()> {
        let dir = TempDir::new()?;
        let posts_dir = dir.path().join("posts");
        fs::create_dir(&posts_dir)?;
        write_post(&posts_dir, "updated.md", "Notes", "2024-01-01", "2024-02-01");
        write_post(&posts_dir, "created.md", "Projects", "January 5, 2024", "");
        write_post(&posts_dir, "undated.md", "Notes", "", "");
        let sitemap = dir.path().join("sitemap.xml");

        let today = date(2024, 5, 1);
        assert_eq!(update_sitemap_at(&posts_dir, &sitemap, "https://example.com", today)?, 3);
        let first = fs::read(&sitemap)?;

        let xml = String::from_utf8(first.clone()).unwrap();
        assert!(xml.contains("<loc>https://example.com/posts/updated.html</loc>\n    <lastmod>2024-02-01</lastmod>"));
        assert!(xml.contains("<loc>https://example.com/posts/created.html</loc>\n    <lastmod>2024-01-05</lastmod>"));
        assert!(xml.contains("<loc>https://example.com/posts/undated.html</loc>\n    <lastmod>2024-05-01</lastmod>"));

        update_sitemap_at(&posts_dir, &sitemap, "https://example.com", today)?;
        assert_eq!(fs::read(&sitemap)?, first);
        Ok(())
    }

    #[test]
    fn test_render_posts() -> io::Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("what-i-learned.md"), POST_DATA_MD)?;

        let cfg = format!("[site]\nauthor = \"Jane Doe\"\n[paths]\nposts_dir = \"{}\"\n", dir.path().display());
        let config = parse_config(&cfg)?;
        assert_eq!(render_posts(&config)?, 1);

        let page = fs::read_to_string(dir.path().join("what-i-learned.html"))?;
        assert!(page.contains("What I learned after 20+ years of software development"));
        assert!(page.contains(r#"<span class="post-tag">career</span><span class="post-tag">engineering</span>"#));
        assert!(page.contains(r#"<a href="https://example.com/talk" target="_blank">this talk</a>"#));
        assert!(page.contains("Jane Doe"));
        Ok(())
    }

    #[test]
    fn test_render_posts_bad_template() -> io::Result<()> {
        let dir = TempDir::new()?;
        let template = dir.path().join("post.html");
        fs::write(&template, "{{#notes}}x{{/posts}}")?;

        let cfg = format!("[paths]\nposts_dir = \"{}\"\npost_template = \"{}\"\n",
                          dir.path().display(), template.display());
        let config = parse_config(&cfg)?;
        let err = render_posts(&config).err().unwrap();
        assert!(err.to_string().contains("post.html"));
        Ok(())
    }

    #[test]
    fn test_unimplemented_commands() {
        assert_eq!(update_library().err().unwrap().kind(), ErrorKind::Unsupported);
        assert_eq!(start_editor(3000).err().unwrap().kind(), ErrorKind::Unsupported);
    }
}
