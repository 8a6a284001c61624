use std::collections::HashMap;
use std::io;
use std::path::Path;

use crate::content::content_file::ContentFile;

pub mod content_file;
pub mod front_matter;
pub mod markdown;

/// Raw key/value pairs of a front matter block.
pub type FrontMatter = HashMap<String, String>;

/// One post document, as read from disk. Missing keys are empty strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Post {
    pub title: String,
    pub description: String,
    pub section: String,
    pub tags: String,
    pub created: String,
    pub updated: String,
    pub post_type: String,
    pub content: String,
    pub slug: String,
    pub filename: String,
}

impl Post {
    pub fn from_content_file(content_file: &ContentFile) -> Post {
        Self::from_document(&content_file.file_path, &content_file.raw_content)
    }

    pub fn from_file(file_path: &Path) -> io::Result<Post> {
        let content_file = ContentFile::from_file(file_path.to_path_buf())?;
        Ok(Self::from_content_file(&content_file))
    }

    pub fn from_document(file_path: &Path, document: &str) -> Post {
        let (front_matter, body) = front_matter::parse(document);

        // serialize() puts one blank line between the closing delimiter and the body
        let has_block = body.len() != document.len();
        let body = if has_block && body.starts_with('\n') {
            body[1..].to_string()
        } else {
            body
        };

        Self::from_front_matter(file_path, &front_matter, body)
    }

    pub fn from_front_matter(file_path: &Path, front_matter: &FrontMatter, body: String) -> Post {
        let get = |key: &str| front_matter.get(key).cloned().unwrap_or_default();

        let filename = file_path.file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_default();
        let slug = file_path.file_stem()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_default();

        Post {
            title: get("title"),
            description: get("description"),
            section: get("section"),
            tags: get("tags"),
            created: get("created"),
            updated: get("updated"),
            post_type: get("type"),
            content: body,
            slug,
            filename,
        }
    }

    /// Front matter fields in the order they are written back to disk.
    pub fn front_matter_fields(&self) -> [(&'static str, &str); 7] {
        [
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
            ("section", self.section.as_str()),
            ("tags", self.tags.as_str()),
            ("created", self.created.as_str()),
            ("updated", self.updated.as_str()),
            ("type", self.post_type.as_str()),
        ]
    }

    pub fn tag_list(&self) -> Vec<&str> {
        self.tags.split(',')
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect()
    }
}
