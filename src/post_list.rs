use std::{fs, io};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use spdlog::debug;

use crate::content::content_file::ContentFormat;
use crate::util::fs_helper::with_path;

pub struct PostList {
    pub root_dir: PathBuf,
    pub format: ContentFormat,
}

impl PostList {
    pub fn new(root_dir: &Path, format: ContentFormat) -> PostList {
        PostList {
            root_dir: root_dir.to_path_buf(),
            format,
        }
    }

    /// Every post file under the root, subdirectories included, sorted by path so
    /// the output never depends on the order the file system lists entries in.
    ///
    /// Outputs are named after the file stem alone, so two files with the same
    /// stem in different directories are an error.
    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut posts = vec![];
        Self::collect_files(&self.root_dir, self.format.extension(), &mut posts)?;
        posts.sort();
        Self::check_unique_slugs(&posts)?;
        debug!("Found {} {} files in {}", posts.len(), self.format.extension(), self.root_dir.display());
        Ok(posts)
    }

    fn check_unique_slugs(posts: &[PathBuf]) -> io::Result<()> {
        let mut seen: HashMap<&OsStr, &PathBuf> = HashMap::new();
        for post in posts {
            let Some(stem) = post.file_stem() else {
                continue;
            };
            if let Some(first) = seen.insert(stem, post) {
                return Err(io::Error::new(ErrorKind::InvalidData,
                                          format!("Two posts share the slug {} - files={}, {}",
                                                  stem.to_string_lossy(), first.display(), post.display())));
            }
        }
        Ok(())
    }

    fn collect_files(dir: &Path, extension: &str, posts: &mut Vec<PathBuf>) -> io::Result<()> {
        let entries = fs::read_dir(dir).map_err(|e| with_path(e, "listing", dir))?;
        for entry in entries {
            let entry = entry.map_err(|e| with_path(e, "listing", dir))?;
            let file_type = entry.file_type().map_err(|e| with_path(e, "inspecting", &entry.path()))?;

            if file_type.is_dir() {
                Self::collect_files(&entry.path(), extension, posts)?;
                continue;
            }

            if !file_type.is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some(extension) {
                posts.push(path);
            }
        }
        Ok(())
    }
}
