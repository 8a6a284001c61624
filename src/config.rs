use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::util::os_helper::default_author;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Site {
    pub base_url: String,
    pub author: Option<String>,
}

impl Default for Site {
    fn default() -> Self {
        Site {
            base_url: "https://example.com".to_string(),
            author: None,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Paths {
    pub posts_dir: PathBuf,
    pub markdown_dir: PathBuf,
    pub homepage: PathBuf,
    pub sitemap: PathBuf,
    /// Replaces the built-in post page template
    pub post_template: Option<PathBuf>,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            posts_dir: PathBuf::from("posts"),
            markdown_dir: PathBuf::from("posts-md"),
            homepage: PathBuf::from("index.html"),
            sitemap: PathBuf::from("sitemap.xml"),
            post_template: None,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct Log {
    pub level: LogLevel,
    #[serde(default)]
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    pub log: Option<Log>,
}

impl Config {
    pub fn author(&self) -> String {
        match self.site.author {
            Some(ref author) if !author.trim().is_empty() => author.clone(),
            _ => default_author(),
        }
    }
}

/// Paths starting with `${exe_dir}` are relative to the directory of the executable.
fn parse_path(path: PathBuf) -> PathBuf {
    if !path.starts_with("${exe_dir}") {
        return path;
    }

    let exe_dir = match env::current_exe() {
        Ok(exe) => exe.parent().map(Path::to_path_buf),
        Err(_) => None,
    };

    match (exe_dir, path.strip_prefix("${exe_dir}")) {
        (Some(exe_dir), Ok(rest)) => exe_dir.join(rest),
        _ => path,
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        posts_dir: parse_path(cfg.paths.posts_dir),
        markdown_dir: parse_path(cfg.paths.markdown_dir),
        homepage: parse_path(cfg.paths.homepage),
        sitemap: parse_path(cfg.paths.sitemap),
        post_template: cfg.paths.post_template.map(parse_path),
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.site.base_url, "https://example.com");
        assert_eq!(cfg.paths.posts_dir, PathBuf::from("posts"));
        assert_eq!(cfg.paths.markdown_dir, PathBuf::from("posts-md"));
        assert_eq!(cfg.paths.homepage, PathBuf::from("index.html"));
        assert_eq!(cfg.paths.sitemap, PathBuf::from("sitemap.xml"));
        assert!(cfg.paths.post_template.is_none());
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_full_config() {
        let toml_str = r##"
[site]
base_url = "https://blog.example.org"
author = "Jane Doe"

[paths]
posts_dir = "content/posts"
post_template = "${exe_dir}/templates/post.html"

[log]
level = "Debug"
log_to_console = true
"##;
        let cfg = parse_config(toml_str).unwrap();
        assert_eq!(cfg.site.base_url, "https://blog.example.org");
        assert_eq!(cfg.author(), "Jane Doe");
        assert_eq!(cfg.paths.posts_dir, PathBuf::from("content/posts"));
        assert_eq!(cfg.paths.sitemap, PathBuf::from("sitemap.xml"));

        let template = cfg.paths.post_template.unwrap();
        assert!(template.ends_with("templates/post.html"));
        assert!(!template.starts_with("${exe_dir}"));

        let log = cfg.log.unwrap();
        assert_eq!(log.level, LogLevel::Debug);
        assert!(log.log_to_console);
        assert!(log.location.is_none());
    }

    #[test]
    fn test_invalid_config() {
        let err = parse_config("[site]\nbase_url = 42\n").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidData);

        let err = read_config(Path::new("/no/such/quillsite.toml")).err().unwrap();
        assert!(err.to_string().contains("/no/such/quillsite.toml"));
    }
}
