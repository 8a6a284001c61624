use std::{fs, io};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContentFormat {
    Markdown,
    Html,
}

impl ContentFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ContentFormat::Markdown => "md",
            ContentFormat::Html => "html",
        }
    }
}

pub struct ContentFile {
    pub file_path: PathBuf,
    pub format: ContentFormat,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(file_path: PathBuf) -> io::Result<ContentFile> {
        let format = match Self::guess_type(&file_path) {
            None => return Err(io::Error::new(ErrorKind::Unsupported, format!("Could not guess the type of the file {}", file_path.display()))),
            Some(format) => format,
        };

        let raw_content = match fs::read_to_string(&file_path) {
            Ok(content) => content,
            Err(e) => return Err(io::Error::new(e.kind(), format!("Error reading {}: {}", file_path.display(), e))),
        };

        Ok(ContentFile {
            file_path,
            format,
            raw_content,
        })
    }

    pub fn guess_type(file_name: &Path) -> Option<ContentFormat> {
        match file_name.extension()?.to_str()? {
            "md" => Some(ContentFormat::Markdown),
            "html" => Some(ContentFormat::Html),
            _ => None,
        }
    }
}
