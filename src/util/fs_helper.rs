use std::{fs, io};
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

/// Rebuilds an I/O error so its message names the operation and the file.
pub fn with_path(e: io::Error, action: &str, path: &Path) -> io::Error {
    io::Error::new(e.kind(), format!("Error {} {}: {}", action, path.display(), e))
}

pub fn read_file(path: &Path) -> io::Result<String> {
    fs::read_to_string(path).map_err(|e| with_path(e, "reading", path))
}

pub fn create_dir_all(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path).map_err(|e| with_path(e, "creating directory", path))
}

/// Writes into a temporary file next to `path` and renames it over the target, so
/// readers see either the old or the new content, never a truncated file.
pub fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| with_path(e, "creating temporary file for", path))?;
    tmp.write_all(content).map_err(|e| with_path(e, "writing", path))?;
    tmp.flush().map_err(|e| with_path(e, "writing", path))?;

    // Temporary files are private; the published file keeps the old mode or gets a public one
    let permissions = match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => public_permissions(),
    };
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions).map_err(|e| with_path(e, "setting permissions of", path))?;
    }

    tmp.persist(path).map_err(|e| with_path(e.error, "replacing", path))?;
    Ok(())
}

#[cfg(unix)]
fn public_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn public_permissions() -> Option<fs::Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_atomic_creates_and_replaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sitemap.xml");

        write_atomic(&path, b"first").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");

        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");

        // Nothing but the target is left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_new_file_is_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        write_atomic(&path, b"<html></html>").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_errors_name_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("index.html");

        let err = read_file(&path).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("index.html"));

        let err = write_atomic(&path, b"x").err().unwrap();
        assert!(err.to_string().contains("index.html"));
    }
}
