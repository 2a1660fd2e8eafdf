//! Writing compiled artifacts to their destinations.

use std::fs;
use std::path::Path;

use crate::error::{Result, SpriteError};

/// Write `contents` to `path`, creating parent directories and replacing
/// any existing file.
pub fn persist_artifact(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| SpriteError::OutputWrite {
            path: parent.to_path_buf(),
            message: format!("failed to create directory: {}", e),
        })?;
    }

    fs::write(path, contents).map_err(|e| SpriteError::OutputWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dist/vjs-sprite/vjs-sprite-icons.svg");

        persist_artifact(&path, b"<svg/>").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"<svg/>");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "a much longer previous file").unwrap();

        persist_artifact(&path, b"new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();

        let result = persist_artifact(&blocker.join("sprite.svg"), b"<svg/>");
        assert!(matches!(result, Err(SpriteError::OutputWrite { .. })));
    }
}
