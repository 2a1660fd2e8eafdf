//! File system scanner for discovering SVG icons.
//!
//! Recursively scans a directory for `.svg` files so `create --scan` can
//! fill in the `icons` map of a starter config.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// An SVG file found by [`scan_icons`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredIcon {
    /// Icon name: relative path without extension, `/` replaced by `-`.
    pub name: String,
    /// Path relative to the scanned directory.
    pub file: PathBuf,
}

/// Scan `root` for SVG files, sorted by path.
///
/// A missing directory yields no icons.
pub fn scan_icons(root: &Path) -> Vec<DiscoveredIcon> {
    if !root.exists() {
        return Vec::new();
    }

    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file() && is_svg(entry.path()))
        .filter_map(|entry| {
            let file = entry.path().strip_prefix(root).ok()?.to_path_buf();
            Some(DiscoveredIcon {
                name: icon_name(&file)?,
                file,
            })
        })
        .collect()
}

/// Whether a path has an `.svg` extension (any case).
pub fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}

fn icon_name(relative: &Path) -> Option<String> {
    let stem = relative.with_extension("");
    let parts: Vec<&str> = stem
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("-"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_svg() {
        assert!(is_svg(Path::new("play.svg")));
        assert!(is_svg(Path::new("PLAY.SVG")));
        assert!(!is_svg(Path::new("play.svg.bak")));
        assert!(!is_svg(Path::new("svg")));
    }

    #[test]
    fn test_scan_icons() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        fs::create_dir_all(root.join("controls")).unwrap();
        fs::write(root.join("play.svg"), "<svg/>").unwrap();
        fs::write(root.join("pause.svg"), "<svg/>").unwrap();
        fs::write(root.join("controls/fullscreen.svg"), "<svg/>").unwrap();
        fs::write(root.join("README.md"), "# icons").unwrap();

        let icons = scan_icons(root);
        let names: Vec<&str> = icons.iter().map(|i| i.name.as_str()).collect();

        assert_eq!(names, vec!["controls-fullscreen", "pause", "play"]);
        assert_eq!(icons[0].file, PathBuf::from("controls/fullscreen.svg"));
    }

    #[test]
    fn test_scan_missing_directory() {
        assert!(scan_icons(Path::new("/nonexistent/path")).is_empty());
    }
}
