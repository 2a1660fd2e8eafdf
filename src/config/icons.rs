//! Icon configuration (`vjs-icons-config.json`) parsing.
//!
//! The configuration maps logical icon names to SVG source files. An entry
//! is either a bare file name, resolved against the top-level `root-dir`,
//! or an object carrying its own `root-dir`.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpriteError};

/// Top-level icon configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteConfig {
    /// Default directory for icon lookup, relative to the working directory.
    #[serde(rename = "root-dir", default, skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<PathBuf>,

    /// Overrides the sprite destination directory.
    #[serde(rename = "output-dir", default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Icons keyed by name, in file order.
    pub icons: IndexMap<String, IconSource>,
}

/// Where a single icon comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IconSource {
    /// `"home": "home.svg"`
    Direct(PathBuf),

    /// `"home": { "file": "home.svg", "root-dir": "special" }`
    WithRootDir(IconFile),
}

/// Object form of an icon entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IconFile {
    pub file: PathBuf,

    #[serde(rename = "root-dir", default, skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<PathBuf>,
}

impl IconSource {
    /// The icon's file name, relative to its root directory.
    pub fn file(&self) -> &Path {
        match self {
            IconSource::Direct(file) => file,
            IconSource::WithRootDir(entry) => &entry.file,
        }
    }

    /// The per-icon root directory, if one is set and non-empty.
    pub fn root_dir(&self) -> Option<&Path> {
        match self {
            IconSource::Direct(_) => None,
            IconSource::WithRootDir(entry) => entry
                .root_dir
                .as_deref()
                .filter(|dir| !dir.as_os_str().is_empty()),
        }
    }
}

impl SpriteConfig {
    /// Parse an icon configuration from a JSON string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| SpriteError::ConfigParse {
            message: e.to_string(),
            help: Some(
                "Icons must map a name to a file name or to { \"file\", \"root-dir\" }"
                    .to_string(),
            ),
        })
    }

    /// The directory icons are looked up in when they carry no `root-dir`.
    pub fn default_root_dir(&self) -> &Path {
        self.root_dir.as_deref().unwrap_or(Path::new(""))
    }

    /// The starter configuration written by `create`.
    pub fn template() -> Self {
        let mut icons = IndexMap::new();
        icons.insert("play".to_string(), IconSource::Direct(PathBuf::from("play.svg")));
        icons.insert("pause".to_string(), IconSource::Direct(PathBuf::from("pause.svg")));
        icons.insert(
            "fullscreen".to_string(),
            IconSource::WithRootDir(IconFile {
                file: PathBuf::from("fullscreen.svg"),
                root_dir: Some(PathBuf::from("icons/controls")),
            }),
        );

        Self {
            root_dir: Some(PathBuf::from("icons")),
            output_dir: Some(PathBuf::from("dist/vjs-sprite")),
            icons,
        }
    }

    /// Serialize as pretty JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SpriteError::ConfigParse {
            message: format!("Failed to serialize config: {}", e),
            help: None,
        })
    }
}

/// Read and parse the icon configuration at `path`.
///
/// Returns `Ok(None)` when no path is given.
pub fn parse_config_file(path: Option<&Path>) -> Result<Option<SpriteConfig>> {
    let Some(path) = path else {
        return Ok(None);
    };

    let content = std::fs::read_to_string(path).map_err(|source| SpriteError::ConfigNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    SpriteConfig::parse(&content)
        .map(Some)
        .map_err(|e| match e {
            SpriteError::ConfigParse { message, help } => SpriteError::ConfigParse {
                message: format!("{}: {}", path.display(), message),
                help,
            },
            other => other,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_bare_entries() {
        let config = SpriteConfig::parse(
            r#"{ "root-dir": "icons", "icons": { "home": "home.svg", "search": "search.svg" } }"#,
        )
        .unwrap();

        assert_eq!(config.root_dir, Some(PathBuf::from("icons")));
        assert!(config.output_dir.is_none());
        assert_eq!(config.icons.len(), 2);
        assert_eq!(
            config.icons["home"],
            IconSource::Direct(PathBuf::from("home.svg"))
        );
    }

    #[test]
    fn test_parse_object_entry() {
        let config = SpriteConfig::parse(
            r#"{ "root-dir": "icons", "icons": { "a": { "file": "a.svg", "root-dir": "special" } } }"#,
        )
        .unwrap();

        let entry = &config.icons["a"];
        assert_eq!(entry.file(), Path::new("a.svg"));
        assert_eq!(entry.root_dir(), Some(Path::new("special")));
    }

    #[test]
    fn test_object_entry_without_root_dir() {
        let config =
            SpriteConfig::parse(r#"{ "icons": { "a": { "file": "a.svg" } } }"#).unwrap();

        assert_eq!(config.icons["a"].root_dir(), None);
        assert_eq!(config.default_root_dir(), Path::new(""));
    }

    #[test]
    fn test_empty_root_dir_is_ignored() {
        let config = SpriteConfig::parse(
            r#"{ "icons": { "a": { "file": "a.svg", "root-dir": "" } } }"#,
        )
        .unwrap();

        assert_eq!(config.icons["a"].root_dir(), None);
    }

    #[test]
    fn test_preserves_key_order() {
        let config = SpriteConfig::parse(
            r#"{ "icons": { "zeta": "z.svg", "alpha": "a.svg", "mid": "m.svg" } }"#,
        )
        .unwrap();

        let names: Vec<&str> = config.icons.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_rejects_invalid_entry_shape() {
        let result = SpriteConfig::parse(r#"{ "icons": { "a": 42 } }"#);
        assert!(matches!(result, Err(SpriteError::ConfigParse { .. })));

        let result = SpriteConfig::parse(r#"{ "icons": { "a": { "path": "a.svg" } } }"#);
        assert!(matches!(result, Err(SpriteError::ConfigParse { .. })));
    }

    #[test]
    fn test_ignores_unknown_top_level_keys() {
        let config = SpriteConfig::parse(
            r#"{ "$schema": "./icons.schema.json", "comment": "x", "icons": { "a": "a.svg" } }"#,
        )
        .unwrap();

        assert_eq!(config.icons.len(), 1);
    }

    #[test]
    fn test_rejects_missing_icons() {
        let result = SpriteConfig::parse(r#"{ "root-dir": "icons" }"#);
        assert!(matches!(result, Err(SpriteError::ConfigParse { .. })));
    }

    #[test]
    fn test_rejects_invalid_json() {
        let result = SpriteConfig::parse("{ not json");
        assert!(matches!(result, Err(SpriteError::ConfigParse { .. })));
    }

    #[test]
    fn test_parse_config_file_without_path() {
        assert!(parse_config_file(None).unwrap().is_none());
    }

    #[test]
    fn test_parse_config_file_missing() {
        let dir = tempdir().unwrap();
        let result = parse_config_file(Some(&dir.path().join("missing.json")));
        assert!(matches!(result, Err(SpriteError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_parse_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vjs-icons-config.json");
        fs::write(&path, r#"{ "output-dir": "out", "icons": { "x": "x.svg" } }"#).unwrap();

        let config = parse_config_file(Some(&path)).unwrap().unwrap();
        assert_eq!(config.output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_template_roundtrips() {
        let template = SpriteConfig::template();
        let json = template.to_json().unwrap();

        assert!(json.contains("\"root-dir\": \"icons\""));
        assert_eq!(SpriteConfig::parse(&json).unwrap(), template);
    }
}
