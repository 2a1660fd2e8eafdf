//! Configuration loading.
//!
//! Three kinds of configuration feed a run: the user's icon config
//! (JSON), the sprite assembly settings and the two optimizer transform
//! lists. The last three have built-in defaults and may be replaced by
//! override files (JSON, or YAML by extension).

mod icons;
mod spriter;

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{Result, SpriteError};

pub use icons::{parse_config_file, IconFile, IconSource, SpriteConfig};
pub use spriter::{
    DimensionConfig, ExampleConfig, IdConfig, ModeConfig, ShapeConfig, SpriterConfig,
    SvgOutputConfig, SymbolModeConfig,
};

/// The config file name `create` writes when none is given.
pub const DEFAULT_CONFIG_FILENAME: &str = "vjs-icons-config.json";

/// Load an override file into `T`.
///
/// `.yaml`/`.yml` files are read as YAML, everything else as JSON.
pub fn load_override<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| SpriteError::ConfigNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );

    let parsed = if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| SpriteError::ConfigParse {
        message: format!("{}: {}", path.display(), message),
        help: Some("Check the override file syntax".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_json_override() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sprite.json");
        fs::write(&path, r#"{ "dest": "build" }"#).unwrap();

        let config: SpriterConfig = load_override(&path).unwrap();
        assert_eq!(config.dest, Path::new("build"));
    }

    #[test]
    fn test_load_yaml_override() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sprite.yaml");
        fs::write(&path, "shape:\n  id:\n    generator: \"ic-%s\"\n").unwrap();

        let config: SpriterConfig = load_override(&path).unwrap();
        assert_eq!(config.shape.id.generator, "ic-%s");
        assert_eq!(config.dest, Path::new("."));
    }

    #[test]
    fn test_load_override_missing_file() {
        let result: Result<SpriterConfig> = load_override(Path::new("/nonexistent/sprite.json"));
        assert!(matches!(result, Err(SpriteError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_load_override_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ dest: ").unwrap();

        let result: Result<SpriterConfig> = load_override(&path);
        assert!(matches!(result, Err(SpriteError::ConfigParse { .. })));
    }
}
