//! Icon path resolution.

use std::path::{Path, PathBuf};

use crate::config::SpriteConfig;

/// Where an icon is read from and where its optimized copy is staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIconPath {
    pub name: String,
    /// `<working_dir>/<root-dir>/<file>`
    pub icon_path: PathBuf,
    /// `<temp_dir>/<name>.svg`
    pub temp_icon_path: PathBuf,
}

/// Resolve every icon in `config`, in configuration order.
///
/// Pure path arithmetic; nothing is checked on disk.
pub fn generate_icon_paths(
    working_dir: &Path,
    temp_dir: &Path,
    config: &SpriteConfig,
) -> Vec<ResolvedIconPath> {
    config
        .icons
        .iter()
        .map(|(name, source)| {
            let root_dir = source
                .root_dir()
                .unwrap_or_else(|| config.default_root_dir());

            ResolvedIconPath {
                name: name.clone(),
                icon_path: working_dir.join(root_dir).join(source.file()),
                temp_icon_path: temp_dir.join(format!("{}.svg", name)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(json: &str) -> SpriteConfig {
        SpriteConfig::parse(json).unwrap()
    }

    #[test]
    fn test_direct_entry_uses_top_level_root_dir() {
        let config = config(r#"{ "root-dir": "icons", "icons": { "play": "play.svg" } }"#);
        let paths = generate_icon_paths(Path::new("/w"), Path::new("/w/tmp"), &config);

        assert_eq!(
            paths,
            vec![ResolvedIconPath {
                name: "play".to_string(),
                icon_path: PathBuf::from("/w/icons/play.svg"),
                temp_icon_path: PathBuf::from("/w/tmp/play.svg"),
            }]
        );
    }

    #[test]
    fn test_direct_entry_with_subdirectory() {
        let config = config(
            r#"{ "root-dir": "src-icons", "icons": { "search": "icons/search.svg" } }"#,
        );
        let paths = generate_icon_paths(Path::new("/w"), Path::new("/t"), &config);

        assert_eq!(paths[0].icon_path, PathBuf::from("/w/src-icons/icons/search.svg"));
        assert_eq!(paths[0].temp_icon_path, PathBuf::from("/t/search.svg"));
    }

    #[test]
    fn test_object_entry_overrides_root_dir() {
        let config = config(
            r#"{
                "root-dir": "icons",
                "icons": {
                    "full": { "file": "fs.svg", "root-dir": "special" },
                    "empty": { "file": "e.svg", "root-dir": "" },
                    "bare": { "file": "b.svg" }
                }
            }"#,
        );
        let paths = generate_icon_paths(Path::new("/w"), Path::new("/t"), &config);
        let icon_paths: Vec<_> = paths.iter().map(|p| p.icon_path.clone()).collect();

        assert_eq!(
            icon_paths,
            vec![
                PathBuf::from("/w/special/fs.svg"),
                PathBuf::from("/w/icons/e.svg"),
                PathBuf::from("/w/icons/b.svg"),
            ]
        );
    }

    #[test]
    fn test_missing_root_dir_resolves_against_working_dir() {
        let config = config(r#"{ "icons": { "a": "a.svg" } }"#);
        let paths = generate_icon_paths(Path::new("/w"), Path::new("/t"), &config);

        assert_eq!(paths[0].icon_path, PathBuf::from("/w/a.svg"));
    }

    #[test]
    fn test_order_follows_config() {
        let config = config(r#"{ "icons": { "z": "z.svg", "a": "a.svg", "m": "m.svg" } }"#);
        let names: Vec<_> = generate_icon_paths(Path::new("."), Path::new("t"), &config)
            .into_iter()
            .map(|p| p.name)
            .collect();

        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_empty_icons() {
        let config = config(r#"{ "icons": {} }"#);
        assert!(generate_icon_paths(Path::new("."), Path::new("t"), &config).is_empty());
    }
}
