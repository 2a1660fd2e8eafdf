//! Icon discovery.
//!
//! Finds SVG files on disk and turns them into icon config entries.

mod scanner;

use std::path::Path;

use indexmap::IndexMap;

use crate::config::{IconSource, SpriteConfig};

pub use scanner::{is_svg, scan_icons, DiscoveredIcon};

/// A starter config listing every SVG under `dir`.
///
/// `root_dir` is what the config will call `dir`, usually the path as the
/// user typed it, so the config stays relative to the working directory.
pub fn config_from_directory(dir: &Path, root_dir: &Path) -> SpriteConfig {
    let icons: IndexMap<String, IconSource> = scan_icons(dir)
        .into_iter()
        .map(|icon| (icon.name, IconSource::Direct(icon.file)))
        .collect();

    SpriteConfig {
        root_dir: Some(root_dir.to_path_buf()),
        output_dir: SpriteConfig::template().output_dir,
        icons,
    }
}
