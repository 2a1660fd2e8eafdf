//! vjs-svg-sprite - Video.js SVG icon sprite generator
//!
//! Optimizes a set of SVG icons, assembles them into a single `<symbol>`
//! sprite with an HTML preview page, cleans the sprite and writes it out.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod sprite;
pub mod svg;

pub use config::{
    load_override, parse_config_file, IconFile, IconSource, SpriteConfig, SpriterConfig,
    DEFAULT_CONFIG_FILENAME,
};
pub use discovery::{config_from_directory, scan_icons, DiscoveredIcon};
pub use error::{Result, SpriteError};
pub use pipeline::{
    create_temp_dir, delete_temp_dir, generate_icon_paths, generate_svg_sprite, persist_artifact,
    staging_dir_path, store_icon_in_temp_dir, GenerateOptions, GenerateReport, ResolvedIconPath,
};
pub use sprite::{ArtifactKind, CompiledArtifact, Shape, SvgSpriter};
pub use svg::{optimize, optimize_icon, optimize_sprite, OptimizeConfig};
