//! Sprite assembly settings.
//!
//! Field names follow the svg-sprite JSON layout so existing override files
//! keep working. Every field has a default, so an override file only needs
//! the keys it changes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings for the sprite assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpriterConfig {
    /// Base destination directory, relative to the working directory.
    pub dest: PathBuf,
    pub mode: ModeConfig,
    pub shape: ShapeConfig,
    pub svg: SvgOutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeConfig {
    /// `<symbol>` sprite output. `None` disables it.
    pub symbol: Option<SymbolModeConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolModeConfig {
    /// Emit a sprite meant to be inlined into an HTML page.
    pub inline: bool,
    /// Sprite file name.
    pub sprite: PathBuf,
    /// Output directory, relative to [`SpriterConfig::dest`].
    pub dest: PathBuf,
    /// Optional HTML preview page.
    pub example: Option<ExampleConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExampleConfig {
    /// Preview file name, relative to the symbol output directory.
    pub dest: PathBuf,
    /// Custom template. The built-in page is used when unset.
    pub template: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    pub id: IdConfig,
    pub dimension: DimensionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdConfig {
    /// Symbol ID template, `%s` is replaced by the icon name.
    pub generator: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DimensionConfig {
    pub max_width: f64,
    pub max_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SvgOutputConfig {
    pub xml_declaration: bool,
    pub doctype_declaration: bool,
}

impl Default for SpriterConfig {
    fn default() -> Self {
        Self {
            dest: PathBuf::from("."),
            mode: ModeConfig::default(),
            shape: ShapeConfig::default(),
            svg: SvgOutputConfig::default(),
        }
    }
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            symbol: Some(SymbolModeConfig::default()),
        }
    }
}

impl Default for SymbolModeConfig {
    fn default() -> Self {
        Self {
            inline: true,
            sprite: PathBuf::from("vjs-sprite-icons.svg"),
            dest: PathBuf::from("vjs-sprite"),
            example: Some(ExampleConfig::default()),
        }
    }
}

impl Default for ExampleConfig {
    fn default() -> Self {
        Self {
            dest: PathBuf::from("index.html"),
            template: None,
        }
    }
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            generator: "vjs-icon-%s".to_string(),
        }
    }
}

impl Default for DimensionConfig {
    fn default() -> Self {
        Self {
            max_width: 48.0,
            max_height: 48.0,
        }
    }
}

impl Default for SvgOutputConfig {
    fn default() -> Self {
        Self {
            xml_declaration: false,
            doctype_declaration: false,
        }
    }
}

impl SpriterConfig {
    /// A copy with the symbol output directory replaced.
    ///
    /// This is how the icon config's `output-dir` reaches the assembler.
    pub fn with_output_dir(&self, output_dir: impl Into<PathBuf>) -> Self {
        let mut config = self.clone();
        if let Some(symbol) = config.mode.symbol.as_mut() {
            symbol.dest = output_dir.into();
        }
        config
    }
}
