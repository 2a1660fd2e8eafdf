//! Optimization entry points used by the pipeline.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SpriteError};

use super::dom::{Document, Js2Svg};
use super::plugins::{AddAttributesParams, AttributeSpec, Plugin, RemoveAttrsParams};

/// An svgo-style optimization config: serializer settings plus an ordered
/// plugin list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OptimizeConfig {
    #[serde(default)]
    pub js2svg: Js2Svg,
    #[serde(default)]
    pub plugins: Vec<Plugin>,
}

impl OptimizeConfig {
    /// Cleanup applied to every icon before it is staged.
    pub fn icon_default() -> Self {
        Self {
            js2svg: Js2Svg {
                indent: 2,
                pretty: true,
            },
            plugins: vec![
                Plugin::RemoveXmlProcInst,
                Plugin::CleanupAttrs,
                Plugin::CleanupIds,
                Plugin::RemoveAttrs(RemoveAttrsParams {
                    attrs: [
                        "version",
                        "sketch.type",
                        "xmlns.sketch",
                        "stroke-width",
                        "fill-rule",
                        "style",
                    ]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                }),
                Plugin::RemoveUselessStrokeAndFill,
                Plugin::RemoveDimensions,
                Plugin::RemoveDesc,
                Plugin::RemoveComments,
                Plugin::RemoveTitle,
                Plugin::RemoveUselessDefs,
                Plugin::RemoveStyleElement,
                Plugin::RemoveXlink,
                Plugin::CollapseGroups,
                Plugin::ConvertPathData,
                Plugin::ConvertTransform,
                Plugin::MergePaths,
            ],
        }
    }

    /// Cleanup applied to the compiled sprite: strip namespace and style
    /// attributes everywhere, then hide the root and give it one `xmlns`.
    pub fn sprite_default() -> Self {
        let pair = |name: &str, value: &str| {
            AttributeSpec::Pairs(BTreeMap::from([(name.to_string(), value.to_string())]))
        };

        Self {
            js2svg: Js2Svg::default(),
            plugins: vec![
                Plugin::RemoveAttrs(RemoveAttrsParams {
                    attrs: ["xmlns", "xmlns.xlink", "style"]
                        .into_iter()
                        .map(String::from)
                        .collect(),
                }),
                Plugin::AddAttributesToSvgElement(AddAttributesParams {
                    attributes: vec![
                        pair("style", "display:none"),
                        pair("xmlns", "http://www.w3.org/2000/svg"),
                    ],
                }),
            ],
        }
    }
}

/// Run every plugin in order over `svg` and serialize the result.
pub fn optimize(svg: &str, config: &OptimizeConfig) -> Result<String> {
    let mut doc = Document::parse(svg)?;
    for plugin in &config.plugins {
        plugin.apply(&mut doc)?;
    }
    Ok(doc.to_svg(&config.js2svg))
}

/// Read an icon from disk and optimize it.
pub fn optimize_icon(path: &Path, config: &OptimizeConfig) -> Result<String> {
    let source = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SpriteError::IconNotFound {
            name: path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: path.to_path_buf(),
        },
        _ => SpriteError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        },
    })?;

    optimize(&source, config).map_err(|e| match e {
        SpriteError::SvgParse { message, help } => SpriteError::SvgParse {
            message: format!("{}: {}", path.display(), message),
            help,
        },
        other => other,
    })
}

/// Decode compiled sprite bytes as UTF-8 and optimize them.
pub fn optimize_sprite(bytes: &[u8], config: &OptimizeConfig) -> Result<String> {
    let source = std::str::from_utf8(bytes)
        .map_err(|e| SpriteError::svg(format!("sprite is not valid UTF-8: {}", e)))?;
    optimize(source, config)
}
