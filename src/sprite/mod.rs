//! Sprite assembly.
//!
//! Collects optimized icons and compiles them into one `<symbol>` sprite
//! plus an optional HTML preview page.

mod preview;
mod shape;

use std::path::{Component, Path, PathBuf};

use crate::config::SpriterConfig;
use crate::error::{Result, SpriteError};
use crate::svg::{Document, Element, Js2Svg, Node};

pub use preview::{render_preview, DEFAULT_TEMPLATE};
pub use shape::Shape;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";
const INLINE_STYLE: &str = "position:absolute;width:0;height:0";
const XML_DECLARATION: &str = "xml version=\"1.0\" encoding=\"utf-8\"";
const SVG_DOCTYPE: &str = "svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\"";

/// What a compiled artifact is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Sprite,
    Preview,
}

/// One output file produced by [`SvgSpriter::compile`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledArtifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

impl CompiledArtifact {
    /// Whether the destination is an `.svg` file.
    pub fn is_svg(&self) -> bool {
        self.path.extension().is_some_and(|ext| ext == "svg")
    }
}

/// Accumulates shapes and compiles them into a symbol sprite.
#[derive(Debug)]
pub struct SvgSpriter {
    config: SpriterConfig,
    base_dir: PathBuf,
    shapes: Vec<Shape>,
}

impl SvgSpriter {
    /// Create a spriter whose output paths resolve against `base_dir`.
    pub fn new(config: SpriterConfig, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            base_dir: base_dir.into(),
            shapes: Vec::new(),
        }
    }

    /// Register one icon. The file stem of `virtual_path` names the symbol.
    pub fn add(&mut self, virtual_path: &Path, content: &str) -> Result<()> {
        let name = shape_name(virtual_path).ok_or_else(|| {
            SpriteError::compile(format!(
                "cannot derive a shape name from {}",
                virtual_path.display()
            ))
        })?;
        let id = self.config.shape.id.generator.replace("%s", &name);

        if self.shapes.iter().any(|shape| shape.id == id) {
            return Err(SpriteError::SpriteCompilation {
                message: format!("duplicate symbol ID '{}'", id),
                help: Some("Each icon name must map to a unique symbol ID".to_string()),
            });
        }

        let shape = Shape::from_svg(&name, &id, content, &self.config.shape.dimension)?;
        self.shapes.push(shape);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Build the sprite (and preview page, if configured).
    ///
    /// The sprite comes first. Nothing is written to disk.
    pub fn compile(&self) -> Result<Vec<CompiledArtifact>> {
        let symbol = self.config.mode.symbol.as_ref().ok_or_else(|| {
            SpriteError::SpriteCompilation {
                message: "symbol mode is disabled".to_string(),
                help: Some("Set `mode.symbol` in the sprite config".to_string()),
            }
        })?;
        if self.shapes.is_empty() {
            return Err(SpriteError::SpriteCompilation {
                message: "no icons to compile".to_string(),
                help: Some("Add at least one entry to `icons`".to_string()),
            });
        }

        let mut root = Element::new("svg")
            .with_attr("xmlns", SVG_NAMESPACE)
            .with_attr("xmlns:xlink", XLINK_NAMESPACE);
        if symbol.inline {
            root.set_attr("style", INLINE_STYLE);
        }
        root.children = self
            .shapes
            .iter()
            .map(|shape| Node::Element(shape.symbol.clone()))
            .collect();

        let mut doc = Document::from_root(root);
        if self.config.svg.doctype_declaration {
            doc.nodes.insert(0, Node::DocType(SVG_DOCTYPE.to_string()));
        }
        if self.config.svg.xml_declaration {
            doc.nodes
                .insert(0, Node::Instruction(XML_DECLARATION.to_string()));
        }
        let sprite = doc.to_svg(&Js2Svg::default());

        let output_dir = normalize(
            &self
                .base_dir
                .join(&self.config.dest)
                .join(&symbol.dest),
        );
        let mut artifacts = vec![CompiledArtifact {
            kind: ArtifactKind::Sprite,
            path: output_dir.join(&symbol.sprite),
            contents: sprite.clone().into_bytes(),
        }];

        if let Some(example) = &symbol.example {
            let template = match &example.template {
                Some(path) => {
                    let path = self.base_dir.join(path);
                    std::fs::read_to_string(&path).map_err(|e| SpriteError::Io {
                        path: path.clone(),
                        message: format!("failed to read preview template: {}", e),
                    })?
                }
                None => DEFAULT_TEMPLATE.to_string(),
            };
            artifacts.push(CompiledArtifact {
                kind: ArtifactKind::Preview,
                path: normalize(&output_dir.join(&example.dest)),
                contents: render_preview(&template, &sprite, &self.shapes).into_bytes(),
            });
        }

        Ok(artifacts)
    }
}

/// Stem of the staged file, with whitespace replaced by `_`.
fn shape_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    if stem.is_empty() {
        return None;
    }
    Some(
        stem.chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect(),
    )
}

/// Drop `.` components so `./x/./y` and `x/y` compare equal.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
