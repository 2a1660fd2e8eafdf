//! A single icon turned into a `<symbol>`.

use std::collections::HashMap;

use crate::config::DimensionConfig;
use crate::error::{Result, SpriteError};
use crate::svg::{declared_ids, length_attr, parse_number_list, rename_ids, Document, Element};

/// Root attributes that make no sense on a `<symbol>`.
const DROPPED_ROOT_ATTRS: &[&str] = &[
    "id",
    "x",
    "y",
    "width",
    "height",
    "viewBox",
    "version",
    "style",
    "baseProfile",
    "enable-background",
    "xml:space",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Symbol ID, e.g. `vjs-icon-play`.
    pub id: String,
    /// Name the ID was generated from.
    pub name: String,
    /// Display size after fitting into the configured maximum.
    pub width: f64,
    pub height: f64,
    pub symbol: Element,
}

impl Shape {
    /// Parse an optimized icon and wrap its content in a `<symbol id="id">`.
    pub fn from_svg(
        name: &str,
        id: &str,
        content: &str,
        dimension: &DimensionConfig,
    ) -> Result<Self> {
        let mut doc = Document::parse(content).map_err(|e| SpriteError::SpriteCompilation {
            message: format!("icon '{}' could not be parsed: {}", name, e),
            help: None,
        })?;
        let Some(root) = doc.root_mut() else {
            return Err(SpriteError::compile(format!("icon '{}' is empty", name)));
        };
        if root.name != "svg" {
            return Err(SpriteError::SpriteCompilation {
                message: format!("icon '{}' has a <{}> root", name, root.name),
                help: Some("Icons must be standalone <svg> documents".to_string()),
            });
        }

        let view_box = view_box(root);
        let (width, height) = match view_box {
            Some([_, _, w, h]) => fit(w, h, dimension),
            None => (dimension.max_width, dimension.max_height),
        };

        // Keep IDs unique once every icon shares one document.
        let renames: HashMap<String, String> = declared_ids(root)
            .into_iter()
            .map(|old| {
                let new = format!("{}-{}", id, old);
                (old, new)
            })
            .collect();
        rename_ids(root, &renames);

        let mut symbol = Element::new("symbol").with_attr("id", id);
        if let Some([x, y, w, h]) = view_box {
            symbol.set_attr("viewBox", format!("{} {} {} {}", x, y, w, h));
        }
        for attr in &root.attributes {
            let name = attr.name.as_str();
            if name == "xmlns" || name.starts_with("xmlns:") || DROPPED_ROOT_ATTRS.contains(&name) {
                continue;
            }
            symbol.set_attr(name, attr.value.clone());
        }
        symbol.children = std::mem::take(&mut root.children);

        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            width,
            height,
            symbol,
        })
    }
}

/// `viewBox` as given, or derived from numeric `width`/`height`.
fn view_box(root: &Element) -> Option<[f64; 4]> {
    if let Some(list) = root.attr("viewBox").and_then(parse_number_list) {
        if let [x, y, w, h] = list.as_slice() {
            return Some([*x, *y, *w, *h]);
        }
    }
    match (length_attr(root, "width"), length_attr(root, "height")) {
        (Some(w), Some(h)) => Some([0.0, 0.0, w, h]),
        _ => None,
    }
}

/// Scale down to fit the configured box, keeping the aspect ratio.
fn fit(width: f64, height: f64, dimension: &DimensionConfig) -> (f64, f64) {
    if width <= 0.0 || height <= 0.0 {
        return (dimension.max_width, dimension.max_height);
    }
    let scale = (dimension.max_width / width)
        .min(dimension.max_height / height)
        .min(1.0);
    (width * scale, height * scale)
}
