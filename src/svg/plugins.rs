//! Declarative SVG transforms.
//!
//! Each [`Plugin`] is one rewrite of the document tree. Plugins are listed
//! in an [`OptimizeConfig`](super::OptimizeConfig) using svgo's names, either
//! as a bare string or as `{ "name": ..., "params": ... }`.

use std::collections::{BTreeMap, HashMap};

use regex::Regex;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};

use crate::error::{Result, SpriteError};

use super::dom::{Document, Element, Node};
use super::ids::{declared_ids, referenced_ids, rename_ids, short_id};
use super::path::{compact_path_data, PathData};
use super::transform::compact_transform;

/// Decimal places kept by path and transform rewriting.
const FLOAT_PRECISION: u8 = 3;

const SHAPE_ELEMENTS: &[&str] = &[
    "circle", "ellipse", "line", "path", "polygon", "polyline", "rect",
];

const NON_RENDERING_ELEMENTS: &[&str] = &[
    "clipPath",
    "filter",
    "linearGradient",
    "marker",
    "mask",
    "pattern",
    "radialGradient",
    "solidColor",
    "symbol",
];

const ANIMATION_ELEMENTS: &[&str] = &[
    "animate",
    "animateColor",
    "animateMotion",
    "animateTransform",
    "set",
];

/// Presentation attributes a child inherits from its group.
const INHERITABLE_ATTRS: &[&str] = &[
    "clip-rule",
    "color",
    "color-interpolation",
    "color-interpolation-filters",
    "color-profile",
    "color-rendering",
    "cursor",
    "direction",
    "dominant-baseline",
    "fill",
    "fill-opacity",
    "fill-rule",
    "font",
    "font-family",
    "font-size",
    "font-size-adjust",
    "font-stretch",
    "font-style",
    "font-variant",
    "font-weight",
    "glyph-orientation-horizontal",
    "glyph-orientation-vertical",
    "image-rendering",
    "letter-spacing",
    "marker",
    "marker-end",
    "marker-mid",
    "marker-start",
    "paint-order",
    "pointer-events",
    "shape-rendering",
    "stroke",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "text-anchor",
    "text-rendering",
    "visibility",
    "word-spacing",
    "writing-mode",
];

/// Attributes that stop two paths from being merged.
const MERGE_BLOCKERS: &[&str] = &[
    "id",
    "marker-start",
    "marker-mid",
    "marker-end",
    "clip-path",
    "mask",
    "mask-image",
    "transform",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Plugin {
    RemoveXmlProcInst,
    CleanupAttrs,
    CleanupIds,
    RemoveAttrs(RemoveAttrsParams),
    RemoveUselessStrokeAndFill,
    RemoveDimensions,
    RemoveDesc,
    RemoveComments,
    RemoveTitle,
    RemoveUselessDefs,
    RemoveStyleElement,
    RemoveXlink,
    CollapseGroups,
    ConvertPathData,
    ConvertTransform,
    MergePaths,
    AddAttributesToSvgElement(AddAttributesParams),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoveAttrsParams {
    /// Patterns of the form `attr`, `elem:attr` or `elem:attr:value`.
    /// Each part is a regular expression; `.` conveniently matches `:`.
    pub attrs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddAttributesParams {
    pub attributes: Vec<AttributeSpec>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AttributeSpec {
    /// Attribute with an empty value.
    Name(String),
    Pairs(BTreeMap<String, String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PluginEntry {
    Name(String),
    Configured {
        name: String,
        #[serde(default)]
        params: Option<serde_json::Value>,
    },
}

impl<'de> Deserialize<'de> for Plugin {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let (name, params) = match PluginEntry::deserialize(deserializer)? {
            PluginEntry::Name(name) => (name, None),
            PluginEntry::Configured { name, params } => (name, params),
        };
        Plugin::from_parts(&name, params).map_err(D::Error::custom)
    }
}

impl Plugin {
    fn from_parts(name: &str, params: Option<serde_json::Value>) -> std::result::Result<Self, String> {
        let plugin = match name {
            "removeXMLProcInst" => Plugin::RemoveXmlProcInst,
            "cleanupAttrs" => Plugin::CleanupAttrs,
            "cleanupIds" | "cleanupIDs" => Plugin::CleanupIds,
            "removeAttrs" => Plugin::RemoveAttrs(params_for(name, params)?),
            "removeUselessStrokeAndFill" => Plugin::RemoveUselessStrokeAndFill,
            "removeDimensions" => Plugin::RemoveDimensions,
            "removeDesc" => Plugin::RemoveDesc,
            "removeComments" => Plugin::RemoveComments,
            "removeTitle" => Plugin::RemoveTitle,
            "removeUselessDefs" => Plugin::RemoveUselessDefs,
            "removeStyleElement" => Plugin::RemoveStyleElement,
            "removeXlink" => Plugin::RemoveXlink,
            "collapseGroups" => Plugin::CollapseGroups,
            "convertPathData" => Plugin::ConvertPathData,
            "convertTransform" => Plugin::ConvertTransform,
            "mergePaths" => Plugin::MergePaths,
            "addAttributesToSVGElement" => {
                Plugin::AddAttributesToSvgElement(params_for(name, params)?)
            }
            other => return Err(format!("unknown plugin `{}`", other)),
        };
        Ok(plugin)
    }

    /// The svgo name of this plugin.
    pub fn name(&self) -> &'static str {
        match self {
            Plugin::RemoveXmlProcInst => "removeXMLProcInst",
            Plugin::CleanupAttrs => "cleanupAttrs",
            Plugin::CleanupIds => "cleanupIds",
            Plugin::RemoveAttrs(_) => "removeAttrs",
            Plugin::RemoveUselessStrokeAndFill => "removeUselessStrokeAndFill",
            Plugin::RemoveDimensions => "removeDimensions",
            Plugin::RemoveDesc => "removeDesc",
            Plugin::RemoveComments => "removeComments",
            Plugin::RemoveTitle => "removeTitle",
            Plugin::RemoveUselessDefs => "removeUselessDefs",
            Plugin::RemoveStyleElement => "removeStyleElement",
            Plugin::RemoveXlink => "removeXlink",
            Plugin::CollapseGroups => "collapseGroups",
            Plugin::ConvertPathData => "convertPathData",
            Plugin::ConvertTransform => "convertTransform",
            Plugin::MergePaths => "mergePaths",
            Plugin::AddAttributesToSvgElement(_) => "addAttributesToSVGElement",
        }
    }

    /// Apply this transform to `doc` in place.
    pub fn apply(&self, doc: &mut Document) -> Result<()> {
        match self {
            Plugin::RemoveXmlProcInst => doc.nodes.retain(|node| !is_xml_declaration(node)),
            Plugin::CleanupAttrs => for_each_element(doc, cleanup_attrs),
            Plugin::CleanupIds => {
                if let Some(root) = doc.root_mut() {
                    cleanup_ids(root);
                }
            }
            Plugin::RemoveAttrs(params) => remove_attrs(doc, params)?,
            Plugin::RemoveUselessStrokeAndFill => {
                if let Some(root) = doc.root_mut() {
                    if !has_styles_or_scripts(root) {
                        remove_useless_stroke_and_fill(root, &HashMap::new());
                    }
                }
            }
            Plugin::RemoveDimensions => {
                if let Some(root) = doc.root_mut() {
                    remove_dimensions(root);
                }
            }
            Plugin::RemoveDesc => remove_named(doc, "desc"),
            Plugin::RemoveComments => {
                let is_removable =
                    |node: &Node| matches!(node, Node::Comment(text) if !text.starts_with('!'));
                doc.nodes.retain(|node| !is_removable(node));
                if let Some(root) = doc.root_mut() {
                    root.remove_nodes(&is_removable);
                }
            }
            Plugin::RemoveTitle => remove_named(doc, "title"),
            Plugin::RemoveUselessDefs => {
                if let Some(root) = doc.root_mut() {
                    remove_useless_defs(root);
                }
            }
            Plugin::RemoveStyleElement => remove_named(doc, "style"),
            Plugin::RemoveXlink => {
                if let Some(root) = doc.root_mut() {
                    remove_xlink(root);
                }
            }
            Plugin::CollapseGroups => {
                if let Some(root) = doc.root_mut() {
                    collapse_groups(root);
                }
            }
            Plugin::ConvertPathData => for_each_element(doc, |el| {
                if el.name == "path" {
                    if let Some(d) = el.attr("d").and_then(|d| compact_path_data(d, FLOAT_PRECISION)) {
                        el.set_attr("d", d);
                    }
                }
            }),
            Plugin::ConvertTransform => for_each_element(doc, convert_transforms),
            Plugin::MergePaths => for_each_element(doc, merge_paths),
            Plugin::AddAttributesToSvgElement(params) => {
                if let Some(root) = doc.root_mut() {
                    add_attributes(root, params);
                }
            }
        }
        Ok(())
    }
}

fn params_for<T: DeserializeOwned>(
    name: &str,
    params: Option<serde_json::Value>,
) -> std::result::Result<T, String> {
    let value = params.ok_or_else(|| format!("plugin `{}` requires params", name))?;
    serde_json::from_value(value).map_err(|e| format!("invalid params for `{}`: {}", name, e))
}

fn for_each_element(doc: &mut Document, mut f: impl FnMut(&mut Element)) {
    for node in doc.nodes.iter_mut() {
        if let Node::Element(el) = node {
            el.walk_mut(&mut f);
        }
    }
}

fn remove_named(doc: &mut Document, name: &str) {
    if let Some(root) = doc.root_mut() {
        root.remove_elements(&|el: &Element| el.name == name);
    }
}

fn is_xml_declaration(node: &Node) -> bool {
    match node {
        Node::Instruction(content) => {
            content == "xml" || content.starts_with("xml ") || content.starts_with("xml\t")
        }
        _ => false,
    }
}

fn has_styles_or_scripts(root: &Element) -> bool {
    root.contains_element("style") || root.contains_element("script")
}

fn cleanup_attrs(el: &mut Element) {
    for attr in el.attributes.iter_mut() {
        attr.value = attr.value.split_whitespace().collect::<Vec<_>>().join(" ");
    }
}

/// Drop unreferenced IDs and shorten referenced ones.
fn cleanup_ids(root: &mut Element) {
    if has_styles_or_scripts(root) {
        return;
    }

    let referenced = referenced_ids(root);
    root.walk_mut(&mut |el| {
        if el.attr("id").is_some_and(|id| !referenced.contains(id)) {
            el.remove_attr("id");
        }
    });

    let renames: HashMap<String, String> = declared_ids(root)
        .into_iter()
        .enumerate()
        .map(|(n, id)| (id, short_id(n)))
        .collect();
    rename_ids(root, &renames);
}

struct AttrPattern {
    element: Regex,
    name: Regex,
    value: Regex,
}

fn anchored(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| SpriteError::ConfigParse {
        message: format!("invalid removeAttrs pattern `{}`: {}", pattern, e),
        help: None,
    })
}

fn remove_attrs(doc: &mut Document, params: &RemoveAttrsParams) -> Result<()> {
    let patterns = params
        .attrs
        .iter()
        .map(|pattern| {
            let parts: Vec<&str> = pattern.split(':').collect();
            let (element, name, value) = match parts.as_slice() {
                [name] => (".*", *name, ".*"),
                [element, name] => (*element, *name, ".*"),
                [element, name, value, ..] => (*element, *name, *value),
                [] => (".*", "", ".*"),
            };
            Ok(AttrPattern {
                element: anchored(element)?,
                name: anchored(name)?,
                value: anchored(value)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    for_each_element(doc, |el| {
        let element_name = el.name.clone();
        el.attributes.retain(|attr| {
            !patterns.iter().any(|p| {
                p.element.is_match(&element_name)
                    && p.name.is_match(&attr.name)
                    && p.value.is_match(&attr.value)
            })
        });
    });
    Ok(())
}

/// Presentation values relevant to stroke/fill, as inherited from ancestors.
type Inherited = HashMap<&'static str, String>;

const PAINT_ATTRS: &[&str] = &[
    "stroke",
    "stroke-opacity",
    "stroke-width",
    "marker-end",
    "fill",
    "fill-opacity",
];

fn remove_useless_stroke_and_fill(el: &mut Element, inherited: &Inherited) {
    if el.has_attr("id") {
        return;
    }

    let mut computed = inherited.clone();
    for name in PAINT_ATTRS {
        if let Some(value) = el.attr(name) {
            computed.insert(*name, value.trim().to_string());
        }
    }

    if SHAPE_ELEMENTS.contains(&el.name.as_str()) {
        let get = |name: &str| computed.get(name).map(String::as_str);
        let stroke = get("stroke");
        let no_stroke = stroke.is_none()
            || stroke == Some("none")
            || get("stroke-opacity") == Some("0")
            || get("stroke-width") == Some("0");

        if no_stroke && (get("stroke-width") == Some("0") || get("marker-end").is_none()) {
            el.attributes.retain(|attr| !attr.name.starts_with("stroke"));
            let parent_stroke = inherited.get("stroke").map(String::as_str);
            if parent_stroke.is_some_and(|s| s != "none") {
                el.set_attr("stroke", "none");
            }
        }

        let fill = get("fill");
        if fill == Some("none") || get("fill-opacity") == Some("0") {
            el.attributes.retain(|attr| !attr.name.starts_with("fill-"));
            if fill != Some("none") {
                el.set_attr("fill", "none");
            }
        }
    }

    for child in el.elements_mut() {
        remove_useless_stroke_and_fill(child, &computed);
    }
}

fn parse_length(value: &str) -> Option<f64> {
    value.trim().trim_end_matches("px").parse().ok()
}

fn remove_dimensions(root: &mut Element) {
    if root.has_attr("viewBox") {
        root.remove_attr("width");
        root.remove_attr("height");
        return;
    }

    let width = root.attr("width").and_then(|w| w.trim().parse::<f64>().ok());
    let height = root.attr("height").and_then(|h| h.trim().parse::<f64>().ok());
    if let (Some(width), Some(height)) = (width, height) {
        root.set_attr("viewBox", format!("0 0 {} {}", width, height));
        root.remove_attr("width");
        root.remove_attr("height");
    }
}

fn is_useful_in_defs(el: &Element) -> bool {
    el.has_attr("id") || el.name == "style"
}

/// Children of a `<defs>` worth keeping: referenced-able elements, hoisted
/// out of anonymous wrappers.
fn collect_useful(children: Vec<Node>) -> Vec<Node> {
    let mut useful = Vec::new();
    for node in children {
        if let Node::Element(el) = node {
            if is_useful_in_defs(&el) {
                useful.push(Node::Element(el));
            } else {
                useful.extend(collect_useful(el.children));
            }
        }
    }
    useful
}

fn remove_useless_defs(el: &mut Element) {
    let children = std::mem::take(&mut el.children);
    for node in children {
        match node {
            Node::Element(mut child) if child.name == "defs" => {
                child.children = collect_useful(std::mem::take(&mut child.children));
                if !child.children.is_empty() {
                    el.children.push(Node::Element(child));
                }
            }
            Node::Element(child)
                if NON_RENDERING_ELEMENTS.contains(&child.name.as_str()) && !child.has_attr("id") => {}
            Node::Element(mut child) => {
                remove_useless_defs(&mut child);
                el.children.push(Node::Element(child));
            }
            other => el.children.push(other),
        }
    }
}

const LEGACY_XLINK_ELEMENTS: &[&str] = &["cursor", "filter", "font", "glyph", "tref"];

fn remove_xlink(root: &mut Element) {
    root.walk_mut(&mut |el| {
        if !LEGACY_XLINK_ELEMENTS.contains(&el.name.as_str()) {
            if let Some(href) = el.remove_attr("xlink:href") {
                if !el.has_attr("href") {
                    el.set_attr("href", href);
                }
            }
        }

        if let Some(show) = el.remove_attr("xlink:show") {
            let target = match show.as_str() {
                "new" => Some("_blank"),
                "replace" => Some("_self"),
                _ => None,
            };
            if let (Some(target), false) = (target, el.has_attr("target")) {
                el.set_attr("target", target);
            }
        }

        if let Some(title) = el.remove_attr("xlink:title") {
            if !el.elements().any(|child| child.name == "title") {
                let mut title_el = Element::new("title");
                title_el
                    .children
                    .push(Node::Text(quick_xml::escape::escape(title.as_str()).into_owned()));
                el.children.insert(0, Node::Element(title_el));
            }
        }
    });

    let mut uses_xlink = false;
    root.walk(&mut |el| {
        uses_xlink |= el
            .attributes
            .iter()
            .any(|attr| attr.name.starts_with("xlink:"));
    });
    if !uses_xlink {
        root.walk_mut(&mut |el| {
            el.remove_attr("xmlns:xlink");
        });
    }
}

fn collapse_groups(el: &mut Element) {
    for child in el.elements_mut() {
        collapse_groups(child);
    }

    if el.name == "switch" {
        return;
    }

    let children = std::mem::take(&mut el.children);
    for node in children {
        match node {
            Node::Element(mut group) if group.name == "g" => {
                move_group_attrs_to_child(&mut group);
                let animated = group
                    .elements()
                    .any(|c| ANIMATION_ELEMENTS.contains(&c.name.as_str()));
                if group.attributes.is_empty() && !animated {
                    el.children.extend(group.children);
                } else {
                    el.children.push(Node::Element(group));
                }
            }
            other => el.children.push(other),
        }
    }
}

/// Push a group's attributes down onto its only child, when that is safe.
fn move_group_attrs_to_child(group: &mut Element) {
    if group.attributes.is_empty() || group.children.len() != 1 {
        return;
    }
    let Some(Node::Element(child)) = group.children.first() else {
        return;
    };

    let blocked = child.has_attr("id")
        || group.has_attr("filter")
        || (group.has_attr("class") && child.has_attr("class"))
        || ((group.has_attr("clip-path") || group.has_attr("mask"))
            && !(child.name == "g" && !group.has_attr("transform") && !child.has_attr("transform")));
    if blocked {
        return;
    }

    let animated: Vec<String> = child
        .elements()
        .filter(|c| ANIMATION_ELEMENTS.contains(&c.name.as_str()))
        .filter_map(|c| c.attr("attributeName").map(str::to_string))
        .collect();

    for attr in &group.attributes {
        if animated.contains(&attr.name) {
            return;
        }
        match child.attr(&attr.name) {
            None => {}
            Some(_) if attr.name == "transform" => {}
            Some("inherit") => {}
            Some(value) if !INHERITABLE_ATTRS.contains(&attr.name.as_str()) && value != attr.value => {
                return;
            }
            Some(_) => {}
        }
    }

    let attributes = std::mem::take(&mut group.attributes);
    let Some(Node::Element(child)) = group.children.first_mut() else {
        return;
    };
    for attr in attributes {
        match child.attr(&attr.name).map(str::to_string) {
            None => child.set_attr(attr.name, attr.value),
            Some(existing) if attr.name == "transform" => {
                child.set_attr(attr.name, format!("{} {}", attr.value, existing));
            }
            Some(existing) if existing == "inherit" => child.set_attr(attr.name, attr.value),
            Some(_) => {}
        }
    }
}

fn convert_transforms(el: &mut Element) {
    for name in ["transform", "gradientTransform", "patternTransform"] {
        let Some(value) = el.attr(name) else { continue };
        match compact_transform(value, FLOAT_PRECISION) {
            Some(short) if short.is_empty() => {
                el.remove_attr(name);
            }
            Some(short) => el.set_attr(name, short),
            None => {}
        }
    }
}

fn is_mergeable_path(el: &Element) -> bool {
    el.name == "path"
        && el.children.is_empty()
        && el.has_attr("d")
        && !el
            .attributes
            .iter()
            .any(|attr| MERGE_BLOCKERS.contains(&attr.name.as_str()) || attr.value.contains("url("))
}

fn same_attrs_except_d(a: &Element, b: &Element) -> bool {
    fn filtered(el: &Element) -> Vec<(&str, &str)> {
        let mut attrs: Vec<(&str, &str)> = el
            .attributes
            .iter()
            .filter(|attr| attr.name != "d")
            .map(|attr| (attr.name.as_str(), attr.value.as_str()))
            .collect();
        attrs.sort_unstable();
        attrs
    }
    filtered(a) == filtered(b)
}

/// Merge runs of sibling paths with identical attributes whose bounding
/// boxes don't overlap.
fn merge_paths(el: &mut Element) {
    let children = std::mem::take(&mut el.children);
    for node in children {
        let current = match node {
            Node::Element(current) => current,
            other => {
                el.children.push(other);
                continue;
            }
        };

        let merged = match el.children.last_mut() {
            Some(Node::Element(previous))
                if is_mergeable_path(previous)
                    && is_mergeable_path(&current)
                    && same_attrs_except_d(previous, &current) =>
            {
                try_merge(previous, &current)
            }
            _ => false,
        };
        if !merged {
            el.children.push(Node::Element(current));
        }
    }
}

fn try_merge(previous: &mut Element, current: &Element) -> bool {
    let (Some(prev_d), Some(cur_d)) = (previous.attr("d"), current.attr("d")) else {
        return false;
    };
    let (Ok(mut prev_path), Ok(cur_path)) = (PathData::parse(prev_d), PathData::parse(cur_d)) else {
        return false;
    };
    let overlapping = match (prev_path.bounds(), cur_path.bounds()) {
        (Some(a), Some(b)) => a.intersects(&b),
        _ => true,
    };
    if overlapping {
        return false;
    }
    prev_path.extend(cur_path);
    previous.set_attr("d", prev_path.to_compact(FLOAT_PRECISION));
    true
}

fn add_attributes(root: &mut Element, params: &AddAttributesParams) {
    for spec in &params.attributes {
        match spec {
            AttributeSpec::Name(name) => {
                if !root.has_attr(name) {
                    root.set_attr(name.clone(), "");
                }
            }
            AttributeSpec::Pairs(pairs) => {
                for (name, value) in pairs {
                    if !root.has_attr(name) {
                        root.set_attr(name.clone(), value.clone());
                    }
                }
            }
        }
    }
}

/// Numeric `width`/`height` attribute, tolerating a `px` suffix.
pub(crate) fn length_attr(el: &Element, name: &str) -> Option<f64> {
    el.attr(name).and_then(parse_length)
}
