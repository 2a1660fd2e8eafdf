//! Owned SVG document tree.
//!
//! Parsed with quick-xml. Attribute values are stored unescaped; text is
//! kept in its escaped source form and written back verbatim.

use quick_xml::escape::{escape, unescape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Deserialize;

use crate::error::{Result, SpriteError};

/// Elements whose whitespace-only text is significant.
const TEXT_ELEMENTS: &[&str] = &["text", "tspan", "textPath", "title", "desc", "pre"];

/// Serializer settings, named after svgo's `js2svg` block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Js2Svg {
    pub indent: usize,
    pub pretty: bool,
}

impl Default for Js2Svg {
    fn default() -> Self {
        Self {
            indent: 4,
            pretty: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Escaped character data.
    Text(String),
    CData(String),
    Comment(String),
    /// `<?target data?>`, including the XML declaration.
    Instruction(String),
    DocType(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(text) if text.trim().is_empty())
    }
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Set an attribute, replacing the value in place if it already exists.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|a| a.name == name)?;
        Some(self.attributes.remove(index).value)
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Child elements, skipping text and comments.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(Node::as_element_mut)
    }

    /// Visit this element and all descendants, parents first.
    pub fn walk(&self, f: &mut impl FnMut(&Element)) {
        f(self);
        for child in self.elements() {
            child.walk(f);
        }
    }

    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in self.elements_mut() {
            child.walk_mut(f);
        }
    }

    /// Whether this element or any descendant is named `name`.
    pub fn contains_element(&self, name: &str) -> bool {
        let mut found = false;
        self.walk(&mut |el| found |= el.name == name);
        found
    }

    /// Remove every descendant element matching `predicate`.
    pub fn remove_elements(&mut self, predicate: &impl Fn(&Element) -> bool) {
        self.children
            .retain(|node| !matches!(node, Node::Element(el) if predicate(el)));
        for child in self.elements_mut() {
            child.remove_elements(predicate);
        }
    }

    /// Remove every descendant node matching `predicate`, elements included.
    pub fn remove_nodes(&mut self, predicate: &impl Fn(&Node) -> bool) {
        self.children.retain(|node| !predicate(node));
        for child in self.elements_mut() {
            child.remove_nodes(predicate);
        }
    }

    fn is_text_element(&self) -> bool {
        TEXT_ELEMENTS.contains(&self.name.as_str())
    }
}

/// A parsed SVG document: prolog nodes, the root element and anything after it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    pub fn from_root(root: Element) -> Self {
        Self {
            nodes: vec![Node::Element(root)],
        }
    }

    pub fn parse(source: &str) -> Result<Self> {
        let mut reader = Reader::from_str(source);
        let mut stack: Vec<Element> = Vec::new();
        let mut nodes: Vec<Node> = Vec::new();

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    return Err(SpriteError::svg(format!(
                        "{} (at byte {})",
                        e,
                        reader.buffer_position()
                    )))
                }
            };

            match event {
                Event::Start(start) => stack.push(element_from_start(&start)?),
                Event::Empty(start) => {
                    let element = element_from_start(&start)?;
                    push_node(&mut stack, &mut nodes, Node::Element(element));
                }
                Event::End(_) => {
                    let mut element = stack
                        .pop()
                        .ok_or_else(|| SpriteError::svg("unexpected closing tag"))?;
                    if !element.is_text_element() {
                        element.children.retain(|node| !node.is_blank_text());
                    }
                    push_node(&mut stack, &mut nodes, Node::Element(element));
                }
                Event::Text(text) => {
                    push_text(&mut stack, &mut nodes, &String::from_utf8_lossy(&text));
                }
                Event::GeneralRef(reference) => {
                    let raw = format!("&{};", String::from_utf8_lossy(&reference));
                    push_text(&mut stack, &mut nodes, &raw);
                }
                Event::CData(data) => {
                    let data = String::from_utf8_lossy(&data).into_owned();
                    push_node(&mut stack, &mut nodes, Node::CData(data));
                }
                Event::Comment(comment) => {
                    let comment = String::from_utf8_lossy(&comment).into_owned();
                    push_node(&mut stack, &mut nodes, Node::Comment(comment));
                }
                Event::Decl(decl) => {
                    let decl = String::from_utf8_lossy(&decl).into_owned();
                    push_node(&mut stack, &mut nodes, Node::Instruction(decl));
                }
                Event::PI(pi) => {
                    let pi = String::from_utf8_lossy(&pi).into_owned();
                    push_node(&mut stack, &mut nodes, Node::Instruction(pi));
                }
                Event::DocType(doctype) => {
                    let doctype = String::from_utf8_lossy(&doctype).trim().to_string();
                    push_node(&mut stack, &mut nodes, Node::DocType(doctype));
                }
                Event::Eof => break,
            }
        }

        if let Some(open) = stack.last() {
            return Err(SpriteError::svg(format!("unclosed <{}> element", open.name)));
        }

        nodes.retain(|node| !node.is_blank_text());
        let document = Self { nodes };
        if document.root().is_none() {
            return Err(SpriteError::SvgParse {
                message: "document has no root element".to_string(),
                help: Some("Icons must be standalone <svg> documents".to_string()),
            });
        }

        Ok(document)
    }

    pub fn root(&self) -> Option<&Element> {
        self.nodes.iter().find_map(Node::as_element)
    }

    pub fn root_mut(&mut self) -> Option<&mut Element> {
        self.nodes.iter_mut().find_map(Node::as_element_mut)
    }

    /// Serialize the document, compact or pretty-printed.
    pub fn to_svg(&self, options: &Js2Svg) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            write_node(&mut out, node, 0, options);
        }
        out
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| {
            SpriteError::svg(format!("malformed attribute on <{}>: {}", element.name, e))
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = unescape(&raw)
            .map_err(|e| SpriteError::svg(format!("bad escape in `{}`: {}", key, e)))?
            .into_owned();
        element.attributes.push(Attribute { name: key, value });
    }

    Ok(element)
}

fn push_node(stack: &mut [Element], nodes: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => nodes.push(node),
    }
}

/// Append text, merging with a preceding text node (entity references
/// arrive as separate events).
fn push_text(stack: &mut [Element], nodes: &mut Vec<Node>, raw: &str) {
    let siblings = match stack.last_mut() {
        Some(parent) => &mut parent.children,
        None => nodes,
    };
    match siblings.last_mut() {
        Some(Node::Text(existing)) => existing.push_str(raw),
        _ => siblings.push(Node::Text(raw.to_string())),
    }
}

fn write_node(out: &mut String, node: &Node, depth: usize, options: &Js2Svg) {
    let indent = if options.pretty {
        " ".repeat(depth * options.indent)
    } else {
        String::new()
    };
    let newline = if options.pretty { "\n" } else { "" };

    match node {
        Node::Element(el) => {
            out.push_str(&indent);
            write_open_tag(out, el);

            if el.children.is_empty() {
                out.push_str("/>");
            } else if el
                .children
                .iter()
                .all(|child| matches!(child, Node::Text(_) | Node::CData(_)))
            {
                out.push('>');
                for child in &el.children {
                    write_node(out, child, 0, &Js2Svg::default());
                }
                out.push_str(&format!("</{}>", el.name));
            } else {
                out.push('>');
                out.push_str(newline);
                for child in &el.children {
                    write_node(out, child, depth + 1, options);
                }
                out.push_str(&indent);
                out.push_str(&format!("</{}>", el.name));
            }
            out.push_str(newline);
        }
        Node::Text(text) => {
            out.push_str(&indent);
            out.push_str(if options.pretty { text.trim() } else { text });
            out.push_str(newline);
        }
        Node::CData(data) => {
            out.push_str(&format!("{indent}<![CDATA[{data}]]>{newline}"));
        }
        Node::Comment(comment) => {
            out.push_str(&format!("{indent}<!--{comment}-->{newline}"));
        }
        Node::Instruction(content) => {
            out.push_str(&format!("{indent}<?{content}?>{newline}"));
        }
        Node::DocType(doctype) => {
            out.push_str(&format!("{indent}<!DOCTYPE {doctype}>{newline}"));
        }
    }
}

fn write_open_tag(out: &mut String, el: &Element) {
    out.push('<');
    out.push_str(&el.name);
    for attr in &el.attributes {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        out.push_str(&escape(attr.value.as_str()));
        out.push('"');
    }
}
