//! SVG parsing, transforms and serialization.
//!
//! A small svgo-compatible optimizer: documents are parsed into an owned
//! tree ([`Document`]), rewritten by an ordered list of [`Plugin`]s and
//! serialized back, compact or pretty-printed.

pub mod dom;
mod ids;
mod number;
mod optimizer;
mod path;
mod plugins;
mod transform;

pub use dom::{Attribute, Document, Element, Js2Svg, Node};
pub use ids::{declared_ids, referenced_ids, rename_ids};
pub use number::parse_list as parse_number_list;
pub use optimizer::{optimize, optimize_icon, optimize_sprite, OptimizeConfig};
pub(crate) use plugins::length_attr;
pub use plugins::{AddAttributesParams, AttributeSpec, Plugin, RemoveAttrsParams};
