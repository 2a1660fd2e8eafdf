//! HTML preview page listing every symbol in a sprite.

use quick_xml::escape::escape;

use super::shape::Shape;

/// Built-in preview page.
pub const DEFAULT_TEMPLATE: &str = include_str!("preview.html");

/// Fill a preview template.
///
/// Placeholders: `{{sprite}}` (inline sprite markup), `{{icons}}` (one list
/// item per symbol) and `{{count}}`.
pub fn render_preview(template: &str, sprite: &str, shapes: &[Shape]) -> String {
    let icons: Vec<String> = shapes.iter().map(icon_item).collect();

    template
        .replace("{{sprite}}", sprite)
        .replace("{{icons}}", &icons.join("\n"))
        .replace("{{count}}", &shapes.len().to_string())
}

fn icon_item(shape: &Shape) -> String {
    let id = escape(shape.id.as_str());
    format!(
        "<li><svg width=\"{}\" height=\"{}\"><use href=\"#{}\"/></svg><code>{}</code></li>",
        shape.width, shape.height, id, id
    )
}
