//! ID references inside a document: `url(#id)` values and `#id` hrefs.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::dom::Element;

static URL_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"url\(\s*["']?#([^"')\s]+)["']?\s*\)"#).expect("valid url() pattern")
});

const HREF_ATTRS: &[&str] = &["href", "xlink:href"];

/// Every ID referenced anywhere under `root`.
pub fn referenced_ids(root: &Element) -> HashSet<String> {
    let mut ids = HashSet::new();
    root.walk(&mut |el| {
        for attr in &el.attributes {
            if HREF_ATTRS.contains(&attr.name.as_str()) {
                if let Some(id) = attr.value.trim().strip_prefix('#') {
                    ids.insert(id.to_string());
                }
            }
            for caps in URL_REFERENCE.captures_iter(&attr.value) {
                ids.insert(caps[1].to_string());
            }
        }
    });
    ids
}

/// Every `id` attribute under `root`, in document order.
pub fn declared_ids(root: &Element) -> Vec<String> {
    let mut ids = Vec::new();
    root.walk(&mut |el| {
        if let Some(id) = el.attr("id") {
            ids.push(id.to_string());
        }
    });
    ids
}

/// Rename IDs and every reference to them.
pub fn rename_ids(root: &mut Element, renames: &HashMap<String, String>) {
    if renames.is_empty() {
        return;
    }
    root.walk_mut(&mut |el| {
        for attr in el.attributes.iter_mut() {
            if attr.name == "id" {
                if let Some(new) = renames.get(&attr.value) {
                    attr.value = new.clone();
                }
                continue;
            }
            if HREF_ATTRS.contains(&attr.name.as_str()) {
                if let Some(new) = attr
                    .value
                    .trim()
                    .strip_prefix('#')
                    .and_then(|id| renames.get(id))
                {
                    attr.value = format!("#{}", new);
                }
                continue;
            }
            if attr.value.contains("url(") {
                attr.value = URL_REFERENCE
                    .replace_all(&attr.value, |caps: &Captures| match renames.get(&caps[1]) {
                        Some(new) => format!("url(#{})", new),
                        None => caps[0].to_string(),
                    })
                    .into_owned();
            }
        }
    });
}

/// Short ID for the n-th referenced element: `a`..`z`, `A`..`Z`, `aa`, ...
pub fn short_id(mut n: usize) -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut id = Vec::new();
    loop {
        id.push(ALPHABET[n % ALPHABET.len()]);
        n /= ALPHABET.len();
        if n == 0 {
            break;
        }
        n -= 1;
    }
    id.reverse();
    String::from_utf8_lossy(&id).into_owned()
}
