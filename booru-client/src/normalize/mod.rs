//! Canonicalization of raw imageboard JSON.
//!
//! Imageboard APIs disagree on key casing and on how tags are reported. The
//! normalizer walks the decoded JSON tree, rewrites every object key to
//! snake_case and, for servers that report tags as a categorized map,
//! flattens those into a single list. Array order and object-vs-array shape
//! are preserved, and normalizing an already-normalized tree is a no-op.
use serde_json::{Map, Value};

use crate::server_config::TagStyle;

/// Recursively canonicalizes `value`.
#[must_use]
pub fn normalize(value: Value, tag_style: TagStyle) -> Value {
    match value {
        Value::Object(obj) => {
            let mut out = Map::with_capacity(obj.len());
            for (key, val) in obj {
                let key = snake_case(&key);
                let val = if key == "tags" && tag_style == TagStyle::Categorized {
                    flatten_tags(val)
                } else {
                    normalize(val, tag_style)
                };
                out.insert(key, val);
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| normalize(item, tag_style))
                .collect(),
        ),
        other => other,
    }
}

/// Collapses a category-to-tag-list map into one flat tag array.
fn flatten_tags(value: Value) -> Value {
    match value {
        Value::Object(categories) => {
            let mut flat = Vec::new();
            for (_, tags) in categories {
                match tags {
                    Value::Array(list) => flat.extend(list),
                    other => flat.push(other),
                }
            }
            Value::Array(flat)
        }
        // Already flat.
        other => other,
    }
}

fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut prev_lower = false;
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
            out.push(c);
        }
    }
    out
}
