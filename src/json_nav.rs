//! Schema-less navigation over decoded JSON.
//!
//! The catalog API nests the fields we care about at depths that change from
//! one SKU to the next, so responses are decoded into [`serde_json::Value`]
//! and walked one level at a time. Absence is `None`; a present `null` is
//! `Some(&Value::Null)`.

use serde_json::Value;

/// Value stored under `key` at the top level of `value`.
///
/// Returns `None` when `value` is not an object or does not contain `key`.
/// This looks exactly one level down; chain calls (or use [`Nav`]) to go
/// deeper.
pub fn find_value<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.as_object()?.get(key)
}

/// Element `index` of `value` when it is an array.
pub fn get_index(value: &Value, index: usize) -> Option<&Value> {
    value.as_array()?.get(index)
}

/// Chainable cursor that stays absent once any step misses.
///
/// ```
/// use serde_json::json;
/// use skuwatch::json_nav::Nav;
///
/// let body = json!({"_links": {"self": {"href": "https://api.example/p/1"}}});
/// let href = Nav::root(&body).field("_links").field("self").field("href");
/// assert_eq!(href.as_str(), Some("https://api.example/p/1"));
/// assert!(Nav::root(&body).field("missing").field("href").get().is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Nav<'a> {
    current: Option<&'a Value>,
}

impl<'a> Nav<'a> {
    pub fn root(value: &'a Value) -> Self {
        Self {
            current: Some(value),
        }
    }

    /// Step into `key` of the current object.
    pub fn field(self, key: &str) -> Self {
        Self {
            current: self.current.and_then(|v| find_value(v, key)),
        }
    }

    /// Step into element `index` of the current array.
    pub fn index(self, index: usize) -> Self {
        Self {
            current: self.current.and_then(|v| get_index(v, index)),
        }
    }

    pub fn get(self) -> Option<&'a Value> {
        self.current
    }

    pub fn is_absent(self) -> bool {
        self.current.is_none()
    }

    pub fn as_str(self) -> Option<&'a str> {
        self.current.and_then(Value::as_str)
    }

    /// Items of the current array; empty when absent or not an array.
    pub fn items(self) -> &'a [Value] {
        self.current
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Flat textual form of a value, used for substring rules over loosely
/// structured entries.
///
/// Objects render as `map[k:v k:v]` in key order, arrays as `[a b]`,
/// strings without quotes and null as `<nil>`.
pub fn render_text(value: &Value) -> String {
    let mut out = String::new();
    write_text(value, &mut out);
    out
}

fn write_text(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("<nil>"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_text(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push_str("map[");
            for (i, (k, v)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                out.push_str(k);
                out.push(':');
                write_text(v, out);
            }
            out.push(']');
        }
    }
}
