use crate::value::*;

pub const ITEM: &str = "json-item";
pub const KEY: &str = "json-key";
pub const TYPE: &str = "json-type";
pub const COLON: &str = "json-colon";
pub const COMMA: &str = "json-comma";
pub const HAS_ITEMS: &str = "has-items";
pub const IS_EMPTY: &str = "is-empty";
pub const IS_SEEN: &str = "is-seen";
pub const IS_TRAILING: &str = "is-trailing";
pub const HAS_RECURSIVE_ITEMS: &str = "has-recursive-items";

/// Helper for composing class labels
pub struct LabelRenderer;

impl LabelRenderer {
    pub fn kind_label(&self, kind: Kind) -> String {
        format!("json-{}", kind)
    }

    /// `json-array has-items`, `json-object is-empty is-seen`, ...
    pub fn container_label(&self, kind: Kind, count: usize, seen: bool) -> String {
        let mut label = self.kind_label(kind);
        label.push(' ');
        label.push_str(if count > 0 { HAS_ITEMS } else { IS_EMPTY });
        if seen {
            label.push(' ');
            label.push_str(IS_SEEN);
        }
        label
    }

    /// Label for the node wrapping a value, derived from the value's own
    /// label: `json-array has-items` becomes `json-item contains-array has-items`.
    pub fn item_label(&self, value_label: &str) -> String {
        let contained = value_label.strip_prefix("json-").unwrap_or(value_label);
        format!("{} contains-{}", ITEM, contained)
    }

    pub fn comma_label(&self, trailing: bool) -> String {
        if trailing {
            format!("{} {}", COMMA, IS_TRAILING)
        } else {
            COMMA.to_string()
        }
    }
}

/// Helper for the text payloads of leaf and descriptive nodes
pub struct TextRenderer;

impl TextRenderer {
    /// Canonical text of a leaf value. Composites have none.
    pub fn leaf_text(&self, value: &Value) -> Option<String> {
        match value {
            Value::Null => Some("null".to_string()),
            Value::Bool(true) => Some("true".to_string()),
            Value::Bool(false) => Some("false".to_string()),
            Value::Number(n) => Some(number_text(*n)),
            Value::String(s) => Some(s.clone()),
            Value::List(_) | Value::Mapping(_) => None,
        }
    }

    /// `array[3]`, `object[1]`, or the fixed empty marker of the kind.
    pub fn type_text(&self, kind: Kind, count: usize) -> String {
        match (kind, count) {
            (Kind::Object, 0) => "{}".to_string(),
            (_, 0) => "[]".to_string(),
            (kind, count) => format!("{}[{}]", kind, count),
        }
    }
}
