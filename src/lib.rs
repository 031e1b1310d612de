//! # jsonhtmlify
//!
//! Turns any JSON-like value into a tree of `div`/`span` nodes annotated with
//! class names describing its structure. No styling and no event handling:
//! the classes are the contract a stylesheet or script builds on.
//!
//! ```
//! use jsonhtmlify::{render_to_string, RenderConfig, Value};
//!
//! let html = render_to_string(&Value::from(42), &RenderConfig::default()).unwrap();
//! assert_eq!(
//!     html,
//!     r#"<div class="json-item contains-number"><span class="json-number">42</span></div>"#
//! );
//! ```
//!
//! Lists and mappings may contain themselves. Every composite is expanded
//! once per render; later occurrences are marked `is-seen` and the root gets
//! `has-recursive-items`.

pub mod renderer;
pub mod value;


pub use renderer::*;
pub use value::*;

use anyhow::Result;

/// Render a `serde_json::Value` into a new element tree.
pub fn json_to_html(
    json: &serde_json::Value,
    config: &RenderConfig,
) -> Result<(ElementTree, NodeId)> {
    ElementTree::from_value(&from_json(json), config)
}

/// Render `value` and serialize the result as HTML.
pub fn render_to_string(value: &Value, config: &RenderConfig) -> Result<String> {
    let (tree, root) = ElementTree::from_value(value, config)?;
    Ok(tree.to_html(root))
}
