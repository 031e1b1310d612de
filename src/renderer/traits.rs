use anyhow::Result;
use serde::Deserialize;

/// Options for a single render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Emit explicit `json-colon` and `json-comma` separator nodes.
    pub all_tags: bool,
    /// With `all_tags`, keep the comma after the last sibling and label it
    /// `is-trailing` instead of dropping it.
    pub trailing_commas: bool,
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_all_tags(&self, all_tags: bool) -> Self {
        Self {
            all_tags,
            trailing_commas: self.trailing_commas,
        }
    }

    pub fn with_trailing_commas(&self, trailing_commas: bool) -> Self {
        Self {
            all_tags: self.all_tags,
            trailing_commas,
        }
    }
}

/// Capability for building the output tree, supplied by the host.
///
/// Handles are cheap to clone; the renderer keeps one per pending queue entry.
/// Any error returned here aborts the render and is passed through unchanged.
pub trait NodeBuilder {
    type Node: Clone;

    /// A node that will hold other nodes.
    fn create_container(&mut self) -> Result<Self::Node>;

    /// A node carrying a text payload.
    fn create_leaf(&mut self, text: &str) -> Result<Self::Node>;

    /// Replace the node's label.
    fn set_label(&mut self, node: &Self::Node, label: &str) -> Result<()>;

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<()>;

    /// Add one token to the root's label unless it is already present.
    fn add_root_marker(&mut self, root: &Self::Node, marker: &str) -> Result<()>;
}
