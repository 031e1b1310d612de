use anyhow::{anyhow, Result};

use crate::renderer::renderer::Renderer;
use crate::renderer::traits::*;
use crate::value::Value;

/// Index of an element inside an `ElementTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Div,
    Span,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Div => "div",
            Tag::Span => "span",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    tag: Tag,
    classes: Vec<String>,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: Tag, text: Option<String>) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            text,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Space separated class list, as a `className` attribute reads.
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Own text payload; only leaves have one.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// In-memory document: containers become `div`s, leaves become `span`s.
#[derive(Debug, Clone, Default)]
pub struct ElementTree {
    elements: Vec<Element>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `value` into a fresh tree and return it with its root.
    pub fn from_value(value: &Value, config: &RenderConfig) -> Result<(Self, NodeId)> {
        let mut tree = Self::new();
        let root = Renderer::new(*config).render(&mut tree, value)?;
        Ok((tree, root))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn class_name(&self, id: NodeId) -> Option<String> {
        self.get(id).map(Element::class_name)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Element::children).unwrap_or(&[])
    }

    /// The `index`th child of `id`.
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    /// Descendants of `id` in document order, `id` itself excluded.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            found.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        found
    }

    /// Concatenated text of every leaf under (and including) `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut content = String::new();
        let nodes = std::iter::once(id).chain(self.descendants(id));
        for node in nodes {
            if let Some(text) = self.get(node).and_then(Element::text) {
                content.push_str(text);
            }
        }
        content
    }

    /// Descendants of `id` carrying every class in `classes`, in document order.
    pub fn find_all_by_class(&self, id: NodeId, classes: &[&str]) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|node| {
                self.get(*node)
                    .map(|element| classes.iter().all(|class| element.has_class(class)))
                    .unwrap_or(false)
            })
            .collect()
    }

    pub fn find_first_by_class(&self, id: NodeId, classes: &[&str]) -> Option<NodeId> {
        self.find_all_by_class(id, classes).into_iter().next()
    }

    /// Serialize the subtree rooted at `id` as HTML without added whitespace.
    pub fn to_html(&self, id: NodeId) -> String {
        enum Step {
            Open(NodeId),
            Close(Tag),
        }

        let mut html = String::new();
        let mut stack = vec![Step::Open(id)];
        while let Some(step) = stack.pop() {
            let node = match step {
                Step::Open(node) => node,
                Step::Close(tag) => {
                    html.push_str(&format!("</{}>", tag.as_str()));
                    continue;
                }
            };
            let Some(element) = self.get(node) else {
                continue;
            };

            html.push('<');
            html.push_str(element.tag.as_str());
            if !element.classes.is_empty() {
                html.push_str(" class=\"");
                html.push_str(&escape_attribute(&element.class_name()));
                html.push('"');
            }
            html.push('>');

            if let Some(text) = &element.text {
                html.push_str(&escape_text(text));
            }

            stack.push(Step::Close(element.tag));
            stack.extend(element.children.iter().rev().map(|child| Step::Open(*child)));
        }
        html
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut Element> {
        self.elements
            .get_mut(id.0)
            .ok_or_else(|| anyhow!("Unknown node {}", id.0))
    }

    fn push(&mut self, element: Element) -> NodeId {
        self.elements.push(element);
        NodeId(self.elements.len() - 1)
    }
}

impl NodeBuilder for ElementTree {
    type Node = NodeId;

    fn create_container(&mut self) -> Result<NodeId> {
        Ok(self.push(Element::new(Tag::Div, None)))
    }

    fn create_leaf(&mut self, text: &str) -> Result<NodeId> {
        Ok(self.push(Element::new(Tag::Span, Some(text.to_string()))))
    }

    fn set_label(&mut self, node: &NodeId, label: &str) -> Result<()> {
        let element = self.element_mut(*node)?;
        element.classes = label.split_whitespace().map(str::to_string).collect();
        Ok(())
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<()> {
        self.element_mut(*parent)?;
        self.element_mut(*child)?;

        // Attaching a node under itself or one of its descendants would close
        // a loop in the tree.
        let mut ancestor = Some(*parent);
        while let Some(node) = ancestor {
            if node == *child {
                return Err(anyhow!(
                    "Cannot append node {} under its own descendant {}",
                    child.0,
                    parent.0
                ));
            }
            ancestor = self.get(node).and_then(Element::parent);
        }

        let previous = self.element_mut(*child)?.parent.replace(*parent);
        if let Some(previous) = previous {
            self.element_mut(previous)?.children.retain(|c| c != child);
        }
        self.element_mut(*parent)?.children.push(*child);
        Ok(())
    }

    fn add_root_marker(&mut self, root: &NodeId, marker: &str) -> Result<()> {
        let element = self.element_mut(*root)?;
        if !element.has_class(marker) {
            element.classes.push(marker.to_string());
        }
        Ok(())
    }
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
