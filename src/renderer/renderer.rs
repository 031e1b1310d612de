use std::collections::{HashSet, VecDeque};

use anyhow::Result;
use tracing::{debug, trace};

use crate::renderer::components::*;
use crate::renderer::traits::*;
use crate::value::*;

/// Where a queued value sits among its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Root,
    Sibling { last: bool },
}

/// A value waiting to be rendered into the node that wraps it.
struct Entry<N> {
    value: Value,
    parent: N,
    position: Position,
}

/// Turns a value into a labelled node tree.
///
/// The walk is breadth-first over an explicit queue, so nesting depth is
/// bounded only by memory. Each composite is expanded at most once per call;
/// any later occurrence of the same allocation is rendered as an `is-seen`
/// container with no children.
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render `value` and return the root node.
    pub fn render<B: NodeBuilder>(&self, builder: &mut B, value: &Value) -> Result<B::Node> {
        let root = builder.create_container()?;
        let mut walk = Walk {
            builder,
            config: &self.config,
            root: root.clone(),
            queue: VecDeque::new(),
            visited: HashSet::new(),
            recursive: false,
        };

        walk.queue.push_back(Entry {
            value: value.clone(),
            parent: root.clone(),
            position: Position::Root,
        });

        let mut processed = 0usize;
        while let Some(entry) = walk.queue.pop_front() {
            walk.step(entry)?;
            processed += 1;
        }

        debug!(
            processed,
            expanded = walk.visited.len(),
            recursive = walk.recursive,
            "render finished"
        );

        Ok(root)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

/// Render `value` with `config` into `builder`.
pub fn render<B: NodeBuilder>(
    builder: &mut B,
    value: &Value,
    config: &RenderConfig,
) -> Result<B::Node> {
    Renderer::new(*config).render(builder, value)
}

/// State of one render call. Dropped, visited set included, when it returns.
struct Walk<'a, B: NodeBuilder> {
    builder: &'a mut B,
    config: &'a RenderConfig,
    root: B::Node,
    queue: VecDeque<Entry<B::Node>>,
    visited: HashSet<Identity>,
    recursive: bool,
}

impl<B: NodeBuilder> Walk<'_, B> {
    fn step(&mut self, entry: Entry<B::Node>) -> Result<()> {
        let kind = entry.value.kind();
        trace!(%kind, position = ?entry.position, "rendering entry");

        let value_label = match &entry.value {
            Value::List(list) => {
                let children = list
                    .items()
                    .iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), item.clone()))
                    .collect::<Vec<_>>();
                self.composite(&entry, kind, list.identity(), children)?
            }
            Value::Mapping(mapping) => {
                self.composite(&entry, kind, mapping.identity(), mapping.sorted_entries())?
            }
            leaf => self.leaf(&entry, kind, leaf)?,
        };

        self.separator(&entry)?;

        let item_label = LabelRenderer.item_label(&value_label);
        self.builder.set_label(&entry.parent, &item_label)
    }

    fn leaf(&mut self, entry: &Entry<B::Node>, kind: Kind, value: &Value) -> Result<String> {
        let text = TextRenderer.leaf_text(value).unwrap_or_default();
        let label = LabelRenderer.kind_label(kind);

        let node = self.builder.create_leaf(&text)?;
        self.builder.set_label(&node, &label)?;
        self.builder.append_child(&entry.parent, &node)?;

        Ok(label)
    }

    fn composite(
        &mut self,
        entry: &Entry<B::Node>,
        kind: Kind,
        identity: Identity,
        children: Vec<(String, Value)>,
    ) -> Result<String> {
        let count = children.len();
        let seen = !self.visited.insert(identity);

        let type_node = self.builder.create_leaf(&TextRenderer.type_text(kind, count))?;
        self.builder.set_label(&type_node, TYPE)?;
        self.builder.append_child(&entry.parent, &type_node)?;

        let label = LabelRenderer.container_label(kind, count, seen);
        let container = self.builder.create_container()?;
        self.builder.set_label(&container, &label)?;

        if seen {
            trace!(%kind, ?identity, "composite already expanded");
            if !self.recursive {
                self.recursive = true;
                self.builder.add_root_marker(&self.root, HAS_RECURSIVE_ITEMS)?;
            }
        } else {
            for (index, (key, value)) in children.into_iter().enumerate() {
                let item = self.builder.create_container()?;

                let key_node = self.builder.create_leaf(&key)?;
                self.builder.set_label(&key_node, KEY)?;
                self.builder.append_child(&item, &key_node)?;

                if self.config.all_tags {
                    let colon = self.builder.create_leaf(":")?;
                    self.builder.set_label(&colon, COLON)?;
                    self.builder.append_child(&item, &colon)?;
                }

                self.builder.append_child(&container, &item)?;
                self.queue.push_back(Entry {
                    value,
                    parent: item,
                    position: Position::Sibling {
                        last: index + 1 == count,
                    },
                });
            }
        }

        self.builder.append_child(&entry.parent, &container)?;
        Ok(label)
    }

    fn separator(&mut self, entry: &Entry<B::Node>) -> Result<()> {
        if !self.config.all_tags {
            return Ok(());
        }

        let trailing = match entry.position {
            Position::Root => return Ok(()),
            Position::Sibling { last: false } => false,
            Position::Sibling { last: true } if self.config.trailing_commas => true,
            Position::Sibling { last: true } => return Ok(()),
        };

        let comma = self.builder.create_leaf(",")?;
        self.builder.set_label(&comma, &LabelRenderer.comma_label(trailing))?;
        self.builder.append_child(&entry.parent, &comma)
    }
}
