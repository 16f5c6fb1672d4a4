//! The document tree model.
//!
//! A recognized page is represented as an arena of nodes: a flat
//! id-indexed map plus an ordered list of root ids. Hierarchy links are
//! always node ids, never references, so the structure is acyclic by
//! construction — a move detaches a node before reattaching it and can
//! never create a second parent edge.
//!
//! The store is mutated only through the [`reducer`](crate::reducer); every
//! other component (flattener, move validator, drag controller) treats it as
//! immutable input for the duration of one synchronous pass.

pub mod builder;
pub mod flatten;
pub mod policy;
mod reposition;

pub use builder::build_tree;
pub use flatten::{flatten_tree, FlatItem};
pub use policy::{can_move_node, ContainerPolicy, TreePosition};

use crate::error::{Error, Result};
use crate::geometry::{Bbox, Position};
use crate::recognition::BlockKind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node within one tree store.
///
/// Ids are assigned sequentially at build time and are stable for the
/// lifetime of the tree; a fresh `Init` produces fresh ids.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of a document tree element.
///
/// The page itself is implicit: there is one tree per page and the root list
/// holds its blocks. Which kinds may contain which is decided by a
/// [`ContainerPolicy`], not hard-coded at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// Layout block (text flow, image, table, separator, ...)
    Block(BlockKind),
    /// Paragraph within a text block
    Paragraph,
    /// Text line within a paragraph
    Line,
    /// Word, the leaf of the hierarchy
    Word,
}

impl ElementKind {
    /// Short lowercase name, used in logs and export class names.
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Block(_) => "block",
            ElementKind::Paragraph => "paragraph",
            ElementKind::Line => "line",
            ElementKind::Word => "word",
        }
    }
}

/// One element of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique, stable identifier
    pub id: NodeId,
    /// Element kind
    pub kind: ElementKind,
    /// Parent id; `None` only for roots
    pub parent: Option<NodeId>,
    /// Ordered child ids; empty for leaf kinds
    pub children: Vec<NodeId>,
    /// Absolute bounding box in image pixel space
    pub bbox: Bbox,
    /// Position relative to the parent's bounding box origin.
    ///
    /// This is the authoritative anchor for reposition deltas: when the node
    /// is dragged, the delta is computed against this offset rather than the
    /// previous absolute position, so earlier propagated drift does not
    /// accumulate.
    pub parent_relative_offset: Position,
    /// Recognized text (opaque to the engine)
    pub text: String,
    /// Recognition confidence in `0.0..=100.0` (opaque to the engine)
    pub confidence: f32,
}

/// Authoritative in-memory arena of all nodes plus root ordering.
///
/// Iteration order of the node map is insertion order (document order at
/// build time), which keeps logs and exports deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeStore {
    nodes: IndexMap<NodeId, Node>,
    roots: Vec<NodeId>,
}

impl TreeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the store.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ordered root ids (the page's top-level blocks).
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Look up a node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Look up a node, treating absence as a fatal desynchronization.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(&id).ok_or(Error::NodeNotFound(id))
    }

    /// Whether `id` resolves to a node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Iterate all nodes in document (insertion) order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All descendant ids of `id` in depth-first pre-order.
    ///
    /// Returns an empty list when `id` is absent or a leaf.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match self.get(id) {
            Some(node) => node.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(current) = stack.pop() {
            out.push(current);
            if let Some(node) = self.get(current) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Check the structural invariants of the arena.
    ///
    /// Verifies bidirectional parent/child consistency: every non-root
    /// node's parent exists and lists it exactly once, every child id
    /// resolves back to its parent, every root is parentless, and kind
    /// nesting obeys `policy`. Intended for tests and debug assertions; the
    /// mutation paths maintain these invariants.
    pub fn is_consistent(&self, policy: &ContainerPolicy) -> bool {
        for root in &self.roots {
            match self.get(*root) {
                Some(node) if node.parent.is_none() => {}
                _ => return false,
            }
        }
        for node in self.nodes.values() {
            match node.parent {
                Some(parent_id) => {
                    let Some(parent) = self.get(parent_id) else {
                        return false;
                    };
                    if parent.children.iter().filter(|c| **c == node.id).count() != 1 {
                        return false;
                    }
                    if !policy.can_contain(parent.kind, node.kind) {
                        return false;
                    }
                }
                None => {
                    if !self.roots.contains(&node.id) {
                        return false;
                    }
                }
            }
            for child_id in &node.children {
                match self.get(*child_id) {
                    Some(child) if child.parent == Some(node.id) => {}
                    _ => return false,
                }
            }
        }
        true
    }

    pub(crate) fn insert(&mut self, node: Node) {
        if node.parent.is_none() {
            self.roots.push(node.id);
        }
        self.nodes.insert(node.id, node);
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(&id).ok_or(Error::NodeNotFound(id))
    }

    /// Reattach `id` under `new_parent` at `new_index` (default 0).
    ///
    /// Detaches the node from its previous parent (or the root list) first,
    /// so the tree never transiently holds two parent edges. When the node
    /// stays under the same parent, `new_index` addresses the sibling list
    /// *after* removal.
    ///
    /// The subtree keeps its parent-relative offset across the move, so its
    /// absolute boxes shift by the delta between the old and new parent
    /// origins.
    pub(crate) fn move_node(
        &mut self,
        id: NodeId,
        new_parent: NodeId,
        new_index: Option<usize>,
    ) -> Result<()> {
        if !self.contains(id) {
            return Err(Error::NodeNotFound(id));
        }
        if !self.contains(new_parent) {
            return Err(Error::NodeNotFound(new_parent));
        }
        if id == new_parent || self.descendants(id).contains(&new_parent) {
            return Err(Error::WouldCreateCycle {
                id,
                destination: new_parent,
            });
        }

        let prev_parent = self.node(id)?.parent;
        let old_origin = match prev_parent {
            Some(prev_id) => self.node(prev_id)?.bbox.origin(),
            None => Position::new(0.0, 0.0),
        };
        let new_origin = self.node(new_parent)?.bbox.origin();

        // If the node only swapped places, remove it first so it can be
        // reinserted at the new index.
        let parent_node = self.node_mut(new_parent)?;
        parent_node.children.retain(|c| *c != id);
        let index = new_index.unwrap_or(0).min(parent_node.children.len());
        parent_node.children.insert(index, id);

        self.node_mut(id)?.parent = Some(new_parent);

        // If the node came from a different parent, unlink it there.
        if let Some(prev_id) = prev_parent {
            if prev_id != new_parent {
                self.node_mut(prev_id)?.children.retain(|c| *c != id);
            }
        } else {
            self.roots.retain(|r| *r != id);
        }

        // Relative offset is preserved; absolute geometry follows the new
        // attachment point.
        let delta = Position::new(new_origin.x - old_origin.x, new_origin.y - old_origin.y);
        if delta.x != 0.0 || delta.y != 0.0 {
            let moved = self.node_mut(id)?;
            moved.bbox = moved.bbox.translated(delta);
            for descendant in self.descendants(id) {
                let child = self.node_mut(descendant)?;
                child.bbox = child.bbox.translated(delta);
            }
        }

        log::debug!(
            "moved node {} under {} at index {}",
            id,
            new_parent,
            index
        );
        Ok(())
    }

    /// Remove `id` and its entire subtree from the store.
    ///
    /// Unlinks the node from its former parent's child list (or the root
    /// list) and drops every descendant, leaving no dangling ids.
    pub(crate) fn remove_subtree(&mut self, id: NodeId) -> Result<()> {
        let parent = self.node(id)?.parent;

        let mut doomed = self.descendants(id);
        doomed.push(id);
        for victim in &doomed {
            self.nodes.shift_remove(victim);
        }

        match parent {
            Some(parent_id) => {
                self.node_mut(parent_id)?.children.retain(|c| *c != id);
            }
            None => self.roots.retain(|r| *r != id),
        }

        log::debug!("deleted node {} and {} descendants", id, doomed.len() - 1);
        Ok(())
    }
}
