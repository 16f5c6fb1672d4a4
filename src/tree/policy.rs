//! Container compatibility rules and the move validator.
//!
//! Which element kinds may nest under which is configuration, carried by
//! [`ContainerPolicy`], so the rules live in one place instead of being
//! re-derived at every call site. The validator itself mirrors the original
//! editor's rule: a move is legal only when the source and destination
//! parents share the same kind and the destination parent is a container.

use crate::recognition::BlockKind;
use crate::tree::{ElementKind, NodeId, TreeStore};

/// A slot in the tree, expressed as parent id plus sibling index.
///
/// `parent == None` addresses the root list. `index == None` means
/// "unspecified" and resolves to the front of the child list when a move is
/// applied (the combine/nest gesture produces such positions).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreePosition {
    /// Parent node id, or `None` for the root list
    pub parent: Option<NodeId>,
    /// Index among the parent's children
    pub index: Option<usize>,
}

impl TreePosition {
    /// Position under a concrete parent at a concrete index.
    pub fn new(parent: NodeId, index: usize) -> Self {
        Self {
            parent: Some(parent),
            index: Some(index),
        }
    }
}

/// The container compatibility table.
///
/// Words are never containers. Block variants are containers only when they
/// carry flowing text; image, separator and noise blocks are leaves.
#[derive(Debug, Clone)]
pub struct ContainerPolicy {
    /// Block variants that may hold nested structure.
    pub container_blocks: Vec<BlockKind>,
}

impl ContainerPolicy {
    /// The standard page hierarchy: text blocks → paragraphs → lines → words.
    pub fn document() -> Self {
        Self {
            container_blocks: vec![
                BlockKind::FlowingText,
                BlockKind::HeadingText,
                BlockKind::PulloutText,
                BlockKind::VerticalText,
                BlockKind::CaptionText,
            ],
        }
    }

    /// Whether `kind` may hold children at all.
    pub fn is_container(&self, kind: ElementKind) -> bool {
        match kind {
            ElementKind::Block(block) => self.container_blocks.contains(&block),
            ElementKind::Paragraph | ElementKind::Line => true,
            ElementKind::Word => false,
        }
    }

    /// Whether a node of `child` kind may appear under a `parent` kind.
    pub fn can_contain(&self, parent: ElementKind, child: ElementKind) -> bool {
        if !self.is_container(parent) {
            return false;
        }
        matches!(
            (parent, child),
            (ElementKind::Block(_), ElementKind::Paragraph)
                | (ElementKind::Block(_), ElementKind::Block(_))
                | (ElementKind::Paragraph, ElementKind::Line)
                | (ElementKind::Line, ElementKind::Word)
        )
    }
}

impl Default for ContainerPolicy {
    fn default() -> Self {
        Self::document()
    }
}

/// Decide whether moving a node from `source` to `destination` is legal.
///
/// Illegal when the destination is absent or addresses the root list (the
/// editor does not support re-rooting: every moved node needs a concrete
/// container parent). Otherwise legal only when both parents share the same
/// element kind and the destination parent is a container per `policy`.
/// This guards against, e.g., nesting a line inside a word, or dropping a
/// paragraph between two words.
pub fn can_move_node(
    store: &TreeStore,
    policy: &ContainerPolicy,
    source: &TreePosition,
    destination: Option<&TreePosition>,
) -> bool {
    let Some(destination) = destination else {
        return false;
    };
    let (Some(source_parent_id), Some(dest_parent_id)) = (source.parent, destination.parent)
    else {
        return false;
    };
    let (Some(source_parent), Some(dest_parent)) =
        (store.get(source_parent_id), store.get(dest_parent_id))
    else {
        return false;
    };

    dest_parent.kind == source_parent.kind && policy.is_container(dest_parent.kind)
}
