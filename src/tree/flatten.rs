//! Linearizing the tree for list rendering.
//!
//! The UI renders the tree as a flat, windowed list of rows. Flattening is a
//! pure function of `(tree, collapsed set, dragged id)` and is recomputed on
//! every structural change; it holds no cross-call memory, so derived rows
//! can never go stale.
//!
//! Windowing (selecting the visible slice) is a separate, external layer;
//! this function always produces the full ordered sequence.

use crate::tree::{NodeId, TreeStore};
use std::collections::HashSet;

/// One row of the flattened view.
///
/// Derived and ephemeral: holds the node id, its depth, and its materialized
/// child-index path from the root at the moment of flattening. Never mutated
/// in place — always recomputed from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatItem {
    /// The node this row renders
    pub id: NodeId,
    /// Path length from root minus one (roots are depth 0)
    pub depth: usize,
    /// Child indices from the root list down to this node
    pub path: Vec<usize>,
}

/// Flatten the tree depth-first, pre-order, respecting collapse state.
///
/// A collapsed node emits itself but suppresses its subtree. The node
/// currently being dragged, if any, is treated as collapsed for this pass
/// only: a multi-row subtree cannot be dragged as a unit, so its children
/// must not travel along with the row. The collapsed set itself is never
/// modified, which restores the subtree automatically once dragging ends.
pub fn flatten_tree(
    store: &TreeStore,
    collapsed: &HashSet<NodeId>,
    dragged: Option<NodeId>,
) -> Vec<FlatItem> {
    let mut out = Vec::with_capacity(store.len());
    let mut path = Vec::new();
    for (index, root) in store.roots().iter().enumerate() {
        flatten_node(store, *root, index, &mut path, collapsed, dragged, &mut out);
    }
    out
}

fn flatten_node(
    store: &TreeStore,
    id: NodeId,
    index: usize,
    path: &mut Vec<usize>,
    collapsed: &HashSet<NodeId>,
    dragged: Option<NodeId>,
    out: &mut Vec<FlatItem>,
) {
    path.push(index);
    out.push(FlatItem {
        id,
        depth: path.len() - 1,
        path: path.clone(),
    });

    let suppressed = collapsed.contains(&id) || dragged == Some(id);
    if !suppressed {
        if let Some(node) = store.get(id) {
            for (child_index, child) in node.children.iter().enumerate() {
                flatten_node(store, *child, child_index, path, collapsed, dragged, out);
            }
        }
    }
    path.pop();
}

/// Index of `id` in the flattened view, if visible.
pub fn index_of(flat: &[FlatItem], id: NodeId) -> Option<usize> {
    flat.iter().position(|item| item.id == id)
}
