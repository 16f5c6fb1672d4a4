//! Resolving flattened-list drag coordinates into tree positions.
//!
//! The drag layer works in visual terms: row indices in the flattened view
//! and an optional horizontal nesting level. Committing a drop requires
//! translating those back into parent-id + sibling-index terms. The same
//! resolution runs on every drag update (for the live legality signal) and
//! once more at drag end (for the committed move), so preview and commit can
//! never disagree.

use crate::drag::DragSession;
use crate::tree::{FlatItem, TreePosition, TreeStore};

/// Resolve the final (source, destination) positions of a drag.
///
/// `flat` must be the flattened view the drag was performed against, i.e.
/// computed with the dragged node's subtree suppressed. Returns `None` when
/// the recorded source row no longer resolves (the view and the store
/// desynchronized); the destination alone being unresolvable yields
/// `(source, None)`, which the validator treats as illegal.
pub fn resolve_drop_positions(
    store: &TreeStore,
    flat: &[FlatItem],
    session: &DragSession,
) -> Option<(TreePosition, Option<TreePosition>)> {
    let source_item = flat.get(session.source_index)?;
    let source = position_of_path(store, &source_item.path)?;

    // Hovering a row to nest takes precedence over reordering between rows.
    if let Some(combine) = session.combine {
        let destination = TreePosition {
            parent: Some(combine),
            index: None,
        };
        return Some((source, Some(destination)));
    }

    let Some(destination_index) = session.destination_index else {
        return Some((source, None));
    };
    let destination = destination_path(
        flat,
        session.source_index,
        destination_index,
        session.horizontal_level,
    )
    .and_then(|path| position_of_path(store, &path));
    Some((source, destination))
}

/// Translate a child-index path into a parent id + sibling index.
///
/// The final component may address the one-past-the-end slot (an insertion
/// point); any other out-of-range component fails the walk.
pub(crate) fn position_of_path(store: &TreeStore, path: &[usize]) -> Option<TreePosition> {
    let (&last, ancestors) = path.split_last()?;
    let mut parent = None;
    let mut siblings = store.roots();
    for &index in ancestors {
        let id = *siblings.get(index)?;
        parent = Some(id);
        siblings = &store.get(id)?.children;
    }
    if last > siblings.len() {
        return None;
    }
    Some(TreePosition {
        parent,
        index: Some(last),
    })
}

/// Compute the path a dragged row lands on when dropped at a row index.
///
/// The drop slot sits between two visible rows: `upper` (above the slot) and
/// `lower` (below it). Three shapes are possible:
///
/// - at the very top of the list, or between rows of equal depth, or between
///   a row and its first visible child, the slot has exactly one depth and
///   the lower row's path is the answer;
/// - after the last row of a subtree (the lower row is shallower, or there
///   is no lower row), the depth is ambiguous: any ancestor level of the
///   upper row is a plausible target. The explicit nesting `level` (derived
///   from the pointer's horizontal offset), or failing that the source's own
///   level, is clamped into the plausible range and selects which ancestor's
///   sibling list receives the row.
pub(crate) fn destination_path(
    flat: &[FlatItem],
    source_index: usize,
    destination_index: usize,
    level: Option<usize>,
) -> Option<Vec<usize>> {
    if flat.is_empty() {
        return None;
    }
    let destination_index = destination_index.min(flat.len() - 1);
    let down = destination_index > source_index;
    let same_place = destination_index == source_index;
    let source_level = flat.get(source_index)?.path.len();

    let upper: Option<&[usize]> = if down {
        Some(&flat[destination_index].path)
    } else if destination_index == 0 {
        None
    } else {
        Some(&flat[destination_index - 1].path)
    };
    let lower: Option<&[usize]> = if down || same_place {
        flat.get(destination_index + 1).map(|item| item.path.as_slice())
    } else {
        Some(&flat[destination_index].path)
    };

    // Top of the list: land exactly where the lower row currently sits.
    let Some(upper) = upper else {
        return lower.map(<[usize]>::to_vec);
    };

    if let Some(lower) = lower {
        if lower.len() >= upper.len() {
            // Unambiguous slot: between siblings, or between a row and its
            // first visible child.
            return Some(lower.to_vec());
        }
    }

    // End of a subtree or of the whole list: pick the ancestor level.
    let lower_level = lower.map_or(1, <[usize]>::len);
    let upper_level = upper.len();
    let final_level = level.unwrap_or(source_level).clamp(lower_level, upper_level);
    let mut path = upper[..final_level].to_vec();
    *path.last_mut()? += 1;
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Bbox, Position};
    use crate::recognition::BlockKind;
    use crate::tree::{flatten_tree, ElementKind, Node, NodeId};
    use std::collections::HashSet;

    fn node(id: u32, parent: Option<u32>, kind: ElementKind, children: &[u32]) -> Node {
        Node {
            id: NodeId(id),
            kind,
            parent: parent.map(NodeId),
            children: children.iter().map(|c| NodeId(*c)).collect(),
            bbox: Bbox::new(0.0, 0.0, 10.0, 10.0),
            parent_relative_offset: Position::default(),
            text: String::new(),
            confidence: 0.0,
        }
    }

    /// Flattened rows:
    /// 0 block(0)         path [0]
    /// 1   para(1)        path [0,0]
    /// 2     line(2)      path [0,0,0]
    /// 3       word(3)    path [0,0,0,0]
    /// 4       word(4)    path [0,0,0,1]
    /// 5     line(5)      path [0,0,1]
    /// 6       word(6)    path [0,0,1,0]
    fn sample() -> TreeStore {
        let mut store = TreeStore::new();
        store.insert(node(0, None, ElementKind::Block(BlockKind::FlowingText), &[1]));
        store.insert(node(1, Some(0), ElementKind::Paragraph, &[2, 5]));
        store.insert(node(2, Some(1), ElementKind::Line, &[3, 4]));
        store.insert(node(3, Some(2), ElementKind::Word, &[]));
        store.insert(node(4, Some(2), ElementKind::Word, &[]));
        store.insert(node(5, Some(1), ElementKind::Line, &[6]));
        store.insert(node(6, Some(5), ElementKind::Word, &[]));
        store
    }

    fn flat(store: &TreeStore) -> Vec<FlatItem> {
        flatten_tree(store, &HashSet::new(), None)
    }

    #[test]
    fn path_resolves_parent_and_index() {
        let store = sample();
        assert_eq!(
            position_of_path(&store, &[0, 0, 0, 1]),
            Some(TreePosition::new(NodeId(2), 1))
        );
        assert_eq!(
            position_of_path(&store, &[0]),
            Some(TreePosition {
                parent: None,
                index: Some(0)
            })
        );
        // One-past-the-end is a valid insertion slot...
        assert_eq!(
            position_of_path(&store, &[0, 0, 0, 2]),
            Some(TreePosition::new(NodeId(2), 2))
        );
        // ...but anything beyond is not, and neither is walking off-tree.
        assert_eq!(position_of_path(&store, &[0, 0, 0, 3]), None);
        assert_eq!(position_of_path(&store, &[0, 5, 0]), None);
    }

    #[test]
    fn drop_between_siblings_takes_the_lower_slot() {
        let store = sample();
        let flat = flat(&store);
        // Drag word(6) (row 6) up between word(3) and word(4): rows 3/4.
        let path = destination_path(&flat, 6, 4, None).unwrap();
        assert_eq!(path, vec![0, 0, 0, 1]);
        assert_eq!(
            position_of_path(&store, &path),
            Some(TreePosition::new(NodeId(2), 1))
        );
    }

    #[test]
    fn drop_below_a_parent_lands_as_first_child() {
        let store = sample();
        let flat = flat(&store);
        // Drag word(6) up to row 3, right below line(2): becomes its first child.
        let path = destination_path(&flat, 6, 3, None).unwrap();
        assert_eq!(path, vec![0, 0, 0, 0]);
    }

    #[test]
    fn ambiguous_end_of_subtree_respects_level_override() {
        let store = sample();
        let flat = flat(&store);
        // Drag word(3) (row 3) down past word(4) (row 4). The next row,
        // line(5), is shallower, so the slot depth is ambiguous.
        // Without an override the source's own level (4) wins:
        let path = destination_path(&flat, 3, 4, None).unwrap();
        assert_eq!(path, vec![0, 0, 0, 2]);
        // An explicit shallower level re-targets an ancestor's sibling list:
        let path = destination_path(&flat, 3, 4, Some(3)).unwrap();
        assert_eq!(path, vec![0, 0, 1]);
        // Levels outside the plausible range are clamped.
        let path = destination_path(&flat, 3, 4, Some(9)).unwrap();
        assert_eq!(path, vec![0, 0, 0, 2]);
    }

    #[test]
    fn drop_at_the_very_top_takes_the_first_slot() {
        let store = sample();
        let flat = flat(&store);
        let path = destination_path(&flat, 5, 0, None).unwrap();
        assert_eq!(path, vec![0]);
    }

    #[test]
    fn end_of_list_is_ambiguous_and_clamped() {
        let store = sample();
        let flat = flat(&store);
        // Drag para(1) (row 1) to the end of the list (row 6).
        // Upper row is word(6) at level 4; no lower row.
        let path = destination_path(&flat, 1, 6, Some(1)).unwrap();
        assert_eq!(path, vec![1]);
        let path = destination_path(&flat, 1, 6, Some(4)).unwrap();
        assert_eq!(path, vec![0, 0, 1, 1]);
    }
}
