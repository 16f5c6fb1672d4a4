//! The single mutation gateway for editor state.
//!
//! All edits to the document tree flow through [`State::apply`], which takes
//! a committed [`Action`] and returns a new state snapshot. Prior snapshots
//! stay valid and unmodified (the state is `Clone`; structural sharing is an
//! implementation choice, not part of the contract). Nothing else in the
//! crate writes node geometry or structure — the flattener, validator and
//! drag controller are all read-only over the store.

use crate::error::Result;
use crate::recognition::RecognizeResult;
use crate::tree::{build_tree, NodeId, TreeStore};

/// The closed action vocabulary of the editor.
///
/// Unknown actions cannot be dispatched: the enum is closed, so the original
/// implementation's "unknown action is a fatal caller bug" rule is enforced
/// by the type system.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Discard any existing tree and rebuild it from recognizer output.
    Init(RecognizeResult),
    /// Change the selected node (or clear the selection).
    ChangeSelected(Option<NodeId>),
    /// Change the hovered node (or clear the hover).
    ChangeHovered(Option<NodeId>),
    /// Reposition (and optionally resize) a node on the canvas.
    Reposition {
        /// Target node
        id: NodeId,
        /// New x position, relative to the parent's origin
        x: f32,
        /// New y position, relative to the parent's origin
        y: f32,
        /// New width; `None` keeps the current width
        width: Option<f32>,
        /// New height; `None` keeps the current height
        height: Option<f32>,
    },
    /// Reattach a node under a new parent at a sibling index.
    ///
    /// `new_parent == None` means "no move occurred" (the drag was cancelled
    /// or resolved illegal) and leaves the state untouched. Moving to the
    /// root list is not supported: every moved node needs a concrete
    /// container parent.
    Move {
        /// The node being moved
        id: NodeId,
        /// Destination parent, or `None` to cancel
        new_parent: Option<NodeId>,
        /// Insertion index among the new siblings; `None` inserts first
        new_index: Option<usize>,
    },
    /// Remove a node and its entire subtree.
    Delete(NodeId),
}

/// One immutable snapshot of editor state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    /// The document tree for the current page
    pub tree: TreeStore,
    /// Currently selected node, if any
    pub selected: Option<NodeId>,
    /// Currently hovered node, if any
    pub hovered: Option<NodeId>,
}

impl State {
    /// Empty initial state, before any recognition result has arrived.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action, producing the next state snapshot.
    ///
    /// # Errors
    ///
    /// Propagates fatal errors only: a missing node id on
    /// `Reposition`/`Move`/`Delete` (state desynchronization) or malformed
    /// recognizer output on `Init`. Cancelled moves are not errors.
    pub fn apply(&self, action: Action) -> Result<State> {
        let mut next = self.clone();
        match action {
            Action::Init(result) => {
                next.tree = build_tree(&result)?;
                // Ids from the discarded tree must not leak into the new one.
                next.selected = None;
                next.hovered = None;
            }
            Action::ChangeSelected(id) => {
                next.selected = id;
            }
            Action::ChangeHovered(id) => {
                next.hovered = id;
            }
            Action::Reposition {
                id,
                x,
                y,
                width,
                height,
            } => {
                next.tree.reposition(id, x, y, width, height)?;
            }
            Action::Move {
                id,
                new_parent,
                new_index,
            } => {
                let Some(new_parent) = new_parent else {
                    // Intentional no-op: the drag ended without a legal
                    // destination and the prior order is restored.
                    log::debug!("move of node {} cancelled", id);
                    return Ok(next);
                };
                next.tree.move_node(id, new_parent, new_index)?;
            }
            Action::Delete(id) => {
                next.tree.remove_subtree(id)?;
                if next.selected.is_some_and(|s| !next.tree.contains(s)) {
                    next.selected = None;
                }
                if next.hovered.is_some_and(|h| !next.tree.contains(h)) {
                    next.hovered = None;
                }
            }
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bbox;
    use crate::recognition::{
        BlockKind, RecognizedBlock, RecognizedLine, RecognizedParagraph, RecognizedWord,
    };

    fn two_line_page() -> RecognizeResult {
        let word = |x0: f32, y0: f32, text: &str| RecognizedWord {
            bbox: Some(Bbox::new(x0, y0, x0 + 40.0, y0 + 20.0)),
            text: text.into(),
            confidence: 90.0,
        };
        RecognizeResult {
            blocks: vec![RecognizedBlock {
                bbox: Some(Bbox::new(0.0, 0.0, 200.0, 100.0)),
                block_type: BlockKind::FlowingText,
                paragraphs: vec![RecognizedParagraph {
                    bbox: Some(Bbox::new(0.0, 0.0, 200.0, 100.0)),
                    lines: vec![
                        RecognizedLine {
                            bbox: Some(Bbox::new(0.0, 0.0, 200.0, 20.0)),
                            words: vec![word(0.0, 0.0, "first")],
                            ..Default::default()
                        },
                        RecognizedLine {
                            bbox: Some(Bbox::new(0.0, 30.0, 200.0, 50.0)),
                            words: vec![word(0.0, 30.0, "second")],
                            ..Default::default()
                        },
                    ],
                    ..Default::default()
                }],
                ..Default::default()
            }],
        }
    }

    #[test]
    fn init_resets_selection() {
        let state = State {
            selected: Some(NodeId(3)),
            hovered: Some(NodeId(4)),
            ..State::new()
        };
        let next = state.apply(Action::Init(two_line_page())).unwrap();
        assert_eq!(next.tree.len(), 6);
        assert_eq!(next.selected, None);
        assert_eq!(next.hovered, None);
    }

    #[test]
    fn snapshots_are_independent() {
        let initial = State::new().apply(Action::Init(two_line_page())).unwrap();
        let selected = initial
            .apply(Action::ChangeSelected(Some(NodeId(2))))
            .unwrap();
        assert_eq!(initial.selected, None);
        assert_eq!(selected.selected, Some(NodeId(2)));
        assert_eq!(initial.tree, selected.tree);
    }

    #[test]
    fn cancelled_move_is_byte_identical_noop() {
        let state = State::new().apply(Action::Init(two_line_page())).unwrap();
        let next = state
            .apply(Action::Move {
                id: NodeId(5),
                new_parent: None,
                new_index: Some(2),
            })
            .unwrap();
        assert_eq!(state, next);
    }

    #[test]
    fn delete_clears_dangling_selection() {
        let state = State::new().apply(Action::Init(two_line_page())).unwrap();
        // Select the second line's word, then delete the line.
        let state = state
            .apply(Action::ChangeSelected(Some(NodeId(5))))
            .unwrap();
        let next = state.apply(Action::Delete(NodeId(4))).unwrap();
        assert_eq!(next.selected, None);
        assert!(!next.tree.contains(NodeId(4)));
        assert!(!next.tree.contains(NodeId(5)));
    }
}
