//! The drag session controller.
//!
//! Coordinates one in-progress row drag: Idle → Dragging → (Committing |
//! Cancelled) → Idle. While dragging it tracks the live destination
//! candidate, the combine (nest) target, and the horizontal nesting level,
//! resolves a preview position on every update and surfaces a legality
//! signal for visual feedback — without ever touching the tree store. Only
//! on release does it emit a committed [`Action::Move`]; a drag without a
//! legal destination emits a `Move` with no parent, which the reducer
//! treats as an intentional no-op.
//!
//! The controller reads the flattened view the drag is performed against;
//! callers must flatten with the dragged node id so its subtree stays
//! suppressed (see [`flatten_tree`](crate::tree::flatten_tree)).

pub mod position;
mod timer;

pub use position::resolve_drop_positions;

use crate::reducer::Action;
use crate::tree::{can_move_node, ContainerPolicy, FlatItem, NodeId, TreeStore};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use timer::ExpandTimer;

/// How the drag is being driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Continuous pointer (mouse/touch) drag
    Pointer,
    /// Discrete keyboard drag (arrow-key snapping)
    Keyboard,
}

/// A single drag-position update from the drag layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragUpdate {
    /// Row index the dragged item would drop at, if over a drop slot
    pub destination_index: Option<usize>,
    /// Node being hovered as a nesting target, if any
    pub combine: Option<NodeId>,
}

/// Ephemeral state of one drag, alive between drag-start and drag-end.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// The node being dragged
    pub dragged: NodeId,
    /// Row index the drag started from
    pub source_index: usize,
    /// Live destination row index, if any
    pub destination_index: Option<usize>,
    /// Live combine (nest) target, if any
    pub combine: Option<NodeId>,
    /// Nesting level derived from the pointer's horizontal offset
    pub horizontal_level: Option<usize>,
    /// Pointer or keyboard drive
    pub mode: DragMode,
}

/// Tuning knobs for the drag controller.
#[derive(Debug, Clone)]
pub struct DragConfig {
    /// Horizontal pixels per nesting level (row indentation width).
    pub offset_per_level: f32,
    /// Debounce delay before a hovered, collapsed node auto-expands.
    pub expand_delay: Duration,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            offset_per_level: 35.0,
            expand_delay: Duration::from_millis(500),
        }
    }
}

/// Outcome of a finished drag.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// The drop resolved to a legal destination; dispatch the move.
    Committed(Action),
    /// No legal destination; the move action is a cancellation no-op that
    /// restores the prior order.
    Cancelled(Action),
}

impl DragOutcome {
    /// The move action to dispatch, committed or cancelled.
    pub fn action(&self) -> &Action {
        match self {
            DragOutcome::Committed(action) | DragOutcome::Cancelled(action) => action,
        }
    }
}

/// State machine for one drag at a time.
///
/// All session fields and the expand timer are cleared unconditionally when
/// a drag ends, whatever the outcome; nothing leaks into the next drag.
#[derive(Debug)]
pub struct DragController {
    config: DragConfig,
    session: Option<DragSession>,
    expand_timer: ExpandTimer,
}

impl DragController {
    /// Create a controller with the given tuning.
    pub fn new(config: DragConfig) -> Self {
        let expand_timer = ExpandTimer::new(config.expand_delay);
        Self {
            config,
            session: None,
            expand_timer,
        }
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The node currently being dragged, if any.
    ///
    /// Feed this to [`flatten_tree`](crate::tree::flatten_tree) so the
    /// dragged subtree stays suppressed while the drag lasts.
    pub fn dragged_id(&self) -> Option<NodeId> {
        self.session.as_ref().map(|s| s.dragged)
    }

    /// The live session, for renderers that draw preview affordances.
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Idle → Dragging: capture the source row.
    ///
    /// Returns the dragged node id, or `None` (staying Idle) when the row
    /// index is out of range.
    pub fn drag_start(&mut self, flat: &[FlatItem], index: usize, mode: DragMode) -> Option<NodeId> {
        let item = flat.get(index)?;
        log::debug!("drag start: node {} from row {}", item.id, index);
        self.session = Some(DragSession {
            dragged: item.id,
            source_index: index,
            destination_index: Some(index),
            combine: None,
            horizontal_level: None,
            mode,
        });
        Some(item.id)
    }

    /// Dragging self-transition: absorb a position update.
    ///
    /// Restarts the hover-expand debounce when a collapsed, expandable node
    /// is hovered as a combine target, resolves the live (source,
    /// destination) pair and returns the legality signal for visual
    /// feedback. The store is not touched.
    pub fn drag_update(
        &mut self,
        store: &TreeStore,
        policy: &ContainerPolicy,
        flat: &[FlatItem],
        collapsed: &HashSet<NodeId>,
        update: DragUpdate,
        now: Instant,
    ) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        self.expand_timer.stop();
        if let Some(combine) = update.combine {
            let expandable = collapsed.contains(&combine)
                && store.get(combine).is_some_and(|n| !n.children.is_empty());
            if expandable {
                self.expand_timer.start(now, combine);
            }
        }

        session.destination_index = update.destination_index;
        session.combine = update.combine;

        let legal = resolve_drop_positions(store, flat, session)
            .map(|(source, destination)| {
                can_move_node(store, policy, &source, destination.as_ref())
            })
            .unwrap_or(false);
        log::trace!(
            "drag update: destination {:?} combine {:?} legal {}",
            update.destination_index,
            update.combine,
            legal
        );
        legal
    }

    /// Track the pointer's horizontal offset within the list container.
    ///
    /// Quantizes the offset into a nesting level (1-based), half a level of
    /// slack either way. Keyboard drags have no pointer and keep their
    /// level untouched.
    pub fn pointer_moved(&mut self, pointer_left: f32, container_left: f32) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.mode != DragMode::Pointer {
            return;
        }
        let relative_left = (pointer_left - container_left).max(0.0);
        let per_level = self.config.offset_per_level;
        let level = ((relative_left + per_level / 2.0) / per_level).floor() as usize + 1;
        session.horizontal_level = Some(level);
    }

    /// Fire the debounced hover-expand if its deadline passed.
    ///
    /// Returns the node the host should expand (remove from its collapsed
    /// set); at most once per hover. Expanding is a side effect outside
    /// this core.
    pub fn poll_expand(&mut self, now: Instant) -> Option<NodeId> {
        if self.session.is_none() {
            return None;
        }
        self.expand_timer.poll(now)
    }

    /// Dragging → Committing | Cancelled → Idle.
    ///
    /// Resolves the final (source, destination) pair from the pre-drop view,
    /// validates it once more, and emits the move to dispatch. Returns
    /// `None` only when called while Idle. The session and any pending
    /// expand are cleared unconditionally.
    pub fn drag_end(
        &mut self,
        store: &TreeStore,
        policy: &ContainerPolicy,
        flat: &[FlatItem],
    ) -> Option<DragOutcome> {
        self.expand_timer.stop();
        let session = self.session.take()?;

        let resolved = resolve_drop_positions(store, flat, &session);
        let outcome = match resolved {
            Some((source, Some(destination)))
                if can_move_node(store, policy, &source, Some(&destination)) =>
            {
                log::debug!(
                    "drag commit: node {} -> parent {:?} index {:?}",
                    session.dragged,
                    destination.parent,
                    destination.index
                );
                DragOutcome::Committed(Action::Move {
                    id: session.dragged,
                    new_parent: destination.parent,
                    new_index: destination.index,
                })
            }
            _ => {
                log::debug!("drag cancelled: node {}", session.dragged);
                DragOutcome::Cancelled(Action::Move {
                    id: session.dragged,
                    new_parent: None,
                    new_index: None,
                })
            }
        };
        Some(outcome)
    }

    /// Explicit cancel (e.g. Escape): back to Idle, clearing everything.
    pub fn cancel(&mut self) {
        self.expand_timer.stop();
        if let Some(session) = self.session.take() {
            log::debug!("drag aborted: node {}", session.dragged);
        }
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}
