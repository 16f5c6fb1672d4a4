//! Debounced hover-to-expand timer.
//!
//! Hovering a collapsed node during a drag schedules an expand after a fixed
//! delay; any subsequent drag update (or the end of the drag) cancels it.
//! The timer is an explicit deadline the host polls — there is no hidden
//! thread or callback, so no orphaned work can survive session teardown.

use crate::tree::NodeId;
use std::time::{Duration, Instant};

/// A single-shot, cancellable deadline.
///
/// At most one expand is ever pending: starting the timer replaces any
/// previous deadline.
#[derive(Debug)]
pub(crate) struct ExpandTimer {
    delay: Duration,
    pending: Option<(Instant, NodeId)>,
}

impl ExpandTimer {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule an expand of `id`, replacing any pending deadline.
    pub(crate) fn start(&mut self, now: Instant, id: NodeId) {
        self.pending = Some((now + self.delay, id));
    }

    /// Cancel the pending deadline, if any.
    pub(crate) fn stop(&mut self) {
        self.pending = None;
    }

    /// Fire the deadline if it is due, clearing it.
    ///
    /// Returns the node to expand at most once per `start`.
    pub(crate) fn poll(&mut self, now: Instant) -> Option<NodeId> {
        match self.pending {
            Some((deadline, id)) if now >= deadline => {
                self.pending = None;
                Some(id)
            }
            _ => None,
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
