//! Geometry propagation for reposition and resize.
//!
//! When a node is dragged or resized on the canvas, its new position arrives
//! in parent-relative terms. The delta is computed against the node's stored
//! parent-relative offset — not its previous absolute position — so drift
//! from earlier propagations never accumulates. The delta then translates
//! the node's absolute box and every descendant's absolute box; descendant
//! offsets and sizes are untouched (a resize never rescales children).

use crate::error::Result;
use crate::geometry::{Bbox, Position};
use crate::tree::{NodeId, TreeStore};

impl TreeStore {
    /// Reposition (and optionally resize) a node, translating its subtree.
    ///
    /// `x`/`y` are the node's new position relative to its parent's origin.
    /// When `width`/`height` are given, the node's own far edges are
    /// recomputed from them; otherwise they shift by the same delta as the
    /// origin. Descendant boxes receive the translation only.
    ///
    /// # Errors
    ///
    /// [`Error::NodeNotFound`](crate::Error::NodeNotFound) when `id` is
    /// absent — referencing a nonexistent node indicates a UI/state
    /// desynchronization bug, not a recoverable user action.
    pub(crate) fn reposition(
        &mut self,
        id: NodeId,
        x: f32,
        y: f32,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Result<()> {
        let node = self.node_mut(id)?;

        let delta = Position::new(
            x - node.parent_relative_offset.x,
            y - node.parent_relative_offset.y,
        );
        let new_origin = Position::new(node.bbox.x0 + delta.x, node.bbox.y0 + delta.y);

        // TODO: Round and clamp to parent bounds.
        let new_bbox = Bbox {
            x0: new_origin.x,
            y0: new_origin.y,
            x1: match width {
                Some(w) => new_origin.x + w,
                None => node.bbox.x1 + delta.x,
            },
            y1: match height {
                Some(h) => new_origin.y + h,
                None => node.bbox.y1 + delta.y,
            },
        };

        // The new offset is stored verbatim, never recomputed from the bbox,
        // to avoid float drift.
        node.parent_relative_offset = Position::new(x, y);
        node.bbox = new_bbox;

        for descendant in self.descendants(id) {
            let child = self.node_mut(descendant)?;
            child.bbox = child.bbox.translated(delta);
        }

        log::trace!(
            "repositioned node {} by ({}, {}) px",
            id,
            delta.x,
            delta.y
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::geometry::{Bbox, Position};
    use crate::recognition::BlockKind;
    use crate::tree::{ElementKind, Node, NodeId, TreeStore};

    fn node(id: u32, parent: Option<u32>, kind: ElementKind, children: &[u32], bbox: Bbox, offset: Position) -> Node {
        Node {
            id: NodeId(id),
            kind,
            parent: parent.map(NodeId),
            children: children.iter().map(|c| NodeId(*c)).collect(),
            bbox,
            parent_relative_offset: offset,
            text: String::new(),
            confidence: 0.0,
        }
    }

    /// block(0) at (100, 100), line... simplified two-level tree:
    /// block(0) -> para(1) -> word-ish leaf(2); sibling block(3).
    fn sample() -> TreeStore {
        let mut store = TreeStore::new();
        let block = ElementKind::Block(BlockKind::FlowingText);
        store.insert(node(
            0,
            None,
            block,
            &[1],
            Bbox::new(100.0, 100.0, 300.0, 200.0),
            Position::new(100.0, 100.0),
        ));
        store.insert(node(
            1,
            Some(0),
            ElementKind::Paragraph,
            &[2],
            Bbox::new(110.0, 110.0, 290.0, 190.0),
            Position::new(10.0, 10.0),
        ));
        store.insert(node(
            2,
            Some(1),
            ElementKind::Line,
            &[],
            Bbox::new(120.0, 120.0, 200.0, 140.0),
            Position::new(10.0, 10.0),
        ));
        store.insert(node(
            3,
            None,
            block,
            &[],
            Bbox::new(100.0, 400.0, 300.0, 500.0),
            Position::new(100.0, 400.0),
        ));
        store
    }

    #[test]
    fn translation_propagates_to_descendants_only() {
        let mut store = sample();
        // Move block 0 from offset (100, 100) to (130, 90): delta (30, -10).
        store.reposition(NodeId(0), 130.0, 90.0, None, None).unwrap();

        assert_eq!(store.get(NodeId(0)).unwrap().bbox, Bbox::new(130.0, 90.0, 330.0, 190.0));
        assert_eq!(store.get(NodeId(1)).unwrap().bbox, Bbox::new(140.0, 100.0, 320.0, 180.0));
        assert_eq!(store.get(NodeId(2)).unwrap().bbox, Bbox::new(150.0, 110.0, 230.0, 130.0));
        // The untouched sibling keeps its geometry.
        assert_eq!(store.get(NodeId(3)).unwrap().bbox, Bbox::new(100.0, 400.0, 300.0, 500.0));
        // Descendant offsets are still relative to their direct parent.
        assert_eq!(store.get(NodeId(1)).unwrap().parent_relative_offset, Position::new(10.0, 10.0));
    }

    #[test]
    fn resize_touches_only_the_target_box() {
        let mut store = sample();
        // Same position, new size.
        store
            .reposition(NodeId(0), 100.0, 100.0, Some(250.0), Some(80.0))
            .unwrap();

        assert_eq!(store.get(NodeId(0)).unwrap().bbox, Bbox::new(100.0, 100.0, 350.0, 180.0));
        // Children keep both position and size.
        assert_eq!(store.get(NodeId(1)).unwrap().bbox, Bbox::new(110.0, 110.0, 290.0, 190.0));
        assert_eq!(store.get(NodeId(2)).unwrap().bbox, Bbox::new(120.0, 120.0, 200.0, 140.0));
    }

    #[test]
    fn repeated_resizes_do_not_drift() {
        // The delta anchors to the parent-relative offset, so resizing the
        // same node repeatedly at an unchanged position must never move it.
        let mut store = sample();
        for w in [250.0, 180.0, 220.0] {
            store.reposition(NodeId(0), 100.0, 100.0, Some(w), None).unwrap();
            let bbox = store.get(NodeId(0)).unwrap().bbox;
            assert_eq!((bbox.x0, bbox.y0), (100.0, 100.0));
            assert_eq!(bbox.width(), w);
        }
        // Descendants never moved either.
        assert_eq!(store.get(NodeId(2)).unwrap().bbox, Bbox::new(120.0, 120.0, 200.0, 140.0));
    }

    #[test]
    fn reposition_missing_node_is_fatal() {
        let mut store = sample();
        assert!(matches!(
            store.reposition(NodeId(77), 0.0, 0.0, None, None),
            Err(Error::NodeNotFound(NodeId(77)))
        ));
    }
}
