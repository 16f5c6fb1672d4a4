//! Building the document tree from recognizer output.
//!
//! The tree is rebuilt wholesale on every `Init`: the old store, if any, is
//! discarded and ids are assigned fresh in document order. There is no
//! incremental diffing against prior state.

use crate::error::{Error, Result};
use crate::geometry::{Bbox, Position};
use crate::recognition::RecognizeResult;
use crate::tree::{ElementKind, Node, NodeId, TreeStore};

/// Build a fresh [`TreeStore`] from one page's recognition result.
///
/// Ids are sequential in depth-first document order, which is also the
/// store's insertion (iteration) order. Each node's parent-relative offset
/// is its bounding box origin minus its parent's (roots are relative to the
/// page origin).
///
/// # Errors
///
/// Returns [`Error::MissingGeometry`] when any element lacks a bounding box;
/// malformed recognizer output is fatal and no partial recovery is
/// attempted.
pub fn build_tree(result: &RecognizeResult) -> Result<TreeStore> {
    let mut store = TreeStore::new();
    let mut next_id = 0u32;
    let mut alloc = || {
        let id = NodeId(next_id);
        next_id += 1;
        id
    };

    for (block_index, block) in result.blocks.iter().enumerate() {
        let block_bbox = require_bbox(block.bbox, "block", block_index)?;
        let block_id = alloc();
        store.insert(new_node(
            block_id,
            ElementKind::Block(block.block_type),
            None,
            block_bbox,
            block_bbox.origin(),
            &block.text,
            block.confidence,
        ));

        for (para_index, para) in block.paragraphs.iter().enumerate() {
            let para_bbox = require_bbox(para.bbox, "paragraph", para_index)?;
            let para_id = alloc();
            store.node_mut(block_id)?.children.push(para_id);
            store.insert(new_node(
                para_id,
                ElementKind::Paragraph,
                Some(block_id),
                para_bbox,
                relative_origin(para_bbox, block_bbox),
                &para.text,
                para.confidence,
            ));

            for (line_index, line) in para.lines.iter().enumerate() {
                let line_bbox = require_bbox(line.bbox, "line", line_index)?;
                let line_id = alloc();
                store.node_mut(para_id)?.children.push(line_id);
                store.insert(new_node(
                    line_id,
                    ElementKind::Line,
                    Some(para_id),
                    line_bbox,
                    relative_origin(line_bbox, para_bbox),
                    &line.text,
                    line.confidence,
                ));

                for (word_index, word) in line.words.iter().enumerate() {
                    let word_bbox = require_bbox(word.bbox, "word", word_index)?;
                    let word_id = alloc();
                    store.node_mut(line_id)?.children.push(word_id);
                    store.insert(new_node(
                        word_id,
                        ElementKind::Word,
                        Some(line_id),
                        word_bbox,
                        relative_origin(word_bbox, line_bbox),
                        &word.text,
                        word.confidence,
                    ));
                }
            }
        }
    }

    log::debug!(
        "built tree with {} nodes across {} blocks",
        store.len(),
        store.roots().len()
    );
    Ok(store)
}

fn require_bbox(bbox: Option<Bbox>, kind: &'static str, index: usize) -> Result<Bbox> {
    bbox.ok_or(Error::MissingGeometry { kind, index })
}

fn relative_origin(bbox: Bbox, parent: Bbox) -> Position {
    Position::new(bbox.x0 - parent.x0, bbox.y0 - parent.y0)
}

fn new_node(
    id: NodeId,
    kind: ElementKind,
    parent: Option<NodeId>,
    bbox: Bbox,
    offset: Position,
    text: &str,
    confidence: f32,
) -> Node {
    Node {
        id,
        kind,
        parent,
        children: Vec::new(),
        bbox,
        parent_relative_offset: offset,
        text: text.to_string(),
        confidence,
    }
}
