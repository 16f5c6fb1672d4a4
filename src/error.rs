//! Error types for the OCR editor core.
//!
//! This module defines all error types that can occur while building, editing
//! and exporting the document tree.
//!
//! Illegal drag-and-drop moves are deliberately NOT errors: they are a normal
//! outcome communicated through the drag controller's legality signal and a
//! cancellation-flavored `Move` action. The variants here cover programming
//! invariant violations (state desynchronization) and malformed external
//! input, both of which are fatal for the affected operation.

use crate::tree::NodeId;

/// Result type alias for OCR editor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while editing the document tree.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A referenced node id is absent from the tree store.
    ///
    /// Raised when a `Reposition`, `Move` or `Delete` action references a
    /// node that does not exist. This indicates a UI/state desynchronization
    /// bug, not a recoverable user action, and no repair is attempted.
    #[error("Could not find node with ID {0}")]
    NodeNotFound(NodeId),

    /// Recognizer output is missing required geometry.
    ///
    /// Every recognized element must carry a bounding box; the tree builder
    /// does not sanitize or default missing fields.
    #[error("recognizer output is missing geometry for {kind} #{index}")]
    MissingGeometry {
        /// Element kind name ("block", "paragraph", "line", "word")
        kind: &'static str,
        /// Position of the offending element within its parent
        index: usize,
    },

    /// Moving a node under itself or one of its descendants.
    ///
    /// The move validator never produces such a destination; seeing one means
    /// a caller dispatched a hand-built `Move` action.
    #[error("moving node {id} under {destination} would create a cycle")]
    WouldCreateCycle {
        /// The node being moved
        id: NodeId,
        /// The offending destination parent
        destination: NodeId,
    },

    /// The external recognition engine reported a failure.
    #[error("recognition failed: {0}")]
    Recognition(String),

    /// Malformed XML in an hOCR document being imported.
    #[error("malformed hOCR markup: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Well-formed XML that is not valid hOCR (missing classes, bad bbox
    /// properties, elements outside the page hierarchy).
    #[error("invalid hOCR document: {0}")]
    MalformedHocr(String),

    /// File I/O error while reading or writing exported markup.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error for recognizer results
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
