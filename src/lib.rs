//! # OCR Oxide
//!
//! Engine for interactive proofreading of OCR output: a hierarchical
//! document tree (blocks → paragraphs → lines → words) plus the editing
//! operations a correction UI needs, independent of any rendering layer.
//!
//! ## Core Features
//!
//! ### Document Model
//! - **Tree Store**: arena-backed page hierarchy with absolute pixel boxes
//!   and parent-relative offsets kept in sync
//! - **Tree Building**: deterministic construction from recognizer output
//!   (Tesseract-style blocks/paragraphs/lines/words JSON)
//! - **Flattening**: visible-row projection honoring collapse state, for
//!   list-style tree views
//!
//! ### Editing
//! - **Reducer**: pure `State × Action → State` edit loop (init, select,
//!   hover, reposition, move, delete); every transition returns a fresh
//!   snapshot
//! - **Drag Engine**: drag-and-drop session controller with destination
//!   resolution, container-compatibility validation, horizontal nesting
//!   levels and debounced hover-expand
//!
//! ### Interchange
//! - **hOCR Export**: serialize the edited tree to standard hOCR XHTML
//! - **hOCR Import**: parse hOCR back into recognizer-result form for
//!   resuming a session
//!
//! ## Quick Start
//!
//! ```
//! use ocr_oxide::recognition::RecognizeResult;
//! use ocr_oxide::reducer::{Action, State};
//!
//! # fn main() -> ocr_oxide::Result<()> {
//! let json = r#"{ "blocks": [{
//!     "bbox": { "x0": 0, "y0": 0, "x1": 100, "y1": 40 },
//!     "blocktype": "FLOWING_TEXT",
//!     "paragraphs": []
//! }] }"#;
//! let result = RecognizeResult::from_json(json)?;
//!
//! // Recognition output becomes the initial editor state.
//! let state = State::new().apply(Action::Init(result))?;
//! assert_eq!(state.tree.len(), 1);
//!
//! // Every edit produces a new snapshot; the old one is unchanged.
//! let selected = state.apply(Action::ChangeSelected(state.tree.roots().first().copied()))?;
//! assert!(state.selected.is_none());
//! assert!(selected.selected.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Geometry primitives
pub mod geometry;

// Recognizer boundary
pub mod recognition;

// Document tree: store, building, flattening, move rules
pub mod tree;

// The edit loop
pub mod reducer;

// Drag-and-drop engine
pub mod drag;

// hOCR import/export
pub mod export;

// Re-exports
pub use drag::{DragConfig, DragController, DragMode, DragOutcome, DragUpdate};
pub use error::{Error, Result};
pub use export::{parse_hocr, HocrWriter};
pub use geometry::{Bbox, Position};
pub use recognition::{BlockKind, RecognizeProgress, RecognizeResult, Recognizer};
pub use reducer::{Action, State};
pub use tree::{
    build_tree, can_move_node, flatten_tree, ContainerPolicy, ElementKind, FlatItem, Node, NodeId,
    TreePosition, TreeStore,
};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
