//! Recognizer interface boundary.
//!
//! The OCR engine itself is a black box to this crate: it is invoked with an
//! image reference and a language spec, reports progress through a callback,
//! and eventually produces a [`RecognizeResult`] — a hierarchy of positioned
//! text elements. That result is the sole input to [`Action::Init`].
//!
//! Engines typically run out-of-process (or in a worker), so the result types
//! are serde-deserializable and follow the field shape common to Tesseract
//! derivatives: blocks → paragraphs → lines → words, each with a corner-based
//! bounding box, recognized text and a confidence score.
//!
//! [`Action::Init`]: crate::reducer::Action::Init

use crate::error::Result;
use crate::geometry::Bbox;
use serde::{Deserialize, Serialize};

/// A progress update emitted by a recognition engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizeProgress {
    /// Named engine status, e.g. `"loading language traineddata"` or
    /// `"recognizing text"`.
    pub status: String,
    /// Completion fraction in `0.0..=1.0` for the current status.
    pub progress: f32,
}

impl RecognizeProgress {
    /// Whether this update belongs to the text recognition phase.
    ///
    /// Engines report many phases (loading, initializing, recognizing); UIs
    /// usually only surface the recognizing ones.
    pub fn is_recognizing(&self) -> bool {
        self.status.starts_with("recognizing")
    }
}

/// A text recognition engine.
///
/// Implementations wrap an actual OCR backend. The call is synchronous from
/// the core's point of view; async hosts adapt at their boundary and deliver
/// the finished result as a single `Init` action.
pub trait Recognizer {
    /// Recognize the text of one page image.
    ///
    /// `image` is an engine-interpreted reference (path, URL, object id);
    /// `languages` is an engine language spec such as `"heb+eng"`.
    /// `on_progress` is invoked with periodic [`RecognizeProgress`] updates.
    fn recognize(
        &mut self,
        image: &str,
        languages: &str,
        on_progress: &mut dyn FnMut(RecognizeProgress),
    ) -> Result<RecognizeResult>;
}

/// Block classification reported by the layout stage of the engine.
///
/// Only the text-flow variants can hold nested structure; image, separator
/// and noise blocks are leaves. Which variants count as containers is decided
/// by [`ContainerPolicy`](crate::tree::ContainerPolicy), not here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockKind {
    /// Unclassified block
    #[default]
    Unknown,
    /// Ordinary flowing body text
    FlowingText,
    /// Heading text
    HeadingText,
    /// Pull-out / sidebar text
    PulloutText,
    /// Vertically set text
    VerticalText,
    /// Caption attached to an image or table
    CaptionText,
    /// Equation region
    Equation,
    /// Table region
    Table,
    /// Image region
    FlowingImage,
    /// Horizontal separator line
    HorzLine,
    /// Vertical separator line
    VertLine,
    /// Noise region
    Noise,
}

impl BlockKind {
    /// Whether this block variant carries flowing text structure.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            BlockKind::FlowingText
                | BlockKind::HeadingText
                | BlockKind::PulloutText
                | BlockKind::VerticalText
                | BlockKind::CaptionText
        )
    }

    /// The engine wire name of this variant, e.g. `"FLOWING_TEXT"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Unknown => "UNKNOWN",
            BlockKind::FlowingText => "FLOWING_TEXT",
            BlockKind::HeadingText => "HEADING_TEXT",
            BlockKind::PulloutText => "PULLOUT_TEXT",
            BlockKind::VerticalText => "VERTICAL_TEXT",
            BlockKind::CaptionText => "CAPTION_TEXT",
            BlockKind::Equation => "EQUATION",
            BlockKind::Table => "TABLE",
            BlockKind::FlowingImage => "FLOWING_IMAGE",
            BlockKind::HorzLine => "HORZ_LINE",
            BlockKind::VertLine => "VERT_LINE",
            BlockKind::Noise => "NOISE",
        }
    }

    /// Parse an engine wire name back into a variant.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "UNKNOWN" => BlockKind::Unknown,
            "FLOWING_TEXT" => BlockKind::FlowingText,
            "HEADING_TEXT" => BlockKind::HeadingText,
            "PULLOUT_TEXT" => BlockKind::PulloutText,
            "VERTICAL_TEXT" => BlockKind::VerticalText,
            "CAPTION_TEXT" => BlockKind::CaptionText,
            "EQUATION" => BlockKind::Equation,
            "TABLE" => BlockKind::Table,
            "FLOWING_IMAGE" => BlockKind::FlowingImage,
            "HORZ_LINE" => BlockKind::HorzLine,
            "VERT_LINE" => BlockKind::VertLine,
            "NOISE" => BlockKind::Noise,
            _ => return None,
        })
    }
}

/// Result of recognizing one page image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognizeResult {
    /// Top-level layout blocks in document order.
    pub blocks: Vec<RecognizedBlock>,
}

impl RecognizeResult {
    /// Decode a result delivered as JSON by an external engine.
    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }
}

/// A recognized layout block.
///
/// `bbox` is optional at this boundary because engines have been observed to
/// omit geometry for degenerate regions; the tree builder treats a missing
/// box as fatal rather than guessing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognizedBlock {
    /// Bounding box in image pixels
    pub bbox: Option<Bbox>,
    /// Concatenated recognized text
    #[serde(default)]
    pub text: String,
    /// Mean confidence in `0.0..=100.0`
    #[serde(default)]
    pub confidence: f32,
    /// Layout classification
    #[serde(default, rename = "blocktype")]
    pub block_type: BlockKind,
    /// Nested paragraphs
    #[serde(default)]
    pub paragraphs: Vec<RecognizedParagraph>,
}

/// A recognized paragraph within a block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognizedParagraph {
    /// Bounding box in image pixels
    pub bbox: Option<Bbox>,
    /// Concatenated recognized text
    #[serde(default)]
    pub text: String,
    /// Mean confidence in `0.0..=100.0`
    #[serde(default)]
    pub confidence: f32,
    /// Nested lines
    #[serde(default)]
    pub lines: Vec<RecognizedLine>,
}

/// A recognized text line within a paragraph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognizedLine {
    /// Bounding box in image pixels
    pub bbox: Option<Bbox>,
    /// Concatenated recognized text
    #[serde(default)]
    pub text: String,
    /// Mean confidence in `0.0..=100.0`
    #[serde(default)]
    pub confidence: f32,
    /// Nested words
    #[serde(default)]
    pub words: Vec<RecognizedWord>,
}

/// A recognized word, the leaf of the hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognizedWord {
    /// Bounding box in image pixels
    pub bbox: Option<Bbox>,
    /// Recognized text
    #[serde(default)]
    pub text: String,
    /// Word confidence in `0.0..=100.0`
    #[serde(default)]
    pub confidence: f32,
}
