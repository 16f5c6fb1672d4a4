//! Geometric primitives for the document tree.
//!
//! This module provides the basic geometric types used throughout the editor
//! core. All coordinates are in image pixel space, with the origin at the
//! top-left corner of the scanned page.

use serde::{Deserialize, Serialize};

/// A 2D position in image pixel space.
///
/// Also used as a translation delta and as a node's parent-relative offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Position {
    /// Create a new position.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_oxide::geometry::Position;
    ///
    /// let pos = Position::new(10.0, 20.0);
    /// assert_eq!(pos.x, 10.0);
    /// assert_eq!(pos.y, 20.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned bounding box in image pixel space.
///
/// Stored corner-based (`x0/y0` top-left, `x1/y1` bottom-right), matching the
/// shape recognition engines report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bbox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl Bbox {
    /// Create a new bounding box from its corner coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_oxide::geometry::Bbox;
    ///
    /// let bbox = Bbox::new(10.0, 20.0, 110.0, 70.0);
    /// assert_eq!(bbox.width(), 100.0);
    /// assert_eq!(bbox.height(), 50.0);
    /// ```
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Top-left corner of the box.
    pub fn origin(&self) -> Position {
        Position::new(self.x0, self.y0)
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Return this box translated by `delta`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_oxide::geometry::{Bbox, Position};
    ///
    /// let bbox = Bbox::new(0.0, 0.0, 10.0, 10.0);
    /// let moved = bbox.translated(Position::new(5.0, -2.0));
    /// assert_eq!(moved, Bbox::new(5.0, -2.0, 15.0, 8.0));
    /// ```
    pub fn translated(&self, delta: Position) -> Self {
        Self {
            x0: self.x0 + delta.x,
            y0: self.y0 + delta.y,
            x1: self.x1 + delta.x,
            y1: self.y1 + delta.y,
        }
    }
}
