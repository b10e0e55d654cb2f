//! Drawing actions: the records stored in the history log.
//!
//! An [`Action`] is one drawing operation. Strokes and shapes are created
//! *open* and may be mutated while the pointer is down; once sealed they are
//! never touched again. Text and clear actions are created fully formed.
//! Every action copies its style at creation, so later changes to the global
//! brush or colors never reach back into history.

#[cfg(test)]
#[path = "action_test.rs"]
mod action_test;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, ShapeKind};

/// Creation-time identifier of an action, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(pub u64);

/// Hands out unique, strictly increasing [`ActionId`]s from wall-clock time.
///
/// Two actions created within the same millisecond get consecutive ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdGen {
    last: Option<u64>,
}

impl IdGen {
    /// Next id for an action created at `now_ms`.
    pub fn next(&mut self, now_ms: u64) -> ActionId {
        let id = match self.last {
            Some(last) if now_ms <= last => last + 1,
            _ => now_ms,
        };
        self.last = Some(id);
        ActionId(id)
    }

    /// Make sure future ids sort after `id` (used after loading a session).
    pub fn observe(&mut self, id: ActionId) {
        if self.last.is_none_or(|last| id.0 > last) {
            self.last = Some(id.0);
        }
    }
}

/// Milliseconds since the Unix epoch.
#[cfg(target_arch = "wasm32")]
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// Milliseconds since the Unix epoch.
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

/// Freehand tools that produce strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Freehand {
    Pencil,
    Brush,
    /// Clears pixels instead of painting them.
    Eraser,
}

/// A freehand polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub id: ActionId,
    pub tool: Freehand,
    pub points: Vec<Point>,
    pub stroke_color: String,
    pub fill_color: Option<String>,
    pub size: f64,
    pub open: bool,
}

impl Stroke {
    /// Append `point` unless it repeats the last one.
    pub fn push_point(&mut self, point: Point) -> bool {
        if self.points.last() == Some(&point) {
            return false;
        }
        self.points.push(point);
        true
    }
}

/// A geometric primitive described by anchor and cursor points.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ActionId,
    pub kind: ShapeKind,
    /// `[anchor, cursor]`.
    pub points: [Point; 2],
    pub stroke_color: String,
    pub fill_color: Option<String>,
    pub size: f64,
    pub filled: bool,
    pub open: bool,
}

impl Shape {
    #[must_use]
    pub fn anchor(&self) -> Point {
        self.points[0]
    }

    #[must_use]
    pub fn cursor(&self) -> Point {
        self.points[1]
    }

    /// Replace the cursor point, keeping the anchor.
    pub fn drag_to(&mut self, cursor: Point) {
        self.points[1] = cursor;
    }

    /// Fill color to paint, if this shape is filled and has one.
    #[must_use]
    pub fn fill(&self) -> Option<&str> {
        if self.filled && self.kind.is_closed() { self.fill_color.as_deref() } else { None }
    }
}

/// A committed text run.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub id: ActionId,
    pub text: String,
    /// Baseline origin of the run.
    pub position: Point,
    pub color: String,
    /// Font size in pixels.
    pub size: f64,
}

/// One drawing operation in the history log.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Stroke(Stroke),
    Shape(Shape),
    Text(Text),
    /// The surface is blank at this point in the log.
    Clear { id: ActionId },
}

impl Action {
    #[must_use]
    pub fn id(&self) -> ActionId {
        match self {
            Self::Stroke(s) => s.id,
            Self::Shape(s) => s.id,
            Self::Text(t) => t.id,
            Self::Clear { id } => *id,
        }
    }

    /// Whether the action is still receiving pointer updates.
    #[must_use]
    pub fn is_open(&self) -> bool {
        match self {
            Self::Stroke(s) => s.open,
            Self::Shape(s) => s.open,
            Self::Text(_) | Self::Clear { .. } => false,
        }
    }

    /// Set the open flag. Text and clear actions are never open.
    pub fn set_open(&mut self, open: bool) {
        match self {
            Self::Stroke(s) => s.open = open,
            Self::Shape(s) => s.open = open,
            Self::Text(_) | Self::Clear { .. } => {}
        }
    }
}
