//! Input model: tools, style state, and the gesture state machine.
//!
//! `Tool` and `StyleState` capture the user's intent at the moment an action
//! is created; their values are copied into the action, so changing them later
//! never alters history. `InputState` is the gesture being tracked between
//! pointer-down and pointer-up. The transitions themselves live in
//! [`crate::engine::EngineCore`].

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::action::{Freehand, Shape};
use crate::config::Config;
use crate::geometry::{Point, ShapeKind};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Thin freehand line (default).
    #[default]
    Pencil,
    /// Thick freehand line.
    Brush,
    /// Freehand eraser.
    Eraser,
    /// Place a text run.
    Text,
    Rectangle,
    Circle,
    Ellipse,
    Line,
    Triangle,
    Pentagon,
    Hexagon,
    Star,
}

/// What kind of action a tool produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Freehand(Freehand),
    Shape(ShapeKind),
    Text,
}

impl Tool {
    /// Every tool, in toolbar order.
    pub const ALL: [Tool; 12] = [
        Self::Pencil,
        Self::Brush,
        Self::Text,
        Self::Eraser,
        Self::Rectangle,
        Self::Circle,
        Self::Ellipse,
        Self::Line,
        Self::Triangle,
        Self::Pentagon,
        Self::Hexagon,
        Self::Star,
    ];

    #[must_use]
    pub fn kind(self) -> ToolKind {
        match self {
            Self::Pencil => ToolKind::Freehand(Freehand::Pencil),
            Self::Brush => ToolKind::Freehand(Freehand::Brush),
            Self::Eraser => ToolKind::Freehand(Freehand::Eraser),
            Self::Text => ToolKind::Text,
            Self::Rectangle => ToolKind::Shape(ShapeKind::Rectangle),
            Self::Circle => ToolKind::Shape(ShapeKind::Circle),
            Self::Ellipse => ToolKind::Shape(ShapeKind::Ellipse),
            Self::Line => ToolKind::Shape(ShapeKind::Line),
            Self::Triangle => ToolKind::Shape(ShapeKind::Triangle),
            Self::Pentagon => ToolKind::Shape(ShapeKind::Pentagon),
            Self::Hexagon => ToolKind::Shape(ShapeKind::Hexagon),
            Self::Star => ToolKind::Shape(ShapeKind::Star),
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Pencil => "pencil",
            Self::Brush => "brush",
            Self::Eraser => "eraser",
            Self::Text => "text",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
            Self::Line => "line",
            Self::Triangle => "triangle",
            Self::Pentagon => "pentagon",
            Self::Hexagon => "hexagon",
            Self::Star => "star",
        }
    }

    /// CSS cursor the host should show over the canvas.
    #[must_use]
    pub fn css_cursor(self) -> &'static str {
        match self {
            Self::Pencil => "url('/cursors/pencil.svg') 4 20, auto",
            Self::Brush => "url('/cursors/brush.svg') 12 12, auto",
            Self::Eraser => "url('/cursors/eraser.svg') 12 12, auto",
            Self::Text => "text",
            _ => "crosshair",
        }
    }
}

impl From<Freehand> for Tool {
    fn from(tool: Freehand) -> Self {
        match tool {
            Freehand::Pencil => Self::Pencil,
            Freehand::Brush => Self::Brush,
            Freehand::Eraser => Self::Eraser,
        }
    }
}

impl From<ShapeKind> for Tool {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Rectangle => Self::Rectangle,
            ShapeKind::Circle => Self::Circle,
            ShapeKind::Ellipse => Self::Ellipse,
            ShapeKind::Line => Self::Line,
            ShapeKind::Triangle => Self::Triangle,
            ShapeKind::Pentagon => Self::Pentagon,
            ShapeKind::Hexagon => Self::Hexagon,
            ShapeKind::Star => Self::Star,
        }
    }
}

/// Returned when a tool name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool: {0}")]
pub struct UnknownTool(pub String);

impl FromStr for Tool {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.name() == s)
            .ok_or_else(|| UnknownTool(s.to_owned()))
    }
}

/// Current tool and paint settings, copied into each new action.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleState {
    pub tool: Tool,
    pub stroke_color: String,
    /// `None` paints shapes without fill.
    pub fill_color: Option<String>,
    /// Brush size as shown on the slider, before per-tool scaling.
    pub brush_size: f64,
}

impl StyleState {
    /// Initial style from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            tool: config.tool,
            stroke_color: config.stroke_color.clone(),
            fill_color: config.fill_color.clone(),
            brush_size: config.clamp_brush_size(config.brush_size),
        }
    }

    /// Line width for a stroke drawn with `tool`.
    #[must_use]
    pub fn stroke_size(&self, tool: Freehand, config: &Config) -> f64 {
        let scale = match tool {
            Freehand::Pencil => config.pencil_scale,
            Freehand::Brush => config.brush_scale,
            Freehand::Eraser => config.eraser_scale,
        };
        self.brush_size * scale
    }

    /// Font size for a text action.
    #[must_use]
    pub fn text_size(&self, config: &Config) -> f64 {
        self.brush_size * config.text_scale
    }
}

/// The gesture being tracked between pointer events.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A freehand stroke is open at the log's cursor.
    DrawingStroke,
    /// A shape is being dragged; it lives here until release commits it.
    DrawingShape {
        /// The uncommitted in-progress shape, drawn as a preview.
        shape: Shape,
    },
    /// A text box is open at `anchor`.
    TextEditing {
        /// Baseline origin of the pending text run.
        anchor: Point,
        /// Text typed so far.
        buffer: String,
    },
}

impl InputState {
    /// Whether a stroke or shape gesture is in progress.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::DrawingStroke | Self::DrawingShape { .. })
    }
}
