//! Recording surface used by the unit tests.

use crate::surface::{Composite, RenderError, Surface};

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Save,
    Restore,
    ClearRect(f64, f64, f64, f64),
    FillRect(f64, f64, f64, f64),
    Composite(Composite),
    StrokeColor(String),
    FillColor(String),
    LineWidth(f64),
    RoundLineEnds,
    Font(String),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    ClosePath,
    Rect(f64, f64, f64, f64),
    Circle(f64, f64, f64),
    Ellipse(f64, f64, f64, f64),
    Fill,
    Stroke,
    FillText(String, f64, f64),
}

impl Op {
    /// Whether the op puts paint on the surface.
    pub fn paints(&self) -> bool {
        matches!(self, Self::Fill | Self::Stroke | Self::FillText(..) | Self::FillRect(..))
    }
}

/// A [`Surface`] that records every call in order.
#[derive(Debug, Default)]
pub struct Recorder {
    pub ops: Vec<Op>,
    /// Make `fill_text` fail, to exercise error paths.
    pub fail_text: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ops after the last full clear.
    pub fn since_last_clear(&self) -> &[Op] {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, Op::ClearRect(..)))
            .map_or(0, |i| i + 1);
        &self.ops[start..]
    }

    /// Whether anything is painted after the last full clear.
    pub fn shows_anything(&self) -> bool {
        self.since_last_clear().iter().any(Op::paints)
    }

    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Surface for Recorder {
    fn save(&mut self) {
        self.ops.push(Op::Save);
    }

    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(Op::ClearRect(x, y, width, height));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(Op::FillRect(x, y, width, height));
    }

    fn set_composite(&mut self, op: Composite) -> Result<(), RenderError> {
        self.ops.push(Op::Composite(op));
        Ok(())
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.ops.push(Op::StrokeColor(color.to_owned()));
    }

    fn set_fill_color(&mut self, color: &str) {
        self.ops.push(Op::FillColor(color.to_owned()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(Op::LineWidth(width));
    }

    fn set_round_line_ends(&mut self) {
        self.ops.push(Op::RoundLineEnds);
    }

    fn set_font(&mut self, font: &str) {
        self.ops.push(Op::Font(font.to_owned()));
    }

    fn begin_path(&mut self) {
        self.ops.push(Op::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::LineTo(x, y));
    }

    fn close_path(&mut self) {
        self.ops.push(Op::ClosePath);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(Op::Rect(x, y, width, height));
    }

    fn circle(&mut self, cx: f64, cy: f64, radius: f64) -> Result<(), RenderError> {
        self.ops.push(Op::Circle(cx, cy, radius));
        Ok(())
    }

    fn ellipse(&mut self, cx: f64, cy: f64, radius_x: f64, radius_y: f64) -> Result<(), RenderError> {
        self.ops.push(Op::Ellipse(cx, cy, radius_x, radius_y));
        Ok(())
    }

    fn fill(&mut self) {
        self.ops.push(Op::Fill);
    }

    fn stroke(&mut self) {
        self.ops.push(Op::Stroke);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), RenderError> {
        if self.fail_text {
            return Err(RenderError::Canvas("text failed".into()));
        }
        self.ops.push(Op::FillText(text.to_owned(), x, y));
        Ok(())
    }
}
