//! The 2D drawing surface the render pipeline paints onto.
//!
//! [`Surface`] is the subset of the Canvas2D API the renderer needs. The
//! browser implementation is [`web_sys::CanvasRenderingContext2d`] itself;
//! tests supply a recording implementation. Infallible calls return `()`,
//! calls that can throw in the browser return `Result<(), RenderError>`.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// Error raised while drawing or exporting.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A Canvas2D call threw.
    #[error("canvas call failed: {0}")]
    Canvas(String),
    /// The element has no 2D context.
    #[error("2d context unavailable")]
    ContextUnavailable,
    /// No window/document to create an offscreen canvas in.
    #[error("document unavailable")]
    DocumentUnavailable,
}

impl From<JsValue> for RenderError {
    fn from(value: JsValue) -> Self {
        Self::Canvas(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// Pixel composition mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Composite {
    /// Paint over existing pixels.
    #[default]
    SourceOver,
    /// Clear existing pixels where painted.
    DestinationOut,
}

impl Composite {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SourceOver => "source-over",
            Self::DestinationOut => "destination-out",
        }
    }
}

/// A 2D drawing target with Canvas2D semantics.
pub trait Surface {
    /// Push the current paint state.
    fn save(&mut self);
    /// Pop the paint state pushed by the matching [`Surface::save`].
    fn restore(&mut self);

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Set the composition mode.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the surface rejects the mode.
    fn set_composite(&mut self, op: Composite) -> Result<(), RenderError>;
    fn set_stroke_color(&mut self, color: &str);
    fn set_fill_color(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    /// Round caps and joins.
    fn set_round_line_ends(&mut self);
    fn set_font(&mut self, font: &str);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Add a full circle to the current path.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the surface rejects the arc (e.g. negative radius).
    fn circle(&mut self, cx: f64, cy: f64, radius: f64) -> Result<(), RenderError>;
    /// Add a full axis-aligned ellipse to the current path.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the surface rejects the ellipse.
    fn ellipse(&mut self, cx: f64, cy: f64, radius_x: f64, radius_y: f64) -> Result<(), RenderError>;

    fn fill(&mut self);
    fn stroke(&mut self);
    /// Draw a text run with its baseline origin at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the surface fails to draw the text.
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), RenderError>;
}

impl Surface for CanvasRenderingContext2d {
    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::clear_rect(self, x, y, width, height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
    }

    fn set_composite(&mut self, op: Composite) -> Result<(), RenderError> {
        self.set_global_composite_operation(op.as_str())?;
        Ok(())
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.set_stroke_style_str(color);
    }

    fn set_fill_color(&mut self, color: &str) {
        self.set_fill_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn set_round_line_ends(&mut self) {
        self.set_line_cap("round");
        self.set_line_join("round");
    }

    fn set_font(&mut self, font: &str) {
        CanvasRenderingContext2d::set_font(self, font);
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::move_to(self, x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::line_to(self, x, y);
    }

    fn close_path(&mut self) {
        CanvasRenderingContext2d::close_path(self);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::rect(self, x, y, width, height);
    }

    fn circle(&mut self, cx: f64, cy: f64, radius: f64) -> Result<(), RenderError> {
        self.arc(cx, cy, radius, 0.0, std::f64::consts::TAU)?;
        Ok(())
    }

    fn ellipse(&mut self, cx: f64, cy: f64, radius_x: f64, radius_y: f64) -> Result<(), RenderError> {
        CanvasRenderingContext2d::ellipse(self, cx, cy, radius_x, radius_y, 0.0, 0.0, std::f64::consts::TAU)?;
        Ok(())
    }

    fn fill(&mut self) {
        CanvasRenderingContext2d::fill(self);
    }

    fn stroke(&mut self) {
        CanvasRenderingContext2d::stroke(self);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), RenderError> {
        CanvasRenderingContext2d::fill_text(self, text, x, y)?;
        Ok(())
    }
}
