//! Rendering: replays the visible history onto a [`Surface`].
//!
//! Rendering is a pure read of the log. Every call clears the full region and
//! replays from the first visible action, so the output depends only on the
//! actions and the cursor; calling it twice produces the same pixels. Each
//! action is framed by save/restore, so composite mode, colors, and line width
//! set for one action never leak into the next.
//!
//! Fallible surface calls propagate as `Result<(), RenderError>`. The caller
//! ([`crate::engine::Engine::render`]) decides how to report the failure.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::action::{Action, Freehand, Shape, Stroke, Text};
use crate::consts::{FALLBACK_COLOR, FONT_FAMILY, TRANSPARENT};
use crate::geometry::{self, Path};
use crate::surface::{Composite, RenderError, Surface};

/// Clear `width × height` and replay `visible` in order, then draw `preview` on top.
///
/// A [`Action::Clear`] in the sequence re-clears the region; later actions
/// still draw over it.
///
/// # Errors
///
/// Returns the first surface error; the remaining actions are not drawn.
pub fn draw<S: Surface + ?Sized>(
    surface: &mut S,
    width: f64,
    height: f64,
    visible: &[Action],
    preview: Option<&Action>,
) -> Result<(), RenderError> {
    surface.clear_rect(0.0, 0.0, width, height);

    for action in visible {
        if let Action::Clear { .. } = action {
            surface.clear_rect(0.0, 0.0, width, height);
        } else {
            draw_action(surface, action)?;
        }
    }

    if let Some(action) = preview {
        draw_action(surface, action)?;
    }
    Ok(())
}

/// Draw a single action with its own stored style, isolated by save/restore.
///
/// Clear actions are a no-op here; only [`draw`] knows the region to clear.
///
/// # Errors
///
/// Returns `Err` if a surface call fails. The paint state is restored either way.
pub fn draw_action<S: Surface + ?Sized>(surface: &mut S, action: &Action) -> Result<(), RenderError> {
    surface.save();
    let result = match action {
        Action::Stroke(stroke) => draw_stroke(surface, stroke),
        Action::Shape(shape) => draw_shape(surface, shape),
        Action::Text(text) => draw_text(surface, text),
        Action::Clear { .. } => Ok(()),
    };
    surface.restore();
    result
}

// =============================================================
// Action renderers
// =============================================================

fn draw_stroke<S: Surface + ?Sized>(surface: &mut S, stroke: &Stroke) -> Result<(), RenderError> {
    if stroke.points.is_empty() {
        return Ok(());
    }
    let composite = match stroke.tool {
        Freehand::Eraser => Composite::DestinationOut,
        Freehand::Pencil | Freehand::Brush => Composite::SourceOver,
    };
    apply_paint(surface, composite, &stroke.stroke_color, stroke.fill_color.as_deref(), stroke.size)?;

    trace(surface, &geometry::freehand_path(&stroke.points))?;
    surface.stroke();
    Ok(())
}

fn draw_shape<S: Surface + ?Sized>(surface: &mut S, shape: &Shape) -> Result<(), RenderError> {
    let fill = shape.fill();
    apply_paint(surface, Composite::SourceOver, &shape.stroke_color, fill, shape.size)?;

    let path = geometry::shape_path(shape.kind, shape.anchor(), shape.cursor());
    trace(surface, &path)?;
    // Fill first so the outline stays crisp.
    if fill.is_some() && path.is_closed() {
        surface.fill();
    }
    surface.stroke();
    Ok(())
}

fn draw_text<S: Surface + ?Sized>(surface: &mut S, text: &Text) -> Result<(), RenderError> {
    surface.set_composite(Composite::SourceOver)?;
    let color = if text.color.is_empty() { FALLBACK_COLOR } else { &text.color };
    surface.set_fill_color(color);
    surface.set_font(&format!("{}px {FONT_FAMILY}", text.size));
    surface.fill_text(&text.text, text.position.x, text.position.y)
}

// =============================================================
// Helpers
// =============================================================

fn apply_paint<S: Surface + ?Sized>(
    surface: &mut S,
    composite: Composite,
    stroke: &str,
    fill: Option<&str>,
    size: f64,
) -> Result<(), RenderError> {
    surface.set_composite(composite)?;
    surface.set_stroke_color(if stroke.is_empty() { FALLBACK_COLOR } else { stroke });
    surface.set_fill_color(fill.unwrap_or(TRANSPARENT));
    surface.set_line_width(size);
    surface.set_round_line_ends();
    Ok(())
}

/// Add `path` to the surface as a fresh sub-path.
fn trace<S: Surface + ?Sized>(surface: &mut S, path: &Path) -> Result<(), RenderError> {
    surface.begin_path();
    match path {
        Path::Rect { x, y, width, height } => surface.rect(*x, *y, *width, *height),
        Path::Circle { center, radius } => surface.circle(center.x, center.y, *radius)?,
        Path::Ellipse { center, radius_x, radius_y } => {
            surface.ellipse(center.x, center.y, *radius_x, *radius_y)?;
        }
        Path::Polygon(points) => {
            if polyline(surface, points) {
                surface.close_path();
            }
        }
        Path::Polyline(points) => {
            polyline(surface, points);
        }
    }
    Ok(())
}

/// Move to the first point and line through the rest. Returns false when empty.
fn polyline<S: Surface + ?Sized>(surface: &mut S, points: &[geometry::Point]) -> bool {
    let Some((first, rest)) = points.split_first() else {
        return false;
    };
    surface.move_to(first.x, first.y);
    for p in rest {
        surface.line_to(p.x, p.y);
    }
    true
}
