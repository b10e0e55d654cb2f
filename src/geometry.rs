//! Geometry synthesis: turns a tool and its anchor points into a path.
//!
//! Everything here is pure. The renderer asks for a [`Path`] per action and
//! traces it onto the surface; tests check the numbers directly. Shapes are
//! always described by two points, the drag anchor and the current cursor,
//! and each primitive reinterprets that pair in its own way (a circle reads
//! them as center and rim, a polygon as opposite corners of a bounding box).

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

use crate::consts::{FRAC_PI_5, HALF_SQRT_3, HEXAGON_SIDES, PENTAGON_SIDES, STAR_INNER_RATIO, STAR_VERTICES};

/// A point in surface-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are usable numbers.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// The eight geometric primitives a drag can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Ellipse,
    Line,
    Triangle,
    Pentagon,
    Hexagon,
    Star,
}

impl ShapeKind {
    /// Whether the outline encloses an area that can be filled.
    #[must_use]
    pub fn is_closed(self) -> bool {
        !matches!(self, Self::Line)
    }
}

/// A renderable path description.
#[derive(Debug, Clone, PartialEq)]
pub enum Path {
    /// Axis-aligned box; `width`/`height` may be negative.
    Rect { x: f64, y: f64, width: f64, height: f64 },
    /// Full circle.
    Circle { center: Point, radius: f64 },
    /// Axis-aligned full ellipse.
    Ellipse { center: Point, radius_x: f64, radius_y: f64 },
    /// Closed polygon through the vertices in order.
    Polygon(Vec<Point>),
    /// Open polyline through the vertices in order.
    Polyline(Vec<Point>),
}

impl Path {
    /// Whether filling this path is meaningful.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        !matches!(self, Self::Polyline(_))
    }
}

/// Build the path for a shape dragged from `anchor` to `cursor`.
#[must_use]
pub fn shape_path(kind: ShapeKind, anchor: Point, cursor: Point) -> Path {
    match kind {
        ShapeKind::Rectangle => Path::Rect {
            x: anchor.x,
            y: anchor.y,
            width: cursor.x - anchor.x,
            height: cursor.y - anchor.y,
        },
        ShapeKind::Circle => Path::Circle { center: anchor, radius: anchor.distance(cursor) },
        ShapeKind::Ellipse => Path::Ellipse {
            center: anchor.midpoint(cursor),
            radius_x: (cursor.x - anchor.x).abs() / 2.0,
            radius_y: (cursor.y - anchor.y).abs() / 2.0,
        },
        ShapeKind::Line => Path::Polyline(vec![anchor, cursor]),
        ShapeKind::Triangle => Path::Polygon(triangle(anchor, cursor)),
        ShapeKind::Pentagon => Path::Polygon(regular_polygon(anchor, cursor, PENTAGON_SIDES)),
        ShapeKind::Hexagon => Path::Polygon(regular_polygon(anchor, cursor, HEXAGON_SIDES)),
        ShapeKind::Star => Path::Polygon(star(anchor, cursor)),
    }
}

/// Open polyline through a freehand point sequence.
#[must_use]
pub fn freehand_path(points: &[Point]) -> Path {
    Path::Polyline(points.to_vec())
}

/// Base along the cursor's row, apex above the anchor's row.
fn triangle(anchor: Point, cursor: Point) -> Vec<Point> {
    let apex = Point::new(
        (anchor.x + cursor.x) / 2.0,
        anchor.y - (cursor.x - anchor.x).abs() * HALF_SQRT_3,
    );
    vec![Point::new(anchor.x, cursor.y), Point::new(cursor.x, cursor.y), apex]
}

/// Center and circumradius of the largest regular figure inside the drag box.
fn inscribed(anchor: Point, cursor: Point) -> (Point, f64) {
    let radius = (cursor.x - anchor.x).abs().min((cursor.y - anchor.y).abs()) / 2.0;
    (anchor.midpoint(cursor), radius)
}

fn regular_polygon(anchor: Point, cursor: Point, sides: u32) -> Vec<Point> {
    let (center, radius) = inscribed(anchor, cursor);
    let step = TAU / f64::from(sides);
    (0..sides)
        .map(|i| {
            let angle = step.mul_add(f64::from(i), -FRAC_PI_2);
            Point::new(radius.mul_add(angle.cos(), center.x), radius.mul_add(angle.sin(), center.y))
        })
        .collect()
}

fn star(anchor: Point, cursor: Point) -> Vec<Point> {
    let (center, outer) = inscribed(anchor, cursor);
    let inner = outer * STAR_INNER_RATIO;
    (0..STAR_VERTICES)
        .map(|i| {
            let angle = FRAC_PI_5.mul_add(f64::from(i), -FRAC_PI_2);
            let radius = if i % 2 == 0 { outer } else { inner };
            Point::new(radius.mul_add(angle.cos(), center.x), radius.mul_add(angle.sin(), center.y))
        })
        .collect()
}
