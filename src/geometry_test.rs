#![allow(clippy::float_cmp)]

use super::*;

const EPS: f64 = 1e-9;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

fn polygon(path: &Path) -> &[Point] {
    match path {
        Path::Polygon(points) => points,
        other => panic!("expected polygon, got {other:?}"),
    }
}

// =============================================================
// Point
// =============================================================

#[test]
fn point_distance_is_euclidean() {
    assert_eq!(pt(0.0, 0.0).distance(pt(3.0, 4.0)), 5.0);
}

#[test]
fn point_midpoint() {
    assert_eq!(pt(10.0, 10.0).midpoint(pt(50.0, 30.0)), pt(30.0, 20.0));
}

#[test]
fn point_finite_check() {
    assert!(pt(1.0, 2.0).is_finite());
    assert!(!pt(f64::NAN, 2.0).is_finite());
    assert!(!pt(1.0, f64::INFINITY).is_finite());
}

// =============================================================
// Rectangle / circle / ellipse / line
// =============================================================

#[test]
fn rectangle_spans_anchor_to_cursor() {
    let path = shape_path(ShapeKind::Rectangle, pt(10.0, 10.0), pt(50.0, 30.0));
    assert_eq!(path, Path::Rect { x: 10.0, y: 10.0, width: 40.0, height: 20.0 });
}

#[test]
fn rectangle_allows_negative_extent() {
    let path = shape_path(ShapeKind::Rectangle, pt(50.0, 30.0), pt(10.0, 10.0));
    assert_eq!(path, Path::Rect { x: 50.0, y: 30.0, width: -40.0, height: -20.0 });
}

#[test]
fn circle_radius_is_distance_to_cursor() {
    let path = shape_path(ShapeKind::Circle, pt(0.0, 0.0), pt(3.0, 4.0));
    assert_eq!(path, Path::Circle { center: pt(0.0, 0.0), radius: 5.0 });
}

#[test]
fn ellipse_is_inscribed_in_drag_box() {
    let path = shape_path(ShapeKind::Ellipse, pt(40.0, 10.0), pt(0.0, 30.0));
    assert_eq!(path, Path::Ellipse { center: pt(20.0, 20.0), radius_x: 20.0, radius_y: 10.0 });
}

#[test]
fn line_is_open_two_point_polyline() {
    let path = shape_path(ShapeKind::Line, pt(1.0, 2.0), pt(3.0, 4.0));
    assert_eq!(path, Path::Polyline(vec![pt(1.0, 2.0), pt(3.0, 4.0)]));
    assert!(!path.is_closed());
    assert!(!ShapeKind::Line.is_closed());
}

#[test]
fn zero_size_shapes_still_produce_paths() {
    let p = pt(5.0, 5.0);
    assert_eq!(shape_path(ShapeKind::Circle, p, p), Path::Circle { center: p, radius: 0.0 });
    let hex = shape_path(ShapeKind::Hexagon, p, p);
    assert!(polygon(&hex).iter().all(|v| *v == p));
}

// =============================================================
// Triangle
// =============================================================

#[test]
fn triangle_base_on_cursor_row_apex_above_anchor_row() {
    let path = shape_path(ShapeKind::Triangle, pt(0.0, 100.0), pt(40.0, 120.0));
    let v = polygon(&path);
    assert_eq!(v.len(), 3);
    assert_eq!(v[0], pt(0.0, 120.0));
    assert_eq!(v[1], pt(40.0, 120.0));
    assert!(approx(v[2].x, 20.0));
    assert!(approx(v[2].y, 100.0 - 40.0 * 3f64.sqrt() / 2.0));
}

// =============================================================
// Regular polygons and star
// =============================================================

#[test]
fn hexagon_vertices_sit_on_circumradius() {
    let path = shape_path(ShapeKind::Hexagon, pt(0.0, 0.0), pt(200.0, 200.0));
    let v = polygon(&path);
    assert_eq!(v.len(), 6);
    let center = pt(100.0, 100.0);
    for vertex in v {
        assert!(approx(vertex.distance(center), 100.0), "vertex {vertex:?}");
    }
}

#[test]
fn polygon_starts_at_top() {
    let path = shape_path(ShapeKind::Pentagon, pt(0.0, 0.0), pt(100.0, 100.0));
    let v = polygon(&path);
    assert_eq!(v.len(), 5);
    assert!(approx(v[0].x, 50.0));
    assert!(approx(v[0].y, 0.0));
}

#[test]
fn polygon_radius_uses_shorter_side() {
    let path = shape_path(ShapeKind::Pentagon, pt(0.0, 0.0), pt(300.0, 100.0));
    let center = pt(150.0, 50.0);
    for vertex in polygon(&path) {
        assert!(approx(vertex.distance(center), 50.0));
    }
}

#[test]
fn star_alternates_outer_and_inner_radius() {
    let path = shape_path(ShapeKind::Star, pt(0.0, 0.0), pt(100.0, 100.0));
    let v = polygon(&path);
    assert_eq!(v.len(), 10);
    let center = pt(50.0, 50.0);
    for (i, vertex) in v.iter().enumerate() {
        let expected = if i % 2 == 0 { 50.0 } else { 25.0 };
        assert!(approx(vertex.distance(center), expected), "vertex {i}");
    }
    assert!(approx(v[0].x, 50.0));
    assert!(approx(v[0].y, 0.0));
}

#[test]
fn closed_kinds() {
    for kind in [
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Ellipse,
        ShapeKind::Triangle,
        ShapeKind::Pentagon,
        ShapeKind::Hexagon,
        ShapeKind::Star,
    ] {
        assert!(kind.is_closed(), "{kind:?}");
        assert!(shape_path(kind, pt(0.0, 0.0), pt(10.0, 10.0)).is_closed());
    }
}

// =============================================================
// Freehand
// =============================================================

#[test]
fn freehand_is_open_polyline_in_order() {
    let points = [pt(0.0, 0.0), pt(5.0, 5.0), pt(10.0, 10.0)];
    let path = freehand_path(&points);
    assert_eq!(path, Path::Polyline(points.to_vec()));
    assert!(!path.is_closed());
}

#[test]
fn shape_kind_serde_names() {
    let json = serde_json::to_string(&ShapeKind::Pentagon).unwrap();
    assert_eq!(json, "\"pentagon\"");
    let back: ShapeKind = serde_json::from_str("\"star\"").unwrap();
    assert_eq!(back, ShapeKind::Star);
}
