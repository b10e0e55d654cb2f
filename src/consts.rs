//! Shared numeric constants for the sketchpad crate.

// ── Math ────────────────────────────────────────────────────────

/// π / 5 (36°), the angular step for a 10-vertex star polygon.
pub const FRAC_PI_5: f64 = std::f64::consts::PI / 5.0;

/// √3 / 2, the height of an equilateral triangle per unit of base.
pub const HALF_SQRT_3: f64 = 0.866_025_403_784_438_6;

/// Inner-to-outer radius ratio for the 5-point star.
pub const STAR_INNER_RATIO: f64 = 0.5;

/// Number of vertices on the star outline (outer and inner alternating).
pub const STAR_VERTICES: u32 = 10;

/// Vertex count for the pentagon tool.
pub const PENTAGON_SIDES: u32 = 5;

/// Vertex count for the hexagon tool.
pub const HEXAGON_SIDES: u32 = 6;

// ── Paint ───────────────────────────────────────────────────────

/// Font family used for every text action.
pub const FONT_FAMILY: &str = "sans-serif";

/// Color used when a stored action has no stroke/text color.
pub const FALLBACK_COLOR: &str = "#000000";

/// Fill style used when a stroke or shape has no fill color.
pub const TRANSPARENT: &str = "rgba(0,0,0,0)";

/// Line width applied when a stored action carries no size.
pub const FALLBACK_SIZE: f64 = 1.0;

// ── Export ──────────────────────────────────────────────────────

/// MIME type of the flattened image export.
pub const EXPORT_MIME: &str = "image/png";
