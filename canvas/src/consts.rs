//! Shared numeric constants for the canvas crate.

// ── Region set ──────────────────────────────────────────────────

/// Number of regions in the multi-region editor.
pub const MULTI_REGION_COUNT: usize = 6;

// ── Hit-testing ─────────────────────────────────────────────────

/// Display-space radius within which a vertex counts as hit. Matches the
/// hovered marker radius so the whole enlarged dot is grabbable.
pub const VERTEX_HIT_RADIUS_PX: f64 = 14.0;

/// Display-space distance within which an edge counts as hit.
pub const EDGE_HIT_DISTANCE_PX: f64 = 8.0;

// ── Styling ─────────────────────────────────────────────────────

/// Resting vertex marker radius in display pixels.
pub const VERTEX_RADIUS_PX: f64 = 10.0;

/// Resting edge stroke width in display pixels.
pub const LINE_WIDTH_PX: f64 = 2.0;

/// Hovered edge stroke width in display pixels.
pub const LINE_HOVER_WIDTH_PX: f64 = 5.0;

/// Opacity applied to every region that is not the active one.
pub const INACTIVE_OPACITY: f64 = 0.4;

/// Dash pattern (on, off) for subtract-mode outlines, in display pixels.
pub const SUBTRACT_DASH_PX: (f64, f64) = (6.0, 4.0);

// ── Layout ──────────────────────────────────────────────────────

/// Node title bar height.
pub const HEADER_HEIGHT_PX: f64 = 26.0;

/// Height taken by the host widgets stacked above the canvas.
pub const WIDGETS_ABOVE_PX: f64 = 180.0;

/// Room reserved below the canvas for the resolution label.
pub const RES_LABEL_AREA_PX: f64 = 40.0;

/// Horizontal padding between the node border and the canvas.
pub const SIDE_PADDING_PX: f64 = 30.0;

/// Lower bound on either axis of the available layout area.
pub const MIN_AVAILABLE_PX: f64 = 80.0;

/// Lower bound on either axis of a fitted display when an image is loaded.
pub const MIN_DISPLAY_PX: f64 = 50.0;

/// Display height cap while no image is loaded.
pub const PLACEHOLDER_MAX_HEIGHT_PX: f64 = 150.0;

/// Node size assumed until the host reports its first resize.
pub const DEFAULT_NODE_SIZE_PX: (f64, f64) = (280.0, 480.0);
