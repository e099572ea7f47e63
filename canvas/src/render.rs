//! Render model: a read-only snapshot of what the host should draw.
//!
//! This module never produces pixels. It turns the region set, the UI state,
//! and the viewport into display-space geometry plus style descriptors, in
//! draw order, and the host's drawing routine consumes that. Styling lives
//! here only: hit-testing and the state machine never look at colors.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::config::EditorConfig;
use crate::consts::SUBTRACT_DASH_PX;
use crate::doc::{Region, RegionMode, RegionSet};
use crate::geom::{Point, Size};
use crate::hit::VertexRef;
use crate::input::{Cursor, Hover, InputState, UiState};
use crate::viewport::Viewport;

/// One entry of the per-region color table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub line: &'static str,
    pub line_hover: &'static str,
    pub fill: &'static str,
    pub point: &'static str,
    pub border: &'static str,
}

/// Region colors, indexed by region index modulo the table length.
pub const PALETTE: [Palette; 6] = [
    Palette {
        name: "Blue",
        line: "#4488ff",
        line_hover: "#66aaff",
        fill: "rgba(68, 136, 255, 0.5)",
        point: "#4488ff",
        border: "#0044aa",
    },
    Palette {
        name: "Red",
        line: "#ff4444",
        line_hover: "#ff6666",
        fill: "rgba(255, 68, 68, 0.5)",
        point: "#ff4444",
        border: "#aa0000",
    },
    Palette {
        name: "Green",
        line: "#44dd44",
        line_hover: "#66ff66",
        fill: "rgba(68, 221, 68, 0.5)",
        point: "#44dd44",
        border: "#00aa00",
    },
    Palette {
        name: "Yellow",
        line: "#dddd44",
        line_hover: "#ffff66",
        fill: "rgba(221, 221, 68, 0.5)",
        point: "#dddd44",
        border: "#aaaa00",
    },
    Palette {
        name: "Magenta",
        line: "#dd44dd",
        line_hover: "#ff66ff",
        fill: "rgba(221, 68, 221, 0.5)",
        point: "#dd44dd",
        border: "#aa00aa",
    },
    Palette {
        name: "Cyan",
        line: "#44dddd",
        line_hover: "#66ffff",
        fill: "rgba(68, 221, 221, 0.5)",
        point: "#44dddd",
        border: "#00aaaa",
    },
];

/// Whether a region is the one being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Active,
    Inactive,
}

/// How a region's interior is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPattern {
    Solid,
    /// Subtract regions are hatched so they read as holes.
    Hatched,
}

/// Everything the host needs to paint one region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleDescriptor {
    pub palette: Palette,
    pub opacity: f64,
    pub fill: FillPattern,
    /// Outline dash (on, off); `None` is a solid outline.
    pub dash: Option<(f64, f64)>,
    pub line_width: f64,
    pub line_hover_width: f64,
    pub vertex_radius: f64,
    /// Radius for hovered or dragged vertices.
    pub vertex_hover_radius: f64,
}

/// Style for region `index` in `mode`.
#[must_use]
pub fn style_for(index: usize, mode: RegionMode, emphasis: Emphasis, config: &EditorConfig) -> StyleDescriptor {
    let (fill, dash) = match mode {
        RegionMode::Add => (FillPattern::Solid, None),
        RegionMode::Subtract => (FillPattern::Hatched, Some(SUBTRACT_DASH_PX)),
    };
    StyleDescriptor {
        palette: PALETTE[index % PALETTE.len()],
        opacity: match emphasis {
            Emphasis::Active => 1.0,
            Emphasis::Inactive => config.inactive_opacity,
        },
        fill,
        dash,
        line_width: config.line_width,
        line_hover_width: config.line_hover_width,
        vertex_radius: config.vertex_radius,
        vertex_hover_radius: config.vertex_hit_radius,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeView {
    pub index: usize,
    pub a: Point,
    pub b: Point,
    pub hovered: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VertexView {
    pub index: usize,
    /// One-based label drawn inside the marker.
    pub label: usize,
    pub pos: Point,
    /// Hovered or being dragged.
    pub highlighted: bool,
}

/// Display-space view of one non-empty region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionView {
    pub index: usize,
    pub mode: RegionMode,
    pub active: bool,
    /// Vertices in display space, for the fill path.
    pub outline: Vec<Point>,
    /// Three or more vertices: the host fills `outline`.
    pub fill_eligible: bool,
    pub edges: Vec<EdgeView>,
    pub vertices: Vec<VertexView>,
    pub style: StyleDescriptor,
}

/// Full frame for the host's drawing routine.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub display: Size,
    /// No image: the host draws its "Upload an image" placeholder and
    /// `regions` is empty.
    pub placeholder: bool,
    /// `"{width} × {height}"` of the loaded image.
    pub resolution_label: Option<String>,
    /// Non-empty regions in draw order: inactive by index, then the active one.
    pub regions: Vec<RegionView>,
    pub cursor: Cursor,
}

/// State of one region-selector button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub index: usize,
    pub label: String,
    pub palette: Palette,
    pub active: bool,
    /// Non-active and empty.
    pub dimmed: bool,
}

/// Build the snapshot for the current state.
#[must_use]
pub fn snapshot(
    set: &RegionSet,
    ui: &UiState,
    input: InputState,
    viewport: &Viewport,
    config: &EditorConfig,
) -> RenderSnapshot {
    let active = ui.active_region;
    let order = (0..set.len()).filter(|&i| i != active).chain(std::iter::once(active));

    // Without a frame there is no display mapping; stored regions stay
    // untouched but only the placeholder is drawn.
    let regions = if viewport.has_image() {
        order
            .filter_map(|i| set.get(i).map(|r| (i, r)))
            .filter(|(_, r)| !r.is_empty())
            .map(|(i, r)| region_view(i, r, i == active, ui.hover, input.dragged(), viewport, config))
            .collect()
    } else {
        Vec::new()
    };

    let frame = viewport.frame;
    RenderSnapshot {
        display: viewport.display,
        placeholder: !viewport.has_image(),
        resolution_label: viewport
            .has_image()
            .then(|| format!("{} × {}", frame.width, frame.height)),
        regions,
        cursor: ui.hover.cursor(),
    }
}

fn region_view(
    index: usize,
    region: &Region,
    active: bool,
    hover: Hover,
    dragged: Option<VertexRef>,
    viewport: &Viewport,
    config: &EditorConfig,
) -> RegionView {
    let emphasis = if active { Emphasis::Active } else { Emphasis::Inactive };
    let outline: Vec<Point> = region.points.iter().map(|&p| viewport.image_to_display(p)).collect();

    let edges = region
        .edges()
        .map(|(i, a, b)| EdgeView {
            index: i,
            a: viewport.image_to_display(a),
            b: viewport.image_to_display(b),
            hovered: active && hover == Hover::Edge(i),
        })
        .collect();

    let vertices = outline
        .iter()
        .enumerate()
        .map(|(i, &pos)| {
            let this = VertexRef::new(index, i);
            VertexView {
                index: i,
                label: i + 1,
                pos,
                highlighted: hover == Hover::Vertex(this) || dragged == Some(this),
            }
        })
        .collect();

    RegionView {
        index,
        mode: region.mode,
        active,
        fill_eligible: region.is_fill_eligible(),
        outline,
        edges,
        vertices,
        style: style_for(index, region.mode, emphasis, config),
    }
}

/// One selector button per region: the active one highlighted, empty
/// inactive ones dimmed.
#[must_use]
pub fn selector_buttons(set: &RegionSet, ui: &UiState) -> Vec<ButtonState> {
    set.regions()
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let active = i == ui.active_region;
            ButtonState {
                index: i,
                label: (i + 1).to_string(),
                palette: PALETTE[i % PALETTE.len()],
                active,
                dimmed: !active && r.is_empty(),
            }
        })
        .collect()
}
