//! Input model: mouse buttons, hover targets, cursor hints, and the gesture
//! state machine.
//!
//! `InputState` is the gesture tracked between pointer-down and pointer-up.
//! A vertex drag is the only multi-event gesture; every other press mutates
//! the region set immediately and leaves the machine idle. While a drag is in
//! progress the dragged vertex has a single writer: no other transition can
//! reach it until pointer-up returns the machine to `Idle`.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::Deserialize;

use crate::hit::VertexRef;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// What the pointer is resting over while no gesture is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hover {
    #[default]
    None,
    /// A vertex in any region.
    Vertex(VertexRef),
    /// An edge of the active region, by edge index.
    Edge(usize),
}

impl Hover {
    /// Cursor hint matching this hover target.
    #[must_use]
    pub fn cursor(self) -> Cursor {
        match self {
            Self::None => Cursor::Crosshair,
            Self::Vertex(_) => Cursor::Pointer,
            Self::Edge(_) => Cursor::Insert,
        }
    }
}

/// Cursor hint for the host. The host picks the concrete visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    /// Empty space: a click appends a vertex.
    #[default]
    Crosshair,
    /// Over a vertex: it can be dragged or deleted.
    Pointer,
    /// Over an active-region edge: a click inserts a vertex.
    Insert,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiState {
    /// Region receiving appends and inserts.
    pub active_region: usize,
    /// Current hover target.
    pub hover: Hover,
    /// Whether the host signalled that layout and image plumbing are up.
    pub ready: bool,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving one vertex.
    DraggingVertex(VertexRef),
}

impl InputState {
    /// The vertex being dragged, if any.
    #[must_use]
    pub fn dragged(self) -> Option<VertexRef> {
        match self {
            Self::Idle => None,
            Self::DraggingVertex(v) => Some(v),
        }
    }
}
