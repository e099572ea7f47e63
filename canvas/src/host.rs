//! The host collaborator: whatever embeds the editor (a node-graph UI, a
//! test harness, the CLI replayer).
//!
//! The engine never reaches into the host. The host forwards its lifecycle
//! events to [`crate::engine::Engine`] methods, and the engine answers
//! through this trait.

use crate::codec::PersistedState;
use crate::input::Cursor;
use crate::render::RenderSnapshot;

/// Reason the host could not provide an image.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageLoadError {
    /// No image with that name exists.
    #[error("image not found: {0}")]
    NotFound(String),
    /// The bytes arrived but could not be decoded as a raster.
    #[error("image decode failed: {0}")]
    Decode(String),
    /// The fetch itself failed.
    #[error("image transport failed: {0}")]
    Transport(String),
}

pub trait Host {
    /// Store the persisted field(s). Called after every mutation.
    fn persist(&mut self, state: &PersistedState);

    /// Draw `snapshot`. Called at most once per handled event, and never
    /// before the host has signalled ready.
    fn request_render(&mut self, snapshot: &RenderSnapshot);

    /// Update the pointer cursor.
    fn set_cursor(&mut self, cursor: Cursor);

    /// Start fetching image `name`. The host reports back through
    /// [`crate::engine::Engine::image_loaded`] or
    /// [`crate::engine::Engine::image_failed`], in any later event turn.
    fn request_image(&mut self, name: &str);
}

/// A host that records everything it is asked to do.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub persisted: Vec<PersistedState>,
    pub renders: Vec<RenderSnapshot>,
    pub cursors: Vec<Cursor>,
    pub image_requests: Vec<String>,
}

impl RecordingHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent persisted state, if any.
    #[must_use]
    pub fn last_persisted(&self) -> Option<&PersistedState> {
        self.persisted.last()
    }

    /// Most recent render, if any.
    #[must_use]
    pub fn last_render(&self) -> Option<&RenderSnapshot> {
        self.renders.last()
    }
}

impl Host for RecordingHost {
    fn persist(&mut self, state: &PersistedState) {
        self.persisted.push(state.clone());
    }

    fn request_render(&mut self, snapshot: &RenderSnapshot) {
        self.renders.push(snapshot.clone());
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursors.push(cursor);
    }

    fn request_image(&mut self, name: &str) {
        self.image_requests.push(name.to_owned());
    }
}
