use tracing::{debug, info, warn};

use crate::codec::{self, PersistedState};
use crate::config::EditorConfig;
use crate::consts::DEFAULT_NODE_SIZE_PX;
use crate::doc::{Region, RegionMode, RegionSet};
use crate::geom::{ImageFrame, Point, Size};
use crate::hit::{self, VertexRef};
use crate::host::{Host, ImageLoadError};
use crate::input::{Button, Cursor, Hover, InputState, UiState};
use crate::render::{self, ButtonState, RenderSnapshot};
use crate::viewport::{self, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The persisted field changed and should be written back.
    Persist(PersistedState),
    SetCursor(Cursor),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on a host.
///
/// Separated from `Engine` so it can be tested without any host plumbing.
pub struct EngineCore {
    pub regions: RegionSet,
    pub ui: UiState,
    pub input: InputState,
    pub viewport: Viewport,
    pub config: EditorConfig,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self {
            regions: RegionSet::new(config.region_count),
            ui: UiState::default(),
            input: InputState::default(),
            viewport: Viewport::default(),
            config,
        }
    }

    // --- Data inputs ---

    /// Hydrate from persisted state. Malformed polygon data leaves the
    /// regions as they were; the active index is clamped into range. Any
    /// gesture or hover in progress is dropped.
    pub fn load(&mut self, state: &PersistedState) -> Vec<Action> {
        let copied = codec::decode_into(&state.polygon_data, &mut self.regions);
        self.ui.active_region = state.active_region.min(self.regions.len() - 1);
        self.input = InputState::Idle;
        debug!(copied, active = self.ui.active_region, "loaded persisted state");
        self.clear_hover()
    }

    /// Current persisted form of the editor.
    #[must_use]
    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            polygon_data: codec::encode(&self.regions),
            active_region: self.ui.active_region,
        }
    }

    /// Replace the image frame. Stored points are untouched; only the
    /// display mapping changes, which invalidates the hover target.
    pub fn set_frame(&mut self, frame: ImageFrame) -> Vec<Action> {
        if self.viewport.frame == frame {
            return Vec::new();
        }
        self.viewport.frame = frame;
        let mut actions = self.clear_hover();
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Replace the display size.
    pub fn set_display(&mut self, display: Size) -> Vec<Action> {
        if self.viewport.display == display {
            return Vec::new();
        }
        self.viewport.display = display;
        let mut actions = self.clear_hover();
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Commands ---

    /// Make `region` the target for appends and inserts.
    pub fn select_region(&mut self, region: usize) -> Vec<Action> {
        if region >= self.regions.len() {
            warn!(region, len = self.regions.len(), "select: region out of range");
            return Vec::new();
        }
        self.ui.active_region = region;
        let mut actions = Vec::new();
        if matches!(self.ui.hover, Hover::Edge(_)) {
            actions.extend(self.clear_hover());
        }
        actions.push(self.persist());
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Set the add/subtract designation of `region`.
    pub fn set_mode(&mut self, region: usize, mode: RegionMode) -> Vec<Action> {
        if !self.regions.set_mode(region, mode) {
            return Vec::new();
        }
        debug!(region, ?mode, "mode changed");
        vec![self.persist(), Action::RenderNeeded]
    }

    /// Remove every vertex of `region`.
    pub fn clear_region(&mut self, region: usize) -> Vec<Action> {
        if !self.regions.clear_region(region) {
            warn!(region, "clear: region out of range");
            return Vec::new();
        }
        if self.input.dragged().is_some_and(|v| v.region == region) {
            self.input = InputState::Idle;
        }
        debug!(region, "region cleared");
        let mut actions = self.clear_hover();
        actions.push(self.persist());
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Remove every vertex of every region.
    pub fn clear_all(&mut self) -> Vec<Action> {
        self.regions.clear_all();
        self.input = InputState::Idle;
        debug!("all regions cleared");
        let mut actions = self.clear_hover();
        actions.push(self.persist());
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Input events ---

    /// Handle a press at display position `pos`.
    pub fn on_pointer_down(&mut self, pos: Point, button: Button) -> Vec<Action> {
        if !self.viewport.has_image() || self.input != InputState::Idle {
            return Vec::new();
        }
        let vertex = self.vertex_at(pos);

        match (button, vertex) {
            (Button::Secondary, Some(v)) => self.delete_vertex(v),
            (Button::Primary, Some(v)) => {
                debug!(region = v.region, index = v.index, "drag start");
                self.input = InputState::DraggingVertex(v);
                vec![Action::RenderNeeded]
            }
            (Button::Primary, None) => {
                let ip = self.viewport.display_to_image(pos);
                match self.edge_at(pos) {
                    Some(edge) => self.insert_vertex(edge + 1, ip),
                    None => self.append_vertex(ip),
                }
            }
            _ => Vec::new(),
        }
    }

    /// Handle pointer motion at display position `pos`.
    pub fn on_pointer_move(&mut self, pos: Point) -> Vec<Action> {
        if !self.viewport.has_image() {
            return Vec::new();
        }
        match self.input {
            InputState::DraggingVertex(v) => self.drag_to(v, pos),
            InputState::Idle => self.update_hover(pos),
        }
    }

    /// Handle a release. Ends a drag and commits it.
    pub fn on_pointer_up(&mut self, _pos: Point, _button: Button) -> Vec<Action> {
        let InputState::DraggingVertex(v) = self.input else {
            return Vec::new();
        };
        self.input = InputState::Idle;
        debug!(region = v.region, index = v.index, "drag end");
        vec![self.persist(), Action::RenderNeeded]
    }

    /// The pointer left the surface. Hover is dropped; a drag keeps going
    /// until the release arrives.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        let mut actions = self.clear_hover();
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Queries ---

    #[must_use]
    pub fn active_region(&self) -> usize {
        self.ui.active_region
    }

    #[must_use]
    pub fn hover(&self) -> Hover {
        self.ui.hover
    }

    #[must_use]
    pub fn snapshot(&self) -> RenderSnapshot {
        render::snapshot(&self.regions, &self.ui, self.input, &self.viewport, &self.config)
    }

    #[must_use]
    pub fn selector_buttons(&self) -> Vec<ButtonState> {
        render::selector_buttons(&self.regions, &self.ui)
    }

    // --- Transitions ---

    fn vertex_at(&self, pos: Point) -> Option<VertexRef> {
        hit::find_vertex_at(&self.regions, self.ui.active_region, &self.viewport, pos, self.config.vertex_hit_radius)
    }

    fn edge_at(&self, pos: Point) -> Option<usize> {
        hit::find_edge_at(&self.regions, self.ui.active_region, &self.viewport, pos, self.config.edge_hit_distance)
    }

    fn delete_vertex(&mut self, v: VertexRef) -> Vec<Action> {
        if self.regions.remove_point(v.region, v.index).is_none() {
            warn!(region = v.region, index = v.index, "delete: stale vertex");
            return Vec::new();
        }
        debug!(region = v.region, index = v.index, "vertex deleted");
        let mut actions = self.clear_hover();
        actions.push(self.persist());
        actions.push(Action::RenderNeeded);
        actions
    }

    fn insert_vertex(&mut self, at: usize, ip: Point) -> Vec<Action> {
        let region = self.ui.active_region;
        if !self.regions.insert_point(region, at, ip) {
            warn!(region, index = at, "insert: stale edge");
            return Vec::new();
        }
        debug!(region, index = at, "vertex inserted");
        let mut actions = self.clear_hover();
        actions.push(self.persist());
        actions.push(Action::RenderNeeded);
        actions
    }

    fn append_vertex(&mut self, ip: Point) -> Vec<Action> {
        let region = self.ui.active_region;
        if !self.regions.push_point(region, ip) {
            warn!(region, "append: region out of range");
            return Vec::new();
        }
        debug!(region, len = self.regions.get(region).map_or(0, Region::len), "vertex appended");
        vec![self.persist(), Action::RenderNeeded]
    }

    fn drag_to(&mut self, v: VertexRef, pos: Point) -> Vec<Action> {
        let ip = self.viewport.display_to_image_clamped(pos);
        if !self.regions.set_point(v.region, v.index, ip) {
            warn!(region = v.region, index = v.index, "drag: stale vertex; ending drag");
            self.input = InputState::Idle;
            return Vec::new();
        }
        vec![Action::RenderNeeded]
    }

    fn update_hover(&mut self, pos: Point) -> Vec<Action> {
        let hover = match self.vertex_at(pos) {
            Some(v) => Hover::Vertex(v),
            None => self.edge_at(pos).map_or(Hover::None, Hover::Edge),
        };
        if hover == self.ui.hover {
            return Vec::new();
        }
        self.ui.hover = hover;
        vec![Action::SetCursor(hover.cursor()), Action::RenderNeeded]
    }

    fn clear_hover(&mut self) -> Vec<Action> {
        if self.ui.hover == Hover::None {
            return Vec::new();
        }
        self.ui.hover = Hover::None;
        vec![Action::SetCursor(Cursor::Crosshair)]
    }

    fn persist(&self) -> Action {
        Action::Persist(self.persisted_state())
    }
}

/// The editor controller. Owns an `EngineCore` and the host it reports to.
///
/// Every host lifecycle event arrives through a method here; the resulting
/// actions are dispatched to the host before the method returns, with at
/// most one render per event.
pub struct Engine<H: Host> {
    pub core: EngineCore,
    host: H,
    node_size: Size,
    image_name: Option<String>,
}

impl<H: Host> Engine<H> {
    /// Create an editor bound to `host`.
    #[must_use]
    pub fn new(config: EditorConfig, host: H) -> Self {
        let (width, height) = DEFAULT_NODE_SIZE_PX;
        Self {
            core: EngineCore::new(config),
            host,
            node_size: Size::new(width, height),
            image_name: None,
        }
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // --- Lifecycle ---

    /// The host created the editor, optionally with previously stored state.
    pub fn created(&mut self, persisted: Option<&PersistedState>) {
        let mut actions = persisted.map(|state| self.core.load(state)).unwrap_or_default();
        actions.extend(self.relayout());
        self.dispatch(actions);
    }

    /// Host layout and image plumbing are up; the first render happens here.
    pub fn ready(&mut self) {
        self.core.ui.ready = true;
        let mut actions = self.relayout();
        actions.push(Action::RenderNeeded);
        self.dispatch(actions);
    }

    /// The host node changed size.
    pub fn resized(&mut self, node_size: Size) {
        self.node_size = node_size;
        let mut actions = self.relayout();
        actions.push(Action::RenderNeeded);
        self.dispatch(actions);
    }

    /// State for the host to store.
    #[must_use]
    pub fn serialize(&self) -> PersistedState {
        self.core.persisted_state()
    }

    /// The host restored stored state over a live editor.
    pub fn configure(&mut self, state: &PersistedState) {
        let mut actions = self.core.load(state);
        info!(active = self.core.active_region(), "configured from persisted state");
        actions.push(Action::Persist(self.core.persisted_state()));
        actions.push(Action::RenderNeeded);
        self.dispatch(actions);
    }

    /// The user picked image `name`; ask the host to fetch it.
    pub fn image_selected(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        self.image_name = Some(name.to_owned());
        self.host.request_image(name);
    }

    /// The host finished loading image `name`.
    pub fn image_loaded(&mut self, name: &str, frame: ImageFrame) {
        if self.image_name.as_deref() != Some(name) {
            debug!(name, "ignoring stale image load");
            return;
        }
        if frame.is_degenerate() {
            self.image_failed(name, &ImageLoadError::Decode("zero-sized image".to_owned()));
            return;
        }
        info!(name, width = frame.width, height = frame.height, "image loaded");
        let mut actions = self.core.set_frame(frame);
        actions.extend(self.relayout());
        actions.push(Action::RenderNeeded);
        self.dispatch(actions);
    }

    /// The host could not load image `name`. Regions stay, input is ignored
    /// until another image arrives.
    pub fn image_failed(&mut self, name: &str, err: &ImageLoadError) {
        if self.image_name.as_deref() != Some(name) {
            debug!(name, "ignoring stale image failure");
            return;
        }
        info!(name, error = %err, "image unavailable");
        let mut actions = self.core.set_frame(ImageFrame::unset());
        actions.extend(self.relayout());
        actions.push(Action::RenderNeeded);
        self.dispatch(actions);
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, pos: Point, button: Button) {
        let actions = self.core.on_pointer_down(pos, button);
        self.dispatch(actions);
    }

    pub fn on_pointer_move(&mut self, pos: Point) {
        let actions = self.core.on_pointer_move(pos);
        self.dispatch(actions);
    }

    pub fn on_pointer_up(&mut self, pos: Point, button: Button) {
        let actions = self.core.on_pointer_up(pos, button);
        self.dispatch(actions);
    }

    pub fn on_pointer_leave(&mut self) {
        let actions = self.core.on_pointer_leave();
        self.dispatch(actions);
    }

    // --- Commands ---

    pub fn select_region(&mut self, region: usize) {
        let actions = self.core.select_region(region);
        self.dispatch(actions);
    }

    pub fn set_mode(&mut self, region: usize, mode: RegionMode) {
        let actions = self.core.set_mode(region, mode);
        self.dispatch(actions);
    }

    pub fn clear_region(&mut self, region: usize) {
        let actions = self.core.clear_region(region);
        self.dispatch(actions);
    }

    pub fn clear_all(&mut self) {
        let actions = self.core.clear_all();
        self.dispatch(actions);
    }

    // --- Internals ---

    fn relayout(&mut self) -> Vec<Action> {
        let available = viewport::available_area(self.node_size);
        let display = viewport::fit_display(self.core.viewport.frame, available);
        self.core.set_display(display)
    }

    fn dispatch(&mut self, actions: Vec<Action>) {
        let mut render = false;
        for action in actions {
            match action {
                Action::Persist(state) => self.host.persist(&state),
                Action::SetCursor(cursor) => self.host.set_cursor(cursor),
                Action::RenderNeeded => render = true,
            }
        }
        if render && self.core.ui.ready {
            let snapshot = self.core.snapshot();
            self.host.request_render(&snapshot);
        }
    }
}
