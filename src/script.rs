//! JSON-lines event scripts replayed against a headless editor.
//!
//! One event object per line, tagged by `event`:
//!
//! ```text
//! {"event":"frame","width":640,"height":480}
//! {"event":"down","x":12,"y":40}
//! {"event":"down","x":12,"y":40,"button":"secondary"}
//! {"event":"mode","region":2,"mode":"subtract"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::io::BufRead;

use mask_canvas::codec::PersistedState;
use mask_canvas::config::EditorConfig;
use mask_canvas::doc::RegionMode;
use mask_canvas::engine::{Action, EngineCore};
use mask_canvas::geom::{ImageFrame, Point, Size};
use mask_canvas::input::Button;
use serde::Deserialize;
use tracing::{debug, info};

use crate::CliError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Hydrate from stored state, as a host restoring a saved node would.
    Load {
        polygon_data: String,
        #[serde(default)]
        active_region: usize,
    },
    /// Image dimensions. Until a `display` event arrives the image is shown
    /// at its natural size.
    Frame { width: u32, height: u32 },
    Display { width: f64, height: f64 },
    Down {
        x: f64,
        y: f64,
        #[serde(default = "primary")]
        button: Button,
    },
    Move { x: f64, y: f64 },
    Up {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
        #[serde(default = "primary")]
        button: Button,
    },
    Leave,
    Select { region: usize },
    Mode { region: usize, mode: RegionMode },
    Clear { region: usize },
    ClearAll,
}

fn primary() -> Button {
    Button::Primary
}

/// Outcome of a replayed script.
pub struct Replay {
    pub core: EngineCore,
    /// Events applied, not counting skipped lines.
    pub events: usize,
    /// Persist actions emitted along the way.
    pub persists: usize,
}

impl Replay {
    #[must_use]
    pub fn persisted_state(&self) -> PersistedState {
        self.core.persisted_state()
    }
}

/// Parse one script line. `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// Fails when the line is not a known event object.
pub fn parse_line(line: &str) -> Result<Option<Event>, serde_json::Error> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some)
}

/// Apply one event to `core`.
pub fn apply(core: &mut EngineCore, event: Event) -> Vec<Action> {
    match event {
        Event::Load { polygon_data, active_region } => {
            let mut actions = core.load(&PersistedState { polygon_data, active_region });
            actions.push(Action::Persist(core.persisted_state()));
            actions.push(Action::RenderNeeded);
            actions
        }
        Event::Frame { width, height } => {
            let frame = ImageFrame::new(width, height);
            let mut actions = core.set_frame(frame);
            if core.viewport.display.is_degenerate() {
                actions.extend(core.set_display(frame.size()));
            }
            actions
        }
        Event::Display { width, height } => core.set_display(Size::new(width, height)),
        Event::Down { x, y, button } => core.on_pointer_down(Point::new(x, y), button),
        Event::Move { x, y } => core.on_pointer_move(Point::new(x, y)),
        Event::Up { x, y, button } => core.on_pointer_up(Point::new(x, y), button),
        Event::Leave => core.on_pointer_leave(),
        Event::Select { region } => core.select_region(region),
        Event::Mode { region, mode } => core.set_mode(region, mode),
        Event::Clear { region } => core.clear_region(region),
        Event::ClearAll => core.clear_all(),
    }
}

/// Replay every event read from `reader` against a fresh editor.
///
/// # Errors
///
/// [`CliError::Io`] if reading fails, [`CliError::Script`] with the 1-based
/// line number if a line is not a valid event.
pub fn replay(reader: impl BufRead, config: EditorConfig) -> Result<Replay, CliError> {
    let mut out = Replay { core: EngineCore::new(config), events: 0, persists: 0 };

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let event = parse_line(&line).map_err(|source| CliError::Script { line: i + 1, source })?;
        let Some(event) = event else {
            continue;
        };
        debug!(line = i + 1, ?event, "apply");
        let actions = apply(&mut out.core, event);
        out.events += 1;
        out.persists += actions.iter().filter(|a| matches!(a, Action::Persist(_))).count();
    }

    info!(events = out.events, persists = out.persists, "replay finished");
    Ok(out)
}
