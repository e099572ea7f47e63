//! Editor tuning: region count, hit tolerances, and marker sizes.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{
    EDGE_HIT_DISTANCE_PX, INACTIVE_OPACITY, LINE_HOVER_WIDTH_PX, LINE_WIDTH_PX, MULTI_REGION_COUNT,
    VERTEX_HIT_RADIUS_PX, VERTEX_RADIUS_PX,
};

/// Error returned by [`EditorConfig::validate`].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    /// A region set needs at least one slot.
    #[error("region_count must be at least 1")]
    NoRegions,
    /// A length is negative or not finite.
    #[error("{key} must be a finite, non-negative length (got {value})")]
    InvalidLength { key: &'static str, value: f64 },
    /// Opacity is outside `[0, 1]`.
    #[error("inactive_opacity must be within 0..=1 (got {0})")]
    OpacityOutOfRange(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Slots in the region set. One selects the single-region editor.
    pub region_count: usize,
    /// Display-space radius for vertex hits.
    pub vertex_hit_radius: f64,
    /// Display-space distance for edge hits.
    pub edge_hit_distance: f64,
    /// Resting vertex marker radius.
    pub vertex_radius: f64,
    pub line_width: f64,
    pub line_hover_width: f64,
    /// Opacity of regions other than the active one.
    pub inactive_opacity: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::multi()
    }
}

impl EditorConfig {
    /// Six selectable regions with add/subtract modes.
    #[must_use]
    pub fn multi() -> Self {
        Self {
            region_count: MULTI_REGION_COUNT,
            vertex_hit_radius: VERTEX_HIT_RADIUS_PX,
            edge_hit_distance: EDGE_HIT_DISTANCE_PX,
            vertex_radius: VERTEX_RADIUS_PX,
            line_width: LINE_WIDTH_PX,
            line_hover_width: LINE_HOVER_WIDTH_PX,
            inactive_opacity: INACTIVE_OPACITY,
        }
    }

    /// One region, always additive.
    #[must_use]
    pub fn single() -> Self {
        Self { region_count: 1, ..Self::multi() }
    }

    /// Check every field for a usable value.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region_count == 0 {
            return Err(ConfigError::NoRegions);
        }
        let lengths = [
            ("vertex_hit_radius", self.vertex_hit_radius),
            ("edge_hit_distance", self.edge_hit_distance),
            ("vertex_radius", self.vertex_radius),
            ("line_width", self.line_width),
            ("line_hover_width", self.line_hover_width),
        ];
        for (key, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidLength { key, value });
            }
        }
        if !(0.0..=1.0).contains(&self.inactive_opacity) {
            return Err(ConfigError::OpacityOutOfRange(self.inactive_opacity));
        }
        Ok(())
    }
}
