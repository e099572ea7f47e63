//! Persisted representation of a region set.
//!
//! The canonical form is a JSON array with one object per slot, in index
//! order: `[{"points":[{"x":..,"y":..},..],"mode":"add"},..]`. The
//! single-region variant omits `mode`.
//!
//! Decoding never fails outward. Persisted state may be hand-edited or come
//! from an older build, and the editor has to stay usable regardless, so
//! [`decode`] and [`decode_into`] log and fall back while [`try_decode_into`]
//! exposes the underlying [`CodecError`] for callers that want it.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::doc::{Region, RegionMode, RegionSet, Variant};
use crate::geom::Point;

/// Error returned by [`try_decode_into`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text is not valid JSON.
    #[error("invalid polygon JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// The JSON parsed but the top level is not an array.
    #[error("polygon data is not an array")]
    NotAnArray,
}

/// Everything the host stores for one editor between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    /// [`encode`] output.
    pub polygon_data: String,
    /// Selected region; clamped into range when applied.
    pub active_region: usize,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self { polygon_data: "[]".to_owned(), active_region: 0 }
    }
}

#[derive(Serialize)]
struct WireRegionOut<'a> {
    points: &'a [Point],
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<RegionMode>,
}

#[derive(Deserialize)]
struct WireRegionIn {
    points: Vec<Point>,
    #[serde(default, deserialize_with = "lenient_mode")]
    mode: RegionMode,
}

/// Any mode other than `"add"` / `"subtract"` (null, wrong case, a number)
/// reads as `Add` so the entry's points survive.
fn lenient_mode<'de, D>(deserializer: D) -> Result<RegionMode, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    match serde_json::from_value::<RegionMode>(raw) {
        Ok(mode) => Ok(mode),
        Err(e) => {
            debug!(error = %e, "unusable region mode; using add");
            Ok(RegionMode::Add)
        }
    }
}

/// Encode every slot of `set` in index order.
#[must_use]
pub fn encode(set: &RegionSet) -> String {
    let with_mode = set.variant() == Variant::Multi;
    let wire: Vec<WireRegionOut<'_>> = set
        .regions()
        .iter()
        .map(|r| WireRegionOut { points: &r.points, mode: with_mode.then_some(r.mode) })
        .collect();

    match serde_json::to_string(&wire) {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "failed to encode regions; writing empty list");
            "[]".to_owned()
        }
    }
}

/// Decode `s` into a fresh set of `count` slots. Malformed input yields the
/// empty set.
#[must_use]
pub fn decode(s: &str, count: usize) -> RegionSet {
    let mut set = RegionSet::new(count);
    decode_into(s, &mut set);
    set
}

/// Decode `s` over `set` in place. On malformed input `set` is untouched.
/// Returns the number of slots that were overwritten.
pub fn decode_into(s: &str, set: &mut RegionSet) -> usize {
    match try_decode_into(s, set) {
        Ok(copied) => copied,
        Err(e) => {
            warn!(error = %e, "malformed polygon data; keeping current regions");
            0
        }
    }
}

/// Decode `s` over `set`, reporting why the top level could not be read.
///
/// At most `min(array length, set.len())` slots are overwritten; extra
/// entries are ignored and slots past the end of the array keep their prior
/// value. An entry without a usable `points` list is skipped. In the single
/// variant, a bare array of points is accepted as region 0.
///
/// # Errors
///
/// [`CodecError::InvalidJson`] if `s` is not JSON, [`CodecError::NotAnArray`]
/// if its top level is not an array. `set` is untouched in both cases.
pub fn try_decode_into(s: &str, set: &mut RegionSet) -> Result<usize, CodecError> {
    let value: Value = serde_json::from_str(s)?;
    let Value::Array(items) = value else {
        return Err(CodecError::NotAnArray);
    };

    if set.variant() == Variant::Single && is_bare_point_list(&items) {
        return Ok(decode_bare_points(items, set));
    }

    let mut copied = 0;
    for (i, item) in items.into_iter().take(set.len()).enumerate() {
        match serde_json::from_value::<WireRegionIn>(item) {
            Ok(wire) => {
                set.replace(i, Region { points: wire.points, mode: wire.mode });
                copied += 1;
            }
            Err(e) => warn!(region = i, error = %e, "skipping malformed region entry"),
        }
    }
    debug!(copied, "decoded polygon data");
    Ok(copied)
}

fn is_bare_point_list(items: &[Value]) -> bool {
    items
        .first()
        .and_then(Value::as_object)
        .is_some_and(|o| o.contains_key("x") && !o.contains_key("points"))
}

fn decode_bare_points(items: Vec<Value>, set: &mut RegionSet) -> usize {
    match serde_json::from_value::<Vec<Point>>(Value::Array(items)) {
        Ok(points) => {
            set.replace(0, Region { points, mode: RegionMode::Add });
            debug!("decoded legacy point list");
            1
        }
        Err(e) => {
            warn!(error = %e, "skipping malformed legacy point list");
            0
        }
    }
}
