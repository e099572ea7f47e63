#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::RegionSet;
use crate::geom::{Point, point_segment_distance, within_radius};
use crate::viewport::Viewport;

/// A vertex addressed by region and position within that region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexRef {
    pub region: usize,
    pub index: usize,
}

impl VertexRef {
    #[must_use]
    pub fn new(region: usize, index: usize) -> Self {
        Self { region, index }
    }
}

/// Find the vertex under display-space `pos`.
///
/// The active region is searched first so it wins when markers of different
/// regions overlap; the rest follow in set order. Within a region the lowest
/// index within `radius` wins.
#[must_use]
pub fn find_vertex_at(set: &RegionSet, active: usize, viewport: &Viewport, pos: Point, radius: f64) -> Option<VertexRef> {
    let order = std::iter::once(active).chain((0..set.len()).filter(|&i| i != active));
    for region in order {
        let Some(r) = set.get(region) else {
            continue;
        };
        let hit = r
            .points
            .iter()
            .position(|&p| within_radius(pos, viewport.image_to_display(p), radius));
        if let Some(index) = hit {
            return Some(VertexRef { region, index });
        }
    }
    None
}

/// Find the edge of the active region under display-space `pos`.
///
/// Only the active region is considered since inserts always target it. The
/// closing edge of a two-vertex region does not exist and is never returned.
#[must_use]
pub fn find_edge_at(set: &RegionSet, active: usize, viewport: &Viewport, pos: Point, distance: f64) -> Option<usize> {
    let region = set.get(active)?;
    region.edges().find_map(|(i, a, b)| {
        let a = viewport.image_to_display(a);
        let b = viewport.image_to_display(b);
        (point_segment_distance(pos, a, b) <= distance).then_some(i)
    })
}
