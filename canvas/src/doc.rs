//! Document model: regions, their add/subtract designation, and the
//! fixed-size region set that owns them.
//!
//! A [`Region`] is an ordered vertex list in image space; insertion order is
//! edge order and the polygon is implicitly closed. The closing edge only
//! exists once the region has three vertices: with two it is an open segment.
//!
//! [`RegionSet`] has a fixed length chosen at construction. Index is identity,
//! regions are never reordered, and every index-taking mutation re-validates
//! bounds and reports a no-op instead of panicking. Hit-test results can go
//! stale between pointer-move and pointer-down (a clear fired in between), so
//! callers must not assume an index from an earlier query is still valid.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::consts::MULTI_REGION_COUNT;
use crate::geom::Point;

/// Whether a region contributes to or carves out of the final mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionMode {
    #[default]
    Add,
    Subtract,
}

/// Which editor flavour a region set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// One region, always `Add`; mode is never exposed or persisted.
    Single,
    /// Several independently selectable regions, each with its own mode.
    Multi,
}

/// One polygon, closed or still in progress.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Region {
    /// Vertices in image space, in edge order.
    pub points: Vec<Point>,
    /// Add or subtract designation.
    #[serde(default)]
    pub mode: RegionMode,
}

impl Region {
    #[must_use]
    pub fn new(mode: RegionMode) -> Self {
        Self { points: Vec::new(), mode }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// A region with no vertices renders nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the region encloses area (three or more vertices).
    #[must_use]
    pub fn is_fill_eligible(&self) -> bool {
        self.points.len() >= 3
    }

    /// Number of drawable, hit-testable edges.
    ///
    /// Zero or one vertex has no edges, two vertices form the single edge
    /// `0 → 1`, and `n ≥ 3` vertices form `n` edges including the closing one.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        match self.points.len() {
            0 | 1 => 0,
            2 => 1,
            n => n,
        }
    }

    /// Endpoints of edge `index`, connecting vertex `index` to `(index + 1) mod n`.
    #[must_use]
    pub fn edge(&self, index: usize) -> Option<(Point, Point)> {
        if index >= self.edge_count() {
            return None;
        }
        let n = self.points.len();
        Some((self.points[index], self.points[(index + 1) % n]))
    }

    /// Iterate over `(edge_index, a, b)` for every drawable edge.
    pub fn edges(&self) -> impl Iterator<Item = (usize, Point, Point)> + '_ {
        (0..self.edge_count()).filter_map(|i| self.edge(i).map(|(a, b)| (i, a, b)))
    }
}

/// Fixed-size ordered collection of regions for one editor session.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSet {
    regions: Vec<Region>,
    variant: Variant,
}

impl RegionSet {
    /// Create a set of `count` empty `Add` regions. A count of one yields the
    /// single-region variant; zero is bumped to one so an active index always
    /// exists.
    #[must_use]
    pub fn new(count: usize) -> Self {
        let count = count.max(1);
        let variant = if count == 1 { Variant::Single } else { Variant::Multi };
        Self { regions: vec![Region::default(); count], variant }
    }

    /// The six-region editor.
    #[must_use]
    pub fn multi() -> Self {
        Self::new(MULTI_REGION_COUNT)
    }

    /// The one-region editor.
    #[must_use]
    pub fn single() -> Self {
        Self::new(1)
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Number of slots, which never changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Always false: a set has at least one slot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Whether no region holds any vertex.
    #[must_use]
    pub fn has_no_points(&self) -> bool {
        self.regions.iter().all(Region::is_empty)
    }

    #[must_use]
    pub fn get(&self, region: usize) -> Option<&Region> {
        self.regions.get(region)
    }

    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Vertex `index` of `region`, if both exist.
    #[must_use]
    pub fn point(&self, region: usize, index: usize) -> Option<Point> {
        self.regions.get(region)?.points.get(index).copied()
    }

    /// Append a vertex. Returns false if `region` is out of range.
    pub fn push_point(&mut self, region: usize, p: Point) -> bool {
        let Some(r) = self.regions.get_mut(region) else {
            return false;
        };
        r.points.push(p);
        true
    }

    /// Insert a vertex before position `at` (`at == len` appends).
    /// Returns false if `region` or `at` is out of range.
    pub fn insert_point(&mut self, region: usize, at: usize, p: Point) -> bool {
        let Some(r) = self.regions.get_mut(region) else {
            return false;
        };
        if at > r.points.len() {
            return false;
        }
        r.points.insert(at, p);
        true
    }

    /// Overwrite an existing vertex. Returns false if it does not exist.
    pub fn set_point(&mut self, region: usize, index: usize, p: Point) -> bool {
        let Some(slot) = self.regions.get_mut(region).and_then(|r| r.points.get_mut(index)) else {
            return false;
        };
        *slot = p;
        true
    }

    /// Remove and return a vertex, or `None` if it does not exist.
    pub fn remove_point(&mut self, region: usize, index: usize) -> Option<Point> {
        let r = self.regions.get_mut(region)?;
        if index >= r.points.len() {
            return None;
        }
        Some(r.points.remove(index))
    }

    /// Change a region's mode. The single variant is always `Add`, so this is
    /// refused there. Returns whether the stored mode changed.
    pub fn set_mode(&mut self, region: usize, mode: RegionMode) -> bool {
        if self.variant == Variant::Single {
            return false;
        }
        let Some(r) = self.regions.get_mut(region) else {
            return false;
        };
        if r.mode == mode {
            return false;
        }
        r.mode = mode;
        true
    }

    /// Drop every vertex of one region; its mode is kept.
    /// Returns false if `region` is out of range.
    pub fn clear_region(&mut self, region: usize) -> bool {
        let Some(r) = self.regions.get_mut(region) else {
            return false;
        };
        r.points.clear();
        true
    }

    /// Drop every vertex of every region.
    pub fn clear_all(&mut self) {
        for r in &mut self.regions {
            r.points.clear();
        }
    }

    /// Replace the contents of slot `region` wholesale. Used by decoding;
    /// the single variant forces `Add`. Returns false if out of range.
    pub fn replace(&mut self, region: usize, mut value: Region) -> bool {
        if self.variant == Variant::Single {
            value.mode = RegionMode::Add;
        }
        let Some(slot) = self.regions.get_mut(region) else {
            return false;
        };
        *slot = value;
        true
    }
}

impl Default for RegionSet {
    fn default() -> Self {
        Self::multi()
    }
}
