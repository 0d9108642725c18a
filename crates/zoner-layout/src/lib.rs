// Edge-based zone layout engine.
// Regions are rectangles bounded by four shared edges held by id. Every
// public operation keeps the partition of the unit square valid.

mod convert;
mod merge;
mod safety;
mod store;
mod tests;
mod validate;

use std::collections::BTreeSet;

use zoner_core::{
    Axis, DeleteCheck, EdgeId, LayoutError, LayoutId, Point, Rect, RegionId, Result, ZoneEngine, Zone,
    MIN_REGION_SIZE,
};

pub use convert::{edges_to_zones, zones_to_edges};
pub use store::{
    Edge, EdgeStore, Region, RegionStore, Side, BOTTOM_EDGE, LEFT_EDGE, RIGHT_EDGE, TOP_EDGE,
};

/// Slack for the split size check so that halves produced by earlier splits
/// (e.g. 0.2 stored as 0.19999999999999998) still qualify.
const SIZE_EPSILON: f64 = 1e-9;

// ──────────────────────────────────────────────
// EdgeLayout
// ──────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct EdgeLayout {
    pub id: LayoutId,
    pub name: String,
    pub(crate) edges: EdgeStore,
    pub(crate) regions: RegionStore,
    min_region_size: f64,
}

impl EdgeLayout {
    /// A layout with the four fixed boundaries and one full-surface region.
    pub fn new(id: LayoutId, name: impl Into<String>) -> Self {
        let mut layout = Self::empty(id, name);
        layout.regions.insert(Region::new(
            "Zone 1",
            LEFT_EDGE,
            RIGHT_EDGE,
            TOP_EDGE,
            BOTTOM_EDGE,
        ));
        layout
    }

    /// Boundaries only; used while building from zones.
    pub(crate) fn empty(id: LayoutId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            edges: EdgeStore::with_boundaries(),
            regions: RegionStore::new(),
            min_region_size: MIN_REGION_SIZE,
        }
    }

    pub fn with_min_region_size(mut self, size: f64) -> Self {
        self.set_min_region_size(size);
        self
    }

    /// Override the minimum region size. Values outside (0, 0.5] are ignored.
    pub fn set_min_region_size(&mut self, size: f64) {
        if size > 0.0 && size <= 0.5 {
            self.min_region_size = size;
        } else {
            log::warn!("ignoring min region size {}; keeping {}", size, self.min_region_size);
        }
    }

    pub fn min_region_size(&self) -> f64 {
        self.min_region_size
    }

    // ── Queries ──────────────────────────────

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn region_ids(&self) -> Vec<RegionId> {
        self.regions.iter().map(|r| r.id).collect()
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Regions referencing an edge, ascending by id.
    pub fn regions_touching(&self, edge: EdgeId) -> Vec<RegionId> {
        self.regions.referencing(edge)
    }

    pub fn region_rect(&self, id: RegionId) -> Option<Rect> {
        self.regions.get(id).map(|r| self.rect_of(r))
    }

    /// The region under a point (first by id when the point is on a border).
    pub fn region_at(&self, point: Point) -> Option<RegionId> {
        self.regions
            .iter()
            .find(|r| self.rect_of(r).contains(point))
            .map(|r| r.id)
    }

    /// The movable edge closest to `point`, if one lies within `threshold`
    /// and the point is inside the edge's span.
    pub fn edge_near(&self, point: Point, threshold: f64) -> Option<EdgeId> {
        let mut best: Option<(f64, EdgeId)> = None;
        for edge in self.edges.iter().filter(|e| !e.fixed) {
            let (along, across) = match edge.axis {
                Axis::Vertical => (point.y, point.x),
                Axis::Horizontal => (point.x, point.y),
            };
            if along < edge.start || along > edge.end() {
                continue;
            }
            let dist = (across - edge.position).abs();
            if dist > threshold {
                continue;
            }
            if best.map_or(true, |(d, _)| dist < d) {
                best = Some((dist, edge.id));
            }
        }
        best.map(|(_, id)| id)
    }

    pub(crate) fn rect_of(&self, region: &Region) -> Rect {
        let (x0, x1) = self.extent(region, Axis::Vertical);
        let (y0, y1) = self.extent(region, Axis::Horizontal);
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Positions of a region's `axis` boundaries: its x range for vertical,
    /// its y range for horizontal.
    pub(crate) fn extent(&self, region: &Region, axis: Axis) -> (f64, f64) {
        let (lo, hi) = region.bounds(axis);
        (self.edges[lo].position, self.edges[hi].position)
    }

    /// Recompute a non-fixed edge's span from the regions referencing it.
    pub(crate) fn refresh_span(&mut self, id: EdgeId) {
        let Some(edge) = self.edges.get(id) else {
            return;
        };
        if edge.fixed {
            return;
        }
        let along = edge.axis.perpendicular();
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for rid in self.regions.referencing(id) {
            let (a, b) = self.extent(&self.regions[rid], along);
            lo = lo.min(a);
            hi = hi.max(b);
        }
        if lo > hi {
            return;
        }
        if let Some(edge) = self.edges.get_mut(id) {
            edge.start = lo;
            edge.length = hi - lo;
        }
    }

    /// Lowest `Zone N` name not already taken.
    fn fresh_name(&self) -> String {
        let taken: BTreeSet<&str> = self.regions.names().collect();
        (1..)
            .map(|n| format!("Zone {}", n))
            .find(|name| !taken.contains(name.as_str()))
            .unwrap_or_default()
    }

    // ── Split ────────────────────────────────

    /// Replace a region with two halves divided by a new `axis` edge.
    fn split(&mut self, id: RegionId, axis: Axis) -> Result<(RegionId, RegionId)> {
        let region = self
            .regions
            .get(id)
            .cloned()
            .ok_or(LayoutError::UnknownRegion(id))?;

        let (lo, hi) = self.extent(&region, axis);
        let size = hi - lo;
        let required = 2.0 * self.min_region_size;
        if size + SIZE_EPSILON < required {
            log::debug!("split refused: region {} is {:.3} wide on {:?}", id, size, axis);
            return Err(LayoutError::RegionTooSmall {
                region: id,
                size,
                required,
            });
        }

        let (span_lo, span_hi) = self.extent(&region, axis.perpendicular());
        let mid = (lo + hi) / 2.0;
        let divider = self.edges.insert(axis, mid, span_lo, span_hi - span_lo);

        let second_name = self.fresh_name();
        self.regions.remove(id);

        let mut first = region.clone();
        let mut second = region;
        second.name = second_name;
        match axis {
            Axis::Vertical => {
                first.right = divider;
                second.left = divider;
            }
            Axis::Horizontal => {
                first.bottom = divider;
                second.top = divider;
            }
        }
        let first = self.regions.insert(first);
        let second = self.regions.insert(second);
        log::debug!(
            "split region {} on {:?} at {:.4} -> {} | {} (edge {})",
            id,
            axis,
            mid,
            first,
            second,
            divider
        );
        Ok((first, second))
    }

    // ── Drag ─────────────────────────────────

    /// Move an edge as far toward `requested` as the minimum region size
    /// allows, then refit the perpendicular edges around it. Only the regions
    /// touching the edge are visited, plus the colinear neighbours of a
    /// perpendicular edge whose sides no longer agree.
    fn drag(&mut self, id: EdgeId, requested: f64) -> Option<f64> {
        let edge = self.edges.get(id)?;
        if edge.fixed {
            return None;
        }
        let axis = edge.axis;
        let current = edge.position;
        if !requested.is_finite() {
            return Some(current);
        }

        let touching = self.regions.referencing(id);
        let mut min = 0.0_f64;
        let mut max = 1.0_f64;
        for &rid in &touching {
            let region = &self.regions[rid];
            let (lo, hi) = region.bounds(axis);
            if hi == id {
                min = min.max(self.edges[lo].position + self.min_region_size);
            }
            if lo == id {
                max = max.min(self.edges[hi].position - self.min_region_size);
            }
        }
        if min > max {
            log::warn!("edge {} is pinned: bounds [{:.4}, {:.4}] are empty", id, min, max);
            return Some(current);
        }

        let clamped = requested.clamp(min, max);
        if let Some(edge) = self.edges.get_mut(id) {
            edge.position = clamped;
        }

        let mut perpendicular = BTreeSet::new();
        for &rid in &touching {
            let (a, b) = self.regions[rid].bounds(axis.perpendicular());
            perpendicular.insert(a);
            perpendicular.insert(b);
        }
        // Landing on a line shared with other edges can leave a crossing
        // edge with unequal sides.
        self.reconcile(&perpendicular);
        for edge in perpendicular {
            self.refresh_span(edge);
        }

        log::trace!("drag edge {} -> {:.4} (requested {:.4})", id, clamped, requested);
        Some(clamped)
    }

    // ── Delete ───────────────────────────────

    fn delete(&mut self, id: EdgeId) -> Result<()> {
        let plan = self.plan_delete(id).map_err(|err| {
            log::debug!("delete of edge {} refused: {}", id, err);
            err
        })?;
        log::debug!(
            "deleting divider {:?} ({} regions extended, {} dropped)",
            plan.group,
            plan.extend.len(),
            plan.drop.len()
        );
        self.apply_merge(plan);
        Ok(())
    }
}

impl Default for EdgeLayout {
    fn default() -> Self {
        Self::new(0, "Default")
    }
}

impl ZoneEngine for EdgeLayout {
    fn split_horizontal(&mut self, region: RegionId) -> Result<(RegionId, RegionId)> {
        self.split(region, Axis::Vertical)
    }

    fn split_vertical(&mut self, region: RegionId) -> Result<(RegionId, RegionId)> {
        self.split(region, Axis::Horizontal)
    }

    fn drag_edge(&mut self, edge: EdgeId, position: f64) -> Option<f64> {
        self.drag(edge, position)
    }

    fn can_delete_edge(&self, edge: EdgeId) -> DeleteCheck {
        match self.plan_delete(edge) {
            Ok(_) => DeleteCheck::allowed(),
            Err(err) => DeleteCheck::refused(err),
        }
    }

    fn delete_edge(&mut self, edge: EdgeId) -> Result<()> {
        self.delete(edge)
    }

    fn zones(&self) -> Vec<Zone> {
        edges_to_zones(self)
    }
}
