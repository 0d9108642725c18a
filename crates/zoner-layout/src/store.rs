use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Index;

use zoner_core::{Axis, EdgeId, RegionId};

// ──────────────────────────────────────────────
// Edge
// ──────────────────────────────────────────────

/// Ids of the four surface boundaries. They are minted first by
/// `EdgeStore::with_boundaries` and never change.
pub const LEFT_EDGE: EdgeId = 1;
pub const RIGHT_EDGE: EdgeId = 2;
pub const TOP_EDGE: EdgeId = 3;
pub const BOTTOM_EDGE: EdgeId = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub axis: Axis,
    /// x for a vertical edge, y for a horizontal one.
    pub position: f64,
    /// Start of the covered span on the perpendicular axis.
    pub start: f64,
    pub length: f64,
    pub fixed: bool,
}

impl Edge {
    pub fn end(&self) -> f64 {
        self.start + self.length
    }
}

/// Which side of an edge a region lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The edge is the region's right/bottom boundary.
    Low,
    /// The edge is the region's left/top boundary.
    High,
}

#[derive(Debug, Clone)]
pub struct EdgeStore {
    edges: BTreeMap<EdgeId, Edge>,
    next_id: EdgeId,
}

impl EdgeStore {
    /// A store holding only the four fixed surface boundaries.
    pub fn with_boundaries() -> Self {
        let mut store = Self {
            edges: BTreeMap::new(),
            next_id: 1,
        };
        for (axis, position) in [
            (Axis::Vertical, 0.0),
            (Axis::Vertical, 1.0),
            (Axis::Horizontal, 0.0),
            (Axis::Horizontal, 1.0),
        ] {
            let id = store.insert(axis, position, 0.0, 1.0);
            if let Some(edge) = store.edges.get_mut(&id) {
                edge.fixed = true;
            }
        }
        store
    }

    pub fn alloc_id(&mut self) -> EdgeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, axis: Axis, position: f64, start: f64, length: f64) -> EdgeId {
        let id = self.alloc_id();
        self.edges.insert(
            id,
            Edge {
                id,
                axis,
                position,
                start,
                length,
                fixed: false,
            },
        );
        id
    }

    pub fn get(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    pub fn get_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(&id)
    }

    pub fn contains(&self, id: EdgeId) -> bool {
        self.edges.contains_key(&id)
    }

    pub fn remove(&mut self, id: EdgeId) -> Option<Edge> {
        self.edges.remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Regions never reference a missing edge, so lookups through a region's
/// bounds index directly.
impl Index<EdgeId> for EdgeStore {
    type Output = Edge;

    fn index(&self, id: EdgeId) -> &Edge {
        &self.edges[&id]
    }
}

// ──────────────────────────────────────────────
// Region
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub left: EdgeId,
    pub right: EdgeId,
    pub top: EdgeId,
    pub bottom: EdgeId,
}

impl Region {
    pub fn new(name: impl Into<String>, left: EdgeId, right: EdgeId, top: EdgeId, bottom: EdgeId) -> Self {
        Self {
            id: 0,
            name: name.into(),
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn edge_ids(&self) -> [EdgeId; 4] {
        [self.left, self.right, self.top, self.bottom]
    }

    /// The (low, high) boundary edges made of `axis` edges:
    /// (left, right) for vertical, (top, bottom) for horizontal.
    pub fn bounds(&self, axis: Axis) -> (EdgeId, EdgeId) {
        match axis {
            Axis::Vertical => (self.left, self.right),
            Axis::Horizontal => (self.top, self.bottom),
        }
    }

    /// Which side of `edge` this region lies on, if it references it.
    pub fn side_of(&self, edge: EdgeId) -> Option<Side> {
        if self.right == edge || self.bottom == edge {
            Some(Side::Low)
        } else if self.left == edge || self.top == edge {
            Some(Side::High)
        } else {
            None
        }
    }

    fn bound_mut(&mut self, axis: Axis, side: Side) -> &mut EdgeId {
        // A region on the low side of an edge uses it as its high bound.
        match (axis, side) {
            (Axis::Vertical, Side::Low) => &mut self.right,
            (Axis::Vertical, Side::High) => &mut self.left,
            (Axis::Horizontal, Side::Low) => &mut self.bottom,
            (Axis::Horizontal, Side::High) => &mut self.top,
        }
    }
}

// ──────────────────────────────────────────────
// RegionStore
// ──────────────────────────────────────────────

/// Regions keyed by id plus a reverse index from edge id to the regions that
/// reference it.
#[derive(Debug, Clone)]
pub struct RegionStore {
    regions: BTreeMap<RegionId, Region>,
    refs: HashMap<EdgeId, BTreeSet<RegionId>>,
    next_id: RegionId,
}

impl RegionStore {
    pub fn new() -> Self {
        Self {
            regions: BTreeMap::new(),
            refs: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn alloc_id(&mut self) -> RegionId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Insert a region under a freshly minted id, ignoring `region.id`.
    pub fn insert(&mut self, mut region: Region) -> RegionId {
        let id = self.alloc_id();
        region.id = id;
        for edge in region.edge_ids() {
            self.refs.entry(edge).or_default().insert(id);
        }
        self.regions.insert(id, region);
        id
    }

    pub fn remove(&mut self, id: RegionId) -> Option<Region> {
        let region = self.regions.remove(&id)?;
        for edge in region.edge_ids() {
            self.unlink(edge, id);
        }
        Some(region)
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.regions.values().map(|r| r.name.as_str())
    }

    /// Ids of the regions referencing `edge`, ascending.
    pub fn referencing(&self, edge: EdgeId) -> Vec<RegionId> {
        self.refs
            .get(&edge)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn ref_count(&self, edge: EdgeId) -> usize {
        self.refs.get(&edge).map_or(0, BTreeSet::len)
    }

    /// Point one boundary of a region at a different edge.
    pub fn set_bound(&mut self, id: RegionId, axis: Axis, side: Side, edge: EdgeId) {
        let Some(region) = self.regions.get_mut(&id) else {
            return;
        };
        let slot = region.bound_mut(axis, side);
        let old = std::mem::replace(slot, edge);
        if old == edge {
            return;
        }
        let still_used = region.edge_ids().contains(&old);
        if !still_used {
            self.unlink(old, id);
        }
        self.refs.entry(edge).or_default().insert(id);
    }

    /// Move every reference to `old` over to `new`.
    pub fn replace_edge(&mut self, old: EdgeId, new: EdgeId) {
        let Some(ids) = self.refs.remove(&old) else {
            return;
        };
        for id in &ids {
            if let Some(region) = self.regions.get_mut(id) {
                for slot in [
                    &mut region.left,
                    &mut region.right,
                    &mut region.top,
                    &mut region.bottom,
                ] {
                    if *slot == old {
                        *slot = new;
                    }
                }
            }
        }
        self.refs.entry(new).or_default().extend(ids);
    }

    fn unlink(&mut self, edge: EdgeId, region: RegionId) {
        if let Some(set) = self.refs.get_mut(&edge) {
            set.remove(&region);
            if set.is_empty() {
                self.refs.remove(&edge);
            }
        }
    }
}

impl Default for RegionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<RegionId> for RegionStore {
    type Output = Region;

    fn index(&self, id: RegionId) -> &Region {
        &self.regions[&id]
    }
}
