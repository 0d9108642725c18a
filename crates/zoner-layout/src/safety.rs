// Deletability of a divider. The check builds the full merge plan, so the
// answer given to the UI and the mutation performed by delete always agree.

use zoner_core::{Axis, EdgeId, LayoutError, RegionId, Result, ALIGN_EPSILON};

use crate::store::Side;
use crate::EdgeLayout;

/// Everything delete needs, computed without touching the layout.
#[derive(Debug, Clone)]
pub(crate) struct MergePlan {
    pub axis: Axis,
    /// Colinear edges removed together.
    pub group: Vec<EdgeId>,
    /// Side whose regions survive and stretch across the divider.
    pub keep: Side,
    /// Surviving region and the edge that becomes its new divider-axis bound.
    pub extend: Vec<(RegionId, EdgeId)>,
    pub drop: Vec<RegionId>,
}

impl EdgeLayout {
    /// All non-fixed edges on the same line as `id`, including `id` itself.
    /// Derived on every call.
    pub fn colinear_group(&self, id: EdgeId) -> Vec<EdgeId> {
        let Some(edge) = self.edges.get(id) else {
            return Vec::new();
        };
        if edge.fixed {
            return Vec::new();
        }
        self.edges
            .iter()
            .filter(|e| {
                !e.fixed && e.axis == edge.axis && (e.position - edge.position).abs() <= ALIGN_EPSILON
            })
            .map(|e| e.id)
            .collect()
    }

    /// Regions bordering a set of edges, split by side. Each list is sorted.
    pub(crate) fn sides(&self, edges: &[EdgeId]) -> (Vec<RegionId>, Vec<RegionId>) {
        let mut low = Vec::new();
        let mut high = Vec::new();
        for &edge in edges {
            for rid in self.regions.referencing(edge) {
                match self.regions[rid].side_of(edge) {
                    Some(Side::Low) => low.push(rid),
                    Some(Side::High) => high.push(rid),
                    None => {}
                }
            }
        }
        low.sort_unstable();
        low.dedup();
        high.sort_unstable();
        high.dedup();
        (low, high)
    }

    /// Extents of regions along a divider of `axis`.
    fn spans(&self, regions: &[RegionId], axis: Axis) -> Vec<(f64, f64)> {
        regions
            .iter()
            .map(|&rid| self.extent(&self.regions[rid], axis.perpendicular()))
            .collect()
    }

    pub(crate) fn plan_delete(&self, id: EdgeId) -> Result<MergePlan> {
        let edge = self.edges.get(id).ok_or(LayoutError::UnknownEdge(id))?;
        if edge.fixed {
            return Err(LayoutError::EdgeFixed(id));
        }
        let axis = edge.axis;
        let group = self.colinear_group(id);

        let (low, high) = self.sides(&group);
        if low.is_empty() || high.is_empty() {
            return Err(LayoutError::EdgeSingleSided(id));
        }

        let low_spans = self.spans(&low, axis);
        let high_spans = self.spans(&high, axis);
        let aligned = single_covers(&low_spans, &high_spans)
            || single_covers(&high_spans, &low_spans)
            || same_boundaries(&low_spans, &high_spans);
        if !aligned {
            return Err(LayoutError::EdgeMisaligned(id));
        }

        // More regions wins; a tie keeps the low side.
        let keep = if high.len() > low.len() {
            Side::High
        } else {
            Side::Low
        };
        let (kept, kept_spans, dropped, dropped_spans) = match keep {
            Side::Low => (&low, &low_spans, &high, &high_spans),
            Side::High => (&high, &high_spans, &low, &low_spans),
        };

        let mut extend = Vec::with_capacity(kept.len());
        for (&rid, &span) in kept.iter().zip(kept_spans) {
            let across = dropped
                .iter()
                .zip(dropped_spans)
                .find(|(_, other)| overlap(span, **other) > ALIGN_EPSILON)
                .map(|(&other, _)| other)
                .ok_or(LayoutError::EdgeMisaligned(id))?;
            let (lo, hi) = self.regions[across].bounds(axis);
            let far = match keep {
                Side::Low => hi,
                Side::High => lo,
            };
            extend.push((rid, far));
        }

        Ok(MergePlan {
            axis,
            group,
            keep,
            extend,
            drop: dropped.clone(),
        })
    }
}

fn overlap(a: (f64, f64), b: (f64, f64)) -> f64 {
    a.1.min(b.1) - a.0.max(b.0)
}

/// `single` is one region whose span contains every span in `others`.
fn single_covers(single: &[(f64, f64)], others: &[(f64, f64)]) -> bool {
    let [(lo, hi)] = single else {
        return false;
    };
    others
        .iter()
        .all(|&(a, b)| a >= lo - ALIGN_EPSILON && b <= hi + ALIGN_EPSILON)
}

/// Both sides subdivide the divider at exactly the same positions.
fn same_boundaries(a: &[(f64, f64)], b: &[(f64, f64)]) -> bool {
    let a = boundary_set(a);
    let b = boundary_set(b);
    a.len() == b.len() && a.iter().zip(&b).all(|(x, y)| (x - y).abs() <= ALIGN_EPSILON)
}

fn boundary_set(spans: &[(f64, f64)]) -> Vec<f64> {
    let mut points: Vec<f64> = spans.iter().flat_map(|&(a, b)| [a, b]).collect();
    points.sort_by(|a, b| a.total_cmp(b));
    points.dedup_by(|a, b| (*a - *b).abs() <= ALIGN_EPSILON);
    points
}
