use std::collections::BTreeSet;

use zoner_core::{EdgeId, ALIGN_EPSILON};

use crate::safety::MergePlan;
use crate::store::Side;
use crate::EdgeLayout;

impl EdgeLayout {
    /// Carry out a plan produced by `plan_delete`. Nothing here can fail: the
    /// plan already proved every surviving region has a far bound to reach.
    pub(crate) fn apply_merge(&mut self, plan: MergePlan) {
        let MergePlan {
            axis,
            group,
            keep,
            extend,
            drop,
        } = plan;

        let mut touched = BTreeSet::new();
        for rid in drop {
            if let Some(region) = self.regions.remove(rid) {
                touched.extend(region.edge_ids());
            }
        }
        for (rid, far) in extend {
            self.regions.set_bound(rid, axis, keep, far);
            if let Some(region) = self.regions.get(rid) {
                touched.extend(region.edge_ids());
            }
        }
        for edge in &group {
            if self.regions.ref_count(*edge) > 0 {
                log::warn!("divider edge {} still referenced after merge", edge);
            }
            self.edges.remove(*edge);
            touched.remove(edge);
        }

        self.prune(&touched);
        self.reconcile(&touched);
        for edge in touched {
            self.refresh_span(edge);
        }
    }

    /// Drop non-fixed edges that no region references any more.
    pub(crate) fn prune(&mut self, candidates: &BTreeSet<EdgeId>) {
        for &id in candidates {
            let orphan = self
                .edges
                .get(id)
                .is_some_and(|e| !e.fixed && self.regions.ref_count(id) == 0);
            if orphan {
                self.edges.remove(id);
            }
        }
    }

    /// Restore "both sides of an edge tile the same span" for the given edges
    /// by fusing each with touching colinear edges until its sides agree.
    /// After a merge or a drag an edge can border a stretched region on one
    /// side and a neighbouring edge's regions on the other.
    pub(crate) fn reconcile(&mut self, candidates: &BTreeSet<EdgeId>) {
        for &id in candidates {
            loop {
                let Some(edge) = self.edges.get(id) else {
                    break;
                };
                if edge.fixed {
                    break;
                }
                let (low, high) = self.side_cover(id);
                if same_cover(&low, &high) {
                    break;
                }
                let (axis, position) = (edge.axis, edge.position);
                let reach = hull(low.iter().chain(&high));
                let touching: Vec<(EdgeId, bool)> = self
                    .edges
                    .iter()
                    .filter(|f| {
                        f.id != id
                            && !f.fixed
                            && f.axis == axis
                            && (f.position - position).abs() <= ALIGN_EPSILON
                    })
                    .filter_map(|f| {
                        let (l, h) = self.side_cover(f.id);
                        let other = hull(l.iter().chain(&h));
                        let meets =
                            other.0 <= reach.1 + ALIGN_EPSILON && other.1 >= reach.0 - ALIGN_EPSILON;
                        meets.then(|| (f.id, same_cover(&l, &h)))
                    })
                    .collect();
                // Prefer a neighbour that is itself out of step.
                let neighbour = touching
                    .iter()
                    .find(|(_, settled)| !settled)
                    .or_else(|| touching.first())
                    .map(|&(f, _)| f);
                match neighbour {
                    Some(other) => {
                        log::trace!("fusing colinear edge {} into {}", other, id);
                        self.regions.replace_edge(other, id);
                        self.edges.remove(other);
                    }
                    None => {
                        log::warn!("edge {} has mismatched sides and no colinear neighbour", id);
                        break;
                    }
                }
            }
        }
    }

    /// Union of the region extents on each side of an edge, as sorted,
    /// merged intervals.
    pub(crate) fn side_cover(&self, id: EdgeId) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
        let Some(edge) = self.edges.get(id) else {
            return (Vec::new(), Vec::new());
        };
        let along = edge.axis.perpendicular();
        let mut low = Vec::new();
        let mut high = Vec::new();
        for rid in self.regions.referencing(id) {
            let region = &self.regions[rid];
            let span = self.extent(region, along);
            match region.side_of(id) {
                Some(Side::Low) => low.push(span),
                Some(Side::High) => high.push(span),
                None => {}
            }
        }
        (union(low), union(high))
    }
}

pub(crate) fn union(mut spans: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    spans.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut out: Vec<(f64, f64)> = Vec::with_capacity(spans.len());
    for (a, b) in spans {
        match out.last_mut() {
            Some(last) if a <= last.1 + ALIGN_EPSILON => last.1 = last.1.max(b),
            _ => out.push((a, b)),
        }
    }
    out
}

pub(crate) fn same_cover(a: &[(f64, f64)], b: &[(f64, f64)]) -> bool {
    !a.is_empty()
        && a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| {
            (x.0 - y.0).abs() <= ALIGN_EPSILON && (x.1 - y.1).abs() <= ALIGN_EPSILON
        })
}

fn hull<'a>(spans: impl Iterator<Item = &'a (f64, f64)>) -> (f64, f64) {
    spans.fold((f64::INFINITY, f64::NEG_INFINITY), |acc, s| {
        (acc.0.min(s.0), acc.1.max(s.1))
    })
}
