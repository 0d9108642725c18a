use zoner_core::{Axis, LayoutError, Result, ALIGN_EPSILON, COVERAGE_TOLERANCE};

use crate::merge::same_cover;
use crate::store::{BOTTOM_EDGE, LEFT_EDGE, RIGHT_EDGE, TOP_EDGE};
use crate::EdgeLayout;

fn malformed(msg: String) -> LayoutError {
    LayoutError::MalformedZoneSet(msg)
}

impl EdgeLayout {
    /// Check every structural guarantee of the layout and report the first
    /// one that does not hold.
    pub fn validate(&self) -> Result<()> {
        for (id, axis, position) in [
            (LEFT_EDGE, Axis::Vertical, 0.0),
            (RIGHT_EDGE, Axis::Vertical, 1.0),
            (TOP_EDGE, Axis::Horizontal, 0.0),
            (BOTTOM_EDGE, Axis::Horizontal, 1.0),
        ] {
            let ok = self.edges.get(id).is_some_and(|e| {
                e.fixed && e.axis == axis && e.position == position && e.start == 0.0 && e.length == 1.0
            });
            if !ok {
                return Err(malformed(format!("boundary edge {} missing or modified", id)));
            }
        }
        if self.regions.is_empty() {
            return Err(malformed("layout has no regions".into()));
        }

        let mut rects = Vec::with_capacity(self.regions.len());
        for region in self.regions.iter() {
            for (axis, lo, hi) in [
                (Axis::Vertical, region.left, region.right),
                (Axis::Horizontal, region.top, region.bottom),
            ] {
                let (Some(a), Some(b)) = (self.edges.get(lo), self.edges.get(hi)) else {
                    return Err(malformed(format!("region {} references a missing edge", region.id)));
                };
                if a.axis != axis || b.axis != axis {
                    return Err(malformed(format!("region {} bound has the wrong axis", region.id)));
                }
                if a.position >= b.position {
                    return Err(malformed(format!("region {} has inverted bounds", region.id)));
                }
            }
            rects.push((region.id, self.rect_of(region)));
        }

        for (i, (a_id, a)) in rects.iter().enumerate() {
            for (b_id, b) in &rects[i + 1..] {
                if a.overlaps(b, ALIGN_EPSILON) {
                    return Err(malformed(format!("regions {} and {} overlap", a_id, b_id)));
                }
            }
        }
        let area: f64 = rects.iter().map(|(_, r)| r.area()).sum();
        if (area - 1.0).abs() > COVERAGE_TOLERANCE {
            return Err(malformed(format!("regions cover {:.4} of the surface", area)));
        }

        for edge in self.edges.iter().filter(|e| !e.fixed) {
            let (low, high) = self.side_cover(edge.id);
            if low.is_empty() && high.is_empty() {
                return Err(malformed(format!("edge {} is not referenced", edge.id)));
            }
            if !same_cover(&low, &high) {
                return Err(malformed(format!("edge {} has mismatched sides", edge.id)));
            }
            let start = low.first().map_or(edge.start, |s| s.0);
            let end = low.last().map_or(edge.end(), |s| s.1);
            if (start - edge.start).abs() > ALIGN_EPSILON || (end - edge.end()).abs() > ALIGN_EPSILON {
                return Err(malformed(format!("edge {} span is stale", edge.id)));
            }
        }
        Ok(())
    }
}
