// Conversion between the edge graph and the flat zone list used for storage
// and by the window manager.

use zoner_core::{Axis, EdgeId, LayoutError, Result, Zone, ALIGN_EPSILON, COVERAGE_TOLERANCE};

use crate::merge::union;
use crate::store::{Region, BOTTOM_EDGE, LEFT_EDGE, RIGHT_EDGE, TOP_EDGE};
use crate::EdgeLayout;

/// One zone per region, in region id order.
pub fn edges_to_zones(layout: &EdgeLayout) -> Vec<Zone> {
    layout
        .regions
        .iter()
        .map(|region| {
            let rect = layout.rect_of(region);
            Zone::new(region.name.clone(), rect.x, rect.y, rect.width, rect.height)
        })
        .collect()
}

/// Build an edge graph from zones that already partition the unit square.
///
/// Coordinates closer than the coverage tolerance are snapped onto one shared
/// line. Each maximal connected stretch of boundary on an interior line
/// becomes one edge.
pub fn zones_to_edges(zones: &[Zone]) -> Result<EdgeLayout> {
    check_partition(zones)?;

    let xs = Snapper::new(zones.iter().flat_map(|z| [z.x, z.x + z.w]));
    let ys = Snapper::new(zones.iter().flat_map(|z| [z.y, z.y + z.h]));
    let boxes: Vec<Box4> = zones
        .iter()
        .map(|z| Box4 {
            x0: xs.snap(z.x),
            x1: xs.snap(z.x + z.w),
            y0: ys.snap(z.y),
            y1: ys.snap(z.y + z.h),
        })
        .collect();
    for (zone, b) in zones.iter().zip(&boxes) {
        if b.x1 - b.x0 <= ALIGN_EPSILON || b.y1 - b.y0 <= ALIGN_EPSILON {
            return Err(LayoutError::MalformedZoneSet(format!(
                "zone `{}` collapses after alignment",
                zone.name
            )));
        }
    }

    let mut layout = EdgeLayout::empty(0, "Custom");
    let mut bounds: Vec<[Option<EdgeId>; 4]> = vec![[None; 4]; boxes.len()];

    for axis in [Axis::Vertical, Axis::Horizontal] {
        let (lines, fixed_lo, fixed_hi) = match axis {
            Axis::Vertical => (&xs.lines, LEFT_EDGE, RIGHT_EDGE),
            Axis::Horizontal => (&ys.lines, TOP_EDGE, BOTTOM_EDGE),
        };
        // Slots in `bounds`: [left, right, top, bottom].
        let (lo_slot, hi_slot) = match axis {
            Axis::Vertical => (0, 1),
            Axis::Horizontal => (2, 3),
        };

        for (i, b) in boxes.iter().enumerate() {
            let (lo, hi) = b.extent(axis);
            if lo.abs() <= ALIGN_EPSILON {
                bounds[i][lo_slot] = Some(fixed_lo);
            }
            if (hi - 1.0).abs() <= ALIGN_EPSILON {
                bounds[i][hi_slot] = Some(fixed_hi);
            }
        }

        for &line in lines.iter().filter(|&&p| p > ALIGN_EPSILON && p < 1.0 - ALIGN_EPSILON) {
            let touching: Vec<(usize, (f64, f64))> = boxes
                .iter()
                .enumerate()
                .filter(|(_, b)| {
                    let (lo, hi) = b.extent(axis);
                    (lo - line).abs() <= ALIGN_EPSILON || (hi - line).abs() <= ALIGN_EPSILON
                })
                .map(|(i, b)| (i, b.extent(axis.perpendicular())))
                .collect();

            let segments = union(touching.iter().map(|&(_, span)| span).collect());
            let ids: Vec<EdgeId> = segments
                .iter()
                .map(|&(start, end)| layout.edges.insert(axis, line, start, end - start))
                .collect();

            for &(i, (a, b)) in &touching {
                let Some(k) = segments
                    .iter()
                    .position(|&(s, e)| a >= s - ALIGN_EPSILON && b <= e + ALIGN_EPSILON)
                else {
                    continue;
                };
                let (lo, _) = boxes[i].extent(axis);
                let slot = if (lo - line).abs() <= ALIGN_EPSILON {
                    lo_slot
                } else {
                    hi_slot
                };
                bounds[i][slot] = Some(ids[k]);
            }
        }
    }

    for (zone, slots) in zones.iter().zip(&bounds) {
        let [Some(left), Some(right), Some(top), Some(bottom)] = *slots else {
            return Err(LayoutError::MalformedZoneSet(format!(
                "zone `{}` has an unmatched border",
                zone.name
            )));
        };
        layout
            .regions
            .insert(Region::new(zone.name.clone(), left, right, top, bottom));
    }

    layout.validate()?;
    log::debug!(
        "built layout from {} zones: {} edges",
        zones.len(),
        layout.edges.len()
    );
    Ok(layout)
}

impl EdgeLayout {
    /// `zones_to_edges` with an explicit identity.
    pub fn from_zones(id: zoner_core::LayoutId, name: impl Into<String>, zones: &[Zone]) -> Result<Self> {
        let mut layout = zones_to_edges(zones)?;
        layout.id = id;
        layout.name = name.into();
        Ok(layout)
    }
}

/// Reject zone sets that are not a partition of the unit square.
fn check_partition(zones: &[Zone]) -> Result<()> {
    let fail = |msg: String| Err(LayoutError::MalformedZoneSet(msg));
    if zones.is_empty() {
        return fail("no zones".into());
    }
    for z in zones {
        let finite = [z.x, z.y, z.w, z.h].iter().all(|v| v.is_finite());
        if !finite || z.w <= 0.0 || z.h <= 0.0 {
            return fail(format!("zone `{}` has an invalid size", z.name));
        }
        if z.x < -COVERAGE_TOLERANCE
            || z.y < -COVERAGE_TOLERANCE
            || z.x + z.w > 1.0 + COVERAGE_TOLERANCE
            || z.y + z.h > 1.0 + COVERAGE_TOLERANCE
        {
            return fail(format!("zone `{}` extends past the surface", z.name));
        }
    }
    for (i, a) in zones.iter().enumerate() {
        for b in &zones[i + 1..] {
            if a.rect().overlaps(&b.rect(), COVERAGE_TOLERANCE) {
                return fail(format!("zones `{}` and `{}` overlap", a.name, b.name));
            }
        }
    }
    let area: f64 = zones.iter().map(|z| z.w * z.h).sum();
    if (area - 1.0).abs() > COVERAGE_TOLERANCE {
        return fail(format!("zones cover {:.4} of the surface", area));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
struct Box4 {
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
}

impl Box4 {
    fn extent(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::Vertical => (self.x0, self.x1),
            Axis::Horizontal => (self.y0, self.y1),
        }
    }
}

/// Clusters coordinates onto representative lines. A cluster never spans
/// more than the coverage tolerance, so no coordinate moves further than
/// that. 0 and 1 always win their cluster.
struct Snapper {
    lines: Vec<f64>,
}

impl Snapper {
    fn new(values: impl Iterator<Item = f64>) -> Self {
        let mut values: Vec<f64> = values.chain([0.0, 1.0]).collect();
        values.sort_by(|a, b| a.total_cmp(b));

        let mut clusters: Vec<Vec<f64>> = Vec::new();
        for v in values {
            match clusters.last_mut() {
                Some(c) if c.first().is_some_and(|&first| v - first <= COVERAGE_TOLERANCE) => c.push(v),
                _ => clusters.push(vec![v]),
            }
        }
        let lines = clusters
            .iter()
            .map(|c| {
                if c.contains(&0.0) {
                    0.0
                } else if c.contains(&1.0) {
                    1.0
                } else {
                    c.iter().sum::<f64>() / c.len() as f64
                }
            })
            .collect();
        Self { lines }
    }

    fn snap(&self, v: f64) -> f64 {
        self.lines
            .iter()
            .copied()
            .min_by(|a, b| (a - v).abs().total_cmp(&(b - v).abs()))
            .unwrap_or(v)
    }
}
