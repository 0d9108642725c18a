use serde::{Deserialize, Serialize};
use thiserror::Error;


// ──────────────────────────────────────────────
// Constants
// ──────────────────────────────────────────────

/// Smallest width/height a region may have, as a fraction of the surface.
pub const MIN_REGION_SIZE: f64 = 0.10;

/// Tolerance for coverage and overlap checks on imported zone sets.
pub const COVERAGE_TOLERANCE: f64 = 1e-3;

/// Two positions closer than this are treated as the same line.
pub const ALIGN_EPSILON: f64 = 1e-6;

// ──────────────────────────────────────────────
// Geometry
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// The normalized surface every layout partitions.
    pub fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// True if the interiors intersect by more than `eps` on both axes.
    pub fn overlaps(&self, other: &Rect, eps: f64) -> bool {
        let w = self.right().min(other.right()) - self.x.max(other.x);
        let h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        w > eps && h > eps
    }
}

/// Orientation of an edge. A vertical edge sits at an x position and spans a
/// range of y; a horizontal edge sits at a y position and spans a range of x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    pub fn perpendicular(self) -> Self {
        match self {
            Axis::Vertical => Axis::Horizontal,
            Axis::Horizontal => Axis::Vertical,
        }
    }
}

// ──────────────────────────────────────────────
// Identity
// ──────────────────────────────────────────────

pub type EdgeId = u64;
pub type RegionId = u64;
pub type LayoutId = u64;

// ──────────────────────────────────────────────
// Zones (persisted / exchanged format)
// ──────────────────────────────────────────────

/// A named rectangle in normalized surface coordinates. This is the flat form
/// stored on disk and handed to the window manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Zone {
    pub fn new(name: impl Into<String>, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            w,
            h,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    /// Project the zone onto a monitor work area in absolute pixels.
    ///
    /// Both corners are rounded independently, so two zones sharing a border
    /// produce frames that meet on the same pixel column/row.
    pub fn to_frame(&self, work_area: Rect) -> Rect {
        let x0 = (work_area.x + self.x * work_area.width).round();
        let y0 = (work_area.y + self.y * work_area.height).round();
        let x1 = (work_area.x + (self.x + self.w) * work_area.width).round();
        let y1 = (work_area.y + (self.y + self.h) * work_area.height).round();
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Approximate equality used for round-trip comparisons.
    pub fn approx_eq(&self, other: &Zone, eps: f64) -> bool {
        self.name == other.name
            && (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.w - other.w).abs() <= eps
            && (self.h - other.h).abs() <= eps
    }
}

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Every way a layout operation can be refused. None of these are fatal: the
/// layout that produced them is left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("region {region} is too small to split ({size:.3} < {required:.3})")]
    RegionTooSmall {
        region: RegionId,
        size: f64,
        required: f64,
    },
    #[error("fixed boundary")]
    EdgeFixed(EdgeId),
    #[error("edge borders regions on only one side")]
    EdgeSingleSided(EdgeId),
    #[error("regions misaligned across divider")]
    EdgeMisaligned(EdgeId),
    #[error("malformed zone set: {0}")]
    MalformedZoneSet(String),
    #[error("region {0} not found")]
    UnknownRegion(RegionId),
    #[error("edge {0} not found")]
    UnknownEdge(EdgeId),
}

/// Answer to "may this edge be deleted?", suitable for surfacing to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteCheck {
    pub deletable: bool,
    pub refusal: Option<LayoutError>,
}

impl DeleteCheck {
    pub fn allowed() -> Self {
        Self {
            deletable: true,
            refusal: None,
        }
    }

    pub fn refused(err: LayoutError) -> Self {
        Self {
            deletable: false,
            refusal: Some(err),
        }
    }

    pub fn reason(&self) -> Option<String> {
        self.refusal.as_ref().map(|e| e.to_string())
    }
}

// ──────────────────────────────────────────────
// Trait: ZoneEngine
// ──────────────────────────────────────────────

/// The operations the interactive editor sends to a layout. Each call either
/// applies completely or is refused with the layout unchanged.
pub trait ZoneEngine {
    /// Split a region into left/right halves (new vertical edge).
    fn split_horizontal(&mut self, region: RegionId) -> Result<(RegionId, RegionId)>;
    /// Split a region into top/bottom halves (new horizontal edge).
    fn split_vertical(&mut self, region: RegionId) -> Result<(RegionId, RegionId)>;
    /// Move an edge, clamped so no region drops below the minimum size.
    /// Returns the applied position, or `None` if the edge cannot move.
    fn drag_edge(&mut self, edge: EdgeId, position: f64) -> Option<f64>;
    fn can_delete_edge(&self, edge: EdgeId) -> DeleteCheck;
    fn delete_edge(&mut self, edge: EdgeId) -> Result<()>;
    /// Materialize the current partition as flat zones.
    fn zones(&self) -> Vec<Zone>;
}
