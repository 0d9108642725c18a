// Command dispatch: each CLI command runs against a working copy of the
// layout and reports whether the copy should be written back.

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use std::fmt::Write as _;
use std::path::PathBuf;

use zoner_core::{Axis, EdgeId, Rect, RegionId, Zone, ZoneEngine};
use zoner_layout::EdgeLayout;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every zone with its region id
    Show,
    /// Print every edge and the regions it borders
    Edges,
    /// Split a region in two
    Split {
        /// Region id
        region: RegionId,
        /// Side-by-side halves, divided by a vertical edge
        #[arg(long, conflicts_with = "vertical", required_unless_present = "vertical")]
        horizontal: bool,
        /// Stacked halves, divided by a horizontal edge
        #[arg(long)]
        vertical: bool,
    },
    /// Move an edge to a new position (clamped to the allowed range)
    Drag {
        edge: EdgeId,
        #[arg(allow_negative_numbers = true)]
        position: f64,
    },
    /// Report whether an edge can be deleted
    Check { edge: EdgeId },
    /// Delete an edge, merging the regions on either side
    Delete { edge: EdgeId },
    /// Replace the layout with zones read from a JSON file
    Import { file: PathBuf },
    /// Print the zones as JSON
    Export,
    /// Project a zone onto monitor geometry
    Frame {
        /// Zone index as listed by `show`
        index: usize,
        /// Work area as WxH+X+Y, e.g. 2560x1440+0+0
        #[arg(long)]
        monitor: String,
    },
    /// Reset to a single full-screen zone
    Reset,
    /// List saved layouts
    List,
    /// Show or change settings
    Config {
        /// Smallest region width/height, as a fraction of the monitor
        #[arg(long)]
        min_region_size: Option<f64>,
        /// Layout used when `--layout` is not given
        #[arg(long)]
        default_layout: Option<String>,
    },
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// Read-only output.
    Report(String),
    /// The layout changed and should be saved.
    Changed(String),
    /// The engine declined the request; the layout is untouched.
    Refused(String),
}

pub fn execute(layout: &mut EdgeLayout, command: &Command) -> Result<Outcome> {
    let outcome = match command {
        Command::Show => Outcome::Report(show(layout)),
        Command::Edges => Outcome::Report(edges(layout)),
        Command::Split { region, horizontal, .. } => {
            let result = if *horizontal {
                layout.split_horizontal(*region)
            } else {
                layout.split_vertical(*region)
            };
            match result {
                Ok((a, b)) => Outcome::Changed(format!("split {} into {} and {}", region, a, b)),
                Err(e) => Outcome::Refused(e.to_string()),
            }
        }
        Command::Drag { edge, position } => {
            let before = layout.edge(*edge).map(|e| e.position);
            match layout.drag_edge(*edge, *position) {
                Some(applied) if Some(applied) == before => {
                    Outcome::Report(format!("edge {} stays at {:.4}", edge, applied))
                }
                Some(applied) => Outcome::Changed(format!("edge {} at {:.4}", edge, applied)),
                None => Outcome::Refused(format!("edge {} cannot be dragged", edge)),
            }
        }
        Command::Check { edge } => {
            let check = layout.can_delete_edge(*edge);
            match check.reason() {
                None => Outcome::Report(format!("edge {} can be deleted", edge)),
                Some(reason) => Outcome::Report(format!("edge {} cannot be deleted: {}", edge, reason)),
            }
        }
        Command::Delete { edge } => match layout.delete_edge(*edge) {
            Ok(()) => Outcome::Changed(format!("deleted edge {}", edge)),
            Err(e) => Outcome::Refused(e.to_string()),
        },
        Command::Import { file } => {
            let data = std::fs::read_to_string(file)
                .with_context(|| format!("reading {}", file.display()))?;
            let zones: Vec<Zone> = serde_json::from_str(&data)
                .with_context(|| format!("parsing {}", file.display()))?;
            match EdgeLayout::from_zones(layout.id, layout.name.clone(), &zones) {
                Ok(imported) => {
                    let min = layout.min_region_size();
                    *layout = imported.with_min_region_size(min);
                    Outcome::Changed(format!("imported {} zones", zones.len()))
                }
                Err(e) => Outcome::Refused(e.to_string()),
            }
        }
        Command::Export => {
            Outcome::Report(serde_json::to_string_pretty(&layout.zones()).context("serializing zones")?)
        }
        Command::Frame { index, monitor } => {
            let work_area = parse_geometry(monitor)?;
            let zones = layout.zones();
            let Some(zone) = zones.get(*index) else {
                bail!("no zone at index {} (layout has {})", index, zones.len());
            };
            let frame = zone.to_frame(work_area);
            Outcome::Report(format!(
                "{}x{}{:+}{:+}",
                frame.width, frame.height, frame.x, frame.y
            ))
        }
        Command::Reset => {
            let min = layout.min_region_size();
            *layout = EdgeLayout::new(layout.id, layout.name.clone()).with_min_region_size(min);
            Outcome::Changed("reset to a single zone".to_string())
        }
        Command::List | Command::Config { .. } => {
            bail!("`{:?}` does not operate on a layout", command)
        }
    };
    if let Outcome::Refused(reason) = &outcome {
        log::debug!("{:?} refused: {}", command, reason);
    }
    Ok(outcome)
}

fn show(layout: &EdgeLayout) -> String {
    let mut out = String::new();
    for (index, region) in layout.regions().enumerate() {
        let Some(r) = layout.region_rect(region.id) else {
            continue;
        };
        let _ = writeln!(
            out,
            "{:>3}  region {:<4} {:<12} x={:.4} y={:.4} w={:.4} h={:.4}",
            index, region.id, region.name, r.x, r.y, r.width, r.height
        );
    }
    out.trim_end().to_string()
}

fn edges(layout: &EdgeLayout) -> String {
    let mut out = String::new();
    for edge in layout.edges() {
        let axis = match edge.axis {
            Axis::Vertical => "V",
            Axis::Horizontal => "H",
        };
        let touching: Vec<String> = layout
            .regions_touching(edge.id)
            .iter()
            .map(|id| id.to_string())
            .collect();
        let _ = writeln!(
            out,
            "edge {:<4} {} at {:.4}  span {:.4}..{:.4}{}  regions [{}]",
            edge.id,
            axis,
            edge.position,
            edge.start,
            edge.end(),
            if edge.fixed { "  fixed" } else { "" },
            touching.join(", ")
        );
    }
    out.trim_end().to_string()
}

/// Parse `WxH+X+Y` (X11 geometry style). Offsets may be negative: `1920x1080-1920+0`.
pub fn parse_geometry(geometry: &str) -> Result<Rect> {
    let (size, offsets) = geometry
        .find(['+', '-'])
        .map(|i| geometry.split_at(i))
        .with_context(|| format!("expected WxH+X+Y, got `{}`", geometry))?;
    let (w, h) = size
        .split_once('x')
        .with_context(|| format!("expected WxH in `{}`", geometry))?;

    let mut values = Vec::with_capacity(2);
    let mut rest = offsets;
    while !rest.is_empty() {
        let end = rest[1..].find(['+', '-']).map_or(rest.len(), |i| i + 1);
        let (token, tail) = rest.split_at(end);
        values.push(
            token
                .parse::<f64>()
                .with_context(|| format!("bad offset `{}` in `{}`", token, geometry))?,
        );
        rest = tail;
    }
    let [x, y] = values[..] else {
        bail!("expected two offsets in `{}`", geometry);
    };

    let width: f64 = w.parse().with_context(|| format!("bad width in `{}`", geometry))?;
    let height: f64 = h.parse().with_context(|| format!("bad height in `{}`", geometry))?;
    if width <= 0.0 || height <= 0.0 {
        bail!("monitor size must be positive, got `{}`", geometry);
    }
    Ok(Rect::new(x, y, width, height))
}
