#[cfg(test)]
mod tests {
    use crate::{
        edges_to_zones, zones_to_edges, EdgeLayout, Side, BOTTOM_EDGE, LEFT_EDGE, RIGHT_EDGE,
        TOP_EDGE,
    };
    use zoner_core::{Axis, LayoutError, Point, Rect, RegionId, Zone, ZoneEngine};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn rect_approx_eq(a: &Rect, b: &Rect) -> bool {
        approx_eq(a.x, b.x)
            && approx_eq(a.y, b.y)
            && approx_eq(a.width, b.width)
            && approx_eq(a.height, b.height)
    }

    fn assert_rect(layout: &EdgeLayout, region: RegionId, expected: Rect) {
        let actual = layout.region_rect(region).expect("region exists");
        assert!(
            rect_approx_eq(&actual, &expected),
            "region {}: {:?} != {:?}",
            region,
            actual,
            expected
        );
    }

    fn sorted_by_name(mut zones: Vec<Zone>) -> Vec<Zone> {
        zones.sort_by(|a, b| a.name.cmp(&b.name));
        zones
    }

    fn zones_match(a: &[Zone], b: &[Zone]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.approx_eq(y, 1e-9))
    }

    /// 2×2 grid built vertical-first: one full-height divider (edge 5) and a
    /// horizontal divider in each column (edges 6 and 7).
    /// Regions: 4 = top-left, 5 = bottom-left, 6 = top-right, 7 = bottom-right.
    fn grid_vertical_first() -> EdgeLayout {
        let mut layout = EdgeLayout::new(1, "grid");
        let (left, right) = layout.split_horizontal(1).unwrap();
        layout.split_vertical(left).unwrap();
        layout.split_vertical(right).unwrap();
        layout
    }

    /// 2×2 grid built horizontal-first: one full-width divider (edge 5) and a
    /// vertical divider in each row (edges 6 and 7).
    /// Regions: 4 = top-left, 5 = top-right, 6 = bottom-left, 7 = bottom-right.
    fn grid_horizontal_first() -> EdgeLayout {
        let mut layout = EdgeLayout::new(1, "grid");
        let (top, bottom) = layout.split_vertical(1).unwrap();
        layout.split_horizontal(top).unwrap();
        layout.split_horizontal(bottom).unwrap();
        layout
    }

    fn quadrant_zones() -> Vec<Zone> {
        vec![
            Zone::new("TL", 0.0, 0.0, 0.5, 0.5),
            Zone::new("TR", 0.5, 0.0, 0.5, 0.5),
            Zone::new("BL", 0.0, 0.5, 0.5, 0.5),
            Zone::new("BR", 0.5, 0.5, 0.5, 0.5),
        ]
    }

    // ──────────────────────────────────────────
    // Construction
    // ──────────────────────────────────────────

    #[test]
    fn test_new_layout_is_one_full_region() {
        let layout = EdgeLayout::new(7, "Work");
        assert_eq!(layout.edge_count(), 4);
        assert_eq!(layout.region_count(), 1);
        for id in [LEFT_EDGE, RIGHT_EDGE, TOP_EDGE, BOTTOM_EDGE] {
            assert!(layout.edge(id).unwrap().fixed);
        }
        let zones = layout.zones();
        assert!(zones_match(&zones, &[Zone::new("Zone 1", 0.0, 0.0, 1.0, 1.0)]));
        layout.validate().unwrap();
    }

    // ──────────────────────────────────────────
    // Split
    // ──────────────────────────────────────────

    #[test]
    fn test_split_horizontal_halves_width() {
        let mut layout = EdgeLayout::default();
        let (left, right) = layout.split_horizontal(1).unwrap();

        assert_eq!(layout.region_count(), 2);
        assert!(layout.region(1).is_none());
        assert_rect(&layout, left, Rect::new(0.0, 0.0, 0.5, 1.0));
        assert_rect(&layout, right, Rect::new(0.5, 0.0, 0.5, 1.0));

        let divider = layout.region(left).unwrap().right;
        let edge = layout.edge(divider).unwrap();
        assert_eq!(edge.axis, Axis::Vertical);
        assert!(!edge.fixed);
        assert!(approx_eq(edge.position, 0.5));
        assert!(approx_eq(edge.start, 0.0) && approx_eq(edge.length, 1.0));
        assert_eq!(layout.regions_touching(divider), vec![left, right]);

        assert_eq!(layout.region(left).unwrap().name, "Zone 1");
        assert_eq!(layout.region(right).unwrap().name, "Zone 2");
        layout.validate().unwrap();
    }

    #[test]
    fn test_split_vertical_halves_height() {
        let mut layout = EdgeLayout::default();
        let (top, bottom) = layout.split_vertical(1).unwrap();

        assert_rect(&layout, top, Rect::new(0.0, 0.0, 1.0, 0.5));
        assert_rect(&layout, bottom, Rect::new(0.0, 0.5, 1.0, 0.5));
        let divider = layout.region(top).unwrap().bottom;
        assert_eq!(layout.region(bottom).unwrap().top, divider);
        assert_eq!(layout.edge(divider).unwrap().axis, Axis::Horizontal);
        layout.validate().unwrap();
    }

    #[test]
    fn test_nested_split_spans_only_its_region() {
        let layout = grid_vertical_first();
        let left_divider = layout.edge(6).unwrap();
        assert!(approx_eq(left_divider.start, 0.0) && approx_eq(left_divider.length, 0.5));
        let right_divider = layout.edge(7).unwrap();
        assert!(approx_eq(right_divider.start, 0.5) && approx_eq(right_divider.length, 0.5));
        layout.validate().unwrap();
    }

    #[test]
    fn test_split_halves_sum_to_original() {
        let mut layout = EdgeLayout::default();
        let (_, right) = layout.split_horizontal(1).unwrap();
        let (a, b) = layout.split_horizontal(right).unwrap();
        let wa = layout.region_rect(a).unwrap().width;
        let wb = layout.region_rect(b).unwrap().width;
        assert!(approx_eq(wa, 0.25) && approx_eq(wb, 0.25));
        assert!(approx_eq(wa + wb, 0.5));
    }

    #[test]
    fn test_split_too_small_is_refused_and_leaves_layout() {
        let mut layout = EdgeLayout::default();
        let mut target = 1;
        for _ in 0..3 {
            target = layout.split_horizontal(target).unwrap().0;
        }
        // Width is now 0.125, below 2 × 0.10.
        let before = layout.zones();
        let edges_before = layout.edge_count();
        let err = layout.split_horizontal(target).unwrap_err();
        assert!(matches!(err, LayoutError::RegionTooSmall { region, .. } if region == target));
        assert!(zones_match(&before, &layout.zones()));
        assert_eq!(layout.edge_count(), edges_before);

        // The region is still tall enough to split the other way.
        assert!(layout.split_vertical(target).is_ok());
    }

    #[test]
    fn test_split_allows_exactly_twice_min_size() {
        let mut layout = EdgeLayout::default().with_min_region_size(0.25);
        let (left, _) = layout.split_horizontal(1).unwrap();
        assert!(layout.split_horizontal(left).is_ok());
    }

    #[test]
    fn test_split_unknown_region() {
        let mut layout = EdgeLayout::default();
        assert_eq!(layout.split_vertical(99), Err(LayoutError::UnknownRegion(99)));
    }

    #[test]
    fn test_repeated_splits_keep_full_coverage() {
        let mut layout = EdgeLayout::default();
        let mut targets = vec![1];
        for round in 0..3 {
            let mut next = Vec::new();
            for id in targets {
                let (a, b) = if round % 2 == 0 {
                    layout.split_horizontal(id).unwrap()
                } else {
                    layout.split_vertical(id).unwrap()
                };
                next.push(a);
                next.push(b);
            }
            targets = next;
            layout.validate().unwrap();
        }
        assert_eq!(layout.region_count(), 8);
        let area: f64 = layout.zones().iter().map(|z| z.w * z.h).sum();
        assert!(approx_eq(area, 1.0));
    }

    #[test]
    fn test_split_names_stay_unique() {
        let mut layout = EdgeLayout::default();
        let (a, _) = layout.split_horizontal(1).unwrap();
        layout.split_vertical(a).unwrap();
        let mut names: Vec<String> = layout.regions().map(|r| r.name.clone()).collect();
        names.sort();
        assert_eq!(names, vec!["Zone 1", "Zone 2", "Zone 3"]);
    }

    // ──────────────────────────────────────────
    // Drag
    // ──────────────────────────────────────────

    #[test]
    fn test_drag_moves_and_clamps() {
        let mut layout = EdgeLayout::default();
        let (left, right) = layout.split_horizontal(1).unwrap();
        let divider = layout.region(left).unwrap().right;

        assert_eq!(layout.drag_edge(divider, 0.3), Some(0.3));
        assert_rect(&layout, left, Rect::new(0.0, 0.0, 0.3, 1.0));
        assert_rect(&layout, right, Rect::new(0.3, 0.0, 0.7, 1.0));

        let low = layout.drag_edge(divider, 0.05).unwrap();
        assert!(approx_eq(low, 0.1));
        let high = layout.drag_edge(divider, 1.4).unwrap();
        assert!(approx_eq(high, 0.9));
        layout.validate().unwrap();
    }

    #[test]
    fn test_drag_fixed_or_unknown_edge_is_rejected() {
        let mut layout = EdgeLayout::default();
        assert_eq!(layout.drag_edge(LEFT_EDGE, 0.3), None);
        assert_eq!(layout.drag_edge(42, 0.3), None);
        assert_eq!(layout.edge(LEFT_EDGE).unwrap().position, 0.0);
    }

    #[test]
    fn test_drag_ignores_nan() {
        let mut layout = EdgeLayout::default();
        layout.split_horizontal(1).unwrap();
        assert_eq!(layout.drag_edge(5, f64::NAN), Some(0.5));
    }

    #[test]
    fn test_drag_is_bounded_by_neighbouring_dividers() {
        let mut layout = EdgeLayout::default();
        let (_, right) = layout.split_horizontal(1).unwrap();
        layout.split_horizontal(right).unwrap();
        // Edge 5 at 0.5, edge 6 at 0.75: edge 5 may not pass 0.65.
        let applied = layout.drag_edge(5, 0.9).unwrap();
        assert!(approx_eq(applied, 0.65));
        let applied = layout.drag_edge(6, 0.1).unwrap();
        assert!(approx_eq(applied, 0.75));
        layout.validate().unwrap();
    }

    #[test]
    fn test_drag_shared_vertical_in_grid_reflows_all_four() {
        let mut layout = grid_vertical_first();
        let applied = layout.drag_edge(5, 0.05).unwrap();
        assert!(approx_eq(applied, 0.1));

        assert_rect(&layout, 4, Rect::new(0.0, 0.0, 0.1, 0.5));
        assert_rect(&layout, 5, Rect::new(0.0, 0.5, 0.1, 0.5));
        assert_rect(&layout, 6, Rect::new(0.1, 0.0, 0.9, 0.5));
        assert_rect(&layout, 7, Rect::new(0.1, 0.5, 0.9, 0.5));

        // Partial-span dividers follow immediately.
        let left = layout.edge(6).unwrap();
        assert!(approx_eq(left.start, 0.0) && approx_eq(left.length, 0.1));
        let right = layout.edge(7).unwrap();
        assert!(approx_eq(right.start, 0.1) && approx_eq(right.length, 0.9));
        layout.validate().unwrap();
    }

    #[test]
    fn test_rapid_drags_keep_layout_valid() {
        let mut layout = grid_vertical_first();
        layout.split_horizontal(7).unwrap();
        let positions = [0.2, 0.8, 0.05, 0.95, 0.33, 0.61, 0.5, 0.12];
        for (i, p) in positions.iter().enumerate() {
            layout.drag_edge(5, *p);
            layout.drag_edge(6, 1.0 - p);
            layout.drag_edge(8, *p + 0.1 * i as f64);
            layout.validate().unwrap();
            for region in layout.regions() {
                let rect = layout.region_rect(region.id).unwrap();
                assert!(rect.width >= 0.1 - 1e-9 && rect.height >= 0.1 - 1e-9);
            }
        }
    }

    fn covered_area(layout: &EdgeLayout) -> f64 {
        layout.zones().iter().map(|z| z.w * z.h).sum()
    }

    /// Grid with the right column split again and the middle vertical
    /// deleted. Four separate edges then meet at (0.75, 0.5): 8 above, 9
    /// below, 6 to the left, 7 to the right.
    fn four_way_junction() -> EdgeLayout {
        let mut layout = grid_vertical_first();
        layout.split_horizontal(6).unwrap(); // edge 8, regions 8 | 9
        layout.split_horizontal(7).unwrap(); // edge 9, regions 10 | 11
        layout.delete_edge(5).unwrap();
        layout
    }

    #[test]
    fn test_delete_can_leave_four_edges_meeting_at_a_point() {
        let layout = four_way_junction();
        assert_eq!(layout.edge_count(), 8);
        assert_rect(&layout, 4, Rect::new(0.0, 0.0, 0.75, 0.5));
        assert_rect(&layout, 5, Rect::new(0.0, 0.5, 0.75, 0.5));
        for id in [6, 7, 8, 9] {
            assert!(layout.edge(id).is_some(), "edge {} missing", id);
        }
        layout.validate().unwrap();
    }

    #[test]
    fn test_drag_away_from_junction_fuses_crossing_edges() {
        let mut layout = four_way_junction();
        let applied = layout.drag_edge(9, 0.6).unwrap();
        assert!(approx_eq(applied, 0.6));

        // The two halves of y = 0.5 now border regions that break at
        // different x on each side, so they become one edge.
        assert!(layout.edge(7).is_none());
        let divider = layout.edge(6).unwrap();
        assert!(approx_eq(divider.start, 0.0) && approx_eq(divider.length, 1.0));
        assert_eq!(layout.region(9).unwrap().bottom, 6);
        assert_eq!(layout.region(11).unwrap().top, 6);
        assert_eq!(layout.edge_count(), 7);
        assert!(approx_eq(covered_area(&layout), 1.0));
        layout.validate().unwrap();

        // Moving the fused divider reflows all four regions without a gap.
        layout.drag_edge(6, 0.3).unwrap();
        assert_rect(&layout, 4, Rect::new(0.0, 0.0, 0.75, 0.3));
        assert_rect(&layout, 9, Rect::new(0.75, 0.0, 0.25, 0.3));
        assert_rect(&layout, 5, Rect::new(0.0, 0.3, 0.6, 0.7));
        assert_rect(&layout, 11, Rect::new(0.6, 0.3, 0.4, 0.7));
        assert!(approx_eq(covered_area(&layout), 1.0));
        layout.validate().unwrap();
    }

    #[test]
    fn test_drag_passing_piece_at_junction_fuses_perpendicular_pieces() {
        let mut layout = four_way_junction();
        layout.drag_edge(6, 0.4).unwrap();

        // Only the left regions moved, so the pieces of x = 0.75 fuse.
        assert!(layout.edge(9).is_none());
        let divider = layout.edge(8).unwrap();
        assert!(approx_eq(divider.start, 0.0) && approx_eq(divider.length, 1.0));
        assert_rect(&layout, 4, Rect::new(0.0, 0.0, 0.75, 0.4));
        assert_rect(&layout, 5, Rect::new(0.0, 0.4, 0.75, 0.6));
        assert!(approx_eq(covered_area(&layout), 1.0));
        layout.validate().unwrap();
    }

    #[test]
    fn test_drag_onto_shared_line_keeps_edges_separate() {
        let mut layout = grid_vertical_first();
        layout.drag_edge(6, 0.3).unwrap();
        layout.drag_edge(6, 0.5).unwrap();

        // Edge 5 crosses the junction, so nothing needs fusing.
        assert_eq!(layout.edge_count(), 7);
        assert!(layout.edge(6).is_some() && layout.edge(7).is_some());
        layout.drag_edge(7, 0.7).unwrap();
        assert_rect(&layout, 4, Rect::new(0.0, 0.0, 0.5, 0.5));
        assert_rect(&layout, 6, Rect::new(0.5, 0.0, 0.5, 0.7));
        layout.validate().unwrap();
    }

    // ──────────────────────────────────────────
    // Safety checker
    // ──────────────────────────────────────────

    #[test]
    fn test_fixed_edge_is_not_deletable() {
        let mut layout = EdgeLayout::default();
        let check = layout.can_delete_edge(TOP_EDGE);
        assert!(!check.deletable);
        assert_eq!(check.reason().as_deref(), Some("fixed boundary"));
        assert_eq!(layout.delete_edge(TOP_EDGE), Err(LayoutError::EdgeFixed(TOP_EDGE)));
    }

    #[test]
    fn test_unknown_edge_is_not_deletable() {
        let layout = EdgeLayout::default();
        let check = layout.can_delete_edge(77);
        assert_eq!(check.refusal, Some(LayoutError::UnknownEdge(77)));
    }

    #[test]
    fn test_single_sided_edge_is_not_deletable() {
        let mut layout = EdgeLayout::default();
        let (_, right) = layout.split_horizontal(1).unwrap();
        // Detach the right half from the divider.
        layout.regions.set_bound(right, Axis::Vertical, Side::High, LEFT_EDGE);
        let check = layout.can_delete_edge(5);
        assert_eq!(check.refusal, Some(LayoutError::EdgeSingleSided(5)));
        assert_eq!(
            check.reason().as_deref(),
            Some("edge borders regions on only one side")
        );
    }

    #[test]
    fn test_colinear_group_spans_independent_splits() {
        let layout = grid_horizontal_first();
        assert_eq!(layout.colinear_group(6), vec![6, 7]);
        assert_eq!(layout.colinear_group(5), vec![5]);
        assert!(layout.colinear_group(LEFT_EDGE).is_empty());
    }

    #[test]
    fn test_misaligned_divider_is_refused() {
        let mut layout = EdgeLayout::default();
        let (top, bottom) = layout.split_vertical(1).unwrap();
        layout.split_horizontal(top).unwrap();
        let (_, bottom_right) = layout.split_horizontal(bottom).unwrap();
        layout.split_horizontal(bottom_right).unwrap();

        let divider = 5;
        let before = layout.zones();
        let check = layout.can_delete_edge(divider);
        assert_eq!(check.refusal, Some(LayoutError::EdgeMisaligned(divider)));
        assert_eq!(check.reason().as_deref(), Some("regions misaligned across divider"));

        assert_eq!(
            layout.delete_edge(divider),
            Err(LayoutError::EdgeMisaligned(divider))
        );
        assert!(zones_match(&before, &layout.zones()));
        layout.validate().unwrap();
    }

    // ──────────────────────────────────────────
    // Delete / merge
    // ──────────────────────────────────────────

    #[test]
    fn test_delete_restores_state_before_split() {
        let mut layout = EdgeLayout::default();
        let (left, _) = layout.split_horizontal(1).unwrap();
        let after_first_split = sorted_by_name(layout.zones());

        layout.split_vertical(left).unwrap();
        assert_eq!(layout.region_count(), 3);
        let new_edge = 6;
        assert_eq!(layout.edge(new_edge).unwrap().axis, Axis::Horizontal);

        assert!(layout.can_delete_edge(new_edge).deletable);
        layout.delete_edge(new_edge).unwrap();

        assert_eq!(layout.region_count(), 2);
        assert!(layout.edge(new_edge).is_none());
        assert_eq!(layout.edge_count(), 5);
        assert!(zones_match(&after_first_split, &sorted_by_name(layout.zones())));
        layout.validate().unwrap();
    }

    #[test]
    fn test_delete_tie_keeps_low_side() {
        let mut layout = EdgeLayout::default();
        let (left, right) = layout.split_horizontal(1).unwrap();
        layout.delete_edge(5).unwrap();

        assert!(layout.region(right).is_none());
        assert_rect(&layout, left, Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(layout.region(left).unwrap().name, "Zone 1");
        assert_eq!(layout.edge_count(), 4);
    }

    #[test]
    fn test_delete_middle_vertical_of_grid() {
        let mut layout = grid_vertical_first();
        layout.delete_edge(5).unwrap();

        assert_eq!(layout.region_count(), 2);
        assert_rect(&layout, 4, Rect::new(0.0, 0.0, 1.0, 0.5));
        assert_rect(&layout, 5, Rect::new(0.0, 0.5, 1.0, 0.5));
        // The right column's divider is orphaned and pruned; the left one now
        // spans the full width.
        assert!(layout.edge(7).is_none());
        let divider = layout.edge(6).unwrap();
        assert!(approx_eq(divider.start, 0.0) && approx_eq(divider.length, 1.0));
        assert_eq!(layout.edge_count(), 5);
        layout.validate().unwrap();
    }

    #[test]
    fn test_delete_colinear_group_removes_all_members() {
        let mut layout = grid_horizontal_first();
        layout.delete_edge(7).unwrap();

        assert!(layout.edge(6).is_none());
        assert!(layout.edge(7).is_none());
        assert_eq!(layout.region_count(), 2);
        assert_rect(&layout, 4, Rect::new(0.0, 0.0, 1.0, 0.5));
        assert_rect(&layout, 6, Rect::new(0.0, 0.5, 1.0, 0.5));
        layout.validate().unwrap();
    }

    #[test]
    fn test_delete_full_span_side_merges_into_subdivided_side() {
        let mut layout = EdgeLayout::default();
        let (top, bottom) = layout.split_vertical(1).unwrap();
        let (a, b) = layout.split_horizontal(bottom).unwrap();

        layout.delete_edge(5).unwrap();

        // The subdivided side has more regions, so it survives and grows.
        assert!(layout.region(top).is_none());
        assert_rect(&layout, a, Rect::new(0.0, 0.0, 0.5, 1.0));
        assert_rect(&layout, b, Rect::new(0.5, 0.0, 0.5, 1.0));
        let divider = layout.edge(6).unwrap();
        assert!(approx_eq(divider.start, 0.0) && approx_eq(divider.length, 1.0));
        layout.validate().unwrap();
    }

    #[test]
    fn test_delete_fuses_colinear_edges_left_behind() {
        let mut layout = EdgeLayout::default();
        let (left, right) = layout.split_horizontal(1).unwrap(); // edge 5
        let (top_left, bottom_left) = layout.split_vertical(left).unwrap(); // edge 6
        let (top_right, _) = layout.split_vertical(right).unwrap(); // edge 7
        let (_, far_right) = layout.split_horizontal(top_right).unwrap(); // edge 8 at 0.75

        layout.delete_edge(5).unwrap();

        assert_eq!(layout.region_count(), 3);
        assert_rect(&layout, top_left, Rect::new(0.0, 0.0, 0.75, 0.5));
        assert_rect(&layout, bottom_left, Rect::new(0.0, 0.5, 1.0, 0.5));
        assert_rect(&layout, far_right, Rect::new(0.75, 0.0, 0.25, 0.5));

        // Edge 7 was folded into edge 6, which now runs the full width.
        assert!(layout.edge(7).is_none());
        assert_eq!(layout.region(far_right).unwrap().bottom, 6);
        layout.validate().unwrap();

        // Dragging the fused divider moves every region along it.
        layout.drag_edge(6, 0.3).unwrap();
        assert_rect(&layout, far_right, Rect::new(0.75, 0.0, 0.25, 0.3));
        assert_rect(&layout, bottom_left, Rect::new(0.0, 0.3, 1.0, 0.7));
        layout.validate().unwrap();
    }

    // ──────────────────────────────────────────
    // Hit testing
    // ──────────────────────────────────────────

    #[test]
    fn test_region_and_edge_hit_testing() {
        let mut layout = EdgeLayout::default();
        let (left, right) = layout.split_horizontal(1).unwrap();

        assert_eq!(layout.region_at(Point::new(0.25, 0.5)), Some(left));
        assert_eq!(layout.region_at(Point::new(0.75, 0.9)), Some(right));
        assert_eq!(layout.region_at(Point::new(1.5, 0.5)), None);

        assert_eq!(layout.edge_near(Point::new(0.52, 0.5), 0.05), Some(5));
        assert_eq!(layout.edge_near(Point::new(0.7, 0.5), 0.05), None);
        // Boundaries are never offered for dragging.
        assert_eq!(layout.edge_near(Point::new(0.0, 0.5), 0.05), None);
    }

    #[test]
    fn test_edge_near_respects_span() {
        let layout = grid_vertical_first();
        // Edge 6 covers x in [0, 0.5] only; edge 7 covers [0.5, 1].
        assert_eq!(layout.edge_near(Point::new(0.2, 0.51), 0.05), Some(6));
        assert_eq!(layout.edge_near(Point::new(0.8, 0.51), 0.05), Some(7));
    }

    // ──────────────────────────────────────────
    // Zone conversion
    // ──────────────────────────────────────────

    #[test]
    fn test_round_trip_two_three_four_and_irregular() {
        let cases = vec![
            vec![
                Zone::new("Left", 0.0, 0.0, 0.5, 1.0),
                Zone::new("Right", 0.5, 0.0, 0.5, 1.0),
            ],
            vec![
                Zone::new("A", 0.0, 0.0, 0.25, 1.0),
                Zone::new("B", 0.25, 0.0, 0.5, 1.0),
                Zone::new("C", 0.75, 0.0, 0.25, 1.0),
            ],
            quadrant_zones(),
            vec![
                Zone::new("Main", 0.0, 0.0, 0.6, 1.0),
                Zone::new("Top", 0.6, 0.0, 0.4, 0.3),
                Zone::new("Mid L", 0.6, 0.3, 0.2, 0.4),
                Zone::new("Mid R", 0.8, 0.3, 0.2, 0.4),
                Zone::new("Bottom", 0.6, 0.7, 0.4, 0.3),
            ],
        ];
        for zones in cases {
            let layout = zones_to_edges(&zones).unwrap();
            let back = edges_to_zones(&layout);
            assert!(zones_match(&zones, &back), "{:?} != {:?}", zones, back);
        }
    }

    #[test]
    fn test_zones_build_maximal_edges() {
        let layout = zones_to_edges(&quadrant_zones()).unwrap();
        // One full-length divider per axis.
        assert_eq!(layout.edge_count(), 6);
        let vertical = layout
            .edges()
            .find(|e| !e.fixed && e.axis == Axis::Vertical)
            .unwrap();
        assert_eq!(layout.regions_touching(vertical.id).len(), 4);
        assert!(approx_eq(vertical.length, 1.0));
    }

    #[test]
    fn test_quadrant_zones_drag_and_delete() {
        let mut layout = zones_to_edges(&quadrant_zones()).unwrap();
        let vertical = layout
            .edges()
            .find(|e| !e.fixed && e.axis == Axis::Vertical)
            .map(|e| e.id)
            .unwrap();

        let applied = layout.drag_edge(vertical, 0.05).unwrap();
        assert!(approx_eq(applied, 0.1));
        assert_rect(&layout, 1, Rect::new(0.0, 0.0, 0.1, 0.5));
        assert_rect(&layout, 4, Rect::new(0.1, 0.5, 0.9, 0.5));

        layout.delete_edge(vertical).unwrap();
        let zones = layout.zones();
        assert!(zones_match(
            &zones,
            &[
                Zone::new("TL", 0.0, 0.0, 1.0, 0.5),
                Zone::new("BL", 0.0, 0.5, 1.0, 0.5),
            ]
        ));
        layout.validate().unwrap();
    }

    #[test]
    fn test_zones_snap_nearly_equal_borders() {
        let zones = vec![
            Zone::new("A", 0.0, 0.0, 0.3333, 1.0),
            Zone::new("B", 0.33335, 0.0, 0.66665, 1.0),
        ];
        let layout = zones_to_edges(&zones).unwrap();
        assert_eq!(layout.edge_count(), 5);
        let back = layout.zones();
        assert!((back[0].w + back[1].w - 1.0).abs() < 1e-12);
        assert!(approx_eq(back[0].x + back[0].w, back[1].x));
    }

    #[test]
    fn test_zones_rejects_overlap_gap_and_empty() {
        assert!(matches!(zones_to_edges(&[]), Err(LayoutError::MalformedZoneSet(_))));

        let overlap = vec![
            Zone::new("A", 0.0, 0.0, 0.6, 1.0),
            Zone::new("B", 0.4, 0.0, 0.6, 1.0),
        ];
        assert!(matches!(zones_to_edges(&overlap), Err(LayoutError::MalformedZoneSet(_))));

        let gap = vec![
            Zone::new("A", 0.0, 0.0, 0.4, 1.0),
            Zone::new("B", 0.5, 0.0, 0.5, 1.0),
        ];
        assert!(matches!(zones_to_edges(&gap), Err(LayoutError::MalformedZoneSet(_))));

        let outside = vec![Zone::new("A", 0.0, 0.0, 1.5, 1.0)];
        assert!(matches!(zones_to_edges(&outside), Err(LayoutError::MalformedZoneSet(_))));

        let degenerate = vec![
            Zone::new("A", 0.0, 0.0, 1.0, 1.0),
            Zone::new("B", 0.0, 1.0, 1.0, 0.0),
        ];
        assert!(matches!(zones_to_edges(&degenerate), Err(LayoutError::MalformedZoneSet(_))));
    }

    #[test]
    fn test_zones_reject_small_hole() {
        // Area sums to 1 within tolerance but a 0.02 × 0.02 hole remains.
        let zones = vec![
            Zone::new("Left", 0.0, 0.0, 0.5, 1.0),
            Zone::new("Right top", 0.5, 0.0, 0.5, 0.49),
            Zone::new("Right bottom", 0.5, 0.51, 0.5, 0.49),
            Zone::new("Plug", 0.52, 0.49, 0.48, 0.02),
        ];
        assert!(matches!(zones_to_edges(&zones), Err(LayoutError::MalformedZoneSet(_))));
    }

    #[test]
    fn test_from_zones_sets_identity() {
        let layout = EdgeLayout::from_zones(9, "Ultrawide", &quadrant_zones()).unwrap();
        assert_eq!(layout.id, 9);
        assert_eq!(layout.name, "Ultrawide");
        assert_eq!(layout.region_ids(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_split_after_import() {
        let mut layout = zones_to_edges(&quadrant_zones()).unwrap();
        let (a, b) = layout.split_horizontal(2).unwrap();
        assert_rect(&layout, a, Rect::new(0.5, 0.0, 0.25, 0.5));
        assert_rect(&layout, b, Rect::new(0.75, 0.0, 0.25, 0.5));
        layout.validate().unwrap();
    }
}
