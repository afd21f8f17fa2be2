// File: crates/spark-core/tests/layout.rs
// Purpose: Validate point/bar geometry: slots, baselines, signed values, and
// degenerate single-element series.

use spark_core::dataset::{Dataset, NormalizedSeries};
use spark_core::layout::{bar_slot, bar_viewport, bars, baseline_y, line_points, line_slot};
use spark_core::types::DrawArea;

fn area_100() -> DrawArea {
    DrawArea { left: 0.0, top: 0.0, width: 100.0, height: 100.0, right: 100.0, bottom: 100.0 }
}

fn series(values: &str) -> NormalizedSeries {
    NormalizedSeries::from_dataset(&Dataset::parse(Some(values), None))
}

#[test]
fn line_endpoints_sit_on_area_edges() {
    let s = series("[0, 5, 10]");
    let area = area_100();
    let pts = line_points(&s, &area);
    assert_eq!(pts[0].x, 0.0);
    assert_eq!(pts[2].x, 100.0);
    assert_eq!(line_slot(&area, 3), 50.0);
    // Higher value -> smaller y.
    assert!(pts[2].y < pts[0].y);
    assert_eq!(pts[2].y, 0.0);
    assert_eq!(pts[0].y, 100.0);
}

#[test]
fn single_point_is_centered_without_nan() {
    let s = series("[5]");
    let pts = line_points(&s, &area_100());
    assert_eq!(pts.len(), 1);
    assert_eq!(pts[0].x, 50.0);
    assert!(pts[0].x.is_finite() && pts[0].y.is_finite());
}

#[test]
fn missing_slots_keep_positions_but_no_value() {
    let s = series("[1, null, 3]");
    let pts = line_points(&s, &area_100());
    assert_eq!(pts.len(), 3);
    assert_eq!(pts[1].x, 50.0);
    assert_eq!(pts[1].raw, None);
}

#[test]
fn all_zero_series_coerces_nan_to_zero() {
    let s = series("[0, 0, 0]");
    for p in line_points(&s, &area_100()) {
        assert!(p.y.is_finite(), "0/0 ratios must never leak NaN");
    }
}

#[test]
fn signed_bars_grow_from_the_zero_baseline() {
    let s = series("[3, -2, 0]");
    let area = area_100();
    let base = baseline_y(&s, &area);
    assert_eq!(base, 60.0); // shift 2, max 5

    let b = bars(&s, &area);
    assert_eq!(b.len(), 3);

    // Bar 0 grows upward from the baseline.
    assert!(b[0].is_positive);
    assert_eq!(b[0].y, 0.0);
    assert_eq!(b[0].height, 60.0);

    // Bar 1 grows downward from the baseline.
    assert!(!b[1].is_positive);
    assert_eq!(b[1].y, 60.0);
    assert_eq!(b[1].height, 40.0);

    // Bar 2 is zero-height at the baseline.
    assert!(b[2].is_positive);
    assert_eq!(b[2].y, 60.0);
    assert_eq!(b[2].height, 0.0);
}

#[test]
fn every_bar_height_is_non_negative() {
    let s = series("[-10, 4, null, 0, 7, -3]");
    for b in bars(&s, &area_100()) {
        assert!(b.height >= 0.0);
        assert!(b.height.is_finite() && b.y.is_finite());
    }
}

#[test]
fn all_negative_bars_anchor_at_the_top() {
    let s = series("[-5, -2]");
    let area = area_100();
    assert_eq!(baseline_y(&s, &area), 0.0);
    let b = bars(&s, &area);
    assert_eq!(b[0].y, 0.0);
    assert_eq!(b[0].height, 100.0);
    assert_eq!(b[1].y, 0.0);
}

#[test]
fn single_bar_is_full_height_and_centered() {
    let s = series("[7]");
    let area = area_100();
    let b = bars(&s, &area);
    assert_eq!(b.len(), 1);
    assert_eq!(b[0].y, 0.0);
    assert_eq!(b[0].height, 100.0);
    // Bar occupies 60% of its slot, centered in the area.
    assert_eq!(b[0].width, 60.0);
    assert_eq!(b[0].x, 20.0);
}

#[test]
fn bar_viewport_widens_half_a_slot_each_side() {
    let area = area_100();
    let slot = bar_slot(&area, 4);
    let (min_x, width) = bar_viewport(124.0, slot);
    assert_eq!(slot, 25.0);
    assert_eq!(min_x, -12.5);
    assert_eq!(width, 149.0);
}

#[test]
fn empty_series_produces_no_geometry() {
    let s = series("[]");
    let area = area_100();
    assert!(line_points(&s, &area).is_empty());
    assert!(bars(&s, &area).is_empty());
}
