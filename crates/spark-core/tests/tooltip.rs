// File: crates/spark-core/tests/tooltip.rs
// Purpose: Validate the tooltip state machine: snap on first show, smoothing
// ticks, hide/reshow behavior, stale-generation guard, and placement.

use spark_core::tooltip::{
    screen_position, Anchor, PlacementError, ScreenTransform, TooltipController,
};

struct IdentityTransform;

impl ScreenTransform for IdentityTransform {
    fn to_screen(&self, x: f64, y: f64) -> Result<(f64, f64), PlacementError> {
        Ok((x, y))
    }
}

struct BrokenTransform;

impl ScreenTransform for BrokenTransform {
    fn to_screen(&self, _x: f64, _y: f64) -> Result<(f64, f64), PlacementError> {
        Err(PlacementError::TransformUnsupported)
    }
}

#[test]
fn first_show_snaps_to_target() {
    let mut tips = TooltipController::new();
    tips.show("a", (40.0, 10.0), 1);
    let state = tips.state("a").unwrap();
    assert_eq!(state.display, (40.0, 10.0));
    assert!(state.snapped);
    assert!(tips.is_tracking("a"));
}

#[test]
fn smoothing_halves_the_distance_each_tick() {
    let mut tips = TooltipController::new();
    tips.show("a", (0.0, 0.0), 1);
    tips.retarget("a", (100.0, 0.0));
    assert_eq!(tips.tick("a", 0.5, 1), Some((50.0, 0.0)));
    assert_eq!(tips.tick("a", 0.5, 1), Some((75.0, 0.0)));
    assert_eq!(tips.tick("a", 0.5, 1), Some((87.5, 0.0)));
}

#[test]
fn smoothing_converges_without_overshoot() {
    for smoothing in [0.1, 0.5, 0.9, 1.0] {
        let mut tips = TooltipController::new();
        tips.show("a", (0.0, 0.0), 1);
        tips.retarget("a", (100.0, 0.0));
        let mut prev = 0.0;
        for _ in 0..200 {
            let (x, _) = tips.tick("a", smoothing, 1).unwrap();
            assert!(x >= prev && x <= 100.0, "no overshoot for smoothing {smoothing}");
            prev = x;
        }
        assert!(100.0 - prev < 1e-3);
    }
}

#[test]
fn smoothing_of_one_degenerates_to_snap() {
    let mut tips = TooltipController::new();
    tips.show("a", (0.0, 0.0), 1);
    tips.retarget("a", (64.0, 32.0));
    assert_eq!(tips.tick("a", 1.0, 1), Some((64.0, 32.0)));
}

#[test]
fn hide_stops_tracking_and_resets_snap() {
    let mut tips = TooltipController::new();
    tips.show("a", (10.0, 10.0), 1);
    tips.retarget("a", (90.0, 10.0));
    tips.tick("a", 0.5, 1);
    tips.hide("a");
    assert!(!tips.is_tracking("a"));
    assert_eq!(tips.tick("a", 0.5, 1), None, "no orphaned smoothing loop");

    // The next show snaps again instead of gliding in from a stale position.
    tips.show("a", (200.0, 0.0), 1);
    assert_eq!(tips.state("a").unwrap().display, (200.0, 0.0));
}

#[test]
fn stale_generation_ticks_are_inert() {
    let mut tips = TooltipController::new();
    tips.show("a", (10.0, 10.0), 1);
    // A re-render bumped the generation; a tick scheduled under the old
    // pass must not mutate the new state.
    tips.show("a", (10.0, 10.0), 2);
    tips.retarget("a", (50.0, 10.0));
    assert_eq!(tips.tick("a", 0.5, 1), None);
    assert_eq!(tips.state("a").unwrap().display, (10.0, 10.0));
    assert_eq!(tips.tick("a", 0.5, 2), Some((30.0, 10.0)));
}

#[test]
fn instances_are_independent() {
    let mut tips = TooltipController::new();
    tips.show("a", (1.0, 1.0), 1);
    tips.show("b", (9.0, 9.0), 1);
    tips.hide("a");
    assert!(!tips.is_tracking("a"));
    assert!(tips.is_tracking("b"));
    tips.drop_instance("b");
    assert!(tips.state("b").is_none());
}

#[test]
fn placement_centers_and_raises_above_the_anchor() {
    let anchor = Anchor { x: 100.0, y: 40.0 };
    let pos = screen_position(&IdentityTransform, anchor, 60.0, 20.0, 3.0).unwrap();
    // Centered horizontally; raised by height + radius * 2 + 8.
    assert_eq!(pos, (70.0, 40.0 - 20.0 - 14.0));
}

#[test]
fn placement_failure_is_scoped_to_the_call() {
    let anchor = Anchor { x: 0.0, y: 0.0 };
    let err = screen_position(&BrokenTransform, anchor, 10.0, 10.0, 0.0).unwrap_err();
    assert_eq!(err, PlacementError::TransformUnsupported);
}
