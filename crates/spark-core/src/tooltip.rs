// File: crates/spark-core/src/tooltip.rs
// Summary: Tooltip state machine: snap-on-show, exponential smoothing toward
// the target on ticks, explicit hide/teardown, anchor and placement math.

use std::collections::HashMap;

use thiserror::Error;

use crate::format::format_number;
use crate::layout::{PlottedBar, PlottedPoint};

/// Shown for missing values.
pub const MISSING_PLACEHOLDER: &str = "–";

/// Screen-space transformation capability of the hosting surface. Failing
/// here aborts only the placement call, never the render pass.
pub trait ScreenTransform {
    fn to_screen(&self, x: f64, y: f64) -> Result<(f64, f64), PlacementError>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("the hosting surface does not support screen-space transformation")]
    TransformUnsupported,
    #[error("the screen transformation matrix is unavailable")]
    MatrixUnavailable,
}

/// Tooltip anchor in drawing-area coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
}

/// Anchor for a line-mode slot: the plotted point itself.
pub fn point_anchor(p: &PlottedPoint) -> Anchor {
    Anchor { x: p.x, y: p.y }
}

/// Anchor for a bar: horizontally centered; vertically the rect's top edge,
/// which for a negative bar is its baseline-side edge rather than the tip.
pub fn bar_anchor(b: &PlottedBar) -> Anchor {
    Anchor { x: b.x + b.width / 2.0, y: b.y }
}

/// Tooltip text: label (if any) followed by the locale-formatted value, or a
/// placeholder when the value is missing.
pub fn content(label: Option<&str>, raw: Option<f64>, locale: &str, rounding: usize) -> String {
    let value = match raw {
        Some(v) => format_number(v, locale, rounding),
        None => MISSING_PLACEHOLDER.to_string(),
    };
    match label {
        Some(l) => format!("{} {}", l, value),
        None => value,
    }
}

/// Screen position for the tooltip box: centered horizontally over the
/// anchor, raised above it by the box's measured height plus a margin
/// proportional to the marker radius.
pub fn screen_position(
    surface: &dyn ScreenTransform,
    anchor: Anchor,
    tooltip_width: f64,
    tooltip_height: f64,
    plot_radius: f64,
) -> Result<(f64, f64), PlacementError> {
    let (sx, sy) = surface.to_screen(anchor.x, anchor.y)?;
    Ok((
        sx - tooltip_width / 2.0,
        sy - tooltip_height - (plot_radius * 2.0 + 8.0),
    ))
}

/// Per-instance tooltip state. Outlives a single hover cycle so repeated
/// hovers reuse the entry without flicker; `snapped` resets on hide so the
/// next show snaps instead of gliding in from a stale position.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipState {
    pub target: (f64, f64),
    pub display: (f64, f64),
    pub snapped: bool,
    pub tracking: bool,
    generation: u64,
}

/// Owned map from chart identity to tooltip state. The only persistent
/// mutable state shared across render passes; only this controller writes.
#[derive(Debug, Default)]
pub struct TooltipController {
    states: HashMap<String, TooltipState>,
}

impl TooltipController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer entered a slot. The first show after creation or hide places
    /// the display directly on the target (snap) and starts tracking.
    pub fn show(&mut self, id: &str, target: (f64, f64), generation: u64) {
        let state = self
            .states
            .entry(id.to_string())
            .or_insert_with(|| TooltipState {
                target,
                display: target,
                snapped: false,
                tracking: false,
                generation,
            });
        state.generation = generation;
        state.target = target;
        if !state.snapped {
            state.display = target;
            state.snapped = true;
        }
        state.tracking = true;
    }

    /// Pointer moved to another slot without leaving the chart: retarget,
    /// keep the displayed position gliding.
    pub fn retarget(&mut self, id: &str, target: (f64, f64)) {
        if let Some(state) = self.states.get_mut(id) {
            state.target = target;
        }
    }

    /// One smoothing tick: `display += (target - display) * smoothing`.
    /// Returns the new display position, or None when not tracking or when
    /// the entry belongs to a stale render generation.
    pub fn tick(&mut self, id: &str, smoothing: f64, generation: u64) -> Option<(f64, f64)> {
        let state = self.states.get_mut(id)?;
        if !state.tracking || state.generation != generation {
            return None;
        }
        state.display.0 += (state.target.0 - state.display.0) * smoothing;
        state.display.1 += (state.target.1 - state.display.1) * smoothing;
        Some(state.display)
    }

    /// Pointer left: stop the tracking loop and reset the snap flag.
    pub fn hide(&mut self, id: &str) {
        if let Some(state) = self.states.get_mut(id) {
            state.tracking = false;
            state.snapped = false;
        }
    }

    /// Tear down an instance entirely (container removed). Tracking stops
    /// before the entry is dropped; recreation on next show is idempotent.
    pub fn drop_instance(&mut self, id: &str) {
        if let Some(state) = self.states.get_mut(id) {
            state.tracking = false;
        }
        self.states.remove(id);
    }

    pub fn state(&self, id: &str) -> Option<&TooltipState> {
        self.states.get(id)
    }

    pub fn is_tracking(&self, id: &str) -> bool {
        self.states.get(id).map(|s| s.tracking).unwrap_or(false)
    }
}
