// File: crates/spark-core/src/layout.rs
// Summary: Maps a normalized series onto drawing-area geometry (points and bars).

use crate::dataset::NormalizedSeries;
use crate::types::{nan_to, DrawArea};

/// Fraction of a bar slot occupied by the bar rectangle.
const BAR_FILL: f64 = 0.6;

/// One plotted slot in line mode. Missing slots keep their x position
/// (they still own a hit region) but carry `raw: None`.
#[derive(Clone, Debug, PartialEq)]
pub struct PlottedPoint {
    pub x: f64,
    pub y: f64,
    pub raw: Option<f64>,
    pub label: Option<String>,
}

/// One plotted slot in bar mode. The rectangle is anchored at the zero
/// baseline: `y` is its top edge and `height >= 0` always holds.
#[derive(Clone, Debug, PartialEq)]
pub struct PlottedBar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub is_positive: bool,
    pub raw: Option<f64>,
    pub label: Option<String>,
}

/// Horizontal slot width for line mode: first and last points sit exactly on
/// the drawing area's edges. A single-point series has no slot.
pub fn line_slot(area: &DrawArea, count: usize) -> f64 {
    if count > 1 {
        area.width / (count as f64 - 1.0)
    } else {
        0.0
    }
}

/// Horizontal slot width for bar mode: each bar owns an equal-width column.
pub fn bar_slot(area: &DrawArea, count: usize) -> f64 {
    if count > 0 {
        area.width / count as f64
    } else {
        0.0
    }
}

/// Vertical position of a shifted value against the series max, inverted
/// because y grows downward, then offset by the top inset.
fn value_y(shifted: f64, max: f64, area: &DrawArea) -> f64 {
    nan_to((1.0 - shifted / max) * area.height + area.top, 0.0)
}

/// Lay out a line series. Missing slots use y computed from zero so they
/// still have a deterministic anchor; path building skips them.
pub fn line_points(series: &NormalizedSeries, area: &DrawArea) -> Vec<PlottedPoint> {
    let count = series.len();
    let slot = line_slot(area, count);
    series
        .points
        .iter()
        .map(|p| {
            let x = if count == 1 {
                area.left + area.width / 2.0
            } else {
                nan_to(area.left + slot * p.index as f64, area.left)
            };
            PlottedPoint {
                x,
                y: value_y(p.shifted.unwrap_or(0.0), series.max, area),
                raw: p.raw,
                label: p.label.clone(),
            }
        })
        .collect()
}

/// Zero-baseline y coordinate in shifted space. The baseline is where a raw
/// value of zero lands after shifting; with an all-negative series the shift
/// exceeds the shifted max, so the result is clamped to the area and bars end
/// up anchored at the top.
pub fn baseline_y(series: &NormalizedSeries, area: &DrawArea) -> f64 {
    value_y(series.shift, series.max, area).clamp(area.top, area.bottom)
}

/// Lay out a bar series. Rectangles grow up from the baseline for
/// non-negative raw values and down for negative ones; missing slots produce
/// a zero-height rect sitting on the baseline.
pub fn bars(series: &NormalizedSeries, area: &DrawArea) -> Vec<PlottedBar> {
    let count = series.len();
    let slot = bar_slot(area, count);
    let bar_w = nan_to(slot * BAR_FILL, 0.0);
    let base = baseline_y(series, area);
    series
        .points
        .iter()
        .map(|p| {
            let x = nan_to(area.left + slot * p.index as f64 + (slot - bar_w) / 2.0, area.left);
            if count == 1 {
                // Degenerate single-element series: one full-height bar.
                return PlottedBar {
                    x,
                    y: area.top,
                    width: bar_w,
                    height: area.height,
                    is_positive: p.raw.unwrap_or(0.0) >= 0.0,
                    raw: p.raw,
                    label: p.label.clone(),
                };
            }
            let raw = p.raw.unwrap_or(0.0);
            let tip = value_y(p.shifted.unwrap_or(series.shift), series.max, area)
                .clamp(area.top, area.bottom);
            let (y, height) = if raw >= 0.0 {
                (tip, nan_to((base - tip).max(0.0), 0.0))
            } else {
                (base, nan_to((tip - base).max(0.0), 0.0))
            };
            PlottedBar {
                x,
                y,
                width: bar_w,
                height,
                is_positive: raw >= 0.0,
                raw: p.raw,
                label: p.label.clone(),
            }
        })
        .collect()
}

/// Bar mode widens the coordinate viewport by half a slot on each side so
/// edge bars are not clipped. Returns (min_x, width) for the viewport.
pub fn bar_viewport(surface_width: f64, slot: f64) -> (f64, f64) {
    (-slot / 2.0, surface_width + slot)
}
