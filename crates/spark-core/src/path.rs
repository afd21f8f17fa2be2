// File: crates/spark-core/src/path.rs
// Summary: Path generation: straight and monotone-cubic curves, gap-aware
// splitting, matching fill-area geometry, and stroke length measurement.

use crate::layout::PlottedPoint;
use crate::types::nan_to;

/// Samples per cubic segment when flattening for length measurement.
const LENGTH_STEPS: usize = 16;

/// Format a coordinate pair the way the emitted path expects: NaN coerced to
/// zero, shortest decimal representation.
fn coord(x: f64, y: f64) -> String {
    format!("{},{}", nan_to(x, 0.0), nan_to(y, 0.0))
}

/// Knot tangents for the monotone-cubic scheme: the tangent at an interior
/// knot is the harmonic mean of its adjacent secant slopes when they share a
/// sign, else zero (no overshoot past local extrema). Boundary tangents equal
/// the nearest secant slope.
fn monotone_tangents(pts: &[(f64, f64)]) -> Vec<f64> {
    let n = pts.len() - 1;
    let mut slopes = Vec::with_capacity(n);
    for i in 0..n {
        let dx = pts[i + 1].0 - pts[i].0;
        let dy = pts[i + 1].1 - pts[i].1;
        slopes.push(dy / dx);
    }
    let mut tangents = vec![0.0; n + 1];
    tangents[0] = slopes[0];
    tangents[n] = slopes[n - 1];
    for i in 1..n {
        if slopes[i - 1] * slopes[i] <= 0.0 {
            tangents[i] = 0.0;
        } else {
            tangents[i] = (2.0 * slopes[i - 1] * slopes[i]) / (slopes[i - 1] + slopes[i]);
        }
    }
    tangents
}

/// Control points for segment i: one-third and two-thirds of the horizontal
/// span, heights derived from the endpoint tangents.
fn segment_controls(pts: &[(f64, f64)], tangents: &[f64], i: usize) -> ((f64, f64), (f64, f64)) {
    let (x1, y1) = pts[i];
    let (x2, y2) = pts[i + 1];
    let third = (x2 - x1) / 3.0;
    (
        (x1 + third, y1 + tangents[i] * third),
        (x2 - third, y2 - tangents[i + 1] * third),
    )
}

/// Smooth path fragment ("x0,y0 C c1 c2 p1 ..."), without a leading move-to.
/// Fewer than 2 points yields a degenerate "0,0" fragment, as the original
/// renderer emits.
pub fn smooth_fragment(pts: &[(f64, f64)]) -> String {
    if pts.len() < 2 {
        return "0,0".to_string();
    }
    let tangents = monotone_tangents(pts);
    let mut path = vec![coord(pts[0].0, pts[0].1)];
    for i in 0..pts.len() - 1 {
        let (c1, c2) = segment_controls(pts, &tangents, i);
        path.push(format!(
            "C {} {} {}",
            coord(c1.0, c1.1),
            coord(c2.0, c2.1),
            coord(pts[i + 1].0, pts[i + 1].1)
        ));
    }
    path.join(" ")
}

/// Straight polyline fragment ("x0,y0 L x1,y1 ..."), without a leading move-to.
pub fn straight_fragment(pts: &[(f64, f64)]) -> String {
    if pts.len() < 2 {
        return "0,0".to_string();
    }
    let mut path = vec![coord(pts[0].0, pts[0].1)];
    for &(x, y) in &pts[1..] {
        path.push(format!("L {}", coord(x, y)));
    }
    path.join(" ")
}

fn fragment(pts: &[(f64, f64)], curve: bool) -> String {
    if curve {
        smooth_fragment(pts)
    } else {
        straight_fragment(pts)
    }
}

/// Full line path (`M ...`) over a coordinate run, or None below 2 points.
pub fn line_path(pts: &[(f64, f64)], curve: bool) -> Option<String> {
    if pts.len() < 2 {
        return None;
    }
    Some(format!("M {}", fragment(pts, curve)))
}

/// Closed fill-area path: the curve on top, the baseline below.
pub fn area_path(pts: &[(f64, f64)], curve: bool, baseline: f64) -> Option<String> {
    if pts.len() < 2 {
        return None;
    }
    let first = pts[0];
    let last = pts[pts.len() - 1];
    Some(format!(
        "M {} {} L {} Z",
        coord(first.0, baseline),
        fragment(pts, curve),
        coord(last.0, baseline)
    ))
}

/// Maximal runs of present points. With gap-cutting each run becomes an
/// independent sub-path; single isolated points are kept here (they may still
/// render a marker) but produce no path.
pub fn present_runs(points: &[PlottedPoint]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    for p in points {
        if p.raw.is_some() {
            current.push((p.x, p.y));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// All present points as one contiguous run (the "ignore gaps" policy).
pub fn present_points(points: &[PlottedPoint]) -> Vec<(f64, f64)> {
    points
        .iter()
        .filter(|p| p.raw.is_some())
        .map(|p| (p.x, p.y))
        .collect()
}

/// Line sub-paths under the configured gap policy. Without gap-cutting this
/// is at most one path bridging across gaps; with it, one per drawable run.
pub fn line_subpaths(points: &[PlottedPoint], curve: bool, cut_gaps: bool) -> Vec<String> {
    if cut_gaps {
        present_runs(points)
            .iter()
            .filter_map(|run| line_path(run, curve))
            .collect()
    } else {
        line_path(&present_points(points), curve).into_iter().collect()
    }
}

/// Fill-area sub-paths mirroring `line_subpaths`.
pub fn area_subpaths(
    points: &[PlottedPoint],
    curve: bool,
    cut_gaps: bool,
    baseline: f64,
) -> Vec<String> {
    if cut_gaps {
        present_runs(points)
            .iter()
            .filter_map(|run| area_path(run, curve, baseline))
            .collect()
    } else {
        area_path(&present_points(points), curve, baseline)
            .into_iter()
            .collect()
    }
}

fn cubic_point(p0: (f64, f64), c1: (f64, f64), c2: (f64, f64), p1: (f64, f64), t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    (
        a * p0.0 + b * c1.0 + c * c2.0 + d * p1.0,
        a * p0.1 + b * c1.1 + c * c2.1 + d * p1.1,
    )
}

fn dist(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt()
}

/// Total stroke length of the path drawn over `pts`, measured by flattening
/// each cubic segment. Drives the dash-offset reveal, which needs the full
/// length up front.
pub fn stroke_length(pts: &[(f64, f64)], curve: bool) -> f64 {
    if pts.len() < 2 {
        return 0.0;
    }
    if !curve {
        return pts.windows(2).map(|w| dist(w[0], w[1])).sum();
    }
    let tangents = monotone_tangents(pts);
    let mut total = 0.0;
    for i in 0..pts.len() - 1 {
        let (c1, c2) = segment_controls(pts, &tangents, i);
        let mut prev = pts[i];
        for step in 1..=LENGTH_STEPS {
            let t = step as f64 / LENGTH_STEPS as f64;
            let next = cubic_point(pts[i], c1, c2, pts[i + 1], t);
            total += dist(prev, next);
            prev = next;
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_length_is_euclidean() {
        let pts = vec![(0.0, 0.0), (3.0, 4.0)];
        assert!((stroke_length(&pts, false) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn curved_length_at_least_chord() {
        let pts = vec![(0.0, 0.0), (10.0, 5.0), (20.0, 0.0)];
        let chord: f64 = pts.windows(2).map(|w| dist(w[0], w[1])).sum();
        assert!(stroke_length(&pts, true) >= chord - 1e-9);
    }
}
