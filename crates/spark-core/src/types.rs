// File: crates/spark-core/src/types.rs
// Summary: Shared types and constants (fallback sizes, paddings, drawing area).

/// Fallback surface width when the container measures zero (detached node).
pub const FALLBACK_WIDTH: f64 = 300.0;
/// Fallback surface height when the container measures zero.
pub const FALLBACK_HEIGHT: f64 = 100.0;

/// Padding between the container bounds and the drawing area, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Insets {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Insets {
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub fn hsum(&self) -> f64 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub fn vsum(&self) -> f64 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(12.0, 12.0, 12.0, 12.0)
    }
}

/// Drawing area inset from the container bounds.
/// `right`/`bottom` are derived and kept for convenience in path math.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub right: f64,
    pub bottom: f64,
}

impl DrawArea {
    /// Compute the drawing area from a measured container box.
    /// A zero (or negative) measurement falls back to 300x100 so a chart can
    /// still be laid out before its container is attached/measurable.
    pub fn compute(measured_width: f64, measured_height: f64, insets: Insets) -> Self {
        let w = if measured_width > 0.0 { measured_width } else { FALLBACK_WIDTH };
        let h = if measured_height > 0.0 { measured_height } else { FALLBACK_HEIGHT };
        Self {
            left: insets.left,
            top: insets.top,
            width: w - insets.hsum(),
            height: h - insets.vsum(),
            right: w - insets.right,
            bottom: h - insets.bottom,
        }
    }
}

/// Coerce NaN to a fallback so degenerate ratios (0/0) never reach a path
/// string or a rect attribute.
#[inline]
pub fn nan_to(v: f64, fallback: f64) -> f64 {
    if v.is_nan() { fallback } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_size_applies_when_unmeasured() {
        let area = DrawArea::compute(0.0, 0.0, Insets::default());
        assert_eq!(area.width, FALLBACK_WIDTH - 24.0);
        assert_eq!(area.height, FALLBACK_HEIGHT - 24.0);
        assert_eq!(area.bottom, FALLBACK_HEIGHT - 12.0);
    }

    #[test]
    fn nan_coercion() {
        assert_eq!(nan_to(0.0 / 0.0, 0.0), 0.0);
        assert_eq!(nan_to(1.5, 0.0), 1.5);
    }
}
