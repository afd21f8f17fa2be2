// File: crates/spark-core/src/config.rs
// Summary: String-valued attribute surface and its typed resolution into ChartOptions.

use std::collections::BTreeMap;

/// Attribute keys recognized by the engine. Anything else is ignored.
pub const KEY_SET: &str = "set";
pub const KEY_DATES: &str = "dates";
pub const KEY_BAR: &str = "bar";
pub const KEY_ID: &str = "id";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
}

/// Foreground/background colors resolved from the container's computed style.
/// The container abstraction is external; callers pass the resolved values in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceColors {
    pub foreground: String,
    pub background: String,
}

impl Default for SurfaceColors {
    fn default() -> Self {
        Self {
            foreground: "#1A1A1A".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }
}

/// Ordered string-keyed attribute map, as sourced from the container.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attrs(BTreeMap<String, String>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|s| s.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// String lookup with fallback.
    pub fn str_or(&self, key: &str, fallback: &str) -> String {
        self.get(key).unwrap_or(fallback).to_string()
    }

    /// Numeric lookup; unparsable or absent values fall back.
    pub fn num_or(&self, key: &str, fallback: f64) -> f64 {
        self.get(key)
            .and_then(|s| s.trim().parse::<f64>().ok())
            .unwrap_or(fallback)
    }

    /// Boolean lookup; bare presence means true, `"false"` means false.
    pub fn bool_or(&self, key: &str, fallback: bool) -> bool {
        match self.get(key) {
            None => fallback,
            Some(v) => !v.trim().eq_ignore_ascii_case("false"),
        }
    }
}

/// Fully resolved per-render options. Every field has a documented fallback;
/// resolution never fails.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartOptions {
    pub kind: ChartKind,
    pub curve: bool,
    pub cut_null: bool,
    pub line_color: String,
    pub line_thickness: f64,
    pub area_color: String,
    pub plot_color: String,
    pub plot_radius: f64,
    /// Max series length that still shows point markers.
    pub plot_threshold: usize,
    pub indicator_color: String,
    pub indicator_width: f64,
    pub locale: String,
    pub rounding: usize,
    pub show_last_value: bool,
    pub value_color: String,
    pub value_font_size: f64,
    /// Tooltip smoothing factor in (0, 1]; 1 snaps immediately.
    pub tooltip_smoothing: f64,
    pub animate: bool,
}

impl ChartOptions {
    pub fn resolve(attrs: &Attrs, colors: &SurfaceColors) -> Self {
        let kind = if attrs.has(KEY_BAR) { ChartKind::Bar } else { ChartKind::Line };
        let line_color = attrs.str_or("line-color", &colors.foreground);
        let plot_color = attrs.str_or("plot-color", &line_color);
        let indicator_color = attrs.str_or("indicator-color", &line_color);
        let rounding = attrs.num_or("number-rounding", 0.0).max(0.0).min(6.0) as usize;
        let smoothing = attrs.num_or("tooltip-smoothing", 0.2);
        let tooltip_smoothing = if smoothing > 0.0 && smoothing <= 1.0 { smoothing } else { 0.2 };
        Self {
            kind,
            curve: attrs.bool_or("curve", true),
            cut_null: attrs.bool_or("cut-null", false),
            line_thickness: attrs.num_or("line-thickness", 2.0),
            area_color: attrs.str_or("area-color", "transparent"),
            plot_radius: attrs.num_or("plot-radius", 0.0).max(0.0),
            plot_threshold: attrs.num_or("plot-threshold", 100.0).max(0.0) as usize,
            indicator_width: attrs.num_or("indicator-width", 1.0),
            locale: attrs.str_or("number-locale", "en-US"),
            rounding,
            show_last_value: attrs.bool_or("show-last-value", false),
            value_color: attrs.str_or("value-color", &colors.foreground),
            value_font_size: attrs.num_or("value-font-size", 12.0),
            tooltip_smoothing,
            animate: attrs.bool_or("animate", false),
            line_color,
            plot_color,
            indicator_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallbacks_apply_for_absent_and_unparsable() {
        let mut attrs = Attrs::new();
        attrs.set("line-thickness", "not-a-number");
        let opts = ChartOptions::resolve(&attrs, &SurfaceColors::default());
        assert_eq!(opts.kind, ChartKind::Line);
        assert_eq!(opts.line_thickness, 2.0);
        assert_eq!(opts.line_color, "#1A1A1A");
        assert_eq!(opts.plot_color, opts.line_color);
        assert_eq!(opts.tooltip_smoothing, 0.2);
        assert!(opts.curve);
        assert!(!opts.animate);
    }

    #[test]
    fn bare_presence_means_true() {
        let mut attrs = Attrs::new();
        attrs.set(KEY_BAR, "");
        attrs.set("animate", "");
        attrs.set("curve", "false");
        let opts = ChartOptions::resolve(&attrs, &SurfaceColors::default());
        assert_eq!(opts.kind, ChartKind::Bar);
        assert!(opts.animate);
        assert!(!opts.curve);
    }

    #[test]
    fn smoothing_out_of_range_falls_back() {
        let mut attrs = Attrs::new();
        attrs.set("tooltip-smoothing", "1.5");
        let opts = ChartOptions::resolve(&attrs, &SurfaceColors::default());
        assert_eq!(opts.tooltip_smoothing, 0.2);
        let mut attrs = Attrs::new();
        attrs.set("tooltip-smoothing", "1");
        let opts = ChartOptions::resolve(&attrs, &SurfaceColors::default());
        assert_eq!(opts.tooltip_smoothing, 1.0);
    }
}
