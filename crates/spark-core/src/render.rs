// File: crates/spark-core/src/render.rs
// Summary: Render orchestrator: per-instance state records, full subtree
// rebuild, hit regions, and first-render animation arming.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::animate::{RevealAnimation, RevealPlan};
use crate::config::{Attrs, ChartKind, ChartOptions, SurfaceColors, KEY_DATES, KEY_ID, KEY_SET};
use crate::dataset::{Dataset, NormalizedSeries};
use crate::layout;
use crate::layout::{PlottedBar, PlottedPoint};
use crate::path;
use crate::svg::{self, Element};
use crate::tooltip::{bar_anchor, point_anchor, Anchor, TooltipController};
use crate::types::{DrawArea, Insets, FALLBACK_HEIGHT, FALLBACK_WIDTH};

/// Reveal animation only runs while the render count is below this.
const FIRST_PAINT_THRESHOLD: u64 = 1;

/// One chart to render: identity, attributes, measured container box, and
/// resolved container colors. Construction fixes the identity token so every
/// render of the same instance hits the same state record.
#[derive(Clone, Debug)]
pub struct ChartInstance {
    key: String,
    pub attrs: Attrs,
    pub width: f64,
    pub height: f64,
    pub colors: SurfaceColors,
}

impl ChartInstance {
    pub fn new(attrs: Attrs, width: f64, height: f64, colors: SurfaceColors) -> Self {
        let key = attrs
            .get(KEY_ID)
            .map(str::to_string)
            .unwrap_or_else(svg::create_uid);
        Self { key, attrs, width, height, colors }
    }

    /// Stable identity token (configured `id` or a generated uid).
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Engine-owned per-instance record; replaces hidden counters on host nodes.
#[derive(Debug, Default)]
struct InstanceState {
    render_count: u64,
    generation: u64,
    warned_missing_set: bool,
}

/// Pointer-interaction region for one data index, spanning its full slot
/// width regardless of whether the index has visible geometry. Carries the
/// tooltip anchor and content inputs for that index.
#[derive(Clone, Debug, PartialEq)]
pub struct HitRegion {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub anchor: Anchor,
    pub raw: Option<f64>,
    pub label: Option<String>,
}

/// Everything one render pass produced. The host mounts `svg`, wires the hit
/// regions to the tooltip controller, and drives `reveal` if present.
#[derive(Clone, Debug)]
pub struct RenderOutput {
    pub svg: Element,
    pub generation: u64,
    pub area: DrawArea,
    pub points: Vec<PlottedPoint>,
    pub bars: Vec<PlottedBar>,
    pub hit_regions: Vec<HitRegion>,
    pub reveal: Option<RevealAnimation>,
}

/// Render orchestrator. Owns instance state records and the tooltip state
/// map; `render` always clears and fully rebuilds, never patches.
#[derive(Debug, Default)]
pub struct Renderer {
    states: HashMap<String, InstanceState>,
    pub tooltips: TooltipController,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the chart now. Infallible: malformed input degrades to an
    /// empty but structurally valid visual, and diagnostics go to the log
    /// channel. Increments the render counter on every call.
    pub fn render(&mut self, instance: &ChartInstance) -> RenderOutput {
        let state = self.states.entry(instance.key().to_string()).or_default();
        let first_paint = state.render_count < FIRST_PAINT_THRESHOLD;
        state.render_count += 1;
        state.generation += 1;
        let generation = state.generation;

        let options = ChartOptions::resolve(&instance.attrs, &instance.colors);
        if instance.attrs.get(KEY_SET).is_none() && !state.warned_missing_set {
            warn!(chart = instance.key(), "chart has no value series configured");
            state.warned_missing_set = true;
        }

        let dataset = Dataset::parse(instance.attrs.get(KEY_SET), instance.attrs.get(KEY_DATES));
        let series = NormalizedSeries::from_dataset(&dataset);
        let area = DrawArea::compute(instance.width, instance.height, Insets::default());
        let surface_w = if instance.width > 0.0 { instance.width } else { FALLBACK_WIDTH };
        let surface_h = if instance.height > 0.0 { instance.height } else { FALLBACK_HEIGHT };

        debug!(
            chart = instance.key(),
            len = series.len(),
            kind = ?options.kind,
            render_count = state.render_count,
            "render pass"
        );

        let output = match options.kind {
            ChartKind::Line => {
                build_line(instance, &options, &series, &area, surface_w, surface_h, generation, first_paint)
            }
            ChartKind::Bar => {
                build_bars(instance, &options, &series, &area, surface_w, surface_h, generation, first_paint)
            }
        };
        output
    }

    /// Render count for an instance (0 if never rendered).
    pub fn render_count(&self, key: &str) -> u64 {
        self.states.get(key).map(|s| s.render_count).unwrap_or(0)
    }

    /// Current generation for an instance; deferred work scheduled under an
    /// older generation must treat itself as stale.
    pub fn generation(&self, key: &str) -> u64 {
        self.states.get(key).map(|s| s.generation).unwrap_or(0)
    }

    /// Re-arm the reveal so the next render counts as a first paint again.
    pub fn rearm_reveal(&mut self, key: &str) {
        if let Some(state) = self.states.get_mut(key) {
            state.render_count = 0;
        }
    }

    /// Forget an instance (container removed); tears down its tooltip entry.
    pub fn drop_instance(&mut self, key: &str) {
        self.states.remove(key);
        self.tooltips.drop_instance(key);
    }
}

#[allow(clippy::too_many_arguments)]
fn build_line(
    instance: &ChartInstance,
    options: &ChartOptions,
    series: &NormalizedSeries,
    area: &DrawArea,
    surface_w: f64,
    surface_h: f64,
    generation: u64,
    first_paint: bool,
) -> RenderOutput {
    let mut root = svg::document(0.0, surface_w, surface_h);
    let points = layout::line_points(series, area);
    let run = path::present_points(&points);

    // Fill areas go under the stroke.
    for d in path::area_subpaths(&points, options.curve, options.cut_null, area.bottom) {
        root.child(
            Element::new("path")
                .attr("class", "spark-line-area")
                .attr("d", d)
                .attr("fill", options.area_color.clone()),
        );
    }
    for d in path::line_subpaths(&points, options.curve, options.cut_null) {
        root.child(
            Element::new("path")
                .attr("class", "spark-line-path")
                .attr("d", d)
                .attr("fill", "none")
                .attr("stroke", options.line_color.clone())
                .attr("stroke-width", fmt(options.line_thickness))
                .attr("stroke-linecap", "round"),
        );
    }

    // Markers are suppressed above the visibility threshold; they are
    // stroked with the container background so they punch out of the line.
    if options.plot_radius > 0.0 && series.len() <= options.plot_threshold {
        for p in points.iter().filter(|p| p.raw.is_some()) {
            root.child(
                Element::new("circle")
                    .attr("class", "spark-datapoint-circle")
                    .attr("cx", fmt(p.x))
                    .attr("cy", fmt(p.y))
                    .attr("r", fmt(options.plot_radius))
                    .attr("fill", options.plot_color.clone())
                    .attr("stroke", instance.colors.background.clone()),
            );
        }
    }

    push_indicator(&mut root, options, area);
    push_last_value(&mut root, options, series, &points, first_paint);

    let slot = layout::line_slot(area, series.len());
    let hit_regions = line_hit_regions(&points, area, slot);
    push_traps(&mut root, &hit_regions);

    let reveal = arm_reveal(options, first_paint, generation, || {
        let markers = if options.plot_radius > 0.0 && series.len() <= options.plot_threshold {
            run.len()
        } else {
            0
        };
        RevealPlan::new(path::stroke_length(&run, options.curve), area.width, markers)
    });

    RenderOutput {
        svg: root,
        generation,
        area: *area,
        points,
        bars: Vec::new(),
        hit_regions,
        reveal,
    }
}

#[allow(clippy::too_many_arguments)]
fn build_bars(
    instance: &ChartInstance,
    options: &ChartOptions,
    series: &NormalizedSeries,
    area: &DrawArea,
    surface_w: f64,
    surface_h: f64,
    generation: u64,
    first_paint: bool,
) -> RenderOutput {
    let slot = layout::bar_slot(area, series.len());
    let (view_min, view_width) = layout::bar_viewport(surface_w, slot);
    let mut root = svg::document(view_min, view_width, surface_h);
    let bars = layout::bars(series, area);

    for b in bars.iter().filter(|b| b.raw.is_some()) {
        root.child(
            Element::new("rect")
                .attr("class", "spark-bar")
                .attr("x", fmt(b.x))
                .attr("y", fmt(b.y))
                .attr("width", fmt(b.width))
                .attr("height", fmt(b.height))
                .attr("fill", options.line_color.clone()),
        );
    }

    push_indicator(&mut root, options, area);
    let points = layout::line_points(series, area);
    push_last_value(&mut root, options, series, &points, first_paint);

    let hit_regions = bar_hit_regions(&bars, area, slot);
    push_traps(&mut root, &hit_regions);

    let reveal = arm_reveal(options, first_paint, generation, || {
        RevealPlan::new(0.0, area.width, bars.iter().filter(|b| b.raw.is_some()).count())
    });

    RenderOutput {
        svg: root,
        generation,
        area: *area,
        points: Vec::new(),
        bars,
        hit_regions,
        reveal,
    }
}

fn arm_reveal(
    options: &ChartOptions,
    first_paint: bool,
    generation: u64,
    plan: impl FnOnce() -> RevealPlan,
) -> Option<RevealAnimation> {
    if options.animate && first_paint {
        Some(RevealAnimation::start(plan(), generation))
    } else {
        None
    }
}

/// Vertical hover indicator spanning the drawing area; hidden until the
/// tooltip controller shows it at the hovered slot.
fn push_indicator(root: &mut Element, options: &ChartOptions, area: &DrawArea) {
    root.child(
        Element::new("line")
            .attr("class", "spark-indicator")
            .attr("x1", fmt(area.left))
            .attr("y1", fmt(area.top))
            .attr("x2", fmt(area.left))
            .attr("y2", fmt(area.bottom))
            .attr("stroke", options.indicator_color.clone())
            .attr("stroke-width", fmt(options.indicator_width))
            .attr("display", "none"),
    );
}

/// Optional last-value text after the final point. On an animated first
/// paint it starts transparent; the reveal's completion turns it on.
fn push_last_value(
    root: &mut Element,
    options: &ChartOptions,
    series: &NormalizedSeries,
    points: &[PlottedPoint],
    first_paint: bool,
) {
    if !options.show_last_value {
        return;
    }
    let Some(value) = series.last_value() else { return };
    let Some(last) = points.iter().rev().find(|p| p.raw.is_some()) else { return };
    let opacity = if options.animate && first_paint { "0" } else { "1" };
    root.child(
        Element::new("text")
            .attr("class", "spark-last-value")
            .attr("x", fmt(last.x + options.plot_radius + 4.0))
            .attr("y", fmt(last.y + options.value_font_size / 3.0))
            .attr("font-size", fmt(options.value_font_size))
            .attr("fill", options.value_color.clone())
            .attr("opacity", opacity)
            .text(crate::format::format_number(value, &options.locale, options.rounding)),
    );
}

fn push_traps(root: &mut Element, regions: &[HitRegion]) {
    for r in regions {
        root.child(
            Element::new("rect")
                .attr("class", "spark-tooltip-trap")
                .attr("data-index", r.index.to_string())
                .attr("x", fmt(r.x))
                .attr("y", fmt(r.y))
                .attr("width", fmt(r.width))
                .attr("height", fmt(r.height))
                .attr("fill", "transparent"),
        );
    }
}

/// One trap per index, centered on the point and spanning the slot width;
/// the first and last traps are clamped to the drawing area.
fn line_hit_regions(points: &[PlottedPoint], area: &DrawArea, slot: f64) -> Vec<HitRegion> {
    points
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let left = (p.x - slot / 2.0).max(area.left);
            let right = (p.x + slot / 2.0).min(area.right);
            let width = if slot > 0.0 { right - left } else { area.width };
            let x = if slot > 0.0 { left } else { area.left };
            HitRegion {
                index,
                x,
                y: area.top,
                width,
                height: area.height,
                anchor: point_anchor(p),
                raw: p.raw,
                label: p.label.clone(),
            }
        })
        .collect()
}

/// One trap per bar column, tiling the drawing area exactly.
fn bar_hit_regions(bars: &[PlottedBar], area: &DrawArea, slot: f64) -> Vec<HitRegion> {
    bars.iter()
        .enumerate()
        .map(|(index, b)| HitRegion {
            index,
            x: area.left + slot * index as f64,
            y: area.top,
            width: if slot > 0.0 { slot } else { area.width },
            height: area.height,
            anchor: bar_anchor(b),
            raw: b.raw,
            label: b.label.clone(),
        })
        .collect()
}

/// Shortest decimal formatting for attribute values.
fn fmt(v: f64) -> String {
    format!("{}", crate::types::nan_to(v, 0.0))
}
