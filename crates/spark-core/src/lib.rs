// File: crates/spark-core/src/lib.rs
// Summary: Core library entry point; exports public API for sparkline rendering.

pub mod animate;
pub mod config;
pub mod dataset;
pub mod format;
pub mod layout;
pub mod path;
pub mod render;
pub mod svg;
pub mod tooltip;
pub mod types;

pub use animate::{ease_in_out, RevealAnimation, RevealFrame, RevealPhase, RevealPlan};
pub use config::{Attrs, ChartKind, ChartOptions, SurfaceColors};
pub use dataset::{Dataset, NormalizedPoint, NormalizedSeries};
pub use format::format_number;
pub use layout::{PlottedBar, PlottedPoint};
pub use render::{ChartInstance, HitRegion, RenderOutput, Renderer};
pub use svg::Element;
pub use tooltip::{Anchor, PlacementError, ScreenTransform, TooltipController};
pub use types::{DrawArea, Insets};
