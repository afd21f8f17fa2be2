// File: crates/demo/src/main.rs
// Summary: Demo renders line and bar sparklines to SVG files and walks the
// reveal animation and tooltip smoothing through a few frames.

use anyhow::{Context, Result};
use spark_core::{Attrs, ChartInstance, Renderer, SurfaceColors};
use std::path::PathBuf;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,spark_core=debug".into()),
        )
        .init();

    let out_dir = PathBuf::from("target/out");
    std::fs::create_dir_all(&out_dir).context("creating output dir")?;

    let mut renderer = Renderer::new();

    // 1) Smooth line with area fill, markers, and a gap.
    let mut attrs = Attrs::new();
    attrs
        .set("id", "demo-line")
        .set("set", "[-1, 3, null, 5, 4, 12]")
        .set("dates", "[\"jan\", \"feb\", \"mar\", \"apr\", \"may\", \"jun\"]")
        .set("line-color", "#4A4A4A")
        .set("area-color", "#6376DD90")
        .set("line-thickness", "4")
        .set("plot-color", "#2A2A2A")
        .set("plot-radius", "3")
        .set("number-locale", "en-US")
        .set("number-rounding", "2")
        .set("animate", "");
    let line = ChartInstance::new(attrs, 600.0, 150.0, SurfaceColors::default());
    let out = renderer.render(&line);
    let path = out_dir.join("line.svg");
    std::fs::write(&path, out.svg.write_svg()).context("writing line svg")?;
    println!("Wrote {}", path.display());

    // Walk the reveal a few frames, then signal transition completion.
    if let Some(mut reveal) = out.reveal {
        for elapsed in [0.0, 150.0, 300.0, 450.0, 600.0] {
            let frame = reveal.sample(elapsed);
            println!(
                "reveal t={elapsed:>5}ms dash_offset={:.1} clip_width={:.1}",
                frame.dash_offset, frame.clip_width
            );
        }
        reveal.complete_stroke();
        reveal.complete_clip();
        println!("reveal finished: {:?}", reveal.phase());
    }

    // Hover index 3, then glide toward index 4 with smoothing ticks.
    let hover = &out.hit_regions[3];
    println!(
        "tooltip content: {}",
        spark_core::tooltip::content(hover.label.as_deref(), hover.raw, "en-US", 2)
    );
    renderer
        .tooltips
        .show(line.key(), (hover.anchor.x, hover.anchor.y), out.generation);
    let next = (out.hit_regions[4].anchor.x, out.hit_regions[4].anchor.y);
    renderer.tooltips.retarget(line.key(), next);
    for _ in 0..5 {
        if let Some((x, y)) = renderer.tooltips.tick(line.key(), 0.2, out.generation) {
            println!("tooltip display=({x:.1}, {y:.1})");
        }
    }
    renderer.tooltips.hide(line.key());

    // 2) Signed bar chart.
    let mut attrs = Attrs::new();
    attrs
        .set("id", "demo-bars")
        .set("set", "[3, -2, 0, 7, -4, 5]")
        .set("bar", "")
        .set("line-color", "#2A6ADD");
    let bars = ChartInstance::new(attrs, 600.0, 150.0, SurfaceColors::default());
    let out = renderer.render(&bars);
    let path = out_dir.join("bars.svg");
    std::fs::write(&path, out.svg.write_svg()).context("writing bars svg")?;
    println!("Wrote {}", path.display());

    // 3) Gap-cut straight line.
    let mut attrs = Attrs::new();
    attrs
        .set("id", "demo-cut")
        .set("set", "[2, 4, null, null, 3, 6, 5]")
        .set("curve", "false")
        .set("cut-null", "")
        .set("show-last-value", "");
    let cut = ChartInstance::new(attrs, 600.0, 150.0, SurfaceColors::default());
    let out = renderer.render(&cut);
    let path = out_dir.join("cut.svg");
    std::fs::write(&path, out.svg.write_svg()).context("writing cut svg")?;
    println!("Wrote {}", path.display());

    Ok(())
}
