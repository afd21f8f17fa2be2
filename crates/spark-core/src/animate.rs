// File: crates/spark-core/src/animate.rs
// Summary: One-shot reveal animation: explicit Idle -> Revealing -> Done state
// machine producing per-frame dash/clip/marker state for the host to apply.

/// Fixed duration for the stroke and clip reveals, in milliseconds.
pub const REVEAL_DURATION_MS: f64 = 600.0;

/// Ease-in-out cubic, matching the CSS timing the reveal emulates.
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealPhase {
    Idle,
    Revealing,
    Done,
}

/// Everything the reveal needs up front: measured stroke length (for the
/// dash trick), the fill region's full width (for the clip wipe), and the
/// marker count (for the stagger).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealPlan {
    pub stroke_length: f64,
    pub area_width: f64,
    pub marker_count: usize,
    pub duration_ms: f64,
}

impl RevealPlan {
    pub fn new(stroke_length: f64, area_width: f64, marker_count: usize) -> Self {
        Self { stroke_length, area_width, marker_count, duration_ms: REVEAL_DURATION_MS }
    }

    /// Per-marker fade pre-delay: the total duration distributed evenly
    /// across the marker count, producing a left-to-right stagger.
    pub fn marker_delay_ms(&self, index: usize) -> f64 {
        if self.marker_count == 0 {
            return 0.0;
        }
        self.duration_ms * index as f64 / self.marker_count as f64
    }
}

/// Visual state at one animation frame. Hosts map this onto
/// stroke-dashoffset, a clip rect width, and per-marker opacity.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealFrame {
    pub dash_offset: f64,
    pub clip_width: f64,
    pub marker_opacity: Vec<f64>,
    /// True once the stagger has finished; gates the last-value label.
    pub markers_done: bool,
}

/// One-shot reveal animation for one render pass. Carries the generation of
/// the render that armed it so a later render pass makes it inert.
#[derive(Clone, Debug)]
pub struct RevealAnimation {
    plan: RevealPlan,
    phase: RevealPhase,
    generation: u64,
    stroke_complete: bool,
    clip_complete: bool,
}

impl RevealAnimation {
    pub fn start(plan: RevealPlan, generation: u64) -> Self {
        Self {
            plan,
            phase: RevealPhase::Revealing,
            generation,
            stroke_complete: false,
            clip_complete: false,
        }
    }

    pub fn plan(&self) -> &RevealPlan {
        &self.plan
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether this animation still belongs to the current render pass.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Frame state at `elapsed_ms` since start. Sampling past the duration
    /// (or once Done) yields the final, fully revealed state.
    pub fn sample(&self, elapsed_ms: f64) -> RevealFrame {
        if self.phase == RevealPhase::Done {
            return self.final_frame();
        }
        let t = ease_in_out(elapsed_ms / self.plan.duration_ms);
        let marker_opacity = (0..self.plan.marker_count)
            .map(|i| self.marker_opacity_at(i, elapsed_ms))
            .collect();
        RevealFrame {
            dash_offset: self.plan.stroke_length * (1.0 - t),
            clip_width: self.plan.area_width * t,
            marker_opacity,
            markers_done: elapsed_ms >= self.plan.duration_ms,
        }
    }

    fn marker_opacity_at(&self, index: usize, elapsed_ms: f64) -> f64 {
        let delay = self.plan.marker_delay_ms(index);
        let window = if self.plan.marker_count == 0 {
            self.plan.duration_ms
        } else {
            self.plan.duration_ms / self.plan.marker_count as f64
        };
        ease_in_out((elapsed_ms - delay) / window)
    }

    /// Host signal: the stroke dash transition finished.
    pub fn complete_stroke(&mut self) {
        self.stroke_complete = true;
        self.maybe_finish();
    }

    /// Host signal: the clip wipe finished. The clip must then be discarded
    /// so later geometry changes are not constrained by a stale clip.
    pub fn complete_clip(&mut self) {
        self.clip_complete = true;
        self.maybe_finish();
    }

    fn maybe_finish(&mut self) {
        if self.stroke_complete && self.clip_complete {
            self.phase = RevealPhase::Done;
        }
    }

    /// Abandon the animation and jump to final state.
    pub fn cancel(&mut self) {
        self.phase = RevealPhase::Done;
    }

    fn final_frame(&self) -> RevealFrame {
        RevealFrame {
            dash_offset: 0.0,
            clip_width: self.plan.area_width,
            marker_opacity: vec![1.0; self.plan.marker_count],
            markers_done: true,
        }
    }
}
