/// Where a segment sits in the merge sequence.
///
/// The position decides which fade ramps the segment carries: the first
/// segment never fades in, the last never fades out, and a lone segment
/// does neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePosition {
    First,
    Interior,
    Last,
    Only,
}

impl FadePosition {
    /// Classify the segment at `index` within a sequence of `count` segments.
    pub fn of(index: usize, count: usize) -> Self {
        match (index, count) {
            (_, 1) => Self::Only,
            (0, _) => Self::First,
            (i, n) if i == n - 1 => Self::Last,
            _ => Self::Interior,
        }
    }

    pub fn fades_in(&self) -> bool {
        matches!(self, Self::Interior | Self::Last)
    }

    pub fn fades_out(&self) -> bool {
        matches!(self, Self::First | Self::Interior)
    }
}

/// Per-segment opacity envelope used during compositing.
///
/// Fade-in ramps opacity linearly 0 -> 1 over `[0, fade)`; fade-out ramps
/// 1 -> 0 over `[duration - fade, duration)`; opacity is 1 elsewhere. Both
/// ramps apply simultaneously to interior segments, producing a trapezoid.
///
/// The envelope itself does not guard against ramps that overlap each other
/// (`2 * fade > duration`); the merge pipeline rejects that configuration
/// before any envelope is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeEnvelope {
    fade_in: Option<f64>,
    fade_out: Option<f64>,
    duration: f64,
}

impl FadeEnvelope {
    /// Build the envelope for a segment of `duration` seconds at `position`.
    pub fn for_position(position: FadePosition, fade: f64, duration: f64) -> Self {
        Self {
            fade_in: position.fades_in().then_some(fade),
            fade_out: position.fades_out().then_some(fade),
            duration,
        }
    }

    /// Opacity multiplier at elapsed time `t` within the segment.
    pub fn opacity_at(&self, t: f64) -> f64 {
        let mut opacity: f64 = 1.0;

        if let Some(fade) = self.fade_in {
            if t < fade {
                opacity = opacity.min((t / fade).clamp(0.0, 1.0));
            }
        }

        if let Some(fade) = self.fade_out {
            let ramp_start = self.duration - fade;
            if t > ramp_start {
                opacity = opacity.min(((self.duration - t) / fade).clamp(0.0, 1.0));
            }
        }

        opacity
    }

    /// Length of the fade-in ramp, if any
    pub fn fade_in(&self) -> Option<f64> {
        self.fade_in
    }

    /// Length of the fade-out ramp, if any
    pub fn fade_out(&self) -> Option<f64> {
        self.fade_out
    }

    /// Segment duration the envelope was sized to
    pub fn duration(&self) -> f64 {
        self.duration
    }
}
