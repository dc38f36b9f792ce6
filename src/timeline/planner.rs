use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Minimum viable segment length in seconds.
///
/// Intervals shorter than this are dropped from the plan rather than emitted,
/// silently shrinking the output count.
pub const MIN_SEGMENT_SECS: f64 = 3.0;

/// A half-open time range `[start, end)` within a source video, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length of the interval in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether this interval overlaps another
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Compute the ordered segment intervals for a source of the given duration.
///
/// Start times advance by `segment_length - overlap` seconds on an
/// integer-second grid. Each interval ends at `start + segment_length`, capped
/// at the source duration. Intervals shorter than [`MIN_SEGMENT_SECS`] are
/// dropped.
///
/// An empty result is a normal outcome ("nothing to do"), not an error. The
/// only failure is a step size that makes no forward progress.
pub fn plan(duration: f64, segment_length: f64, overlap: f64) -> Result<Vec<Interval>> {
    let step = segment_length - overlap;

    // The start grid is truncated to whole seconds, so any step below one
    // second stalls just like a non-positive one.
    if step < 1.0 {
        return Err(ConfigError::NoForwardProgress {
            segment_length,
            overlap,
        }
        .into());
    }

    let stride = step.trunc() as usize;
    let last = duration.trunc().max(0.0) as usize;

    let mut intervals = Vec::new();
    for start in (0..last).step_by(stride) {
        let start = start as f64;
        let end = (start + segment_length).min(duration);

        if end - start < MIN_SEGMENT_SECS {
            continue;
        }

        intervals.push(Interval::new(start, end));
    }

    Ok(intervals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scenario() {
        // duration=25, segment_length=10, overlap=2 -> step=8 -> starts
        // [0, 8, 16, 24]; the 24-25 interval is 1s and gets dropped.
        let intervals = plan(25.0, 10.0, 2.0).unwrap();

        assert_eq!(
            intervals,
            vec![
                Interval::new(0.0, 10.0),
                Interval::new(8.0, 18.0),
                Interval::new(16.0, 25.0),
            ]
        );
    }

    #[test]
    fn test_intervals_cover_duration() {
        let duration = 63.4;
        let intervals = plan(duration, 10.0, 2.0).unwrap();

        // Contiguous or overlapping from zero, each of full length except
        // possibly the last.
        assert_eq!(intervals[0].start, 0.0);
        for pair in intervals.windows(2) {
            assert!(pair[1].start <= pair[0].end);
        }
        for interval in &intervals[..intervals.len() - 1] {
            assert_eq!(interval.duration(), 10.0);
        }
        assert!(intervals.last().unwrap().duration() <= 10.0);

        // The final kept interval reaches the exact source duration here; the
        // dropped-remainder case is covered by the reference scenario.
        assert_eq!(intervals.last().unwrap().end, duration);
    }

    #[test]
    fn test_plan_is_pure() {
        let a = plan(121.7, 12.0, 3.0).unwrap();
        let b = plan(121.7, 12.0, 3.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_short_source_yields_empty_plan() {
        // A source shorter than the viability floor produces zero intervals,
        // and that is not an error.
        let intervals = plan(2.5, 10.0, 2.0).unwrap();
        assert!(intervals.is_empty());

        let intervals = plan(0.0, 10.0, 2.0).unwrap();
        assert!(intervals.is_empty());
    }

    #[test]
    fn test_no_forward_progress_is_rejected() {
        // overlap >= segment_length
        assert!(plan(60.0, 10.0, 10.0).is_err());
        assert!(plan(60.0, 10.0, 12.0).is_err());

        // Sub-second steps stall on the integer start grid.
        assert!(plan(60.0, 10.0, 9.5).is_err());
    }

    #[test]
    fn test_zero_overlap_is_contiguous() {
        let intervals = plan(30.0, 10.0, 0.0).unwrap();

        assert_eq!(
            intervals,
            vec![
                Interval::new(0.0, 10.0),
                Interval::new(10.0, 20.0),
                Interval::new(20.0, 30.0),
            ]
        );
    }

    #[test]
    fn test_fractional_duration_keeps_exact_end() {
        let intervals = plan(25.7, 10.0, 2.0).unwrap();

        // Start grid is whole seconds but the final end keeps sub-second
        // precision from the probed duration.
        assert_eq!(intervals.last().unwrap().end, 25.7);
    }

    #[test]
    fn test_overlap_relation() {
        let a = Interval::new(0.0, 10.0);
        let b = Interval::new(8.0, 18.0);
        let c = Interval::new(10.0, 20.0);

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c)); // half-open: [0,10) and [10,20) are disjoint
    }
}
