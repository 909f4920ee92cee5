//! Contiguous risk-interval extraction.
//!
//! Every threshold rule reduces to the same question: over which maximal
//! runs of adjacent samples does the rule's predicate hold? Adjacency is by
//! sample index, never by time delta, so an irregular or dropped sample
//! still counts as a neighbour.

use serde::{Deserialize, Serialize};

/// How the representative value of a run is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeakPolicy {
    /// Largest signed value (for "greater than" rules).
    Max,
    /// Smallest signed value (for "less than" rules).
    Min,
    /// Value of largest magnitude, sign preserved (for magnitude rules).
    MaxAbs,
}

impl PeakPolicy {
    /// Whether `candidate` replaces `current` as the run's peak.
    ///
    /// Ties keep the earlier sample.
    fn prefers(self, candidate: f64, current: f64) -> bool {
        match self {
            PeakPolicy::Max => candidate > current,
            PeakPolicy::Min => candidate < current,
            PeakPolicy::MaxAbs => candidate.abs() > current.abs(),
        }
    }
}

/// A maximal run of samples satisfying a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskInterval {
    /// Index of the first sample in the run.
    pub start_index: usize,
    /// Index of the last sample in the run (inclusive).
    pub end_index: usize,
    pub start_time: f64,
    pub end_time: f64,
    /// `end_time - start_time`; zero for single-sample runs.
    pub duration: f64,
    /// Extremum of the run according to the [`PeakPolicy`].
    pub peak_value: f64,
    /// Time of the peak sample.
    pub peak_time: f64,
}

impl RiskInterval {
    /// Number of samples in the run.
    pub fn sample_count(&self) -> usize {
        self.end_index - self.start_index + 1
    }
}

/// Usage errors from [`find_risk_intervals`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntervalError {
    #[error("values and time differ in length ({values} vs {time})")]
    LengthMismatch { values: usize, time: usize },
}

/// Find the maximal contiguous runs where `predicate` holds.
///
/// Runs are returned in ascending time order and never overlap. Empty input
/// yields an empty list. `time` is assumed strictly increasing.
pub fn find_risk_intervals<P>(
    values: &[f64],
    time: &[f64],
    predicate: P,
    peak: PeakPolicy,
) -> Result<Vec<RiskInterval>, IntervalError>
where
    P: Fn(f64) -> bool,
{
    if values.len() != time.len() {
        return Err(IntervalError::LengthMismatch {
            values: values.len(),
            time: time.len(),
        });
    }

    let mut intervals = Vec::new();
    // (start index, peak index) of the run being extended.
    let mut open: Option<(usize, usize)> = None;

    for (i, &v) in values.iter().enumerate() {
        if predicate(v) {
            open = match open {
                None => Some((i, i)),
                Some((start, best)) if peak.prefers(v, values[best]) => Some((start, i)),
                current => current,
            };
        } else if let Some((start, best)) = open.take() {
            intervals.push(close_run(start, i - 1, best, values, time));
        }
    }
    if let Some((start, best)) = open {
        intervals.push(close_run(start, values.len() - 1, best, values, time));
    }

    Ok(intervals)
}

fn close_run(start: usize, end: usize, best: usize, values: &[f64], time: &[f64]) -> RiskInterval {
    RiskInterval {
        start_index: start,
        end_index: end,
        start_time: time[start],
        end_time: time[end],
        duration: time[end] - time[start],
        peak_value: values[best],
        peak_time: time[best],
    }
}
