//! Validated time series with the statistics and numerical helpers the
//! risk evaluators need.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Minimum samples for [`TimeSeries::gradient`].
pub const GRADIENT_MIN_SAMPLES: usize = 3;

/// Ordered (time, value) samples with strictly increasing time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    time: Vec<f64>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Build a series, rejecting mismatched lengths and non-increasing time.
    pub fn new(time: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        if time.len() != values.len() {
            return Err(CoreError::LengthMismatch {
                time: time.len(),
                values: values.len(),
            });
        }
        check_increasing(&time)?;
        Ok(Self { time, values })
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Time span covered by the series (0 for fewer than two samples).
    pub fn duration(&self) -> f64 {
        match (self.time.first(), self.time.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    /// Apply `f` to every value, keeping the time axis.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            time: self.time.clone(),
            values: self.values.iter().map(|&v| f(v)).collect(),
        }
    }

    pub fn to_degrees(&self) -> Self {
        self.map(f64::to_degrees)
    }

    pub fn scale(&self, factor: f64) -> Self {
        self.map(|v| v * factor)
    }

    // ── Statistics (NaN samples ignored) ────────────────────────────

    fn finite(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, v)| !v.is_nan())
    }

    pub fn max(&self) -> Option<f64> {
        self.finite().map(|(_, v)| v).reduce(f64::max)
    }

    pub fn min(&self) -> Option<f64> {
        self.finite().map(|(_, v)| v).reduce(f64::min)
    }

    pub fn mean(&self) -> Option<f64> {
        let (sum, count) = self
            .finite()
            .fold((0.0, 0usize), |(s, c), (_, v)| (s + v, c + 1));
        (count > 0).then(|| sum / count as f64)
    }

    /// Population standard deviation.
    pub fn std(&self) -> Option<f64> {
        let mean = self.mean()?;
        let (sum_sq, count) = self
            .finite()
            .fold((0.0, 0usize), |(s, c), (_, v)| (s + (v - mean).powi(2), c + 1));
        Some((sum_sq / count as f64).sqrt())
    }

    /// Index of the first maximum.
    pub fn argmax(&self) -> Option<usize> {
        self.finite()
            .fold(None, |best: Option<(usize, f64)>, (i, v)| match best {
                Some((_, b)) if v <= b => best,
                _ => Some((i, v)),
            })
            .map(|(i, _)| i)
    }

    /// Index of the first minimum.
    pub fn argmin(&self) -> Option<usize> {
        self.finite()
            .fold(None, |best: Option<(usize, f64)>, (i, v)| match best {
                Some((_, b)) if v >= b => best,
                _ => Some((i, v)),
            })
            .map(|(i, _)| i)
    }

    /// Value with the largest magnitude, sign preserved.
    pub fn peak_abs(&self) -> Option<f64> {
        self.finite()
            .map(|(_, v)| v)
            .reduce(|a, b| if b.abs() > a.abs() { b } else { a })
    }

    // ── Derivatives and slicing ─────────────────────────────────────

    /// Numerical derivative with respect to time.
    ///
    /// Interior points use second-order central differences on the
    /// (possibly non-uniform) grid; the end points use first-order
    /// one-sided differences.
    pub fn gradient(&self) -> Result<Self> {
        let n = self.len();
        if n < GRADIENT_MIN_SAMPLES {
            return Err(CoreError::TooShort {
                len: n,
                required: GRADIENT_MIN_SAMPLES,
            });
        }
        let t = &self.time;
        let y = &self.values;
        let mut out = Vec::with_capacity(n);

        out.push((y[1] - y[0]) / (t[1] - t[0]));
        for i in 1..n - 1 {
            let hs = t[i] - t[i - 1];
            let hd = t[i + 1] - t[i];
            let d = (hs.powi(2) * y[i + 1] + (hd.powi(2) - hs.powi(2)) * y[i]
                - hd.powi(2) * y[i - 1])
                / (hs * hd * (hd + hs));
            out.push(d);
        }
        out.push((y[n - 1] - y[n - 2]) / (t[n - 1] - t[n - 2]));

        Ok(Self {
            time: self.time.clone(),
            values: out,
        })
    }

    /// Index range covering `[start_fraction, end_fraction)` of the samples.
    ///
    /// Bounds are `floor(n * fraction)`, clamped to the series length.
    pub fn window_range(&self, start_fraction: f64, end_fraction: f64) -> std::ops::Range<usize> {
        let n = self.len();
        let at = |f: f64| ((n as f64 * f.clamp(0.0, 1.0)).floor() as usize).min(n);
        let start = at(start_fraction);
        let end = at(end_fraction).max(start);
        start..end
    }

    /// Sub-series covering `[start_fraction, end_fraction)` of the samples.
    pub fn window(&self, start_fraction: f64, end_fraction: f64) -> Self {
        self.slice(self.window_range(start_fraction, end_fraction))
    }

    /// Value of the sample whose time is closest to `t`.
    pub fn value_near(&self, t: f64) -> Option<f64> {
        let idx = match self
            .time
            .binary_search_by(|x| x.total_cmp(&t))
        {
            Ok(i) => i,
            Err(0) => 0,
            Err(i) if i >= self.len() => self.len().checked_sub(1)?,
            Err(i) => {
                if (t - self.time[i - 1]).abs() <= (self.time[i] - t).abs() {
                    i - 1
                } else {
                    i
                }
            }
        };
        self.values.get(idx).copied()
    }

    /// Sub-series over an index range (clamped to the series length).
    pub fn slice(&self, range: std::ops::Range<usize>) -> Self {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        Self {
            time: self.time[start..end].to_vec(),
            values: self.values[start..end].to_vec(),
        }
    }
}

/// Reject time axes that are not strictly increasing.
pub fn check_increasing(time: &[f64]) -> Result<()> {
    for (i, pair) in time.windows(2).enumerate() {
        if !(pair[1] > pair[0]) {
            return Err(CoreError::NonMonotonicTime {
                index: i + 1,
                previous: pair[0],
                current: pair[1],
            });
        }
    }
    Ok(())
}
