//! Reader for the simulation engine's storage files (`.mot` / `.sto`).
//!
//! Layout:
//!
//! ```text
//! inverse_kinematics        <- free-form header lines
//! version=1
//! nRows=3
//! nColumns=3
//! inDegrees=yes
//! endheader
//! time	knee_angle_r	hip_flexion_r
//! 0.00	5.0	10.0
//! ...
//! ```
//!
//! The first column is always time.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{CoreError, Result};
use crate::series::{check_increasing, TimeSeries};

const END_HEADER: &str = "endheader";

/// Column-oriented table parsed from a storage file.
#[derive(Debug, Clone)]
pub struct MotionTable {
    /// Header `key=value` pairs (e.g. `nRows`, `inDegrees`).
    metadata: BTreeMap<String, String>,
    /// Free-form header lines that are not `key=value`.
    header_notes: Vec<String>,
    /// Data column labels, time column excluded.
    labels: Vec<String>,
    time: Vec<f64>,
    /// One vector per label, same order as `labels`.
    columns: Vec<Vec<f64>>,
    in_degrees: bool,
}

impl MotionTable {
    /// Read and parse a storage file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let table = Self::parse(&contents)?;
        debug!(
            path = %path.display(),
            rows = table.num_rows(),
            columns = table.labels.len(),
            in_degrees = table.in_degrees,
            "loaded storage table"
        );
        Ok(table)
    }

    /// Parse storage file contents.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut lines = contents.lines().enumerate();
        let mut metadata = BTreeMap::new();
        let mut header_notes = Vec::new();
        let mut saw_end = false;

        for (_, raw) in lines.by_ref() {
            let line = raw.trim();
            if line.eq_ignore_ascii_case(END_HEADER) {
                saw_end = true;
                break;
            }
            if line.is_empty() {
                continue;
            }
            match line.split_once('=') {
                Some((key, value)) => {
                    metadata.insert(key.trim().to_string(), value.trim().to_string());
                }
                None => header_notes.push(line.to_string()),
            }
        }

        if !saw_end {
            return Err(CoreError::Parse {
                line: contents.lines().count(),
                message: format!("missing '{END_HEADER}' line"),
            });
        }

        let (label_line, label_row) = lines
            .by_ref()
            .find(|(_, l)| !l.trim().is_empty())
            .ok_or_else(|| CoreError::Parse {
                line: contents.lines().count(),
                message: "missing column label row".to_string(),
            })?;

        let mut all_labels = split_fields(label_row);
        if all_labels.is_empty() {
            return Err(CoreError::Parse {
                line: label_line + 1,
                message: "empty column label row".to_string(),
            });
        }
        let width = all_labels.len();
        let labels: Vec<String> = all_labels.drain(1..).map(str::to_string).collect();

        let mut time = Vec::new();
        let mut columns = vec![Vec::new(); labels.len()];

        for (idx, raw) in lines {
            if raw.trim().is_empty() {
                continue;
            }
            let fields = split_fields(raw);
            if fields.len() != width {
                return Err(CoreError::Parse {
                    line: idx + 1,
                    message: format!("expected {} fields, found {}", width, fields.len()),
                });
            }
            for (col, field) in fields.iter().enumerate() {
                let value = parse_number(field).ok_or_else(|| CoreError::Parse {
                    line: idx + 1,
                    message: format!("invalid number '{field}'"),
                })?;
                if col == 0 {
                    time.push(value);
                } else {
                    columns[col - 1].push(value);
                }
            }
        }

        check_increasing(&time)?;

        if let Some(declared) = metadata.get("nRows").and_then(|v| v.parse::<usize>().ok()) {
            if declared != time.len() {
                warn!(declared, actual = time.len(), "nRows header does not match data rows");
            }
        }

        let in_degrees = metadata
            .get("inDegrees")
            .map(|v| v.eq_ignore_ascii_case("yes") || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            metadata,
            header_notes,
            labels,
            time,
            columns,
            in_degrees,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn num_rows(&self) -> usize {
        self.time.len()
    }

    pub fn in_degrees(&self) -> bool {
        self.in_degrees
    }

    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Free-form header lines, typically the table name.
    pub fn header_notes(&self) -> &[String] {
        &self.header_notes
    }

    /// Time span from first to last row.
    pub fn duration(&self) -> f64 {
        match (self.time.first(), self.time.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    pub fn has_column(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Raw values of a column.
    pub fn column_values(&self, label: &str) -> Option<&[f64]> {
        let idx = self.labels.iter().position(|l| l == label)?;
        Some(&self.columns[idx])
    }

    /// A column paired with the time axis.
    pub fn column(&self, label: &str) -> Option<TimeSeries> {
        let values = self.column_values(label)?;
        TimeSeries::new(self.time.clone(), values.to_vec()).ok()
    }

    /// Labels containing any of `fragments`, in table order.
    pub fn columns_containing(&self, fragments: &[String]) -> Vec<&str> {
        self.labels
            .iter()
            .filter(|l| fragments.iter().any(|f| l.contains(f.as_str())))
            .map(String::as_str)
            .collect()
    }

    /// Row-wise mean over the given columns, skipping NaN cells.
    ///
    /// A row is NaN only when every cell in it is. Returns `None` when
    /// `labels` is empty or any label is missing.
    pub fn row_mean(&self, labels: &[&str]) -> Option<TimeSeries> {
        if labels.is_empty() {
            return None;
        }
        let cols: Vec<&[f64]> = labels
            .iter()
            .map(|l| self.column_values(l))
            .collect::<Option<_>>()?;
        let values = (0..self.num_rows())
            .map(|row| {
                let (sum, n) = cols
                    .iter()
                    .map(|c| c[row])
                    .filter(|v| !v.is_nan())
                    .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
                if n == 0 {
                    f64::NAN
                } else {
                    sum / n as f64
                }
            })
            .collect();
        TimeSeries::new(self.time.clone(), values).ok()
    }
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(|c: char| c == '\t' || c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .collect()
}

fn parse_number(field: &str) -> Option<f64> {
    match field.to_ascii_lowercase().as_str() {
        "nan" | "-nan" => Some(f64::NAN),
        other => other.parse().ok(),
    }
}
