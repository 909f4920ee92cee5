//! Resolve a rule's [`Signal`] against the loaded engine output tables.

use std::path::Path;

use motionrisk_core::{CoreError, MotionTable, TimeSeries};

use crate::schema::{Derivative, Signal, SignalSource, TableSource};

/// The engine output tables available for one analysis.
///
/// Only inverse kinematics is required by the CLI; rules reading an absent
/// table are skipped.
#[derive(Debug, Clone, Default)]
pub struct MotionData {
    pub ik: Option<MotionTable>,
    pub inverse_dynamics: Option<MotionTable>,
    pub so_activation: Option<MotionTable>,
    pub so_force: Option<MotionTable>,
}

impl MotionData {
    /// Read whichever storage files are given.
    pub fn load(
        ik: Option<&Path>,
        inverse_dynamics: Option<&Path>,
        so_activation: Option<&Path>,
        so_force: Option<&Path>,
    ) -> Result<Self, CoreError> {
        let read = |path: Option<&Path>| path.map(MotionTable::from_path).transpose();
        Ok(Self {
            ik: read(ik)?,
            inverse_dynamics: read(inverse_dynamics)?,
            so_activation: read(so_activation)?,
            so_force: read(so_force)?,
        })
    }

    pub fn with_table(mut self, source: TableSource, table: MotionTable) -> Self {
        *self.slot(source) = Some(table);
        self
    }

    fn slot(&mut self, source: TableSource) -> &mut Option<MotionTable> {
        match source {
            TableSource::Ik => &mut self.ik,
            TableSource::InverseDynamics => &mut self.inverse_dynamics,
            TableSource::SoActivation => &mut self.so_activation,
            TableSource::SoForce => &mut self.so_force,
        }
    }

    pub fn table(&self, source: TableSource) -> Option<&MotionTable> {
        match source {
            TableSource::Ik => self.ik.as_ref(),
            TableSource::InverseDynamics => self.inverse_dynamics.as_ref(),
            TableSource::SoActivation => self.so_activation.as_ref(),
            TableSource::SoForce => self.so_force.as_ref(),
        }
    }

    /// Motion duration, taken from the first available table in
    /// ik, inverse dynamics, activation, force order.
    pub fn duration(&self) -> f64 {
        [
            &self.ik,
            &self.inverse_dynamics,
            &self.so_activation,
            &self.so_force,
        ]
        .into_iter()
        .flatten()
        .next()
        .map(MotionTable::duration)
        .unwrap_or(0.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("{0} table not provided")]
    MissingTable(TableSource),

    #[error("column '{column}' not found in {table} table")]
    MissingColumn { table: TableSource, column: String },

    #[error("no {table} column matches any of {fragments:?}")]
    NoMatchingColumns {
        table: TableSource,
        fragments: Vec<String>,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SignalError {
    /// Whether the failure means "data not available" rather than a fault.
    pub fn is_missing_data(&self) -> bool {
        match self {
            SignalError::Core(CoreError::TooShort { .. }) => true,
            SignalError::Core(_) => false,
            _ => true,
        }
    }
}

/// Build the series a rule is evaluated on.
pub fn resolve_signal(signal: &Signal, data: &MotionData) -> Result<TimeSeries, SignalError> {
    let table = data
        .table(signal.table)
        .ok_or(SignalError::MissingTable(signal.table))?;

    let mut series = match &signal.source {
        SignalSource::Column(column) => require(table, signal.table, column)?,
        SignalSource::MeanOf(fragments) => group_mean(table, signal.table, fragments)?,
        SignalSource::Ratio {
            numerator,
            denominator,
        } => {
            let num = group_mean(table, signal.table, numerator)?;
            let den = group_mean(table, signal.table, denominator)?;
            let values = num
                .values()
                .iter()
                .zip(den.values())
                .map(|(&n, &d)| if d == 0.0 { f64::NAN } else { n / d })
                .collect();
            TimeSeries::new(table.time().to_vec(), values)?
        }
        SignalSource::Lean { left, right } => {
            let lx = require(table, signal.table, &format!("{left}_x"))?;
            let ly = require(table, signal.table, &format!("{left}_y"))?;
            let rx = require(table, signal.table, &format!("{right}_x"))?;
            let ry = require(table, signal.table, &format!("{right}_y"))?;
            let values = (0..table.num_rows())
                .map(|i| {
                    let dy = ry.values()[i] - ly.values()[i];
                    let dx = rx.values()[i] - lx.values()[i];
                    dy.atan2(dx).to_degrees()
                })
                .collect();
            TimeSeries::new(table.time().to_vec(), values)?
        }
    };

    if signal.to_degrees && !table.in_degrees() {
        series = series.to_degrees();
    }

    series = match signal.derivative {
        Derivative::None => series,
        Derivative::Velocity => series.gradient()?,
        Derivative::Acceleration => series.gradient()?.gradient()?,
    };

    Ok(series)
}

/// A single named column, for companion series.
pub fn resolve_column(
    data: &MotionData,
    source: TableSource,
    column: &str,
) -> Result<TimeSeries, SignalError> {
    let table = data.table(source).ok_or(SignalError::MissingTable(source))?;
    require(table, source, column)
}

fn require(table: &MotionTable, source: TableSource, column: &str) -> Result<TimeSeries, SignalError> {
    table.column(column).ok_or_else(|| SignalError::MissingColumn {
        table: source,
        column: column.to_string(),
    })
}

fn group_mean(
    table: &MotionTable,
    source: TableSource,
    fragments: &[String],
) -> Result<TimeSeries, SignalError> {
    let labels = table.columns_containing(fragments);
    table
        .row_mean(&labels)
        .ok_or_else(|| SignalError::NoMatchingColumns {
            table: source,
            fragments: fragments.to_vec(),
        })
}
