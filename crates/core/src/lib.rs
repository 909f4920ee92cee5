pub mod config;
pub mod error;
pub mod series;
pub mod table;

pub use config::{Config, ReportFormat, GRAVITY};
pub use error::*;
pub use series::TimeSeries;
pub use table::MotionTable;
