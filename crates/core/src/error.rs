use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage file parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Length mismatch: {time} time samples vs {values} values")]
    LengthMismatch { time: usize, values: usize },

    #[error("Time must be strictly increasing (sample {index}: {previous} -> {current})")]
    NonMonotonicTime {
        index: usize,
        previous: f64,
        current: f64,
    },

    #[error("Series too short: {len} samples, at least {required} required")]
    TooShort { len: usize, required: usize },
}

pub type Result<T> = std::result::Result<T, CoreError>;
