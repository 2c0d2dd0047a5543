//! Error types and construction helpers for evaluation operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for both evaluation tools
#[derive(Debug)]
pub enum EvalError {
    /// Failed to decode a ground-truth label raster
    ImageLoad {
        /// Path to the label file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to decode a `.npy` prediction map
    PredictionLoad {
        /// Path to the prediction file
        path: PathBuf,
        /// Underlying `.npy` decoding error
        source: ndarray_npy::ReadNpyError,
    },

    /// A label raster has no prediction map sharing its file stem
    MissingPrediction {
        /// Path to the label file
        label: PathBuf,
        /// File stem used for the lookup
        stem: String,
    },

    /// The `pad + offset - 1` crop window exceeds the label extent
    CropOutOfBounds {
        /// Path to the label file
        path: PathBuf,
        /// Crop origin on both axes
        start: usize,
        /// Prediction frame (rows, cols) the crop must cover
        needed: (usize, usize),
        /// Actual label dimensions (rows, cols)
        actual: (usize, usize),
    },

    /// A log line contains `epoch:` but its fields do not parse
    MalformedLogLine {
        /// One-based line number in the log
        line_number: usize,
        /// The offending line
        line: String,
    },

    /// The training log yielded no epoch/loss pairs
    EmptyLog {
        /// Path to the log file
        path: PathBuf,
    },

    /// Every curve point for a channel is trivial
    ///
    /// Occurs when no threshold produces a point with both precision and
    /// recall strictly between 0 and 1.
    NoBreakeven {
        /// Class channel index
        channel: usize,
    },

    /// Runtime parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Input data doesn't meet evaluation requirements
    InvalidSourceData {
        /// Description of what's wrong with the input
        reason: String,
    },

    /// Failed to render or save a chart
    ChartRender {
        /// Path where the chart was being written
        path: PathBuf,
        /// Description of the rendering failure
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load label '{}': {source}", path.display())
            }
            Self::PredictionLoad { path, source } => {
                write!(
                    f,
                    "Failed to load prediction '{}': {source}",
                    path.display()
                )
            }
            Self::MissingPrediction { label, stem } => {
                write!(
                    f,
                    "No prediction map with stem '{stem}' for label '{}'",
                    label.display()
                )
            }
            Self::CropOutOfBounds {
                path,
                start,
                needed,
                actual,
            } => {
                write!(
                    f,
                    "Crop window [{start}, {start}+{}x{}] exceeds label '{}' of size {}x{}",
                    needed.0,
                    needed.1,
                    path.display(),
                    actual.0,
                    actual.1
                )
            }
            Self::MalformedLogLine { line_number, line } => {
                write!(f, "Malformed log line {line_number}: '{line}'")
            }
            Self::EmptyLog { path } => {
                write!(
                    f,
                    "No epoch/loss pairs found in log '{}'",
                    path.display()
                )
            }
            Self::NoBreakeven { channel } => {
                write!(
                    f,
                    "No non-trivial precision-recall point for channel {channel}"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::ChartRender { path, reason } => {
                write!(
                    f,
                    "Failed to render chart '{}': {reason}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } => Some(source),
            Self::PredictionLoad { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for evaluation results
pub type Result<T> = std::result::Result<T, EvalError>;

impl From<std::io::Error> for EvalError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> EvalError {
    EvalError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid source data error
pub fn invalid_source(reason: impl Into<String>) -> EvalError {
    EvalError::InvalidSourceData {
        reason: reason.into(),
    }
}

/// Create a chart rendering error
pub fn chart_error(path: &std::path::Path, reason: &impl ToString) -> EvalError {
    EvalError::ChartRender {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
