//! Relaxed precision-recall evaluation toolkit for image-segmentation runs
//!
//! Ships two utilities over one library: a training-log loss plotter and a
//! patch-based evaluator that compares per-pixel class probability maps against
//! ground-truth label rasters using a tolerance-based precision/recall metric.

#![deny(unsafe_code)]

/// Log extraction, relaxed matching, patch sweep, and curve derivation
pub mod analysis;
/// Input/output operations, chart rendering, and error handling
pub mod io;

pub use io::error::{EvalError, Result};
