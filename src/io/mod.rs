//! Input/output operations and error handling
//!
//! This module contains the filesystem-facing functionality:
//! - Command-line interfaces and run orchestration
//! - Label raster and prediction map decoding
//! - Chart rendering and progress display

/// Chart rendering for loss and precision-recall curves
pub mod chart;
/// Command-line interfaces for both tools
pub mod cli;
/// Evaluation constants and CLI defaults
pub mod configuration;
/// Error types for evaluation operations
pub mod error;
/// Ground-truth label discovery, decoding, and cropping
pub mod labels;
/// Prediction-map indexing and `.npy` decoding
pub mod predictions;
/// Progress display for the label sweep
pub mod progress;
