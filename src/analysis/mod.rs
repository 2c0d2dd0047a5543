//! Analysis modules for log extraction and relaxed-metric aggregation

/// Precision-recall curve derivation and breakeven selection
pub mod curve;
/// Threshold sweep and per-image tally aggregation
pub mod evaluator;
/// Training-log scanning and epoch/loss field extraction
pub mod loss_log;
/// Patch sweep geometry and class-plane decomposition
pub mod patches;
/// Tolerance-based matching between binary prediction and label patches
pub mod relax;
