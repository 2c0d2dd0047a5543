//! Evaluation constants and runtime configuration defaults

// Patch sweep geometry
/// Patch edge length in pixels
pub const PATCH_SIZE: usize = 16;
/// Patch sweep stride in pixels
pub const STRIDE: usize = 16;

/// Pixel tolerance radius for relaxed matching
pub const RELAX_RADIUS: u32 = 3;

// Carried in the output directory tag; the density filter itself is shelved
/// Patch-density inclusion ratio
pub const NUM_RATIO: f64 = 0.10;

// Label class codes
/// Class code for background pixels
pub const CLASS_BACKGROUND: u8 = 0;
/// Class code for building pixels
pub const CLASS_BUILDING: u8 = 1;
/// Class code for road pixels
pub const CLASS_ROAD: u8 = 2;

// Default values for configurable parameters
/// Default border padding applied during inference
pub const DEFAULT_PAD: usize = 24;
/// Default patchwise prediction offset
pub const DEFAULT_OFFSET: usize = 8;
/// Default number of binarization thresholds
pub const DEFAULT_STEPS: usize = 256;
/// Default training log location
pub const DEFAULT_LOGFILE: &str = "log.txt";
/// Default loss chart location
pub const DEFAULT_OUTFILE: &str = "log.png";

// Chart geometry
/// Chart canvas width in pixels
pub const CHART_WIDTH: u32 = 800;
/// Chart canvas height in pixels
pub const CHART_HEIGHT: u32 = 600;
