//! Patch sweep geometry and class-plane decomposition for label rasters

use crate::io::configuration::{CLASS_BUILDING, CLASS_ROAD, PATCH_SIZE, STRIDE};
use crate::io::error::{Result, invalid_source};
use ndarray::{Array2, ArrayView2};

/// Non-overlapping patch sweep over a label/prediction window
///
/// Patches tile the window with a fixed stride. The final patch in each
/// dimension is repositioned to end exactly at the boundary, so it may overlap
/// the penultimate patch.
#[derive(Debug, Clone, Copy)]
pub struct PatchGrid {
    rows: usize,
    cols: usize,
}

impl PatchGrid {
    /// Create a sweep over a window of the given dimensions
    ///
    /// # Errors
    ///
    /// Returns an error if the window is smaller than one patch in either
    /// dimension.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows < PATCH_SIZE || cols < PATCH_SIZE {
            return Err(invalid_source(format!(
                "window {rows}x{cols} is smaller than the {PATCH_SIZE}x{PATCH_SIZE} patch size"
            )));
        }
        Ok(Self { rows, cols })
    }

    /// Patch origins in sweep order, boundary patches clamped
    pub fn origins(&self) -> Vec<(usize, usize)> {
        let mut origins = Vec::new();
        for mut y in (0..self.rows).step_by(STRIDE) {
            if y + PATCH_SIZE >= self.rows {
                y = self.rows - PATCH_SIZE;
            }
            for mut x in (0..self.cols).step_by(STRIDE) {
                if x + PATCH_SIZE >= self.cols {
                    x = self.cols - PATCH_SIZE;
                }
                origins.push((y, x));
            }
        }
        origins
    }
}

/// Whether a label patch takes part in aggregation
///
/// A patch qualifies only when it contains at least one building pixel and at
/// least one road pixel.
pub fn qualifies(patch: ArrayView2<'_, u8>) -> bool {
    let mut building = false;
    let mut road = false;
    for &code in patch.iter() {
        building |= code == CLASS_BUILDING;
        road |= code == CLASS_ROAD;
        if building && road {
            return true;
        }
    }
    false
}

/// Binary plane marking the pixels of one class within a label patch
pub fn class_plane(patch: ArrayView2<'_, u8>, class_code: u8) -> Array2<u8> {
    patch.mapv(|code| u8::from(code == class_code))
}
