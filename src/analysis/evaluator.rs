//! Threshold sweep and relaxed-tally aggregation over one label/prediction pair

use crate::analysis::patches::{PatchGrid, class_plane, qualifies};
use crate::analysis::relax::RelaxedMatcher;
use crate::io::configuration::PATCH_SIZE;
use crate::io::error::{Result, invalid_parameter, invalid_source};
use ndarray::{Array2, Array3, s};

/// Width of the innermost tally axis: positive, precision TP, true, recall TP
pub const TALLY_WIDTH: usize = 4;

/// Evenly spaced binarization thresholds `t / (steps - 1)` over `[0, 1]`
///
/// # Errors
///
/// Returns an `InvalidParameter` error for fewer than two steps.
pub fn threshold_levels(steps: usize) -> Result<Vec<f32>> {
    if steps < 2 {
        return Err(invalid_parameter(
            "steps",
            &steps,
            &"at least two threshold steps are required",
        ));
    }
    Ok((0..steps)
        .map(|t| t as f32 / (steps - 1) as f32)
        .collect())
}

/// Accumulate relaxed tallies for one image across all thresholds
///
/// The label must already be cropped to the prediction's coordinate frame.
/// Every prediction channel is binarized independently at each threshold; for
/// every qualifying patch the four tallies (predicted-positive count, relaxed
/// precision TP, ground-truth positive count, relaxed recall TP) accumulate
/// per channel into the returned `[steps, channels, 4]` tensor.
///
/// # Errors
///
/// Returns an error if the label and prediction frames disagree, if the frame
/// is smaller than one patch, or if `steps` is invalid.
pub fn evaluate_image<M: RelaxedMatcher>(
    pred: &Array3<f32>,
    label: &Array2<u8>,
    steps: usize,
    matcher: &M,
) -> Result<Array3<f64>> {
    let (rows, cols, channels) = pred.dim();
    if label.dim() != (rows, cols) {
        return Err(invalid_source(format!(
            "label frame {}x{} does not match prediction frame {rows}x{cols}",
            label.dim().0,
            label.dim().1
        )));
    }

    let levels = threshold_levels(steps)?;
    let grid = PatchGrid::new(rows, cols)?;

    // Label planes are threshold-independent; decompose each qualifying patch once
    let mut regions = Vec::new();
    for (y, x) in grid.origins() {
        let l_patch = label.slice(s![y..y + PATCH_SIZE, x..x + PATCH_SIZE]);
        if !qualifies(l_patch) {
            continue;
        }
        let planes: Vec<Array2<u8>> = (0..channels)
            .map(|ch| class_plane(l_patch, ch as u8))
            .collect();
        regions.push((y, x, planes));
    }

    let mut evals = Array3::<f64>::zeros((steps, channels, TALLY_WIDTH));
    for (t, &level) in levels.iter().enumerate() {
        for &(y, x, ref planes) in &regions {
            for (ch, plane) in planes.iter().enumerate() {
                let p_patch = pred
                    .slice(s![y..y + PATCH_SIZE, x..x + PATCH_SIZE, ch])
                    .mapv(|value| u8::from(value >= level));

                let positive: u64 = p_patch.iter().map(|&v| u64::from(v)).sum();
                let truth: u64 = plane.iter().map(|&v| u64::from(v)).sum();
                let prec_tp = matcher.relax_precision(p_patch.view(), plane.view());
                let recall_tp = matcher.relax_recall(p_patch.view(), plane.view());

                let tallies = [positive, prec_tp, truth, recall_tp];
                for (column, value) in tallies.iter().enumerate() {
                    if let Some(cell) = evals.get_mut([t, ch, column]) {
                        *cell += *value as f64;
                    }
                }
            }
        }
    }

    Ok(evals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_levels_span_the_unit_interval() {
        let levels = threshold_levels(4).unwrap();
        let expected = [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0];
        assert_eq!(levels.len(), 4);
        for (level, want) in levels.iter().zip(expected.iter()) {
            assert!((level - want).abs() < 1e-6);
        }
    }

    #[test]
    fn test_single_step_is_rejected() {
        assert!(threshold_levels(1).is_err());
        assert!(threshold_levels(0).is_err());
    }

    #[test]
    fn test_frame_mismatch_is_rejected() {
        struct Never;
        impl RelaxedMatcher for Never {
            fn relax_precision(
                &self,
                _pred: ndarray::ArrayView2<'_, u8>,
                _label: ndarray::ArrayView2<'_, u8>,
            ) -> u64 {
                0
            }
            fn relax_recall(
                &self,
                _pred: ndarray::ArrayView2<'_, u8>,
                _label: ndarray::ArrayView2<'_, u8>,
            ) -> u64 {
                0
            }
        }

        let pred = Array3::<f32>::zeros((32, 32, 3));
        let label = Array2::<u8>::zeros((16, 16));
        assert!(evaluate_image(&pred, &label, 2, &Never).is_err());
    }
}
