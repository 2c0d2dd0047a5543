//! Tolerance-based matching between binary prediction and label patches
//!
//! A relaxed true positive counts a positive pixel as matched when the
//! opposite set contains a positive pixel within a fixed pixel radius, rather
//! than requiring exact alignment.

use ndarray::ArrayView2;

/// Relaxed true-positive counting over binary patches
///
/// Both operations take two equally sized patches with nonzero values marking
/// positives and return a scalar match count. The trait is the seam between
/// the aggregation loop and the matching algorithm.
pub trait RelaxedMatcher {
    /// Count predicted-positive pixels with a label-positive pixel within tolerance
    fn relax_precision(&self, pred: ArrayView2<'_, u8>, label: ArrayView2<'_, u8>) -> u64;

    /// Count label-positive pixels with a predicted-positive pixel within tolerance
    fn relax_recall(&self, pred: ArrayView2<'_, u8>, label: ArrayView2<'_, u8>) -> u64;
}

/// Euclidean-disk relaxation
///
/// A pixel matches when the opposite set has a positive pixel at offset
/// `(dy, dx)` with `dy² + dx² <= radius²`. The offset table is precomputed at
/// construction.
#[derive(Debug, Clone)]
pub struct DiskRelaxation {
    offsets: Vec<(i32, i32)>,
}

impl DiskRelaxation {
    /// Build the offset table for the given pixel radius
    pub fn new(radius: u32) -> Self {
        let r = radius as i32;
        let mut offsets = Vec::new();
        for dy in -r..=r {
            for dx in -r..=r {
                if dy * dy + dx * dx <= r * r {
                    offsets.push((dy, dx));
                }
            }
        }
        Self { offsets }
    }

    // Counts source-positive pixels with a target-positive pixel in the disk
    fn matched(&self, source: ArrayView2<'_, u8>, target: ArrayView2<'_, u8>) -> u64 {
        let (rows, cols) = source.dim();
        let mut count = 0;
        for y in 0..rows {
            for x in 0..cols {
                if source.get([y, x]).copied().unwrap_or(0) == 0 {
                    continue;
                }
                let hit = self.offsets.iter().any(|&(dy, dx)| {
                    let ty = y as i32 + dy;
                    let tx = x as i32 + dx;
                    ty >= 0
                        && tx >= 0
                        && target.get([ty as usize, tx as usize]).copied().unwrap_or(0) != 0
                });
                if hit {
                    count += 1;
                }
            }
        }
        count
    }
}

impl RelaxedMatcher for DiskRelaxation {
    fn relax_precision(&self, pred: ArrayView2<'_, u8>, label: ArrayView2<'_, u8>) -> u64 {
        self.matched(pred, label)
    }

    fn relax_recall(&self, pred: ArrayView2<'_, u8>, label: ArrayView2<'_, u8>) -> u64 {
        self.matched(label, pred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn patch(positives: &[(usize, usize)]) -> Array2<u8> {
        let mut patch = Array2::<u8>::zeros((8, 8));
        for &(y, x) in positives {
            patch[[y, x]] = 1;
        }
        patch
    }

    #[test]
    fn test_exact_overlap_matches() {
        let matcher = DiskRelaxation::new(3);
        let pred = patch(&[(4, 4)]);
        let label = patch(&[(4, 4)]);
        assert_eq!(matcher.relax_precision(pred.view(), label.view()), 1);
        assert_eq!(matcher.relax_recall(pred.view(), label.view()), 1);
    }

    #[test]
    fn test_match_at_exact_radius() {
        let matcher = DiskRelaxation::new(3);
        let pred = patch(&[(0, 0)]);
        let label = patch(&[(0, 3)]);
        assert_eq!(matcher.relax_precision(pred.view(), label.view()), 1);
    }

    #[test]
    fn test_no_match_beyond_radius() {
        let matcher = DiskRelaxation::new(3);
        let pred = patch(&[(0, 0)]);
        let label = patch(&[(0, 4)]);
        assert_eq!(matcher.relax_precision(pred.view(), label.view()), 0);
        assert_eq!(matcher.relax_recall(pred.view(), label.view()), 0);
    }

    #[test]
    fn test_diagonal_uses_euclidean_distance() {
        let matcher = DiskRelaxation::new(3);
        // (2, 2) is distance sqrt(8), (2, 3) is sqrt(13) > 3
        let pred = patch(&[(0, 0)]);
        let near = patch(&[(2, 2)]);
        let far = patch(&[(2, 3)]);
        assert_eq!(matcher.relax_precision(pred.view(), near.view()), 1);
        assert_eq!(matcher.relax_precision(pred.view(), far.view()), 0);
    }

    #[test]
    fn test_precision_and_recall_count_opposite_sets() {
        let matcher = DiskRelaxation::new(3);
        // Two predictions near one label pixel
        let pred = patch(&[(4, 3), (4, 5)]);
        let label = patch(&[(4, 4)]);
        assert_eq!(matcher.relax_precision(pred.view(), label.view()), 2);
        assert_eq!(matcher.relax_recall(pred.view(), label.view()), 1);
    }
}
