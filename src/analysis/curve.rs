//! Precision-recall curve derivation and breakeven selection

use crate::io::error::{EvalError, Result};
use ndarray::ArrayView2;

/// One point on a precision-recall curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrPoint {
    /// Fraction of predicted positives with a tolerated true match
    pub precision: f64,
    /// Fraction of ground-truth positives with a tolerated predicted match
    pub recall: f64,
}

/// Convert one channel's `[steps, 4]` tally rows into curve points
///
/// A zero denominator yields 0 rather than an undefined ratio.
pub fn precision_recall(tallies: ArrayView2<'_, f64>) -> Vec<PrPoint> {
    tallies
        .rows()
        .into_iter()
        .map(|row| {
            let positive = row.get(0).copied().unwrap_or(0.0);
            let prec_tp = row.get(1).copied().unwrap_or(0.0);
            let truth = row.get(2).copied().unwrap_or(0.0);
            let recall_tp = row.get(3).copied().unwrap_or(0.0);
            PrPoint {
                precision: if positive > 0.0 { prec_tp / positive } else { 0.0 },
                recall: if truth > 0.0 { recall_tp / truth } else { 0.0 },
            }
        })
        .collect()
}

/// Breakeven point: the non-trivial curve point minimizing `|precision - recall|`
///
/// Points with either value exactly 1, or either value 0, are excluded as
/// trivial extremes. Ties keep the earliest point on the curve.
///
/// # Errors
///
/// Returns a `NoBreakeven` error when every point is trivial.
// Sentinel comparison against exact 0 and 1, not computed values
#[allow(clippy::float_cmp)]
pub fn breakeven(points: &[PrPoint], channel: usize) -> Result<PrPoint> {
    let mut best: Option<(f64, PrPoint)> = None;
    for &point in points {
        let PrPoint { precision, recall } = point;
        if precision == 1.0 || recall == 1.0 || precision <= 0.0 || recall <= 0.0 {
            continue;
        }
        let gap = (precision - recall).abs();
        if best.is_none_or(|(best_gap, _)| gap < best_gap) {
            best = Some((gap, point));
        }
    }
    best.map(|(_, point)| point)
        .ok_or(EvalError::NoBreakeven { channel })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_zero_denominators_yield_zero() {
        let tallies = array![[0.0, 3.0, 0.0, 2.0]];
        let points = precision_recall(tallies.view());
        assert_eq!(points.len(), 1);
        assert_eq!(points.first().copied(), Some(PrPoint { precision: 0.0, recall: 0.0 }));
    }

    #[test]
    fn test_ratios_from_tallies() {
        let tallies = array![[4.0, 2.0, 8.0, 6.0]];
        let points = precision_recall(tallies.view());
        let point = points.first().copied().unwrap();
        assert!((point.precision - 0.5).abs() < 1e-12);
        assert!((point.recall - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_breakeven_skips_trivial_extremes() {
        let points = [
            PrPoint { precision: 1.0, recall: 0.2 },
            PrPoint { precision: 0.6, recall: 0.6 },
            PrPoint { precision: 0.0, recall: 0.9 },
        ];
        let point = breakeven(&points, 0).unwrap();
        assert_eq!(point, PrPoint { precision: 0.6, recall: 0.6 });
    }

    #[test]
    fn test_breakeven_singleton() {
        let points = [PrPoint { precision: 0.6, recall: 0.6 }];
        assert_eq!(
            breakeven(&points, 0).unwrap(),
            PrPoint { precision: 0.6, recall: 0.6 }
        );
    }

    #[test]
    fn test_breakeven_minimizes_gap() {
        let points = [
            PrPoint { precision: 0.9, recall: 0.3 },
            PrPoint { precision: 0.7, recall: 0.65 },
            PrPoint { precision: 0.4, recall: 0.8 },
        ];
        let point = breakeven(&points, 0).unwrap();
        assert!((point.precision - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_all_trivial_is_an_error() {
        let points = [
            PrPoint { precision: 1.0, recall: 0.5 },
            PrPoint { precision: 0.5, recall: 1.0 },
            PrPoint { precision: 0.0, recall: 0.0 },
        ];
        let err = breakeven(&points, 2).unwrap_err();
        assert!(matches!(err, EvalError::NoBreakeven { channel: 2 }));
    }
}
