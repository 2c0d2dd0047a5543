//! Ground-truth label discovery, decoding, and border cropping

use crate::io::error::{EvalError, Result, invalid_parameter, invalid_source};
use ndarray::{Array2, s};
use std::path::{Path, PathBuf};

/// Collect `.tif`/`.tiff` label rasters from a directory in sorted order
///
/// # Errors
///
/// Returns a `FileSystem` error if the directory cannot be read.
pub fn collect_labels(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|source| EvalError::FileSystem {
        path: dir.to_path_buf(),
        operation: "read label directory",
        source,
    })?;

    let mut labels = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| EvalError::FileSystem {
                path: dir.to_path_buf(),
                operation: "read label directory entry",
                source,
            })?
            .path();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        if matches!(extension.as_deref(), Some("tif" | "tiff")) {
            labels.push(path);
        }
    }
    labels.sort();
    Ok(labels)
}

/// Decode a single-channel label raster into class codes
///
/// # Errors
///
/// Returns an `ImageLoad` error if the raster cannot be decoded.
pub fn load_label(path: &Path) -> Result<Array2<u8>> {
    let image = image::open(path).map_err(|source| EvalError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let gray = image.to_luma8();
    let (width, height) = gray.dimensions();
    Array2::from_shape_vec((height as usize, width as usize), gray.into_raw()).map_err(|err| {
        invalid_source(format!(
            "label '{}' has inconsistent dimensions: {err}",
            path.display()
        ))
    })
}

/// Crop a label by the `pad + offset - 1` border to the prediction frame
///
/// Predictions are produced on a border-cropped coordinate frame; the label is
/// trimmed by the same margin on both axes so pixels align.
///
/// # Errors
///
/// Returns a `CropOutOfBounds` error when the window exceeds the label extent,
/// and an `InvalidParameter` error when `pad + offset` is zero.
pub fn crop_to_prediction(
    label: &Array2<u8>,
    path: &Path,
    pad: usize,
    offset: usize,
    frame: (usize, usize),
) -> Result<Array2<u8>> {
    let Some(start) = (pad + offset).checked_sub(1) else {
        return Err(invalid_parameter(
            "pad/offset",
            &format!("{pad}/{offset}"),
            &"pad + offset must be at least 1",
        ));
    };

    let (rows, cols) = label.dim();
    let (frame_rows, frame_cols) = frame;
    if start + frame_rows > rows || start + frame_cols > cols {
        return Err(EvalError::CropOutOfBounds {
            path: path.to_path_buf(),
            start,
            needed: frame,
            actual: (rows, cols),
        });
    }

    Ok(label
        .slice(s![start..start + frame_rows, start..start + frame_cols])
        .to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_aligns_to_prediction_frame() {
        let label = Array2::from_shape_fn((64, 64), |(y, x)| (y * 64 + x) as u8);
        let cropped = crop_to_prediction(&label, Path::new("map.tif"), 2, 1, (32, 32)).unwrap();
        assert_eq!(cropped.dim(), (32, 32));
        // Origin moves by pad + offset - 1 = 2
        assert_eq!(cropped[[0, 0]], label[[2, 2]]);
        assert_eq!(cropped[[31, 31]], label[[33, 33]]);
    }

    #[test]
    fn test_crop_overrun_is_rejected() {
        let label = Array2::<u8>::zeros((40, 40));
        let result = crop_to_prediction(&label, Path::new("map.tif"), 24, 8, (32, 32));
        assert!(matches!(result, Err(EvalError::CropOutOfBounds { .. })));
    }

    #[test]
    fn test_zero_margin_is_rejected() {
        let label = Array2::<u8>::zeros((40, 40));
        let result = crop_to_prediction(&label, Path::new("map.tif"), 0, 0, (32, 32));
        assert!(matches!(result, Err(EvalError::InvalidParameter { .. })));
    }
}
