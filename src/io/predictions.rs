//! Prediction-map indexing and `.npy` decoding
//!
//! Prediction arrays are `[rows, cols, channels]` probability maps written one
//! per test image. They are matched to label rasters by identical file stem.

use crate::io::error::{EvalError, Result, invalid_source};
use ndarray::Array3;
use ndarray_npy::ReadNpyExt;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Prediction arrays keyed by file stem
#[derive(Debug)]
pub struct PredictionIndex {
    by_stem: BTreeMap<String, PathBuf>,
}

impl PredictionIndex {
    /// Scan a result directory for `.npy` prediction maps
    ///
    /// # Errors
    ///
    /// Returns a `FileSystem` error if the directory cannot be read, and an
    /// `InvalidSourceData` error if it holds no prediction maps.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let entries = std::fs::read_dir(dir).map_err(|source| EvalError::FileSystem {
            path: dir.to_path_buf(),
            operation: "read result directory",
            source,
        })?;

        let mut by_stem = BTreeMap::new();
        for entry in entries {
            let path = entry
                .map_err(|source| EvalError::FileSystem {
                    path: dir.to_path_buf(),
                    operation: "read result directory entry",
                    source,
                })?
                .path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("npy") {
                if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                    by_stem.insert(stem.to_string(), path);
                }
            }
        }

        if by_stem.is_empty() {
            return Err(invalid_source(format!(
                "no .npy prediction maps found in '{}'",
                dir.display()
            )));
        }
        Ok(Self { by_stem })
    }

    /// Load the prediction whose stem matches the given label file
    ///
    /// # Errors
    ///
    /// Returns a `MissingPrediction` error when no prediction shares the
    /// label's stem, and decode errors from the `.npy` read.
    pub fn load_for_label(&self, label_path: &Path) -> Result<Array3<f32>> {
        let stem = label_stem(label_path)?;
        let path = self
            .by_stem
            .get(&stem)
            .ok_or_else(|| EvalError::MissingPrediction {
                label: label_path.to_path_buf(),
                stem: stem.clone(),
            })?;
        load_prediction(path)
    }

    /// Channel count probed from the first prediction in stem order
    ///
    /// # Errors
    ///
    /// Returns decode errors from the `.npy` read.
    pub fn channels(&self) -> Result<usize> {
        // from_dir guarantees a non-empty index
        match self.by_stem.values().next() {
            Some(path) => Ok(load_prediction(path)?.dim().2),
            None => Err(invalid_source("prediction index is empty")),
        }
    }
}

fn label_stem(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            invalid_source(format!(
                "label '{}' has no usable file stem",
                path.display()
            ))
        })
}

/// Decode one `[rows, cols, channels]` prediction array
///
/// # Errors
///
/// Returns a `FileSystem` error if the file cannot be opened and a
/// `PredictionLoad` error if the array cannot be decoded.
pub fn load_prediction(path: &Path) -> Result<Array3<f32>> {
    let file = File::open(path).map_err(|source| EvalError::FileSystem {
        path: path.to_path_buf(),
        operation: "open prediction",
        source,
    })?;
    Array3::<f32>::read_npy(file).map_err(|source| EvalError::PredictionLoad {
        path: path.to_path_buf(),
        source,
    })
}
