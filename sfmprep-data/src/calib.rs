//! KITTI calibration files.
//!
//! Both the raw dataset (`calib_cam_to_cam.txt`) and the odometry benchmark
//! (`calib.txt`) store one `key: values...` entry per line. Values are
//! whitespace separated; some entries (e.g. `calib_time`) are not numeric,
//! so entries are kept as text and parsed on access.

use crate::error::DataError;
use glam::{DMat3, DVec3};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Number of values in a 3x4 projection matrix.
const PROJECTION_LEN: usize = 12;

/// Parsed `key: values` calibration file.
#[derive(Debug, Clone, Default)]
pub struct CalibFile {
    entries: HashMap<String, String>,
}

impl CalibFile {
    /// Read and parse a calibration file from disk.
    pub fn read(path: &Path) -> Result<Self, DataError> {
        let text = fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
        Ok(Self::parse(&text))
    }

    /// Parse calibration text. Lines without a `:` separator are skipped.
    pub fn parse(text: &str) -> Self {
        let entries = text
            .lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .collect();
        Self { entries }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Numeric values stored under `key`.
    pub fn values(&self, key: &str) -> Result<Vec<f64>, DataError> {
        let raw = self
            .entries
            .get(key)
            .ok_or_else(|| DataError::MissingCalibKey(key.to_string()))?;

        raw.split_whitespace()
            .map(|v| {
                v.parse().map_err(|_| DataError::InvalidNumber {
                    value: v.to_string(),
                    context: format!("calibration entry '{}'", key),
                })
            })
            .collect()
    }

    /// Left 3x3 block of the 3x4 projection matrix stored under `key`.
    pub fn projection(&self, key: &str) -> Result<DMat3, DataError> {
        let values = self.values(key)?;
        projection_intrinsics(&values).map_err(|e| match e {
            DataError::CalibEntryLength {
                expected, found, ..
            } => DataError::CalibEntryLength {
                key: key.to_string(),
                expected,
                found,
            },
            other => other,
        })
    }
}

/// Build the camera matrix from a row-major 3x4 projection matrix,
/// dropping the translation column.
pub fn projection_intrinsics(values: &[f64]) -> Result<DMat3, DataError> {
    if values.len() != PROJECTION_LEN {
        return Err(DataError::CalibEntryLength {
            key: String::from("projection"),
            expected: PROJECTION_LEN,
            found: values.len(),
        });
    }

    let r = |row: usize, col: usize| values[row * 4 + col];
    Ok(DMat3::from_cols(
        DVec3::new(r(0, 0), r(1, 0), r(2, 0)),
        DVec3::new(r(0, 1), r(1, 1), r(2, 1)),
        DVec3::new(r(0, 2), r(1, 2), r(2, 2)),
    ))
}
