//! Pinhole intrinsics and the `cam.txt` record written next to every scene.
//!
//! The record is a single comma-separated line holding the full 3x3 matrix
//! in row-major order, with the constant entries spelled `0.` and `1.`:
//!
//! ```text
//! fx,0.,cx,0.,fy,cy,0.,0.,1.
//! ```
//!
//! The four variable entries use fixed six-decimal formatting.

use crate::error::DataError;
use glam::{DMat3, DVec3};
use std::fs;
use std::path::Path;
use tracing::debug;

/// File name of the intrinsics record inside a scene directory.
pub const CAM_FILE_NAME: &str = "cam.txt";

/// Number of comma-separated fields in a `cam.txt` line.
const CAM_FIELD_COUNT: usize = 9;

/// Focal lengths and principal point of a pinhole camera, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinholeIntrinsics {
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
}

impl PinholeIntrinsics {
    pub fn new(fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self { fx, fy, cx, cy }
    }

    /// Extract fx, fy, cx, cy from a camera matrix. Skew and the bottom row
    /// are ignored.
    pub fn from_matrix(k: &DMat3) -> Self {
        // glam matrices are column-major: z_axis is column 2.
        Self {
            fx: k.x_axis.x,
            fy: k.y_axis.y,
            cx: k.z_axis.x,
            cy: k.z_axis.y,
        }
    }

    /// Rebuild the zero-skew camera matrix.
    pub fn to_matrix(&self) -> DMat3 {
        DMat3::from_cols(
            DVec3::new(self.fx, 0.0, 0.0),
            DVec3::new(0.0, self.fy, 0.0),
            DVec3::new(self.cx, self.cy, 1.0),
        )
    }

    /// Format as a `cam.txt` line (no trailing newline).
    pub fn to_cam_line(&self) -> String {
        format!("{:.6},0.,{:.6},0.,{:.6},{:.6},0.,0.,1.", self.fx, self.cx, self.fy, self.cy)
    }

    /// Parse a `cam.txt` line.
    pub fn parse_cam_line(line: &str) -> Result<Self, DataError> {
        let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
        if fields.len() != CAM_FIELD_COUNT {
            return Err(DataError::MalformedCamFile(format!(
                "expected {} fields, found {}",
                CAM_FIELD_COUNT,
                fields.len()
            )));
        }

        let mut values = [0.0f64; CAM_FIELD_COUNT];
        for (slot, field) in values.iter_mut().zip(&fields) {
            *slot = field.parse().map_err(|_| DataError::InvalidNumber {
                value: field.to_string(),
                context: CAM_FILE_NAME.to_string(),
            })?;
        }

        Ok(Self {
            fx: values[0],
            cx: values[2],
            fy: values[4],
            cy: values[5],
        })
    }

    /// Write the record to `path`, replacing any existing file.
    pub fn write_cam_file(&self, path: &Path) -> Result<(), DataError> {
        fs::write(path, self.to_cam_line()).map_err(|e| DataError::io(path, e))?;
        debug!("Wrote intrinsics to {}", path.display());
        Ok(())
    }

    /// Read a record previously written by [`write_cam_file`](Self::write_cam_file).
    pub fn read_cam_file(path: &Path) -> Result<Self, DataError> {
        let contents = fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
        Self::parse_cam_line(&contents)
    }
}
