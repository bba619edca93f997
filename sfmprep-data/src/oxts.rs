//! OXTS GPS/IMU packets from the KITTI raw recordings.
//!
//! Each `oxts/data/*.txt` file holds one packet: 30 whitespace-separated
//! values per frame. Only the body-frame velocity is needed here.

use crate::error::DataError;
use glam::DVec3;
use std::fs;
use std::path::Path;

/// Index of `vf` (forward velocity); `vl` and `vu` follow it.
const VELOCITY_OFFSET: usize = 8;

/// The subset of an OXTS packet used for motion filtering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OxtsPacket {
    /// Forward, leftward and upward velocity in m/s.
    pub velocity: DVec3,
}

impl OxtsPacket {
    pub fn parse(line: &str) -> Result<Self, DataError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() <= VELOCITY_OFFSET + 2 {
            return Err(DataError::ShortOxtsPacket(fields.len()));
        }

        let component = |i: usize| -> Result<f64, DataError> {
            let raw = fields[VELOCITY_OFFSET + i];
            raw.parse().map_err(|_| DataError::InvalidNumber {
                value: raw.to_string(),
                context: String::from("OXTS packet"),
            })
        };

        Ok(Self {
            velocity: DVec3::new(component(0)?, component(1)?, component(2)?),
        })
    }

    pub fn read(path: &Path) -> Result<Self, DataError> {
        let text = fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
        Self::parse(&text)
    }
}
