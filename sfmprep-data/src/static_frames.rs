//! Lists of frames to discard because the vehicle was not moving.
//!
//! One frame per line, whitespace separated. The last two tokens are the
//! scene key (KITTI drive directory or odometry sequence) and the frame id:
//!
//! ```text
//! 2011_09_26 2011_09_26_drive_0001_sync 0000000012
//! 00 000451
//! ```

use crate::error::DataError;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Set of `(scene, frame_id)` pairs to exclude.
#[derive(Debug, Clone, Default)]
pub struct StaticFrames {
    frames: HashSet<(String, String)>,
}

impl StaticFrames {
    pub fn read(path: &Path) -> Result<Self, DataError> {
        let text = fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
        let frames = Self::parse(&text);
        debug!("Loaded {} static frames from {}", frames.len(), path.display());
        Ok(frames)
    }

    pub fn parse(text: &str) -> Self {
        let mut frames = HashSet::new();
        for (line_no, line) in text.lines().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            match tokens.as_slice() {
                [] => continue,
                [.., scene, frame_id] => {
                    frames.insert((scene.to_string(), frame_id.to_string()));
                }
                [single] => {
                    warn!("Ignoring static frame entry '{}' on line {}", single, line_no + 1);
                }
            }
        }
        Self { frames }
    }

    pub fn contains(&self, scene: &str, frame_id: &str) -> bool {
        self.frames
            .contains(&(scene.to_string(), frame_id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
