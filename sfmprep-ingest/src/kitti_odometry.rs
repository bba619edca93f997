//! KITTI odometry benchmark sequences.
//!
//! ```text
//! sequences/00/
//!   calib.txt
//!   image_2/000000.png ...
//!   image_3/000000.png ...
//! ```
//!
//! Only the training sequences are materialized. The benchmark holds out
//! whole sequences for evaluation, so this source never allows random
//! validation sampling.

use crate::format::LoaderConfig;
use crate::image_io::{load_resized, rescale_intrinsics, zoom_factors};
use crate::listing::{file_name_string, file_stem_string, sorted_files};
use crate::source::{Frame, Scene, SceneEntry, SceneSource, SourceError, TargetSize};
use sfmprep_data::{CalibFile, StaticFrames};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Sequences used for training when no list is configured.
pub const DEFAULT_ODOMETRY_TRAIN_SEQUENCES: [&str; 9] =
    ["00", "01", "02", "03", "04", "05", "06", "07", "08"];

const CAMERAS: [&str; 2] = ["2", "3"];
const CALIB_FILE: &str = "calib.txt";

/// Loader for the KITTI odometry dataset.
#[derive(Debug)]
pub struct KittiOdometryLoader {
    root: PathBuf,
    size: TargetSize,
    static_frames: Option<StaticFrames>,
    sequences: Vec<String>,
}

impl KittiOdometryLoader {
    pub fn new(root: impl Into<PathBuf>, config: &LoaderConfig) -> Result<Self, SourceError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(SourceError::DatasetNotFound(root));
        }

        let static_frames = match &config.static_frames {
            Some(path) => Some(StaticFrames::read(path)?),
            None => None,
        };

        let sequences = match &config.train_sequences {
            Some(path) => read_sequence_list(path)?,
            None => DEFAULT_ODOMETRY_TRAIN_SEQUENCES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        Ok(Self {
            root,
            size: config.size,
            static_frames,
            sequences,
        })
    }

    pub fn sequences(&self) -> &[String] {
        &self.sequences
    }
}

/// One sequence id per line; blank lines are skipped.
fn read_sequence_list(path: &Path) -> Result<Vec<String>, SourceError> {
    let text = fs::read_to_string(path).map_err(|e| SourceError::io(path, e))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

impl SceneSource for KittiOdometryLoader {
    fn enumerate(&self) -> Result<Vec<SceneEntry>, SourceError> {
        let mut entries = Vec::new();
        for seq in &self.sequences {
            let seq_dir = self.root.join("sequences").join(seq);
            if !seq_dir.is_dir() {
                warn!("Sequence {} not found at {}", seq, seq_dir.display());
                continue;
            }
            for cam in CAMERAS {
                entries.push(SceneEntry::new(&seq_dir, cam, format!("{}_{}", seq, cam)));
            }
        }

        info!(
            "Found {} KITTI odometry scenes in {} sequences",
            entries.len(),
            self.sequences.len()
        );
        Ok(entries)
    }

    #[tracing::instrument(skip_all, fields(scene = %entry))]
    fn load(&self, entry: &SceneEntry) -> Result<Scene<'_>, SourceError> {
        let image_dir = entry.dir.join(format!("image_{}", entry.camera));
        let images = sorted_files(&image_dir, "png")?;
        let first = images
            .first()
            .ok_or_else(|| SourceError::NoFrames(image_dir.clone()))?;
        let (zoom_x, zoom_y) = zoom_factors(first, self.size)?;

        let calib = CalibFile::read(&entry.dir.join(CALIB_FILE))?;
        let projection = calib.projection(&format!("P{}", entry.camera))?;
        let intrinsics = rescale_intrinsics(&projection, zoom_x, zoom_y);

        let seq = file_name_string(&entry.dir);
        let static_frames = self.static_frames.as_ref();
        let size = self.size;
        let frames = images
            .into_iter()
            .map(|path| (file_stem_string(&path), path))
            .filter(move |(id, _)| !static_frames.is_some_and(|s| s.contains(&seq, id)))
            .map(move |(id, path)| -> Result<Frame, SourceError> {
                Ok(Frame::new(load_resized(&path, size)?, id))
            });

        Ok(Scene::new(&entry.rel_path, intrinsics, Box::new(frames)))
    }

    fn allows_random_validation(&self) -> bool {
        false
    }
}
