//! Writing one scene to disk.

use crate::error::MaterializeError;
use image::ImageFormat;
use sfmprep_data::{CAM_FILE_NAME, PinholeIntrinsics};
use sfmprep_ingest::Scene;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Scenes with fewer JPEG frames than this are deleted after writing.
pub const MIN_FRAMES_PER_SCENE: usize = 3;

const FRAME_EXTENSION: &str = "jpg";

/// What happened to a scene directory after materialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterializeOutcome {
    /// Directory kept with this many frames.
    Kept { frames: usize },
    /// Directory deleted; only this many frames were written.
    Pruned { frames: usize },
}

impl MaterializeOutcome {
    pub fn is_kept(&self) -> bool {
        matches!(self, MaterializeOutcome::Kept { .. })
    }
}

/// Writes scenes below an output root.
#[derive(Debug, Clone)]
pub struct SceneMaterializer {
    output_root: PathBuf,
    min_frames: usize,
}

impl SceneMaterializer {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            min_frames: MIN_FRAMES_PER_SCENE,
        }
    }

    /// Write `cam.txt` and every frame of `scene`, then delete the directory
    /// if it holds fewer than [`MIN_FRAMES_PER_SCENE`] JPEG files.
    ///
    /// On error the partially written directory is removed and the error
    /// is returned. Other scene directories are never touched.
    #[tracing::instrument(skip_all, fields(scene = %scene.rel_path.display()))]
    pub fn materialize(&self, scene: Scene<'_>) -> Result<MaterializeOutcome, MaterializeError> {
        let dump_dir = self.output_root.join(&scene.rel_path);
        let result = self.write_scene(&dump_dir, scene);

        if result.is_err() && dump_dir.exists() {
            if let Err(e) = fs::remove_dir_all(&dump_dir) {
                warn!("Failed to remove partial scene {}: {}", dump_dir.display(), e);
            }
        }
        result
    }

    fn write_scene(
        &self,
        dump_dir: &Path,
        scene: Scene<'_>,
    ) -> Result<MaterializeOutcome, MaterializeError> {
        fs::create_dir_all(dump_dir).map_err(|e| MaterializeError::io(dump_dir, e))?;

        let intrinsics = PinholeIntrinsics::from_matrix(&scene.intrinsics);
        intrinsics.write_cam_file(&dump_dir.join(CAM_FILE_NAME))?;

        for frame in scene.frames {
            let frame = frame?;
            let path = dump_dir.join(format!("{}.{}", frame.id, FRAME_EXTENSION));
            frame
                .image
                .save_with_format(&path, ImageFormat::Jpeg)
                .map_err(|source| MaterializeError::Encode {
                    path: path.clone(),
                    source,
                })?;
        }

        let frames = count_frames(dump_dir)?;
        if frames < self.min_frames {
            fs::remove_dir_all(dump_dir).map_err(|e| MaterializeError::io(dump_dir, e))?;
            debug!("Pruned with {} frames", frames);
            return Ok(MaterializeOutcome::Pruned { frames });
        }

        debug!("Kept with {} frames", frames);
        Ok(MaterializeOutcome::Kept { frames })
    }
}

/// Number of `.jpg` files directly inside `dir`.
fn count_frames(dir: &Path) -> Result<usize, MaterializeError> {
    let mut count = 0;
    for entry in fs::read_dir(dir).map_err(|e| MaterializeError::io(dir, e))? {
        let path = entry.map_err(|e| MaterializeError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == FRAME_EXTENSION) {
            count += 1;
        }
    }
    Ok(count)
}
