//! Scene source contract and the types flowing through it.

use crate::format::DatasetFormat;
use glam::DMat3;
use image::RgbImage;
use sfmprep_data::DataError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while enumerating or reading scenes.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Dataset root not found: {0}")]
    DatasetNotFound(PathBuf),

    #[error("Dataset format '{0}' is not implemented")]
    Unimplemented(DatasetFormat),

    #[error("No frames found in {0}")]
    NoFrames(PathBuf),

    #[error("Metadata error: {0}")]
    Data(#[from] DataError),

    #[error("Failed to read image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SourceError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Output resolution every frame is resized to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for TargetSize {
    fn default() -> Self {
        Self {
            width: 416,
            height: 128,
        }
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Lightweight handle to one scene, cheap to produce during enumeration.
///
/// Loading calibration and frame lists is deferred to
/// [`SceneSource::load`] so that it runs on the worker that materializes
/// the scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneEntry {
    /// Recording directory (KITTI drive, odometry sequence).
    pub dir: PathBuf,
    /// Camera identifier within the recording.
    pub camera: String,
    /// Output directory relative to the dump root. Unique per source.
    pub rel_path: PathBuf,
}

impl SceneEntry {
    pub fn new(
        dir: impl Into<PathBuf>,
        camera: impl Into<String>,
        rel_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            dir: dir.into(),
            camera: camera.into(),
            rel_path: rel_path.into(),
        }
    }
}

impl fmt::Display for SceneEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rel_path.display())
    }
}

/// A single resized frame and the identifier used as its file stem.
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: RgbImage,
    pub id: String,
}

impl Frame {
    pub fn new(image: RgbImage, id: impl Into<String>) -> Self {
        Self {
            image,
            id: id.into(),
        }
    }

    /// Get image dimensions (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Lazy, single-pass sequence of frames. Frames are decoded on demand.
pub type FrameIter<'a> = Box<dyn Iterator<Item = Result<Frame, SourceError>> + 'a>;

/// A loaded scene: rectified intrinsics plus its frames.
pub struct Scene<'a> {
    pub rel_path: PathBuf,
    /// Camera matrix already scaled to the target resolution.
    pub intrinsics: DMat3,
    pub frames: FrameIter<'a>,
}

impl<'a> Scene<'a> {
    pub fn new(rel_path: impl Into<PathBuf>, intrinsics: DMat3, frames: FrameIter<'a>) -> Self {
        Self {
            rel_path: rel_path.into(),
            intrinsics,
            frames,
        }
    }
}

impl fmt::Debug for Scene<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("rel_path", &self.rel_path)
            .field("intrinsics", &self.intrinsics)
            .finish_non_exhaustive()
    }
}

/// Trait for dataset loaders that provide scenes to materialize.
///
/// Implementations must be shareable across worker threads: `load` is
/// called concurrently for different entries.
pub trait SceneSource: Sync {
    /// List every scene this source can produce. Each entry's `rel_path`
    /// must be unique.
    fn enumerate(&self) -> Result<Vec<SceneEntry>, SourceError>;

    /// Load intrinsics and the frame sequence for one entry.
    fn load(&self, entry: &SceneEntry) -> Result<Scene<'_>, SourceError>;

    /// Whether scenes may be sampled at random into the validation split.
    ///
    /// Sources whose benchmark defines held-out sequences return `false`.
    fn allows_random_validation(&self) -> bool {
        true
    }
}
