//! Supported dataset formats and the loader selected for each.

use crate::kitti_odometry::KittiOdometryLoader;
use crate::kitti_raw::{DEFAULT_MIN_SPEED, KittiRawLoader};
use crate::source::{Scene, SceneEntry, SceneSource, SourceError, TargetSize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Closed set of dataset formats understood by the preparation tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetFormat {
    KittiRaw,
    KittiOdometry,
    Cityscapes,
}

impl DatasetFormat {
    pub const ALL: [DatasetFormat; 3] = [
        DatasetFormat::KittiRaw,
        DatasetFormat::KittiOdometry,
        DatasetFormat::Cityscapes,
    ];

    /// Name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            DatasetFormat::KittiRaw => "kitti_raw",
            DatasetFormat::KittiOdometry => "kitti_odom",
            DatasetFormat::Cityscapes => "cityscapes",
        }
    }
}

impl fmt::Display for DatasetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DatasetFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|format| format.name()).collect();
                format!("unknown dataset format '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

/// Options shared by all loaders.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Resolution frames are resized to.
    pub size: TargetSize,
    /// File listing frames to discard. When absent, KITTI raw falls back to
    /// the speed heuristic.
    pub static_frames: Option<PathBuf>,
    /// Accumulated speed (m/s) above which a KITTI raw frame is kept.
    pub min_speed: f64,
    /// File listing the odometry sequences to materialize.
    pub train_sequences: Option<PathBuf>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            size: TargetSize::default(),
            static_frames: None,
            min_speed: DEFAULT_MIN_SPEED,
            train_sequences: None,
        }
    }
}

/// The loader for one dataset format, selected once at startup.
#[derive(Debug)]
pub enum DatasetLoader {
    KittiRaw(KittiRawLoader),
    KittiOdometry(KittiOdometryLoader),
}

impl DatasetLoader {
    /// Build the loader for `format`. Fails for formats without a loader
    /// and for unreadable configuration files, before any output is written.
    pub fn open(
        format: DatasetFormat,
        root: impl Into<PathBuf>,
        config: &LoaderConfig,
    ) -> Result<Self, SourceError> {
        let root = root.into();
        let loader = match format {
            DatasetFormat::KittiRaw => DatasetLoader::KittiRaw(KittiRawLoader::new(root, config)?),
            DatasetFormat::KittiOdometry => {
                DatasetLoader::KittiOdometry(KittiOdometryLoader::new(root, config)?)
            }
            DatasetFormat::Cityscapes => return Err(SourceError::Unimplemented(format)),
        };
        info!("Opened {} loader at {}", format, config.size);
        Ok(loader)
    }

    pub fn format(&self) -> DatasetFormat {
        match self {
            DatasetLoader::KittiRaw(_) => DatasetFormat::KittiRaw,
            DatasetLoader::KittiOdometry(_) => DatasetFormat::KittiOdometry,
        }
    }
}

impl SceneSource for DatasetLoader {
    fn enumerate(&self) -> Result<Vec<SceneEntry>, SourceError> {
        match self {
            DatasetLoader::KittiRaw(loader) => loader.enumerate(),
            DatasetLoader::KittiOdometry(loader) => loader.enumerate(),
        }
    }

    fn load(&self, entry: &SceneEntry) -> Result<Scene<'_>, SourceError> {
        match self {
            DatasetLoader::KittiRaw(loader) => loader.load(entry),
            DatasetLoader::KittiOdometry(loader) => loader.load(entry),
        }
    }

    fn allows_random_validation(&self) -> bool {
        match self {
            DatasetLoader::KittiRaw(loader) => loader.allows_random_validation(),
            DatasetLoader::KittiOdometry(loader) => loader.allows_random_validation(),
        }
    }
}
