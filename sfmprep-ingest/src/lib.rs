//! sfmprep Ingest - scene sources for dataset preparation
//!
//! This crate defines the [`SceneSource`] contract consumed by the dump
//! pipeline and provides implementations for the supported datasets:
//!
//! - KITTI raw recordings (`kitti_raw`)
//! - KITTI odometry sequences (`kitti_odom`)
//! - Cityscapes (`cityscapes`, recognized but not implemented)
//!
//! ## Example
//!
//! ```ignore
//! use sfmprep_ingest::{DatasetFormat, DatasetLoader, LoaderConfig, SceneSource};
//!
//! let config = LoaderConfig::default();
//! let loader = DatasetLoader::open(DatasetFormat::KittiRaw, "/data/kitti_raw", &config)?;
//! for entry in loader.enumerate()? {
//!     let scene = loader.load(&entry)?;
//!     for frame in scene.frames {
//!         let frame = frame?;
//!         // Write frame.image as {frame.id}.jpg ...
//!     }
//! }
//! ```

mod format;
mod image_io;
mod kitti_odometry;
mod kitti_raw;
mod listing;
mod source;

#[cfg(test)]
mod test_fixtures;

pub use format::{DatasetFormat, DatasetLoader, LoaderConfig};
pub use image_io::{load_resized, zoom_factors};
pub use kitti_odometry::{DEFAULT_ODOMETRY_TRAIN_SEQUENCES, KittiOdometryLoader};
pub use kitti_raw::{DEFAULT_MIN_SPEED, KITTI_RAW_DATES, KittiRawLoader};
pub use source::{Frame, FrameIter, Scene, SceneEntry, SceneSource, SourceError, TargetSize};
