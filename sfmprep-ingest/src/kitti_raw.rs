//! KITTI raw recordings.
//!
//! Layout under the dataset root:
//!
//! ```text
//! 2011_09_26/
//!   calib_cam_to_cam.txt
//!   2011_09_26_drive_0001_sync/
//!     oxts/data/0000000000.txt ...
//!     image_02/data/0000000000.png ...
//!     image_03/data/0000000000.png ...
//! ```
//!
//! Every drive yields one scene per colour camera, named `{drive}_{cam}`.

use crate::format::LoaderConfig;
use crate::image_io::{load_resized, rescale_intrinsics, zoom_factors};
use crate::listing::{file_name_string, sorted_files, sorted_subdirs};
use crate::source::{Frame, Scene, SceneEntry, SceneSource, SourceError, TargetSize};
use glam::DVec3;
use sfmprep_data::{CalibFile, OxtsPacket, StaticFrames};
use std::path::PathBuf;
use tracing::{debug, info};

/// Recording dates of the raw dataset.
pub const KITTI_RAW_DATES: [&str; 5] = [
    "2011_09_26",
    "2011_09_28",
    "2011_09_29",
    "2011_09_30",
    "2011_10_03",
];

/// Minimum accumulated speed (m/s) for a frame to count as moving.
pub const DEFAULT_MIN_SPEED: f64 = 2.0;

const CAMERAS: [&str; 2] = ["02", "03"];
const CALIB_FILE: &str = "calib_cam_to_cam.txt";

/// Loader for the KITTI raw dataset.
#[derive(Debug)]
pub struct KittiRawLoader {
    root: PathBuf,
    size: TargetSize,
    static_frames: Option<StaticFrames>,
    min_speed: f64,
}

impl KittiRawLoader {
    /// Create a loader rooted at `root`. Reads the static-frames file, if
    /// configured, so that a bad path fails before any work starts.
    pub fn new(root: impl Into<PathBuf>, config: &LoaderConfig) -> Result<Self, SourceError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(SourceError::DatasetNotFound(root));
        }

        let static_frames = match &config.static_frames {
            Some(path) => Some(StaticFrames::read(path)?),
            None => None,
        };

        Ok(Self {
            root,
            size: config.size,
            static_frames,
            min_speed: config.min_speed,
        })
    }

    /// Indices of the frames to keep, given the drive's OXTS files.
    fn select_frames(
        &self,
        drive: &str,
        oxts_files: &[PathBuf],
    ) -> Result<Vec<usize>, SourceError> {
        if let Some(static_frames) = &self.static_frames {
            return Ok((0..oxts_files.len())
                .filter(|&n| !static_frames.contains(drive, &frame_id(n)))
                .collect());
        }

        let mut selected = Vec::new();
        let mut cumulative = DVec3::ZERO;
        for (n, path) in oxts_files.iter().enumerate() {
            cumulative += OxtsPacket::read(path)?.velocity;
            if cumulative.length() > self.min_speed {
                selected.push(n);
                cumulative = DVec3::ZERO;
            }
        }
        Ok(selected)
    }
}

fn frame_id(n: usize) -> String {
    format!("{:010}", n)
}

impl SceneSource for KittiRawLoader {
    fn enumerate(&self) -> Result<Vec<SceneEntry>, SourceError> {
        let mut entries = Vec::new();
        for date in KITTI_RAW_DATES {
            let date_dir = self.root.join(date);
            if !date_dir.is_dir() {
                debug!("Skipping missing date directory {}", date_dir.display());
                continue;
            }
            for drive in sorted_subdirs(&date_dir)? {
                let name = file_name_string(&drive);
                for cam in CAMERAS {
                    entries.push(SceneEntry::new(&drive, cam, format!("{}_{}", name, cam)));
                }
            }
        }

        info!("Found {} KITTI raw scenes under {}", entries.len(), self.root.display());
        Ok(entries)
    }

    #[tracing::instrument(skip_all, fields(scene = %entry))]
    fn load(&self, entry: &SceneEntry) -> Result<Scene<'_>, SourceError> {
        let drive = file_name_string(&entry.dir);
        let oxts_files = sorted_files(&entry.dir.join("oxts").join("data"), "txt")?;
        if oxts_files.is_empty() {
            return Err(SourceError::NoFrames(entry.dir.clone()));
        }

        let image_dir = entry.dir.join(format!("image_{}", entry.camera)).join("data");
        let first_frame = image_dir.join(format!("{}.png", frame_id(0)));
        let (zoom_x, zoom_y) = zoom_factors(&first_frame, self.size)?;

        let date_dir = entry
            .dir
            .parent()
            .ok_or_else(|| SourceError::DatasetNotFound(entry.dir.clone()))?;
        let calib = CalibFile::read(&date_dir.join(CALIB_FILE))?;
        let projection = calib.projection(&format!("P_rect_{}", entry.camera))?;
        let intrinsics = rescale_intrinsics(&projection, zoom_x, zoom_y);

        let selected = self.select_frames(&drive, &oxts_files)?;
        debug!("Selected {} of {} frames", selected.len(), oxts_files.len());

        let size = self.size;
        let frames = selected.into_iter().map(move |n| -> Result<Frame, SourceError> {
            let id = frame_id(n);
            let image = load_resized(&image_dir.join(format!("{}.png", id)), size)?;
            Ok(Frame::new(image, id))
        });

        Ok(Scene::new(&entry.rel_path, intrinsics, Box::new(frames)))
    }
}
