//! Train/validation split over the materialized scene directories.
//!
//! Scene names are sorted before assignment. Together with a fixed seed
//! this makes the split reproducible across runs and platforms, whatever
//! order the filesystem lists directories in.

use crate::error::SplitError;
use indicatif::ProgressBar;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// Seed used when none is configured.
pub const DEFAULT_SPLIT_SEED: u64 = 8964;

/// Probability that a scene is assigned to validation.
pub const VALIDATION_FRACTION: f64 = 0.1;

pub const TRAIN_MANIFEST: &str = "train.txt";
pub const VAL_MANIFEST: &str = "val.txt";

/// Scene names per split, in the order they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitManifest {
    pub train: Vec<String>,
    pub val: Vec<String>,
}

impl SplitManifest {
    pub fn len(&self) -> usize {
        self.train.len() + self.val.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Assigns scene directories to the train or validation manifest.
#[derive(Debug, Clone)]
pub struct SplitAssigner {
    seed: u64,
    show_progress: bool,
}

impl SplitAssigner {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Scan the direct subdirectories of `output_root` and write
    /// `train.txt` and `val.txt` next to them, replacing earlier manifests.
    ///
    /// With `allow_validation` false every scene goes to train.
    pub fn assign(
        &self,
        output_root: &Path,
        allow_validation: bool,
    ) -> Result<SplitManifest, SplitError> {
        let train_path = output_root.join(TRAIN_MANIFEST);
        let val_path = output_root.join(VAL_MANIFEST);
        let mut train_file = create_manifest(&train_path)?;
        let mut val_file = create_manifest(&val_path)?;

        let scenes = scene_names(output_root)?;
        info!("Generating train/val lists for {} scenes", scenes.len());

        let progress = if self.show_progress {
            ProgressBar::new(scenes.len() as u64)
        } else {
            ProgressBar::hidden()
        };

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut manifest = SplitManifest::default();
        for name in scenes {
            if allow_validation && rng.random::<f64>() < VALIDATION_FRACTION {
                writeln!(val_file, "{}", name).map_err(|e| SplitError::io(&val_path, e))?;
                manifest.val.push(name);
            } else {
                writeln!(train_file, "{}", name).map_err(|e| SplitError::io(&train_path, e))?;
                manifest.train.push(name);
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        train_file.flush().map_err(|e| SplitError::io(&train_path, e))?;
        val_file.flush().map_err(|e| SplitError::io(&val_path, e))?;

        info!(
            "Split {} scenes: {} train, {} val",
            manifest.len(),
            manifest.train.len(),
            manifest.val.len()
        );
        Ok(manifest)
    }
}

impl Default for SplitAssigner {
    fn default() -> Self {
        Self::new(DEFAULT_SPLIT_SEED)
    }
}

fn create_manifest(path: &Path) -> Result<BufWriter<File>, SplitError> {
    let file = File::create(path).map_err(|e| SplitError::io(path, e))?;
    Ok(BufWriter::new(file))
}

/// Sorted names of the direct subdirectories of `root`.
///
/// Directories whose names are not valid UTF-8 cannot be written to a
/// manifest line unchanged and are skipped with a warning.
fn scene_names(root: &Path) -> Result<Vec<String>, SplitError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(root).map_err(|e| SplitError::io(root, e))? {
        let entry = entry.map_err(|e| SplitError::io(root, e))?;
        if !entry.path().is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => warn!("Skipping scene directory with non-UTF-8 name {:?}", raw),
        }
    }
    names.sort();
    Ok(names)
}
