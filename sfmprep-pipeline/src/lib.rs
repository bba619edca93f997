//! sfmprep Pipeline Crate
//!
//! Turns scenes from a [`SceneSource`](sfmprep_ingest::SceneSource) into the
//! flat training layout:
//!
//! ```text
//! dump_root/
//!   {scene}/cam.txt
//!   {scene}/{frame_id}.jpg ...
//!   train.txt
//!   val.txt
//! ```
//!
//! ## Modules
//!
//! - [`materialize`]: writes one scene directory and prunes incomplete ones
//! - [`driver`]: runs the materializer over every scene on a worker pool
//! - [`split`]: assigns surviving scene directories to train or validation
//!
//! The split must only run after [`PipelineDriver::run`] has returned, so
//! that it sees the pruned tree.

pub mod driver;
mod error;
pub mod materialize;
pub mod split;

#[cfg(test)]
mod test_support;

pub use driver::{DumpConfig, DumpSummary, PipelineDriver, SceneFailure};
pub use error::{DumpError, MaterializeError, SplitError};
pub use materialize::{MIN_FRAMES_PER_SCENE, MaterializeOutcome, SceneMaterializer};
pub use split::{
    DEFAULT_SPLIT_SEED, SplitAssigner, SplitManifest, TRAIN_MANIFEST, VAL_MANIFEST,
    VALIDATION_FRACTION,
};
