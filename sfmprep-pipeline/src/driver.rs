//! Parallel dump of every scene a source provides.

use crate::error::{DumpError, MaterializeError};
use crate::materialize::{MaterializeOutcome, SceneMaterializer};
use indicatif::ProgressBar;
use rayon::prelude::*;
use sfmprep_ingest::{SceneEntry, SceneSource};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Worker pool and reporting options for the dump phase.
#[derive(Debug, Clone)]
pub struct DumpConfig {
    /// Number of scenes materialized concurrently.
    pub num_threads: usize,
    /// Draw a progress bar on stderr.
    pub show_progress: bool,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            num_threads: 4,
            show_progress: true,
        }
    }
}

/// A scene whose materialization failed.
#[derive(Debug)]
pub struct SceneFailure {
    pub rel_path: PathBuf,
    pub error: MaterializeError,
}

/// Aggregate result of a dump run.
#[derive(Debug, Default)]
pub struct DumpSummary {
    pub scenes: usize,
    pub kept: usize,
    pub pruned: usize,
    pub frames_written: usize,
    pub failures: Vec<SceneFailure>,
}

impl DumpSummary {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    fn record(&mut self, rel_path: PathBuf, result: Result<MaterializeOutcome, MaterializeError>) {
        self.scenes += 1;
        match result {
            Ok(MaterializeOutcome::Kept { frames }) => {
                self.kept += 1;
                self.frames_written += frames;
            }
            Ok(MaterializeOutcome::Pruned { .. }) => self.pruned += 1,
            Err(error) => self.failures.push(SceneFailure { rel_path, error }),
        }
    }
}

type SceneResult = (PathBuf, Result<MaterializeOutcome, MaterializeError>);

/// Runs the materializer for every scene of a source on a fixed-size pool.
pub struct PipelineDriver {
    config: DumpConfig,
}

impl PipelineDriver {
    pub fn new(config: DumpConfig) -> Self {
        Self { config }
    }

    /// Materialize every scene of `source` below `output_root`.
    ///
    /// A failing scene is logged and recorded in the summary; the remaining
    /// scenes still run. Returns only after every worker has finished, so
    /// the tree is final once this returns.
    pub fn run<S: SceneSource>(
        &self,
        source: &S,
        output_root: &Path,
    ) -> Result<DumpSummary, DumpError> {
        if self.config.num_threads == 0 {
            return Err(DumpError::InvalidWorkerCount);
        }

        fs::create_dir_all(output_root).map_err(|source| DumpError::OutputRoot {
            path: output_root.to_path_buf(),
            source,
        })?;

        let entries = source.enumerate()?;
        info!(
            "Retrieving frames for {} scenes with {} workers",
            entries.len(),
            self.config.num_threads
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.num_threads)
            .thread_name(|i| format!("sfmprep-worker-{}", i))
            .build()?;

        let progress = self.progress_bar(entries.len());
        let materializer = SceneMaterializer::new(output_root);

        let results: Vec<SceneResult> = pool.install(|| {
            entries
                .par_iter()
                .map(|entry| {
                    let result = dump_scene(source, &materializer, entry);
                    if let Err(e) = &result {
                        error!("Scene {} failed: {}", entry, e);
                    }
                    progress.inc(1);
                    (entry.rel_path.clone(), result)
                })
                .collect()
        });
        progress.finish_and_clear();

        let mut summary = DumpSummary::default();
        for (rel_path, result) in results {
            summary.record(rel_path, result);
        }

        info!(
            "Dumped {} scenes: {} kept ({} frames), {} pruned, {} failed",
            summary.scenes,
            summary.kept,
            summary.frames_written,
            summary.pruned,
            summary.failed()
        );
        Ok(summary)
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if self.config.show_progress {
            ProgressBar::new(len as u64)
        } else {
            ProgressBar::hidden()
        }
    }
}

fn dump_scene<S: SceneSource>(
    source: &S,
    materializer: &SceneMaterializer,
    entry: &SceneEntry,
) -> Result<MaterializeOutcome, MaterializeError> {
    let scene = source.load(entry)?;
    materializer.materialize(scene)
}
