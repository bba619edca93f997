//! Top-level preparation run: open the dataset, dump every scene, then
//! write the train/val lists.

use crate::error::AppError;
use sfmprep_ingest::{DatasetFormat, DatasetLoader, LoaderConfig, SceneSource};
use sfmprep_pipeline::{DumpConfig, DumpSummary, PipelineDriver, SplitAssigner, SplitManifest};
use std::path::PathBuf;
use tracing::{info, warn};

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Everything one run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct PrepareConfig {
    pub dataset_dir: PathBuf,
    pub format: DatasetFormat,
    pub dump_root: PathBuf,
    pub loader: LoaderConfig,
    pub dump: DumpConfig,
    pub seed: u64,
    pub logging: LoggingConfig,
}

/// Outcome of a completed run.
#[derive(Debug)]
pub struct PrepareReport {
    pub dump: DumpSummary,
    pub split: SplitManifest,
}

fn init_logging(config: &LoggingConfig) {
    // A subscriber may already be installed (tests, embedding)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level)),
        )
        .with_target(false)
        .try_init();
}

/// Run the full preparation. The dump phase completes before the split
/// phase starts.
pub fn run(config: &PrepareConfig) -> Result<PrepareReport, AppError> {
    init_logging(&config.logging);

    let loader = DatasetLoader::open(config.format, &config.dataset_dir, &config.loader)?;
    info!(
        "Preparing {} dataset from {} into {}",
        loader.format(),
        config.dataset_dir.display(),
        config.dump_root.display()
    );

    let driver = PipelineDriver::new(config.dump.clone());
    let dump = driver.run(&loader, &config.dump_root)?;
    if dump.failed() > 0 {
        warn!("{} of {} scenes failed and were skipped", dump.failed(), dump.scenes);
    }

    let split = SplitAssigner::new(config.seed)
        .with_progress(config.dump.show_progress)
        .assign(&config.dump_root, loader.allows_random_validation())?;

    Ok(PrepareReport { dump, split })
}
