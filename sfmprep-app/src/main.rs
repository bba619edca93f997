//! sfmprep
//!
//! Prepares raw driving datasets for unsupervised depth and pose training:
//! one directory of resized JPEG frames plus `cam.txt` per scene, and
//! `train.txt` / `val.txt` manifests at the dump root.

mod app;
mod error;

use app::{LoggingConfig, PrepareConfig};
use clap::Parser;
use sfmprep_ingest::{DEFAULT_MIN_SPEED, DatasetFormat, LoaderConfig, TargetSize};
use sfmprep_pipeline::{DEFAULT_SPLIT_SEED, DumpConfig};
use std::path::PathBuf;
use tracing::info;

/// sfmprep - dump driving datasets into a flat training layout
#[derive(Parser, Debug)]
#[command(name = "sfmprep")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the raw dataset
    dataset_dir: PathBuf,

    /// Layout of the raw dataset: kitti_raw, kitti_odom or cityscapes
    #[arg(long)]
    dataset_format: DatasetFormat,

    /// List of frames to discard for being static. Without it, KITTI raw
    /// frames are filtered on recorded speed
    #[arg(long)]
    static_frames: Option<PathBuf>,

    /// Where to dump the data
    #[arg(long)]
    dump_root: PathBuf,

    /// Image height
    #[arg(long, default_value_t = 128, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Image width
    #[arg(long, default_value_t = 416, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Number of threads to use
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..))]
    num_threads: u16,

    /// Odometry sequences to dump, one per line (default: 00 to 08)
    #[arg(long)]
    train_sequences: Option<PathBuf>,

    /// Accumulated speed in m/s above which a KITTI raw frame is kept
    #[arg(long, default_value_t = DEFAULT_MIN_SPEED)]
    min_speed: f64,

    /// Seed for the train/val split
    #[arg(long, default_value_t = DEFAULT_SPLIT_SEED)]
    seed: u64,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Hide progress bars
    #[arg(long)]
    no_progress: bool,
}

impl Args {
    fn into_config(self) -> PrepareConfig {
        let show_progress = !self.no_progress;
        PrepareConfig {
            dataset_dir: self.dataset_dir,
            format: self.dataset_format,
            dump_root: self.dump_root,
            loader: LoaderConfig {
                size: TargetSize::new(self.width, self.height),
                static_frames: self.static_frames,
                min_speed: self.min_speed,
                train_sequences: self.train_sequences,
            },
            dump: DumpConfig {
                num_threads: usize::from(self.num_threads),
                show_progress,
            },
            seed: self.seed,
            logging: LoggingConfig {
                level: self.log_level,
            },
        }
    }
}

fn main() {
    let config = Args::parse().into_config();

    match app::run(&config) {
        Ok(report) => info!(
            "Done: {} scenes in {} ({} train, {} val, {} failed)",
            report.split.len(),
            config.dump_root.display(),
            report.split.train.len(),
            report.split.val.len(),
            report.dump.failed()
        ),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from([
            "sfmprep",
            "/data/kitti",
            "--dataset-format",
            "kitti_raw",
            "--dump-root",
            "/tmp/dump",
        ])
        .unwrap();

        let config = args.into_config();
        assert_eq!(config.format, DatasetFormat::KittiRaw);
        assert_eq!(config.loader.size, TargetSize::new(416, 128));
        assert_eq!(config.dump.num_threads, 4);
        assert!(config.dump.show_progress);
        assert_eq!(config.seed, 8964);
        assert_eq!(config.loader.min_speed, 2.0);
        assert!(config.loader.static_frames.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_all_options() {
        let args = Args::try_parse_from([
            "sfmprep",
            "/data/odometry",
            "--dataset-format",
            "kitti_odom",
            "--dump-root",
            "/tmp/dump",
            "--static-frames",
            "static.txt",
            "--height",
            "256",
            "--width",
            "832",
            "--num-threads",
            "12",
            "--train-sequences",
            "seqs.txt",
            "--seed",
            "7",
            "--no-progress",
        ])
        .unwrap();

        let config = args.into_config();
        assert_eq!(config.format, DatasetFormat::KittiOdometry);
        assert_eq!(config.loader.size, TargetSize::new(832, 256));
        assert_eq!(config.dump.num_threads, 12);
        assert!(!config.dump.show_progress);
        assert_eq!(config.seed, 7);
        assert_eq!(config.loader.static_frames, Some(PathBuf::from("static.txt")));
        assert_eq!(config.loader.train_sequences, Some(PathBuf::from("seqs.txt")));
    }

    #[test]
    fn test_every_format_name_accepted() {
        for format in DatasetFormat::ALL {
            let args = Args::try_parse_from([
                "sfmprep",
                "/data",
                "--dataset-format",
                format.name(),
                "--dump-root",
                "/tmp/dump",
            ])
            .unwrap();
            assert_eq!(args.dataset_format, format);
        }
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result = Args::try_parse_from([
            "sfmprep",
            "/data",
            "--dataset-format",
            "nuscenes",
            "--dump-root",
            "/tmp/dump",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_and_dump_root_required() {
        let no_format = ["sfmprep", "/data", "--dump-root", "/tmp/dump"];
        let no_dump_root = ["sfmprep", "/data", "--dataset-format", "kitti_raw"];
        assert!(Args::try_parse_from(no_format).is_err());
        assert!(Args::try_parse_from(no_dump_root).is_err());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let result = Args::try_parse_from([
            "sfmprep",
            "/data",
            "--dataset-format",
            "kitti_raw",
            "--dump-root",
            "/tmp/dump",
            "--num-threads",
            "0",
        ]);
        assert!(result.is_err());
    }
}
