//! Synthetic KITTI-style directory trees for loader tests.

use image::{Rgb, RgbImage};
use std::fs;
use std::path::Path;

/// Projection matrix row-major 3x4, fx=700 fy=710 cx=600 cy=180.
pub const PROJECTION: &str = "7.000000e+02 0.000000e+00 6.000000e+02 4.485728e+01 0.000000e+00 7.100000e+02 1.800000e+02 2.163791e-01 0.000000e+00 0.000000e+00 1.000000e+00 2.745884e-03";

pub fn write_png(path: &Path, width: u32, height: u32, shade: u8) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    RgbImage::from_pixel(width, height, Rgb([shade, shade / 2, 255 - shade]))
        .save(path)
        .unwrap();
}

/// OXTS packet with the given forward velocity.
pub fn oxts_line(forward: f64) -> String {
    let mut fields = vec![0.0f64; 30];
    fields[8] = forward;
    fields
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write `{date}/{drive}` with one image per forward speed, for cameras 02
/// and 03, plus the date's calibration file.
pub fn write_kitti_raw_drive(root: &Path, date: &str, drive: &str, speeds: &[f64]) {
    let date_dir = root.join(date);
    fs::create_dir_all(&date_dir).unwrap();
    fs::write(
        date_dir.join("calib_cam_to_cam.txt"),
        format!(
            "calib_time: 09-Jan-2012 13:57:47\nP_rect_02: {PROJECTION}\nP_rect_03: {PROJECTION}\n"
        ),
    )
    .unwrap();

    let drive_dir = date_dir.join(drive);
    let oxts_dir = drive_dir.join("oxts").join("data");
    fs::create_dir_all(&oxts_dir).unwrap();
    for (n, speed) in speeds.iter().enumerate() {
        fs::write(oxts_dir.join(format!("{:010}.txt", n)), oxts_line(*speed)).unwrap();
        for cam in ["02", "03"] {
            let image = drive_dir
                .join(format!("image_{cam}"))
                .join("data")
                .join(format!("{:010}.png", n));
            write_png(&image, 64, 32, (n * 20) as u8);
        }
    }
}

/// Write `sequences/{seq}` with `frames` images for cameras 2 and 3.
pub fn write_odometry_sequence(root: &Path, seq: &str, frames: usize) {
    let seq_dir = root.join("sequences").join(seq);
    fs::create_dir_all(&seq_dir).unwrap();
    fs::write(
        seq_dir.join("calib.txt"),
        format!("P0: {PROJECTION}\nP1: {PROJECTION}\nP2: {PROJECTION}\nP3: {PROJECTION}\n"),
    )
    .unwrap();
    for n in 0..frames {
        for cam in ["2", "3"] {
            let image = seq_dir
                .join(format!("image_{cam}"))
                .join(format!("{:06}.png", n));
            write_png(&image, 64, 32, (n * 20) as u8);
        }
    }
}
