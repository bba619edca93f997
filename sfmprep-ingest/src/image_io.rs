//! Frame decoding and resizing shared by the loaders.

use crate::source::{SourceError, TargetSize};
use glam::{DMat3, DVec3};
use image::RgbImage;
use image::imageops::FilterType;
use std::path::Path;

/// Decode an image as RGB8 and resize it to `size`.
pub fn load_resized(path: &Path, size: TargetSize) -> Result<RgbImage, SourceError> {
    let decoded = image::open(path)
        .map_err(|source| SourceError::Image {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgb8();

    if decoded.dimensions() == (size.width, size.height) {
        return Ok(decoded);
    }
    Ok(image::imageops::resize(
        &decoded,
        size.width,
        size.height,
        FilterType::Triangle,
    ))
}

/// Horizontal and vertical scale from the raw image at `path` to `size`.
/// Only the image header is read.
pub fn zoom_factors(path: &Path, size: TargetSize) -> Result<(f64, f64), SourceError> {
    let (w, h) = image::image_dimensions(path).map_err(|source| SourceError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((
        f64::from(size.width) / f64::from(w),
        f64::from(size.height) / f64::from(h),
    ))
}

/// Scale the first two rows of a camera matrix to match a resized image.
pub(crate) fn rescale_intrinsics(k: &DMat3, zoom_x: f64, zoom_y: f64) -> DMat3 {
    DMat3::from_diagonal(DVec3::new(zoom_x, zoom_y, 1.0)) * *k
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::write_png;
    use sfmprep_data::PinholeIntrinsics;

    #[test]
    fn test_load_resized_matches_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        write_png(&path, 64, 32, 10);

        let image = load_resized(&path, TargetSize::new(16, 8)).unwrap();
        assert_eq!(image.dimensions(), (16, 8));
    }

    #[test]
    fn test_load_resized_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_resized(&dir.path().join("nope.png"), TargetSize::default()).unwrap_err();
        assert!(matches!(err, SourceError::Image { .. }));
    }

    #[test]
    fn test_zoom_factors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        write_png(&path, 64, 32, 0);

        let (zx, zy) = zoom_factors(&path, TargetSize::new(16, 16)).unwrap();
        assert_eq!(zx, 0.25);
        assert_eq!(zy, 0.5);
    }

    #[test]
    fn test_rescale_intrinsics_scales_rows() {
        let k = PinholeIntrinsics::new(700.0, 710.0, 600.0, 180.0).to_matrix();
        let scaled = PinholeIntrinsics::from_matrix(&rescale_intrinsics(&k, 0.5, 0.25));
        assert_eq!(scaled, PinholeIntrinsics::new(350.0, 177.5, 300.0, 45.0));
        assert_eq!(rescale_intrinsics(&k, 0.5, 0.25).z_axis.z, 1.0);
    }
}
