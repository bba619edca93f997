//! sfmprep Data Crate
//!
//! Text formats read and written while preparing driving datasets: the
//! `cam.txt` intrinsics record, KITTI calibration files, OXTS packets and
//! static-frame lists. Nothing here touches images.

pub mod calib;
mod error;
pub mod intrinsics;
pub mod oxts;
pub mod static_frames;

pub use calib::{CalibFile, projection_intrinsics};
pub use error::DataError;
pub use intrinsics::{CAM_FILE_NAME, PinholeIntrinsics};
pub use oxts::OxtsPacket;
pub use static_frames::StaticFrames;
