//! High-level facade crate for the `sign-range-*` workspace.
//!
//! This crate provides:
//! - re-exports of the core geometry and the two estimator crates
//! - one-call helpers [`estimate_with_lidar`] and [`estimate_stereo`] that
//!   validate raw geometry scalars and run a pipeline end to end
//! - JSON config/report files ([`io`]) and a synthetic scene generator
//!   ([`synthetic`]) used by the `sign-range` CLI (feature `cli`)
//! - (feature `image`) `image::ImageBuffer` inputs and frame sizes read
//!   from image files named in configs
//!
//! ## Quickstart
//!
//! ```
//! use sign_range::core::{GrayImage, ImageDims};
//! use sign_range::{estimate_stereo, estimate_with_lidar, Centroid, LocateError, RangeScan};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Lidar fusion: 90 deg fov, 180 px wide frame, marker at column 45 -> 22.5 deg.
//! let frame = ImageDims::new(180, 120);
//! let scan = RangeScan::new(vec![2.5; 360])?;
//! let at_45 = |_: &ImageDims| -> Result<Centroid, LocateError> { Ok(Centroid::new(45.0, 60.0)) };
//! let res = estimate_with_lidar(&frame, &scan, std::f64::consts::FRAC_PI_2, &at_45)?;
//! assert_eq!(res.distance, 2.5);
//!
//! // Stereo: any locator works; this one picks the brightest pixel.
//! fn brightest(img: &GrayImage) -> Result<Centroid, LocateError> {
//!     let (idx, _) = img
//!         .data
//!         .iter()
//!         .enumerate()
//!         .max_by_key(|(_, v)| **v)
//!         .ok_or(LocateError::NoMarker)?;
//!     Ok(Centroid::new((idx % img.width) as f64, (idx / img.width) as f64))
//! }
//! let mut left = GrayImage::new(640, 480);
//! let mut right = GrayImage::new(640, 480);
//! left.data[200 * 640 + 340] = 255;
//! right.data[200 * 640 + 300] = 255;
//! let res = estimate_stereo(&left, &right, 60f64.to_radians(), 0.1, &brightest)?;
//! println!("depth={:.3} bearing={:.2}deg", res.distance, res.bearing_deg);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `sign_range::core`: centroids, fov, baseline, angular mapper, errors, logger.
//! - `sign_range::lidar`: range scans and the lidar fusion estimator.
//! - `sign_range::stereo`: stereo rig and the stereo depth estimator.

pub use sign_range_core as core;
pub use sign_range_lidar as lidar;
pub use sign_range_stereo as stereo;

pub use sign_range_core::{
    Bearing, CameraBaseline, Centroid, CentroidLocator, DistanceResult, EstimateSource,
    FieldOfView, GeometryError, LocateError,
};
pub use sign_range_lidar::{LidarFusionError, RangeScan, ScanIndexPolicy};
pub use sign_range_stereo::StereoError;

mod estimate;
pub mod io;
pub mod synthetic;

#[cfg(feature = "image")]
pub mod images;

pub use estimate::{estimate_stereo, estimate_with_lidar, EstimateError};
