//! Marker range from one camera fused with a 2D lidar scan.
//!
//! ## Quickstart
//!
//! ```
//! use sign_range_core::{FieldOfView, FixedCentroid, GrayImage};
//! use sign_range_lidar::{LidarFusionEstimator, LidarFusionParams, RangeScan};
//!
//! let fov = FieldOfView::from_degrees(90.0).unwrap();
//! let estimator = LidarFusionEstimator::new(LidarFusionParams::new(fov));
//!
//! let image = GrayImage::new(180, 120);
//! let scan = RangeScan::new((0..360).map(|deg| 1.0 + deg as f64).collect()).unwrap();
//! let res = estimator
//!     .estimate(&image, &scan, &FixedCentroid::at(45.0, 60.0))
//!     .unwrap();
//! assert_eq!(res.distance, 23.0); // scan[22]
//! ```
//!
//! Algorithm:
//! 1. Locate the marker centroid in the image.
//! 2. Map its column to a bearing with the linear fov-per-pixel mapper.
//! 3. Convert the bearing to degrees and truncate toward zero to get the
//!    scan index (`22.5 -> 22`, `-0.5 -> 0`, `-2.7 -> -2`).
//! 4. Look the index up in the scan under the configured [`ScanIndexPolicy`].

mod error;
mod estimator;
mod params;
mod scan;

pub use error::LidarFusionError;
pub use estimator::{truncate_to_index, LidarFusionEstimator};
pub use params::LidarFusionParams;
pub use scan::{RangeScan, RangeScanError, ScanIndexPolicy};
