use crate::core::{
    CameraBaseline, CentroidLocator, DistanceResult, FieldOfView, GeometryError, ImageSize,
};
use crate::lidar::{
    LidarFusionError, LidarFusionEstimator, LidarFusionParams, RangeScan, RangeScanError,
};
use crate::stereo::{StereoDepthEstimator, StereoError, StereoRig};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    RangeScan(#[from] RangeScanError),

    #[error(transparent)]
    Lidar(#[from] LidarFusionError),

    #[error(transparent)]
    Stereo(#[from] StereoError),

    #[error("image width unknown: set `image_width` or `image_path` in the config")]
    MissingImageWidth,

    #[error("failed to read image {path}: {reason}")]
    ImageRead { path: String, reason: String },
}

/// Range and bearing of the marker from one camera frame and a lidar scan.
///
/// `fov_rad` is the camera's horizontal field of view in radians. The scan is
/// addressed with [`crate::ScanIndexPolicy::Strict`].
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(image, scan, locator), fields(width = image.width()))
)]
pub fn estimate_with_lidar<I, L>(
    image: &I,
    scan: &RangeScan,
    fov_rad: f64,
    locator: &L,
) -> Result<DistanceResult, EstimateError>
where
    I: ImageSize + ?Sized,
    L: CentroidLocator<I> + ?Sized,
{
    let fov = FieldOfView::from_radians(fov_rad)?;
    let estimator = LidarFusionEstimator::new(LidarFusionParams::new(fov));
    Ok(estimator.estimate(image, scan, locator)?)
}

/// Depth and bearing of the marker from a left/right stereo pair.
///
/// The left image is the reference camera; `baseline` is the camera
/// separation and sets the unit of the returned depth.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(left, right, locator), fields(width = left.width()))
)]
pub fn estimate_stereo<I, L>(
    left: &I,
    right: &I,
    fov_rad: f64,
    baseline: f64,
    locator: &L,
) -> Result<DistanceResult, EstimateError>
where
    I: ImageSize + ?Sized,
    L: CentroidLocator<I> + ?Sized,
{
    let rig = StereoRig::new(
        FieldOfView::from_radians(fov_rad)?,
        CameraBaseline::new(baseline)?,
    );
    Ok(StereoDepthEstimator::new(rig).estimate(left, right, locator)?)
}
