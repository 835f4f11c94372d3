use sign_range_core::{GeometryError, LocateError};

/// Errors returned by the lidar fusion estimator.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LidarFusionError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Locate(#[from] LocateError),
    #[error("bearing {bearing_deg:.3} deg maps to scan index {index}, outside 0..{len}")]
    BearingOutOfScanRange {
        bearing_deg: f64,
        index: i64,
        len: usize,
    },
}
