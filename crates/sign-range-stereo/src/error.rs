use sign_range_core::{GeometryError, LocateError};

/// Errors returned by the stereo depth estimator.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StereoError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Locate(#[from] LocateError),
    #[error("disparity {disparity} px is not above {epsilon} px")]
    DegenerateDisparity { disparity: f64, epsilon: f64 },
    #[error("degenerate stereo depth ({depth})")]
    DegenerateDepth { depth: f64 },
    #[error("disparity epsilon must be finite and non-negative (got {epsilon})")]
    InvalidDisparityEpsilon { epsilon: f64 },
}
