/// Malformed camera geometry or inputs that violate it.
///
/// These are reported immediately and never replaced by defaults.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("field of view must lie in (0, pi) radians (got {fov})")]
    InvalidFov { fov: f64 },

    #[error("image width must be positive (got {width})")]
    InvalidImageWidth { width: usize },

    #[error("camera baseline must be positive and finite (got {baseline})")]
    InvalidBaseline { baseline: f64 },

    #[error("centroid x={x} lies outside the image [0, {width})")]
    CentroidOutsideImage { x: f64, width: usize },

    #[error("stereo images differ in width (left={left}, right={right})")]
    ImageWidthMismatch { left: usize, right: usize },
}
