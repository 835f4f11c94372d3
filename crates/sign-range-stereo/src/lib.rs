//! Marker depth and bearing from a horizontal stereo pair.
//!
//! Both cameras face forward with parallel optical axes, share the same field
//! of view and image width, and sit `baseline` apart. The left camera is the
//! reference camera; bearings are relative to the midpoint between the two
//! cameras, positive to the left.
//!
//! Steps:
//! 1. Focal length from the fov: `f = width / (2 tan(fov / 2))`.
//! 2. Disparity `d = |x_left - x_right|`, rejected when `d <= epsilon`.
//! 3. Depth `z = f * baseline / d`.
//! 4. Reference-camera angle `alpha = atan((width / 2 - x_left) / f)`.
//! 5. Lateral offset from the rig center `baseline / 2 + z tan(alpha)`, and
//!    bearing `beta = atan(offset / z)`.

mod error;
mod estimator;
mod rig;

pub use error::StereoError;
pub use estimator::{StereoDepthEstimator, StereoGeometry};
pub use rig::StereoRig;
