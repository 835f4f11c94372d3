//! Validated camera geometry scalars.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::GeometryError;

/// Horizontal field of view of a camera, in radians, `0 < fov < pi`.
///
/// Serialized as a bare radian value; deserialization re-validates it.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct FieldOfView(f64);

impl FieldOfView {
    pub fn from_radians(fov: f64) -> Result<Self, GeometryError> {
        if fov.is_finite() && fov > 0.0 && fov < PI {
            Ok(Self(fov))
        } else {
            Err(GeometryError::InvalidFov { fov })
        }
    }

    pub fn from_degrees(fov_deg: f64) -> Result<Self, GeometryError> {
        Self::from_radians(fov_deg.to_radians())
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0.to_degrees()
    }
}

impl TryFrom<f64> for FieldOfView {
    type Error = GeometryError;

    fn try_from(fov: f64) -> Result<Self, Self::Error> {
        Self::from_radians(fov)
    }
}

impl From<FieldOfView> for f64 {
    fn from(fov: FieldOfView) -> Self {
        fov.0
    }
}

/// Horizontal separation between two parallel, co-planar cameras.
///
/// Units are whatever the caller measures in; stereo depth comes out in the
/// same units.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct CameraBaseline(f64);

impl CameraBaseline {
    pub fn new(baseline: f64) -> Result<Self, GeometryError> {
        if baseline.is_finite() && baseline > 0.0 {
            Ok(Self(baseline))
        } else {
            Err(GeometryError::InvalidBaseline { baseline })
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for CameraBaseline {
    type Error = GeometryError;

    fn try_from(baseline: f64) -> Result<Self, Self::Error> {
        Self::new(baseline)
    }
}

impl From<CameraBaseline> for f64 {
    fn from(baseline: CameraBaseline) -> Self {
        baseline.0
    }
}

/// Pinhole focal length in pixels for a camera whose full horizontal
/// field of view spans `image_width` pixels:
/// `image_width / (2 * tan(fov / 2))`.
pub fn focal_length_px(image_width: usize, fov: FieldOfView) -> Result<f64, GeometryError> {
    if image_width == 0 {
        return Err(GeometryError::InvalidImageWidth { width: image_width });
    }
    Ok(image_width as f64 / (2.0 * (fov.radians() / 2.0).tan()))
}
