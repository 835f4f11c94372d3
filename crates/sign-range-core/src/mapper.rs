//! Pixel column to bearing mapping.
//!
//! The mapping is *linear* in the pixel offset:
//!
//! ```text
//! angle = (image_width / 2 - centroid_x) * (fov / image_width)
//! ```
//!
//! This is not a perspective (`atan`) projection. It agrees with the pinhole
//! model near the image center and under-reads toward the edges.

use serde::{Deserialize, Serialize};

use crate::{Centroid, FieldOfView, GeometryError};

/// Signed bearing in radians. Positive means left of the reference axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Bearing {
    pub radians: f64,
}

impl Bearing {
    pub fn from_radians(radians: f64) -> Self {
        Self { radians }
    }

    pub fn from_degrees(degrees: f64) -> Self {
        Self {
            radians: degrees.to_radians(),
        }
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.radians.to_degrees()
    }
}

/// Linear pixel-to-angle mapper for one camera.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AngularMapper {
    image_width: usize,
    fov: FieldOfView,
}

impl AngularMapper {
    pub fn new(image_width: usize, fov: FieldOfView) -> Result<Self, GeometryError> {
        if image_width == 0 {
            return Err(GeometryError::InvalidImageWidth { width: image_width });
        }
        Ok(Self { image_width, fov })
    }

    pub fn image_width(&self) -> usize {
        self.image_width
    }

    pub fn fov(&self) -> FieldOfView {
        self.fov
    }

    /// Radians per pixel column.
    #[inline]
    pub fn fov_per_pixel(&self) -> f64 {
        self.fov.radians() / self.image_width as f64
    }

    #[inline]
    pub fn image_center_x(&self) -> f64 {
        self.image_width as f64 / 2.0
    }

    /// Signed pixel offset `center - x`; positive left of center.
    #[inline]
    pub fn pixel_offset(&self, x: f64) -> f64 {
        self.image_center_x() - x
    }

    /// Bearing of pixel column `x`, which must lie in `[0, image_width)`.
    pub fn bearing(&self, x: f64) -> Result<Bearing, GeometryError> {
        Centroid::new(x, 0.0).check_within(self.image_width)?;
        Ok(Bearing::from_radians(
            self.pixel_offset(x) * self.fov_per_pixel(),
        ))
    }

    pub fn bearing_of(&self, centroid: &Centroid) -> Result<Bearing, GeometryError> {
        self.bearing(centroid.x())
    }
}

/// One-shot form of [`AngularMapper::bearing`].
pub fn pixel_to_bearing(
    centroid_x: f64,
    image_width: usize,
    fov: FieldOfView,
) -> Result<Bearing, GeometryError> {
    AngularMapper::new(image_width, fov)?.bearing(centroid_x)
}
