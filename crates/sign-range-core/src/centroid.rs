//! Marker centroids and the locator seam.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::{GeometryError, ImageSize};

/// Pixel-space center of a detected marker.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub position: Point2<f64>,
}

impl Centroid {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Point2::new(x, y),
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Check that the horizontal coordinate lies in `[0, width)`.
    pub fn check_within(&self, width: usize) -> Result<(), GeometryError> {
        let x = self.x();
        if width == 0 {
            return Err(GeometryError::InvalidImageWidth { width });
        }
        if x.is_finite() && x >= 0.0 && x < width as f64 {
            Ok(())
        } else {
            Err(GeometryError::CentroidOutsideImage { x, width })
        }
    }
}

/// Failures of the upstream marker detector.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    #[error("no marker detected in image")]
    NoMarker,
    #[error("centroid locator failed: {0}")]
    Failed(String),
}

/// Finds the centroid of the marker in an image.
///
/// A missing detection must be reported as [`LocateError::NoMarker`]; it is
/// never substituted with a placeholder coordinate.
pub trait CentroidLocator<I: ?Sized> {
    fn locate_centroid(&self, image: &I) -> Result<Centroid, LocateError>;
}

impl<I: ?Sized, F> CentroidLocator<I> for F
where
    F: Fn(&I) -> Result<Centroid, LocateError>,
{
    fn locate_centroid(&self, image: &I) -> Result<Centroid, LocateError> {
        self(image)
    }
}

/// Locator that returns a centroid computed ahead of time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixedCentroid(pub Option<Centroid>);

impl FixedCentroid {
    pub fn at(x: f64, y: f64) -> Self {
        Self(Some(Centroid::new(x, y)))
    }

    pub fn missing() -> Self {
        Self(None)
    }
}

impl<I: ImageSize + ?Sized> CentroidLocator<I> for FixedCentroid {
    fn locate_centroid(&self, _image: &I) -> Result<Centroid, LocateError> {
        self.0.ok_or(LocateError::NoMarker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GrayImage;

    #[test]
    fn check_within_accepts_half_open_range() {
        assert!(Centroid::new(0.0, 5.0).check_within(100).is_ok());
        assert!(Centroid::new(99.9, 5.0).check_within(100).is_ok());
        assert_eq!(
            Centroid::new(100.0, 5.0).check_within(100),
            Err(GeometryError::CentroidOutsideImage {
                x: 100.0,
                width: 100
            })
        );
        assert!(Centroid::new(-0.1, 5.0).check_within(100).is_err());
        assert!(Centroid::new(f64::NAN, 5.0).check_within(100).is_err());
    }

    #[test]
    fn fixed_locator_reports_missing_marker() {
        let img = GrayImage::new(8, 8);
        assert_eq!(
            FixedCentroid::missing().locate_centroid(&img),
            Err(LocateError::NoMarker)
        );
        assert_eq!(
            FixedCentroid::at(3.0, 4.0).locate_centroid(&img),
            Ok(Centroid::new(3.0, 4.0))
        );
    }

    #[test]
    fn closures_are_locators() {
        let img = GrayImage::new(8, 8);
        let locator = |image: &GrayImage| -> Result<Centroid, LocateError> {
            Ok(Centroid::new(image.width as f64 / 2.0, 0.0))
        };
        assert_eq!(locator.locate_centroid(&img), Ok(Centroid::new(4.0, 0.0)));
    }
}
