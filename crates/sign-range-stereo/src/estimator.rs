use log::debug;
use sign_range_core::{
    focal_length_px, Centroid, CentroidLocator, DistanceResult, GeometryError, ImageSize,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{StereoError, StereoRig};

/// Intermediate quantities of one stereo solve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StereoGeometry {
    /// Pinhole focal length, pixels.
    pub focal_px: f64,
    /// `|x_left - x_right|`, pixels.
    pub disparity_px: f64,
    /// Depth along the optical axes, baseline units.
    pub depth: f64,
    /// Angle from the left camera's optical axis to the marker.
    pub alpha_rad: f64,
    /// Angle from the rig centerline to the marker.
    pub beta_rad: f64,
}

impl StereoGeometry {
    pub fn bearing_deg(&self) -> f64 {
        self.beta_rad.to_degrees()
    }

    pub fn to_result(&self) -> DistanceResult {
        DistanceResult::new(self.depth, self.bearing_deg())
    }
}

/// Depth and bearing of a marker seen by both cameras of a [`StereoRig`].
#[derive(Clone, Debug)]
pub struct StereoDepthEstimator {
    rig: StereoRig,
}

impl StereoDepthEstimator {
    pub fn new(rig: StereoRig) -> Self {
        Self { rig }
    }

    pub fn rig(&self) -> &StereoRig {
        &self.rig
    }

    /// Locate the marker in both images and triangulate it.
    ///
    /// `left` is the reference camera.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "debug",
            skip(self, left, right, locator),
            fields(width = left.width())
        )
    )]
    pub fn estimate<I, L>(
        &self,
        left: &I,
        right: &I,
        locator: &L,
    ) -> Result<DistanceResult, StereoError>
    where
        I: ImageSize + ?Sized,
        L: CentroidLocator<I> + ?Sized,
    {
        let left_width = left.width();
        let right_width = right.width();
        if left_width != right_width {
            return Err(GeometryError::ImageWidthMismatch {
                left: left_width,
                right: right_width,
            }
            .into());
        }
        let c_left = locator.locate_centroid(left)?;
        let c_right = locator.locate_centroid(right)?;
        self.estimate_from_centroids(left_width, &c_left, &c_right)
    }

    /// Same as [`Self::estimate`] for centroids located elsewhere.
    pub fn estimate_from_centroids(
        &self,
        image_width: usize,
        left: &Centroid,
        right: &Centroid,
    ) -> Result<DistanceResult, StereoError> {
        Ok(self.solve(image_width, left, right)?.to_result())
    }

    /// Full stereo solve, exposing every intermediate quantity.
    pub fn solve(
        &self,
        image_width: usize,
        left: &Centroid,
        right: &Centroid,
    ) -> Result<StereoGeometry, StereoError> {
        let epsilon = self.rig.disparity_epsilon;
        if !(epsilon.is_finite() && epsilon >= 0.0) {
            return Err(StereoError::InvalidDisparityEpsilon { epsilon });
        }
        left.check_within(image_width)?;
        right.check_within(image_width)?;

        let focal_px = focal_length_px(image_width, self.rig.fov)?;
        let baseline = self.rig.baseline.get();

        let disparity_px = (left.x() - right.x()).abs();
        if disparity_px <= epsilon {
            return Err(StereoError::DegenerateDisparity {
                disparity: disparity_px,
                epsilon,
            });
        }

        let depth = focal_px * baseline / disparity_px;
        if !depth.is_finite() || depth <= 0.0 {
            return Err(StereoError::DegenerateDepth { depth });
        }

        // Re-project the left-camera angle onto the baseline midpoint.
        let pixel_offset = image_width as f64 / 2.0 - left.x();
        let alpha_rad = (pixel_offset / focal_px).atan();
        let lateral_from_left = depth * alpha_rad.tan();
        let lateral_from_center = baseline / 2.0 + lateral_from_left;
        let beta_rad = (lateral_from_center / depth).atan();

        debug!(
            "stereo: focal={:.3}px disparity={:.3}px depth={:.4} alpha={:.3}deg beta={:.3}deg",
            focal_px,
            disparity_px,
            depth,
            alpha_rad.to_degrees(),
            beta_rad.to_degrees()
        );

        Ok(StereoGeometry {
            focal_px,
            disparity_px,
            depth,
            alpha_rad,
            beta_rad,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use sign_range_core::{CameraBaseline, FieldOfView, FixedCentroid, GrayImage, LocateError};

    const WIDTH: usize = 640;

    fn rig(baseline: f64) -> StereoRig {
        StereoRig::new(
            FieldOfView::from_degrees(60.0).expect("valid fov"),
            CameraBaseline::new(baseline).expect("valid baseline"),
        )
    }

    fn depth_of(baseline: f64, x_left: f64, x_right: f64) -> f64 {
        StereoDepthEstimator::new(rig(baseline))
            .estimate_from_centroids(
                WIDTH,
                &Centroid::new(x_left, 0.0),
                &Centroid::new(x_right, 0.0),
            )
            .expect("solvable")
            .distance
    }

    /// Ideal pinhole column of a point at lateral `x`, depth `z`, seen by a
    /// camera at lateral offset `cam_x`.
    fn project(focal: f64, x: f64, z: f64, cam_x: f64) -> f64 {
        WIDTH as f64 / 2.0 - focal * (x - cam_x) / z
    }

    #[test]
    fn focal_length_is_derived_from_fov() {
        let geom = StereoDepthEstimator::new(rig(0.1))
            .solve(WIDTH, &Centroid::new(340.0, 0.0), &Centroid::new(300.0, 0.0))
            .expect("solvable");
        assert_abs_diff_eq!(geom.focal_px, 554.256, epsilon = 1e-3);
        assert_abs_diff_eq!(geom.disparity_px, 40.0);
        assert_abs_diff_eq!(geom.depth, 554.256 * 0.1 / 40.0, epsilon = 1e-5);
    }

    #[test]
    fn depth_scales_with_baseline_and_disparity() {
        let base = depth_of(0.1, 340.0, 300.0);
        assert_abs_diff_eq!(depth_of(0.2, 340.0, 300.0), 2.0 * base, epsilon = 1e-12);
        assert_abs_diff_eq!(depth_of(0.1, 360.0, 280.0), base / 2.0, epsilon = 1e-12);
        // Disparity is an absolute difference.
        assert_abs_diff_eq!(depth_of(0.1, 300.0, 340.0), base, epsilon = 1e-12);
    }

    #[test]
    fn identical_columns_are_degenerate() {
        let err = StereoDepthEstimator::new(rig(0.1))
            .estimate_from_centroids(WIDTH, &Centroid::new(321.0, 5.0), &Centroid::new(321.0, 7.0))
            .expect_err("zero disparity");
        assert_eq!(
            err,
            StereoError::DegenerateDisparity {
                disparity: 0.0,
                epsilon: 1e-6
            }
        );
    }

    #[test]
    fn disparity_below_epsilon_is_degenerate() {
        let estimator = StereoDepthEstimator::new(rig(0.1).with_disparity_epsilon(0.5));
        let err = estimator
            .estimate_from_centroids(WIDTH, &Centroid::new(321.0, 0.0), &Centroid::new(320.6, 0.0))
            .expect_err("sub-epsilon disparity");
        assert!(matches!(err, StereoError::DegenerateDisparity { .. }));
    }

    #[test]
    fn overflowing_depth_is_degenerate() {
        let estimator = StereoDepthEstimator::new(rig(1e300).with_disparity_epsilon(0.0));
        let err = estimator
            .estimate_from_centroids(
                WIDTH,
                &Centroid::new(320.0, 0.0),
                &Centroid::new(320.0 + 1e-10, 0.0),
            )
            .expect_err("depth overflows");
        match err {
            StereoError::DegenerateDepth { depth } => assert!(depth.is_infinite()),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn bearing_recovers_synthetic_marker() {
        let baseline = 0.2;
        let (x, z) = (0.3, 2.0);
        let estimator = StereoDepthEstimator::new(rig(baseline));
        let focal = focal_length_px(WIDTH, estimator.rig().fov).expect("focal");

        let left = Centroid::new(project(focal, x, z, baseline / 2.0), 0.0);
        let right = Centroid::new(project(focal, x, z, -baseline / 2.0), 0.0);
        let geom = estimator.solve(WIDTH, &left, &right).expect("solvable");

        assert_abs_diff_eq!(geom.depth, z, epsilon = 1e-9);
        assert_abs_diff_eq!(geom.alpha_rad, ((x - baseline / 2.0) / z).atan(), epsilon = 1e-9);
        assert_abs_diff_eq!(geom.bearing_deg(), (x / z).atan().to_degrees(), epsilon = 1e-9);
    }

    #[test]
    fn marker_on_centerline_has_zero_bearing() {
        let baseline = 0.12;
        let estimator = StereoDepthEstimator::new(rig(baseline));
        let focal = focal_length_px(WIDTH, estimator.rig().fov).expect("focal");

        let left = Centroid::new(project(focal, 0.0, 3.0, baseline / 2.0), 0.0);
        let right = Centroid::new(project(focal, 0.0, 3.0, -baseline / 2.0), 0.0);
        let res = estimator
            .estimate_from_centroids(WIDTH, &left, &right)
            .expect("solvable");
        assert_abs_diff_eq!(res.bearing_deg, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(res.distance, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn mismatched_image_widths_are_rejected() {
        let estimator = StereoDepthEstimator::new(rig(0.1));
        let err = estimator
            .estimate(
                &GrayImage::new(640, 480),
                &GrayImage::new(320, 240),
                &FixedCentroid::at(100.0, 10.0),
            )
            .expect_err("width mismatch");
        assert_eq!(
            err,
            StereoError::Geometry(GeometryError::ImageWidthMismatch {
                left: 640,
                right: 320
            })
        );
    }

    #[test]
    fn missing_detection_is_reported_as_such() {
        let estimator = StereoDepthEstimator::new(rig(0.1));
        let img = GrayImage::new(640, 480);
        let err = estimator
            .estimate(&img, &img, &FixedCentroid::missing())
            .expect_err("no marker");
        assert_eq!(err, StereoError::Locate(LocateError::NoMarker));
    }

    #[test]
    fn locator_sees_each_image() {
        let estimator = StereoDepthEstimator::new(rig(0.1));
        let left = GrayImage::new(640, 480);
        let mut right = GrayImage::new(640, 480);
        right.data[0] = 1;
        let locator = |img: &GrayImage| -> Result<Centroid, LocateError> {
            Ok(if img.data[0] == 1 {
                Centroid::new(300.0, 0.0)
            } else {
                Centroid::new(340.0, 0.0)
            })
        };
        let res = estimator.estimate(&left, &right, &locator).expect("solvable");
        assert_abs_diff_eq!(res.distance, depth_of(0.1, 340.0, 300.0), epsilon = 1e-12);
    }

    #[test]
    fn negative_epsilon_is_rejected() {
        let estimator = StereoDepthEstimator::new(rig(0.1).with_disparity_epsilon(-1.0));
        let err = estimator
            .estimate_from_centroids(WIDTH, &Centroid::new(340.0, 0.0), &Centroid::new(300.0, 0.0))
            .expect_err("invalid epsilon");
        assert_eq!(err, StereoError::InvalidDisparityEpsilon { epsilon: -1.0 });
    }
}
