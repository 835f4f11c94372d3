//! Synthetic scenes with a known marker position.
//!
//! The robot frame has its origin midway between the two stereo cameras,
//! `x` lateral (positive left) and `z` forward. The lidar and the single
//! camera of the lidar pipeline sit at the origin. Centroids are ideal
//! pinhole projections; the range scan holds the Euclidean range to the
//! marker over the degrees the marker spans and `background_range` elsewhere.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::core::{
    focal_length_px, CameraBaseline, Centroid, EstimateSource, FieldOfView, GeometryError,
};
use crate::io::{EstimateReport, FrameSpec, LidarEstimateConfig, StereoEstimateConfig};
use crate::lidar::{RangeScan, RangeScanError, ScanIndexPolicy};
use crate::EstimateError;

/// Samples in a synthetic scan, one per degree.
pub const SCAN_SAMPLES: usize = 360;

/// A single marker in front of a stereo rig with a co-located lidar.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SyntheticScene {
    /// Marker center as `(x, z)`: lateral (left positive), forward.
    pub marker: Point2<f64>,
    /// Half of the marker's lateral extent, seen by the lidar.
    pub marker_half_width: f64,
    pub image_width: usize,
    pub image_height: usize,
    pub fov: FieldOfView,
    pub baseline: CameraBaseline,
    /// Range reported where the lidar does not hit the marker.
    pub background_range: f64,
}

impl SyntheticScene {
    /// Marker at lateral `x`, forward `z`, seen by 640x480 cameras with a
    /// 60 degree fov and a 0.2 baseline.
    pub fn new(x: f64, z: f64) -> Result<Self, GeometryError> {
        Ok(Self {
            marker: Point2::new(x, z),
            marker_half_width: 0.3,
            image_width: 640,
            image_height: 480,
            fov: FieldOfView::from_degrees(60.0)?,
            baseline: CameraBaseline::new(0.2)?,
            background_range: 10.0,
        })
    }

    pub fn focal_px(&self) -> Result<f64, GeometryError> {
        focal_length_px(self.image_width, self.fov)
    }

    /// Ideal centroid in a camera at lateral offset `camera_x`, or `None` when
    /// the marker is behind the camera or outside the image.
    pub fn project(&self, camera_x: f64) -> Result<Option<Centroid>, GeometryError> {
        let focal = self.focal_px()?;
        let (x, z) = (self.marker.x, self.marker.y);
        if z <= 0.0 {
            return Ok(None);
        }
        let u = self.image_width as f64 / 2.0 - focal * (x - camera_x) / z;
        let centroid = Centroid::new(u, self.image_height as f64 / 2.0);
        Ok(centroid.check_within(self.image_width).ok().map(|_| centroid))
    }

    /// Centroid in the left (reference) camera.
    pub fn left_centroid(&self) -> Result<Option<Centroid>, GeometryError> {
        self.project(self.baseline.get() / 2.0)
    }

    pub fn right_centroid(&self) -> Result<Option<Centroid>, GeometryError> {
        self.project(-self.baseline.get() / 2.0)
    }

    /// Centroid in the camera co-located with the lidar.
    pub fn center_centroid(&self) -> Result<Option<Centroid>, GeometryError> {
        self.project(0.0)
    }

    pub fn true_depth(&self) -> f64 {
        self.marker.y
    }

    pub fn true_range(&self) -> f64 {
        self.marker.coords.norm()
    }

    pub fn true_bearing_deg(&self) -> f64 {
        self.marker.x.atan2(self.marker.y).to_degrees()
    }

    /// Full-revolution scan, sample `i` at `i` degrees (left positive).
    pub fn range_scan(&self) -> Result<RangeScan, RangeScanError> {
        let range = self.true_range();
        let bearing = self.true_bearing_deg();
        let half_span = self.marker_half_width.atan2(range).to_degrees();
        let ranges = (0..SCAN_SAMPLES)
            .map(|deg| {
                let signed = if deg > SCAN_SAMPLES / 2 {
                    deg as f64 - SCAN_SAMPLES as f64
                } else {
                    deg as f64
                };
                if (signed - bearing).abs() <= half_span {
                    range
                } else {
                    self.background_range
                }
            })
            .collect();
        RangeScan::new(ranges)
    }

    fn frame(&self, centroid: Option<Centroid>) -> FrameSpec {
        FrameSpec::with_centroid(self.image_width, self.image_height, centroid)
    }

    /// Stereo config with the ideal left/right centroids filled in.
    pub fn stereo_config(&self) -> Result<StereoEstimateConfig, GeometryError> {
        Ok(StereoEstimateConfig {
            left: self.frame(self.left_centroid()?),
            right: self.frame(self.right_centroid()?),
            fov_deg: self.fov.degrees(),
            baseline: self.baseline.get(),
            disparity_epsilon: None,
            output_path: None,
        })
    }

    /// Lidar config for the center camera. The scan covers a full turn, so
    /// negative bearings wrap to its tail.
    pub fn lidar_config(&self) -> Result<LidarEstimateConfig, EstimateError> {
        Ok(LidarEstimateConfig {
            frame: self.frame(self.center_centroid()?),
            fov_deg: self.fov.degrees(),
            scan: self.range_scan()?,
            index_policy: ScanIndexPolicy::WrapFullCircle,
            output_path: None,
        })
    }

    /// Run both pipelines against this scene.
    pub fn simulate(&self) -> SimulationReport {
        let stereo = EstimateReport::new(EstimateSource::Stereo, None).with_outcome(
            self.stereo_config()
                .map_err(EstimateError::from)
                .and_then(|cfg| cfg.run()),
        );
        let lidar = EstimateReport::new(EstimateSource::Lidar, None)
            .with_outcome(self.lidar_config().and_then(|cfg| cfg.run()));
        SimulationReport {
            scene: *self,
            true_range: self.true_range(),
            true_depth: self.true_depth(),
            true_bearing_deg: self.true_bearing_deg(),
            stereo,
            lidar,
        }
    }
}

/// Ground truth next to what each pipeline recovered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub scene: SyntheticScene,
    pub true_range: f64,
    pub true_depth: f64,
    pub true_bearing_deg: f64,
    pub stereo: EstimateReport,
    pub lidar: EstimateReport,
}
