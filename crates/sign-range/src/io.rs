//! JSON configuration and report helpers.
//!
//! Configs carry centroids that were located upstream, so running one needs
//! no image processing. Angles in config files are in degrees.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::core::{
    CameraBaseline, Centroid, DistanceResult, EstimateSource, FieldOfView, GeometryError,
    ImageDims, ImageSize, LocateError,
};
use crate::lidar::{LidarFusionEstimator, LidarFusionParams, RangeScan, ScanIndexPolicy};
use crate::stereo::{StereoDepthEstimator, StereoRig};
use crate::EstimateError;

#[derive(thiserror::Error, Debug)]
pub enum SignRangeIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn load_json<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T, SignRangeIoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn write_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<(), SignRangeIoError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// One camera frame as described in a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSpec {
    /// Image width in pixels. Takes precedence over `image_path`.
    #[serde(default)]
    pub image_width: Option<usize>,
    #[serde(default)]
    pub image_height: Option<usize>,
    /// Image file whose header supplies the dimensions (feature `image`).
    #[serde(default)]
    pub image_path: Option<String>,
    /// Marker centroid `[x, y]` in pixels; absent when nothing was detected.
    #[serde(default)]
    pub centroid: Option<[f64; 2]>,
}

impl FrameSpec {
    pub fn with_centroid(width: usize, height: usize, centroid: Option<Centroid>) -> Self {
        Self {
            image_width: Some(width),
            image_height: Some(height),
            image_path: None,
            centroid: centroid.map(|c| [c.x(), c.y()]),
        }
    }

    /// Resolve the frame dimensions.
    pub fn dims(&self) -> Result<ImageDims, EstimateError> {
        if let Some(width) = self.image_width {
            return Ok(ImageDims::new(width, self.image_height.unwrap_or(0)));
        }
        match self.image_path.as_deref() {
            #[cfg(feature = "image")]
            Some(path) => crate::images::image_dims_from_path(path),
            #[cfg(not(feature = "image"))]
            Some(path) => Err(EstimateError::ImageRead {
                path: path.to_string(),
                reason: "built without the `image` feature".to_string(),
            }),
            None => Err(EstimateError::MissingImageWidth),
        }
    }

    /// Resolve into a frame the estimators can consume.
    pub fn resolve(&self) -> Result<ResolvedFrame, EstimateError> {
        Ok(ResolvedFrame {
            dims: self.dims()?,
            centroid: self.centroid.map(|[x, y]| Centroid::new(x, y)),
        })
    }
}

/// Frame dimensions plus the centroid located upstream, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedFrame {
    pub dims: ImageDims,
    pub centroid: Option<Centroid>,
}

impl ImageSize for ResolvedFrame {
    fn width(&self) -> usize {
        self.dims.width
    }

    fn height(&self) -> usize {
        self.dims.height
    }
}

/// Locator for [`ResolvedFrame`]: hands back the stored centroid.
pub fn stored_centroid(frame: &ResolvedFrame) -> Result<Centroid, LocateError> {
    frame.centroid.ok_or(LocateError::NoMarker)
}

/// Configuration for a lidar fusion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LidarEstimateConfig {
    pub frame: FrameSpec,
    /// Horizontal field of view, degrees.
    pub fov_deg: f64,
    /// One sample per integer degree.
    pub scan: RangeScan,
    #[serde(default)]
    pub index_policy: ScanIndexPolicy,
    #[serde(default)]
    pub output_path: Option<String>,
}

impl LidarEstimateConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SignRangeIoError> {
        load_json(path)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SignRangeIoError> {
        write_json(self, path)
    }

    pub fn build_params(&self) -> Result<LidarFusionParams, GeometryError> {
        let fov = FieldOfView::from_degrees(self.fov_deg)?;
        Ok(LidarFusionParams::new(fov).with_index_policy(self.index_policy))
    }

    pub fn run(&self) -> Result<DistanceResult, EstimateError> {
        let estimator = LidarFusionEstimator::new(self.build_params()?);
        let frame = self.frame.resolve()?;
        Ok(estimator.estimate(&frame, &self.scan, &stored_centroid)?)
    }
}

/// Configuration for a stereo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StereoEstimateConfig {
    /// Reference camera.
    pub left: FrameSpec,
    pub right: FrameSpec,
    /// Horizontal field of view shared by both cameras, degrees.
    pub fov_deg: f64,
    /// Camera separation; the depth comes out in the same unit.
    pub baseline: f64,
    #[serde(default)]
    pub disparity_epsilon: Option<f64>,
    #[serde(default)]
    pub output_path: Option<String>,
}

impl StereoEstimateConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SignRangeIoError> {
        load_json(path)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SignRangeIoError> {
        write_json(self, path)
    }

    pub fn build_rig(&self) -> Result<StereoRig, GeometryError> {
        let mut rig = StereoRig::new(
            FieldOfView::from_degrees(self.fov_deg)?,
            CameraBaseline::new(self.baseline)?,
        );
        if let Some(eps) = self.disparity_epsilon {
            rig = rig.with_disparity_epsilon(eps);
        }
        Ok(rig)
    }

    pub fn run(&self) -> Result<DistanceResult, EstimateError> {
        let estimator = StereoDepthEstimator::new(self.build_rig()?);
        let left = self.left.resolve()?;
        let right = self.right.resolve()?;
        Ok(estimator.estimate(&left, &right, &stored_centroid)?)
    }
}

/// Outcome of one estimate, as written by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateReport {
    pub source: EstimateSource,
    #[serde(default)]
    pub config_path: Option<String>,
    #[serde(default)]
    pub result: Option<DistanceResult>,
    #[serde(default)]
    pub error: Option<String>,
}

impl EstimateReport {
    pub fn new(source: EstimateSource, config_path: Option<&Path>) -> Self {
        Self {
            source,
            config_path: config_path.map(|p| p.to_string_lossy().into_owned()),
            result: None,
            error: None,
        }
    }

    /// Record the outcome of a run, success or failure.
    pub fn with_outcome(mut self, outcome: Result<DistanceResult, EstimateError>) -> Self {
        match outcome {
            Ok(res) => {
                self.result = Some(res);
                self.error = None;
            }
            Err(err) => {
                self.result = None;
                self.error = Some(err.to_string());
            }
        }
        self
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_some()
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SignRangeIoError> {
        load_json(path)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SignRangeIoError> {
        write_json(self, path)
    }
}

/// Resolve where a report goes: explicit path first, then the config's.
pub fn report_path(explicit: Option<&Path>, from_config: Option<&str>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| from_config.map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LidarFusionError, StereoError};
    use approx::assert_abs_diff_eq;

    fn lidar_config() -> LidarEstimateConfig {
        LidarEstimateConfig {
            frame: FrameSpec::with_centroid(180, 120, Some(Centroid::new(45.0, 60.0))),
            fov_deg: 90.0,
            scan: RangeScan::new((0..360).map(|d| 1.0 + d as f64).collect()).expect("scan"),
            index_policy: ScanIndexPolicy::Strict,
            output_path: None,
        }
    }

    #[test]
    fn lidar_config_runs_from_json() {
        let json = r#"{
            "frame": { "image_width": 180, "centroid": [45.0, 60.0] },
            "fov_deg": 90.0,
            "scan": [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0,
                     12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 18.0, 19.0, 20.0, 21.0, 22.0, 23.0]
        }"#;
        let cfg: LidarEstimateConfig = serde_json::from_str(json).expect("valid config");
        assert_eq!(cfg.index_policy, ScanIndexPolicy::Strict);
        let res = cfg.run().expect("estimate");
        assert_eq!(res.distance, 22.0);
        assert_abs_diff_eq!(res.bearing_deg, 22.5, epsilon = 1e-9);
    }

    #[test]
    fn missing_centroid_maps_to_no_marker() {
        let mut cfg = lidar_config();
        cfg.frame.centroid = None;
        assert_eq!(
            cfg.run(),
            Err(EstimateError::Lidar(LidarFusionError::Locate(
                LocateError::NoMarker
            )))
        );
    }

    #[test]
    fn frame_without_width_or_path_is_rejected() {
        let mut cfg = lidar_config();
        cfg.frame.image_width = None;
        assert_eq!(cfg.run(), Err(EstimateError::MissingImageWidth));
    }

    #[cfg(feature = "image")]
    #[test]
    fn frame_width_comes_from_image_header() {
        let dir = tempfile::tempdir().expect("tempdir");
        let png = dir.path().join("frame.png");
        ::image::GrayImage::new(180, 120)
            .save(&png)
            .expect("write png");

        let mut cfg = lidar_config();
        cfg.frame = FrameSpec {
            image_path: Some(png.to_string_lossy().into_owned()),
            centroid: Some([45.0, 60.0]),
            ..FrameSpec::default()
        };
        assert_eq!(cfg.frame.dims(), Ok(ImageDims::new(180, 120)));
        let res = cfg.run().expect("estimate");
        assert_eq!(res.distance, 23.0);
        assert_abs_diff_eq!(res.bearing_deg, 22.5, epsilon = 1e-9);

        cfg.frame.image_path = Some(dir.path().join("missing.png").to_string_lossy().into_owned());
        assert!(matches!(cfg.run(), Err(EstimateError::ImageRead { .. })));
    }

    #[cfg(not(feature = "image"))]
    #[test]
    fn image_path_needs_the_image_feature() {
        let frame = FrameSpec {
            image_path: Some("frame.png".to_string()),
            ..FrameSpec::default()
        };
        assert!(matches!(frame.dims(), Err(EstimateError::ImageRead { .. })));
    }

    #[test]
    fn stereo_config_checks_width_and_disparity() {
        let mut cfg = StereoEstimateConfig {
            left: FrameSpec::with_centroid(640, 480, Some(Centroid::new(340.0, 200.0))),
            right: FrameSpec::with_centroid(640, 480, Some(Centroid::new(300.0, 200.0))),
            fov_deg: 60.0,
            baseline: 0.1,
            disparity_epsilon: None,
            output_path: None,
        };
        let res = cfg.run().expect("estimate");
        assert_abs_diff_eq!(res.distance, 554.256 * 0.1 / 40.0, epsilon = 1e-5);

        cfg.right.image_width = Some(320);
        assert!(matches!(
            cfg.run(),
            Err(EstimateError::Stereo(StereoError::Geometry(
                GeometryError::ImageWidthMismatch { .. }
            )))
        ));

        cfg.right.image_width = Some(640);
        cfg.right.centroid = Some([340.0, 200.0]);
        assert!(matches!(
            cfg.run(),
            Err(EstimateError::Stereo(StereoError::DegenerateDisparity { .. }))
        ));
    }

    #[test]
    fn config_and_report_round_trip_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("lidar.json");
        let cfg = lidar_config();
        cfg.write_json(&cfg_path).expect("write config");
        assert_eq!(LidarEstimateConfig::load_json(&cfg_path).expect("load"), cfg);

        let report = EstimateReport::new(EstimateSource::Lidar, Some(&cfg_path))
            .with_outcome(cfg.run());
        assert!(report.is_ok());
        let report_path = dir.path().join("out/report.json");
        report.write_json(&report_path).expect("write report");
        assert_eq!(EstimateReport::load_json(&report_path).expect("load"), report);
    }

    #[test]
    fn report_records_errors_as_text() {
        let report = EstimateReport::new(EstimateSource::Stereo, None)
            .with_outcome(Err(EstimateError::MissingImageWidth));
        assert!(!report.is_ok());
        assert!(report
            .error
            .as_deref()
            .is_some_and(|e| e.contains("image width unknown")));
    }

    #[test]
    fn explicit_report_path_wins() {
        assert_eq!(
            report_path(Some(Path::new("a.json")), Some("b.json")),
            Some(PathBuf::from("a.json"))
        );
        assert_eq!(report_path(None, Some("b.json")), Some(PathBuf::from("b.json")));
        assert_eq!(report_path(None, None), None);
    }
}
