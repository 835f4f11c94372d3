use serde::{Deserialize, Serialize};
use sign_range_core::{CameraBaseline, FieldOfView};

fn default_disparity_epsilon() -> f64 {
    1e-6
}

/// Stereo rig geometry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StereoRig {
    /// Horizontal field of view shared by both cameras, radians.
    pub fov: FieldOfView,
    /// Distance between the two optical centers.
    pub baseline: CameraBaseline,
    /// Disparities at or below this many pixels are rejected as degenerate.
    #[serde(default = "default_disparity_epsilon")]
    pub disparity_epsilon: f64,
}

impl StereoRig {
    pub fn new(fov: FieldOfView, baseline: CameraBaseline) -> Self {
        Self {
            fov,
            baseline,
            disparity_epsilon: default_disparity_epsilon(),
        }
    }

    pub fn with_disparity_epsilon(mut self, disparity_epsilon: f64) -> Self {
        self.disparity_epsilon = disparity_epsilon;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epsilon_defaults_when_missing_from_json() {
        let rig: StereoRig =
            serde_json::from_str(r#"{ "fov": 1.0, "baseline": 0.2 }"#).expect("valid rig json");
        assert_eq!(rig.disparity_epsilon, 1e-6);
        assert_eq!(rig.baseline.get(), 0.2);
    }

    #[test]
    fn invalid_baseline_in_json_is_rejected() {
        assert!(serde_json::from_str::<StereoRig>(r#"{ "fov": 1.0, "baseline": 0.0 }"#).is_err());
    }
}
