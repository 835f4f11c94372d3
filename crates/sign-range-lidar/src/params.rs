use serde::{Deserialize, Serialize};
use sign_range_core::FieldOfView;

use crate::ScanIndexPolicy;

/// Configuration for [`crate::LidarFusionEstimator`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LidarFusionParams {
    /// Horizontal field of view of the camera, radians.
    pub fov: FieldOfView,
    /// How the truncated degree index addresses the scan.
    #[serde(default)]
    pub index_policy: ScanIndexPolicy,
}

impl LidarFusionParams {
    pub fn new(fov: FieldOfView) -> Self {
        Self {
            fov,
            index_policy: ScanIndexPolicy::default(),
        }
    }

    pub fn with_index_policy(mut self, index_policy: ScanIndexPolicy) -> Self {
        self.index_policy = index_policy;
        self
    }
}
