use serde::{Deserialize, Serialize};

/// Which pipeline produced a [`DistanceResult`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateSource {
    Lidar,
    Stereo,
}

/// Range (lidar) or depth (stereo) to the marker, with its bearing in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    /// Lidar range at the bearing, or stereo depth along the optical axis.
    pub distance: f64,
    /// Signed bearing in degrees, positive to the left.
    pub bearing_deg: f64,
}

impl DistanceResult {
    pub fn new(distance: f64, bearing_deg: f64) -> Self {
        Self {
            distance,
            bearing_deg,
        }
    }

    /// `(distance, bearing_deg)` pair.
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.distance, self.bearing_deg)
    }
}

impl From<DistanceResult> for (f64, f64) {
    fn from(res: DistanceResult) -> Self {
        res.as_tuple()
    }
}
