use log::debug;
use sign_range_core::{AngularMapper, Centroid, CentroidLocator, DistanceResult, ImageSize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{LidarFusionError, LidarFusionParams, RangeScan};

/// Scan index of a bearing in degrees: truncation toward zero.
///
/// `22.5 -> 22`, `-0.5 -> 0`, `-2.7 -> -2`. This is deliberately not `floor`.
#[inline]
pub fn truncate_to_index(bearing_deg: f64) -> i64 {
    bearing_deg.trunc() as i64
}

/// Range to a marker along the camera bearing, read from a lidar scan.
///
/// The estimator is a pure function of its inputs; keeping scan and frame in
/// sync is the caller's job.
#[derive(Clone, Debug)]
pub struct LidarFusionEstimator {
    params: LidarFusionParams,
}

impl LidarFusionEstimator {
    pub fn new(params: LidarFusionParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &LidarFusionParams {
        &self.params
    }

    /// Locate the marker in `image` and read its range from `scan`.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "debug",
            skip(self, image, scan, locator),
            fields(width = image.width(), scan_len = scan.len())
        )
    )]
    pub fn estimate<I, L>(
        &self,
        image: &I,
        scan: &RangeScan,
        locator: &L,
    ) -> Result<DistanceResult, LidarFusionError>
    where
        I: ImageSize + ?Sized,
        L: CentroidLocator<I> + ?Sized,
    {
        let centroid = locator.locate_centroid(image)?;
        self.estimate_from_centroid(image.width(), &centroid, scan)
    }

    /// Same as [`Self::estimate`] for a centroid that was located elsewhere.
    pub fn estimate_from_centroid(
        &self,
        image_width: usize,
        centroid: &Centroid,
        scan: &RangeScan,
    ) -> Result<DistanceResult, LidarFusionError> {
        let mapper = AngularMapper::new(image_width, self.params.fov)?;
        let bearing_deg = mapper.bearing_of(centroid)?.degrees();
        let index = truncate_to_index(bearing_deg);

        let distance = scan
            .sample_at_degree(index, self.params.index_policy)
            .ok_or(LidarFusionError::BearingOutOfScanRange {
                bearing_deg,
                index,
                len: scan.len(),
            })?;

        debug!(
            "lidar fusion: x={:.2} bearing={:.3}deg index={} range={:.3}",
            centroid.x(),
            bearing_deg,
            index,
            distance
        );

        Ok(DistanceResult::new(distance, bearing_deg))
    }
}
