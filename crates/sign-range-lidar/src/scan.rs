use serde::{Deserialize, Serialize};

/// Number of one-degree bins in a full revolution.
const FULL_CIRCLE_DEG: i64 = 360;

/// Invalid range scan contents.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RangeScanError {
    #[error("range scan has no samples")]
    Empty,
    #[error("range sample {index} is invalid ({value})")]
    InvalidSample { index: usize, value: f64 },
}

/// How a truncated degree index addresses the scan.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanIndexPolicy {
    /// `0 <= index < len`, anything else is out of range.
    #[default]
    Strict,
    /// Full-revolution scans: the index is taken modulo 360 first, so `-2`
    /// addresses sample 358. Must be selected explicitly.
    WrapFullCircle,
}

/// One lidar revolution, one sample per integer degree (`index == degree`).
///
/// Samples are non-negative; `+inf` is accepted as "no return".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct RangeScan {
    ranges: Vec<f64>,
}

impl RangeScan {
    pub fn new(ranges: Vec<f64>) -> Result<Self, RangeScanError> {
        if ranges.is_empty() {
            return Err(RangeScanError::Empty);
        }
        if let Some((index, &value)) = ranges
            .iter()
            .enumerate()
            .find(|(_, r)| r.is_nan() || **r < 0.0)
        {
            return Err(RangeScanError::InvalidSample { index, value });
        }
        Ok(Self { ranges })
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn samples(&self) -> &[f64] {
        &self.ranges
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.ranges.get(index).copied()
    }

    /// Resolve a signed degree index to a position in the scan.
    pub fn resolve_index(&self, index: i64, policy: ScanIndexPolicy) -> Option<usize> {
        let index = match policy {
            ScanIndexPolicy::Strict => index,
            ScanIndexPolicy::WrapFullCircle => index.rem_euclid(FULL_CIRCLE_DEG),
        };
        usize::try_from(index).ok().filter(|&i| i < self.len())
    }

    /// Sample at a signed degree index, or `None` when it falls outside the scan.
    pub fn sample_at_degree(&self, index: i64, policy: ScanIndexPolicy) -> Option<f64> {
        self.resolve_index(index, policy).and_then(|i| self.get(i))
    }
}

impl TryFrom<Vec<f64>> for RangeScan {
    type Error = RangeScanError;

    fn try_from(ranges: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(ranges)
    }
}

impl From<RangeScan> for Vec<f64> {
    fn from(scan: RangeScan) -> Self {
        scan.ranges
    }
}
