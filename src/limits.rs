use alloc::format;

use crate::error::GraymapError;

/// Size caps applied to a header before the sample buffer is allocated.
///
/// Samples are one byte each, so `max_samples` also bounds the allocation.
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Maximum `width * height`.
    pub max_samples: Option<u64>,
}

impl Limits {
    /// Length of the sample buffer for `width x height`, once it passes the
    /// caps and fits in `usize`.
    pub(crate) fn sample_count(&self, width: u32, height: u32) -> Result<usize, GraymapError> {
        if let Some(max) = self.max_width.filter(|&max| width > max) {
            return Err(GraymapError::LimitExceeded(format!(
                "width {width} exceeds limit {max}"
            )));
        }
        if let Some(max) = self.max_height.filter(|&max| height > max) {
            return Err(GraymapError::LimitExceeded(format!(
                "height {height} exceeds limit {max}"
            )));
        }
        // Cannot overflow: both factors are below 2^32.
        let samples = u64::from(width) * u64::from(height);
        if let Some(max) = self.max_samples.filter(|&max| samples > max) {
            return Err(GraymapError::LimitExceeded(format!(
                "{width}x{height} is {samples} samples, limit is {max}"
            )));
        }
        usize::try_from(samples).map_err(|_| GraymapError::DimensionsTooLarge { width, height })
    }
}
