use crate::error::SampleError;
use crate::path::{CurvePoint, Path};

/// Maps a normalized offset onto a pre-sampled path
///
/// Nearest-preceding-sample lookup: `floor(offset * (len - 1))`. No state, no
/// interpolation between neighbours; smoothing is the camera driver's job.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathSampler;

impl PathSampler {
    /// Index of the sample for `offset`; NaN counts as 0, anything outside
    /// `[0, 1]` is clamped
    pub fn resolve_index(path: &Path, offset: f32) -> Result<usize, SampleError> {
        let len = path.len();
        if len < 2 {
            return Err(SampleError::DegeneratePath { len });
        }

        let last = len - 1;
        let offset = if offset.is_nan() { 0.0 } else { offset.clamp(0.0, 1.0) };
        // f64 keeps floor exact for long paths
        let index = (offset as f64 * last as f64).floor() as usize;
        Ok(index.min(last))
    }

    pub fn resolve(path: &Path, offset: f32) -> Result<&CurvePoint, SampleError> {
        let index = Self::resolve_index(path, offset)?;
        Ok(&path[index])
    }
}
