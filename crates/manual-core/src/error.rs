use crate::scene::SceneKind;
use thiserror::Error;

/// Failures surfaced by the camera core.
///
/// Out-of-domain numeric input (shutter, aperture, ISO, dial positions) is not
/// an error anywhere in the crate: it is clamped.
#[derive(Debug, Error)]
pub enum CameraError {
    #[error("invalid dial range: need 0 < min < max, got min={min} max={max}")]
    InvalidRange { min: f64, max: f64 },
    #[error("invalid frame grid: {0}")]
    InvalidGrid(String),
    #[error("missing resource: {0}")]
    MissingResource(String),
    #[error("scene '{0}' is unavailable")]
    SceneUnavailable(SceneKind),
    #[error("paint failed: {0}")]
    Paint(String),
    #[error("shutter sound failed: {0}")]
    Audio(String),
}

pub type Result<T, E = CameraError> = std::result::Result<T, E>;
