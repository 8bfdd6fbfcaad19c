use thiserror::Error;

/// Ways location acquisition can fail.
///
/// All variants are recoverable: the widget substitutes the configured
/// fallback coordinates and tells the user once.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("location service unavailable")]
    ServiceUnavailable,
    #[error("location request timed out")]
    Timeout,
    #[error("location error: {0}")]
    Other(String),
}
