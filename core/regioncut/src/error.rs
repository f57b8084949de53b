use crate::detector::RegionKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegionCutError {
    #[error("no detector registered for category `{0}`")]
    UnsupportedKind(RegionKind),

    #[error("detector returned no regions")]
    NoDetections,

    #[error("every detected region collapsed after clamping")]
    NoUsableRegions,

    #[error("target size must be > 0")]
    InvalidTargetSize,

    #[error("padding ratio must be >= 0, got {0}")]
    InvalidPaddingRatio(f64),

    #[error("blur sigma must be > 0, got {0}")]
    InvalidBlurSigma(f32),

    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("failed to encode image: {0}")]
    Encode(String),

    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
}
