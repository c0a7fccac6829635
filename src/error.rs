/// Errors returned by the Canny pipeline and its stage constructors.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CannyError {
    #[error("sigma must be finite and positive, got {0}")]
    InvalidSigma(f32),
    #[error("kernel size {0} gives a zero half-width, use a size of at least 2")]
    InvalidKernelSize(usize),
    #[error("{name} threshold ratio must lie in [0, 1], got {value}")]
    InvalidThresholdRatio { name: &'static str, value: f32 },
    #[error("low threshold ratio {low} exceeds high threshold ratio {high}")]
    LowRatioAboveHigh { low: f32, high: f32 },
    #[error("invalid edge markers (weak={weak}, strong={strong}): markers must be non-zero and distinct")]
    InvalidMarkers { weak: i32, strong: i32 },
    #[error("grid dimensions differ: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    #[error("input image is empty")]
    EmptyImage,
}
