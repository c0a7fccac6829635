use crate::border::BorderMode;
use crate::error::CannyError;

/// Ratios used to derive the two hysteresis thresholds from the suppressed grid.
///
/// `high = max(grid) * high_ratio` and `low = high * low_ratio`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdRatios {
    low: f32,
    high: f32,
}

impl ThresholdRatios {
    /// Both ratios must lie in `[0, 1]` and `low` may not exceed `high`.
    pub fn new(low: f32, high: f32) -> Result<Self, CannyError> {
        if !(0.0..=1.0).contains(&low) {
            return Err(CannyError::InvalidThresholdRatio {
                name: "low",
                value: low,
            });
        }
        if !(0.0..=1.0).contains(&high) {
            return Err(CannyError::InvalidThresholdRatio {
                name: "high",
                value: high,
            });
        }
        if low > high {
            return Err(CannyError::LowRatioAboveHigh { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f32 {
        self.low
    }

    pub fn high(&self) -> f32 {
        self.high
    }
}

impl Default for ThresholdRatios {
    fn default() -> Self {
        Self {
            low: 0.05,
            high: 0.09,
        }
    }
}

/// Pixel values written by thresholding and recognized by hysteresis.
///
/// Both stages share one instance, so the weak marker that thresholding writes
/// is always the one hysteresis looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeMarkers {
    weak: i32,
    strong: i32,
}

impl EdgeMarkers {
    /// Markers must be non-zero (zero means "suppressed") and distinct.
    pub fn new(weak: i32, strong: i32) -> Result<Self, CannyError> {
        if weak == 0 || strong == 0 || weak == strong {
            return Err(CannyError::InvalidMarkers { weak, strong });
        }
        Ok(Self { weak, strong })
    }

    pub fn weak(&self) -> i32 {
        self.weak
    }

    pub fn strong(&self) -> i32 {
        self.strong
    }
}

impl Default for EdgeMarkers {
    fn default() -> Self {
        Self {
            weak: 25,
            strong: 255,
        }
    }
}

/// Full parameter set for one pipeline run.
///
/// # Examples
///
/// ```
/// use canny_edge::{CannyParams, ThresholdRatios};
///
/// let params = CannyParams {
///     sigma: 1.4,
///     ratios: ThresholdRatios::new(0.1, 0.2).unwrap(),
///     ..CannyParams::default()
/// };
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannyParams {
    /// Standard deviation of the Gaussian smoothing kernel.
    pub sigma: f32,
    /// Kernel size; the kernel side is `2 * (kernel_size / 2) + 1`.
    pub kernel_size: usize,
    pub ratios: ThresholdRatios,
    pub markers: EdgeMarkers,
    /// Boundary policy for smoothing and gradient convolution.
    pub border: BorderMode,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            kernel_size: 5,
            ratios: ThresholdRatios::default(),
            markers: EdgeMarkers::default(),
            border: BorderMode::default(),
        }
    }
}

impl CannyParams {
    /// Checks the parameters that are not validated on construction.
    ///
    /// `ratios` and `markers` can only be built through their validating
    /// constructors, so only `sigma` and `kernel_size` are checked here.
    pub fn validate(&self) -> Result<(), CannyError> {
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(CannyError::InvalidSigma(self.sigma));
        }
        if self.kernel_size / 2 == 0 {
            return Err(CannyError::InvalidKernelSize(self.kernel_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = CannyParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.ratios.low(), 0.05);
        assert_eq!(params.ratios.high(), 0.09);
        assert_eq!(params.markers.weak(), 25);
        assert_eq!(params.markers.strong(), 255);
        assert_eq!(params.border, BorderMode::Reflect);
    }

    #[test]
    fn ratios_outside_unit_interval_are_rejected() {
        assert_eq!(
            ThresholdRatios::new(-0.1, 0.5),
            Err(CannyError::InvalidThresholdRatio {
                name: "low",
                value: -0.1
            })
        );
        assert_eq!(
            ThresholdRatios::new(0.1, 1.5),
            Err(CannyError::InvalidThresholdRatio {
                name: "high",
                value: 1.5
            })
        );
        assert!(ThresholdRatios::new(f32::NAN, 0.5).is_err());
        assert!(ThresholdRatios::new(0.0, 1.0).is_ok());
    }

    #[test]
    fn low_ratio_above_high_is_rejected() {
        assert_eq!(
            ThresholdRatios::new(0.5, 0.2),
            Err(CannyError::LowRatioAboveHigh {
                low: 0.5,
                high: 0.2
            })
        );
    }

    #[test]
    fn markers_must_be_distinct_and_non_zero() {
        assert!(EdgeMarkers::new(255, 255).is_err());
        assert!(EdgeMarkers::new(0, 255).is_err());
        assert!(EdgeMarkers::new(75, 0).is_err());
        let markers = EdgeMarkers::new(75, 255).unwrap();
        assert_eq!((markers.weak(), markers.strong()), (75, 255));
    }

    #[test]
    fn sigma_and_kernel_size_are_validated() {
        let bad_sigma = [0.0, -1.0, f32::NAN, f32::INFINITY];
        for sigma in bad_sigma {
            let params = CannyParams {
                sigma,
                ..CannyParams::default()
            };
            assert!(matches!(
                params.validate(),
                Err(CannyError::InvalidSigma(_))
            ));
        }
        for kernel_size in [0, 1] {
            let params = CannyParams {
                kernel_size,
                ..CannyParams::default()
            };
            assert_eq!(
                params.validate(),
                Err(CannyError::InvalidKernelSize(kernel_size))
            );
        }
        let even = CannyParams {
            kernel_size: 4,
            ..CannyParams::default()
        };
        assert!(even.validate().is_ok());
    }
}
