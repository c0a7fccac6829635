//! Gaussian smoothing kernel.

use std::f32::consts::PI;

use crate::error::CannyError;

/// Square Gaussian kernel with side `2 * radius + 1`, stored row-major.
///
/// Weights are `exp(-(x² + y²) / 2σ²) / (2πσ²)` for `x, y ∈ [-radius, radius]`.
/// The kernel is **not** rescaled to unit sum: a truncated kernel sums to
/// slightly less than one, so smoothing darkens the image by that factor.
///
/// # Examples
///
/// ```
/// use canny_edge::GaussianKernel;
///
/// let kernel = GaussianKernel::new(1.0, 5).unwrap();
/// assert_eq!(kernel.side(), 5);
/// assert!(kernel.sum() < 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel {
    sigma: f32,
    radius: usize,
    weights: Vec<f32>,
}

impl GaussianKernel {
    /// Builds the kernel for `sigma` with half-width `size / 2`.
    ///
    /// Even sizes round up to the next odd side (`size = 4` gives a 5×5 kernel).
    pub fn new(sigma: f32, size: usize) -> Result<Self, CannyError> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(CannyError::InvalidSigma(sigma));
        }
        let radius = size / 2;
        if radius == 0 {
            return Err(CannyError::InvalidKernelSize(size));
        }

        let two_sigma_sq = 2.0 * sigma * sigma;
        let normal = 1.0 / (PI * two_sigma_sq);
        let r = radius as isize;
        let weights = (-r..=r)
            .flat_map(|x| (-r..=r).map(move |y| (x, y)))
            .map(|(x, y)| {
                let d2 = (x * x + y * y) as f32;
                (-d2 / two_sigma_sq).exp() * normal
            })
            .collect();

        debug!("gaussian kernel sigma={sigma} side={}", 2 * radius + 1);

        Ok(Self {
            sigma,
            radius,
            weights,
        })
    }

    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    /// Half-width of the kernel.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Side length, always odd.
    pub fn side(&self) -> usize {
        2 * self.radius + 1
    }

    /// Row-major weights, `side() * side()` entries.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Weight at offset `(dx, dy)` from the center, `None` outside the kernel.
    pub fn at(&self, dx: isize, dy: isize) -> Option<f32> {
        let r = self.radius as isize;
        if dx.abs() > r || dy.abs() > r {
            return None;
        }
        let row = (dy + r) as usize;
        let col = (dx + r) as usize;
        Some(self.weights[row * self.side() + col])
    }

    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }
}
