//! Sobel gradient magnitude and direction.

use rayon::prelude::*;

use crate::border::BorderMode;
use crate::error::CannyError;
use crate::smooth::sample;
use crate::FloatImage;

/// Horizontal Sobel kernel, applied as a convolution.
///
/// ```text
/// [-1  0  1]
/// [-2  0  2]
/// [-1  0  1]
/// ```
pub const SOBEL_KERNEL_X: [f32; 9] = [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0];

/// Vertical Sobel kernel, applied as a convolution.
///
/// ```text
/// [ 1  2  1]
/// [ 0  0  0]
/// [-1 -2 -1]
/// ```
pub const SOBEL_KERNEL_Y: [f32; 9] = [1.0, 2.0, 1.0, 0.0, 0.0, 0.0, -1.0, -2.0, -1.0];

/// Magnitude assigned to the strongest gradient in the field.
pub const MAGNITUDE_SCALE: f32 = 255.0;

/// Co-indexed gradient magnitude and direction grids.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientField {
    magnitude: FloatImage,
    angle: FloatImage,
}

impl GradientField {
    /// Pairs a magnitude grid with an angle grid (radians).
    pub fn new(magnitude: FloatImage, angle: FloatImage) -> Result<Self, CannyError> {
        if magnitude.dimensions() != angle.dimensions() {
            return Err(CannyError::DimensionMismatch {
                expected: magnitude.dimensions(),
                actual: angle.dimensions(),
            });
        }
        Ok(Self { magnitude, angle })
    }

    /// Magnitude rescaled so that the field maximum is 255.
    pub fn magnitude(&self) -> &FloatImage {
        &self.magnitude
    }

    /// `atan2(Iy, Ix)` in radians.
    pub fn angle(&self) -> &FloatImage {
        &self.angle
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.magnitude.dimensions()
    }
}

/// Sobel response at `(x, y)`.
///
/// Evaluates the convolution with [`SOBEL_KERNEL_X`] / [`SOBEL_KERNEL_Y`] as
/// weighted differences of mirrored taps, `Ix = Σ w·(left - right)` and
/// `Iy = Σ w·(below - above)`, so a flat neighbourhood gives exactly zero.
#[inline]
fn sobel_at(image: &FloatImage, x: isize, y: isize, border: BorderMode) -> (f32, f32) {
    let s = |dx: isize, dy: isize| sample(image, x + dx, y + dy, border);

    // after the flip, kernel row and column 1 - d read image row and column d
    (-1..=1isize).fold((0.0, 0.0), |(ix, iy), d| {
        let wx = SOBEL_KERNEL_X[((1 - d) * 3 + 2) as usize];
        let wy = SOBEL_KERNEL_Y[(1 - d) as usize];
        (
            ix + wx * (s(-1, d) - s(1, d)),
            iy + wy * (s(d, 1) - s(d, -1)),
        )
    })
}

/// Computes the gradient field of a smoothed image.
///
/// The magnitude `hypot(Ix, Iy)` is rescaled as `m / max * 255`. When the
/// maximum is zero (a flat image) the magnitude grid is all zeros rather than
/// NaN. Rows are processed in parallel.
///
/// Everything is computed in `f32`. Two magnitudes that are equal in exact
/// arithmetic, such as the columns on either side of a hard step, can come out
/// a few ulps apart (`255.0` next to `254.99995`), and that difference decides
/// which of them survives [`non_maximum_suppression`](crate::non_maximum_suppression).
///
/// # Arguments
///
/// * `smoothed` - Output of [`smooth`](crate::smooth)
/// * `border` - Policy for the samples read outside the image
///
/// # Returns
///
/// A [`GradientField`] with the same dimensions as `smoothed`: rescaled
/// magnitude in `[0, 255]` and `atan2(Iy, Ix)` in `[-π, π]`.
///
/// # Examples
///
/// ```
/// use canny_edge::{sobel_gradients, BorderMode, FloatImage};
///
/// let ramp = FloatImage::from_fn(6, 6, |x, _| image::Luma([x as f32 * 10.0]));
/// let field = sobel_gradients(&ramp, BorderMode::Reflect);
/// let max = field.magnitude().iter().cloned().fold(0.0f32, f32::max);
/// assert_eq!(max, 255.0);
/// ```
pub fn sobel_gradients(smoothed: &FloatImage, border: BorderMode) -> GradientField {
    let (width, height) = smoothed.dimensions();
    let mut magnitude = FloatImage::new(width, height);
    let mut angle = FloatImage::new(width, height);
    if width == 0 || height == 0 {
        return GradientField { magnitude, angle };
    }

    let w = width as usize;
    magnitude
        .par_chunks_mut(w)
        .zip(angle.par_chunks_mut(w))
        .enumerate()
        .for_each(|(y, (mag_row, angle_row))| {
            for (x, (mag, theta)) in mag_row.iter_mut().zip(angle_row.iter_mut()).enumerate() {
                let (ix, iy) = sobel_at(smoothed, x as isize, y as isize, border);
                *mag = ix.hypot(iy);
                *theta = iy.atan2(ix);
            }
        });

    let max = magnitude
        .as_raw()
        .par_iter()
        .copied()
        .reduce(|| 0.0, f32::max);
    debug!("gradient max magnitude: {max}");

    let degenerate = !(max > 0.0 && max.is_finite());
    magnitude.par_chunks_mut(w).for_each(|row| {
        for m in row.iter_mut() {
            *m = if degenerate { 0.0 } else { *m / max * MAGNITUDE_SCALE };
        }
    });

    GradientField { magnitude, angle }
}
