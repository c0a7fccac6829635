//! Gaussian noise reduction.

use image::GrayImage;
use rayon::prelude::*;

use crate::border::BorderMode;
use crate::kernel::GaussianKernel;
use crate::FloatImage;

/// Widens an 8-bit image to `f32` samples without rescaling.
pub fn to_float_image(image: &GrayImage) -> FloatImage {
    let (width, height) = image.dimensions();
    let data = image.as_raw().iter().map(|&p| p as f32).collect();
    FloatImage::from_raw(width, height, data).unwrap_or_else(|| FloatImage::new(width, height))
}

/// Convolves `image` with a square row-major kernel of side `2 * radius + 1`.
///
/// This is a true convolution: the output at `(x, y)` is
/// `Σ k[a][b] · I[y + radius - a][x + radius - b]`, with out-of-range samples
/// read through `border`. Rows are computed in parallel.
///
/// # Arguments
///
/// * `image` - Input samples
/// * `weights` - Row-major kernel with `(2 * radius + 1)²` entries
/// * `radius` - Kernel half-width
/// * `border` - Policy for the samples read outside the image
///
/// # Returns
///
/// A grid of the input's dimensions. A kernel of the wrong length yields an
/// all-zero grid.
pub fn convolve(
    image: &FloatImage,
    weights: &[f32],
    radius: usize,
    border: BorderMode,
) -> FloatImage {
    let (width, height) = image.dimensions();
    let mut out = FloatImage::new(width, height);
    let side = 2 * radius + 1;
    if width == 0 || height == 0 || weights.len() != side * side {
        return out;
    }

    let w = width as usize;
    let h = height as usize;
    let src = image.as_raw();
    let fill = border.fill();
    let r = radius as isize;

    // Source column for every (output column, kernel column) pair
    let col_taps: Vec<Option<usize>> = (0..w as isize)
        .flat_map(|x| (0..side as isize).map(move |b| border.map_index(x + r - b, w)))
        .collect();

    out.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
        let row_taps: Vec<Option<usize>> = (0..side as isize)
            .map(|a| border.map_index(y as isize + r - a, h))
            .collect();

        for (x, out_px) in row.iter_mut().enumerate() {
            let cols = &col_taps[x * side..(x + 1) * side];
            let mut acc = 0.0;
            for (a, src_row) in row_taps.iter().enumerate() {
                let k_row = &weights[a * side..(a + 1) * side];
                for (k, src_col) in k_row.iter().zip(cols) {
                    let sample = match (src_row, src_col) {
                        (Some(sy), Some(sx)) => src[sy * w + sx],
                        _ => fill,
                    };
                    acc += k * sample;
                }
            }
            *out_px = acc;
        }
    });

    out
}

/// Smooths an 8-bit image with a Gaussian kernel.
///
/// # Arguments
///
/// * `image` - Input grayscale image
/// * `kernel` - Kernel from [`GaussianKernel::new`]
/// * `border` - Policy for the samples read outside the image
///
/// # Returns
///
/// The smoothed image as `f32` samples, scaled by the kernel sum.
///
/// # Examples
///
/// ```
/// use canny_edge::{smooth, BorderMode, GaussianKernel};
/// use image::{GrayImage, Luma};
///
/// let image = GrayImage::from_pixel(8, 8, Luma([100u8]));
/// let kernel = GaussianKernel::new(1.0, 5).unwrap();
/// let smoothed = smooth(&image, &kernel, BorderMode::Reflect);
///
/// // flat input stays flat, scaled by the kernel sum
/// let expected = 100.0 * kernel.sum();
/// assert!((smoothed.get_pixel(3, 3)[0] - expected).abs() < 1e-3);
/// ```
pub fn smooth(image: &GrayImage, kernel: &GaussianKernel, border: BorderMode) -> FloatImage {
    debug!(
        "smoothing {}x{} with {}x{} kernel",
        image.width(),
        image.height(),
        kernel.side(),
        kernel.side()
    );
    convolve(&to_float_image(image), kernel.weights(), kernel.radius(), border)
}

/// Reads `image` at `(x, y)` through `border`.
#[inline]
pub(crate) fn sample(image: &FloatImage, x: isize, y: isize, border: BorderMode) -> f32 {
    let (width, height) = image.dimensions();
    match (
        border.map_index(x, width as usize),
        border.map_index(y, height as usize),
    ) {
        (Some(sx), Some(sy)) => image.get_pixel(sx as u32, sy as u32)[0],
        _ => border.fill(),
    }
}
