//! # Canny Edge Detection Library
//!
//! This crate implements the classic five-stage Canny edge detector on 8-bit
//! grayscale images. Every stage is a public function, so intermediate results
//! can be inspected or fed into custom pipelines, and the whole chain is
//! available through [`canny`].
//!
//! ## Pipeline
//!
//! 1. Gaussian smoothing with a `sigma`/`size` kernel ([`GaussianKernel`], [`smooth`])
//! 2. Sobel gradients, magnitude rescaled to a maximum of 255 ([`sobel_gradients`])
//! 3. Non-maximum suppression along four quantized directions ([`non_maximum_suppression`])
//! 4. Double thresholding from ratios of the maximum ([`double_threshold`])
//! 5. Single-pass edge tracking by hysteresis ([`hysteresis`])
//!
//! Data-parallel stages run on rayon; hysteresis is sequential because a
//! promotion is visible to the pixels scanned after it.
//!
//! ## Basic Usage
//!
//! ```rust
//! use canny_edge::{canny, CannyParams};
//! use image::{GrayImage, Luma};
//!
//! // dark left half, bright right half
//! let image = GrayImage::from_fn(16, 16, |x, _| Luma([if x < 8 { 0 } else { 255 }]));
//! let edges = canny(&image, &CannyParams::default()).unwrap();
//!
//! assert_eq!(edges.dimensions(), (16, 16));
//! assert!(edges.as_raw().iter().all(|&v| v == 0 || v == 255));
//! ```
//!
//! ## Inspecting Stages
//!
//! ```rust
//! use canny_edge::{canny_with_stages, CannyParams};
//! use image::{GrayImage, Luma};
//!
//! let image = GrayImage::from_fn(16, 16, |x, y| Luma([((x * y) % 256) as u8]));
//! let stages = canny_with_stages(&image, &CannyParams::default()).unwrap();
//!
//! println!("kernel sum: {}", stages.kernel.sum());
//! println!("max suppressed: {:?}", stages.suppressed.as_raw().iter().max());
//! ```
//!
//! ## Optional Features
//!
//! ### Logger Feature
//!
//! Enable debug logging to monitor the pipeline:
//!
//! ```toml
//! [dependencies]
//! canny-edge = { version = "0.1.0", features = ["logger"] }
//! log = "0.4"
//! env_logger = "0.11"
//! ```
//!
//! With the feature on, stages emit messages such as
//! `DEBUG canny_edge::nms: nms kept 5 of 49 pixels`.

use image::{GrayImage, Luma};
use imageproc::definitions::{HasBlack, HasWhite, Image};

// Conditional logging macros
#[cfg(feature = "logger")]
macro_rules! debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(feature = "logger"))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

mod border;
mod error;
mod gradient;
mod hysteresis;
mod kernel;
mod nms;
mod params;
mod smooth;
mod threshold;

pub use border::BorderMode;
pub use error::CannyError;
pub use gradient::{
    sobel_gradients, GradientField, MAGNITUDE_SCALE, SOBEL_KERNEL_X, SOBEL_KERNEL_Y,
};
pub use hysteresis::hysteresis;
pub use kernel::GaussianKernel;
pub use nms::non_maximum_suppression;
pub use params::{CannyParams, EdgeMarkers, ThresholdRatios};
pub use smooth::{convolve, smooth, to_float_image};
pub use threshold::{double_threshold, Thresholds};

/// Single-channel `f32` grid: smoothed image, gradient magnitude and angle.
pub type FloatImage = Image<Luma<f32>>;

/// Single-channel `i32` grid: suppressed magnitude, classified pixels and edge maps.
pub type IntImage = Image<Luma<i32>>;

/// Every intermediate product of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct CannyStages {
    pub kernel: GaussianKernel,
    pub smoothed: FloatImage,
    pub gradient: GradientField,
    pub suppressed: IntImage,
    /// Thresholding output before hysteresis.
    pub classified: IntImage,
    /// Final edge map, values in `{0, strong}`.
    pub edges: IntImage,
}

/// Runs the Canny pipeline and returns the edge map.
///
/// Parameters are validated before any pixel is touched. The result has the
/// input's dimensions and holds `params.markers.strong()` on edges and 0
/// elsewhere.
///
/// # Errors
///
/// - [`CannyError::InvalidSigma`] / [`CannyError::InvalidKernelSize`] for bad
///   smoothing parameters
/// - [`CannyError::EmptyImage`] when the image has no pixels
///
/// # Examples
///
/// ```rust
/// use canny_edge::{canny, CannyError, CannyParams};
/// use image::GrayImage;
///
/// let image = GrayImage::new(8, 8);
/// let params = CannyParams { sigma: -1.0, ..CannyParams::default() };
/// assert_eq!(canny(&image, &params), Err(CannyError::InvalidSigma(-1.0)));
/// ```
pub fn canny(image: &GrayImage, params: &CannyParams) -> Result<IntImage, CannyError> {
    canny_with_stages(image, params).map(|stages| stages.edges)
}

/// Runs the Canny pipeline and keeps every intermediate result.
pub fn canny_with_stages(
    image: &GrayImage,
    params: &CannyParams,
) -> Result<CannyStages, CannyError> {
    params.validate()?;
    let kernel = GaussianKernel::new(params.sigma, params.kernel_size)?;
    if image.width() == 0 || image.height() == 0 {
        return Err(CannyError::EmptyImage);
    }

    debug!("start canny on {}x{} image", image.width(), image.height());

    let smoothed = smooth(image, &kernel, params.border);
    debug!("smoothed ok");

    let gradient = sobel_gradients(&smoothed, params.border);
    debug!("gradient ok");

    let suppressed = non_maximum_suppression(&gradient);
    debug!("suppressed ok");

    let classified = double_threshold(&suppressed, params.ratios, params.markers);
    debug!("classified ok");

    let mut edges = classified.clone();
    hysteresis(&mut edges, params.markers);
    debug!("edges ok");

    Ok(CannyStages {
        kernel,
        smoothed,
        gradient,
        suppressed,
        classified,
        edges,
    })
}

/// Coordinates `(x, y)` of every strong pixel, in row-major order.
pub fn edge_points(edges: &IntImage, markers: EdgeMarkers) -> Vec<(u32, u32)> {
    edges
        .enumerate_pixels()
        .filter(|(_, _, p)| p[0] == markers.strong())
        .map(|(x, y, _)| (x, y))
        .collect()
}

/// Converts an edge map to an 8-bit image: strong pixels white, others black.
pub fn edges_to_luma8(edges: &IntImage, markers: EdgeMarkers) -> GrayImage {
    let white = Luma::<u8>::white();
    let black = Luma::<u8>::black();
    GrayImage::from_fn(edges.width(), edges.height(), |x, y| {
        if edges.get_pixel(x, y)[0] == markers.strong() {
            white
        } else {
            black
        }
    })
}
