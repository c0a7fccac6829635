//! Double thresholding into strong, weak and suppressed pixels.

use rayon::prelude::*;

use crate::params::{EdgeMarkers, ThresholdRatios};
use crate::IntImage;

/// Threshold pair derived from a suppressed grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub low: f32,
    pub high: f32,
}

impl Thresholds {
    /// `high = max * ratios.high()` and `low = high * ratios.low()`.
    pub fn from_max(max: i32, ratios: ThresholdRatios) -> Self {
        let high = max as f32 * ratios.high();
        let low = high * ratios.low();
        Self { low, high }
    }

    /// Class of a single value.
    ///
    /// Strong is assigned before weak and the weak band is inclusive at both
    /// ends, so a value exactly at `high` ends up weak.
    #[inline]
    pub fn classify(&self, value: i32, markers: EdgeMarkers) -> i32 {
        let v = value as f32;
        if v >= self.low && v <= self.high {
            markers.weak()
        } else if v >= self.high {
            markers.strong()
        } else {
            0
        }
    }
}

/// Classifies every pixel of a suppressed grid.
///
/// If the grid maximum is 0 both thresholds are 0 and every zero pixel becomes
/// weak; hysteresis then clears them since no strong pixel exists.
///
/// # Arguments
///
/// * `suppressed` - Output of [`non_maximum_suppression`](crate::non_maximum_suppression)
/// * `ratios` - `high` as a fraction of the grid maximum, `low` as a fraction of `high`
/// * `markers` - Values written for weak and strong pixels
///
/// # Returns
///
/// A grid holding `markers.strong()`, `markers.weak()` or 0 for every pixel.
///
/// # Examples
///
/// ```
/// use canny_edge::{double_threshold, EdgeMarkers, IntImage, ThresholdRatios};
///
/// let grid = IntImage::from_raw(4, 1, vec![0, 20, 50, 100]).unwrap();
/// let ratios = ThresholdRatios::new(0.2, 0.5).unwrap();
/// let classified = double_threshold(&grid, ratios, EdgeMarkers::default());
/// assert_eq!(classified.as_raw(), &vec![0, 25, 25, 255]);
/// ```
pub fn double_threshold(
    suppressed: &IntImage,
    ratios: ThresholdRatios,
    markers: EdgeMarkers,
) -> IntImage {
    let (width, height) = suppressed.dimensions();
    let max = suppressed.as_raw().par_iter().copied().max().unwrap_or(0);
    let thresholds = Thresholds::from_max(max, ratios);

    debug!(
        "thresholds low={} high={} (max={max})",
        thresholds.low, thresholds.high
    );

    let data: Vec<i32> = suppressed
        .as_raw()
        .par_iter()
        .map(|&v| thresholds.classify(v, markers))
        .collect();

    IntImage::from_raw(width, height, data).unwrap_or_else(|| IntImage::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(data: &[i32]) -> IntImage {
        IntImage::from_raw(data.len() as u32, 1, data.to_vec()).unwrap()
    }

    fn count(image: &IntImage, pred: impl Fn(i32) -> bool) -> usize {
        image.as_raw().iter().filter(|&&v| pred(v)).count()
    }

    #[test]
    fn default_ratios_give_expected_thresholds() {
        let t = Thresholds::from_max(200, ThresholdRatios::default());
        assert!((t.high - 18.0).abs() < 1e-4);
        assert!((t.low - 0.9).abs() < 1e-5);
    }

    #[test]
    fn value_exactly_at_high_threshold_is_weak() {
        // high = 100 * 0.5 = 50, low = 50 * 0.2 = 10
        let out = double_threshold(
            &grid(&[100, 51, 50, 11, 9, 0]),
            ThresholdRatios::new(0.2, 0.5).unwrap(),
            EdgeMarkers::default(),
        );
        assert_eq!(out.as_raw(), &vec![255, 255, 25, 25, 0, 0]);
    }

    #[test]
    fn custom_markers_are_written() {
        let markers = EdgeMarkers::new(75, 200).unwrap();
        let out = double_threshold(
            &grid(&[100, 30, 1]),
            ThresholdRatios::new(0.2, 0.5).unwrap(),
            markers,
        );
        assert_eq!(out.as_raw(), &vec![200, 75, 0]);
    }

    #[test]
    fn all_zero_grid_is_all_weak() {
        let out = double_threshold(
            &grid(&[0; 6]),
            ThresholdRatios::default(),
            EdgeMarkers::default(),
        );
        assert!(out.as_raw().iter().all(|&v| v == 25));
    }

    #[test]
    fn raising_high_ratio_never_adds_strong_pixels() {
        let data: Vec<i32> = (0..=255).step_by(3).collect();
        let suppressed = grid(&data);
        let markers = EdgeMarkers::default();

        let mut previous = usize::MAX;
        for step in 1..=20 {
            let high = (step as f32 * 0.05).min(1.0);
            let ratios = ThresholdRatios::new(0.05, high).unwrap();
            let strong = count(&double_threshold(&suppressed, ratios, markers), |v| {
                v == markers.strong()
            });
            assert!(strong <= previous, "high ratio {high}");
            previous = strong;
        }
    }

    #[test]
    fn raising_low_ratio_never_adds_edge_candidates() {
        let data: Vec<i32> = (0..=255).collect();
        let suppressed = grid(&data);
        let markers = EdgeMarkers::default();

        let mut previous = usize::MAX;
        for step in 0..=10 {
            let low = (step as f32 * 0.05).min(0.5);
            let ratios = ThresholdRatios::new(low, 0.5).unwrap();
            let candidates = count(&double_threshold(&suppressed, ratios, markers), |v| v != 0);
            assert!(candidates <= previous, "low ratio {low}");
            previous = candidates;
        }
    }
}
