//! Non-maximum suppression along the quantized gradient direction.

use std::f32::consts::PI;

use rayon::prelude::*;

use crate::gradient::GradientField;
use crate::{FloatImage, IntImage};

/// Conversion factor from radians to degrees
const RADIANS_TO_DEGREES: f32 = 180f32 / PI;

/// `(row, col)` offsets of the two neighbours compared against a pixel.
type NeighborPair = [(isize, isize); 2];

/// Picks the neighbour pair for an unsigned line orientation in degrees.
///
/// | Orientation (°)            | Neighbours (row, col) |
/// |----------------------------|-----------------------|
/// | `[0, 22.5) ∪ [157.5, 180]` | `(0, +1)`, `(0, -1)`  |
/// | `[22.5, 67.5)`             | `(+1, -1)`, `(-1, +1)` |
/// | `[67.5, 112.5)`            | `(+1, 0)`, `(-1, 0)`  |
/// | `[112.5, 157.5)`           | `(-1, -1)`, `(+1, +1)` |
#[inline]
fn neighbor_offsets(degrees: f32) -> NeighborPair {
    if !(22.5..157.5).contains(&degrees) {
        [(0, 1), (0, -1)]
    } else if degrees < 67.5 {
        [(1, -1), (-1, 1)]
    } else if degrees < 112.5 {
        [(1, 0), (-1, 0)]
    } else {
        [(-1, -1), (1, 1)]
    }
}

/// Magnitude at `(row, col)`, `None` outside the grid.
#[inline]
fn magnitude_at(magnitude: &FloatImage, row: isize, col: isize) -> Option<f32> {
    let (width, height) = magnitude.dimensions();
    if row < 0 || col < 0 || row >= height as isize || col >= width as isize {
        return None;
    }
    Some(magnitude.get_pixel(col as u32, row as u32)[0])
}

/// Thins gradient ridges to one pixel.
///
/// The angle is folded into `[0, 180]` degrees by adding 180 to negative
/// values. An interior pixel keeps its magnitude (truncated to `i32`) when it
/// is at least as large as both neighbours along that orientation, otherwise
/// it becomes 0. The outermost border is always 0, and a neighbour outside the
/// grid suppresses the pixel.
///
/// Ties keep both pixels. Because magnitudes are `f32`, values that are equal
/// in exact arithmetic may differ in the last bits, in which case only the larger
/// survives; a kept `254.99995` also truncates to 254.
///
/// # Arguments
///
/// * `field` - Gradient field from [`sobel_gradients`](crate::sobel_gradients)
///
/// # Returns
///
/// An `i32` grid of the field's dimensions holding the kept magnitudes and 0
/// everywhere else.
pub fn non_maximum_suppression(field: &GradientField) -> IntImage {
    let magnitude = field.magnitude();
    let angle = field.angle();
    let (width, height) = field.dimensions();
    let mut out = IntImage::new(width, height);
    if width < 3 || height < 3 {
        return out;
    }

    let w = width as usize;
    let h = height as usize;
    out.par_chunks_mut(w)
        .enumerate()
        .filter(|(y, _)| *y > 0 && *y < h - 1)
        .for_each(|(y, row)| {
            for x in 1..w - 1 {
                let mut degrees = angle.get_pixel(x as u32, y as u32)[0] * RADIANS_TO_DEGREES;
                if degrees < 0.0 {
                    degrees += 180.0;
                }

                let value = magnitude.get_pixel(x as u32, y as u32)[0];
                let [q, r] = neighbor_offsets(degrees)
                    .map(|(dr, dc)| magnitude_at(magnitude, y as isize + dr, x as isize + dc));

                row[x] = match (q, r) {
                    (Some(q), Some(r)) if value >= q && value >= r => value as i32,
                    _ => 0,
                };
            }
        });

    debug!(
        "nms kept {} of {} pixels",
        out.as_raw().iter().filter(|&&v| v != 0).count(),
        w * h
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use std::f32::consts::FRAC_PI_2;

    fn field(width: u32, height: u32, mag: &[f32], theta: f32) -> GradientField {
        let magnitude = FloatImage::from_raw(width, height, mag.to_vec()).unwrap();
        let angle = FloatImage::from_pixel(width, height, Luma([theta]));
        GradientField::new(magnitude, angle).unwrap()
    }

    #[test]
    fn orientation_bins_cover_the_half_circle() {
        assert_eq!(neighbor_offsets(0.0), [(0, 1), (0, -1)]);
        assert_eq!(neighbor_offsets(22.4), [(0, 1), (0, -1)]);
        assert_eq!(neighbor_offsets(22.5), [(1, -1), (-1, 1)]);
        assert_eq!(neighbor_offsets(67.5), [(1, 0), (-1, 0)]);
        assert_eq!(neighbor_offsets(112.5), [(-1, -1), (1, 1)]);
        assert_eq!(neighbor_offsets(157.4), [(-1, -1), (1, 1)]);
        assert_eq!(neighbor_offsets(157.5), [(0, 1), (0, -1)]);
        assert_eq!(neighbor_offsets(180.0), [(0, 1), (0, -1)]);
    }

    #[test]
    fn keeps_horizontal_ridge_maximum_and_truncates() {
        #[rustfmt::skip]
        let mag = [
            0.0, 0.0,   0.0,  0.0, 0.0,
            0.0, 10.0, 99.7, 10.0, 0.0,
            0.0, 0.0,   0.0,  0.0, 0.0,
        ];
        let out = non_maximum_suppression(&field(5, 3, &mag, 0.0));
        assert_eq!(out.as_raw(), &vec![0, 0, 0, 0, 0, 0, 0, 99, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn vertical_gradient_compares_rows() {
        #[rustfmt::skip]
        let mag = [
            0.0, 50.0, 0.0,
            0.0, 40.0, 0.0,
            0.0, 30.0, 0.0,
        ];
        // gradient along y: the centre loses to the pixel above it
        let out = non_maximum_suppression(&field(3, 3, &mag, FRAC_PI_2));
        assert_eq!(out.get_pixel(1, 1)[0], 0);

        // gradient along x: the same centre beats its left/right neighbours
        let out = non_maximum_suppression(&field(3, 3, &mag, 0.0));
        assert_eq!(out.get_pixel(1, 1)[0], 40);
    }

    #[test]
    fn negative_angles_fold_onto_the_same_line() {
        #[rustfmt::skip]
        let mag = [
            0.0, 0.0, 90.0,
            0.0, 60.0, 0.0,
            0.0, 0.0, 0.0,
        ];
        // 45° and -135° share the (+1,-1)/(-1,+1) pair, which sees the 90 above-right
        let up = non_maximum_suppression(&field(3, 3, &mag, PI / 4.0));
        let down = non_maximum_suppression(&field(3, 3, &mag, -3.0 * PI / 4.0));
        assert_eq!(up.get_pixel(1, 1)[0], 0);
        assert_eq!(down.get_pixel(1, 1)[0], 0);

        // 135° uses the other diagonal and keeps the pixel
        let other = non_maximum_suppression(&field(3, 3, &mag, 3.0 * PI / 4.0));
        assert_eq!(other.get_pixel(1, 1)[0], 60);
    }

    #[test]
    fn equal_neighbours_do_not_suppress() {
        let mag = [7.0; 9];
        let out = non_maximum_suppression(&field(3, 3, &mag, 0.0));
        assert_eq!(out.get_pixel(1, 1)[0], 7);
    }

    #[test]
    fn last_bit_difference_decides_between_twin_maxima() {
        let just_below = f32::from_bits(255.0f32.to_bits() - 3);
        #[rustfmt::skip]
        let mag = [
            0.0, 0.0,   0.0,        0.0,
            0.0, 255.0, just_below, 0.0,
            0.0, 0.0,   0.0,        0.0,
        ];
        let out = non_maximum_suppression(&field(4, 3, &mag, 0.0));
        assert_eq!(&out.as_raw()[4..8], &[0, 255, 0, 0]);

        // exact twins both survive, and the lower one truncates to 254
        let mut twins = mag;
        twins[5] = just_below;
        let out = non_maximum_suppression(&field(4, 3, &twins, 0.0));
        assert_eq!(&out.as_raw()[4..8], &[0, 254, 254, 0]);
    }

    #[test]
    fn border_is_always_zero() {
        let mag = [200.0; 30];
        let out = non_maximum_suppression(&field(6, 5, &mag, 0.3));
        for (x, y, p) in out.enumerate_pixels() {
            let border = x == 0 || y == 0 || x == 5 || y == 4;
            assert_eq!(p[0] == 0, border, "pixel ({x}, {y})");
        }
    }

    #[test]
    fn tiny_grids_are_all_border() {
        let out = non_maximum_suppression(&field(2, 4, &[255.0; 8], 0.0));
        assert!(out.as_raw().iter().all(|&v| v == 0));
    }

    #[test]
    fn out_of_grid_neighbour_suppresses() {
        let magnitude = FloatImage::from_pixel(3, 3, Luma([10.0]));
        assert_eq!(magnitude_at(&magnitude, -1, 1), None);
        assert_eq!(magnitude_at(&magnitude, 1, 3), None);
        assert_eq!(magnitude_at(&magnitude, 2, 2), Some(10.0));
    }
}
