//! Edge tracking by hysteresis.

use image::Luma;

use crate::params::EdgeMarkers;
use crate::IntImage;

/// The 8-connected neighbourhood as `(dx, dy)` offsets.
const NEIGHBORS: [(i32, i32); 8] = [
    (-1, 1),
    (0, 1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Value at `(x + dx, y + dy)`, `None` outside the grid.
#[inline]
fn neighbor(image: &IntImage, x: u32, y: u32, dx: i32, dy: i32) -> Option<i32> {
    let nx = x.checked_add_signed(dx)?;
    let ny = y.checked_add_signed(dy)?;
    if nx >= image.width() || ny >= image.height() {
        return None;
    }
    Some(image.get_pixel(nx, ny)[0])
}

/// Promotes weak pixels touching a strong pixel and clears the rest, in place.
///
/// The grid is scanned once in row-major order. A weak pixel promoted earlier
/// in the scan counts as strong for every pixel visited after it, so a chain
/// of weak pixels is fully recovered when its strong anchor comes first in scan
/// order and only partially when it comes last. The pass is not repeated.
///
/// Weak pixels on the outer border are cleared: they have no full
/// neighbourhood and are never promoted. Pixels that are neither weak nor
/// strong are left untouched, so a grid without weak pixels is returned
/// unchanged.
///
/// # Arguments
///
/// * `classified` - Output of [`double_threshold`](crate::double_threshold), rewritten in place
/// * `markers` - Weak and strong values used by the thresholding step
///
/// # Returns
///
/// The number of weak pixels promoted to strong.
///
/// # Examples
///
/// ```
/// use canny_edge::{hysteresis, EdgeMarkers, IntImage};
///
/// #[rustfmt::skip]
/// let mut grid = IntImage::from_raw(5, 3, vec![
///     0,   0,  0,  0, 0,
///     255, 25, 25, 25, 0,
///     0,   0,  0,  0, 0,
/// ]).unwrap();
/// hysteresis(&mut grid, EdgeMarkers::default());
/// assert_eq!(&grid.as_raw()[5..10], &[255, 255, 255, 255, 0]);
/// ```
pub fn hysteresis(classified: &mut IntImage, markers: EdgeMarkers) -> usize {
    let (width, height) = classified.dimensions();
    let weak = markers.weak();
    let strong = markers.strong();
    let mut promoted = 0usize;

    for y in 0..height {
        for x in 0..width {
            if classified.get_pixel(x, y)[0] != weak {
                continue;
            }

            let interior = x > 0 && y > 0 && x + 1 < width && y + 1 < height;
            let linked = interior
                && NEIGHBORS
                    .iter()
                    .any(|&(dx, dy)| neighbor(classified, x, y, dx, dy) == Some(strong));

            if linked {
                classified.put_pixel(x, y, Luma([strong]));
                promoted += 1;
            } else {
                classified.put_pixel(x, y, Luma([0]));
            }
        }
    }

    debug!("hysteresis promoted {promoted} weak pixels");
    promoted
}
