//! Boundary extension policies for convolution.

/// How samples outside the image are read during convolution.
///
/// With `abcd` as the image row:
///
/// ```text
/// Reflect      dcba|abcd|dcba
/// Mirror        dcb|abcd|cba
/// Nearest      aaaa|abcd|dddd
/// Constant(k)  kkkk|abcd|kkkk
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BorderMode {
    /// Half-sample symmetric extension, the edge sample is repeated.
    #[default]
    Reflect,
    /// Whole-sample symmetric extension, the edge sample is not repeated.
    Mirror,
    /// Clamp to the nearest edge sample.
    Nearest,
    /// Read a fixed value outside the image.
    Constant(f32),
}

impl BorderMode {
    /// Maps a possibly out-of-range index onto `0..len`.
    ///
    /// Returns `None` when the sample should come from [`BorderMode::fill`]
    /// instead, which happens for `Constant` outside the image and for `len == 0`.
    pub fn map_index(self, i: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if (0..len as isize).contains(&i) {
            return Some(i as usize);
        }
        match self {
            Self::Constant(_) => None,
            Self::Nearest => Some(if i < 0 { 0 } else { len - 1 }),
            Self::Reflect => {
                let period = (2 * len) as isize;
                let r = i.rem_euclid(period) as usize;
                Some(if r < len { r } else { 2 * len - 1 - r })
            }
            Self::Mirror => {
                if len == 1 {
                    return Some(0);
                }
                let period = (2 * len - 2) as isize;
                let r = i.rem_euclid(period) as usize;
                Some(if r < len { r } else { 2 * len - 2 - r })
            }
        }
    }

    /// Value read for samples that [`BorderMode::map_index`] leaves unmapped.
    #[inline]
    pub fn fill(self) -> f32 {
        match self {
            Self::Constant(value) => value,
            _ => 0.0,
        }
    }
}
