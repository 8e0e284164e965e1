//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::Dimensions;

/// Edge sizes of the standard favicon set: browser tabs (16, 32, 48),
/// Apple touch icon (180), and the PWA manifest icons (192, 512).
pub const FAVICON_SIZES: &[u32] = &[16, 32, 48, 180, 192, 512];

/// Fit an image inside optional max-width / max-height bounds.
///
/// The aspect ratio is taken once from the original dimensions. The width
/// bound is applied first; the height bound is then checked against the
/// result of that pass, so whichever bound is more restrictive wins. Images
/// already inside the bounds are returned unchanged (never upscaled).
///
/// Bounds are not validated: a zero or negative bound goes through the same
/// arithmetic and yields 0 after the saturating cast.
///
/// # Examples
/// ```
/// # use toolshub::imaging::{calculate_resize_dimensions, Dimensions};
/// // Portrait 1080x1920 into an 800x600 box: height binds
/// assert_eq!(
///     calculate_resize_dimensions(1080, 1920, Some(800), Some(600)),
///     Dimensions { width: 338, height: 600 }
/// );
/// ```
pub fn calculate_resize_dimensions(
    original_width: u32,
    original_height: u32,
    max_width: Option<i64>,
    max_height: Option<i64>,
) -> Dimensions {
    if max_width.is_none() && max_height.is_none() {
        return Dimensions {
            width: original_width,
            height: original_height,
        };
    }

    let aspect = original_width as f64 / original_height as f64;
    let mut width = original_width as f64;
    let mut height = original_height as f64;

    if let Some(max_w) = max_width {
        let max_w = max_w as f64;
        if width > max_w {
            width = max_w;
            height = width / aspect;
        }
    }

    if let Some(max_h) = max_height {
        let max_h = max_h as f64;
        if height > max_h {
            height = max_h;
            width = height * aspect;
        }
    }

    // `as u32` saturates: negatives and NaN become 0
    Dimensions {
        width: width.round() as u32,
        height: height.round() as u32,
    }
}

/// Calculate dimensions needed to fill a target area (resize before crop).
///
/// Returns dimensions that completely cover the target area while maintaining
/// the source aspect ratio. One dimension will match exactly, the other may exceed.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `target` - Target area dimensions (width, height)
pub fn calculate_fill_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let src_aspect = src_w as f64 / src_h as f64;
    let tgt_aspect = tgt_w as f64 / tgt_h as f64;

    if src_aspect > tgt_aspect {
        // Source is wider: height will match, width will exceed
        let h = tgt_h;
        let w = (h as f64 * src_aspect).round() as u32;
        (w, h)
    } else {
        // Source is taller: width will match, height will exceed
        let w = tgt_w;
        let h = (w as f64 / src_aspect).round() as u32;
        (w, h)
    }
}
