//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take user-facing bounds, compute parameters, and call the backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{calculate_fill_dimensions, calculate_resize_dimensions};
use super::params::{ConvertParams, OutputFormat, Quality, ResizeParams, SquareParams};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Edge of the `favicon.ico` written alongside the PNG set.
const ICO_SIZE: u32 = 32;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<Dimensions> {
    backend.identify(path)
}

fn require_output_format(output: &Path) -> Result<OutputFormat> {
    OutputFormat::from_path(output).ok_or_else(|| {
        BackendError::UnsupportedFormat(output.display().to_string())
    })
}

/// Resize an image to fit within optional bounds, preserving aspect ratio.
///
/// Returns the dimensions that were written. When the image already fits,
/// it is re-encoded at its original size.
pub fn resize_image(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    max_width: Option<i64>,
    max_height: Option<i64>,
    quality: Quality,
) -> Result<Dimensions> {
    require_output_format(output)?;
    let original = backend.identify(source)?;
    let target =
        calculate_resize_dimensions(original.width, original.height, max_width, max_height);

    if target.width == 0 || target.height == 0 {
        return Err(BackendError::ProcessingFailed(format!(
            "Resize of {}x{} with bounds {:?}x{:?} leaves nothing to encode",
            original.width, original.height, max_width, max_height
        )));
    }

    log::debug!(
        "resize {}: {}x{} -> {}x{}",
        source.display(),
        original.width,
        original.height,
        target.width,
        target.height
    );

    backend.resize(&ResizeParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width: target.width,
        height: target.height,
        quality,
    })?;

    Ok(target)
}

/// Re-encode an image into the format implied by `output`'s extension.
pub fn convert_image(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    quality: Quality,
) -> Result<()> {
    let format = require_output_format(output)?;
    log::debug!("convert {} -> {:?}", source.display(), format);
    backend.convert(&ConvertParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        quality,
    })
}

/// A favicon file written by [`create_favicon_set`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFavicon {
    pub size: u32,
    pub path: PathBuf,
}

/// Write one square PNG per size (`favicon-<n>x<n>.png`) plus a 32px
/// `favicon.ico`.
///
/// Non-square sources are fill-resized and center-cropped, so nothing is
/// letterboxed. Sizes are deduplicated; zero sizes are skipped.
pub fn create_favicon_set(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    sizes: &[u32],
) -> Result<Vec<GeneratedFavicon>> {
    let original = backend.identify(source)?;
    std::fs::create_dir_all(output_dir)?;

    let mut sizes: Vec<u32> = sizes.iter().copied().filter(|&s| s > 0).collect();
    sizes.sort_unstable();
    sizes.dedup();

    let square = |size: u32, filename: String| -> Result<GeneratedFavicon> {
        let (fill_width, fill_height) =
            calculate_fill_dimensions((original.width, original.height), (size, size));
        let path = output_dir.join(filename);
        backend.square(&SquareParams {
            source: source.to_path_buf(),
            output: path.clone(),
            fill_width,
            fill_height,
            size,
        })?;
        Ok(GeneratedFavicon { size, path })
    };

    let mut generated = Vec::with_capacity(sizes.len() + 1);
    for size in sizes {
        generated.push(square(size, format!("favicon-{size}x{size}.png"))?);
    }
    generated.push(square(ICO_SIZE, "favicon.ico".to_string())?);

    log::debug!(
        "favicon set from {}: {} files",
        source.display(),
        generated.len()
    );
    Ok(generated)
}
