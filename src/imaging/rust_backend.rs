//! Image backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, WebP, ICO, GIF, BMP) | `image::ImageReader` with format sniffing |
//! | Identify | `image::image_dimensions` (header only) |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Square crop | `resize_exact` to fill dimensions + `crop_imm` centered |
//! | Encode → PNG | `image::codecs::png::PngEncoder` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (quality) |
//! | Encode → WebP | `image::codecs::webp::WebPEncoder` (lossless) |
//! | Encode → ICO | `image::codecs::ico::IcoEncoder` (≤ 256px) |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{ConvertParams, OutputFormat, Quality, ResizeParams, SquareParams};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::BufWriter;
use std::path::Path;
use std::sync::LazyLock;

/// Largest edge the ICO container can describe.
const ICO_MAX_EDGE: u32 = 256;

const INPUT_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("webp", ImageFormat::WebP),
    ("ico", ImageFormat::Ico),
    ("gif", ImageFormat::Gif),
    ("bmp", ImageFormat::Bmp),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    INPUT_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// True when the path's extension is one we can decode.
pub fn is_supported_input(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            supported_input_extensions()
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
}

/// Backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Encode and save, picking the encoder from the output extension.
fn save_image(img: &DynamicImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
    let format = OutputFormat::from_path(path).ok_or_else(|| {
        BackendError::UnsupportedFormat(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_string(),
        )
    })?;

    if format == OutputFormat::Ico && (img.width() > ICO_MAX_EDGE || img.height() > ICO_MAX_EDGE)
    {
        return Err(BackendError::ProcessingFailed(format!(
            "ICO images are limited to {ICO_MAX_EDGE}x{ICO_MAX_EDGE}, got {}x{}",
            img.width(),
            img.height()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(std::fs::File::create(path)?);
    let encode_err =
        |e: image::ImageError| BackendError::ProcessingFailed(format!("{format:?} encode failed: {e}"));

    match format {
        OutputFormat::Png => img
            .write_with_encoder(image::codecs::png::PngEncoder::new(writer))
            .map_err(encode_err),
        OutputFormat::Jpeg => {
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(writer, quality.value() as u8);
            rgb.write_with_encoder(encoder).map_err(encode_err)
        }
        OutputFormat::WebP => {
            let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
            rgba.write_with_encoder(image::codecs::webp::WebPEncoder::new_lossless(writer))
                .map_err(encode_err)
        }
        OutputFormat::Ico => {
            let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
            rgba.write_with_encoder(image::codecs::ico::IcoEncoder::new(writer))
                .map_err(encode_err)
        }
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
        })?;
        Ok(Dimensions { width, height })
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let resized = img.resize_exact(params.width, params.height, FilterType::Lanczos3);
        save_image(&resized, &params.output, params.quality)
    }

    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        save_image(&img, &params.output, params.quality)
    }

    fn square(&self, params: &SquareParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let filled = img.resize_exact(params.fill_width, params.fill_height, FilterType::Lanczos3);
        let x = params.fill_width.saturating_sub(params.size) / 2;
        let y = params.fill_height.saturating_sub(params.size) / 2;
        let cropped = filled.crop_imm(x, y, params.size, params.size);
        save_image(&cropped, &params.output, Quality::default())
    }
}
