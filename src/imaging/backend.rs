//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the operations every backend must
//! support: identify, resize, convert, and square crop.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the mock below, which records operations without
//! touching pixels.

use super::params::{ConvertParams, ResizeParams, SquareParams};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// `Sync` so a single backend can be shared across rayon workers.
pub trait ImageBackend: Sync {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Resample to the exact dimensions in `params`.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;

    /// Re-encode into the format implied by the output extension.
    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError>;

    /// Fill-resize then center-crop to a square.
    fn square(&self, params: &SquareParams) -> Result<(), BackendError>;
}
