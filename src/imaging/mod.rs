//! Image geometry and processing.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Resize** | Lanczos3, bounds from [`calculate_resize_dimensions`] |
//! | **Convert** | decode + re-encode (PNG, JPEG, WebP, ICO) |
//! | **Favicon set** | fill-resize + center crop per size |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{FAVICON_SIZES, calculate_fill_dimensions, calculate_resize_dimensions};
pub use operations::{
    GeneratedFavicon, convert_image, create_favicon_set, get_dimensions, resize_image,
};
pub use params::{ConvertParams, OutputFormat, Quality, ResizeParams, SquareParams};
pub use rust_backend::{RustBackend, is_supported_input, supported_input_extensions};
