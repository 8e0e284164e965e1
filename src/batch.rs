//! Directory-wide image resizing.
//!
//! Walks an input directory, resizes every decodable image into a mirrored
//! tree under the output directory, and reports each outcome as it happens.
//!
//! ## Output layout
//!
//! ```text
//! photos/                     out/
//! ├── a.jpg            →      ├── a.jpg
//! ├── icon.gif         →      ├── icon.png      # no GIF encoder, falls back to PNG
//! └── trip/                   └── trip/
//!     └── b.png        →          └── b.png
//! ```
//!
//! ## Parallel processing
//!
//! Images are processed in parallel on rayon's global pool. One failed image
//! is reported and counted; it never aborts the rest of the batch.

use crate::imaging::{
    BackendError, Dimensions, ImageBackend, OutputFormat, Quality, is_supported_input,
    resize_image,
};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk input directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Input is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Bounding box for every image in the batch. `None` leaves that side
/// unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResizeBounds {
    pub max_width: Option<i64>,
    pub max_height: Option<i64>,
}

/// Progress event sent while the batch runs.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    Resized {
        source: PathBuf,
        output: PathBuf,
        dimensions: Dimensions,
    },
    Failed {
        source: PathBuf,
        error: String,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub resized: usize,
    pub failed: usize,
}

/// Collect decodable images under `input_dir`, sorted, skipping anything
/// inside `output_dir` so re-runs don't pick up their own output.
fn collect_sources(input_dir: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let mut sources = Vec::new();
    for entry in WalkDir::new(input_dir).follow_links(true) {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file() && is_supported_input(path) && !path.starts_with(output_dir)
        {
            sources.push(path.to_path_buf());
        }
    }
    sources.sort();
    Ok(sources)
}

/// Mirror `source`'s position under `output_dir`, keeping the extension
/// when we can encode it and switching to PNG otherwise.
fn output_path_for(source: &Path, input_dir: &Path, output_dir: &Path) -> PathBuf {
    let relative = source.strip_prefix(input_dir).unwrap_or(source);
    let mut output = output_dir.join(relative);
    if OutputFormat::from_path(source).is_none() {
        output.set_extension(OutputFormat::Png.extension());
    }
    output
}

/// Resize every supported image under `input_dir` to fit `bounds`.
///
/// Outcomes are sent on `events` (when given) as they complete, so a
/// printer thread can report progress while workers are still running.
pub fn resize_directory(
    backend: &impl ImageBackend,
    input_dir: &Path,
    output_dir: &Path,
    bounds: ResizeBounds,
    quality: Quality,
    events: Option<Sender<BatchEvent>>,
) -> Result<BatchSummary, BatchError> {
    if !input_dir.is_dir() {
        return Err(BatchError::NotADirectory(input_dir.to_path_buf()));
    }
    std::fs::create_dir_all(output_dir)?;

    let sources = collect_sources(input_dir, output_dir)?;
    log::info!(
        "batch resize: {} images from {} into {}",
        sources.len(),
        input_dir.display(),
        output_dir.display()
    );

    let results: Vec<bool> = sources
        .par_iter()
        .map(|source| {
            let output = output_path_for(source, input_dir, output_dir);
            let outcome = resize_one(backend, source, &output, bounds, quality);
            let event = match outcome {
                Ok(dimensions) => BatchEvent::Resized {
                    source: source.clone(),
                    output,
                    dimensions,
                },
                Err(e) => {
                    log::warn!("failed to resize {}: {}", source.display(), e);
                    BatchEvent::Failed {
                        source: source.clone(),
                        error: e.to_string(),
                    }
                }
            };
            let ok = matches!(event, BatchEvent::Resized { .. });
            if let Some(tx) = &events {
                // Receiver gone just means nobody is listening.
                tx.send(event).ok();
            }
            ok
        })
        .collect();

    let resized = results.iter().filter(|ok| **ok).count();
    Ok(BatchSummary {
        resized,
        failed: results.len() - resized,
    })
}

fn resize_one(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    bounds: ResizeBounds,
    quality: Quality,
) -> Result<Dimensions, BackendError> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    resize_image(
        backend,
        source,
        output,
        bounds.max_width,
        bounds.max_height,
        quality,
    )
}
