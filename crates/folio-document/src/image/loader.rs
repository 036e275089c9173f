// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image loader — decode a page photo, bound its working size, and turn it
// upright according to its EXIF orientation.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use folio_core::FolioError;
use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage};
use thiserror::Error;
use tracing::{debug, info, instrument};

use super::orientation::{Orientation, read_orientation};

/// Side length of the blank square drawn when a photo cannot be decoded.
pub const PLACEHOLDER_SIZE: u32 = 100;

/// A photo could not be turned into pixels.
#[derive(Debug, Error)]
#[error("failed to decode image {}: {reason}", path.display())]
pub struct DecodeFailure {
    pub path: PathBuf,
    pub reason: String,
}

impl From<DecodeFailure> for FolioError {
    fn from(failure: DecodeFailure) -> Self {
        FolioError::ImageDecode {
            path: failure.path,
            reason: failure.reason,
        }
    }
}

/// A decoded photo, downscaled to the working width and rotated upright.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    image: DynamicImage,
    orientation: Orientation,
    /// Pixel size of the file as stored, before scaling and rotation.
    source_size: (u32, u32),
}

impl NormalizedImage {
    /// Wrap pixels that need no further normalisation.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let source_size = (image.width(), image.height());
        Self {
            image,
            orientation: Orientation::None,
            source_size,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn source_size(&self) -> (u32, u32) {
        self.source_size
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }
}

/// Result of looking up a record's image reference.
#[derive(Debug)]
pub enum ImageSlot {
    /// The record has no image; the page reserves no image region.
    Missing,
    /// The record names an image; decoding may still have failed.
    Present(Result<NormalizedImage, DecodeFailure>),
}

/// Resolve an optional image reference.
pub fn load_image_slot(path: Option<&Path>, max_width: u32) -> ImageSlot {
    match path {
        None => ImageSlot::Missing,
        Some(path) => ImageSlot::Present(load_normalized_image(path, max_width)),
    }
}

/// Decode the image at `path` and normalise it for placement.
///
/// 1. read the EXIF orientation (absent or broken metadata means upright)
/// 2. decode the full raster
/// 3. downscale so the width is at most `max_width`, keeping aspect ratio
/// 4. apply the orientation to the downscaled pixels
#[instrument(skip_all, fields(path = %path.display(), max_width = max_width))]
pub fn load_normalized_image(path: &Path, max_width: u32) -> Result<NormalizedImage, DecodeFailure> {
    let failure = |reason: String| DecodeFailure {
        path: path.to_path_buf(),
        reason,
    };

    let bytes = std::fs::read(path).map_err(|err| failure(err.to_string()))?;
    let orientation = read_orientation(&mut Cursor::new(bytes.as_slice()));

    let decoded = image::load_from_memory(&bytes).map_err(|err| failure(err.to_string()))?;
    drop(bytes);

    let source_size = (decoded.width(), decoded.height());
    if source_size.0 == 0 || source_size.1 == 0 {
        return Err(failure("image has no pixels".into()));
    }

    let scaled = downscale_to_width(decoded, max_width);
    let image = orientation.apply(scaled);

    info!(
        source_w = source_size.0,
        source_h = source_size.1,
        width = image.width(),
        height = image.height(),
        rotation = orientation.degrees(),
        "Image normalised"
    );

    Ok(NormalizedImage {
        image,
        orientation,
        source_size,
    })
}

/// Shrink `image` so its width is at most `max_width`. Narrower images are
/// left alone.
pub fn downscale_to_width(image: DynamicImage, max_width: u32) -> DynamicImage {
    let (width, height) = (image.width(), image.height());
    if width <= max_width {
        return image;
    }

    let scale = max_width as f64 / width as f64;
    let new_height = ((height as f64 * scale).round() as u32).max(1);
    debug!(from_w = width, from_h = height, to_w = max_width, to_h = new_height, "Downscaling");
    image.resize_exact(max_width, new_height, FilterType::Lanczos3)
}

/// The blank white square used in place of an undecodable photo.
pub fn blank_placeholder() -> NormalizedImage {
    NormalizedImage::from_dynamic(DynamicImage::ImageRgb8(RgbImage::from_pixel(
        PLACEHOLDER_SIZE,
        PLACEHOLDER_SIZE,
        Rgb([255, 255, 255]),
    )))
}
