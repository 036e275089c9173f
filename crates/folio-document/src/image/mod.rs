// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — EXIF orientation, decoding, and working-size normalisation.

pub mod loader;
pub mod orientation;

pub use loader::{
    DecodeFailure, ImageSlot, NormalizedImage, blank_placeholder, load_image_slot,
    load_normalized_image,
};
pub use orientation::Orientation;
