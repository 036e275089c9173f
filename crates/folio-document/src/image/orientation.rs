// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// EXIF orientation lookup.

use std::io::{BufRead, Seek};

use image::DynamicImage;
use serde::Serialize;
use tracing::debug;

/// Clockwise rotation needed to display a photo upright.
///
/// Only the pure rotations are honoured. Mirrored EXIF orientations
/// (2, 4, 5, 7) are treated as upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Orientation {
    #[default]
    None,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Orientation {
    /// Map an EXIF `Orientation` (0x0112) value.
    pub fn from_exif(value: u32) -> Self {
        match value {
            6 => Self::Rotate90,
            3 => Self::Rotate180,
            8 => Self::Rotate270,
            _ => Self::None,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Self::None => 0,
            Self::Rotate90 => 90,
            Self::Rotate180 => 180,
            Self::Rotate270 => 270,
        }
    }

    /// Rotate `image` clockwise by this orientation.
    pub fn apply(self, image: DynamicImage) -> DynamicImage {
        match self {
            Self::None => image,
            Self::Rotate90 => image.rotate90(),
            Self::Rotate180 => image.rotate180(),
            Self::Rotate270 => image.rotate270(),
        }
    }
}

/// Read the orientation from an image container.
///
/// Missing or unreadable metadata is not an error: the photo is assumed to
/// be upright.
pub fn read_orientation<R: BufRead + Seek>(reader: &mut R) -> Orientation {
    let exif = match exif::Reader::new().read_from_container(reader) {
        Ok(exif) => exif,
        Err(err) => {
            debug!(%err, "No usable EXIF metadata, assuming upright");
            return Orientation::None;
        }
    };

    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from_exif)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{Rgb, RgbImage};

    use super::*;

    #[test]
    fn exif_values_map_to_rotations() {
        assert_eq!(Orientation::from_exif(1), Orientation::None);
        assert_eq!(Orientation::from_exif(6), Orientation::Rotate90);
        assert_eq!(Orientation::from_exif(3), Orientation::Rotate180);
        assert_eq!(Orientation::from_exif(8), Orientation::Rotate270);
        // Mirrored and out-of-range values fall back to upright.
        assert_eq!(Orientation::from_exif(2), Orientation::None);
        assert_eq!(Orientation::from_exif(0), Orientation::None);
        assert_eq!(Orientation::from_exif(42), Orientation::None);
    }

    #[test]
    fn quarter_turns_swap_dimensions() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 10, Rgb([0, 0, 0])));

        let turned = Orientation::Rotate90.apply(image.clone());
        assert_eq!((turned.width(), turned.height()), (10, 40));

        let flipped = Orientation::Rotate180.apply(image);
        assert_eq!((flipped.width(), flipped.height()), (40, 10));
    }

    #[test]
    fn rotate90_is_clockwise() {
        // Mark the top-left pixel; a clockwise turn moves it to the top-right.
        let mut raw = RgbImage::from_pixel(4, 2, Rgb([0, 0, 0]));
        raw.put_pixel(0, 0, Rgb([255, 0, 0]));

        let turned = Orientation::Rotate90.apply(DynamicImage::ImageRgb8(raw)).to_rgb8();
        assert_eq!(turned.get_pixel(1, 0), &Rgb([255, 0, 0]));
    }

    #[test]
    fn garbage_metadata_reads_as_upright() {
        let mut cursor = Cursor::new(b"definitely not an image".to_vec());
        assert_eq!(read_orientation(&mut cursor), Orientation::None);
    }

    #[test]
    fn png_without_exif_reads_as_upright() {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 3, Rgb([9, 9, 9])))
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        assert_eq!(read_orientation(&mut Cursor::new(bytes)), Orientation::None);
    }
}
