// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open a built document with `lopdf` and report what is in it.

use std::path::Path;

use folio_core::error::FolioError;
use lopdf::{Document, Object};
use tracing::{debug, info, instrument};

/// Reads back a generated PDF for inspection.
pub struct PdfReader {
    document: Document,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FolioError> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            FolioError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self { document })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, FolioError> {
        let document = Document::load_mem(data).map_err(|err| {
            FolioError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self { document })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// The `/Title` entry of the document information dictionary, if any.
    pub fn title(&self) -> Option<String> {
        let info_id = self.document.trailer.get(b"Info").ok()?.as_reference().ok()?;
        let info = self.document.get_object(info_id).ok()?.as_dict().ok()?;
        match info.get(b"Title").ok()? {
            Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
            _ => None,
        }
    }
}

/// Decode a PDF text string: UTF-16BE with a byte-order mark, otherwise
/// treated as single-byte text.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_a_pdf_error() {
        assert!(matches!(
            PdfReader::from_bytes(b"not a pdf"),
            Err(FolioError::PdfError(_))
        ));
    }

    #[test]
    fn utf16_titles_are_decoded() {
        let bytes = [0xFE, 0xFF, 0x00, b'T', 0x00, b'r', 0x00, b'i', 0x00, b'p'];
        assert_eq!(decode_pdf_string(&bytes), "Trip");
        assert_eq!(decode_pdf_string(b"Trip Log"), "Trip Log");
    }
}
