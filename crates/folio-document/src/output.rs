// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output path resolution — never overwrite an existing document.

use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use folio_core::error::{FolioError, Result};
use tracing::{debug, instrument};

/// Directory that holds every PDF built for `document_title`:
/// `<root>/<document_title>/PDFs`.
pub fn document_directory(root: &Path, document_title: &str) -> PathBuf {
    root.join(file_stem(document_title)).join("PDFs")
}

/// A title made safe to use as one path component.
///
/// Separators and NUL become `_`; a title with nothing printable becomes
/// `Untitled`. Other characters, spaces included, are kept.
pub fn file_stem(document_title: &str) -> String {
    let stem: String = document_title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();
    if stem.is_empty() || stem == "." || stem == ".." {
        "Untitled".to_string()
    } else {
        stem
    }
}

/// Pick a path in `directory` for `<base_name>.pdf` that does not exist yet.
///
/// Creates `directory` if needed. When `<base_name>.pdf` is taken the
/// candidates `<base_name> (1).pdf`, `<base_name> (2).pdf`, ... are tried in
/// turn with no upper bound.
#[instrument(skip_all, fields(directory = %directory.display(), base_name = %base_name))]
pub fn resolve_output_path(directory: &Path, base_name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(directory).map_err(|source| FolioError::OutputDir {
        path: directory.to_path_buf(),
        source,
    })?;

    let mut candidate = directory.join(format!("{base_name}.pdf"));
    let mut counter: u64 = 1;
    while candidate.try_exists()? {
        candidate = directory.join(format!("{base_name} ({counter}).pdf"));
        counter += 1;
    }

    debug!(path = %candidate.display(), collisions = counter - 1, "Output path resolved");
    Ok(candidate)
}

/// Resolve a free path like [`resolve_output_path`] and create the file there.
///
/// The file is opened with `create_new`, so a path another build claimed
/// between the existence check and the open is skipped, never truncated.
pub fn create_output_file(directory: &Path, base_name: &str) -> Result<(PathBuf, File)> {
    loop {
        let path = resolve_output_path(directory, base_name)?;
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                debug!(path = %path.display(), "Output path claimed concurrently, retrying");
            }
            Err(source) => return Err(FolioError::Write { path, source }),
        }
    }
}
