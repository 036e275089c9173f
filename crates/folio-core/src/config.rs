// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Build configuration and output root resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};
use crate::types::PageGeometry;

/// Settings shared by every build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Page size, margins, region sizes and font sizes.
    pub geometry: PageGeometry,
    /// Decoded images wider than this are downscaled before placement.
    pub working_image_width: u32,
    /// Where `<title>/PDFs/` directories are created. `None` means
    /// [`default_output_root`].
    pub output_root: Option<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::default(),
            working_image_width: 400,
            output_root: None,
        }
    }
}

impl BuildConfig {
    /// Read a JSON config file. Absent fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.working_image_width == 0 {
            return Err(FolioError::Config(
                "working_image_width must be at least 1".into(),
            ));
        }
        self.geometry.validate()
    }

    /// The configured root, or the platform default.
    pub fn output_root(&self) -> PathBuf {
        self.output_root.clone().unwrap_or_else(default_output_root)
    }
}

/// Default root for generated documents.
///
/// `$FOLIO_ROOT` wins; otherwise the XDG data dir, then `~/.local/share`,
/// then the system temp dir. Nothing is created here, the output path
/// resolver creates directories on demand.
pub fn default_output_root() -> PathBuf {
    if let Ok(root) = std::env::var("FOLIO_ROOT") {
        return PathBuf::from(root);
    }
    data_home().join("folio")
}

fn data_home() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    std::env::temp_dir()
}
