// SPDX-License-Identifier: MIT

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_ARCHIVE: &str = "sapiens photo.zip";
const DEFAULT_EXTRACT_DIR: &str = "temp_extracted";
const DEFAULT_ASSET_DIR: &str = "src/assets/menu";
const DEFAULT_CATALOG: &str = "menu.json";

/// Pipeline paths (`menu-import.toml`, overridable per-field from the CLI).
///
/// All paths are resolved relative to the working directory; the defaults
/// mirror the app repository's conventional layout.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ImportConfig {
    /// The source photo archive.
    pub archive_path: PathBuf,
    /// Working directory the archive is unpacked into; cleared on every run
    /// and removed afterwards.
    pub extract_dir: PathBuf,
    /// Permanent asset directory referenced by the catalog's `image` field.
    pub asset_dir: PathBuf,
    /// The persisted catalog document.
    pub catalog_path: PathBuf,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            archive_path: PathBuf::from(DEFAULT_ARCHIVE),
            extract_dir: PathBuf::from(DEFAULT_EXTRACT_DIR),
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
            catalog_path: PathBuf::from(DEFAULT_CATALOG),
        }
    }
}

impl ImportConfig {
    /// Load from a TOML file when one is given; defaults otherwise.
    /// Missing keys in the file fall back to their defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config at {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config at {}", path.display()))
    }
}
