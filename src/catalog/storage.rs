// SPDX-License-Identifier: MIT
// Catalog persistence: read the prior document at the start of a run, write
// the merged document wholesale at the end. No incremental format.

use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};
use tracing::{debug, warn};

use crate::catalog::model::MenuDocument;

/// Load the prior catalog.
///
/// A missing file is a normal first run. A file that exists but cannot be
/// read or parsed is downgraded to "no prior catalog" with a warning — the
/// run proceeds from empty rather than aborting.
pub fn load_catalog(path: &Path) -> MenuDocument {
    if !path.exists() {
        debug!(path = %path.display(), "no prior catalog, starting empty");
        return MenuDocument::default();
    }
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot read existing catalog, starting empty");
            return MenuDocument::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(document) => document,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "existing catalog failed to parse, starting empty");
            MenuDocument::default()
        }
    }
}

/// Write the catalog document, fully replacing any prior content.
pub fn save_catalog(path: &Path, document: &MenuDocument) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("cannot create catalog directory {}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(document).context("cannot serialize catalog")?;
    fs::write(path, json).with_context(|| format!("cannot write catalog to {}", path.display()))
}
