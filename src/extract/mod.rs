// SPDX-License-Identifier: MIT
// Archive extractor — two strategies in order:
//   1. the system `unzip` utility, one pass over the whole archive;
//   2. per-entry extraction via the `zip` crate with entry-name encoding
//      repair, used only when the utility fails.
// Both failing is fatal; per-entry trouble inside the fallback is not.

pub mod fallback;
pub mod unzip;

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

/// Fatal extractor failures. Everything per-entry is logged and skipped
/// inside the fallback instead of surfacing here.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to prepare extraction directory {path}: {source}")]
    Prepare {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("both extraction strategies failed for {archive}: unzip: {primary}; zip fallback: {fallback}")]
    AllStrategiesFailed {
        archive: String,
        primary: String,
        fallback: String,
    },
}

/// Unpack `archive` into `extract_dir` with readable entry names.
///
/// The target directory is cleared and recreated first, so nothing from a
/// prior run survives.
pub fn extract_archive(archive: &Path, extract_dir: &Path) -> Result<(), ExtractError> {
    reset_dir(extract_dir)?;

    let primary_err = match unzip::run(archive, extract_dir) {
        Ok(()) => {
            info!(archive = %archive.display(), "archive extracted with system unzip");
            return Ok(());
        }
        Err(err) => err,
    };

    warn!(
        archive = %archive.display(),
        error = %primary_err,
        "system unzip failed, falling back to zip-crate extraction"
    );

    match fallback::extract(archive, extract_dir) {
        Ok(entries) => {
            info!(archive = %archive.display(), entries, "fallback extraction complete");
            Ok(())
        }
        Err(fallback_err) => Err(ExtractError::AllStrategiesFailed {
            archive: archive.display().to_string(),
            primary: format!("{primary_err:#}"),
            fallback: format!("{fallback_err:#}"),
        }),
    }
}

fn reset_dir(dir: &Path) -> Result<(), ExtractError> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|source| ExtractError::Prepare {
            path: dir.display().to_string(),
            source,
        })?;
    }
    fs::create_dir_all(dir).map_err(|source| ExtractError::Prepare {
        path: dir.display().to_string(),
        source,
    })
}
