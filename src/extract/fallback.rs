// SPDX-License-Identifier: MIT
// Fallback extraction strategy: per-entry unpacking via the `zip` crate.
//
// Entry names without the UTF-8 flag are decoded as CP437 by the zip layer,
// which mangles Cyrillic names that are really CP866.  Each extracted file is
// renamed to the CP866 reinterpretation of its raw name bytes when the two
// disagree; entries that cannot be repaired keep the name they came out with.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Component, Path, PathBuf};

use anyhow::{Context as _, Result};
use tracing::{debug, warn};
use zip::ZipArchive;

use crate::encoding::decode_oem_name;

/// Extract every file entry of `archive_path` into `extract_dir`, repairing
/// entry-name encoding where possible. Returns the number of files written.
///
/// Failures on individual entries (unreadable entry, unsafe path, failed
/// rename) are logged and skipped; only archive-level failures are returned.
pub fn extract(archive_path: &Path, extract_dir: &Path) -> Result<usize> {
    let file = File::open(archive_path)
        .with_context(|| format!("cannot open archive {}", archive_path.display()))?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .with_context(|| format!("cannot read archive {}", archive_path.display()))?;

    let mut extracted = 0usize;
    for index in 0..archive.len() {
        let mut entry = match archive.by_index(index) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(index, error = %err, "unreadable zip entry, skipping");
                continue;
            }
        };
        if entry.is_dir() {
            continue;
        }

        let Some(relative) = entry.enclosed_name() else {
            warn!(name = entry.name(), "zip entry escapes the extraction root, skipping");
            continue;
        };
        let out_path = extract_dir.join(&relative);

        if let Err(err) = write_entry(&mut entry, &out_path) {
            warn!(name = entry.name(), error = %err, "failed to extract zip entry, skipping");
            continue;
        }
        extracted += 1;

        // Rename to the repaired name when the raw bytes decode differently.
        let Some(repaired) = decode_oem_name(entry.name_raw()) else {
            continue;
        };
        let Some(repaired_rel) = safe_relative_path(&repaired) else {
            warn!(name = %repaired, "repaired entry name is not a safe relative path, keeping original");
            continue;
        };
        let repaired_path = extract_dir.join(&repaired_rel);
        if repaired_path == out_path {
            continue;
        }
        match rename_overwriting(&out_path, &repaired_path) {
            Ok(()) => debug!(from = %relative.display(), to = %repaired_rel.display(), "entry name repaired"),
            Err(err) => {
                warn!(
                    from = %out_path.display(),
                    to = %repaired_path.display(),
                    error = %err,
                    "could not rename repaired entry, keeping original name"
                );
            }
        }
    }

    Ok(extracted)
}

fn write_entry(entry: &mut impl io::Read, out_path: &Path) -> Result<()> {
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut out = File::create(out_path)?;
    io::copy(entry, &mut out)?;
    Ok(())
}

/// Turn a decoded entry name into a relative path, rejecting anything that
/// could climb out of the extraction root.
fn safe_relative_path(name: &str) -> Option<PathBuf> {
    let normalized = name.replace('\\', "/");
    let candidate = PathBuf::from(normalized.trim_start_matches('/'));
    let mut out = PathBuf::new();
    for component in candidate.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if out.as_os_str().is_empty() {
        None
    } else {
        Some(out)
    }
}

fn rename_overwriting(from: &Path, to: &Path) -> io::Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    if to.exists() {
        fs::remove_file(to)?;
    }
    fs::rename(from, to)
}
