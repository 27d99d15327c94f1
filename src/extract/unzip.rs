// SPDX-License-Identifier: MIT
// Primary extraction strategy: the system `unzip` utility.

use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context as _, Result};
use tracing::debug;

/// Run `unzip -q -o <archive> -d <dir>`.
///
/// Any spawn failure or non-zero exit is an error; the caller decides whether
/// to fall back to library extraction.
pub fn run(archive: &Path, extract_dir: &Path) -> Result<()> {
    debug!(archive = %archive.display(), dir = %extract_dir.display(), "running system unzip");

    let output = Command::new("unzip")
        .args(["-q", "-o"])
        .arg(archive)
        .arg("-d")
        .arg(extract_dir)
        .output()
        .context("failed to spawn unzip")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("unzip exited with {}: {}", output.status, stderr.trim());
    }
    Ok(())
}
