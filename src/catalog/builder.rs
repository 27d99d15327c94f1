// SPDX-License-Identifier: MIT
// Catalog build pipeline: walk the extracted photo tree, derive dish names,
// categorize, dedup against the prior catalog, copy assets, and rewrite the
// merged document. Single-threaded, one pass, no partial writes — the
// catalog is serialized once, after the full merge is in memory.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::catalog::categories::detect_category;
use crate::catalog::model::{Dish, MenuDocument};
use crate::catalog::storage;
use crate::config::ImportConfig;
use crate::encoding::repair_mojibake;
use crate::extract;

/// Extensions recognized as dish photos, lowercase, without the dot.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Normalized names shorter than this are rejected as noise.
const MIN_NAME_CHARS: usize = 3;

static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());
static SEPARATOR_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]+").unwrap());

/// Counters reported after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub discovered: usize,
    pub added: usize,
    pub skipped_short: usize,
    pub skipped_duplicate: usize,
    pub total_items: usize,
    pub categories_count: usize,
}

/// Build-run state threaded explicitly through the pipeline — no
/// module-level counters or maps. Seeded from the prior catalog; new items
/// are appended after all prior ones.
struct BuildState {
    items: Vec<Dish>,
    next_id: u64,
    name_index: HashSet<String>,
}

impl BuildState {
    fn from_prior(prior: MenuDocument) -> Self {
        let next_id = prior.max_id() + 1;
        let name_index = prior
            .all_items
            .iter()
            .map(|dish| dish.name.to_lowercase())
            .collect();
        Self {
            items: prior.all_items,
            next_id,
            name_index,
        }
    }

    fn contains_name(&self, lowered: &str) -> bool {
        self.name_index.contains(lowered)
    }

    fn accept(&mut self, dish: Dish) {
        self.name_index.insert(dish.name.to_lowercase());
        self.next_id += 1;
        self.items.push(dish);
    }
}

/// Run the full import: extract the archive, build the merged catalog, copy
/// assets, and rewrite the catalog document.
///
/// With `rebuild` set, the asset directory is emptied and the prior catalog
/// ignored, so ids restart from 1. The extraction working directory is
/// removed after the build whether or not anything was accepted.
pub fn run_import(config: &ImportConfig, rebuild: bool) -> Result<ImportSummary> {
    extract::extract_archive(&config.archive_path, &config.extract_dir)
        .context("archive extraction failed")?;

    let result = build(config, rebuild);

    if let Err(err) = fs::remove_dir_all(&config.extract_dir) {
        warn!(path = %config.extract_dir.display(), error = %err, "could not remove extraction directory");
    }

    result
}

fn build(config: &ImportConfig, rebuild: bool) -> Result<ImportSummary> {
    let prior = if rebuild {
        clear_assets(&config.asset_dir)?;
        info!("rebuild requested, prior catalog ignored");
        MenuDocument::default()
    } else {
        storage::load_catalog(&config.catalog_path)
    };

    fs::create_dir_all(&config.asset_dir)
        .with_context(|| format!("cannot create asset directory {}", config.asset_dir.display()))?;

    let mut state = BuildState::from_prior(prior);
    let mut summary = ImportSummary::default();

    for path in discover_images(&config.extract_dir) {
        summary.discovered += 1;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dish_name = normalize_dish_name(&file_name);

        if dish_name.chars().count() < MIN_NAME_CHARS {
            warn!(file = %file_name, "name too short after normalization, skipping");
            summary.skipped_short += 1;
            continue;
        }

        let lowered = dish_name.to_lowercase();
        if state.contains_name(&lowered) {
            info!(name = %dish_name, "dish already cataloged, skipping");
            summary.skipped_duplicate += 1;
            continue;
        }

        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        let safe_name = safe_file_name(&dish_name, &extension);
        let target = config.asset_dir.join(&safe_name);

        // Copy failures are fatal: a discovered image we cannot read means
        // the run's input is broken, not just one bad entry.
        fs::copy(&path, &target).with_context(|| {
            format!(
                "cannot copy image {} to {}",
                path.display(),
                target.display()
            )
        })?;
        debug!(from = %path.display(), to = %safe_name, "asset copied");

        let category = detect_category(&dish_name);
        let dish = Dish {
            id: state.next_id,
            name: dish_name,
            category: category.to_string(),
            image: format!("images/{safe_name}"),
            image_format: extension,
            description: None,
            composition: None,
            allergens: None,
        };
        info!(id = dish.id, name = %dish.name, category, "dish added");
        state.accept(dish);
        summary.added += 1;
    }

    let document = MenuDocument::from_items(state.items);
    storage::save_catalog(&config.catalog_path, &document)?;

    summary.total_items = document.statistics.total_items;
    summary.categories_count = document.statistics.categories_count;
    info!(
        discovered = summary.discovered,
        added = summary.added,
        skipped_short = summary.skipped_short,
        skipped_duplicate = summary.skipped_duplicate,
        total_items = summary.total_items,
        categories = summary.categories_count,
        "catalog build complete"
    );
    Ok(summary)
}

/// Recursively enumerate image files under `root` in directory-listing
/// order. That order is the tie-break for id assignment within a run.
fn discover_images(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(error = %err, "unreadable entry under extraction root, skipping");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && has_image_extension(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let lowered = ext.to_string_lossy().to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&lowered.as_str())
        })
        .unwrap_or(false)
}

/// Derive a dish name from an image file name: strip the recognized
/// extension, give the text a second chance at encoding repair (independent
/// of whatever the extractor already fixed), and trim whitespace.
pub fn normalize_dish_name(file_name: &str) -> String {
    let stem = strip_image_extension(file_name);
    let repaired = repair_mojibake(stem).unwrap_or_else(|| stem.to_string());
    repaired.trim().to_string()
}

fn strip_image_extension(file_name: &str) -> &str {
    if let Some(dot) = file_name.rfind('.') {
        let ext = &file_name[dot + 1..];
        if IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
            return &file_name[..dot];
        }
    }
    file_name
}

/// Build a filesystem-safe asset name: characters outside word/whitespace
/// classes become `_`, then whitespace and dash runs collapse to single `_`.
/// Collisions between different source names are last-copy-wins at the file
/// level; only the dish `name` is deduplicated.
pub fn safe_file_name(name: &str, extension: &str) -> String {
    let replaced = UNSAFE_CHARS.replace_all(name, "_");
    let collapsed = SEPARATOR_RUNS.replace_all(&replaced, "_");
    format!("{collapsed}.{extension}")
}

fn clear_assets(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Ok(());
    }
    let entries = fs::read_dir(dir)
        .with_context(|| format!("cannot list asset directory {}", dir.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("cannot list asset directory {}", dir.display()))?
            .path();
        if path.is_file() {
            fs::remove_file(&path)
                .with_context(|| format!("cannot remove stale asset {}", path.display()))?;
            debug!(file = %path.display(), "stale asset removed");
        }
    }
    Ok(())
}
