// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use menu_import::catalog::builder::run_import;
use menu_import::config::ImportConfig;
use tracing::error;

#[derive(Parser)]
#[command(
    name = "menu-import",
    about = "Rebuild the menu catalog from a dish-photo archive",
    version
)]
struct Args {
    /// Path to the source photo archive (zip)
    #[arg(long, env = "MENU_IMPORT_ARCHIVE")]
    archive: Option<PathBuf>,

    /// Working directory for archive extraction (cleared every run)
    #[arg(long, env = "MENU_IMPORT_EXTRACT_DIR")]
    extract_dir: Option<PathBuf>,

    /// Permanent asset directory for copied dish images
    #[arg(long, env = "MENU_IMPORT_ASSET_DIR")]
    asset_dir: Option<PathBuf>,

    /// Catalog file to merge into and rewrite
    #[arg(long, env = "MENU_IMPORT_CATALOG")]
    catalog: Option<PathBuf>,

    /// TOML config file with the pipeline paths
    #[arg(long, env = "MENU_IMPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Discard the existing catalog and assets and rebuild from scratch
    #[arg(long)]
    rebuild: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MENU_IMPORT_LOG")]
    log: Option<String>,

    /// Suppress informational output; warnings and errors still go to stderr
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(&args);

    if let Err(err) = run(&args) {
        error!("menu import failed: {err:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = ImportConfig::load(args.config.as_deref())?;
    if let Some(path) = &args.archive {
        config.archive_path = path.clone();
    }
    if let Some(path) = &args.extract_dir {
        config.extract_dir = path.clone();
    }
    if let Some(path) = &args.asset_dir {
        config.asset_dir = path.clone();
    }
    if let Some(path) = &args.catalog {
        config.catalog_path = path.clone();
    }

    run_import(&config, args.rebuild)?;
    Ok(())
}

fn init_logging(args: &Args) {
    use tracing_subscriber::EnvFilter;

    let level = if args.quiet {
        "warn".to_string()
    } else {
        args.log.clone().unwrap_or_else(|| "info".to_string())
    };
    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();
}
