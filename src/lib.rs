pub mod catalog;
pub mod config;
pub mod encoding;
pub mod extract;

pub use catalog::builder::{run_import, ImportSummary};
pub use config::ImportConfig;
