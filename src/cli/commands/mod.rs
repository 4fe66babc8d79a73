//! CLI command implementations

pub mod asset;
pub mod completions;
pub mod export;
pub mod freq;
pub mod import;
pub mod link;
pub mod report;
pub mod reset;
pub mod sat;
pub mod status;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::{CommsStore, Config, SqliteStore};

/// Resolve the store database path. `--data-dir` (or GEOCOMM_DATA_DIR)
/// overrides the configured location.
pub(crate) fn store_db_path(global: &GlobalOpts) -> PathBuf {
    match &global.data_dir {
        Some(dir) => dir.join("geocomm.db"),
        None => Config::load().store_path(),
    }
}

/// Open the persistent store for a command invocation
pub(crate) fn open_store(global: &GlobalOpts) -> Result<CommsStore> {
    let kv = SqliteStore::open(&store_db_path(global)).into_diagnostic()?;
    CommsStore::open(Box::new(kv)).into_diagnostic()
}

/// Write report content to a file or stdout
pub(crate) fn write_output(content: &str, output_path: Option<PathBuf>) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(&path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
