//! `geocomm export` command - write assets to contact-directory XML

use std::path::PathBuf;

use chrono::Utc;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::interchange::{export_contact_directory, export_filename, DirSink, FileSink};

use super::open_store;

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Directory to write the export into
    #[arg(long, short = 'o', default_value = ".")]
    pub output: PathBuf,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;

    let now = Utc::now();
    let xml = export_contact_directory(store.assets(), now);
    let filename = export_filename(store.assets().len(), now);

    let mut sink = DirSink::new(&args.output);
    let path = sink.write_file(&filename, &xml).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Exported {} contact(s) to {}",
            style("✓").green(),
            store.assets().len(),
            path.display()
        );
    } else {
        println!("{}", path.display());
    }
    Ok(())
}
