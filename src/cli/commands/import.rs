//! `geocomm import` command - load assets from contact-directory XML

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::interchange::parse_contact_directory;

use super::open_store;

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Contact-directory XML file
    pub file: PathBuf,

    /// Parse and report without writing to the store
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    let content = fs::read_to_string(&args.file).into_diagnostic()?;
    let result = parse_contact_directory(&content, Utc::now());

    for error in &result.errors {
        eprintln!("{} {}", style("warning:").yellow().bold(), error);
    }

    if result.assets.is_empty() && !result.errors.is_empty() {
        return Err(miette::miette!(
            "No contacts could be imported from {}",
            args.file.display()
        ));
    }

    if args.dry_run {
        if !global.quiet {
            println!(
                "{} contact(s) parsed, {} error(s); no changes written (dry run).",
                style(result.assets.len()).cyan(),
                result.errors.len()
            );
        }
        return Ok(());
    }

    let mut store = open_store(global)?;
    let count = result.assets.len();
    for asset in result.assets {
        store.upsert_asset(asset).into_diagnostic()?;
    }

    if !global.quiet {
        println!(
            "{} Imported {} asset(s) from {} ({} error(s))",
            style("✓").green(),
            count,
            args.file.display(),
            result.errors.len()
        );
    }
    Ok(())
}
