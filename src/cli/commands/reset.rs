//! `geocomm reset` command - restore the seed snapshot

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::persist::{KeyValueStore, STORAGE_PREFIX};
use crate::core::SqliteStore;

use super::{open_store, store_db_path};

#[derive(clap::Args, Debug)]
pub struct ResetArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Also drop the persisted blobs instead of overwriting them; the
    /// next invocation hydrates from seed
    #[arg(long)]
    pub purge: bool,
}

pub fn run(args: ResetArgs, global: &GlobalOpts) -> Result<()> {
    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Discard all changes and restore the seed data?")
            .default(false)
            .interact()
            .unwrap_or(false);
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    if args.purge {
        let kv = SqliteStore::open(&store_db_path(global)).into_diagnostic()?;
        kv.clear(STORAGE_PREFIX).into_diagnostic()?;
        if !global.quiet {
            println!("{} Cleared persisted state", style("✓").green());
        }
        return Ok(());
    }

    let mut store = open_store(global)?;
    store.reset_to_seed().into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Restored seed data: {} assets, {} links, {} satellites, {} frequencies",
            style("✓").green(),
            store.assets().len(),
            store.commlinks().len(),
            store.satellites().len(),
            store.frequencies().len()
        );
    }
    Ok(())
}
