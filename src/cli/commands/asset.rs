//! `geocomm asset` commands

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::helpers::{render_table, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::views::{self, Selection};
use crate::entities::Platform;

use super::open_store;

#[derive(Subcommand, Debug)]
pub enum AssetCommands {
    /// List assets
    List(ListArgs),

    /// Show one asset in full
    Show(ShowArgs),

    /// Remove an asset; links it participates in are removed with it
    Rm(RmArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only show this platform (site, mobile, aircraft)
    #[arg(long, value_parser = parse_platform)]
    pub platform: Option<Platform>,

    /// Filter by a search term on name and callsign
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Asset id
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Asset id
    pub id: String,
}

fn parse_platform(s: &str) -> Result<Platform, String> {
    s.parse()
}

#[derive(Serialize)]
struct AssetRow {
    id: String,
    name: String,
    callsign: String,
    platform: Platform,
    status: String,
    links: usize,
}

pub fn run(cmd: AssetCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        AssetCommands::List(args) => list(args, global),
        AssetCommands::Show(args) => show(args, global),
        AssetCommands::Rm(args) => rm(args, global),
    }
}

fn list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;

    let mut selection = Selection::default();
    if let Some(platform) = args.platform {
        selection.visible_platforms = [platform].into_iter().collect();
    }
    if let Some(search) = args.search {
        selection.search = search;
    }

    let matched = views::search_assets(store.assets(), &selection);
    let rows: Vec<AssetRow> = matched
        .into_iter()
        .filter(|a| selection.visible_platforms.contains(&a.platform))
        .map(|a| AssetRow {
            id: a.id.clone(),
            name: a.name.clone(),
            callsign: a.callsign.clone(),
            platform: a.platform,
            status: a.status.to_string(),
            links: a.commlinks.len(),
        })
        .collect();

    match global.format {
        OutputFormat::Csv => println!("{}", crate::reports::to_csv(&rows).into_diagnostic()?),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows).into_diagnostic()?)
        }
        OutputFormat::Id => {
            for row in &rows {
                println!("{}", row.id);
            }
        }
        OutputFormat::Table | OutputFormat::Md => {
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|r| {
                    vec![
                        r.id.clone(),
                        truncate_str(&r.name, 32),
                        r.callsign.clone(),
                        r.platform.to_string(),
                        r.status.clone(),
                        r.links.to_string(),
                    ]
                })
                .collect();
            println!(
                "{}",
                render_table(
                    &["ID", "NAME", "CALLSIGN", "PLATFORM", "STATUS", "LINKS"],
                    &cells,
                    global.format == OutputFormat::Md,
                )
            );
            if !global.quiet {
                println!("{} asset(s) found.", style(rows.len()).cyan());
            }
        }
    }

    Ok(())
}

fn show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let asset = store
        .find_asset(&args.id)
        .ok_or_else(|| miette::miette!("Asset not found: {}", args.id))?;
    println!("{}", serde_json::to_string_pretty(asset).into_diagnostic()?);
    Ok(())
}

fn rm(args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let mut store = open_store(global)?;

    let cascaded: Vec<String> = store
        .commlinks()
        .iter()
        .filter(|l| l.endpoints.iter().any(|e| *e == args.id))
        .map(|l| l.id.clone())
        .collect();

    if !store.remove_asset(&args.id) {
        return Err(miette::miette!("Asset not found: {}", args.id));
    }

    if !global.quiet {
        println!("{} Removed asset {}", style("✓").green(), args.id);
        for link in cascaded {
            println!("  removed dependent link {}", link);
        }
    }
    Ok(())
}
