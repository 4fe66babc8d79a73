//! `geocomm link` commands

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::helpers::{render_table, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::views::{self, Selection};
use crate::core::EntityKind;
use crate::entities::{CommLink, LinkStatus, LinkType};

use super::open_store;

#[derive(Subcommand, Debug)]
pub enum LinkCommands {
    /// List comm links (dangling links are hidden)
    List(ListArgs),

    /// Show one link in full
    Show(ShowArgs),

    /// Create a link between two assets
    Add(AddArgs),

    /// Remove a comm link
    Rm(RmArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only show this technology (satellite, los_radio, voip, xmpp)
    #[arg(long = "type", value_parser = parse_link_type)]
    pub link_type: Option<LinkType>,

    /// Include links whose endpoints no longer exist
    #[arg(long)]
    pub all: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Link id
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Link name
    #[arg(long)]
    pub name: String,

    /// Technology (satellite, los_radio, voip, xmpp)
    #[arg(long = "type", value_parser = parse_link_type)]
    pub link_type: LinkType,

    /// Technology refinement (GEO, HF, UHF, ...)
    #[arg(long)]
    pub subtype: Option<String>,

    /// The two endpoint asset ids
    #[arg(long, num_args = 2, required = true, value_names = ["ASSET_A", "ASSET_B"])]
    pub between: Vec<String>,

    /// Initial status (active, degraded, unavailable, scheduled)
    #[arg(long, default_value = "active", value_parser = parse_link_status)]
    pub status: LinkStatus,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Link id
    pub id: String,
}

fn parse_link_type(s: &str) -> Result<LinkType, String> {
    s.parse()
}

fn parse_link_status(s: &str) -> Result<LinkStatus, String> {
    s.parse()
}

#[derive(Serialize)]
struct LinkRow {
    id: String,
    name: String,
    #[serde(rename = "type")]
    link_type: LinkType,
    subtype: Option<String>,
    status: String,
    endpoints: String,
}

pub fn run(cmd: LinkCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        LinkCommands::List(args) => list(args, global),
        LinkCommands::Show(args) => show(args, global),
        LinkCommands::Add(args) => add(args, global),
        LinkCommands::Rm(args) => rm(args, global),
    }
}

fn list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;

    let mut selection = Selection::default();
    if let Some(link_type) = args.link_type {
        selection.visible_link_types = [link_type].into_iter().collect();
    }

    let links: Vec<&CommLink> = if args.all {
        store
            .commlinks()
            .iter()
            .filter(|l| selection.visible_link_types.contains(&l.link_type))
            .collect()
    } else {
        views::filtered_links(store.assets(), store.commlinks(), &selection)
    };

    let rows: Vec<LinkRow> = links
        .into_iter()
        .map(|l| LinkRow {
            id: l.id.clone(),
            name: l.name.clone(),
            link_type: l.link_type,
            subtype: l.subtype.clone(),
            status: l.status.to_string(),
            endpoints: l.endpoints.join(" <-> "),
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
                        r.link_type.to_string(),
                        r.subtype.clone().unwrap_or_else(|| "-".to_string()),
                        r.status.clone(),
                        r.endpoints.clone(),
                    ]
                })
                .collect();
            println!(
                "{}",
                render_table(
                    &["ID", "NAME", "TYPE", "SUBTYPE", "STATUS", "ENDPOINTS"],
                    &cells,
                    global.format == OutputFormat::Md,
                )
            );
            if !global.quiet {
                println!("{} link(s) found.", style(rows.len()).cyan());
            }
        }
    }

    Ok(())
}

fn show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let link = store
        .find_commlink(&args.id)
        .ok_or_else(|| miette::miette!("Link not found: {}", args.id))?;
    println!("{}", serde_json::to_string_pretty(link).into_diagnostic()?);
    Ok(())
}

fn add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut store = open_store(global)?;

    for endpoint in &args.between {
        if store.find_asset(endpoint).is_none() {
            return Err(miette::miette!("Unknown endpoint asset: {}", endpoint));
        }
    }

    let link = CommLink {
        id: EntityKind::Link.new_id(),
        name: args.name,
        link_type: args.link_type,
        subtype: args.subtype,
        status: args.status,
        endpoints: args.between,
        frequency: Default::default(),
        satellite: None,
        schedule: None,
        quality: Default::default(),
    };
    let id = link.id.clone();
    store.upsert_commlink(link).into_diagnostic()?;

    if !global.quiet {
        println!("{} Created link {}", style("✓").green(), id);
    } else {
        println!("{}", id);
    }
    Ok(())
}

fn rm(args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let mut store = open_store(global)?;
    if !store.remove_commlink(&args.id) {
        return Err(miette::miette!("Link not found: {}", args.id));
    }
    if !global.quiet {
        println!("{} Removed link {}", style("✓").green(), args.id);
    }
    Ok(())
}
