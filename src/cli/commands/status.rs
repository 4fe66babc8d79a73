//! `geocomm status` command - store dashboard

use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::views;

use super::open_store;

#[derive(clap::Args, Debug)]
pub struct StatusArgs {}

pub fn run(_args: StatusArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let stats = views::stats(store.assets(), store.commlinks());

    if global.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&stats).into_diagnostic()?);
        return Ok(());
    }

    println!("# GeoComm Status\n");

    let mut summary = Builder::default();
    summary.push_record(["Metric", "Count"]);
    summary.push_record(["Total assets", &stats.total_assets.to_string()]);
    summary.push_record(["Active assets", &stats.active_assets.to_string()]);
    summary.push_record(["Total links", &stats.total_links.to_string()]);
    summary.push_record(["Active links", &stats.active_links.to_string()]);
    summary.push_record(["Degraded links", &stats.degraded_links.to_string()]);
    summary.push_record(["Unavailable links", &stats.unavailable_links.to_string()]);
    println!("{}", summary.build().with(Style::markdown()));

    println!("\n## Assets by Platform\n");
    let mut platforms = Builder::default();
    platforms.push_record(["Platform", "Count"]);
    platforms.push_record(["site", &stats.by_platform.site.to_string()]);
    platforms.push_record(["mobile", &stats.by_platform.mobile.to_string()]);
    platforms.push_record(["aircraft", &stats.by_platform.aircraft.to_string()]);
    println!("{}", platforms.build().with(Style::markdown()));

    println!("\n## Links by Type\n");
    let mut types = Builder::default();
    types.push_record(["Type", "Count"]);
    types.push_record(["satellite", &stats.by_link_type.satellite.to_string()]);
    types.push_record(["los_radio", &stats.by_link_type.los_radio.to_string()]);
    types.push_record(["voip", &stats.by_link_type.voip.to_string()]);
    types.push_record(["xmpp", &stats.by_link_type.xmpp.to_string()]);
    println!("{}", types.build().with(Style::markdown()));

    Ok(())
}
