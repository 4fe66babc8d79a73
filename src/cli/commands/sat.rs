//! `geocomm sat` command - satellite reference data

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::helpers::{opt_f64, render_table};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::OrbitType;

use super::open_store;

#[derive(clap::Args, Debug)]
pub struct SatArgs {}

#[derive(Serialize)]
struct SatRow {
    id: String,
    name: String,
    norad_id: u32,
    orbit_type: OrbitType,
    position_deg_w: Option<f64>,
    provider: String,
    status: String,
    transponders: usize,
}

pub fn run(_args: SatArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;

    let rows: Vec<SatRow> = store
        .satellites()
        .iter()
        .map(|s| SatRow {
            id: s.id.clone(),
            name: s.name.clone(),
            norad_id: s.norad_id,
            orbit_type: s.orbit_type,
            position_deg_w: s.position_deg_w,
            provider: s.provider.clone(),
            status: s.status.clone(),
            transponders: s.transponders.len(),
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
                        r.name.clone(),
                        r.norad_id.to_string(),
                        r.orbit_type.to_string(),
                        opt_f64(r.position_deg_w),
                        r.provider.clone(),
                        r.status.clone(),
                        r.transponders.to_string(),
                    ]
                })
                .collect();
            println!(
                "{}",
                render_table(
                    &["ID", "NAME", "NORAD", "ORBIT", "SLOT °W", "PROVIDER", "STATUS", "XPDRS"],
                    &cells,
                    global.format == OutputFormat::Md,
                )
            );
            if !global.quiet {
                println!("{} satellite(s) found.", style(rows.len()).cyan());
            }
        }
    }

    Ok(())
}
