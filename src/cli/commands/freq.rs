//! `geocomm freq` command - frequency allocation reference data

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::helpers::render_table;
use crate::cli::{GlobalOpts, OutputFormat};

use super::open_store;

#[derive(clap::Args, Debug)]
pub struct FreqArgs {
    /// Only show this band (HF, VHF, UHF, L, Ku, ...)
    #[arg(long)]
    pub band: Option<String>,
}

#[derive(Serialize)]
struct FreqRow {
    id: String,
    frequency_mhz: f64,
    bandwidth_khz: f64,
    designation: String,
    band: String,
    assigned: usize,
    classification: String,
}

pub fn run(args: FreqArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;

    let rows: Vec<FreqRow> = store
        .frequencies()
        .iter()
        .filter(|f| {
            args.band
                .as_deref()
                .map(|b| f.band.eq_ignore_ascii_case(b))
                .unwrap_or(true)
        })
        .map(|f| FreqRow {
            id: f.id.clone(),
            frequency_mhz: f.frequency_mhz,
            bandwidth_khz: f.bandwidth_khz,
            designation: f.designation.clone(),
            band: f.band.clone(),
            assigned: f.assigned_to.len(),
            classification: f.classification.clone(),
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
                        format!("{}", r.frequency_mhz),
                        format!("{}", r.bandwidth_khz),
                        r.designation.clone(),
                        r.band.clone(),
                        r.assigned.to_string(),
                        r.classification.clone(),
                    ]
                })
                .collect();
            println!(
                "{}",
                render_table(
                    &["ID", "MHZ", "BW KHZ", "DESIGNATION", "BAND", "ASSIGNED", "CLASS"],
                    &cells,
                    global.format == OutputFormat::Md,
                )
            );
            if !global.quiet {
                println!("{} frequency record(s) found.", style(rows.len()).cyan());
            }
        }
    }

    Ok(())
}
