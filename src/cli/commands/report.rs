//! `geocomm report` commands - generate operational reports

use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::GlobalOpts;
use crate::reports::{availability, frequency, node_status, satellite, to_csv};

use super::{open_store, write_output};

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Per-asset link health and platform/status breakdown
    NodeStatus(ReportArgs),

    /// Frequency allocations and proximity conflicts
    Frequency(ReportArgs),

    /// Transponder utilization per satellite
    Satellite(ReportArgs),

    /// Link uptime derived from schedule and status
    Availability(ReportArgs),
}

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Emit the raw rows as CSV instead of a formatted report
    #[arg(long)]
    pub csv: bool,
}

pub fn run(cmd: ReportCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ReportCommands::NodeStatus(args) => node_status_report(args, global),
        ReportCommands::Frequency(args) => frequency_report(args, global),
        ReportCommands::Satellite(args) => satellite_report(args, global),
        ReportCommands::Availability(args) => availability_report(args, global),
    }
}

fn node_status_report(args: ReportArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let report = node_status::generate(store.assets(), store.commlinks(), Utc::now());

    if args.csv {
        let csv = to_csv(&report.rows).into_diagnostic()?;
        return write_output(&format!("{}\n", csv), args.output);
    }

    let mut output = String::new();
    output.push_str("# Node Status Report\n\n");

    let mut table = Builder::default();
    table.push_record(["Name", "Callsign", "Platform", "Status", "Links Up", "Links"]);
    for row in &report.rows {
        table.push_record([
            row.name.clone(),
            row.callsign.clone(),
            row.platform.to_string(),
            row.status.to_string(),
            row.active_links.to_string(),
            row.total_links.to_string(),
        ]);
    }
    output.push_str(&table.build().with(Style::markdown()).to_string());
    output.push('\n');

    output.push_str("\n## Assets by Platform and Status\n\n");
    let mut chart = Builder::default();
    let mut header = vec!["Status".to_string()];
    if let Some(series) = report.chart.first() {
        header.extend(series.x.iter().cloned());
    }
    chart.push_record(header);
    for series in &report.chart {
        let mut record = vec![series.name.clone()];
        record.extend(series.y.iter().map(|n| n.to_string()));
        chart.push_record(record);
    }
    output.push_str(&chart.build().with(Style::markdown()).to_string());
    output.push('\n');

    write_output(&output, args.output)
}

fn frequency_report(args: ReportArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let report = frequency::generate(store.frequencies(), store.assets(), Utc::now());

    if args.csv {
        let csv = to_csv(&report.rows).into_diagnostic()?;
        return write_output(&format!("{}\n", csv), args.output);
    }

    let mut output = String::new();
    output.push_str("# Frequency Allocation Report\n\n");

    let mut table = Builder::default();
    table.push_record(["MHz", "BW kHz", "Designation", "Band", "Assigned To"]);
    for row in &report.rows {
        table.push_record([
            format!("{}", row.frequency_mhz),
            format!("{}", row.bandwidth_khz),
            row.designation.clone(),
            row.band.clone(),
            row.assigned_to.clone(),
        ]);
    }
    output.push_str(&table.build().with(Style::markdown()).to_string());
    output.push('\n');

    if report.conflicts.is_empty() {
        output.push_str("\nNo frequency conflicts detected.\n");
    } else {
        output.push_str("\n## Conflicts\n\n");
        let mut conflicts = Builder::default();
        conflicts.push_record(["Frequency 1", "Frequency 2", "MHz"]);
        for conflict in &report.conflicts {
            conflicts.push_record([
                conflict.freq1.clone(),
                conflict.freq2.clone(),
                format!("{}", conflict.frequency_mhz),
            ]);
        }
        output.push_str(&conflicts.build().with(Style::markdown()).to_string());
        output.push('\n');
    }

    write_output(&output, args.output)
}

fn satellite_report(args: ReportArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let report = satellite::generate(store.satellites(), store.commlinks(), Utc::now());

    if args.csv {
        let csv = to_csv(&report.gauges).into_diagnostic()?;
        return write_output(&format!("{}\n", csv), args.output);
    }

    let mut output = String::new();
    output.push_str("# Satellite Usage Report\n\n");

    let mut table = Builder::default();
    table.push_record(["Satellite", "Transponder", "Band", "Allocated", "Active", "Utilization"]);
    for sat in &report.rows {
        for t in &sat.transponders {
            table.push_record([
                sat.name.clone(),
                t.id.clone(),
                t.band.clone(),
                t.allocated_links.to_string(),
                t.active_links.to_string(),
                format!("{:.0}%", t.utilization),
            ]);
        }
    }
    output.push_str(&table.build().with(Style::markdown()).to_string());
    output.push('\n');

    write_output(&output, args.output)
}

fn availability_report(args: ReportArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    let report = availability::generate(store.commlinks(), Utc::now());

    if args.csv {
        let csv = to_csv(&report.rows).into_diagnostic()?;
        return write_output(&format!("{}\n", csv), args.output);
    }

    let mut output = String::new();
    output.push_str("# Link Availability Report\n\n");

    let mut table = Builder::default();
    table.push_record(["Link", "Type", "Status", "Scheduled h", "Available h", "Uptime %"]);
    for row in &report.rows {
        table.push_record([
            row.name.clone(),
            row.link_type.to_string(),
            row.status.to_string(),
            format!("{}", row.scheduled_hours),
            format!("{}", row.available_hours),
            format!("{}", row.uptime_percent),
        ]);
    }
    output.push_str(&table.build().with(Style::markdown()).to_string());
    output.push('\n');

    output.push_str("\n## Summary\n\n");
    let mut summary = Builder::default();
    summary.push_record(["Metric", "Value"]);
    summary.push_record(["Mean uptime", &format!("{}%", report.summary.mean_uptime)]);
    summary.push_record([
        "Best link",
        report.summary.best_link.as_deref().unwrap_or("N/A"),
    ]);
    summary.push_record([
        "Worst link",
        report.summary.worst_link.as_deref().unwrap_or("N/A"),
    ]);
    summary.push_record([
        "Total downtime",
        &format!("{} h", report.summary.total_downtime_hours),
    ]);
    output.push_str(&summary.build().with(Style::markdown()).to_string());
    output.push('\n');

    write_output(&output, args.output)
}
