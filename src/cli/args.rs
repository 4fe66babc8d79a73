//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    asset::AssetCommands,
    completions::CompletionsArgs,
    export::ExportArgs,
    freq::FreqArgs,
    import::ImportArgs,
    link::LinkCommands,
    report::ReportCommands,
    reset::ResetArgs,
    sat::SatArgs,
    status::StatusArgs,
};

#[derive(Parser)]
#[command(name = "geocomm")]
#[command(author, version, about = "GeoComm communications tracking toolkit")]
#[command(
    long_about = "Track communication assets and the links between them, exchange contact-directory XML with external systems, and generate reports."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format for list commands
    #[arg(long, short = 'f', global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Data directory holding the store database (default: platform data dir)
    #[arg(long, global = true, env = "GEOCOMM_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Asset management (sites, mobile units, aircraft)
    #[command(subcommand)]
    Asset(AssetCommands),

    /// Comm link management
    #[command(subcommand)]
    Link(LinkCommands),

    /// List satellites
    Sat(SatArgs),

    /// List frequency allocations
    Freq(FreqArgs),

    /// Import assets from a contact-directory XML file
    Import(ImportArgs),

    /// Export assets to a contact-directory XML file
    Export(ExportArgs),

    /// Generate reports (node status, frequency, satellite, availability)
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show the store status dashboard
    Status(StatusArgs),

    /// Reset all collections to the seed snapshot
    Reset(ResetArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned table for terminals
    #[default]
    Table,
    /// CSV (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// JSON (for programming)
    Json,
    /// Just IDs, one per line
    Id,
}
