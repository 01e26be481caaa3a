//! CLI definitions for the Aptus dump tool.

use std::path::PathBuf;

use aptus_core::DumpFamily;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Aptus CLI.
#[derive(Parser)]
#[command(name = "aptus")]
#[command(about = "Dump and maintain data in the Aptus portal through a browser")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/aptus.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Dump arguments given without the `dump` subcommand
    #[command(flatten)]
    pub dump: DumpArgs,
}

#[derive(Debug, Clone, Default, Args)]
pub(crate) struct DumpArgs {
    /// Families to dump: authorities, customers (default: all)
    pub families: Vec<DumpFamily>,

    /// First customer id to dump, overriding the config
    #[arg(long)]
    pub from: Option<u32>,

    /// Customer id to stop before, overriding the config
    #[arg(long)]
    pub to: Option<u32>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Dump portal data to JSON (default: everything)
    Dump(DumpArgs),

    /// Write changes back to the portal
    Manage {
        /// What to update
        #[arg(long, value_enum)]
        action: ManageAction,

        /// JSON file with the records to apply
        #[arg(long)]
        file: PathBuf,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ManageAction {
    /// Update key fields (code, name, card label, free text)
    Keys,
}
