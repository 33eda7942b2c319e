//! Command-line interface for the tracker.
//!
//! Defines the `tracker` binary's arguments. Kiosk commands act on the
//! public endpoints; `admin` commands need a stored ID token.

mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{AdminCommand, ExportTable, LogCommand, OperationArgs, StatusCommand};

/// tracker - Borrow and return lab equipment
#[derive(Debug, Parser)]
#[command(name = "tracker")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Tracker server URL
    #[arg(
        short,
        long,
        global = true,
        env = "TRACKER_URL",
        default_value = "http://localhost:3000"
    )]
    pub url: String,

    /// File holding the admin ID token
    #[arg(
        long,
        global = true,
        env = "TRACKER_TOKEN_FILE",
        value_name = "FILE",
        default_value = ".tracker-token"
    )]
    pub token_file: PathBuf,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show every item with its availability
    Status(StatusCommand),

    /// Show the activity log
    Log(LogCommand),

    /// Borrow an item
    Borrow(OperationArgs),

    /// Return an item
    Return(OperationArgs),

    /// Admin dashboard
    #[command(subcommand)]
    Admin(AdminCommand),
}

impl Cli {
    /// Default tracing filter for the verbosity flags.
    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "lab_equipment_tracker=warn",
            1 => "lab_equipment_tracker=debug",
            _ => "lab_equipment_tracker=trace",
        }
    }
}
