//! CLI command definitions

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::domain::{Action, EquipmentKey, Operation, StudentId};

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Log command arguments.
#[derive(Debug, Args)]
pub struct LogCommand {
    /// Only show entries for this equipment key ("all" for everything)
    #[arg(short, long, default_value = "all")]
    pub filter: String,
}

/// Borrow and return arguments.
#[derive(Debug, Args)]
pub struct OperationArgs {
    /// Equipment key, e.g. `jetson-orin`
    #[arg(short, long)]
    pub key: String,

    /// Full name of the student
    #[arg(short, long)]
    pub name: String,

    /// Student ID
    #[arg(short, long)]
    pub student_id: String,

    /// Contact phone number
    #[arg(short, long)]
    pub phone: String,
}

impl OperationArgs {
    pub fn to_operation(&self, action: Action) -> Operation {
        Operation {
            key: EquipmentKey::new(self.key.clone()),
            full_name: self.name.clone(),
            student_id: StudentId::new(self.student_id.clone()),
            phone: self.phone.clone(),
            action,
        }
    }
}

/// Admin dashboard commands.
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Log in and store the ID token
    Login {
        #[arg(short, long, env = "TRACKER_ADMIN_EMAIL")]
        email: String,

        #[arg(short, long, env = "TRACKER_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored ID token
    Logout,

    /// Show the full activity log
    Logs,

    /// Show everyone who has borrowed equipment
    Users,

    /// Write a table as CSV
    Export {
        /// Which table to export
        #[arg(value_enum)]
        table: ExportTable,

        /// Output file (defaults to logs.csv or users.csv)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Exportable admin tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportTable {
    Logs,
    Users,
}
