use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{CalendarArgs, PlanCommands, WatchArgs};

/// Main command-line interface for the Cadence plan scheduler
///
/// Cadence manages small, time-boxed daily plans. Every plan belongs to
/// a user and may occupy a window of the day; overlapping windows are
/// rejected at creation and update time, and a background sweep moves
/// plans whose time has passed to the next free slot.
#[derive(Parser)]
#[command(version, about, name = "cadence")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/cadence/cadence.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// User the operation acts on behalf of
    #[arg(long, global = true, default_value = "default")]
    pub user: String,

    /// Emit machine-readable JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Cadence CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Show per-day completion statistics
    #[command(alias = "cal")]
    Calendar(CalendarArgs),
    /// Run one reschedule sweep cycle and exit
    Sweep,
    /// Run the reschedule sweep periodically until interrupted
    Watch(WatchArgs),
}
