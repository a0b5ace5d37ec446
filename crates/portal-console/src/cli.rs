//! Command-line definitions

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use portal_core::ReportStatus;

#[derive(Parser, Debug)]
#[command(name = "portal", version, about = "Arcade staff portal console")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the portal data (overrides PORTAL_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in as a staff member
    Login {
        /// Username, or full name in passphrase mode
        identifier: String,
        #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in staff member
    Whoami,
    /// Staff scheduling
    #[command(subcommand)]
    Shifts(ShiftCommand),
    /// Team chat
    #[command(subcommand)]
    Chat(ChatCommand),
    /// Maintenance reports
    #[command(subcommand)]
    Reports(ReportCommand),
    /// Staff announcements
    #[command(subcommand)]
    Announce(AnnounceCommand),
}

#[derive(Subcommand, Debug)]
pub enum ShiftCommand {
    /// Add a shift (defaults to your own name)
    Add {
        /// YYYY-MM-DD
        date: String,
        /// HH:mm
        start: String,
        /// HH:mm
        end: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Shifts on one day
    List { date: String },
    /// Monday-to-Sunday schedule around a day (defaults to today)
    Week { date: Option<String> },
    /// Remove a shift
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ChatCommand {
    /// List channels
    Channels,
    /// Post to a channel
    Send {
        channel: String,
        #[command(flatten)]
        body: MessageBody,
    },
    /// Channel history, oldest first
    History { channel: String },
    /// Send a direct message
    Dm {
        recipient: String,
        #[command(flatten)]
        body: MessageBody,
    },
    /// Direct messages with one person
    Conversation { with: String },
    /// Fetch a stored attachment
    File {
        reference: String,
        /// Write the content here instead of printing a data URL
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct MessageBody {
    #[arg(default_value = "")]
    pub message: String,
    /// Attach a file
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Flag as an emergency
    #[arg(long)]
    pub emergency: bool,
}

#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Report a device fault
    Submit {
        device: String,
        room: String,
        description: String,
        /// Photo of the fault
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Reports, newest first
    List {
        #[arg(long)]
        status: Option<ReportStatus>,
    },
    /// Move a report to open, in-progress or resolved
    Status { id: String, status: ReportStatus },
}

#[derive(Subcommand, Debug)]
pub enum AnnounceCommand {
    /// Post an announcement
    Post {
        title: String,
        message: String,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Announcements, newest first
    List,
}
