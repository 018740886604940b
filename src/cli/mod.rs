//! Command-line interface definitions.

use clap::{Parser, Subcommand};

/// Daily horoscopes and a private journal, kept on your own disk
#[derive(Parser, Debug)]
#[clap(name = "stellium", about = "Daily horoscopes and a private journal")]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Print verbose output
    #[clap(short = 'v', long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show today's horoscope for your sign
    Horoscope {
        /// Sign to read for (defaults to aries)
        #[clap(short, long)]
        sign: Option<String>,
    },

    /// List the twelve zodiac signs
    Signs,

    /// Manage journal entries
    #[clap(subcommand)]
    Journal(JournalCommand),

    /// Manage the daily reminder notification
    #[clap(subcommand)]
    Notify(NotifyCommand),
}

#[derive(Subcommand, Debug)]
pub enum JournalCommand {
    /// Add an entry for today
    Add {
        /// Entry text
        content: String,
        /// Optional mood tag
        #[clap(short, long)]
        mood: Option<String>,
    },

    /// List all entries
    List,

    /// Replace an entry's content (and optionally its mood)
    Edit {
        /// Entry id
        id: String,
        /// New entry text
        content: String,
        /// New mood tag; the old one is kept when omitted
        #[clap(short, long)]
        mood: Option<String>,
    },

    /// Delete an entry
    Delete {
        /// Entry id
        id: String,
    },

    /// Delete every entry
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum NotifyCommand {
    /// Turn the daily reminder on
    Enable {
        /// Reminder time, HH:mm 24-hour (defaults to 09:00)
        #[clap(short, long)]
        time: Option<String>,
    },

    /// Turn the daily reminder off
    Disable,

    /// Change the reminder time
    Time {
        /// New reminder time, HH:mm 24-hour
        time: String,
    },

    /// Show the reminder preferences and permission status
    Status,
}
