use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Personal notes keyed by slug", long_about = None)]
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// TOML config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file, overrides the config value
    #[arg(long, value_name = "DB", global = true)]
    pub db: Option<PathBuf>,

    /// Act as this user; anonymous when omitted
    #[arg(short, long, value_name = "USERNAME", global = true)]
    pub user: Option<String>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Register a user that can own notes
    AddUser {
        #[arg(value_name = "USERNAME")]
        username: String,
    },

    /// Create a note; the slug is derived from the title when omitted
    Add {
        #[arg(value_name = "TITLE")]
        title: String,
        #[arg(short, long, default_value = "")]
        text: String,
        #[arg(short, long, default_value = "")]
        slug: String,
    },

    /// List your notes
    List,

    /// Show one of your notes
    Show {
        #[arg(value_name = "SLUG")]
        slug: String,
    },

    /// Replace title, text and slug of one of your notes
    Edit {
        #[arg(value_name = "SLUG")]
        slug: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        text: Option<String>,
        /// New slug; keeps the current one when omitted
        #[arg(long)]
        new_slug: Option<String>,
    },

    /// Delete one of your notes
    Delete {
        #[arg(value_name = "SLUG")]
        slug: String,
    },

    /// Print the total number of stored notes
    Stats,
}
