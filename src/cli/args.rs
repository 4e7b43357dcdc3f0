//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::{Direction, DocumentType};

/// In-memory knowledge base: folder/document trees per direction
#[derive(Parser, Debug)]
#[command(name = "kbase")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(long, global = true, env = "KBASE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the folder tree of a direction
    Tree {
        /// Direction (safe-city, transport); default from config
        #[arg(short = 'D', long)]
        direction: Option<Direction>,
    },

    /// List documents, optionally filtered
    Docs {
        /// Direction (safe-city, transport); default from config
        #[arg(short = 'D', long)]
        direction: Option<Direction>,
        /// Only documents of this type
        #[arg(short, long)]
        section: Option<DocumentType>,
        /// Case-insensitive match on name, tags and text
        query: Option<String>,
    },

    /// Show one folder or document
    Show {
        /// Node id
        id: String,
        /// Direction (safe-city, transport); default from config
        #[arg(short = 'D', long)]
        direction: Option<Direction>,
    },

    /// Run session commands from stdin against an in-memory store
    Session {
        /// Starting direction; default from config
        #[arg(short = 'D', long)]
        direction: Option<Direction>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create global config template
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
