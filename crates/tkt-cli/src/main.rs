//! tkt - Minimal file-backed ticket tracker
//!
//! No database server, no daemon - just one JSON file.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tkt_core::Config;

mod commands;

#[derive(Parser)]
#[command(name = "tkt")]
#[command(about = "Minimal file-backed ticket tracker")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Path to the ticket database (overrides the config file)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, global = true, default_value = "tkt.toml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new ticket
    Create {
        /// Ticket description
        description: String,

        /// Priority (high, medium, low)
        #[arg(short, long, default_value = "medium")]
        priority: String,
    },

    /// Show a ticket by id
    Show {
        /// Ticket id
        id: u64,
    },

    /// Search tickets by description substring
    Search {
        /// Text to look for (case-insensitive)
        text: String,
    },

    /// List tickets
    List {
        /// Order by priority instead of creation order
        #[arg(long)]
        by_priority: bool,

        /// Low priorities first (only with --by-priority)
        #[arg(long, requires = "by_priority")]
        descending: bool,
    },

    /// Close a ticket
    Close {
        /// Ticket id
        id: u64,
    },

    /// Show ticket statistics
    Stats,

    /// Remove all closed tickets
    Clean {
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },

    /// Show tickets in reverse creation order
    Reverse,

    /// Delete every ticket and reset the id counter
    Reset {
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config)?;
    if !config.display.colors {
        colored::control::set_override(false);
    }
    let db = cli.database.unwrap_or(config.database);

    match cli.command {
        Commands::Create {
            description,
            priority,
        } => commands::create(&db, &description, &priority, cli.json),
        Commands::Show { id } => commands::show(&db, id, cli.json),
        Commands::Search { text } => commands::search(&db, &text, cli.json),
        Commands::List {
            by_priority,
            descending,
        } => commands::list(&db, by_priority, descending, cli.json),
        Commands::Close { id } => commands::close(&db, id, cli.json),
        Commands::Stats => commands::stats(&db, cli.json),
        Commands::Clean { force } => commands::clean(&db, force),
        Commands::Reverse => commands::reverse(&db, cli.json),
        Commands::Reset { force } => commands::reset(&db, force),
    }
}
