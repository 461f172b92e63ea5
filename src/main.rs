mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use weekboard_core::{BoardConfig, NoteDate, Vault};

#[derive(Parser)]
#[command(name = "weekboard")]
#[command(about = "View and edit the tasks in your weekboard daily notes")]
struct Cli {
    /// Vault directory (overrides the configured vault_dir)
    #[arg(long, global = true)]
    vault: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the week board
    Week {
        /// Any date inside the wanted week (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NoteDate>,

        /// Print the week as JSON instead of a board
        #[arg(long)]
        json: bool,
    },
    /// Show one day's tasks
    Day {
        /// The day to show (YYYY-MM-DD)
        date: NoteDate,
    },
    /// Add a task to a day
    Add {
        /// Task text
        text: String,

        /// Day to add to (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NoteDate>,

        /// Write the task as a checkbox instead of a plain list item
        #[arg(long)]
        checkbox: bool,
    },
    /// Toggle a task's completion state (plain tasks become checkboxes)
    Toggle {
        date: NoteDate,
        /// Task position within the day, starting at 0
        index: usize,
    },
    /// Remove a task from a day
    Remove {
        date: NoteDate,
        /// Task position within the day, starting at 0
        index: usize,
    },
    /// Show the week board live, re-rendering on every note change
    Watch {
        /// Any date inside the wanted week (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NoteDate>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = BoardConfig::load()?;
    let vault = Vault::new(cli.vault.unwrap_or_else(|| config.vault_path()));

    match cli.command {
        Commands::Week { date, json } => {
            commands::week::run(vault, date.unwrap_or_else(NoteDate::today), json).await
        }
        Commands::Day { date } => commands::day::run(vault, date).await,
        Commands::Add {
            text,
            date,
            checkbox,
        } => {
            commands::add::run(vault, date.unwrap_or_else(NoteDate::today), text, checkbox).await
        }
        Commands::Toggle { date, index } => commands::toggle::run(vault, date, index).await,
        Commands::Remove { date, index } => commands::remove::run(vault, date, index).await,
        Commands::Watch { date } => {
            commands::watch::run(vault, date.unwrap_or_else(NoteDate::today), &config).await
        }
    }
}
