use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;

/// Picks lunch and dinner toward your macro targets without repeating yourself.
#[derive(Parser, Debug)]
#[command(name = "daily_menu")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the config JSON file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Dish catalog CSV. Defaults to the last imported catalog.
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// Directory holding catalog copies and ledgers.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Copy a catalog into the data directory and make it the default.
    Import {
        /// Catalog CSV to import.
        file: PathBuf,
    },

    /// Generate today's lunch and dinner, then confirm or regenerate.
    Plan {
        /// Protein target in grams.
        #[arg(long)]
        protein: Option<f64>,

        /// Fat target in grams.
        #[arg(long)]
        fat: Option<f64>,

        /// Carb target in grams.
        #[arg(long)]
        carb: Option<f64>,

        /// Date to record the menu under (skips the date prompt).
        #[arg(long)]
        date: Option<String>,
    },

    /// Show the confirmed menu for a date, or list recorded dates.
    History {
        #[arg(long)]
        date: Option<String>,
    },

    /// Show how often each ingredient has been used.
    Inventory,

    /// List the dishes in the catalog.
    Dishes,
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan {
            protein: None,
            fat: None,
            carb: None,
            date: None,
        }
    }
}
