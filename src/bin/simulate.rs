use std::path::PathBuf;

use clap::Parser;

use daily_menu_rs::logging::init_tracing;
use daily_menu_rs::models::NutritionTarget;
use daily_menu_rs::selector::{
    SelectorSettings, DEFAULT_LONG_TERM_REWARD, DEFAULT_PENALTY, DEFAULT_RECENT_DAYS,
};
use daily_menu_rs::simulation::{print_summary, run_simulation, write_csv, SimulationConfig};
use daily_menu_rs::state::DishCatalog;

#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(about = "Run the menu selector over many days and report weight drift and variety")]
struct Args {
    /// Dish catalog CSV
    #[arg(long)]
    catalog: PathBuf,

    /// Number of days to simulate
    #[arg(long, default_value = "60")]
    days: usize,

    /// Random seed for reproducibility
    #[arg(long, default_value = "123")]
    seed: u64,

    /// Regenerate requests per day before a menu is kept
    #[arg(long, default_value = "0")]
    regenerate: usize,

    /// Protein target in grams
    #[arg(long, default_value = "70")]
    protein: f64,

    /// Fat target in grams
    #[arg(long, default_value = "50")]
    fat: f64,

    /// Carb target in grams
    #[arg(long, default_value = "100")]
    carb: f64,

    /// Recency window size
    #[arg(long, default_value_t = DEFAULT_RECENT_DAYS)]
    recent_days: usize,

    /// Multiplier for recently served dishes
    #[arg(long, default_value_t = DEFAULT_PENALTY)]
    penalty: f64,

    /// Multiplier applied to all dishes each day
    #[arg(long, default_value_t = DEFAULT_LONG_TERM_REWARD)]
    reward: f64,

    /// Output CSV file with one row per day
    #[arg(long, default_value = "simulation.csv")]
    csv: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let catalog = match DishCatalog::load_csv(&args.catalog) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error loading catalog {:?}: {}", args.catalog, e);
            std::process::exit(1);
        }
    };

    println!("Loaded {} dishes from {:?}", catalog.len(), args.catalog);

    let config = SimulationConfig {
        days: args.days,
        regenerations_per_day: args.regenerate,
        target: NutritionTarget::new(args.protein, args.fat, args.carb),
        settings: SelectorSettings {
            recent_days: args.recent_days,
            penalty: args.penalty,
            long_term_reward: args.reward,
            seed: Some(args.seed),
        },
    };

    let report = match run_simulation(catalog, &config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error running simulation: {}", e);
            std::process::exit(1);
        }
    };

    print_summary(&report);

    if let Err(e) = write_csv(&report, &args.csv) {
        eprintln!("Error writing CSV: {}", e);
    } else {
        println!("Wrote daily results to {:?}", args.csv);
    }
}
