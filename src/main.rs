use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::warn;

use daily_menu_rs::cli::{Cli, Command};
use daily_menu_rs::config::AppConfig;
use daily_menu_rs::error::{MenuError, Result};
use daily_menu_rs::interface::{
    display_dish_list, display_history_dates, display_history_entry, display_inventory,
    display_menu, display_warnings, next_date_key, prompt_date, prompt_menu_action,
    prompt_nutrition_target, prompt_yes_no, MenuAction,
};
use daily_menu_rs::logging::init_tracing;
use daily_menu_rs::models::NutritionTarget;
use daily_menu_rs::session::{MenuSession, PlanStep};
use daily_menu_rs::state::{backup_catalog, DishCatalog};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = AppConfig::load(&cli.config);
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    let command = cli.command.unwrap_or_default();

    if let Command::Import { file } = &command {
        return cmd_import(file, &cli.config, &mut config);
    }

    let Some(catalog_path) = cli.catalog.clone().or_else(|| config.last_catalog.clone()) else {
        eprintln!("No catalog selected.");
        eprintln!("Run 'daily_menu import <file.csv>' or pass --catalog <file.csv>.");
        return Ok(());
    };
    if !catalog_path.exists() {
        eprintln!("Catalog file not found: {}", catalog_path.display());
        return Ok(());
    }

    let mut session = open_session(&catalog_path, &config)?;

    match command {
        Command::Plan {
            protein,
            fat,
            carb,
            date,
        } => cmd_plan(&mut session, &config, [protein, fat, carb], date),
        Command::History { date } => cmd_history(&session, date.as_deref()),
        Command::Inventory => {
            display_inventory(session.inventory());
            Ok(())
        }
        Command::Dishes => {
            let selector = session.selector();
            display_dish_list(selector.catalog().dishes(), |name| selector.weight_of(name));
            Ok(())
        }
        Command::Import { .. } => Ok(()),
    }
}

fn open_session(catalog_path: &Path, config: &AppConfig) -> Result<MenuSession> {
    let session = MenuSession::open(catalog_path, &config.data_dir, config.selector.clone())?;
    display_warnings(session.load_warnings());
    println!(
        "Loaded {} dishes ({} protein sources) from {}",
        session.catalog().len(),
        session.catalog().protein_source_count(),
        catalog_path.display()
    );
    Ok(session)
}

/// Back up a catalog into the data directory and remember it.
fn cmd_import(file: &Path, config_path: &Path, config: &mut AppConfig) -> Result<()> {
    if !file.exists() {
        eprintln!("Catalog file not found: {}", file.display());
        return Ok(());
    }

    let stored: PathBuf = match backup_catalog(file, &config.data_dir) {
        Ok(path) => path,
        Err(e) => {
            warn!(error = %e, "catalog backup failed, using the source file");
            eprintln!("Warning: could not copy catalog into {}: {}", config.data_dir.display(), e);
            file.to_path_buf()
        }
    };

    let catalog = DishCatalog::load_csv(&stored)?;

    config.last_catalog = Some(stored.clone());
    config.save(config_path)?;

    println!(
        "Imported {} dishes. Catalog stored at {}",
        catalog.len(),
        stored.display()
    );
    Ok(())
}

/// Plan one or more consecutive days over the same session.
fn cmd_plan(
    session: &mut MenuSession,
    config: &AppConfig,
    overrides: [Option<f64>; 3],
    date: Option<String>,
) -> Result<()> {
    let target = match overrides {
        [Some(protein), Some(fat), Some(carb)] => NutritionTarget::new(protein, fat, carb),
        [protein, fat, carb] => {
            let defaults = NutritionTarget::new(
                protein.unwrap_or(config.default_target.protein),
                fat.unwrap_or(config.default_target.fat),
                carb.unwrap_or(config.default_target.carb),
            );
            match prompt_nutrition_target(&defaults) {
                Ok(target) => target,
                Err(MenuError::InvalidInput(msg)) => {
                    eprintln!("Please enter valid nutrition targets: {}", msg);
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    };

    let mut ask_date = date.is_none();
    let mut next_date = date.unwrap_or_else(today);
    while let Some(recorded) = plan_day(session, target, &next_date, ask_date)? {
        if !prompt_yes_no("Plan another day?", false)? {
            break;
        }
        next_date = next_date_key(&recorded).unwrap_or_else(today);
        ask_date = true;
    }
    Ok(())
}

/// Suggest menus until one is confirmed. Returns the date it was recorded
/// under, or `None` if the user stopped.
fn plan_day(
    session: &mut MenuSession,
    target: NutritionTarget,
    default_date: &str,
    ask_date: bool,
) -> Result<Option<String>> {
    let mut menu = match session.generate_daily_menu(target, false) {
        Ok(menu) => menu,
        Err(MenuError::InvalidInput(msg)) => {
            eprintln!("Please enter valid nutrition targets: {}", msg);
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    loop {
        display_menu(&menu, &target);
        let action = prompt_menu_action()?;

        let mut date = String::new();
        if action == MenuAction::Confirm {
            date = if ask_date {
                prompt_date(default_date)?
            } else {
                default_date.to_string()
            };
            if session.get_menu_by_date(&date).is_some()
                && !prompt_yes_no(&format!("{} already has a menu. Replace it?", date), false)?
            {
                println!("Kept the existing menu for {}.", date);
                return Ok(None);
            }
        }

        match session.apply_action(action, &menu, target, &date)? {
            PlanStep::Suggested(next) => menu = next,
            PlanStep::Confirmed(warnings) => {
                display_warnings(&warnings);
                println!("Menu for {} saved.", date);
                display_history_entry(&date, session.get_menu_by_date(&date));
                return Ok(Some(date));
            }
            PlanStep::Discarded => {
                println!("Menu discarded.");
                return Ok(None);
            }
        }
    }
}

fn cmd_history(session: &MenuSession, date: Option<&str>) -> Result<()> {
    match date {
        Some(date) => display_history_entry(date, session.get_menu_by_date(date)),
        None => display_history_dates(session.history()),
    }
    Ok(())
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
