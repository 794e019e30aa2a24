use chrono::NaiveDate;
use dialoguer::{Confirm, Input, Select};

use crate::error::{MenuError, Result};
use crate::models::NutritionTarget;
pub use crate::session::MenuAction;

/// Format of date keys the CLI suggests.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a gram amount typed by the user.
pub fn parse_grams(label: &str, input: &str) -> Result<f64> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| MenuError::InvalidInput(format!("{} must be a number", label)))?;
    if !value.is_finite() || value < 0.0 {
        return Err(MenuError::InvalidInput(format!(
            "{} must be zero or more grams",
            label
        )));
    }
    Ok(value)
}

fn prompt_grams(label: &str, default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(format!("{} target (g)", label))
        .default(format!("{}", default))
        .interact_text()?;

    parse_grams(label, &input)
}

/// Prompt for the daily macro target, pre-filled with `defaults`.
pub fn prompt_nutrition_target(defaults: &NutritionTarget) -> Result<NutritionTarget> {
    let protein = prompt_grams("Protein", defaults.protein)?;
    let fat = prompt_grams("Fat", defaults.fat)?;
    let carb = prompt_grams("Carb", defaults.carb)?;
    Ok(NutritionTarget::new(protein, fat, carb))
}

/// Ask what to do with the generated menu.
pub fn prompt_menu_action() -> Result<MenuAction> {
    let options = ["Confirm this menu", "Regenerate", "Quit without saving"];
    let selection = Select::new()
        .with_prompt("What next?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(match selection {
        0 => MenuAction::Confirm,
        1 => MenuAction::Regenerate,
        _ => MenuAction::Quit,
    })
}

/// Prompt for the date key a menu is recorded under.
pub fn prompt_date(default: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt("Record menu for date")
        .default(default.to_string())
        .interact_text()?;

    let date = input.trim();
    if date.is_empty() {
        return Err(MenuError::InvalidInput("date must not be empty".to_string()));
    }
    Ok(date.to_string())
}

/// The day after `date` when it is a `YYYY-MM-DD` key. Other keys are opaque.
pub fn next_date_key(date: &str) -> Option<String> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .ok()
        .and_then(|d| d.succ_opt())
        .map(|d| d.format(DATE_FORMAT).to_string())
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
