use crate::models::{DailyMenu, Dish, Nutrient, NutritionTarget};
use crate::state::{IngredientInventory, MenuHistory, PersistenceWarning};

/// Width of the coverage bars, in characters.
const BAR_WIDTH: usize = 30;

/// Text bar for a coverage percentage, capped at full width.
pub fn coverage_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64)
        .round()
        .clamp(0.0, BAR_WIDTH as f64) as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Display a generated menu with how much of each target it covers.
pub fn display_menu(menu: &DailyMenu, target: &NutritionTarget) {
    println!();
    println!("=== Today's Menu ===");
    println!();
    println!("Lunch:  {} ({})", menu.lunch.name, menu.lunch.main_protein);
    println!("Dinner: {} ({})", menu.dinner.name, menu.dinner.main_protein);
    println!();

    let totals = [
        (Nutrient::Protein, menu.total_protein()),
        (Nutrient::Fat, menu.total_fat()),
        (Nutrient::Carb, menu.total_carb()),
    ];
    for (nutrient, amount) in totals {
        match target.coverage_percent(nutrient, amount) {
            Some(pct) => println!(
                "{:<8} {} {:>6.1}%  ({:.0} / {:.0} g)",
                nutrient.label(),
                coverage_bar(pct),
                pct,
                amount,
                target.get(nutrient)
            ),
            None => println!("{:<8} {:.0} g (no target)", nutrient.label(), amount),
        }
    }
    println!("Calories: {:.0} kcal", menu.total_calories());
    println!();
}

fn print_dish_detail(slot: &str, dish: &Dish) {
    println!("{}: {} ({})", slot, dish.name, dish.main_ingredients);
    println!(
        "  protein: {}g  fat: {}g  carb: {}g",
        dish.protein, dish.fat, dish.carb
    );
}

/// Display the confirmed menu for one date.
pub fn display_history_entry(date: &str, menu: Option<&DailyMenu>) {
    match menu {
        Some(menu) => {
            println!();
            println!("=== Menu for {} ===", date);
            println!();
            print_dish_detail("Lunch", &menu.lunch);
            println!();
            print_dish_detail("Dinner", &menu.dinner);
            println!();
        }
        None => println!("No menu recorded for {}", date),
    }
}

/// List every recorded date with its two dishes.
pub fn display_history_dates(history: &MenuHistory) {
    if history.is_empty() {
        println!("No menus recorded yet.");
        return;
    }

    println!();
    println!("=== Recorded Menus ({} days) ===", history.len());
    println!();
    for date in history.dates() {
        if let Some(menu) = history.get(date) {
            println!("  {}  {} / {}", date, menu.lunch.name, menu.dinner.name);
        }
    }
    println!();
}

/// Display ingredient usage counters.
pub fn display_inventory(inventory: &IngredientInventory) {
    if inventory.is_empty() {
        println!("Ingredient inventory is empty.");
        return;
    }

    println!();
    println!("=== Ingredient Inventory ===");
    println!();

    let width = inventory
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(10);
    for (name, usage) in inventory.iter() {
        println!(
            "  {:<width$}  used {:>3}x  total {:>3}",
            name,
            usage.count,
            usage.total_amount,
            width = width
        );
    }
    println!();
}

/// Display the catalog with each dish's current weight.
pub fn display_dish_list<F>(dishes: &[Dish], weight_of: F)
where
    F: Fn(&str) -> f64,
{
    println!();
    println!("=== Dishes ({} items) ===", dishes.len());
    println!();

    for dish in dishes {
        println!(
            "  {} - {} kcal, P:{} F:{} C:{}, {} ({}), weight {:.3}",
            dish.name,
            dish.calories,
            dish.protein,
            dish.fat,
            dish.carb,
            dish.main_protein,
            dish.difficulty,
            weight_of(&dish.name)
        );
    }
    println!();
}

/// Print persistence warnings without interrupting the flow.
pub fn display_warnings(warnings: &[PersistenceWarning]) {
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_bar() {
        assert_eq!(coverage_bar(0.0), format!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(coverage_bar(250.0), format!("[{}]", "#".repeat(BAR_WIDTH)));
        let half = coverage_bar(50.0);
        assert_eq!(half.matches('#').count(), BAR_WIDTH / 2);
    }
}
