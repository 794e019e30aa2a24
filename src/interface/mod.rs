pub mod prompts;
pub mod render;

pub use prompts::{
    next_date_key, parse_grams, prompt_date, prompt_menu_action, prompt_nutrition_target,
    prompt_yes_no, MenuAction,
};
pub use render::{
    coverage_bar, display_dish_list, display_history_dates, display_history_entry,
    display_inventory, display_menu, display_warnings,
};
