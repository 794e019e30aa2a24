mod dish;
mod menu;
mod nutrition;

pub use dish::{split_ingredients, Difficulty, Dish};
pub use menu::DailyMenu;
pub use nutrition::{Nutrient, NutritionGap, NutritionTarget};
