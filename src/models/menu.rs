use serde::{Deserialize, Serialize};

use crate::models::Dish;

/// A generated or confirmed day: one lunch and one dinner.
///
/// Serialized as a two-element JSON array `[lunch, dinner]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(Dish, Dish)", into = "(Dish, Dish)")]
pub struct DailyMenu {
    pub lunch: Dish,
    pub dinner: Dish,
}

impl DailyMenu {
    pub fn new(lunch: Dish, dinner: Dish) -> Self {
        Self { lunch, dinner }
    }

    /// Both dishes in serving order.
    pub fn dishes(&self) -> [&Dish; 2] {
        [&self.lunch, &self.dinner]
    }

    pub fn total_protein(&self) -> f64 {
        self.lunch.protein + self.dinner.protein
    }

    pub fn total_fat(&self) -> f64 {
        self.lunch.fat + self.dinner.fat
    }

    pub fn total_carb(&self) -> f64 {
        self.lunch.carb + self.dinner.carb
    }

    pub fn total_calories(&self) -> f64 {
        self.lunch.calories + self.dinner.calories
    }
}

impl From<(Dish, Dish)> for DailyMenu {
    fn from((lunch, dinner): (Dish, Dish)) -> Self {
        Self { lunch, dinner }
    }
}

impl From<DailyMenu> for (Dish, Dish) {
    fn from(menu: DailyMenu) -> Self {
        (menu.lunch, menu.dinner)
    }
}
