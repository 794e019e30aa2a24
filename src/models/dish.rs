use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MenuError, Result};

/// Cooking effort of a dish. Harder dishes start with a lower weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Multiplier applied to the dish preference when its weight is first created.
    pub fn multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 0.9,
            Difficulty::Hard => 0.8,
        }
    }
}

impl FromStr for Difficulty {
    type Err = MenuError;

    /// Accepts `easy`/`medium`/`hard` in any case, and the single-character
    /// labels `易`/`中`/`难` found in older catalogs.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "易" => Ok(Difficulty::Easy),
            "medium" | "中" => Ok(Difficulty::Medium),
            "hard" | "难" => Ok(Difficulty::Hard),
            other => Err(MenuError::Validation(format!(
                "unrecognized difficulty '{}' (expected easy, medium or hard)",
                other
            ))),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(label)
    }
}

/// One catalog record.
///
/// The name is the primary key. `difficulty` keeps the label exactly as it
/// appeared in the catalog so that history snapshots reproduce the source row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carb: f64,
    pub preference: f64,
    pub difficulty: String,
    #[serde(default)]
    pub main_ingredients: String,
    #[serde(default)]
    pub side_ingredients: String,
    pub main_protein: String,
}

impl Dish {
    /// Parsed difficulty category.
    pub fn difficulty(&self) -> Result<Difficulty> {
        self.difficulty.parse()
    }

    /// Starting weight: preference scaled by the difficulty multiplier.
    pub fn initial_weight(&self) -> Result<f64> {
        Ok(self.preference * self.difficulty()?.multiplier())
    }

    /// Main ingredients split on ASCII or full-width commas, trimmed, empties dropped.
    pub fn main_ingredient_list(&self) -> Vec<&str> {
        split_ingredients(&self.main_ingredients)
    }

    /// Checks the record invariants a catalog row must satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MenuError::Validation("dish name must not be empty".to_string()));
        }

        let numeric = [
            ("calories", self.calories),
            ("protein", self.protein),
            ("fat", self.fat),
            ("carb", self.carb),
            ("preference", self.preference),
        ];
        for (field, value) in numeric {
            if !value.is_finite() || value < 0.0 {
                return Err(MenuError::Validation(format!(
                    "dish '{}': {} must be a non-negative number, got {}",
                    self.name, field, value
                )));
            }
        }

        self.difficulty()
            .map_err(|e| MenuError::Validation(format!("dish '{}': {}", self.name, e)))?;
        Ok(())
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{}: {} kcal, P:{} F:{} C:{}, pref:{} ({}), protein source: {}",
            self.name,
            self.calories,
            self.protein,
            self.fat,
            self.carb,
            self.preference,
            self.difficulty,
            self.main_protein
        )
    }
}

/// Split an ingredient field on `,` or `，`.
pub fn split_ingredients(field: &str) -> Vec<&str> {
    field
        .split([',', '，'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
