use serde::{Deserialize, Serialize};

use crate::error::{MenuError, Result};
use crate::models::Dish;

/// The three macro-nutrients the selector steers toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nutrient {
    Protein,
    Fat,
    Carb,
}

impl Nutrient {
    pub const ALL: [Nutrient; 3] = [Nutrient::Protein, Nutrient::Fat, Nutrient::Carb];

    /// Weight added per gram of this nutrient when the day still has a gap.
    pub fn boost_factor(self) -> f64 {
        match self {
            Nutrient::Protein => 0.10,
            Nutrient::Fat => 0.05,
            Nutrient::Carb => 0.08,
        }
    }

    /// Grams of this nutrient in one serving of `dish`.
    pub fn of(self, dish: &Dish) -> f64 {
        match self {
            Nutrient::Protein => dish.protein,
            Nutrient::Fat => dish.fat,
            Nutrient::Carb => dish.carb,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Nutrient::Protein => "protein",
            Nutrient::Fat => "fat",
            Nutrient::Carb => "carb",
        }
    }
}

/// Daily macro targets in grams. Supplied fresh on every generation call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionTarget {
    pub protein: f64,
    pub fat: f64,
    pub carb: f64,
}

impl Default for NutritionTarget {
    fn default() -> Self {
        Self {
            protein: 70.0,
            fat: 50.0,
            carb: 100.0,
        }
    }
}

impl NutritionTarget {
    pub fn new(protein: f64, fat: f64, carb: f64) -> Self {
        Self { protein, fat, carb }
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Protein => self.protein,
            Nutrient::Fat => self.fat,
            Nutrient::Carb => self.carb,
        }
    }

    /// Every target must be a finite, non-negative number of grams.
    pub fn validate(&self) -> Result<()> {
        for nutrient in Nutrient::ALL {
            let value = self.get(nutrient);
            if !value.is_finite() || value < 0.0 {
                return Err(MenuError::InvalidInput(format!(
                    "{} target must be a non-negative number, got {}",
                    nutrient.label(),
                    value
                )));
            }
        }
        Ok(())
    }

    /// What is left of the target after eating `dish`. Negative on surplus.
    pub fn gap_after(&self, dish: &Dish) -> NutritionGap {
        NutritionGap {
            protein: self.protein - dish.protein,
            fat: self.fat - dish.fat,
            carb: self.carb - dish.carb,
        }
    }

    /// Share of the target covered by `amount`, in percent. `None` for a zero target.
    pub fn coverage_percent(&self, nutrient: Nutrient, amount: f64) -> Option<f64> {
        let target = self.get(nutrient);
        if target > 0.0 {
            Some(amount / target * 100.0)
        } else {
            None
        }
    }
}

/// Per-nutrient remainder after lunch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NutritionGap {
    pub protein: f64,
    pub fat: f64,
    pub carb: f64,
}

impl NutritionGap {
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Protein => self.protein,
            Nutrient::Fat => self.fat,
            Nutrient::Carb => self.carb,
        }
    }

    /// Nutrients that are still under target.
    pub fn open_nutrients(&self) -> impl Iterator<Item = Nutrient> + '_ {
        Nutrient::ALL.into_iter().filter(|&n| self.get(n) > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lunch() -> Dish {
        Dish {
            name: "Beef noodles".to_string(),
            calories: 600.0,
            protein: 30.0,
            fat: 60.0,
            carb: 80.0,
            preference: 0.7,
            difficulty: "easy".to_string(),
            main_ingredients: "beef, noodles".to_string(),
            side_ingredients: String::new(),
            main_protein: "beef".to_string(),
        }
    }

    #[test]
    fn test_gap_can_be_negative() {
        let target = NutritionTarget::default();
        let gap = target.gap_after(&lunch());
        assert_eq!(gap.protein, 40.0);
        assert_eq!(gap.fat, -10.0);
        assert_eq!(gap.carb, 20.0);

        let open: Vec<Nutrient> = gap.open_nutrients().collect();
        assert_eq!(open, vec![Nutrient::Protein, Nutrient::Carb]);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(NutritionTarget::default().validate().is_ok());
        assert!(NutritionTarget::new(0.0, 0.0, 0.0).validate().is_ok());
        assert!(NutritionTarget::new(-1.0, 50.0, 100.0).validate().is_err());
        assert!(NutritionTarget::new(70.0, f64::NAN, 100.0).validate().is_err());
        assert!(NutritionTarget::new(70.0, 50.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_coverage_percent() {
        let target = NutritionTarget::default();
        assert_eq!(target.coverage_percent(Nutrient::Protein, 35.0), Some(50.0));
        let zero = NutritionTarget::new(0.0, 50.0, 100.0);
        assert_eq!(zero.coverage_percent(Nutrient::Protein, 35.0), None);
    }
}
