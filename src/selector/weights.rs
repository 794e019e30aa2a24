use std::cell::RefCell;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::rc::Rc;

use tracing::debug;

use crate::error::Result;
use crate::models::{Dish, NutritionGap};

/// Handle to a weight store that several selectors may share.
///
/// The engine is single-threaded, so plain `Rc<RefCell<_>>` is enough.
pub type SharedWeights = Rc<RefCell<WeightStore>>;

/// Desirability weight per dish name.
///
/// Entries are created once, when a catalog is first registered, and are
/// never removed. Only the update rules in this module mutate them.
#[derive(Debug, Clone, Default)]
pub struct WeightStore {
    weights: HashMap<String, f64>,
}

impl WeightStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a fresh store in a shareable handle.
    pub fn shared() -> SharedWeights {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Add an entry for every dish not already present.
    ///
    /// Existing weights are left alone, so registering the same catalog
    /// twice is a no-op. Returns how many entries were created. Nothing is
    /// inserted if any dish has an unrecognized difficulty.
    pub fn register<'a, I>(&mut self, dishes: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a Dish>,
    {
        let mut fresh = Vec::new();
        for dish in dishes {
            if !self.weights.contains_key(&dish.name) {
                fresh.push((dish.name.clone(), dish.initial_weight()?));
            }
        }

        let mut added = 0;
        for (name, weight) in fresh {
            if let Entry::Vacant(slot) = self.weights.entry(name) {
                slot.insert(weight);
                added += 1;
            }
        }
        Ok(added)
    }

    /// Current weight, or 0.0 for an unknown dish.
    pub fn weight(&self, name: &str) -> f64 {
        self.weights.get(name).copied().unwrap_or(0.0)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.weights.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.weights.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of the weights of `dishes`.
    pub fn total<'a, I>(&self, dishes: I) -> f64
    where
        I: IntoIterator<Item = &'a Dish>,
    {
        dishes.into_iter().map(|d| self.weight(&d.name)).sum()
    }

    /// Multiply one weight in place. Unknown names are ignored.
    pub fn scale(&mut self, name: &str, factor: f64) {
        if let Some(w) = self.weights.get_mut(name) {
            *w *= factor;
        }
    }

    /// Add to one weight in place. Unknown names are ignored.
    pub fn add(&mut self, name: &str, delta: f64) {
        if let Some(w) = self.weights.get_mut(name) {
            *w += delta;
        }
    }

    /// Time-decay pass: recent dishes are multiplied by `penalty`, then
    /// every dish is multiplied by `long_term_reward`.
    pub fn apply_time_decay<F>(
        &mut self,
        dishes: &[Dish],
        is_recent: F,
        penalty: f64,
        long_term_reward: f64,
    ) where
        F: Fn(&str) -> bool,
    {
        let mut penalized = 0;
        for dish in dishes {
            if is_recent(&dish.name) {
                self.scale(&dish.name, penalty);
                penalized += 1;
            }
            self.scale(&dish.name, long_term_reward);
        }
        debug!(penalized, total = dishes.len(), "applied time decay");
    }

    /// Nutrition-gap boost: for every nutrient still under target, each
    /// dish gains `grams * factor`. Surplus nutrients never lower a weight.
    pub fn apply_nutrition_boost(&mut self, dishes: &[Dish], gap: &NutritionGap) {
        for nutrient in gap.open_nutrients() {
            let factor = nutrient.boost_factor();
            for dish in dishes {
                self.add(&dish.name, nutrient.of(dish) * factor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(name: &str, preference: f64, difficulty: &str, protein: f64) -> Dish {
        Dish {
            name: name.to_string(),
            calories: 400.0,
            protein,
            fat: 10.0,
            carb: 20.0,
            preference,
            difficulty: difficulty.to_string(),
            main_ingredients: String::new(),
            side_ingredients: String::new(),
            main_protein: "tofu".to_string(),
        }
    }

    #[test]
    fn test_register_uses_initial_weight() {
        let dishes = vec![dish("A", 1.0, "easy", 10.0), dish("B", 0.5, "hard", 10.0)];
        let mut store = WeightStore::new();
        assert_eq!(store.register(&dishes).unwrap(), 2);
        assert_eq!(store.weight("A"), 1.0);
        assert!((store.weight("B") - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_register_is_idempotent() {
        let dishes = vec![dish("A", 1.0, "easy", 10.0)];
        let mut store = WeightStore::new();
        store.register(&dishes).unwrap();
        store.scale("A", 0.5);

        assert_eq!(store.register(&dishes).unwrap(), 0);
        assert_eq!(store.weight("A"), 0.5);
    }

    #[test]
    fn test_register_rejects_bad_difficulty_atomically() {
        let dishes = vec![dish("A", 1.0, "easy", 10.0), dish("B", 1.0, "??", 10.0)];
        let mut store = WeightStore::new();
        assert!(store.register(&dishes).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_time_decay() {
        let dishes = vec![dish("A", 1.0, "easy", 10.0), dish("B", 1.0, "easy", 10.0)];
        let mut store = WeightStore::new();
        store.register(&dishes).unwrap();

        store.apply_time_decay(&dishes, |name| name == "A", 0.3, 1.01);
        assert!((store.weight("A") - 0.303).abs() < 1e-12);
        assert!((store.weight("B") - 1.01).abs() < 1e-12);
    }

    #[test]
    fn test_nutrition_boost_only_for_positive_gap() {
        let dishes = vec![dish("A", 1.0, "easy", 20.0)];
        let mut store = WeightStore::new();
        store.register(&dishes).unwrap();

        let gap = NutritionGap {
            protein: 5.0,
            fat: -3.0,
            carb: 0.0,
        };
        store.apply_nutrition_boost(&dishes, &gap);
        // Only protein is open: 20 g * 0.10
        assert!((store.weight("A") - 3.0).abs() < 1e-12);
    }
}
