use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MenuError, Result};
use crate::models::{DailyMenu, Dish, NutritionTarget};
use crate::selector::constants::*;
use crate::selector::sampling::weighted_random_choice;
use crate::selector::weights::{SharedWeights, WeightStore};
use crate::state::DishCatalog;

/// Tunable parameters of the selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorSettings {
    /// Capacity of the recency window, in picks.
    pub recent_days: usize,
    /// Multiplier for dishes still in the recency window.
    pub penalty: f64,
    /// Multiplier applied to every dish on each generation.
    pub long_term_reward: f64,
    /// Fixed RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SelectorSettings {
    fn default() -> Self {
        Self {
            recent_days: DEFAULT_RECENT_DAYS,
            penalty: DEFAULT_PENALTY,
            long_term_reward: DEFAULT_LONG_TERM_REWARD,
            seed: None,
        }
    }
}

impl SelectorSettings {
    /// Both multipliers must be finite and positive, or weights degenerate.
    pub fn validate(&self) -> Result<()> {
        let multipliers = [
            ("penalty", self.penalty),
            ("long_term_reward", self.long_term_reward),
        ];
        for (field, value) in multipliers {
            if !value.is_finite() || value <= 0.0 {
                return Err(MenuError::Validation(format!(
                    "selector {} must be a positive number, got {}",
                    field, value
                )));
            }
        }
        Ok(())
    }
}

/// Picks lunch and dinner from one catalog.
///
/// Owns the recency window and the previous pair for its lifetime; the
/// weight store is shared through a [`SharedWeights`] handle.
pub struct DishSelector {
    catalog: DishCatalog,
    weights: SharedWeights,
    settings: SelectorSettings,
    recent: VecDeque<String>,
    previous: Vec<String>,
    target: Option<NutritionTarget>,
    rng: StdRng,
}

impl DishSelector {
    /// Selector with its own weight store.
    pub fn new(catalog: DishCatalog, settings: SelectorSettings) -> Result<Self> {
        Self::with_weights(catalog, WeightStore::shared(), settings)
    }

    /// Selector over an existing, possibly shared, weight store.
    ///
    /// Dishes already present in the store keep their current weight.
    /// Invalid settings are rejected before the store is touched.
    pub fn with_weights(
        catalog: DishCatalog,
        weights: SharedWeights,
        settings: SelectorSettings,
    ) -> Result<Self> {
        settings.validate()?;
        let added = weights.borrow_mut().register(catalog.dishes())?;
        debug!(added, dishes = catalog.len(), "registered catalog weights");

        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            catalog,
            weights,
            settings,
            recent: VecDeque::new(),
            previous: Vec::new(),
            target: None,
            rng,
        })
    }

    pub fn catalog(&self) -> &DishCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &SelectorSettings {
        &self.settings
    }

    /// Another handle to the weight store.
    pub fn weights(&self) -> SharedWeights {
        SharedWeights::clone(&self.weights)
    }

    /// Current weight of a dish, 0.0 if unknown.
    pub fn weight_of(&self, name: &str) -> f64 {
        self.weights.borrow().weight(name)
    }

    /// Recency window, oldest first.
    pub fn recent_dishes(&self) -> impl Iterator<Item = &str> {
        self.recent.iter().map(String::as_str)
    }

    pub fn is_recent(&self, name: &str) -> bool {
        self.recent.iter().any(|n| n == name)
    }

    /// Names chosen by the last generation call.
    pub fn previous_selection(&self) -> &[String] {
        &self.previous
    }

    /// Target supplied to the last successful generation call.
    pub fn nutrition_target(&self) -> Option<NutritionTarget> {
        self.target
    }

    /// Forget the recency window and the previous pair. Weights are kept.
    pub fn reset_session_state(&mut self) {
        self.recent.clear();
        self.previous.clear();
        self.target = None;
    }

    /// Time-decay pass over the whole catalog.
    pub fn update_weights(&mut self) {
        let recent = &self.recent;
        self.weights.borrow_mut().apply_time_decay(
            self.catalog.dishes(),
            |name| recent.iter().any(|n| n == name),
            self.settings.penalty,
            self.settings.long_term_reward,
        );
    }

    /// Generate one day.
    ///
    /// With `regenerate`, the pair returned by the previous call is pushed
    /// further down before sampling. Nothing is persisted here. An invalid
    /// target is rejected before any state changes.
    pub fn generate_daily_menu(
        &mut self,
        target: NutritionTarget,
        regenerate: bool,
    ) -> Result<DailyMenu> {
        target.validate()?;
        self.target = Some(target);

        self.update_weights();
        if regenerate {
            self.penalize_previous();
        }

        let lunch = self.pick(|_| true).ok_or(MenuError::EmptyCatalog)?;
        self.remember(&lunch.name);

        let gap = target.gap_after(&lunch);
        self.weights
            .borrow_mut()
            .apply_nutrition_boost(self.catalog.dishes(), &gap);

        let dinner = match self.pick(|d| d.name != lunch.name && d.main_protein != lunch.main_protein)
        {
            Some(dish) => dish,
            None => {
                debug!(protein = %lunch.main_protein, "no other protein available, relaxing dinner pool");
                // A catalog always holds a second dish.
                self.pick(|d| d.name != lunch.name)
                    .ok_or(MenuError::EmptyCatalog)?
            }
        };
        self.remember(&dinner.name);

        self.previous = vec![lunch.name.clone(), dinner.name.clone()];

        {
            let mut weights = self.weights.borrow_mut();
            weights.scale(&lunch.name, SELECTION_REINFORCEMENT);
            weights.scale(&dinner.name, SELECTION_REINFORCEMENT);
        }

        debug!(lunch = %lunch.debug_string(), dinner = %dinner.debug_string(), regenerate, "generated daily menu");
        Ok(DailyMenu::new(lunch, dinner))
    }

    fn penalize_previous(&mut self) {
        let mut weights = self.weights.borrow_mut();
        for name in &self.previous {
            weights.scale(name, REGENERATE_PENALTY);
        }
    }

    /// Weighted pick among catalog dishes accepted by `filter`. `None` if
    /// the filter leaves no candidate.
    fn pick<F>(&mut self, filter: F) -> Option<Dish>
    where
        F: Fn(&Dish) -> bool,
    {
        let candidates: Vec<&Dish> = self.catalog.dishes().iter().filter(|d| filter(d)).collect();
        let weights = self.weights.borrow();
        weighted_random_choice(&mut self.rng, &weights, &candidates).cloned()
    }

    fn remember(&mut self, name: &str) {
        self.recent.push_back(name.to_string());
        while self.recent.len() > self.settings.recent_days {
            self.recent.pop_front();
        }
    }
}
