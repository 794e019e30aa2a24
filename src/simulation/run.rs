use std::collections::HashSet;

use tracing::info;

use crate::error::Result;
use crate::models::NutritionTarget;
use crate::selector::{DishSelector, SelectorSettings};
use crate::state::DishCatalog;

/// Configuration for a simulated run.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub days: usize,
    /// How many times each day's suggestion is rejected before one is kept.
    pub regenerations_per_day: usize,
    pub target: NutritionTarget,
    pub settings: SelectorSettings,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            days: 30,
            regenerations_per_day: 0,
            target: NutritionTarget::default(),
            settings: SelectorSettings {
                seed: Some(123),
                ..Default::default()
            },
        }
    }
}

/// What happened on one simulated day.
#[derive(Debug, Clone)]
pub struct DayRecord {
    pub day: usize,
    pub lunch: String,
    pub dinner: String,
    /// Kept dish was in the recency window at the start of the day.
    pub repeated_recent: bool,
    /// Dinner shares lunch's protein source because no other was available.
    pub protein_rule_relaxed: bool,
    pub total_weight: f64,
    pub min_weight: f64,
    pub max_weight: f64,
}

/// Outcome of a simulated run.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub initial_total_weight: f64,
    pub days: Vec<DayRecord>,
    pub distinct_dishes: usize,
    pub catalog_size: usize,
}

impl SimulationReport {
    pub fn final_total_weight(&self) -> f64 {
        self.days
            .last()
            .map(|d| d.total_weight)
            .unwrap_or(self.initial_total_weight)
    }

    /// Final total weight relative to the starting total.
    pub fn weight_drift(&self) -> f64 {
        if self.initial_total_weight > 0.0 {
            self.final_total_weight() / self.initial_total_weight
        } else {
            0.0
        }
    }

    pub fn repeated_days(&self) -> usize {
        self.days.iter().filter(|d| d.repeated_recent).count()
    }

    pub fn relaxed_days(&self) -> usize {
        self.days.iter().filter(|d| d.protein_rule_relaxed).count()
    }
}

fn weight_stats(selector: &DishSelector) -> (f64, f64, f64) {
    let weights: Vec<f64> = selector
        .catalog()
        .dishes()
        .iter()
        .map(|d| selector.weight_of(&d.name))
        .collect();
    let total = weights.iter().sum();
    let min = weights.iter().copied().fold(f64::INFINITY, f64::min);
    let max = weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (total, min, max)
}

/// Run the selector for `config.days` days without touching any ledger.
pub fn run_simulation(catalog: DishCatalog, config: &SimulationConfig) -> Result<SimulationReport> {
    let catalog_size = catalog.len();
    let mut selector = DishSelector::new(catalog, config.settings.clone())?;
    let (initial_total_weight, _, _) = weight_stats(&selector);

    let mut days = Vec::with_capacity(config.days);
    let mut served: HashSet<String> = HashSet::new();

    for day in 1..=config.days {
        let recent_before: HashSet<String> =
            selector.recent_dishes().map(str::to_string).collect();

        let mut menu = selector.generate_daily_menu(config.target, false)?;
        for _ in 0..config.regenerations_per_day {
            menu = selector.generate_daily_menu(config.target, true)?;
        }

        let repeated_recent =
            recent_before.contains(&menu.lunch.name) || recent_before.contains(&menu.dinner.name);
        let protein_rule_relaxed = menu.lunch.main_protein == menu.dinner.main_protein;
        let (total_weight, min_weight, max_weight) = weight_stats(&selector);

        served.insert(menu.lunch.name.clone());
        served.insert(menu.dinner.name.clone());

        days.push(DayRecord {
            day,
            lunch: menu.lunch.name,
            dinner: menu.dinner.name,
            repeated_recent,
            protein_rule_relaxed,
            total_weight,
            min_weight,
            max_weight,
        });

        // Progress indicator every 10%
        if day % (config.days / 10).max(1) == 0 {
            let pct = (day as f64 / config.days as f64) * 100.0;
            eprint!("\r{:.0}% complete", pct);
        }
    }
    if config.days > 0 {
        eprintln!();
    }

    info!(days = config.days, distinct = served.len(), "simulation finished");

    Ok(SimulationReport {
        initial_total_weight,
        days,
        distinct_dishes: served.len(),
        catalog_size,
    })
}
