#[macro_use]
extern crate assert_float_eq;

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;

use daily_menu_rs::models::{Dish, NutritionTarget};
use daily_menu_rs::selector::{
    weighted_random_choice, DishSelector, SelectorSettings, WeightStore, DEFAULT_LONG_TERM_REWARD,
    DEFAULT_PENALTY, REGENERATE_PENALTY, SELECTION_REINFORCEMENT,
};
use daily_menu_rs::state::DishCatalog;

fn make_dish(name: &str, main_protein: &str, preference: f64, difficulty: &str) -> Dish {
    Dish {
        name: name.to_string(),
        calories: 450.0,
        protein: 22.0,
        fat: 14.0,
        carb: 38.0,
        preference,
        difficulty: difficulty.to_string(),
        main_ingredients: "rice, scallion".to_string(),
        side_ingredients: "ginger".to_string(),
        main_protein: main_protein.to_string(),
    }
}

fn sample_dishes() -> Vec<Dish> {
    vec![
        make_dish("Braised beef", "beef", 0.9, "hard"),
        make_dish("Twice-cooked pork", "pork", 0.8, "medium"),
        make_dish("Steamed fish", "fish", 0.7, "easy"),
        make_dish("Kung pao chicken", "chicken", 1.0, "medium"),
        make_dish("Mapo tofu", "tofu", 0.6, "easy"),
        make_dish("Pork dumplings", "pork", 0.5, "hard"),
    ]
}

fn seeded_selector(dishes: Vec<Dish>, seed: u64) -> DishSelector {
    let catalog = DishCatalog::from_dishes(dishes).unwrap();
    let settings = SelectorSettings {
        seed: Some(seed),
        ..Default::default()
    };
    DishSelector::new(catalog, settings).unwrap()
}

/// Zero target: every gap is non-positive, so no nutrition boost applies.
fn no_boost_target() -> NutritionTarget {
    NutritionTarget::new(0.0, 0.0, 0.0)
}

#[test]
fn test_every_dish_gets_one_initial_weight() {
    let selector = seeded_selector(sample_dishes(), 1);
    let weights = selector.weights();
    let store = weights.borrow();

    assert_eq!(store.len(), sample_dishes().len());
    for dish in sample_dishes() {
        let expected = dish.initial_weight().unwrap();
        assert_float_absolute_eq!(store.get(&dish.name).unwrap(), expected, 1e-12);
    }
    assert_float_absolute_eq!(store.weight("Braised beef"), 0.9 * 0.8, 1e-12);
    assert_float_absolute_eq!(store.weight("Kung pao chicken"), 0.9, 1e-12);
}

#[test]
fn test_shared_store_is_not_reset_by_another_catalog() {
    let shared = WeightStore::shared();
    let settings = SelectorSettings {
        seed: Some(4),
        ..Default::default()
    };

    let first = DishSelector::with_weights(
        DishCatalog::from_dishes(sample_dishes()).unwrap(),
        shared.clone(),
        settings.clone(),
    )
    .unwrap();
    shared.borrow_mut().scale("Mapo tofu", 2.0);

    let second_catalog = DishCatalog::from_dishes(vec![
        make_dish("Mapo tofu", "tofu", 0.1, "easy"),
        make_dish("Egg fried rice", "egg", 0.4, "easy"),
    ])
    .unwrap();
    let second = DishSelector::with_weights(second_catalog, shared.clone(), settings).unwrap();

    assert_eq!(shared.borrow().len(), sample_dishes().len() + 1);
    assert_float_absolute_eq!(second.weight_of("Mapo tofu"), 1.2, 1e-12);
    assert_float_absolute_eq!(first.weight_of("Egg fried rice"), 0.4, 1e-12);
}

#[test]
fn test_update_weights_penalizes_only_recent_dishes() {
    let mut selector = seeded_selector(sample_dishes(), 8);
    selector.generate_daily_menu(NutritionTarget::default(), false).unwrap();

    let before: HashMap<String, f64> = sample_dishes()
        .iter()
        .map(|d| (d.name.clone(), selector.weight_of(&d.name)))
        .collect();
    let recent: Vec<String> = selector.recent_dishes().map(str::to_string).collect();
    assert_eq!(recent.len(), 2);

    selector.update_weights();

    for dish in sample_dishes() {
        let ratio = selector.weight_of(&dish.name) / before[&dish.name];
        let expected = if recent.contains(&dish.name) {
            DEFAULT_PENALTY * DEFAULT_LONG_TERM_REWARD
        } else {
            DEFAULT_LONG_TERM_REWARD
        };
        assert_float_absolute_eq!(ratio, expected, 1e-9);
    }
}

#[test]
fn test_weighted_choice_converges_to_weight_ratio() {
    let heavy = make_dish("Heavy", "beef", 3.0, "easy");
    let light = make_dish("Light", "pork", 1.0, "easy");
    let mut store = WeightStore::new();
    store.register([&heavy, &light]).unwrap();

    let candidates = vec![&heavy, &light];
    let mut rng = StdRng::seed_from_u64(2024);
    let mut heavy_count = 0usize;
    let mut light_count = 0usize;
    for _ in 0..10_000 {
        let pick = weighted_random_choice(&mut rng, &store, &candidates).unwrap();
        assert!(pick.name == "Heavy" || pick.name == "Light");
        if pick.name == "Heavy" {
            heavy_count += 1;
        } else {
            light_count += 1;
        }
    }

    let ratio = heavy_count as f64 / light_count as f64;
    assert!(
        (2.7..=3.3).contains(&ratio),
        "expected roughly 3:1, got {}:{}",
        heavy_count,
        light_count
    );
}

#[test]
fn test_dinner_protein_differs_from_lunch() {
    let mut selector = seeded_selector(sample_dishes(), 99);
    for _ in 0..300 {
        let menu = selector
            .generate_daily_menu(NutritionTarget::default(), false)
            .unwrap();
        assert_ne!(menu.lunch.name, menu.dinner.name);
        assert_ne!(
            menu.lunch.main_protein, menu.dinner.main_protein,
            "{} and {} share a protein source",
            menu.lunch.name, menu.dinner.name
        );
    }
}

#[test]
fn test_single_protein_catalog_still_gives_distinct_dishes() {
    let dishes = vec![
        make_dish("Pork ribs", "pork", 0.8, "medium"),
        make_dish("Pork buns", "pork", 0.7, "easy"),
        make_dish("Pork noodles", "pork", 0.9, "easy"),
    ];
    let mut selector = seeded_selector(dishes, 17);
    for _ in 0..100 {
        let menu = selector
            .generate_daily_menu(NutritionTarget::default(), false)
            .unwrap();
        assert_ne!(menu.lunch.name, menu.dinner.name);
    }
}

#[test]
fn test_regenerate_applies_extra_penalty_to_previous_pair() {
    for seed in 0..20 {
        let mut plain = seeded_selector(sample_dishes(), seed);
        let mut regen = seeded_selector(sample_dishes(), seed);

        let first_plain = plain.generate_daily_menu(no_boost_target(), false).unwrap();
        let first_regen = regen.generate_daily_menu(no_boost_target(), false).unwrap();
        assert_eq!(first_plain, first_regen);

        let names = [first_regen.lunch.name.clone(), first_regen.dinner.name.clone()];
        let before: Vec<f64> = names.iter().map(|n| regen.weight_of(n)).collect();

        let second = regen.generate_daily_menu(no_boost_target(), true).unwrap();

        // Both are in the recency window, then take the regenerate penalty.
        let base = DEFAULT_PENALTY * DEFAULT_LONG_TERM_REWARD * REGENERATE_PENALTY;
        for (name, before) in names.iter().zip(&before) {
            let chosen_again = &second.lunch.name == name || &second.dinner.name == name;
            let expected = if chosen_again {
                base * SELECTION_REINFORCEMENT
            } else {
                base
            };
            assert_float_absolute_eq!(regen.weight_of(name) / before, expected, 1e-9);
            assert!(regen.weight_of(name) < *before);
        }
        assert_eq!(regen.previous_selection(), &[second.lunch.name, second.dinner.name]);
    }
}

#[test]
fn test_zero_total_weight_does_not_panic() {
    let dishes = vec![
        make_dish("Plain rice", "none", 0.0, "easy"),
        make_dish("Plain noodles", "none", 0.0, "easy"),
        make_dish("Plain bun", "none", 0.0, "hard"),
    ];
    let mut selector = seeded_selector(dishes, 5);
    for _ in 0..50 {
        let menu = selector.generate_daily_menu(no_boost_target(), false).unwrap();
        assert_ne!(menu.lunch.name, menu.dinner.name);
    }
    assert_eq!(selector.weight_of("Plain rice"), 0.0);
}

#[test]
fn test_nutrition_gap_raises_weights() {
    let mut selector = seeded_selector(sample_dishes(), 31);
    let before: f64 = sample_dishes()
        .iter()
        .map(|d| selector.weight_of(&d.name))
        .sum();

    // A huge target leaves every nutrient open after lunch.
    selector
        .generate_daily_menu(NutritionTarget::new(1000.0, 1000.0, 1000.0), false)
        .unwrap();

    let boost_per_dish = 22.0 * 0.10 + 14.0 * 0.05 + 38.0 * 0.08;
    for dish in sample_dishes() {
        assert!(selector.weight_of(&dish.name) >= boost_per_dish);
    }
    let after: f64 = sample_dishes()
        .iter()
        .map(|d| selector.weight_of(&d.name))
        .sum();
    assert!(after > before);
}
