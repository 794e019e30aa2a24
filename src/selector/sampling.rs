use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Dish;
use crate::selector::weights::WeightStore;

/// Roulette-wheel pick proportional to each candidate's stored weight.
///
/// Draws uniformly from `[0, total)` and returns the first candidate whose
/// running cumulative weight exceeds the draw, so a zero-weight candidate is
/// never picked while any other weight is positive. A non-positive or
/// non-finite total falls back to a uniform pick. `None` only for an empty
/// candidate list.
pub fn weighted_random_choice<'a, R>(
    rng: &mut R,
    weights: &WeightStore,
    candidates: &[&'a Dish],
) -> Option<&'a Dish>
where
    R: Rng,
{
    if candidates.is_empty() {
        return None;
    }

    let total = weights.total(candidates.iter().copied());
    if !(total.is_finite() && total > 0.0) {
        return candidates.choose(rng).copied();
    }

    let draw = rng.gen_range(0.0..total);
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for &dish in candidates {
        let w = weights.weight(&dish.name);
        if w > 0.0 {
            last_positive = Some(dish);
        }
        cumulative += w;
        if cumulative > draw {
            return Some(dish);
        }
    }

    // Rounding can leave the draw a hair above the final cumulative sum.
    last_positive.or_else(|| candidates.last().copied())
}
