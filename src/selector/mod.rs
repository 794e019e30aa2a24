pub mod constants;
pub mod engine;
pub mod sampling;
pub mod weights;

pub use constants::*;
pub use engine::{DishSelector, SelectorSettings};
pub use sampling::weighted_random_choice;
pub use weights::{SharedWeights, WeightStore};
