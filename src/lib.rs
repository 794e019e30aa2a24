pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod selector;
pub mod session;
pub mod simulation;
pub mod state;

pub use error::{MenuError, Result};
pub use models::{DailyMenu, Dish, NutritionTarget};
pub use selector::{DishSelector, SelectorSettings, SharedWeights, WeightStore};
pub use session::{MenuAction, MenuSession, PlanStep};
