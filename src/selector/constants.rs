/// Number of most recent picks that count as "recently served".
pub const DEFAULT_RECENT_DAYS: usize = 3;

/// Weight multiplier for a dish still inside the recency window.
pub const DEFAULT_PENALTY: f64 = 0.3;

/// Weight multiplier applied to every dish on each generation.
pub const DEFAULT_LONG_TERM_REWARD: f64 = 1.01;

/// Extra multiplier on the previous pair when the caller asks for an alternative.
pub const REGENERATE_PENALTY: f64 = 0.7;

/// Multiplier applied to both dishes after they are chosen.
pub const SELECTION_REINFORCEMENT: f64 = 1.05;
