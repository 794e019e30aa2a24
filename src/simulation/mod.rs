pub mod output;
pub mod run;

pub use output::{print_summary, write_csv};
pub use run::{run_simulation, DayRecord, SimulationConfig, SimulationReport};
