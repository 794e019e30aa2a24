use std::path::Path;

use crate::error::Result;
use crate::simulation::run::SimulationReport;

/// Write one row per simulated day to a CSV file.
pub fn write_csv(report: &SimulationReport, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "day",
        "lunch",
        "dinner",
        "repeated_recent",
        "protein_rule_relaxed",
        "total_weight",
        "min_weight",
        "max_weight",
    ])?;

    for day in &report.days {
        wtr.write_record([
            day.day.to_string(),
            day.lunch.clone(),
            day.dinner.clone(),
            day.repeated_recent.to_string(),
            day.protein_rule_relaxed.to_string(),
            format!("{:.4}", day.total_weight),
            format!("{:.4}", day.min_weight),
            format!("{:.4}", day.max_weight),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Print a summary of the run to stdout.
pub fn print_summary(report: &SimulationReport) {
    println!("\n=== Simulation Summary ({} days) ===\n", report.days.len());
    println!(
        "Distinct dishes served: {} of {}",
        report.distinct_dishes, report.catalog_size
    );
    println!("Days repeating a recent dish: {}", report.repeated_days());
    println!("Days with relaxed protein rule: {}", report.relaxed_days());
    println!(
        "Total weight: {:.3} -> {:.3} ({:.2}x)",
        report.initial_total_weight,
        report.final_total_weight(),
        report.weight_drift()
    );

    if let Some(last) = report.days.last() {
        let spread = if last.min_weight > 0.0 {
            format!("{:.1}x", last.max_weight / last.min_weight)
        } else {
            "unbounded".to_string()
        };
        println!(
            "Final weight range: {:.3} .. {:.3} (spread {})",
            last.min_weight, last.max_weight, spread
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::run::DayRecord;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_csv() {
        let report = SimulationReport {
            initial_total_weight: 2.0,
            days: vec![DayRecord {
                day: 1,
                lunch: "Beef stew".to_string(),
                dinner: "Mapo tofu".to_string(),
                repeated_recent: false,
                protein_rule_relaxed: false,
                total_weight: 3.5,
                min_weight: 1.0,
                max_weight: 2.5,
            }],
            distinct_dishes: 2,
            catalog_size: 2,
        };

        let file = NamedTempFile::new().unwrap();
        write_csv(&report, file.path()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let mut lines = content.lines();
        assert!(lines.next().unwrap().starts_with("day,lunch,dinner"));
        assert_eq!(
            lines.next().unwrap(),
            "1,Beef stew,Mapo tofu,false,false,3.5000,1.0000,2.5000"
        );
    }
}
