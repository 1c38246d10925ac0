//! Staffing report for a single busy hour.
//!
//! Run with `RUST_LOG=debug` to watch the staffing search.

use chrono::{TimeZone, Utc};
use rvoip_staffing_core::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let window = TimeWindow::new(
        Utc.with_ymd_and_hms(2021, 4, 1, 8, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2021, 4, 1, 9, 0, 0).unwrap(),
    )?;
    let workload = WorkloadObservation::new(window, 390, 300.0)?;
    let target = StaffingTarget::new(0.8, 30.0)?;
    let config = StaffingConfig::default();

    let calculator = StaffingCalculator::new(workload, target)
        .with_max_iterations(config.search.max_iterations);

    println!("📞 Traffic intensity: {:.2} Erlangs", calculator.traffic_intensity());
    println!("{}", calculator.report(0.3, 20.0)?);

    println!("\nService level by headcount:");
    let raw = calculator.raw_agents()?;
    for agents in first_stable_agents(calculator.traffic_intensity())?..=raw + 2 {
        println!("  {:>3} agents: {:>5.1}%", agents, calculator.service_level(agents)?.max(0.0) * 100.0);
    }

    Ok(())
}
