//! Scenario tests for the staffing engine
//!
//! These tests walk the published reference calculations end to end through
//! the public API, from raw call counts and timestamps to the KPIs a planner
//! would report.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rvoip_staffing_core::prelude::*;

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 4, 1, hour, minute, 0).unwrap()
}

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}

#[test]
fn test_one_hour_390_calls() {
    let window = TimeWindow::new(at(8, 0), at(9, 0)).unwrap();
    assert_eq!(window.duration_seconds(), 3600.0);

    let traffic = compute_traffic_intensity(390, window.duration_seconds(), 300.0).unwrap();
    assert_close(traffic, 32.5, 1e-12);

    let agents = minimum_agents_required(traffic, 300.0, 30.0, 0.8, None).unwrap();
    assert_eq!(agents, 38);

    let c35 = erlang_c(traffic, 35).unwrap();
    assert_close(c35, 0.5701, 1e-4);
    assert_close(service_level(c35, traffic, 35, 300.0, 30.0).unwrap(), 0.5560, 1e-4);
}

#[test]
fn test_half_hour_100_calls() {
    let window = TimeWindow::new(at(8, 0), at(8, 30)).unwrap();
    let workload = WorkloadObservation::new(window, 100, 180.0).unwrap();
    assert_eq!(workload.calls_per_hour(), 200.0);
    assert_close(workload.traffic_intensity(), 10.0, 1e-12);

    let target = StaffingTarget::new(0.8, 20.0).unwrap();
    let calculator = StaffingCalculator::new(workload, target);

    // Worked example: 11 agents is stable but far from target
    assert_close(calculator.erlang_c(11).unwrap(), 0.6821, 1e-4);
    assert_close(calculator.service_level(11).unwrap(), 0.3896, 1e-4);
    assert_eq!(calculator.raw_agents().unwrap(), 14);
}

#[test]
fn test_shrinkage_on_reference_staffing() {
    assert_eq!(shrinkage_adjusted_agents(38, 0.3).unwrap(), 55);
}

#[test]
fn test_zero_traffic_any_target() {
    for target in [0.0, 0.25, 0.8, 0.99, 1.0] {
        assert_eq!(minimum_agents_required(0.0, 300.0, 30.0, target, None).unwrap(), 1);
    }
}

#[test]
fn test_invalid_target_service_level() {
    let err = StaffingTarget::new(1.5, 20.0).unwrap_err();
    assert!(matches!(err, StaffingError::InvalidInput(_)));

    let err = minimum_agents_required(10.0, 180.0, 20.0, 1.5, None).unwrap_err();
    assert!(matches!(err, StaffingError::InvalidInput(_)));
}

#[test]
fn test_full_report_for_one_hour_200_calls() {
    let window = TimeWindow::starting_at(at(8, 0), Duration::hours(1)).unwrap();
    let workload = WorkloadObservation::new(window, 200, 300.0).unwrap();
    let target = StaffingTarget::new(0.8, 20.0).unwrap();
    let config = StaffingConfig::default();

    let report = StaffingCalculator::new(workload, target)
        .with_max_iterations(config.search.max_iterations)
        .report(config.planning.shrinkage, config.planning.average_patience_secs)
        .unwrap();

    assert_eq!(report.raw_agents, 21);
    assert_eq!(report.scheduled_agents, 31);
    assert_close(report.traffic_intensity, 16.6667, 1e-4);
    assert_close(report.service_level, 0.8263, 1e-4);
    assert_close(report.average_speed_of_answer, 16.05, 1e-2);
    assert_close(report.occupancy, 0.7937, 1e-4);
    assert!(report.abandonment_probability > 0.0);
    assert!(report.abandonment_probability < report.erlang_c_probability);
}

#[test]
fn test_day_plan_from_toml_config() {
    let config = StaffingConfig::from_toml_str(
        r#"
        [search]
        max_iterations = 500

        [planning]
        shrinkage = 0.35
        average_patience_secs = 45.0
        "#,
    )
    .unwrap();

    let day = TimeWindow::new(at(8, 0), at(12, 0)).unwrap();
    let calls = [60u64, 120, 180, 210, 190, 150, 110, 70];
    let observations: Vec<_> = split_window(day, Duration::minutes(30))
        .unwrap()
        .into_iter()
        .zip(calls)
        .map(|(window, calls)| WorkloadObservation::new(window, calls, 240.0).unwrap())
        .collect();
    assert_eq!(observations.len(), 8);

    let target = StaffingTarget::new(0.85, 20.0).unwrap();
    let plan = plan_intervals(&observations, &target, &config).unwrap();

    assert_eq!(plan.summary.total_calls, calls.iter().sum::<u64>());
    let busiest = plan
        .intervals
        .iter()
        .max_by_key(|r| r.calls)
        .unwrap();
    assert_eq!(busiest.calls, 210);
    assert_eq!(plan.summary.peak_raw_agents, busiest.raw_agents);

    for report in &plan.intervals {
        assert!(report.service_level >= 0.85);
        assert_eq!(
            report.scheduled_agents,
            shrinkage_adjusted_agents(report.raw_agents, 0.35).unwrap()
        );
        assert_eq!(report.average_patience, 45.0);
    }
}
