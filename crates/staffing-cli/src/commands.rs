use std::path::Path;

use anyhow::{Context, Result};
use chrono::Duration;
use serde::Deserialize;
use tracing::{debug, info};

use rvoip_staffing_core::prelude::*;

use crate::cli::{CalcArgs, OutputFormat, PlanArgs};

/// Scenario file for `plan`
///
/// ```toml
/// [target]
/// service_level = 0.8
/// answer_time_secs = 20
///
/// [[intervals]]
/// calls = 100
/// average_handling_time = 180
/// window = { start = "2021-04-01T08:00:00Z", end = "2021-04-01T08:30:00Z" }
/// ```
#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub target: StaffingTarget,
    /// Overrides the global configuration when present
    #[serde(default)]
    pub config: Option<StaffingConfig>,
    #[serde(default)]
    pub intervals: Vec<WorkloadObservation>,
}

impl Scenario {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(raw).context("invalid scenario")?;
        if let Some(config) = &scenario.config {
            config
                .validate()
                .map_err(anyhow::Error::msg)
                .context("invalid scenario config")?;
        }
        Ok(scenario)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("in {}", path.display()))
    }
}

/// Apply command-line overrides on top of the loaded configuration
pub fn calc_config(base: &StaffingConfig, args: &CalcArgs) -> Result<StaffingConfig> {
    let mut config = base.clone();
    if let Some(shrinkage) = args.shrinkage {
        config.planning.shrinkage = shrinkage;
    }
    if let Some(patience) = args.patience {
        config.planning.average_patience_secs = patience;
    }
    apply_search_cap(&mut config, args.max_iterations, args.unbounded);
    config.validate().map_err(anyhow::Error::msg)?;
    Ok(config)
}

/// Scenario configuration (or the global one) with the `plan` search overrides
pub fn plan_config(
    base: &StaffingConfig,
    scenario: &Scenario,
    args: &PlanArgs,
) -> Result<StaffingConfig> {
    let mut config = scenario.config.clone().unwrap_or_else(|| base.clone());
    apply_search_cap(&mut config, args.max_iterations, args.unbounded);
    config.validate().map_err(anyhow::Error::msg)?;
    Ok(config)
}

fn apply_search_cap(config: &mut StaffingConfig, max_iterations: Option<u32>, unbounded: bool) {
    if unbounded {
        config.search.max_iterations = None;
    } else if let Some(cap) = max_iterations {
        config.search.max_iterations = Some(cap);
    }
}

pub fn run_calc(args: &CalcArgs, base: &StaffingConfig, output: OutputFormat) -> Result<String> {
    let config = calc_config(base, args)?;
    let period = Duration::try_minutes(args.period_minutes).context("period out of range")?;
    let window = TimeWindow::starting_at(args.start, period)?;
    let workload = WorkloadObservation::new(window, args.calls, args.aht)?;
    let target = StaffingTarget::new(args.target_service_level, args.target_answer_time)?;

    debug!("Calculating staffing for {:?} against {:?}", workload, target);
    let report = StaffingCalculator::new(workload, target)
        .with_max_iterations(config.search.max_iterations)
        .report(config.planning.shrinkage, config.planning.average_patience_secs)?;

    Ok(match output {
        OutputFormat::Text => report.to_string(),
        OutputFormat::Json => report.to_json()?,
    })
}

pub fn run_plan(args: &PlanArgs, base: &StaffingConfig, output: OutputFormat) -> Result<String> {
    let scenario = Scenario::from_file(&args.scenario)?;
    let config = plan_config(base, &scenario, args)?;
    info!(
        "Loaded scenario {} with {} intervals",
        args.scenario.display(),
        scenario.intervals.len()
    );

    let plan = plan_intervals(&scenario.intervals, &scenario.target, &config)?;
    render_plan(&plan, args.summary_only, output)
}

pub fn render_plan(plan: &StaffingPlan, summary_only: bool, output: OutputFormat) -> Result<String> {
    let mut lines = Vec::new();
    match output {
        OutputFormat::Json => {
            if !summary_only {
                for report in &plan.intervals {
                    lines.push(report.to_json()?);
                }
            }
            lines.push(serde_json::to_string(&plan.summary)?);
        }
        OutputFormat::Text => {
            if !summary_only {
                for report in &plan.intervals {
                    lines.push(report.to_string());
                }
            }
            let summary = &plan.summary;
            lines.push(format!(
                "Plan: {} intervals, {} calls, peak {} agents ({} scheduled), mean occupancy {:.1}%",
                summary.interval_count,
                summary.total_calls,
                summary.peak_raw_agents,
                summary.peak_scheduled_agents,
                summary.mean_occupancy * 100.0
            ));
        }
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn calc_args() -> CalcArgs {
        CalcArgs {
            calls: 390,
            start: Utc.with_ymd_and_hms(2021, 4, 1, 8, 0, 0).unwrap(),
            period_minutes: 60,
            aht: 300.0,
            target_service_level: 0.8,
            target_answer_time: 30.0,
            shrinkage: None,
            patience: None,
            max_iterations: None,
            unbounded: false,
        }
    }

    #[test]
    fn test_calc_text_output() {
        let text = run_calc(&calc_args(), &StaffingConfig::default(), OutputFormat::Text).unwrap();
        assert!(text.contains("32.50 Erlangs"));
        assert!(text.contains("Agents required (before shrinkage): 38"));
        assert!(text.contains("Agents required (30% shrinkage): 55"));
    }

    #[test]
    fn test_calc_json_output() {
        let json = run_calc(&calc_args(), &StaffingConfig::default(), OutputFormat::Json).unwrap();
        let report: StaffingReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report.raw_agents, 38);
    }

    #[test]
    fn test_calc_overrides() {
        let mut args = calc_args();
        args.shrinkage = Some(0.5);
        args.unbounded = true;
        let config = calc_config(&StaffingConfig::default(), &args).unwrap();
        assert_eq!(config.planning.shrinkage, 0.5);
        assert_eq!(config.search.max_iterations, None);

        args.shrinkage = Some(1.0);
        assert!(calc_config(&StaffingConfig::default(), &args).is_err());
    }

    #[test]
    fn test_calc_invalid_target() {
        let mut args = calc_args();
        args.target_service_level = 1.5;
        let err = run_calc(&args, &StaffingConfig::default(), OutputFormat::Text).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StaffingError>(),
            Some(StaffingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_calc_period_out_of_range() {
        let mut args = calc_args();
        args.period_minutes = i64::MAX;
        let err = run_calc(&args, &StaffingConfig::default(), OutputFormat::Text).unwrap_err();
        assert!(err.to_string().contains("period out of range"));

        args.period_minutes = 0;
        assert!(run_calc(&args, &StaffingConfig::default(), OutputFormat::Text).is_err());
    }

    #[test]
    fn test_scenario_plan() {
        let scenario = Scenario::from_toml_str(
            r#"
            [target]
            service_level = 0.8
            answer_time_secs = 20

            [config.planning]
            shrinkage = 0.25

            [[intervals]]
            calls = 100
            average_handling_time = 180
            window = { start = "2021-04-01T08:00:00Z", end = "2021-04-01T08:30:00Z" }

            [[intervals]]
            calls = 0
            average_handling_time = 180
            window = { start = "2021-04-01T08:30:00Z", end = "2021-04-01T09:00:00Z" }
            "#,
        )
        .unwrap();
        let config = scenario.config.clone().unwrap();
        assert_eq!(config.planning.shrinkage, 0.25);

        let plan = plan_intervals(&scenario.intervals, &scenario.target, &config).unwrap();
        assert_eq!(plan.intervals[0].raw_agents, 14);
        assert_eq!(plan.intervals[0].scheduled_agents, 19);
        assert_eq!(plan.intervals[1].raw_agents, 1);

        let text = render_plan(&plan, true, OutputFormat::Text).unwrap();
        assert!(text.starts_with("Plan: 2 intervals, 100 calls, peak 14 agents (19 scheduled)"));

        let json = render_plan(&plan, false, OutputFormat::Json).unwrap();
        assert_eq!(json.lines().count(), 3);
    }

    #[test]
    fn test_sample_scenario_file() {
        let args = PlanArgs {
            scenario: Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/sample_morning.toml"),
            summary_only: true,
            max_iterations: None,
            unbounded: false,
        };
        let text = run_plan(&args, &StaffingConfig::default(), OutputFormat::Text).unwrap();
        assert!(text.starts_with("Plan: 6 intervals, 885 calls"));
    }

    #[test]
    fn test_plan_search_overrides() {
        let scenario = Scenario::from_toml_str(
            r#"
            [target]
            service_level = 0.8
            answer_time_secs = 20

            [config.search]
            max_iterations = 1000
            "#,
        )
        .unwrap();
        let mut args = PlanArgs {
            scenario: "unused.toml".into(),
            summary_only: false,
            max_iterations: None,
            unbounded: false,
        };
        let base = StaffingConfig::default();

        let config = plan_config(&base, &scenario, &args).unwrap();
        assert_eq!(config.search.max_iterations, Some(1000));

        args.max_iterations = Some(3);
        let config = plan_config(&base, &scenario, &args).unwrap();
        assert_eq!(config.search.max_iterations, Some(3));

        args.max_iterations = None;
        args.unbounded = true;
        let config = plan_config(&base, &scenario, &args).unwrap();
        assert_eq!(config.search.max_iterations, None);

        args.unbounded = false;
        args.max_iterations = Some(0);
        assert!(plan_config(&base, &scenario, &args).is_err());
    }

    #[test]
    fn test_scenario_rejects_bad_interval() {
        let result = Scenario::from_toml_str(
            r#"
            [target]
            service_level = 0.8
            answer_time_secs = 20

            [[intervals]]
            calls = 10
            average_handling_time = -1
            window = { start = "2021-04-01T08:00:00Z", end = "2021-04-01T08:30:00Z" }
            "#,
        );
        assert!(result.is_err());
    }
}
