//! Multi-interval staffing plans.
//!
//! A day is usually planned in half-hour or hourly buckets. Every bucket is an
//! independent calculation, so they are evaluated on the rayon pool and
//! returned in input order.

use chrono::Duration;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculator::{StaffingCalculator, StaffingReport};
use crate::config::StaffingConfig;
use crate::error::{Result, StaffingError};
use crate::model::{StaffingTarget, TimeWindow, WorkloadObservation};

/// Reports for every interval plus day-level totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingPlan {
    pub intervals: Vec<StaffingReport>,
    pub summary: PlanSummary,
}

/// Aggregates across a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub interval_count: usize,
    pub total_calls: u64,
    /// Highest agent requirement before shrinkage
    pub peak_raw_agents: u32,
    /// Highest agent requirement after shrinkage
    pub peak_scheduled_agents: u32,
    /// Unweighted mean of the interval occupancies (0 for an empty plan)
    pub mean_occupancy: f64,
}

impl PlanSummary {
    fn from_reports(reports: &[StaffingReport]) -> Self {
        let interval_count = reports.len();
        let mean_occupancy = if interval_count == 0 {
            0.0
        } else {
            reports.iter().map(|r| r.occupancy).sum::<f64>() / interval_count as f64
        };

        Self {
            interval_count,
            total_calls: reports.iter().map(|r| r.calls).sum(),
            peak_raw_agents: reports.iter().map(|r| r.raw_agents).max().unwrap_or(0),
            peak_scheduled_agents: reports.iter().map(|r| r.scheduled_agents).max().unwrap_or(0),
            mean_occupancy,
        }
    }
}

/// Staff every observation against the same target.
///
/// The first failing interval (in input order) fails the whole plan.
pub fn plan_intervals(
    observations: &[WorkloadObservation],
    target: &StaffingTarget,
    config: &StaffingConfig,
) -> Result<StaffingPlan> {
    config.validate().map_err(StaffingError::Config)?;

    let shrinkage = config.planning.shrinkage;
    let patience = config.planning.average_patience_secs;
    let max_iterations = config.search.max_iterations;

    debug!("📋 Planning {} intervals", observations.len());

    let intervals = observations
        .par_iter()
        .map(|workload| {
            StaffingCalculator::new(*workload, *target)
                .with_max_iterations(max_iterations)
                .report(shrinkage, patience)
        })
        .collect::<Vec<Result<StaffingReport>>>()
        .into_iter()
        .collect::<Result<Vec<_>>>()?;

    let summary = PlanSummary::from_reports(&intervals);
    info!(
        "📊 Planned {} intervals: {} calls, peak {} agents ({} scheduled)",
        summary.interval_count,
        summary.total_calls,
        summary.peak_raw_agents,
        summary.peak_scheduled_agents
    );

    Ok(StaffingPlan { intervals, summary })
}

/// Split `window` into consecutive buckets of `interval`.
///
/// The last bucket is shortened if `interval` does not divide the window.
pub fn split_window(window: TimeWindow, interval: Duration) -> Result<Vec<TimeWindow>> {
    if interval <= Duration::zero() {
        return Err(StaffingError::invalid_input(format!(
            "interval must be positive, got {}",
            interval
        )));
    }

    let mut buckets = Vec::new();
    let mut start = window.start();
    while start < window.end() {
        let end = start
            .checked_add_signed(interval)
            .map_or(window.end(), |end| end.min(window.end()));
        buckets.push(TimeWindow::new(start, end)?);
        start = end;
    }
    Ok(buckets)
}
