//! # Staffing Calculator
//!
//! Binds one [`WorkloadObservation`] to one [`StaffingTarget`] and answers
//! every question a planner asks about that interval: traffic, the queueing
//! probability for any agent count, the minimum staffing and the KPIs at that
//! staffing level.
//!
//! The staffing search runs at most once per calculator. The result is cached
//! on first use and shared by every derived metric, so asking for ASA,
//! occupancy and abandonment in a row costs a single search.
//!
//! ## Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use rvoip_staffing_core::prelude::*;
//!
//! # fn example() -> Result<()> {
//! let window = TimeWindow::new(
//!     Utc.with_ymd_and_hms(2021, 4, 1, 8, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2021, 4, 1, 9, 0, 0).unwrap(),
//! )?;
//! let workload = WorkloadObservation::new(window, 390, 300.0)?;
//! let target = StaffingTarget::new(0.8, 30.0)?;
//!
//! let calculator = StaffingCalculator::new(workload, target);
//! assert_eq!(calculator.raw_agents()?, 38);
//! assert_eq!(calculator.agents_with_shrinkage(0.3)?, 55);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::erlang;
use crate::error::{Result, StaffingError};
use crate::model::{StaffingTarget, WorkloadObservation};
use crate::search::{find_staffing, StaffingResult};

/// Staffing calculator for a single interval
#[derive(Debug)]
pub struct StaffingCalculator {
    workload: WorkloadObservation,
    target: StaffingTarget,
    max_iterations: Option<u32>,
    traffic_intensity: f64,
    staffing: OnceCell<StaffingResult>,
}

impl StaffingCalculator {
    /// Create a calculator with an unbounded staffing search
    pub fn new(workload: WorkloadObservation, target: StaffingTarget) -> Self {
        Self {
            traffic_intensity: workload.traffic_intensity(),
            workload,
            target,
            max_iterations: None,
            staffing: OnceCell::new(),
        }
    }

    /// Cap the number of agent counts the staffing search may try
    pub fn with_max_iterations(mut self, max_iterations: Option<u32>) -> Self {
        self.max_iterations = max_iterations;
        self.staffing = OnceCell::new();
        self
    }

    pub fn workload(&self) -> &WorkloadObservation {
        &self.workload
    }

    pub fn target(&self) -> &StaffingTarget {
        &self.target
    }

    pub fn calls_per_hour(&self) -> f64 {
        self.workload.calls_per_hour()
    }

    /// Offered load in Erlangs
    pub fn traffic_intensity(&self) -> f64 {
        self.traffic_intensity
    }

    /// Queueing probability with `agents` on shift
    pub fn erlang_c(&self, agents: u32) -> Result<f64> {
        erlang::erlang_c(self.traffic_intensity, agents)
    }

    /// Service level with `agents` on shift
    pub fn service_level(&self, agents: u32) -> Result<f64> {
        let probability = self.erlang_c(agents)?;
        erlang::service_level(
            probability,
            self.traffic_intensity,
            agents,
            self.workload.average_handling_time(),
            self.target.answer_time_secs(),
        )
    }

    /// Minimum staffing for the target, computed once
    pub fn staffing(&self) -> Result<&StaffingResult> {
        self.staffing.get_or_try_init(|| {
            find_staffing(
                self.traffic_intensity,
                self.workload.average_handling_time(),
                self.target.answer_time_secs(),
                self.target.service_level(),
                self.max_iterations,
            )
        })
    }

    /// Agents required before shrinkage
    pub fn raw_agents(&self) -> Result<u32> {
        Ok(self.staffing()?.agents)
    }

    pub fn average_speed_of_answer(&self) -> Result<f64> {
        self.staffing()?
            .average_speed_of_answer(self.workload.average_handling_time())
    }

    pub fn percentage_answered_immediately(&self) -> Result<f64> {
        Ok(self.staffing()?.percentage_answered_immediately())
    }

    pub fn occupancy(&self) -> Result<f64> {
        Ok(self.staffing()?.occupancy())
    }

    pub fn agents_with_shrinkage(&self, shrinkage: f64) -> Result<u32> {
        self.staffing()?.agents_with_shrinkage(shrinkage)
    }

    /// Abandonment probability for callers with `average_patience` seconds of patience
    pub fn erlang_a(&self, average_patience: f64) -> Result<f64> {
        self.staffing()?
            .erlang_a(self.workload.average_handling_time(), average_patience)
    }

    /// Bundle every metric for reporting
    pub fn report(&self, shrinkage: f64, average_patience: f64) -> Result<StaffingReport> {
        let staffing = *self.staffing()?;
        let window = self.workload.window();

        Ok(StaffingReport {
            start_time: window.start(),
            end_time: window.end(),
            calls: self.workload.calls(),
            average_handling_time: self.workload.average_handling_time(),
            target_service_level: self.target.service_level(),
            target_answer_time: self.target.answer_time_secs(),
            calls_per_hour: self.calls_per_hour(),
            traffic_intensity: self.traffic_intensity,
            raw_agents: staffing.agents,
            erlang_c_probability: staffing.erlang_c_probability,
            service_level: staffing.service_level,
            average_speed_of_answer: staffing
                .average_speed_of_answer(self.workload.average_handling_time())?,
            answered_immediately: staffing.percentage_answered_immediately(),
            occupancy: staffing.occupancy(),
            shrinkage,
            scheduled_agents: staffing.agents_with_shrinkage(shrinkage)?,
            average_patience,
            abandonment_probability: staffing
                .erlang_a(self.workload.average_handling_time(), average_patience)?,
        })
    }
}

/// Every staffing figure for one interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingReport {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub calls: u64,
    /// Seconds
    pub average_handling_time: f64,
    pub target_service_level: f64,
    /// Seconds
    pub target_answer_time: f64,
    pub calls_per_hour: f64,
    /// Erlangs
    pub traffic_intensity: f64,
    /// Agents required before shrinkage
    pub raw_agents: u32,
    pub erlang_c_probability: f64,
    /// Service level achieved with `raw_agents`
    pub service_level: f64,
    /// Seconds
    pub average_speed_of_answer: f64,
    pub answered_immediately: f64,
    pub occupancy: f64,
    pub shrinkage: f64,
    /// Agents to schedule after shrinkage
    pub scheduled_agents: u32,
    /// Seconds
    pub average_patience: f64,
    pub abandonment_probability: f64,
}

impl StaffingReport {
    /// Single-line JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| StaffingError::internal(format!("failed to serialize report: {}", e)))
    }
}

/// Probabilities are clamped to `[0, 100]%` for display only.
fn percent(value: f64) -> f64 {
    value.clamp(0.0, 1.0) * 100.0
}

impl fmt::Display for StaffingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Interval {} - {}",
            self.start_time.format("%Y-%m-%d %H:%M"),
            self.end_time.format("%Y-%m-%d %H:%M")
        )?;
        writeln!(
            f,
            "  Calls: {} ({:.1}/h, AHT {:.0}s) -> {:.2} Erlangs",
            self.calls, self.calls_per_hour, self.average_handling_time, self.traffic_intensity
        )?;
        writeln!(
            f,
            "  Target: {:.1}% answered within {:.0}s",
            percent(self.target_service_level),
            self.target_answer_time
        )?;
        writeln!(f, "  Agents required (before shrinkage): {}", self.raw_agents)?;
        writeln!(f, "  Service level: {:.1}%", percent(self.service_level))?;
        writeln!(f, "  Average speed of answer: {:.1}s", self.average_speed_of_answer)?;
        writeln!(f, "  Answered immediately: {:.1}%", percent(self.answered_immediately))?;
        writeln!(f, "  Occupancy: {:.1}%", percent(self.occupancy))?;
        writeln!(
            f,
            "  Agents required ({:.0}% shrinkage): {}",
            self.shrinkage * 100.0,
            self.scheduled_agents
        )?;
        write!(
            f,
            "  Abandoned ({:.0}s patience): {:.1}%",
            self.average_patience,
            percent(self.abandonment_probability)
        )
    }
}
