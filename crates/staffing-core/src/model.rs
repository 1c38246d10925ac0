//! # Planning Inputs
//!
//! Value types describing what the engine is asked to staff for: the time
//! window being planned, the workload expected inside it, and the service
//! level the operation wants to hit. All of them validate at construction and
//! are immutable afterwards, so every downstream calculation can assume its
//! preconditions hold.
//!
//! Deserialization goes through the same constructors, so a scenario file
//! with a negative handling time is rejected at load time rather than deep
//! inside the staffing search.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ensure_fraction, ensure_non_negative, ensure_positive, Result, StaffingError};
use crate::traffic;

/// A half-open planning interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeWindow")]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawTimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawTimeWindow> for TimeWindow {
    type Error = StaffingError;

    fn try_from(raw: RawTimeWindow) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl TimeWindow {
    /// Create a window; `end` must be strictly after `start`
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end <= start {
            return Err(StaffingError::invalid_input(format!(
                "time window end ({}) must be after its start ({})",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Create a window of `length` starting at `start`
    pub fn starting_at(start: DateTime<Utc>, length: Duration) -> Result<Self> {
        let end = start
            .checked_add_signed(length)
            .ok_or_else(|| StaffingError::invalid_input("time window end is out of range"))?;
        Self::new(start, end)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Window length in seconds (always > 0)
    pub fn duration_seconds(&self) -> f64 {
        let duration = self.duration();
        match duration.num_microseconds() {
            Some(micros) => micros as f64 / 1_000_000.0,
            None => duration.num_milliseconds() as f64 / 1_000.0,
        }
    }
}

/// Expected call volume over a window together with its handling time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWorkloadObservation")]
pub struct WorkloadObservation {
    window: TimeWindow,
    calls: u64,
    average_handling_time: f64,
}

#[derive(Deserialize)]
struct RawWorkloadObservation {
    window: TimeWindow,
    calls: u64,
    average_handling_time: f64,
}

impl TryFrom<RawWorkloadObservation> for WorkloadObservation {
    type Error = StaffingError;

    fn try_from(raw: RawWorkloadObservation) -> Result<Self> {
        Self::new(raw.window, raw.calls, raw.average_handling_time)
    }
}

impl WorkloadObservation {
    /// `average_handling_time` is in seconds and must be positive
    pub fn new(window: TimeWindow, calls: u64, average_handling_time: f64) -> Result<Self> {
        ensure_positive("average_handling_time", average_handling_time)?;
        Ok(Self {
            window,
            calls,
            average_handling_time,
        })
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Average handling time in seconds
    pub fn average_handling_time(&self) -> f64 {
        self.average_handling_time
    }

    pub fn duration_seconds(&self) -> f64 {
        self.window.duration_seconds()
    }

    pub fn calls_per_hour(&self) -> f64 {
        // Window and AHT were validated on construction
        self.calls as f64 * traffic::SECONDS_PER_HOUR / self.duration_seconds()
    }

    /// Offered load in Erlangs
    pub fn traffic_intensity(&self) -> f64 {
        self.calls_per_hour() * (self.average_handling_time / traffic::SECONDS_PER_HOUR)
    }
}

/// Service level goal: answer `service_level` of calls within `answer_time_secs`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStaffingTarget")]
pub struct StaffingTarget {
    service_level: f64,
    answer_time_secs: f64,
}

#[derive(Deserialize)]
struct RawStaffingTarget {
    service_level: f64,
    answer_time_secs: f64,
}

impl TryFrom<RawStaffingTarget> for StaffingTarget {
    type Error = StaffingError;

    fn try_from(raw: RawStaffingTarget) -> Result<Self> {
        Self::new(raw.service_level, raw.answer_time_secs)
    }
}

impl StaffingTarget {
    /// `service_level` must lie in `[0, 1]`, `answer_time_secs` must be `>= 0`
    pub fn new(service_level: f64, answer_time_secs: f64) -> Result<Self> {
        ensure_fraction("target_service_level", service_level)?;
        ensure_non_negative("target_answer_time", answer_time_secs)?;
        Ok(Self {
            service_level,
            answer_time_secs,
        })
    }

    pub fn service_level(&self) -> f64 {
        self.service_level
    }

    pub fn answer_time_secs(&self) -> f64 {
        self.answer_time_secs
    }
}
