//! # Derived Staffing Metrics
//!
//! Operational KPIs computed from a [`StaffingResult`]:
//!
//! - **Average Speed of Answer (ASA)**: expected wait before a call is answered
//! - **Answered Immediately**: share of calls that never queue
//! - **Occupancy**: share of agent time spent handling calls
//! - **Shrinkage-Adjusted Headcount**: agents to schedule once breaks,
//!   training and absence are taken out
//! - **Abandonment (Erlang A)**: probability a caller hangs up before being
//!   answered, modelling impatience as an exponential hazard
//!
//! The free functions take exactly the quantities they need. The same
//! metrics are available as methods on [`StaffingResult`] for callers that
//! already hold one.

use crate::error::{ensure_finite, ensure_non_negative, ensure_positive, Result, StaffingError};
use crate::search::StaffingResult;

/// Expected wait in seconds: `C · AHT / (N − A)`
pub fn average_speed_of_answer(
    erlang_c_probability: f64,
    traffic_intensity: f64,
    agents: u32,
    average_handling_time: f64,
) -> Result<f64> {
    ensure_positive("average_handling_time", average_handling_time)?;
    ensure_finite("erlang_c_probability", erlang_c_probability)?;
    let spare = agents as f64 - traffic_intensity;
    if spare <= 0.0 {
        return Err(StaffingError::invalid_input(format!(
            "average speed of answer is undefined with {} agents for {:.4} Erlangs",
            agents, traffic_intensity
        )));
    }
    Ok(erlang_c_probability * average_handling_time / spare)
}

/// Share of calls answered without queueing
pub fn percentage_answered_immediately(erlang_c_probability: f64) -> f64 {
    1.0 - erlang_c_probability
}

/// Share of agent time spent handling calls
pub fn occupancy(traffic_intensity: f64, agents: u32) -> Result<f64> {
    ensure_non_negative("traffic_intensity", traffic_intensity)?;
    if agents == 0 {
        return Err(StaffingError::invalid_input("agents must be greater than 0"));
    }
    Ok(traffic_intensity / agents as f64)
}

/// Agents to schedule so that `raw_agents` remain after `shrinkage`
///
/// `ceil(raw_agents / (1 − shrinkage))` with `shrinkage` in `[0, 1)`. The
/// quotient is rounded up as computed, so `21` agents at `0.3` schedule `31`
/// (`21 / 0.7` evaluates just above `30`).
pub fn shrinkage_adjusted_agents(raw_agents: u32, shrinkage: f64) -> Result<u32> {
    ensure_finite("shrinkage", shrinkage)?;
    if !(0.0..1.0).contains(&shrinkage) {
        return Err(StaffingError::invalid_input(format!(
            "shrinkage must be in [0, 1), got {}",
            shrinkage
        )));
    }

    let scheduled = (raw_agents as f64 / (1.0 - shrinkage)).ceil();
    if scheduled > u32::MAX as f64 {
        return Err(StaffingError::invalid_input(format!(
            "{} agents at {:.1}% shrinkage exceeds the representable headcount",
            raw_agents,
            shrinkage * 100.0
        )));
    }
    Ok(scheduled as u32)
}

/// Erlang A abandonment probability: `C · exp((A − N) · patience / AHT)`
pub fn erlang_a_abandonment(
    erlang_c_probability: f64,
    traffic_intensity: f64,
    agents: u32,
    average_handling_time: f64,
    average_patience: f64,
) -> Result<f64> {
    ensure_positive("average_handling_time", average_handling_time)?;
    ensure_non_negative("average_patience", average_patience)?;
    ensure_finite("erlang_c_probability", erlang_c_probability)?;

    let exponent = (traffic_intensity - agents as f64) * (average_patience / average_handling_time);
    Ok(erlang_c_probability * exponent.exp())
}

impl StaffingResult {
    pub fn average_speed_of_answer(&self, average_handling_time: f64) -> Result<f64> {
        average_speed_of_answer(
            self.erlang_c_probability,
            self.traffic_intensity,
            self.agents,
            average_handling_time,
        )
    }

    pub fn percentage_answered_immediately(&self) -> f64 {
        percentage_answered_immediately(self.erlang_c_probability)
    }

    pub fn occupancy(&self) -> f64 {
        // agents is never zero for a search result
        self.traffic_intensity / self.agents as f64
    }

    pub fn agents_with_shrinkage(&self, shrinkage: f64) -> Result<u32> {
        shrinkage_adjusted_agents(self.agents, shrinkage)
    }

    /// Uses the queueing probability found by the search rather than
    /// re-evaluating Erlang C.
    pub fn erlang_a(&self, average_handling_time: f64, average_patience: f64) -> Result<f64> {
        erlang_a_abandonment(
            self.erlang_c_probability,
            self.traffic_intensity,
            self.agents,
            average_handling_time,
            average_patience,
        )
    }
}
