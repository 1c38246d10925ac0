//! Staffing search: the smallest agent count that meets a service level target.
//!
//! Service level is non-decreasing in the number of agents for fixed traffic
//! and answer time, so a linear walk upward from the first stable agent count
//! stops at the minimum. Each step is `O(N)` through the Erlang recurrence.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::erlang::{erlang_b, erlang_c_from_blocking, next_blocking, service_level};
use crate::error::{ensure_fraction, ensure_non_negative, ensure_positive, Result, StaffingError};

/// Outcome of a staffing search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaffingResult {
    /// Offered load the search ran against (Erlangs)
    pub traffic_intensity: f64,
    /// Minimum agents meeting the target
    pub agents: u32,
    /// Probability of queueing at `agents`
    pub erlang_c_probability: f64,
    /// Service level achieved at `agents`
    pub service_level: f64,
}

/// Smallest agent count strictly above `traffic_intensity`
///
/// Zero traffic is staffed with a single agent by convention.
pub fn first_stable_agents(traffic_intensity: f64) -> Result<u32> {
    ensure_non_negative("traffic_intensity", traffic_intensity)?;
    let floor = traffic_intensity.floor();
    if floor >= u32::MAX as f64 {
        return Err(StaffingError::invalid_input(format!(
            "traffic intensity {} is too large to staff",
            traffic_intensity
        )));
    }
    Ok(floor as u32 + 1)
}

/// Minimum number of agents whose service level reaches `target_service_level`
///
/// See [`find_staffing`] for the full result and error behaviour.
pub fn minimum_agents_required(
    traffic_intensity: f64,
    average_handling_time: f64,
    target_answer_time: f64,
    target_service_level: f64,
    max_iterations: Option<u32>,
) -> Result<u32> {
    find_staffing(
        traffic_intensity,
        average_handling_time,
        target_answer_time,
        target_service_level,
        max_iterations,
    )
    .map(|result| result.agents)
}

/// Walk agent counts upward from [`first_stable_agents`] until the service
/// level reaches `target_service_level`.
///
/// `max_iterations` bounds the number of agent counts evaluated; when it runs
/// out before the target is met the search fails with
/// [`StaffingError::SearchExhausted`]. `None` searches without bound.
pub fn find_staffing(
    traffic_intensity: f64,
    average_handling_time: f64,
    target_answer_time: f64,
    target_service_level: f64,
    max_iterations: Option<u32>,
) -> Result<StaffingResult> {
    ensure_non_negative("traffic_intensity", traffic_intensity)?;
    ensure_positive("average_handling_time", average_handling_time)?;
    ensure_non_negative("target_answer_time", target_answer_time)?;
    ensure_fraction("target_service_level", target_service_level)?;
    if max_iterations == Some(0) {
        return Err(StaffingError::invalid_input("max_iterations must be greater than 0"));
    }

    if traffic_intensity == 0.0 {
        debug!("No offered traffic, staffing a single agent");
        return Ok(StaffingResult {
            traffic_intensity,
            agents: 1,
            erlang_c_probability: 0.0,
            service_level: 1.0,
        });
    }

    let mut agents = first_stable_agents(traffic_intensity)?;
    debug!(
        "🔍 Searching staffing for {:.3} Erlangs (target {:.1}% in {}s), starting at {} agents",
        traffic_intensity,
        target_service_level * 100.0,
        target_answer_time,
        agents
    );

    // B(N, A) is carried from one agent count to the next, so each step of
    // the walk costs O(1) after the first.
    let mut blocking = erlang_b(traffic_intensity, agents)?;

    let mut iterations: u32 = 0;
    loop {
        let probability = erlang_c_from_blocking(traffic_intensity, agents, blocking);
        let level = service_level(
            probability,
            traffic_intensity,
            agents,
            average_handling_time,
            target_answer_time,
        )?;
        iterations += 1;
        trace!("agents={} erlang_c={:.6} service_level={:.6}", agents, probability, level);

        if target_service_level <= 0.0 || level >= target_service_level {
            debug!(
                "✅ {} agents reach {:.2}% service level after {} iterations",
                agents,
                level * 100.0,
                iterations
            );
            return Ok(StaffingResult {
                traffic_intensity,
                agents,
                erlang_c_probability: probability,
                service_level: level,
            });
        }

        if let Some(cap) = max_iterations {
            if iterations >= cap {
                warn!(
                    "⚠️ Staffing search gave up after {} iterations at {} agents ({:.4} < {:.4})",
                    iterations, agents, level, target_service_level
                );
                return Err(StaffingError::SearchExhausted {
                    max_iterations: cap,
                    last_agents: agents,
                    last_service_level: level,
                });
            }
        }

        agents = agents.checked_add(1).ok_or_else(|| {
            StaffingError::internal("agent count overflowed during staffing search")
        })?;
        blocking = next_blocking(traffic_intensity, blocking, agents);
    }
}
