//! # Erlang Queueing Formulas
//!
//! Steady-state M/M/N results used by the staffing search:
//!
//! - [`erlang_b`]: probability that all `N` agents are busy in a loss system
//! - [`erlang_c`]: probability that an arriving call has to wait (M/M/N, no abandonment)
//! - [`service_level`]: probability that a call is answered within a target time
//!
//! ## Numerical Form
//!
//! The textbook Erlang C expression divides `A^N / N!` by a truncated
//! exponential series. Evaluated literally, both the power and the factorial
//! overflow an `f64` once `N` passes ~170, which is well inside the size of
//! a real contact center. Instead the Erlang B probability is built with the
//! stable recurrence
//!
//! ```text
//! B(0) = 1
//! B(k) = A·B(k-1) / (k + A·B(k-1))
//! ```
//!
//! and converted to Erlang C with
//!
//! ```text
//! C(N, A) = N·B(N, A) / (N − A·(1 − B(N, A)))
//! ```
//!
//! which is algebraically identical to
//! `(A^N/N!) / ((1 − A/N)·Σ_{i<N} A^i/i! + A^N/N!)`. Every intermediate value
//! stays in `[0, 1]`, so the cost is `O(N)` with no overflow for any agent
//! count.

use crate::error::{ensure_non_negative, ensure_positive, Result, StaffingError};

/// Erlang B blocking probability for `agents` servers offered `traffic_intensity` Erlangs
pub fn erlang_b(traffic_intensity: f64, agents: u32) -> Result<f64> {
    ensure_non_negative("traffic_intensity", traffic_intensity)?;

    let mut blocking = 1.0_f64;
    for k in 1..=agents {
        blocking = next_blocking(traffic_intensity, blocking, k);
    }
    Ok(blocking)
}

/// One recurrence step: `B(k)` from `B(k − 1)`
pub(crate) fn next_blocking(traffic_intensity: f64, blocking: f64, agents: u32) -> f64 {
    let load = traffic_intensity * blocking;
    load / (agents as f64 + load)
}

/// Erlang C from an already computed `B(N, A)`; `agents` must exceed the traffic
pub(crate) fn erlang_c_from_blocking(traffic_intensity: f64, agents: u32, blocking: f64) -> f64 {
    let n = agents as f64;
    n * blocking / (n - traffic_intensity * (1.0 - blocking))
}

/// Probability that an arriving call must wait in queue (Erlang C)
///
/// Requires `agents > traffic_intensity`; at or below that point the queue
/// grows without bound and the formula stops being a probability.
///
/// With no offered traffic nobody ever waits and the result is `0.0`. Very
/// light traffic on a large team gives `0.0` as well: the true value drops
/// below the smallest `f64` (`erlang_c(1.0, 300)` is about `1e-614`), so do
/// not rely on the result being strictly positive.
///
/// ```
/// use rvoip_staffing_core::erlang::erlang_c;
///
/// let p = erlang_c(32.5, 35).unwrap();
/// assert!((p - 0.5701).abs() < 1e-4);
/// ```
pub fn erlang_c(traffic_intensity: f64, agents: u32) -> Result<f64> {
    ensure_non_negative("traffic_intensity", traffic_intensity)?;
    if agents == 0 {
        return Err(StaffingError::invalid_input("agents must be greater than 0"));
    }
    if agents as f64 <= traffic_intensity {
        return Err(StaffingError::invalid_input(format!(
            "agents ({}) must exceed traffic intensity ({:.4} Erlangs) for a stable queue",
            agents, traffic_intensity
        )));
    }

    let blocking = erlang_b(traffic_intensity, agents)?;
    Ok(erlang_c_from_blocking(traffic_intensity, agents, blocking))
}

/// Probability that a call is answered within `target_answer_time` seconds
///
/// `1 − C · exp((A − N) · t / AHT)`: calls that do not queue are answered at
/// once, and the wait of those that do is exponential with rate `(N − A)/AHT`.
/// The value can stray marginally outside `[0, 1]` through rounding; clamp
/// for display only.
pub fn service_level(
    erlang_c_probability: f64,
    traffic_intensity: f64,
    agents: u32,
    average_handling_time: f64,
    target_answer_time: f64,
) -> Result<f64> {
    ensure_positive("average_handling_time", average_handling_time)?;
    ensure_non_negative("target_answer_time", target_answer_time)?;
    ensure_non_negative("traffic_intensity", traffic_intensity)?;

    let exponent = (traffic_intensity - agents as f64) * (target_answer_time / average_handling_time);
    Ok(1.0 - erlang_c_probability * exponent.exp())
}
