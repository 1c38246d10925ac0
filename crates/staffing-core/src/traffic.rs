//! Traffic model: call volume over a window to offered load in Erlangs.

use crate::error::{ensure_positive, Result};

pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Calls arriving per hour, given `calls` observed over `duration_seconds`
pub fn calls_per_hour(calls: u64, duration_seconds: f64) -> Result<f64> {
    ensure_positive("duration_seconds", duration_seconds)?;
    Ok(calls as f64 * SECONDS_PER_HOUR / duration_seconds)
}

/// Offered load in Erlangs from an hourly arrival rate
pub fn traffic_from_calls_per_hour(calls_per_hour: f64, average_handling_time: f64) -> Result<f64> {
    ensure_positive("average_handling_time", average_handling_time)?;
    Ok(calls_per_hour * (average_handling_time / SECONDS_PER_HOUR))
}

/// Offered load in Erlangs: `calls * aht / duration`
///
/// Computed through the hourly rate so it agrees bit-for-bit with
/// [`calls_per_hour`] followed by [`traffic_from_calls_per_hour`].
///
/// ```
/// use rvoip_staffing_core::traffic::compute_traffic_intensity;
///
/// let erlangs = compute_traffic_intensity(390, 3600.0, 300.0).unwrap();
/// assert!((erlangs - 32.5).abs() < 1e-12);
/// ```
pub fn compute_traffic_intensity(
    calls: u64,
    duration_seconds: f64,
    average_handling_time: f64,
) -> Result<f64> {
    ensure_positive("average_handling_time", average_handling_time)?;
    let cph = calls_per_hour(calls, duration_seconds)?;
    traffic_from_calls_per_hour(cph, average_handling_time)
}
