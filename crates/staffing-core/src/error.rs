use thiserror::Error;

/// Staffing engine errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StaffingError {
    /// Malformed or out-of-domain input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The staffing search hit its iteration cap before meeting the target
    #[error(
        "Staffing search exhausted after {max_iterations} iterations \
         (last tried {last_agents} agents, service level {last_service_level:.4})"
    )]
    SearchExhausted {
        /// Configured iteration cap
        max_iterations: u32,
        /// Last agent count evaluated
        last_agents: u32,
        /// Service level reached at `last_agents`
        last_service_level: f64,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StaffingError {
    /// Create a new InvalidInput error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new Config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new Internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error came from the search iteration cap
    pub fn is_search_exhausted(&self) -> bool {
        matches!(self, Self::SearchExhausted { .. })
    }
}

/// Result type for staffing operations
pub type Result<T> = std::result::Result<T, StaffingError>;

/// Reject NaN and infinities before they reach the formulas.
pub(crate) fn ensure_finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StaffingError::invalid_input(format!(
            "{} must be a finite number, got {}",
            name, value
        )))
    }
}

/// Finite and strictly positive.
pub(crate) fn ensure_positive(name: &str, value: f64) -> Result<f64> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(StaffingError::invalid_input(format!(
            "{} must be greater than 0, got {}",
            name, value
        )))
    }
}

/// Finite and `>= 0`.
pub(crate) fn ensure_non_negative(name: &str, value: f64) -> Result<f64> {
    ensure_finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(StaffingError::invalid_input(format!(
            "{} cannot be negative, got {}",
            name, value
        )))
    }
}

/// Finite and within `[0, 1]`.
pub(crate) fn ensure_fraction(name: &str, value: f64) -> Result<f64> {
    ensure_finite(name, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(StaffingError::invalid_input(format!(
            "{} should be a number between 0 and 1 (both ends included), got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StaffingError::invalid_input("duration must be positive");
        assert_eq!(err.to_string(), "Invalid input: duration must be positive");

        let err = StaffingError::SearchExhausted {
            max_iterations: 5,
            last_agents: 38,
            last_service_level: 0.5,
        };
        assert!(err.is_search_exhausted());
        assert!(err.to_string().contains("after 5 iterations"));
        assert!(err.to_string().contains("38 agents"));
    }

    #[test]
    fn test_guards() {
        assert!(ensure_positive("aht", 1.0).is_ok());
        assert!(ensure_positive("aht", 0.0).is_err());
        assert!(ensure_positive("aht", f64::NAN).is_err());
        assert!(ensure_non_negative("tat", 0.0).is_ok());
        assert!(ensure_non_negative("tat", -0.5).is_err());
        assert!(ensure_fraction("tsl", 1.0).is_ok());
        assert!(ensure_fraction("tsl", 0.0).is_ok());
        assert!(matches!(
            ensure_fraction("tsl", 1.5),
            Err(StaffingError::InvalidInput(_))
        ));
        assert!(ensure_finite("x", f64::INFINITY).is_err());
    }
}
