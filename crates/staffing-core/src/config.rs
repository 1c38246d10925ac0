use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StaffingError};

/// Staffing engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffingConfig {
    /// Staffing search settings
    pub search: SearchConfig,

    /// Planning assumptions applied on top of the raw agent count
    pub planning: PlanningConfig,
}

/// Staffing search configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of agent counts to try before giving up
    /// (`None` searches without bound)
    pub max_iterations: Option<u32>,
}

/// Planning assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// Fraction of scheduled time lost to breaks, training, absence (0 <= s < 1)
    pub shrinkage: f64,

    /// Mean time a caller waits before hanging up (seconds)
    pub average_patience_secs: f64,
}

impl StaffingConfig {
    /// Validate the configuration for consistency and correctness
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.search.max_iterations == Some(0) {
            return Err("search.max_iterations must be greater than 0".to_string());
        }

        let shrinkage = self.planning.shrinkage;
        if !shrinkage.is_finite() || !(0.0..1.0).contains(&shrinkage) {
            return Err(format!(
                "planning.shrinkage must be in [0, 1), got {}",
                shrinkage
            ));
        }

        let patience = self.planning.average_patience_secs;
        if !patience.is_finite() || patience < 0.0 {
            return Err(format!(
                "planning.average_patience_secs cannot be negative, got {}",
                patience
            ));
        }

        Ok(())
    }

    /// Parse a TOML document and validate it
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)
            .map_err(|e| StaffingError::config(format!("failed to parse TOML: {}", e)))?;
        config.validate().map_err(StaffingError::Config)?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            StaffingError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&raw)
    }
}

impl Default for StaffingConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            planning: PlanningConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: Some(10_000),
        }
    }
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            shrinkage: 0.3,
            average_patience_secs: 20.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = StaffingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.max_iterations, Some(10_000));
        assert_eq!(config.planning.shrinkage, 0.3);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = StaffingConfig::default();
        config.planning.shrinkage = 1.0;
        assert!(config.validate().is_err());

        let mut config = StaffingConfig::default();
        config.search.max_iterations = Some(0);
        assert!(config.validate().is_err());

        let mut config = StaffingConfig::default();
        config.planning.average_patience_secs = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_partial_sections() {
        let config = StaffingConfig::from_toml_str(
            r#"
            [planning]
            shrinkage = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(config.planning.shrinkage, 0.25);
        assert_eq!(config.planning.average_patience_secs, 20.0);
        assert_eq!(config.search.max_iterations, Some(10_000));
    }

    #[test]
    fn test_from_toml_invalid() {
        let err = StaffingConfig::from_toml_str("[planning]\nshrinkage = 1.2\n").unwrap_err();
        assert!(matches!(err, StaffingError::Config(_)));

        let err = StaffingConfig::from_toml_str("not = [valid").unwrap_err();
        assert!(matches!(err, StaffingError::Config(_)));
    }
}
