//! Local search configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which improving move a pass applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchPolicy {
    /// Apply the first improving route (or route pair) found in scan order,
    /// then restart the scan.
    #[default]
    FirstImprovement,
    /// Scan the whole neighborhood and apply the largest improvement.
    BestImprovement,
}

/// Configuration parameters for [`TwoOptImprover`](super::TwoOptImprover).
///
/// Deserialization rejects a threshold that fails [`validate`](Self::validate).
///
/// # Examples
///
/// ```
/// use vrp_heuristics::local_search::{LocalSearchConfig, SearchPolicy};
///
/// let config = LocalSearchConfig::default()
///     .with_policy(SearchPolicy::BestImprovement)
///     .with_max_passes(50);
/// assert_eq!(config.threshold, 0.001);
/// assert_eq!(config.max_passes, Some(50));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConfigDefinition", into = "ConfigDefinition")]
pub struct LocalSearchConfig {
    /// Minimum distance saving for a move to count as improving.
    pub threshold: f64,
    /// Move selection policy.
    pub policy: SearchPolicy,
    /// Hard cap on total passes (None for no cap).
    pub max_passes: Option<usize>,
}

/// Unvalidated wire shape of a [`LocalSearchConfig`].
#[derive(Serialize, Deserialize)]
#[serde(default)]
struct ConfigDefinition {
    threshold: f64,
    policy: SearchPolicy,
    max_passes: Option<usize>,
}

impl Default for ConfigDefinition {
    fn default() -> Self {
        LocalSearchConfig::default().into()
    }
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            threshold: 0.001,
            policy: SearchPolicy::FirstImprovement,
            max_passes: None,
        }
    }
}

impl LocalSearchConfig {
    /// Sets the improvement threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the move selection policy.
    pub fn with_policy(mut self, policy: SearchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the cap on total passes.
    pub fn with_max_passes(mut self, n: usize) -> Self {
        self.max_passes = Some(n);
        self
    }

    /// Checks that the threshold is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidThreshold`] otherwise. A negative
    /// threshold would accept moves that lengthen routes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threshold.is_finite() && self.threshold >= 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidThreshold {
                threshold: self.threshold,
            })
        }
    }

    /// The threshold the move searches apply: never below 0, so every
    /// accepted move shortens the routes.
    pub(crate) fn min_gain(&self) -> f64 {
        if self.threshold >= 0.0 {
            self.threshold
        } else {
            0.0
        }
    }
}

impl TryFrom<ConfigDefinition> for LocalSearchConfig {
    type Error = ConfigError;

    fn try_from(def: ConfigDefinition) -> Result<Self, Self::Error> {
        let config = Self {
            threshold: def.threshold,
            policy: def.policy,
            max_passes: def.max_passes,
        };
        config.validate()?;
        Ok(config)
    }
}

impl From<LocalSearchConfig> for ConfigDefinition {
    fn from(config: LocalSearchConfig) -> Self {
        Self {
            threshold: config.threshold,
            policy: config.policy,
            max_passes: config.max_passes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = LocalSearchConfig::default();
        assert_eq!(config.threshold, 0.001);
        assert_eq!(config.policy, SearchPolicy::FirstImprovement);
        assert!(config.max_passes.is_none());
    }

    #[test]
    fn test_builder() {
        let config = LocalSearchConfig::default()
            .with_threshold(0.5)
            .with_policy(SearchPolicy::BestImprovement)
            .with_max_passes(10);
        assert_eq!(config.threshold, 0.5);
        assert_eq!(config.policy, SearchPolicy::BestImprovement);
        assert_eq!(config.max_passes, Some(10));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: LocalSearchConfig =
            serde_json::from_str(r#"{"policy": "BestImprovement"}"#).expect("valid");
        assert_eq!(config.policy, SearchPolicy::BestImprovement);
        assert_eq!(config.threshold, 0.001);
        assert!(config.max_passes.is_none());
    }

    #[test]
    fn test_validate_threshold() {
        assert!(LocalSearchConfig::default().with_threshold(0.0).validate().is_ok());
        assert_eq!(
            LocalSearchConfig::default().with_threshold(-100.0).validate(),
            Err(ConfigError::InvalidThreshold { threshold: -100.0 })
        );
        assert!(LocalSearchConfig::default()
            .with_threshold(f64::NAN)
            .validate()
            .is_err());
        assert!(LocalSearchConfig::default()
            .with_threshold(f64::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_deserialize_rejects_negative_threshold() {
        let err = serde_json::from_str::<LocalSearchConfig>(r#"{"threshold": -0.5}"#).unwrap_err();
        assert!(err.to_string().contains("improvement threshold"));
    }

    #[test]
    fn test_min_gain_clamps() {
        assert_eq!(LocalSearchConfig::default().min_gain(), 0.001);
        assert_eq!(LocalSearchConfig::default().with_threshold(-100.0).min_gain(), 0.0);
        assert_eq!(LocalSearchConfig::default().with_threshold(f64::NAN).min_gain(), 0.0);
    }
}
