//! Matching configuration
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::MatchingError;

/// Configuration for a matching request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Score above which a matrix entry becomes a candidate edge
    pub threshold: f64,

    /// Accept entries equal to `threshold` as well
    pub inclusive_threshold: bool,

    /// Largest vertex count a single request may allocate for
    pub max_vertices: usize,

    /// Check the final matching against the input graph before returning it
    pub verify_result: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            inclusive_threshold: false,
            max_vertices: 1 << 20,
            verify_result: true,
        }
    }
}

impl MatchingConfig {
    /// Parses a JSON document; absent fields take their default value
    pub fn from_json(json: &str) -> Result<Self, MatchingError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MatchingError> {
        if !self.threshold.is_finite() {
            return Err(MatchingError::InvalidParameter {
                name: "threshold".to_string(),
                reason: format!("must be a finite number, got {}", self.threshold),
            });
        }

        if self.max_vertices == 0 {
            return Err(MatchingError::InvalidParameter {
                name: "max_vertices".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Whether a matrix score denotes a candidate edge
    #[inline]
    pub fn accepts(&self, score: f64) -> bool {
        if self.inclusive_threshold {
            score >= self.threshold
        } else {
            score > self.threshold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MatchingConfig::default();

        assert!(config.validate().is_ok());
        assert!(config.verify_result);
        assert!(config.accepts(0.5));
        assert!(!config.accepts(0.0));
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = MatchingConfig::from_json(r#"{ "threshold": 0.5, "inclusive_threshold": true }"#).unwrap();

        assert_eq!(config.threshold, 0.5);
        assert!(config.accepts(0.5));
        assert!(!config.accepts(0.49));
        assert_eq!(config.max_vertices, MatchingConfig::default().max_vertices);
    }

    #[test]
    fn test_from_json_rejects_zero_vertex_limit() {
        let result = MatchingConfig::from_json(r#"{ "max_vertices": 0 }"#);

        assert!(matches!(result, Err(MatchingError::InvalidParameter { .. })));
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        let result = MatchingConfig::from_json("{ threshold: ");

        assert!(matches!(result, Err(MatchingError::Configuration(_))));
    }

    #[test]
    fn test_validate_rejects_nan_threshold() {
        let config = MatchingConfig {
            threshold: f64::NAN,
            ..MatchingConfig::default()
        };

        assert!(config.validate().is_err());
    }
}
