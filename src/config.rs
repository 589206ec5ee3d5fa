//! Configuration for intensity computations.
//!
//! Defaults reproduce the classic intensity characters: a 400 m neighbour
//! radius, `uID` as join column and densities expressed per hectare.
use serde::de::Error;
use serde::{Deserialize, Serialize};

/// What happens when a single record cannot produce a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Mark the cell missing, record the issue and keep going.
    #[default]
    Collect,
    /// Abort the computation on the first failing record.
    FailFast,
}

/// How a key that occurs on several lookup rows is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Use the first row in input order.
    #[default]
    FirstMatch,
    /// Treat every record referring to the ambiguous key as failed.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntensityConfig {
    /// Search radius for neighbour frequency, in dataset units.
    #[serde(default = "IntensityConfig::default_frequency_radius")]
    pub frequency_radius: f64,

    /// Column shared by the two sides of an area ratio join.
    #[serde(default = "IntensityConfig::default_join_id")]
    pub join_id: String,

    /// Multiplier applied to `units / area`. 10 000 gives units per hectare
    /// for areas in square metres.
    #[serde(default = "IntensityConfig::default_density_scale")]
    pub density_scale: f64,

    #[serde(default)]
    pub failure_policy: FailurePolicy,

    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

impl IntensityConfig {
    const fn default_frequency_radius() -> f64 {
        400.0
    }

    fn default_join_id() -> String {
        "uID".to_string()
    }

    const fn default_density_scale() -> f64 {
        10_000.0
    }

    pub fn with_frequency_radius(mut self, radius: f64) -> Self {
        self.frequency_radius = radius;
        self
    }

    pub fn with_join_id(mut self, join_id: impl Into<String>) -> Self {
        self.join_id = join_id.into();
        self
    }

    pub fn with_density_scale(mut self, scale: f64) -> Self {
        self.density_scale = scale;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.frequency_radius.is_finite() || self.frequency_radius <= 0.0 {
            return Err(format!(
                "Frequency radius must be finite and positive, got: {}",
                self.frequency_radius
            ));
        }

        if !self.density_scale.is_finite() || self.density_scale <= 0.0 {
            return Err(format!(
                "Density scale must be finite and positive, got: {}",
                self.density_scale
            ));
        }

        if self.join_id.is_empty() {
            return Err("Join id column name must not be empty".to_string());
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: IntensityConfig = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: IntensityConfig = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for IntensityConfig {
    fn default() -> Self {
        Self {
            frequency_radius: Self::default_frequency_radius(),
            join_id: Self::default_join_id(),
            density_scale: Self::default_density_scale(),
            failure_policy: FailurePolicy::default(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IntensityConfig::default();
        assert_eq!(config.frequency_radius, 400.0);
        assert_eq!(config.join_id, "uID");
        assert_eq!(config.density_scale, 10_000.0);
        assert_eq!(config.failure_policy, FailurePolicy::Collect);
        assert_eq!(config.duplicate_policy, DuplicatePolicy::FirstMatch);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_partial_uses_defaults() {
        let config = IntensityConfig::from_json(r#"{"frequency_radius": 250.0}"#).unwrap();
        assert_eq!(config.frequency_radius, 250.0);
        assert_eq!(config.join_id, "uID");
    }

    #[test]
    fn test_json_round_trip() {
        let config = IntensityConfig::default()
            .with_join_id("plot")
            .with_failure_policy(FailurePolicy::FailFast);
        let json = config.to_json().unwrap();
        assert!(json.contains("fail_fast"));
        assert_eq!(IntensityConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(IntensityConfig::from_json(r#"{"frequency_radius": -1.0}"#).is_err());
        assert!(IntensityConfig::from_json(r#"{"join_id": ""}"#).is_err());
        assert!(IntensityConfig::from_json(r#"{"unknown": 1}"#).is_err());
        assert!(
            IntensityConfig::default()
                .with_density_scale(0.0)
                .validate()
                .is_err()
        );
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_round_trip() {
        let config = IntensityConfig::default().with_frequency_radius(150.0);
        let text = config.to_toml().unwrap();
        assert_eq!(IntensityConfig::from_toml(&text).unwrap(), config);
    }
}
