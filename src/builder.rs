//! Builder for configured intensity calculators.

use crate::config::{DuplicatePolicy, FailurePolicy, IntensityConfig};
use crate::error::{MorphoError, Result};
use crate::intensity::Intensity;
use crate::progress::{LogProgress, Progress};
use std::fmt;
use std::sync::Arc;

/// Builder for an [`Intensity`] calculator with custom settings and a
/// progress observer.
pub struct IntensityBuilder {
    config: IntensityConfig,
    progress: Option<Arc<dyn Progress>>,
}

impl IntensityBuilder {
    /// Create a new builder with default settings and log-based progress.
    pub fn new() -> Self {
        Self {
            config: IntensityConfig::default(),
            progress: None,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: IntensityConfig) -> Self {
        self.config = config;
        self
    }

    pub fn frequency_radius(mut self, radius: f64) -> Self {
        self.config = self.config.with_frequency_radius(radius);
        self
    }

    pub fn join_id(mut self, join_id: impl Into<String>) -> Self {
        self.config = self.config.with_join_id(join_id);
        self
    }

    pub fn density_scale(mut self, scale: f64) -> Self {
        self.config = self.config.with_density_scale(scale);
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config = self.config.with_failure_policy(policy);
        self
    }

    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.config = self.config.with_duplicate_policy(policy);
        self
    }

    /// Report progress to `progress` instead of the log.
    pub fn progress<P: Progress + 'static>(mut self, progress: P) -> Self {
        self.progress = Some(Arc::new(progress));
        self
    }

    /// Build the calculator. Fails if the configuration is invalid.
    pub fn build(self) -> Result<Intensity> {
        self.config.validate().map_err(MorphoError::InvalidConfig)?;

        Ok(Intensity {
            config: self.config,
            progress: self
                .progress
                .unwrap_or_else(|| Arc::new(LogProgress::default())),
        })
    }
}

impl Default for IntensityBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IntensityBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntensityBuilder")
            .field("config", &self.config)
            .field("custom_progress", &self.progress.is_some())
            .finish()
    }
}
