//! Intensity characters of urban form.
//!
//! Each statistic reads one or more datasets and returns the objects
//! dataset with one new column:
//!
//! - [`frequency`]: neighbours within a radius of each object's centroid
//! - [`covered_area_ratio`] / [`floor_area_ratio`]: joined area over own area
//! - [`block_density`]: distinct units per block area, broadcast to members
//!
//! The free functions use default settings. [`Intensity`] carries a
//! configuration and a progress observer for repeated use.

pub mod area_ratio;
pub mod block_density;
pub mod frequency;

pub use area_ratio::{RatioKind, area_ratio, covered_area_ratio, floor_area_ratio};
pub use block_density::block_density;
pub use frequency::frequency;

use crate::builder::IntensityBuilder;
use crate::config::IntensityConfig;
use crate::dataset::{Dataset, Record};
use crate::error::Result;
use crate::outcome::Outcome;
use crate::progress::{LogProgress, Progress};
use morpho_types::Value;
use std::fmt;
use std::sync::Arc;

/// Configured intensity calculator.
///
/// ```rust
/// use morpho::{Intensity, IntensityConfig};
/// use morpho::dataset::{Dataset, Record};
/// use morpho_types::Geometry;
///
/// let engine = Intensity::builder()
///     .config(IntensityConfig::default().with_frequency_radius(50.0))
///     .build()?;
///
/// let shops = Dataset::from_records(
///     "shops",
///     vec![
///         Record::new(1, Geometry::point(0.0, 0.0)),
///         Record::new(2, Geometry::point(30.0, 0.0)),
///         Record::new(3, Geometry::point(90.0, 0.0)),
///     ],
/// )?;
///
/// let out = engine.frequency(&shops, &shops, "freq")?;
/// assert!(out.is_clean());
/// # Ok::<(), morpho::MorphoError>(())
/// ```
#[derive(Clone)]
pub struct Intensity {
    pub(crate) config: IntensityConfig,
    pub(crate) progress: Arc<dyn Progress>,
}

impl Intensity {
    pub fn builder() -> IntensityBuilder {
        IntensityBuilder::new()
    }

    /// Create a calculator reporting progress through `log`.
    pub fn new(config: IntensityConfig) -> Result<Self> {
        IntensityBuilder::new().config(config).build()
    }

    pub fn config(&self) -> &IntensityConfig {
        &self.config
    }

    /// Neighbour count within the configured radius.
    pub fn frequency(&self, objects: &Dataset, look_for: &Dataset, column: &str) -> Result<Outcome> {
        self.frequency_within(objects, look_for, column, self.config.frequency_radius)
    }

    /// Neighbour count within an explicit radius.
    pub fn frequency_within(
        &self,
        objects: &Dataset,
        look_for: &Dataset,
        column: &str,
        radius: f64,
    ) -> Result<Outcome> {
        frequency::compute(self, objects, look_for, column, radius)
    }

    /// `look_for[look_for_area_column] / objects[area_column]`, joined on
    /// the configured id column.
    pub fn area_ratio(
        &self,
        objects: &Dataset,
        look_for: &Dataset,
        column: &str,
        area_column: &str,
        look_for_area_column: &str,
    ) -> Result<Outcome> {
        area_ratio::compute(
            self,
            RatioKind::Area,
            objects,
            look_for,
            column,
            area_column,
            look_for_area_column,
        )
    }

    /// Covering footprint area over covered object area.
    pub fn covered_area_ratio(
        &self,
        objects: &Dataset,
        look_for: &Dataset,
        column: &str,
        area_column: &str,
        look_for_area_column: &str,
    ) -> Result<Outcome> {
        area_ratio::compute(
            self,
            RatioKind::CoveredArea,
            objects,
            look_for,
            column,
            area_column,
            look_for_area_column,
        )
    }

    /// Covering floor area over covered object area.
    pub fn floor_area_ratio(
        &self,
        objects: &Dataset,
        look_for: &Dataset,
        column: &str,
        area_column: &str,
        look_for_floor_area_column: &str,
    ) -> Result<Outcome> {
        area_ratio::compute(
            self,
            RatioKind::FloorArea,
            objects,
            look_for,
            column,
            area_column,
            look_for_floor_area_column,
        )
    }

    /// Distinct units per block area, scaled by the configured factor.
    pub fn block_density(
        &self,
        objects: &Dataset,
        column: &str,
        blocks: &Dataset,
        block_id: &str,
        unique_id: &str,
    ) -> Result<Outcome> {
        block_density::compute(self, objects, column, blocks, block_id, unique_id)
    }

    /// Run `cell` for every record of `dataset`, reporting progress.
    ///
    /// Cells come back in record order whether or not the sweep runs in
    /// parallel.
    pub(crate) fn map_records<F>(&self, dataset: &Dataset, cell: F) -> Vec<Result<Value>>
    where
        F: Fn(&Record) -> Result<Value> + Send + Sync,
    {
        let progress: &dyn Progress = self.progress.as_ref();

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            use std::sync::atomic::{AtomicUsize, Ordering};

            let done = AtomicUsize::new(0);
            dataset
                .records()
                .par_iter()
                .map(|record| {
                    let value = cell(record);
                    progress.advance(done.fetch_add(1, Ordering::Relaxed) + 1);
                    value
                })
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            dataset
                .iter()
                .enumerate()
                .map(|(i, record)| {
                    let value = cell(record);
                    progress.advance(i + 1);
                    value
                })
                .collect()
        }
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self {
            config: IntensityConfig::default(),
            progress: Arc::new(LogProgress::default()),
        }
    }
}

impl fmt::Debug for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intensity")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Calculator with the default settings but a custom join column.
fn with_join_id(join_id: &str) -> Result<Intensity> {
    IntensityBuilder::new().join_id(join_id).build()
}
