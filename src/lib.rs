//! Intensity characters for urban morphology.
//!
//! Spatial statistics over land units, buildings and blocks: neighbour
//! frequency, covered and floor area ratios, and block density. Neighbour
//! search runs on an R-tree with exact distance filtering.
//!
//! ```rust
//! use morpho::dataset::{Dataset, Record};
//! use morpho::intensity::frequency;
//! use morpho_types::{Geometry, Value};
//!
//! let points = Dataset::from_records(
//!     "points",
//!     vec![
//!         Record::new(1, Geometry::point(0.0, 0.0)),
//!         Record::new(2, Geometry::point(250.0, 0.0)),
//!     ],
//! )?;
//! let out = frequency(&points, &points, "freq", 400.0)?;
//! assert_eq!(out.dataset.column("freq"), vec![Value::Int(2), Value::Int(2)]);
//! # Ok::<(), morpho::MorphoError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod dataset;
pub mod error;
pub mod intensity;
pub mod outcome;
pub mod progress;

pub use builder::IntensityBuilder;
pub use config::{DuplicatePolicy, FailurePolicy, IntensityConfig};
pub use dataset::{Dataset, Record, RecordId};
pub use error::{MorphoError, Result};
pub use intensity::Intensity;
pub use outcome::{Outcome, RecordIssue};

pub use geo::{Point, Polygon};
pub use morpho_types::{Geometry, Key, Value};

pub use compute::spatial::{
    Neighbor, NeighborFinder, SpatialIndex, find_within_radius, find_within_radius_with_distance,
};
pub use intensity::{
    area_ratio, block_density, covered_area_ratio, floor_area_ratio, frequency,
};
pub use progress::{LogProgress, NoProgress, Progress};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Intensity, IntensityBuilder, MorphoError, Result};

    pub use crate::{Dataset, Geometry, Key, Record, RecordId, Value};

    pub use crate::{DuplicatePolicy, FailurePolicy, IntensityConfig};

    pub use crate::{NeighborFinder, find_within_radius};

    pub use crate::intensity::{
        area_ratio, block_density, covered_area_ratio, floor_area_ratio, frequency,
    };

    pub use crate::{Outcome, Progress};

    pub use geo::{Point, Polygon};
}
