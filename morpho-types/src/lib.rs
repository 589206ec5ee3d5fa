//! # morpho-types
//!
//! Core geometry and attribute types for the morpho intensity toolkit.
//!
//! - **Geometry**: `Geometry`, a point or polygon record shape built on `geo`
//! - **Attributes**: `Value` cells and the hashable `Key` used for joins
//!
//! ## Examples
//!
//! ```rust
//! use morpho_types::geometry::Geometry;
//! use geo::polygon;
//!
//! let plot = Geometry::from(polygon![
//!     (x: 0.0, y: 0.0),
//!     (x: 10.0, y: 0.0),
//!     (x: 10.0, y: 10.0),
//!     (x: 0.0, y: 10.0),
//!     (x: 0.0, y: 0.0),
//! ]);
//! assert_eq!(plot.area(), 100.0);
//! ```

pub mod geometry;
pub mod value;

pub use geometry::Geometry;
pub use value::{Key, Value};
