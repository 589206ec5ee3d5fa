//! Radius neighbour search with envelope-based pruning.
//!
//! 1. **Query envelope**: the square `[x - r, y - r, x + r, y + r]` around
//!    the centre contains every geometry that can be within `r`.
//! 2. **Spatial pruning**: the R-tree returns records whose bounding boxes
//!    intersect that square.
//! 3. **Exact filtering**: each candidate's Euclidean distance to the centre
//!    is computed and kept only when strictly below `r`.
//!
//! Results are ordered by ascending distance, ties by ascending record id.
//!
//! ## Example
//!
//! ```rust
//! use morpho::dataset::{Dataset, Record};
//! use morpho::compute::spatial::find_within_radius;
//! use morpho_types::Geometry;
//! use geo::Point;
//!
//! let points = Dataset::from_records(
//!     "points",
//!     vec![
//!         Record::new(1, Geometry::point(0.0, 0.0)),
//!         Record::new(2, Geometry::point(3.0, 0.0)),
//!         Record::new(3, Geometry::point(10.0, 0.0)),
//!     ],
//! )?;
//!
//! let ids = find_within_radius(&points, &Point::new(0.0, 0.0), 5.0);
//! assert_eq!(ids.iter().map(|id| id.0).collect::<Vec<_>>(), vec![1, 2]);
//! # Ok::<(), morpho::MorphoError>(())
//! ```

use super::rtree::SpatialIndex;
use crate::dataset::{Dataset, RecordId};
use geo::Point;

/// A record found within the search radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub id: RecordId,
    pub distance: f64,
}

/// A dataset paired with the spatial index built over it.
#[derive(Debug)]
pub struct NeighborFinder<'a> {
    dataset: &'a Dataset,
    index: SpatialIndex,
}

impl<'a> NeighborFinder<'a> {
    /// Index `dataset` for repeated radius queries.
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            index: SpatialIndex::build(dataset),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Records strictly closer than `radius` to `center`, nearest first.
    ///
    /// A radius that is not positive, or a non-finite centre, yields no
    /// neighbours.
    pub fn neighbors(&self, center: &Point<f64>, radius: f64) -> Vec<Neighbor> {
        let mut found: Vec<Neighbor> = self.candidates(center, radius).collect();
        found.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.id.cmp(&b.id)));
        found
    }

    /// Ids of [`neighbors`](Self::neighbors), nearest first.
    pub fn find_within_radius(&self, center: &Point<f64>, radius: f64) -> Vec<RecordId> {
        self.neighbors(center, radius)
            .into_iter()
            .map(|n| n.id)
            .collect()
    }

    /// Number of records strictly closer than `radius` to `center`.
    pub fn count_within_radius(&self, center: &Point<f64>, radius: f64) -> usize {
        self.candidates(center, radius).count()
    }

    fn candidates<'s>(
        &'s self,
        center: &Point<f64>,
        radius: f64,
    ) -> Box<dyn Iterator<Item = Neighbor> + 's> {
        // NaN radius fails this comparison too
        if !(radius > 0.0) || self.index.is_empty() {
            return Box::new(std::iter::empty());
        }

        if !center.x().is_finite() || !center.y().is_finite() {
            log::warn!("Rejecting radius query with non-finite centre");
            return Box::new(std::iter::empty());
        }

        let center = *center;
        let records = self.dataset.records();

        Box::new(
            self.index
                .locate_in_bbox(
                    center.x() - radius,
                    center.y() - radius,
                    center.x() + radius,
                    center.y() + radius,
                )
                .filter_map(move |entry| {
                    let distance = records[entry.position].geometry.distance_to_point(&center);
                    if distance < radius {
                        Some(Neighbor {
                            id: entry.id,
                            distance,
                        })
                    } else {
                        None
                    }
                }),
        )
    }
}

/// One-shot radius search: index `dataset`, then query it once.
///
/// For many queries against the same dataset build a [`NeighborFinder`]
/// and reuse it.
pub fn find_within_radius(dataset: &Dataset, center: &Point<f64>, radius: f64) -> Vec<RecordId> {
    if dataset.is_empty() || !(radius > 0.0) {
        return Vec::new();
    }
    NeighborFinder::new(dataset).find_within_radius(center, radius)
}

/// One-shot radius search returning `(distance, id)` pairs, nearest first.
pub fn find_within_radius_with_distance(
    dataset: &Dataset,
    center: &Point<f64>,
    radius: f64,
) -> Vec<(f64, RecordId)> {
    if dataset.is_empty() || !(radius > 0.0) {
        return Vec::new();
    }
    NeighborFinder::new(dataset)
        .neighbors(center, radius)
        .into_iter()
        .map(|n| (n.distance, n.id))
        .collect()
}
