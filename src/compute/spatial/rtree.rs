//! R-tree over the bounding boxes of a dataset's records.
//!
//! The index is a coarse filter: a bounding box query returns every record
//! whose box intersects the query box, which is a superset of the records
//! actually within a given distance. Exact filtering is left to the caller
//! (see [`NeighborFinder`](super::NeighborFinder)).

use crate::dataset::{Dataset, RecordId};
use geo::Rect;
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{AABB, RTree};
use std::fmt;

/// Position of a record in its dataset together with its id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexEntry {
    pub id: RecordId,
    pub position: usize,
}

type IndexedBox = GeomWithData<Rectangle<[f64; 2]>, IndexEntry>;

/// Bounding box index built once per dataset.
pub struct SpatialIndex {
    tree: RTree<IndexedBox>,
}

impl fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("len", &self.tree.size())
            .finish()
    }
}

impl SpatialIndex {
    /// Bulk-load the bounding boxes of every record in `dataset`.
    ///
    /// Records whose geometry has no bounding box (empty polygons) are not
    /// indexed and can never be returned by a query.
    pub fn build(dataset: &Dataset) -> Self {
        let boxes: Vec<IndexedBox> = dataset
            .iter()
            .enumerate()
            .filter_map(|(position, record)| {
                let Some(rect) = record.geometry.bounding_rect() else {
                    log::warn!(
                        "{} record {} has an empty geometry and is not indexed",
                        dataset.name(),
                        record.id
                    );
                    return None;
                };
                Some(GeomWithData::new(
                    rect_to_rectangle(&rect),
                    IndexEntry {
                        id: record.id,
                        position,
                    },
                ))
            })
            .collect();

        log::debug!(
            "Indexed {} of {} records from {}",
            boxes.len(),
            dataset.len(),
            dataset.name()
        );

        Self {
            tree: RTree::bulk_load(boxes),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Entries whose bounding box intersects `[min_x, min_y, max_x, max_y]`.
    pub fn locate_in_bbox(
        &self,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    ) -> impl Iterator<Item = &IndexEntry> {
        let envelope = AABB::from_corners([min_x, min_y], [max_x, max_y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|item| &item.data)
    }
}

fn rect_to_rectangle(rect: &Rect<f64>) -> Rectangle<[f64; 2]> {
    Rectangle::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y])
}
