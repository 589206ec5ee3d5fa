pub mod neighbors;
pub mod rtree;

pub use neighbors::{
    Neighbor, NeighborFinder, find_within_radius, find_within_radius_with_distance,
};
pub use rtree::SpatialIndex;
