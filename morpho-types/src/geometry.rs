use geo::{Area, BoundingRect, Centroid, Distance, Euclidean, Point, Polygon, Rect};
use serde::{Deserialize, Serialize};

/// Shape carried by a dataset record.
///
/// Land units, buildings and blocks are polygons; centroid layers and
/// street furniture are points. Coordinates are assumed to be projected
/// (metres), so every measure here is planar.
///
/// # Examples
///
/// ```
/// use morpho_types::geometry::Geometry;
/// use geo::Point;
///
/// let a = Geometry::point(0.0, 0.0);
/// assert_eq!(a.distance_to_point(&Point::new(3.0, 4.0)), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Point<f64>),
    Polygon(Polygon<f64>),
}

impl Geometry {
    /// Create a point geometry from x and y.
    pub fn point(x: f64, y: f64) -> Self {
        Self::Point(Point::new(x, y))
    }

    /// Planar area. Always zero for points.
    pub fn area(&self) -> f64 {
        match self {
            Self::Point(_) => 0.0,
            Self::Polygon(polygon) => polygon.unsigned_area(),
        }
    }

    /// Geometric centre, `None` for a polygon without coordinates.
    pub fn centroid(&self) -> Option<Point<f64>> {
        match self {
            Self::Point(point) => Some(*point),
            Self::Polygon(polygon) => polygon.centroid(),
        }
    }

    /// Axis-aligned bounding box, `None` for a polygon without coordinates.
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        match self {
            Self::Point(point) => Some(point.bounding_rect()),
            Self::Polygon(polygon) => polygon.bounding_rect(),
        }
    }

    /// Euclidean distance from `point` to this geometry.
    ///
    /// A point inside a polygon is at distance zero.
    pub fn distance_to_point(&self, point: &Point<f64>) -> f64 {
        match self {
            Self::Point(other) => Euclidean.distance(*point, *other),
            Self::Polygon(polygon) => Euclidean.distance(point, polygon),
        }
    }

    pub fn is_point(&self) -> bool {
        matches!(self, Self::Point(_))
    }
}

impl From<Point<f64>> for Geometry {
    fn from(point: Point<f64>) -> Self {
        Self::Point(point)
    }
}

impl From<Polygon<f64>> for Geometry {
    fn from(polygon: Polygon<f64>) -> Self {
        Self::Polygon(polygon)
    }
}
