//! Neighbour frequency: how many reference objects lie near each object.

use super::Intensity;
use crate::compute::spatial::NeighborFinder;
use crate::compute::validation::{check_output_column, validate_radius};
use crate::dataset::Dataset;
use crate::error::{MorphoError, Result};
use crate::outcome::Outcome;
use morpho_types::Value;

const TASK: &str = "frequency";

/// Count the `look_for` centroids strictly within `radius` of every
/// object's centroid and store the count in `column`.
///
/// `objects` and `look_for` may be the same dataset, in which case every
/// object counts itself (its own centroid is at distance zero).
///
/// # Examples
///
/// ```rust
/// use morpho::intensity::frequency;
/// use morpho::dataset::{Dataset, Record};
/// use morpho_types::{Geometry, Value};
///
/// let buildings = Dataset::from_records(
///     "buildings",
///     vec![
///         Record::new(1, Geometry::point(0.0, 0.0)),
///         Record::new(2, Geometry::point(300.0, 0.0)),
///         Record::new(3, Geometry::point(900.0, 0.0)),
///     ],
/// )?;
///
/// let out = frequency(&buildings, &buildings, "freq", 400.0)?;
/// assert_eq!(
///     out.dataset.column("freq"),
///     vec![Value::Int(2), Value::Int(2), Value::Int(1)]
/// );
/// # Ok::<(), morpho::MorphoError>(())
/// ```
pub fn frequency(
    objects: &Dataset,
    look_for: &Dataset,
    column: &str,
    radius: f64,
) -> Result<Outcome> {
    Intensity::default().frequency_within(objects, look_for, column, radius)
}

pub(crate) fn compute(
    engine: &Intensity,
    objects: &Dataset,
    look_for: &Dataset,
    column: &str,
    radius: f64,
) -> Result<Outcome> {
    validate_radius(radius)?;
    check_output_column(objects, column)?;

    engine.progress.start(TASK, objects.len());

    let centroids = look_for.to_centroids();
    let finder = NeighborFinder::new(&centroids);

    let cells = engine.map_records(objects, |record| {
        let center = record
            .geometry
            .centroid()
            .ok_or(MorphoError::EmptyGeometry(record.id))?;
        let count = finder.count_within_radius(&center, radius);
        Ok(Value::Int(i64::try_from(count).unwrap_or(i64::MAX)))
    });

    let outcome = Outcome::assemble(objects, column, cells, engine.config.failure_policy)?;
    engine.progress.finish(TASK);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FailurePolicy, IntensityConfig};
    use crate::dataset::Record;
    use geo::{LineString, Polygon, polygon};
    use morpho_types::Geometry;

    fn cell(x: f64, y: f64) -> Polygon<f64> {
        polygon![
            (x: x - 5.0, y: y - 5.0),
            (x: x + 5.0, y: y - 5.0),
            (x: x + 5.0, y: y + 5.0),
            (x: x - 5.0, y: y + 5.0),
            (x: x - 5.0, y: y - 5.0),
        ]
    }

    #[test]
    fn test_counts_use_centroids() {
        let plots = Dataset::from_records(
            "plots",
            vec![
                Record::new(1, cell(0.0, 0.0)),
                Record::new(2, cell(100.0, 0.0)),
            ],
        )
        .unwrap();
        // polygons reach within 95 of the origin but centroids sit at 100
        let buildings = Dataset::from_records(
            "buildings",
            vec![
                Record::new(10, cell(100.0, 0.0)),
                Record::new(11, cell(0.0, 99.0)),
                Record::new(12, cell(500.0, 0.0)),
            ],
        )
        .unwrap();

        let out = frequency(&plots, &buildings, "freq", 100.0).unwrap();
        assert!(out.is_clean());
        assert_eq!(out.dataset.column("freq"), vec![Value::Int(1), Value::Int(1)]);
    }

    #[test]
    fn test_self_counting() {
        let pts = Dataset::from_records("pts", vec![Record::new(1, Geometry::point(0.0, 0.0))])
            .unwrap();
        let out = frequency(&pts, &pts, "freq", 1.0).unwrap();
        assert_eq!(out.dataset.column("freq"), vec![Value::Int(1)]);
    }

    #[test]
    fn test_non_positive_radius_counts_nothing() {
        let pts = Dataset::from_records("pts", vec![Record::new(1, Geometry::point(0.0, 0.0))])
            .unwrap();
        let out = frequency(&pts, &pts, "freq", 0.0).unwrap();
        assert_eq!(out.dataset.column("freq"), vec![Value::Int(0)]);
    }

    #[test]
    fn test_non_finite_radius_rejected() {
        let pts = Dataset::new("pts");
        assert!(frequency(&pts, &pts, "freq", f64::INFINITY).is_err());
    }

    #[test]
    fn test_empty_geometry_is_reported() {
        let empty = Polygon::new(LineString::new(vec![]), vec![]);
        let objects = Dataset::from_records(
            "objects",
            vec![
                Record::new(1, Geometry::point(0.0, 0.0)),
                Record::new(2, empty),
            ],
        )
        .unwrap();

        let out = frequency(&objects, &objects, "freq", 10.0).unwrap();
        assert_eq!(out.dataset.column("freq"), vec![Value::Int(1), Value::Missing]);
        assert_eq!(out.issues.len(), 1);
        assert!(matches!(out.issues[0].error, MorphoError::EmptyGeometry(_)));

        let strict = Intensity::new(
            IntensityConfig::default().with_failure_policy(FailurePolicy::FailFast),
        )
        .unwrap();
        assert!(strict.frequency_within(&objects, &objects, "freq", 10.0).is_err());
    }
}
