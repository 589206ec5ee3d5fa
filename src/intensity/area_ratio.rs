//! Area ratios between joined datasets.
//!
//! Covered area ratio (CAR) and floor area ratio (FAR) share one
//! computation: objects and covering records are joined on an id column and
//! the covering record's area-like value is divided by the object's area.

use super::{Intensity, with_join_id};
use crate::compute::validation::{check_output_column, require_columns};
use crate::dataset::Dataset;
use crate::error::{MorphoError, Result};
use crate::outcome::Outcome;
use morpho_types::Value;

/// Which statistic an area ratio run produces. Only affects logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioKind {
    Area,
    CoveredArea,
    FloorArea,
}

impl RatioKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Area => "area ratio",
            Self::CoveredArea => "covered area ratio",
            Self::FloorArea => "floor area ratio",
        }
    }
}

/// `look_for[look_for_area_column] / objects[area_column]` for records
/// sharing the same `join_id`.
///
/// Objects without a partner in `look_for` get a missing value and an
/// issue. A zero object area yields an infinite ratio (`NaN` for 0/0).
///
/// # Examples
///
/// ```rust
/// use morpho::intensity::area_ratio;
/// use morpho::dataset::{Dataset, Record};
/// use morpho_types::{Geometry, Value};
///
/// let plots = Dataset::from_records(
///     "plots",
///     vec![
///         Record::new(1, Geometry::point(0.0, 0.0)).with("uID", 1).with("area", 10.0),
///         Record::new(2, Geometry::point(9.0, 0.0)).with("uID", 2).with("area", 20.0),
///     ],
/// )?;
/// let buildings = Dataset::from_records(
///     "buildings",
///     vec![
///         Record::new(1, Geometry::point(0.0, 0.0)).with("uID", 1).with("footprint", 5.0),
///         Record::new(2, Geometry::point(9.0, 0.0)).with("uID", 2).with("footprint", 20.0),
///     ],
/// )?;
///
/// let out = area_ratio(&plots, &buildings, "car", "area", "footprint", "uID")?;
/// assert_eq!(out.dataset.column("car"), vec![Value::Float(0.5), Value::Float(1.0)]);
/// # Ok::<(), morpho::MorphoError>(())
/// ```
pub fn area_ratio(
    objects: &Dataset,
    look_for: &Dataset,
    column: &str,
    area_column: &str,
    look_for_area_column: &str,
    join_id: &str,
) -> Result<Outcome> {
    with_join_id(join_id)?.area_ratio(objects, look_for, column, area_column, look_for_area_column)
}

/// Covering object area over covered object area, e.g. building footprint
/// over plot area.
pub fn covered_area_ratio(
    objects: &Dataset,
    look_for: &Dataset,
    column: &str,
    area_column: &str,
    look_for_area_column: &str,
    join_id: &str,
) -> Result<Outcome> {
    with_join_id(join_id)?.covered_area_ratio(
        objects,
        look_for,
        column,
        area_column,
        look_for_area_column,
    )
}

/// Covering object floor area over covered object area.
pub fn floor_area_ratio(
    objects: &Dataset,
    look_for: &Dataset,
    column: &str,
    area_column: &str,
    look_for_floor_area_column: &str,
    join_id: &str,
) -> Result<Outcome> {
    with_join_id(join_id)?.floor_area_ratio(
        objects,
        look_for,
        column,
        area_column,
        look_for_floor_area_column,
    )
}

pub(crate) fn compute(
    engine: &Intensity,
    kind: RatioKind,
    objects: &Dataset,
    look_for: &Dataset,
    column: &str,
    area_column: &str,
    look_for_area_column: &str,
) -> Result<Outcome> {
    let join_id = engine.config.join_id.as_str();
    check_output_column(objects, column)?;
    require_columns(objects, &[join_id, area_column])?;
    require_columns(look_for, &[join_id, look_for_area_column])?;

    engine.progress.start(kind.label(), objects.len());

    let partners = look_for.key_index(join_id, engine.config.duplicate_policy);
    log::debug!(
        "Joining {} objects with {} keyed {} records on '{}'",
        objects.len(),
        partners.len(),
        look_for.name(),
        join_id
    );

    let cells = engine.map_records(objects, |record| {
        let key = record.key(join_id)?;
        let Some(position) = partners.lookup(&key)? else {
            return Err(MorphoError::JoinMismatch {
                column: join_id.to_string(),
                key,
            });
        };

        let numerator = look_for.records()[position].number(look_for_area_column)?;
        let denominator = record.number(area_column)?;
        Ok(match (numerator, denominator) {
            (Some(n), Some(d)) => Value::Float(n / d),
            _ => Value::Missing,
        })
    });

    let outcome = Outcome::assemble(objects, column, cells, engine.config.failure_policy)?;
    engine.progress.finish(kind.label());
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DuplicatePolicy, FailurePolicy, IntensityConfig};
    use crate::dataset::Record;
    use morpho_types::Geometry;

    fn plots(areas: &[(i64, f64)]) -> Dataset {
        Dataset::from_records(
            "plots",
            areas.iter().enumerate().map(|(i, (uid, area))| {
                Record::new(i as u64, Geometry::point(i as f64, 0.0))
                    .with("uID", *uid)
                    .with("area", *area)
            }),
        )
        .unwrap()
    }

    fn buildings(rows: &[(i64, f64)]) -> Dataset {
        Dataset::from_records(
            "buildings",
            rows.iter().enumerate().map(|(i, (uid, fa))| {
                Record::new(100 + i as u64, Geometry::point(i as f64, 0.0))
                    .with("uID", *uid)
                    .with("fl_area", *fa)
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_join_is_by_key_not_position() {
        let objects = plots(&[(1, 10.0), (2, 20.0)]);
        let look_for = buildings(&[(2, 40.0), (1, 25.0)]);
        let out = floor_area_ratio(&objects, &look_for, "far", "area", "fl_area", "uID").unwrap();
        assert_eq!(out.dataset.column("far"), vec![Value::Float(2.5), Value::Float(2.0)]);
    }

    #[test]
    fn test_unmatched_object_is_missing() {
        let objects = plots(&[(1, 10.0), (7, 20.0)]);
        let look_for = buildings(&[(1, 5.0)]);
        let out = covered_area_ratio(&objects, &look_for, "car", "area", "fl_area", "uID").unwrap();
        assert_eq!(out.dataset.column("car"), vec![Value::Float(0.5), Value::Missing]);
        assert_eq!(out.issues.len(), 1);
        assert_eq!(out.issues[0].id.0, 1);
        assert!(matches!(out.issues[0].error, MorphoError::JoinMismatch { .. }));
    }

    #[test]
    fn test_zero_area_is_infinite_not_error() {
        let objects = plots(&[(1, 0.0), (2, 0.0)]);
        let look_for = buildings(&[(1, 5.0), (2, 0.0)]);
        let out = area_ratio(&objects, &look_for, "car", "area", "fl_area", "uID").unwrap();
        let values = out.dataset.column("car");
        assert_eq!(values[0], Value::Float(f64::INFINITY));
        assert!(values[1].as_f64().unwrap().is_nan());
        assert!(out.is_clean());
    }

    #[test]
    fn test_missing_columns_fail_the_call() {
        let objects = plots(&[(1, 10.0)]);
        let look_for = buildings(&[(1, 5.0)]);
        assert!(matches!(
            area_ratio(&objects, &look_for, "car", "area", "footprint", "uID"),
            Err(MorphoError::ColumnNotFound { .. })
        ));
        assert!(area_ratio(&objects, &look_for, "car", "area", "fl_area", "plot_id").is_err());
        assert!(matches!(
            area_ratio(&objects, &look_for, "car", "area", "fl_area", ""),
            Err(MorphoError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_duplicate_partner_policies() {
        let objects = plots(&[(1, 10.0)]);
        let look_for = buildings(&[(1, 5.0), (1, 8.0)]);

        let first = area_ratio(&objects, &look_for, "car", "area", "fl_area", "uID").unwrap();
        assert_eq!(first.dataset.column("car"), vec![Value::Float(0.5)]);

        let strict = Intensity::new(
            IntensityConfig::default().with_duplicate_policy(DuplicatePolicy::Reject),
        )
        .unwrap();
        let out = strict
            .area_ratio(&objects, &look_for, "car", "area", "fl_area")
            .unwrap();
        assert_eq!(out.dataset.column("car"), vec![Value::Missing]);
        assert!(matches!(out.issues[0].error, MorphoError::DuplicateKey { .. }));
    }

    #[test]
    fn test_fail_fast_returns_first_failure() {
        let objects = plots(&[(1, 10.0), (8, 1.0), (9, 1.0)]);
        let look_for = buildings(&[(1, 5.0)]);
        let strict = Intensity::new(
            IntensityConfig::default().with_failure_policy(FailurePolicy::FailFast),
        )
        .unwrap();
        match strict.area_ratio(&objects, &look_for, "car", "area", "fl_area") {
            Err(MorphoError::JoinMismatch { key, .. }) => assert_eq!(key.to_string(), "8"),
            other => panic!("expected join mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_text_area_is_non_numeric_issue() {
        let objects = Dataset::from_records(
            "plots",
            vec![Record::new(1, Geometry::point(0.0, 0.0)).with("uID", 1).with("area", "big")],
        )
        .unwrap();
        let look_for = buildings(&[(1, 5.0)]);
        let out = area_ratio(&objects, &look_for, "car", "area", "fl_area", "uID").unwrap();
        assert!(matches!(out.issues[0].error, MorphoError::NonNumeric { .. }));
    }
}
