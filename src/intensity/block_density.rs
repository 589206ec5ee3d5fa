//! Density of distinct units per block.
//!
//! `density = scale * distinct_units / block_area`, with `scale` defaulting
//! to 10 000 so that areas in square metres give units per hectare. The
//! value of a block is written to every object inside it.

use super::Intensity;
use crate::compute::validation::{check_output_column, require_columns};
use crate::config::DuplicatePolicy;
use crate::dataset::Dataset;
use crate::error::{MorphoError, Result};
use crate::outcome::Outcome;
use morpho_types::{Key, Value};
use rustc_hash::{FxHashMap, FxHashSet};

const TASK: &str = "block density";

/// Per-block aggregate, resolved before any object is written.
#[derive(Debug, Clone, Copy, PartialEq)]
enum BlockDensity {
    Density(f64),
    NotFound,
    Ambiguous,
}

/// Block density of `objects` grouped by `block_id`, counting distinct
/// `unique_id` values, divided by the area of the matching `blocks` polygon.
///
/// Objects whose block is absent from `blocks` get a missing value and an
/// issue. A block listed more than once resolves to its first row.
///
/// # Examples
///
/// ```rust
/// use morpho::intensity::block_density;
/// use morpho::dataset::{Dataset, Record};
/// use morpho_types::{Geometry, Value};
/// use geo::polygon;
///
/// let blocks = Dataset::from_records(
///     "blocks",
///     vec![Record::new(1, polygon![
///         (x: 0.0, y: 0.0),
///         (x: 100.0, y: 0.0),
///         (x: 100.0, y: 100.0),
///         (x: 0.0, y: 100.0),
///         (x: 0.0, y: 0.0),
///     ]).with("bID", 1)],
/// )?;
/// let cells = Dataset::from_records(
///     "cells",
///     vec![
///         Record::new(1, Geometry::point(10.0, 10.0)).with("bID", 1).with("uID", 1),
///         Record::new(2, Geometry::point(60.0, 60.0)).with("bID", 1).with("uID", 2),
///     ],
/// )?;
///
/// let out = block_density(&cells, "density", &blocks, "bID", "uID")?;
/// assert_eq!(out.dataset.column("density"), vec![Value::Float(2.0), Value::Float(2.0)]);
/// # Ok::<(), morpho::MorphoError>(())
/// ```
pub fn block_density(
    objects: &Dataset,
    column: &str,
    blocks: &Dataset,
    block_id: &str,
    unique_id: &str,
) -> Result<Outcome> {
    Intensity::default().block_density(objects, column, blocks, block_id, unique_id)
}

pub(crate) fn compute(
    engine: &Intensity,
    objects: &Dataset,
    column: &str,
    blocks: &Dataset,
    block_id: &str,
    unique_id: &str,
) -> Result<Outcome> {
    check_output_column(objects, column)?;
    require_columns(objects, &[block_id, unique_id])?;
    require_columns(blocks, &[block_id])?;

    engine.progress.start(TASK, objects.len());

    let units = distinct_units(objects, block_id, unique_id);
    let densities = resolve_blocks(
        &units,
        blocks,
        block_id,
        engine.config.duplicate_policy,
        engine.config.density_scale,
    );
    log::debug!(
        "Resolved density for {} blocks referenced by {}",
        densities.len(),
        objects.name()
    );

    let cells = engine.map_records(objects, |record| {
        let key = record.key(block_id)?;
        match densities.get(&key) {
            Some(BlockDensity::Density(density)) => Ok(Value::Float(*density)),
            Some(BlockDensity::Ambiguous) => Err(MorphoError::DuplicateKey {
                column: block_id.to_string(),
                key,
            }),
            Some(BlockDensity::NotFound) | None => Err(MorphoError::MissingBlock(key)),
        }
    });

    let outcome = Outcome::assemble(objects, column, cells, engine.config.failure_policy)?;
    engine.progress.finish(TASK);
    Ok(outcome)
}

/// Distinct unit keys per block key.
fn distinct_units(
    objects: &Dataset,
    block_id: &str,
    unique_id: &str,
) -> FxHashMap<Key, FxHashSet<Key>> {
    let mut units: FxHashMap<Key, FxHashSet<Key>> = FxHashMap::default();
    for record in objects {
        let Some(block) = record.get(block_id).and_then(Value::to_key) else {
            continue;
        };
        let members = units.entry(block).or_default();
        match record.get(unique_id).and_then(Value::to_key) {
            Some(unit) => {
                members.insert(unit);
            }
            None => log::warn!(
                "{} record {} has no usable '{}' and is not counted",
                objects.name(),
                record.id,
                unique_id
            ),
        }
    }
    units
}

fn resolve_blocks(
    units: &FxHashMap<Key, FxHashSet<Key>>,
    blocks: &Dataset,
    block_id: &str,
    policy: DuplicatePolicy,
    scale: f64,
) -> FxHashMap<Key, BlockDensity> {
    let index = blocks.key_index(block_id, policy);
    units
        .iter()
        .map(|(block, members)| {
            let density = match index.lookup(block) {
                Ok(Some(position)) => {
                    let area = blocks.records()[position].geometry.area();
                    BlockDensity::Density(scale * members.len() as f64 / area)
                }
                Ok(None) => BlockDensity::NotFound,
                Err(_) => BlockDensity::Ambiguous,
            };
            (block.clone(), density)
        })
        .collect()
}
