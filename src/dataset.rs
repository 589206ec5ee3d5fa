//! In-memory record collections.
//!
//! A [`Dataset`] is an ordered list of records, each with a stable
//! [`RecordId`], a [`Geometry`] and named attribute cells. Intensity
//! computations never remove or reorder records; they only append columns.

use crate::config::DuplicatePolicy;
use crate::error::{MorphoError, Result};
use morpho_types::{Geometry, Key, Value};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Stable identifier of a record within its dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub geometry: Geometry,
    pub attributes: BTreeMap<String, Value>,
}

impl Record {
    pub fn new(id: u64, geometry: impl Into<Geometry>) -> Self {
        Self {
            id: RecordId(id),
            geometry: geometry.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(column.to_string(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.attributes.get(column)
    }

    /// Join key held in `column`.
    pub(crate) fn key(&self, column: &str) -> Result<Key> {
        self.get(column)
            .and_then(Value::to_key)
            .ok_or_else(|| MorphoError::InvalidKey {
                id: self.id,
                column: column.to_string(),
            })
    }

    /// Numeric value held in `column`. A missing cell is `Ok(None)`.
    pub(crate) fn number(&self, column: &str) -> Result<Option<f64>> {
        match self.get(column) {
            None | Some(Value::Missing) => Ok(None),
            Some(value) => value.as_f64().map(Some).ok_or_else(|| MorphoError::NonNumeric {
                id: self.id,
                column: column.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    name: String,
    records: Vec<Record>,
    positions: FxHashMap<RecordId, usize>,
    columns: BTreeSet<String>,
    next_id: u64,
}

impl Dataset {
    /// Create an empty dataset. The name only shows up in error messages.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build a dataset from records, rejecting duplicate ids.
    pub fn from_records(
        name: impl Into<String>,
        records: impl IntoIterator<Item = Record>,
    ) -> Result<Self> {
        let mut dataset = Self::new(name);
        for record in records {
            dataset.insert(record)?;
        }
        Ok(dataset)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Append a record with the next free id.
    pub fn push(
        &mut self,
        geometry: impl Into<Geometry>,
        attributes: impl IntoIterator<Item = (String, Value)>,
    ) -> RecordId {
        while self.positions.contains_key(&RecordId(self.next_id)) {
            self.next_id += 1;
        }
        let mut record = Record::new(self.next_id, geometry);
        record.attributes.extend(attributes);
        let id = record.id;
        self.append(record);
        id
    }

    /// Append a record carrying its own id.
    pub fn insert(&mut self, record: Record) -> Result<()> {
        if self.positions.contains_key(&record.id) {
            return Err(MorphoError::DuplicateRecordId(record.id));
        }
        self.next_id = self.next_id.max(record.id.0.saturating_add(1));
        self.append(record);
        Ok(())
    }

    fn append(&mut self, record: Record) {
        self.columns.extend(record.attributes.keys().cloned());
        self.positions.insert(record.id, self.records.len());
        self.records.push(record);
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.positions.get(&id).map(|&pos| &self.records[pos])
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// Fail unless at least one record carries `column`.
    pub fn require_column(&self, column: &str) -> Result<()> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(MorphoError::ColumnNotFound {
                dataset: self.name.clone(),
                column: column.to_string(),
            })
        }
    }

    /// Values of `column` in record order; absent cells read as missing.
    pub fn column(&self, column: &str) -> Vec<Value> {
        self.records
            .iter()
            .map(|r| r.get(column).cloned().unwrap_or_default())
            .collect()
    }

    /// Return this dataset with `column` set to `values`, one per record in
    /// record order. An existing column of the same name is replaced.
    pub fn with_column(mut self, column: &str, values: Vec<Value>) -> Result<Self> {
        if values.len() != self.records.len() {
            return Err(MorphoError::InvalidInput(format!(
                "Column '{}' has {} values for {} records",
                column,
                values.len(),
                self.records.len()
            )));
        }

        for (record, value) in self.records.iter_mut().zip(values) {
            record.attributes.insert(column.to_string(), value);
        }
        self.columns.insert(column.to_string());
        Ok(self)
    }

    /// Point layer holding the centroid of every record, keeping ids and
    /// attributes. Records whose geometry has no centroid are left out.
    pub fn to_centroids(&self) -> Self {
        let mut centroids = Self::new(format!("{} centroids", self.name));
        for record in &self.records {
            match record.geometry.centroid() {
                Some(point) => centroids.append(Record {
                    id: record.id,
                    geometry: Geometry::Point(point),
                    attributes: record.attributes.clone(),
                }),
                None => log::warn!(
                    "{} record {} has no centroid and is left out of the centroid layer",
                    self.name,
                    record.id
                ),
            }
        }
        centroids
    }

    /// Map every key of `column` to the position of its record.
    ///
    /// Records without a usable key are skipped. Keys held by several
    /// records resolve to the first one under [`DuplicatePolicy::FirstMatch`]
    /// and are flagged ambiguous under [`DuplicatePolicy::Reject`].
    pub(crate) fn key_index(&self, column: &str, policy: DuplicatePolicy) -> KeyIndex {
        let mut slots: FxHashMap<Key, KeySlot> = FxHashMap::default();
        for (pos, record) in self.records.iter().enumerate() {
            let Some(key) = record.get(column).and_then(Value::to_key) else {
                continue;
            };
            slots
                .entry(key)
                .and_modify(|slot| slot.duplicated = true)
                .or_insert(KeySlot {
                    position: pos,
                    duplicated: false,
                });
        }

        let duplicates = slots.values().filter(|slot| slot.duplicated).count();
        if duplicates > 0 {
            log::warn!(
                "{} distinct keys in column '{}' of {} occur more than once",
                duplicates,
                column,
                self.name
            );
        }

        KeyIndex {
            column: column.to_string(),
            slots,
            policy,
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[derive(Debug, Clone, Copy)]
struct KeySlot {
    position: usize,
    duplicated: bool,
}

/// Unique-key lookup over one column of a dataset.
#[derive(Debug)]
pub(crate) struct KeyIndex {
    column: String,
    slots: FxHashMap<Key, KeySlot>,
    policy: DuplicatePolicy,
}

impl KeyIndex {
    /// Position of the record holding `key`.
    ///
    /// `Ok(None)` when no record holds it; `Err` when the key is ambiguous
    /// and duplicates are rejected.
    pub(crate) fn lookup(&self, key: &Key) -> Result<Option<usize>> {
        match self.slots.get(key) {
            None => Ok(None),
            Some(slot) if slot.duplicated && self.policy == DuplicatePolicy::Reject => {
                Err(MorphoError::DuplicateKey {
                    column: self.column.clone(),
                    key: key.clone(),
                })
            }
            Some(slot) => Ok(Some(slot.position)),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_records(
            "plots",
            vec![
                Record::new(1, Geometry::point(0.0, 0.0)).with("uID", 10),
                Record::new(2, Geometry::point(1.0, 0.0)).with("uID", 11),
                Record::new(3, Geometry::point(2.0, 0.0)).with("uID", 10),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_duplicate_record_id_rejected() {
        let mut ds = sample();
        let err = ds.insert(Record::new(2, Geometry::point(5.0, 5.0))).unwrap_err();
        assert!(matches!(err, MorphoError::DuplicateRecordId(RecordId(2))));
    }

    #[test]
    fn test_push_assigns_fresh_ids() {
        let mut ds = sample();
        let id = ds.push(Geometry::point(9.0, 9.0), Vec::new());
        assert_eq!(id, RecordId(4));
        assert_eq!(ds.len(), 4);
        assert!(ds.get(id).is_some());
    }

    #[test]
    fn test_with_column_keeps_order_and_geometry() {
        let ds = sample();
        let before: Vec<_> = ds.iter().map(|r| r.geometry.clone()).collect();
        let ds = ds
            .with_column("v", vec![Value::Int(1), Value::Int(2), Value::Missing])
            .unwrap();
        assert!(ds.has_column("v"));
        assert_eq!(ds.column("v"), vec![Value::Int(1), Value::Int(2), Value::Missing]);
        let after: Vec<_> = ds.iter().map(|r| r.geometry.clone()).collect();
        assert_eq!(before, after);
        assert_eq!(ds.column("uID")[0], Value::Int(10));
    }

    #[test]
    fn test_with_column_length_mismatch() {
        assert!(sample().with_column("v", vec![Value::Int(1)]).is_err());
    }

    #[test]
    fn test_require_column() {
        let ds = sample();
        assert!(ds.require_column("uID").is_ok());
        assert!(matches!(
            ds.require_column("area"),
            Err(MorphoError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_key_index_policies() {
        let ds = sample();
        let first = ds.key_index("uID", DuplicatePolicy::FirstMatch);
        assert_eq!(first.len(), 2);
        assert_eq!(first.lookup(&Key::Int(10)).unwrap(), Some(0));
        assert_eq!(first.lookup(&Key::Int(99)).unwrap(), None);

        let strict = ds.key_index("uID", DuplicatePolicy::Reject);
        assert!(strict.lookup(&Key::Int(10)).is_err());
        assert_eq!(strict.lookup(&Key::Int(11)).unwrap(), Some(1));
    }

    #[test]
    fn test_number_reads() {
        let record = Record::new(1, Geometry::point(0.0, 0.0))
            .with("area", 12.5)
            .with("name", "a");
        assert_eq!(record.number("area").unwrap(), Some(12.5));
        assert_eq!(record.number("absent").unwrap(), None);
        assert!(record.number("name").is_err());
    }
}
