//! Record storage and aggregation.
//!
//! Scalars stored under the same key over several records are summarized
//! by their minimum, maximum, mean and median. For strings the most recent
//! value is kept.
use super::{Record, RecordValue};
use std::collections::HashSet;
use xxhash_rust::xxh3::Xxh3Builder;

/// A storage system for records with aggregation capabilities.
#[derive(Default)]
pub struct RecordStorage {
    data: Vec<Record>,
}

fn min(vs: &[f32]) -> RecordValue {
    RecordValue::Scalar(vs.iter().copied().fold(f32::INFINITY, f32::min))
}

fn max(vs: &[f32]) -> RecordValue {
    RecordValue::Scalar(vs.iter().copied().fold(f32::NEG_INFINITY, f32::max))
}

fn mean(vs: &[f32]) -> RecordValue {
    RecordValue::Scalar(vs.iter().sum::<f32>() / vs.len() as f32)
}

/// Upper median, sorts the input in place.
fn median(mut vs: Vec<f32>) -> RecordValue {
    vs.sort_by(|x, y| x.total_cmp(y));
    RecordValue::Scalar(vs[vs.len() / 2])
}

impl RecordStorage {
    /// Creates a new empty record storage.
    pub fn new() -> Self {
        Self { data: vec![] }
    }

    /// Stores a record in the storage.
    pub fn store(&mut self, record: Record) {
        self.data.push(record);
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn get_keys(&self) -> HashSet<String, Xxh3Builder> {
        let mut keys = HashSet::<String, Xxh3Builder>::default();
        for record in self.data.iter() {
            for k in record.keys() {
                keys.insert(k.clone());
            }
        }
        keys
    }

    fn string(&self, key: &str) -> Option<Record> {
        self.data.iter().rev().find_map(|record| match record.get(key) {
            Some(value @ RecordValue::String(..)) => {
                Some(Record::from_slice(&[(key, value.clone())]))
            }
            _ => None,
        })
    }

    fn scalar(&self, key: &str) -> Option<Record> {
        let vs: Vec<f32> = self
            .data
            .iter()
            .filter_map(|record| match record.get(key) {
                Some(RecordValue::Scalar(v)) => Some(*v),
                _ => None,
            })
            .collect();

        match vs.len() {
            0 => None,
            1 => Some(Record::from_slice(&[(key, RecordValue::Scalar(vs[0]))])),
            _ => Some(Record::from_slice(&[
                (format!("{}_min", key), min(&vs)),
                (format!("{}_max", key), max(&vs)),
                (format!("{}_mean", key), mean(&vs)),
                (format!("{}_median", key), median(vs)),
            ])),
        }
    }

    /// Aggregates all stored records and clears the storage.
    ///
    /// The type of the first value found under a key decides how the key is
    /// aggregated. Values of another type under the same key are ignored.
    pub fn aggregate(&mut self) -> Record {
        let mut record = Record::empty();

        for key in self.get_keys().iter() {
            let first = self.data.iter().find_map(|r| r.get(key));
            let r = match first {
                Some(RecordValue::Scalar(..)) => self.scalar(key),
                Some(RecordValue::String(..)) => self.string(key),
                None => None,
            };
            if let Some(r) = r {
                record.merge_inplace(r);
            }
        }

        self.data = vec![];

        record
    }
}
