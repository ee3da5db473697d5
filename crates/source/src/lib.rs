//! Record sources.
//!
//! A report lays out an ordered, finite record set. A [`DataSource`] is
//! anything that can produce those records one by one; the report drains it
//! into memory before layout starts, since group boundaries and page counts
//! need the whole set.
//!
//! ```ignore
//! use folio_source::{DataSource, VecDataSource};
//! use serde_json::json;
//!
//! let mut source = VecDataSource::new(vec![json!({ "number": 1 })]);
//! let records = source.drain_records();
//! ```

use serde_json::Value;

pub trait DataSource: Send {
    /// The next record, or `None` once the source is exhausted.
    fn next_record(&mut self) -> Option<Value>;

    /// Total number of records, if known up front.
    fn size_hint(&self) -> Option<usize> {
        None
    }

    /// Collects every remaining record, in order.
    fn drain_records(&mut self) -> Vec<Value> {
        let mut records = Vec::with_capacity(self.size_hint().unwrap_or(0));
        while let Some(record) = self.next_record() {
            records.push(record);
        }
        log::debug!("Drained {} record(s) from data source", records.len());
        records
    }
}

/// Wraps any iterator of JSON values.
pub struct IteratorDataSource<I>
where
    I: Iterator<Item = Value> + Send,
{
    inner: I,
}

impl<I> IteratorDataSource<I>
where
    I: Iterator<Item = Value> + Send,
{
    pub fn new(inner: I) -> Self {
        Self { inner }
    }
}

impl<I> DataSource for IteratorDataSource<I>
where
    I: Iterator<Item = Value> + Send,
{
    fn next_record(&mut self) -> Option<Value> {
        self.inner.next()
    }

    fn size_hint(&self) -> Option<usize> {
        match self.inner.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(lower),
            _ => None,
        }
    }
}

/// Records held in memory.
pub struct VecDataSource {
    records: std::vec::IntoIter<Value>,
}

impl VecDataSource {
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records: records.into_iter(),
        }
    }

    /// Builds a source from a JSON array; any other value is a single record.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Array(records) => Self::new(records),
            other => Self::new(vec![other]),
        }
    }

    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

impl DataSource for VecDataSource {
    fn next_record(&mut self) -> Option<Value> {
        self.records.next()
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.records.len())
    }
}

impl DataSource for Box<dyn DataSource> {
    fn next_record(&mut self) -> Option<Value> {
        (**self).next_record()
    }

    fn size_hint(&self) -> Option<usize> {
        (**self).size_hint()
    }
}
