//! Reusable metrics record pool
//!
//! A mutex-guarded free list. `acquire` hands out a guard that derefs to a
//! zeroed [`MetricsRecord`] and puts the record back on drop, so release
//! happens on every exit path of a dispatch, including early returns.

use super::record::MetricsRecord;
use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};

/// Default number of idle records kept for reuse
pub const DEFAULT_MAX_IDLE: usize = 1024;

/// Concurrency-safe pool of [`MetricsRecord`] instances
#[derive(Debug)]
pub struct RecordPool {
    free: Mutex<Vec<MetricsRecord>>,
    max_idle: usize,
}

impl RecordPool {
    /// Create an empty pool retaining at most `max_idle` released records
    pub fn new(max_idle: usize) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            max_idle,
        }
    }

    /// Take a record from the pool, or allocate one if the pool is empty
    ///
    /// The record is always reset to its zero value before it is returned.
    pub fn acquire(&self) -> PooledRecord<'_> {
        let mut record = self.free.lock().pop().unwrap_or_default();
        record.reset();
        PooledRecord { pool: self, record }
    }

    fn release(&self, record: MetricsRecord) {
        let mut free = self.free.lock();
        if free.len() < self.max_idle {
            free.push(record);
        }
    }

    /// Number of records currently idle in the pool
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }

    /// Maximum number of idle records retained
    pub fn max_idle(&self) -> usize {
        self.max_idle
    }
}

impl Default for RecordPool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IDLE)
    }
}

/// A record checked out of a [`RecordPool`]
///
/// Exclusively owned by one request until dropped.
#[derive(Debug)]
pub struct PooledRecord<'a> {
    pool: &'a RecordPool,
    record: MetricsRecord,
}

impl PooledRecord<'_> {
    /// Copy of the current contents
    pub fn snapshot(&self) -> MetricsRecord {
        self.record
    }
}

impl Deref for PooledRecord<'_> {
    type Target = MetricsRecord;

    fn deref(&self) -> &MetricsRecord {
        &self.record
    }
}

impl DerefMut for PooledRecord<'_> {
    fn deref_mut(&mut self) -> &mut MetricsRecord {
        &mut self.record
    }
}

impl Drop for PooledRecord<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.record));
    }
}
