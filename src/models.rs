use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

pub use crate::timezone::Timestamp;

/// Width of both cohort windows and elapsed-day buckets.
pub const WINDOW_DAYS: i64 = 7;

/// Closed range of signup dates, `end == start + 6 days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CohortRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl CohortRange {
    /// The week ending on `end`, inclusive.
    pub fn ending_on(end: NaiveDate) -> Self {
        Self {
            start: end - Duration::days(WINDOW_DAYS - 1),
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Closed range of elapsed days since signup, `high == low + 6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketRange {
    pub low: i64,
    pub high: i64,
}

impl BucketRange {
    /// The `index`-th bucket counting from day 0.
    pub fn nth(index: usize) -> Self {
        let low = index as i64 * WINDOW_DAYS;
        Self {
            low,
            high: low + WINDOW_DAYS - 1,
        }
    }

    pub fn contains(&self, elapsed: i64) -> bool {
        self.low <= elapsed && elapsed <= self.high
    }
}

/// Customers credited to one bucket of one cohort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketCredit {
    pub range: BucketRange,
    pub total: BTreeSet<String>,
    pub first_time: BTreeSet<String>,
}

impl BucketCredit {
    pub fn empty(range: BucketRange) -> Self {
        Self {
            range,
            total: BTreeSet::new(),
            first_time: BTreeSet::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total.is_empty() && self.first_time.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortEntry {
    pub range: CohortRange,
    pub customers: usize,
    /// One slot per bucket, in bucket order.
    pub buckets: Vec<BucketCredit>,
}

impl CohortEntry {
    pub fn empty(range: CohortRange, buckets: &[BucketRange]) -> Self {
        Self {
            range,
            customers: 0,
            buckets: buckets.iter().copied().map(BucketCredit::empty).collect(),
        }
    }
}

/// Aggregated result, cohorts most recent first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortReport {
    pub buckets: Vec<BucketRange>,
    pub entries: Vec<CohortEntry>,
}
