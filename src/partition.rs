use chrono::{Duration, NaiveDate};

use crate::models::{BucketRange, CohortRange};

/// Cohort windows (most recent first) and the bucket columns shared by all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub cohorts: Vec<CohortRange>,
    pub buckets: Vec<BucketRange>,
}

/// Splits the signup span into consecutive weeks, anchored on `latest`.
///
/// The first window always ends on `latest`. Further windows are emitted
/// backwards while fewer than `cohort_count` exist and the next window would
/// still end on or after `earliest`; a span shorter than `cohort_count` weeks
/// therefore produces fewer windows. One bucket is produced per window.
///
/// `cohort_count` is validated by the caller; zero is treated as one.
pub fn partition(earliest: NaiveDate, latest: NaiveDate, cohort_count: usize) -> Partition {
    let mut cohorts = Vec::new();
    let mut end = latest;

    loop {
        let range = CohortRange::ending_on(end);
        cohorts.push(range);
        end = range.start - Duration::days(1);
        if cohorts.len() >= cohort_count || end < earliest {
            break;
        }
    }

    let buckets = (0..cohorts.len()).map(BucketRange::nth).collect();
    Partition { cohorts, buckets }
}
