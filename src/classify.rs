//! Placement of customers into cohorts and of orders into elapsed-day buckets.
//!
//! Both sequences are sorted and disjoint, so lookups are binary searches that
//! confirm containment before answering. A value outside every range maps to
//! `None`; callers decide what a miss means.

use chrono::NaiveDate;

use crate::models::{BucketRange, CohortRange, Timestamp};
use crate::timezone::elapsed_days;

/// Position of the cohort whose window contains `signup`.
///
/// `cohorts` must be ordered most recent first, as `partition` returns them.
pub fn cohort_index(signup: NaiveDate, cohorts: &[CohortRange]) -> Option<usize> {
    let idx = cohorts.partition_point(|range| range.start > signup);
    cohorts
        .get(idx)
        .filter(|range| range.contains(signup))
        .map(|_| idx)
}

pub fn cohort_of(signup: NaiveDate, cohorts: &[CohortRange]) -> Option<&CohortRange> {
    cohort_index(signup, cohorts).map(|idx| &cohorts[idx])
}

/// Position of the bucket containing `elapsed` days. Negative values never match.
pub fn bucket_index(elapsed: i64, buckets: &[BucketRange]) -> Option<usize> {
    let idx = buckets.partition_point(|range| range.high < elapsed);
    buckets
        .get(idx)
        .filter(|range| range.contains(elapsed))
        .map(|_| idx)
}

pub fn bucket_of<'a>(
    order: &Timestamp,
    signup: &Timestamp,
    buckets: &'a [BucketRange],
) -> Option<&'a BucketRange> {
    bucket_index(elapsed_days(order, signup), buckets).map(|idx| &buckets[idx])
}

/// Buckets earned for total credit by a run of elapsed-day values, in the
/// order given.
///
/// The walk ends at the first value that misses every bucket. Later values are
/// never examined even if they would land in a bucket; with sorted input that
/// only drops values past the last bucket, but an unsorted run is cut short
/// exactly where the miss occurs.
pub fn total_credit<'a, I>(
    elapsed: I,
    buckets: &'a [BucketRange],
) -> impl Iterator<Item = usize> + 'a
where
    I: IntoIterator<Item = i64>,
    I::IntoIter: 'a,
{
    elapsed
        .into_iter()
        .map_while(move |days| bucket_index(days, buckets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::partition;
    use crate::timezone::normalize;
    use chrono::Duration;
    use chrono_tz::Tz;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn buckets(n: usize) -> Vec<BucketRange> {
        (0..n).map(BucketRange::nth).collect()
    }

    #[test]
    fn finds_cohort_by_signup_date() {
        let p = partition(date(2021, 1, 1), date(2021, 1, 21), 3);
        assert_eq!(cohort_index(date(2021, 1, 21), &p.cohorts), Some(0));
        assert_eq!(cohort_index(date(2021, 1, 15), &p.cohorts), Some(0));
        assert_eq!(cohort_index(date(2021, 1, 14), &p.cohorts), Some(1));
        assert_eq!(cohort_index(date(2021, 1, 1), &p.cohorts), Some(2));
        assert_eq!(
            cohort_of(date(2021, 1, 10), &p.cohorts),
            Some(&CohortRange {
                start: date(2021, 1, 8),
                end: date(2021, 1, 14)
            })
        );
    }

    #[test]
    fn signup_outside_every_window_has_no_cohort() {
        let p = partition(date(2020, 1, 1), date(2021, 1, 21), 2);
        assert_eq!(cohort_index(date(2021, 1, 7), &p.cohorts), None);
        assert_eq!(cohort_index(date(2021, 1, 22), &p.cohorts), None);
        assert_eq!(cohort_index(date(2021, 1, 1), &[]), None);
    }

    #[test]
    fn bucket_lookup_respects_bounds() {
        let b = buckets(2);
        assert_eq!(bucket_index(-1, &b), None);
        assert_eq!(bucket_index(0, &b), Some(0));
        assert_eq!(bucket_index(6, &b), Some(0));
        assert_eq!(bucket_index(7, &b), Some(1));
        assert_eq!(bucket_index(13, &b), Some(1));
        assert_eq!(bucket_index(14, &b), None);
    }

    #[test]
    fn bucket_of_uses_elapsed_days_between_instants() {
        let b = buckets(1);
        let signup = normalize("2021-01-01 12:00:00", Tz::UTC).unwrap();
        let next_day = normalize("2021-01-02 12:00:00", Tz::UTC).unwrap();
        let before = normalize("2021-01-01 11:00:00", Tz::UTC).unwrap();
        let late = normalize("2021-01-18 12:00:00", Tz::UTC).unwrap();

        assert_eq!(bucket_of(&next_day, &signup, &b), Some(&b[0]));
        assert_eq!(bucket_of(&before, &signup, &b), None);
        assert_eq!(bucket_of(&late, &signup, &b), None);
    }

    #[test]
    fn total_credit_stops_at_first_miss() {
        let b = buckets(2);
        let credited: Vec<usize> = total_credit([3, 50, 5], &b).collect();
        assert_eq!(credited, vec![0]);

        let credited: Vec<usize> = total_credit([3, 5, 9, 50], &b).collect();
        assert_eq!(credited, vec![0, 0, 1]);

        let credited: Vec<usize> = total_credit([-1, 3], &b).collect();
        assert!(credited.is_empty());
    }

    proptest! {
        #[test]
        fn every_signup_in_span_has_exactly_one_cohort(span in 0i64..200, offset in 0i64..200) {
            let earliest = date(2020, 1, 1);
            let latest = earliest + Duration::days(span);
            let p = partition(earliest, latest, 64);
            let signup = earliest + Duration::days(offset.min(span));

            let matches = p.cohorts.iter().filter(|c| c.contains(signup)).count();
            prop_assert_eq!(matches, 1);
            let idx = cohort_index(signup, &p.cohorts);
            prop_assert!(idx.is_some());
            prop_assert!(p.cohorts[idx.unwrap()].contains(signup));
        }

        #[test]
        fn bucket_search_agrees_with_linear_scan(n in 1usize..12, elapsed in -20i64..120) {
            let b = buckets(n);
            let linear = b.iter().position(|range| range.contains(elapsed));
            prop_assert_eq!(bucket_index(elapsed, &b), linear);
        }
    }
}
