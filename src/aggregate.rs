use tracing::{debug, info};

use crate::classify::{bucket_index, cohort_index, total_credit};
use crate::index::{CustomerIndex, OrderIndex};
use crate::models::{BucketRange, CohortEntry, CohortReport, Timestamp};
use crate::partition::Partition;
use crate::timezone::{elapsed_days, local_date};

/// Counts cohort members and credits their orders to elapsed-day buckets.
///
/// Each customer joins the cohort containing their signup date. Within it:
/// - a customer without orders only adds to `customers`;
/// - the earliest order earns first-time credit in its bucket; if it misses
///   every bucket the customer earns no credit at all;
/// - orders are then walked in ascending order for total credit, stopping at
///   the first one outside every bucket.
pub fn aggregate(
    partition: &Partition,
    customers: &CustomerIndex,
    orders: &OrderIndex,
) -> CohortReport {
    let mut entries: Vec<CohortEntry> = partition
        .cohorts
        .iter()
        .map(|range| CohortEntry::empty(*range, &partition.buckets))
        .collect();

    let mut unassigned = 0usize;
    for (id, signup) in customers.iter() {
        let Some(idx) = cohort_index(local_date(signup), &partition.cohorts) else {
            unassigned += 1;
            continue;
        };
        let entry = &mut entries[idx];
        entry.customers += 1;
        credit_customer(entry, &partition.buckets, id, signup, orders.orders_for(id));
    }

    if unassigned > 0 {
        info!(unassigned, "customers signed up before the oldest cohort");
    }
    debug!(cohorts = entries.len(), "aggregation complete");

    CohortReport {
        buckets: partition.buckets.clone(),
        entries,
    }
}

fn credit_customer(
    entry: &mut CohortEntry,
    buckets: &[BucketRange],
    id: &str,
    signup: &Timestamp,
    orders: &[Timestamp],
) {
    let mut sorted = orders.to_vec();
    sorted.sort();
    let Some(first) = sorted.first() else {
        return;
    };

    let Some(first_bucket) = bucket_index(elapsed_days(first, signup), buckets) else {
        return;
    };
    entry.buckets[first_bucket].first_time.insert(id.to_owned());

    let elapsed = sorted.iter().map(|placed_at| elapsed_days(placed_at, signup));
    for idx in total_credit(elapsed, buckets) {
        entry.buckets[idx].total.insert(id.to_owned());
    }
}
