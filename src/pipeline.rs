use std::path::PathBuf;

use tracing::info;

use crate::aggregate::aggregate;
use crate::config::RunConfig;
use crate::error::{CohortError, CohortResult};
use crate::input;
use crate::partition::partition;
use crate::report;
use crate::timezone::local_date;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub customers: usize,
    pub orders: usize,
    pub cohorts: usize,
    pub output_file: PathBuf,
}

/// Reads both tables, builds the report in memory and writes it out.
///
/// Nothing is written unless every input row parsed.
pub fn run(config: &RunConfig) -> CohortResult<RunSummary> {
    let customers = input::read_customers(&config.customers_file, config.time_zone)?;
    let (earliest, latest) = customers
        .span()
        .ok_or_else(|| CohortError::NoCustomers(config.customers_file.clone()))?;
    let orders = input::read_orders(&config.orders_file, config.time_zone, config.order_layout)?;
    info!(
        customers = customers.len(),
        orders = orders.order_count(),
        zone = %config.time_zone,
        "inputs loaded"
    );

    let partition = partition(local_date(&earliest), local_date(&latest), config.cohort_count);
    if partition.cohorts.len() < config.cohort_count {
        info!(
            requested = config.cohort_count,
            produced = partition.cohorts.len(),
            "signup span is shorter than the requested cohorts"
        );
    }

    let report = aggregate(&partition, &customers, &orders);
    report::write_report(&report, &config.output_file, config.format)?;
    info!(path = %config.output_file.display(), "report written");

    Ok(RunSummary {
        customers: customers.len(),
        orders: orders.order_count(),
        cohorts: report.entries.len(),
        output_file: config.output_file.clone(),
    })
}
