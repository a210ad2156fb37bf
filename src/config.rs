use std::path::PathBuf;

use chrono_tz::Tz;

use crate::error::{CohortError, CohortResult};
use crate::input::{OrderLayout, MAX_SKIP_COLUMNS};
use crate::report::OutputFormat;
use crate::timezone;

pub const DEFAULT_OUTPUT_FILE: &str = "output.csv";
pub const DEFAULT_COHORTS: i64 = 8;
pub const DEFAULT_TIME_ZONE: &str = "US/Pacific";

/// Unvalidated run settings as they arrive from the command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub customers_file: PathBuf,
    pub orders_file: PathBuf,
    pub output_file: PathBuf,
    pub cohorts: i64,
    pub time_zone: String,
    pub format: OutputFormat,
    pub order_skip_columns: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            customers_file: PathBuf::from("customers.csv"),
            orders_file: PathBuf::from("orders.csv"),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            cohorts: DEFAULT_COHORTS,
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            format: OutputFormat::default(),
            order_skip_columns: OrderLayout::default().skip_columns,
        }
    }
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub customers_file: PathBuf,
    pub orders_file: PathBuf,
    pub output_file: PathBuf,
    pub cohort_count: usize,
    pub time_zone: Tz,
    pub format: OutputFormat,
    pub order_layout: OrderLayout,
}

impl Settings {
    /// Checks everything that can be checked without touching the inputs.
    pub fn validate(self) -> CohortResult<RunConfig> {
        if self.cohorts < 1 {
            return Err(CohortError::InvalidConfiguration(format!(
                "number of cohorts must be at least 1, got {}",
                self.cohorts
            )));
        }
        let cohort_count = usize::try_from(self.cohorts).map_err(|_| {
            CohortError::InvalidConfiguration(format!("{} cohorts is too many", self.cohorts))
        })?;
        if self.order_skip_columns > MAX_SKIP_COLUMNS {
            return Err(CohortError::InvalidConfiguration(format!(
                "orders can skip at most {MAX_SKIP_COLUMNS} leading columns, got {}",
                self.order_skip_columns
            )));
        }
        let time_zone = timezone::parse_zone(&self.time_zone)?;

        Ok(RunConfig {
            customers_file: self.customers_file,
            orders_file: self.orders_file,
            output_file: self.output_file,
            cohort_count,
            time_zone,
            format: self.format,
            order_layout: OrderLayout {
                skip_columns: self.order_skip_columns,
            },
        })
    }
}
