use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cohort_retention::config::{Settings, DEFAULT_COHORTS, DEFAULT_OUTPUT_FILE, DEFAULT_TIME_ZONE};
use cohort_retention::pipeline;
use cohort_retention::report::OutputFormat;

#[derive(Parser)]
#[command(name = "cohort-retention")]
#[command(about = "Weekly signup cohorts and the share of each that ordered in the following weeks", long_about = None)]
#[command(after_help = "Example: cohort-retention customers.csv orders.csv -t US/Eastern")]
struct Cli {
    /// Customers CSV: id, signup timestamp (UTC, YYYY-MM-DD HH:MM:SS)
    customers: PathBuf,
    /// Orders CSV: ignored leading columns, customer id, order timestamp
    orders: PathBuf,
    /// Where to write the report
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output_file: PathBuf,
    /// Number of weekly cohorts to report
    #[arg(short, long, default_value_t = DEFAULT_COHORTS, allow_negative_numbers = true)]
    cohorts_number: i64,
    /// IANA zone the UTC timestamps are converted to
    #[arg(short, long, default_value = DEFAULT_TIME_ZONE)]
    time_zone: String,
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
    /// Leading order columns to skip before the customer id. The default fits
    /// `order id, order number, customer id, created`; pass 3 for tables with
    /// three ignored leading columns
    #[arg(long, default_value_t = 2)]
    order_skip_columns: usize,
}

impl Cli {
    fn into_settings(self) -> Settings {
        Settings {
            customers_file: self.customers,
            orders_file: self.orders,
            output_file: self.output_file,
            cohorts: self.cohorts_number,
            time_zone: self.time_zone,
            format: self.format,
            order_skip_columns: self.order_skip_columns,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli
        .into_settings()
        .validate()
        .context("rejected command line options")?;

    let summary = pipeline::run(&config).with_context(|| {
        format!(
            "failed to build cohort report from {} and {}",
            config.customers_file.display(),
            config.orders_file.display()
        )
    })?;

    println!(
        "Report for {} customers across {} cohorts written to {}.",
        summary.customers,
        summary.cohorts,
        summary.output_file.display()
    );
    Ok(())
}
