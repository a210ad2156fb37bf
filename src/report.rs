use std::io::{self, Write};
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::CohortResult;
use crate::models::{BucketCredit, BucketRange, CohortEntry, CohortRange, CohortReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Spreadsheet-style table, empty buckets omitted
    #[default]
    Csv,
    /// Structured counts and percentages for every bucket
    Json,
}

pub fn cohort_label(range: &CohortRange) -> String {
    format!("{}-{}", range.start.format("%m/%d"), range.end.format("%m/%d"))
}

pub fn bucket_label(range: &BucketRange) -> String {
    format!("{}-{} days", range.low, range.high)
}

/// Share of `customers` represented by `count`; an empty cohort reads as 0%.
pub fn percent(count: usize, customers: usize) -> f64 {
    if customers == 0 {
        0.0
    } else {
        (count as f64 * 100.0) / customers as f64
    }
}

pub fn header_row(report: &CohortReport) -> Vec<String> {
    let mut row = vec!["Cohort".to_string(), "Customers".to_string()];
    row.extend(report.buckets.iter().map(bucket_label));
    row
}

/// Label, size, then one cell per bucket that credited anyone.
pub fn cohort_row(entry: &CohortEntry) -> Vec<String> {
    let mut row = vec![
        cohort_label(&entry.range),
        format!("{} customers", entry.customers),
    ];
    row.extend(
        entry
            .buckets
            .iter()
            .filter_map(|credit| bucket_cell(credit, entry.customers)),
    );
    row
}

fn bucket_cell(credit: &BucketCredit, customers: usize) -> Option<String> {
    if credit.is_empty() {
        return None;
    }
    let orderers = credit.total.len();
    let first_time = credit.first_time.len();
    Some(format!(
        "{:.2}% orderers ({})\n{:.2}% 1st time ({})",
        percent(orderers, customers),
        orderers,
        percent(first_time, customers),
        first_time
    ))
}

pub fn write_csv<W: io::Write>(report: &CohortReport, sink: W) -> CohortResult<()> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(sink);
    writer.write_record(header_row(report))?;
    for entry in &report.entries {
        writer.write_record(cohort_row(entry))?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct ReportView {
    buckets: Vec<String>,
    cohorts: Vec<CohortView>,
}

#[derive(Debug, Serialize)]
struct CohortView {
    cohort: String,
    start: NaiveDate,
    end: NaiveDate,
    customers: usize,
    buckets: Vec<BucketView>,
}

#[derive(Debug, Serialize)]
struct BucketView {
    label: String,
    orderers: usize,
    orderers_percent: f64,
    first_time: usize,
    first_time_percent: f64,
}

impl ReportView {
    fn from_report(report: &CohortReport) -> Self {
        let cohorts = report
            .entries
            .iter()
            .map(|entry| CohortView {
                cohort: cohort_label(&entry.range),
                start: entry.range.start,
                end: entry.range.end,
                customers: entry.customers,
                buckets: entry
                    .buckets
                    .iter()
                    .map(|credit| BucketView {
                        label: bucket_label(&credit.range),
                        orderers: credit.total.len(),
                        orderers_percent: percent(credit.total.len(), entry.customers),
                        first_time: credit.first_time.len(),
                        first_time_percent: percent(credit.first_time.len(), entry.customers),
                    })
                    .collect(),
            })
            .collect();

        Self {
            buckets: report.buckets.iter().map(bucket_label).collect(),
            cohorts,
        }
    }
}

pub fn write_json<W: io::Write>(report: &CohortReport, mut sink: W) -> CohortResult<()> {
    serde_json::to_writer_pretty(&mut sink, &ReportView::from_report(report))?;
    writeln!(sink)?;
    sink.flush()?;
    Ok(())
}

/// Renders `report` to `path`, replacing any existing file.
pub fn write_report(report: &CohortReport, path: &Path, format: OutputFormat) -> CohortResult<()> {
    let file = io::BufWriter::new(std::fs::File::create(path)?);
    match format {
        OutputFormat::Csv => write_csv(report, file),
        OutputFormat::Json => write_json(report, file),
    }
}
