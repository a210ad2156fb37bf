use std::io;
use std::path::Path;

use chrono_tz::Tz;
use csv::StringRecord;
use tracing::debug;

use crate::error::{CohortError, CohortResult, InputKind};
use crate::index::{CustomerIndex, OrderIndex};
use crate::models::Timestamp;
use crate::timezone;

/// Widest order layout accepted on the command line.
pub const MAX_SKIP_COLUMNS: usize = 64;

/// Column layout of the orders table: `skip_columns` ignored fields, then the
/// customer id and the order timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLayout {
    pub skip_columns: usize,
}

impl OrderLayout {
    pub fn field_count(&self) -> usize {
        self.skip_columns.saturating_add(2)
    }
}

impl Default for OrderLayout {
    fn default() -> Self {
        // order id, order number
        Self { skip_columns: 2 }
    }
}

pub fn read_customers(path: &Path, zone: Tz) -> CohortResult<CustomerIndex> {
    let index = load_customers(std::fs::File::open(path)?, zone)?;
    debug!(path = %path.display(), customers = index.len(), "customers loaded");
    Ok(index)
}

pub fn read_orders(path: &Path, zone: Tz, layout: OrderLayout) -> CohortResult<OrderIndex> {
    let index = load_orders(std::fs::File::open(path)?, zone, layout)?;
    debug!(
        path = %path.display(),
        orders = index.order_count(),
        customers = index.customer_count(),
        "orders loaded"
    );
    Ok(index)
}

/// Reads `customer id, signup timestamp` rows after a discarded header.
pub fn load_customers<R: io::Read>(source: R, zone: Tz) -> CohortResult<CustomerIndex> {
    let mut reader = csv_reader(source);
    let mut index = CustomerIndex::new();

    for result in reader.records() {
        let record = result?;
        let line = line_of(&record);
        expect_fields(&record, InputKind::Customers, line, 2)?;
        let signup = parse_timestamp(&record[1], zone, InputKind::Customers, line)?;
        index.insert(&record[0], signup);
    }

    Ok(index)
}

/// Reads order rows shaped by `layout` after a discarded header.
pub fn load_orders<R: io::Read>(
    source: R,
    zone: Tz,
    layout: OrderLayout,
) -> CohortResult<OrderIndex> {
    let mut reader = csv_reader(source);
    let mut index = OrderIndex::new();
    let id_column = layout.skip_columns;

    for result in reader.records() {
        let record = result?;
        let line = line_of(&record);
        // Past this check the row holds exactly `skip_columns + 2` fields.
        expect_fields(&record, InputKind::Orders, line, layout.field_count())?;
        let placed_at = parse_timestamp(&record[id_column + 1], zone, InputKind::Orders, line)?;
        index.push(&record[id_column], placed_at);
    }

    Ok(index)
}

fn csv_reader<R: io::Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source)
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|pos| pos.line()).unwrap_or_default()
}

fn expect_fields(
    record: &StringRecord,
    input: InputKind,
    line: u64,
    expected: usize,
) -> CohortResult<()> {
    if record.len() == expected {
        Ok(())
    } else {
        Err(CohortError::malformed(
            input,
            line,
            format!("expected {expected} fields, found {}", record.len()),
        ))
    }
}

fn parse_timestamp(raw: &str, zone: Tz, input: InputKind, line: u64) -> CohortResult<Timestamp> {
    timezone::normalize(raw, zone).map_err(|err| {
        CohortError::malformed(
            input,
            line,
            format!("timestamp `{raw}` is not `{}`: {err}", timezone::INPUT_FORMAT),
        )
    })
}
