//! Timestamp normalization: input rows carry UTC wall-clock strings that are
//! re-expressed in the report's zone before any calendar arithmetic happens.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use thiserror::Error;

use crate::error::{CohortError, CohortResult};

/// Layout of every timestamp in both input tables. Always UTC.
pub const INPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Length of an `INPUT_FORMAT` value with a four-digit year.
const INPUT_LEN: usize = 19;

pub const SECONDS_PER_DAY: i64 = 86_400;

/// A zone-aware instant in the report's target zone.
pub type Timestamp = DateTime<Tz>;

/// Looks `name` up in the IANA zone registry bundled with chrono-tz.
pub fn parse_zone(name: &str) -> CohortResult<Tz> {
    Tz::from_str(name).map_err(|_| {
        CohortError::InvalidConfiguration(format!("unrecognized time zone `{name}`"))
    })
}

#[derive(Error, Debug)]
pub enum TimestampError {
    #[error("expected {} characters starting with a four-digit year", INPUT_LEN)]
    Shape,

    #[error(transparent)]
    Parse(#[from] chrono::ParseError),
}

/// Parses a UTC `YYYY-MM-DD HH:MM:SS` string and converts it to `zone`.
///
/// chrono's `%Y` alone takes signed years of any width, so the fixed shape is
/// checked first.
pub fn normalize(raw: &str, zone: Tz) -> Result<Timestamp, TimestampError> {
    let raw = raw.trim();
    let year_digits = raw.as_bytes().iter().take(4).all(u8::is_ascii_digit);
    if raw.len() != INPUT_LEN || !year_digits {
        return Err(TimestampError::Shape);
    }
    let naive = NaiveDateTime::parse_from_str(raw, INPUT_FORMAT)?;
    Ok(naive.and_utc().with_timezone(&zone))
}

/// Calendar date of `ts` in its own zone.
pub fn local_date(ts: &Timestamp) -> NaiveDate {
    ts.date_naive()
}

/// Whole days elapsed from `since` to `at`, rounded toward negative infinity.
///
/// Anything strictly before `since` is negative, even by a single second.
pub fn elapsed_days(at: &Timestamp, since: &Timestamp) -> i64 {
    at.signed_duration_since(since)
        .num_seconds()
        .div_euclid(SECONDS_PER_DAY)
}
