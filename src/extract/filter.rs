//! Date-window filtering over extracted records.

use chrono::{Local, NaiveDate, TimeZone};
use tracing::debug;

use super::record::OutputRecord;

/// Keep only records whose creation date falls inside the inclusive
/// `[earliest, latest]` window.
///
/// The date is derived from the record's raw creation epoch in local time.
/// A record without a usable epoch is dropped on its own; the rest of the
/// batch is unaffected. Relative order is preserved.
pub fn date_filter(
    records: Vec<OutputRecord>,
    earliest: NaiveDate,
    latest: NaiveDate,
) -> Vec<OutputRecord> {
    records
        .into_iter()
        .filter(|record| match record_date(record) {
            Some(date) => earliest <= date && date <= latest,
            None => {
                debug!(
                    id = record.get_str("id").unwrap_or(""),
                    "dropping record without a usable creation timestamp"
                );
                false
            }
        })
        .collect()
}

/// The local calendar date of a record's creation epoch.
pub fn record_date(record: &OutputRecord) -> Option<NaiveDate> {
    let ts = record.create_timestamp()?;
    Local
        .timestamp_opt(ts, 0)
        .single()
        .map(|when| when.date_naive())
}
