//! Per-batch extraction context.

use chrono::{Local, NaiveDate};

/// Immutable configuration for one batch of items.
///
/// Created once per dispatch call and passed by reference into every
/// per-item extraction; the only mutable batch state is the output list
/// owned by the orchestrating loop.
#[derive(Debug, Clone)]
pub struct ExtractionContext {
    /// chrono format pattern for rendered timestamps.
    pub date_format: String,
    /// Wall-clock stamp shared by every record in the batch.
    pub collection_time: String,
    /// Caller-supplied account name, used in post mode.
    pub nickname: String,
    /// Caller-supplied label; defaults to the nickname when blank.
    pub mark: String,
    /// Post mode uses the caller identity; inspect mode derives it from
    /// each item's author block.
    pub post: bool,
    /// Inclusive lower bound of the date window.
    pub earliest: Option<NaiveDate>,
    /// Inclusive upper bound of the date window.
    pub latest: Option<NaiveDate>,
}

impl ExtractionContext {
    /// Context for a user-timeline batch with a date window and caller
    /// identity.
    pub fn for_timeline(
        date_format: &str,
        nickname: String,
        mark: String,
        earliest: NaiveDate,
        latest: NaiveDate,
        post: bool,
    ) -> Self {
        Self {
            date_format: date_format.to_string(),
            collection_time: Local::now().format(date_format).to_string(),
            nickname,
            mark,
            post,
            earliest: Some(earliest),
            latest: Some(latest),
        }
    }

    /// Context for a single-work batch: inspect-mode naming, no window.
    pub fn for_single_work(date_format: &str) -> Self {
        Self {
            date_format: date_format.to_string(),
            collection_time: Local::now().format(date_format).to_string(),
            nickname: String::new(),
            mark: String::new(),
            post: false,
            earliest: None,
            latest: None,
        }
    }
}
