//! Batch orchestration and dispatch by content kind.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use chrono::NaiveDate;
use serde_json::Value;
use tracing::{info, warn};

use super::context::ExtractionContext;
use super::fields::{extract_item, DEACTIVATED_ACCOUNT, INVALID_NICKNAME};
use super::filter::date_filter;
use super::record::OutputRecord;
use crate::clean::TextCleaner;
use crate::recorder::Recorder;
use crate::tree::{resolve_str, Node};

/// The closed set of content kinds the dispatch surface accepts.
///
/// Only the timeline and single-work kinds produce records today; the
/// others are stable extension points that return empty output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    UserTimeline,
    SingleWork,
    Comment,
    Live,
    GeneralSearch,
    UserSearch,
    Trending,
}

impl ContentKind {
    /// All kinds, in dispatch-table order.
    pub const ALL: [ContentKind; 7] = [
        ContentKind::UserTimeline,
        ContentKind::SingleWork,
        ContentKind::Comment,
        ContentKind::Live,
        ContentKind::GeneralSearch,
        ContentKind::UserSearch,
        ContentKind::Trending,
    ];

    pub fn as_tag(&self) -> &'static str {
        match self {
            ContentKind::UserTimeline => "user-timeline",
            ContentKind::SingleWork => "single-work",
            ContentKind::Comment => "comment",
            ContentKind::Live => "live",
            ContentKind::GeneralSearch => "general-search",
            ContentKind::UserSearch => "user-search",
            ContentKind::Trending => "trending",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

impl FromStr for ContentKind {
    type Err = ExtractError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        ContentKind::ALL
            .into_iter()
            .find(|kind| kind.as_tag() == tag)
            .ok_or_else(|| ExtractError::UnsupportedKind(tag.to_string()))
    }
}

/// The one condition that surfaces as an error: a dispatch tag outside the
/// closed set. Data-quality anomalies never raise.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("unsupported content kind: {0:?}")]
    UnsupportedKind(String),
}

/// Identity and window parameters for a user-timeline batch.
#[derive(Debug, Clone)]
pub struct UserParams {
    pub nickname: String,
    pub mark: String,
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
    pub post: bool,
}

/// Account identity derived from a timeline batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub uid: String,
    pub nickname: String,
    pub mark: String,
}

/// Normalizes batches of raw platform items into flat records.
pub struct Extractor {
    date_format: String,
    cleaner: TextCleaner,
}

impl Extractor {
    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
            cleaner: TextCleaner::new(),
        }
    }

    /// Dispatch a batch to the handler for `kind`.
    ///
    /// Every record that survives extraction (and, for timelines, the date
    /// window) is also handed to `recorder` in its `field_keys` projection
    /// order.
    pub fn run(
        &self,
        kind: ContentKind,
        items: &[Value],
        recorder: &mut dyn Recorder,
        params: &UserParams,
    ) -> Result<Vec<OutputRecord>> {
        match kind {
            ContentKind::UserTimeline => self.user_timeline(items, recorder, params),
            ContentKind::SingleWork => self.single_work(items, recorder),
            ContentKind::Comment
            | ContentKind::Live
            | ContentKind::GeneralSearch
            | ContentKind::UserSearch
            | ContentKind::Trending => Ok(Self::not_yet_supported(kind)),
        }
    }

    /// A user's timeline: extract, window-filter, record.
    fn user_timeline(
        &self,
        items: &[Value],
        recorder: &mut dyn Recorder,
        params: &UserParams,
    ) -> Result<Vec<OutputRecord>> {
        let cx = ExtractionContext::for_timeline(
            &self.date_format,
            params.nickname.clone(),
            params.mark.clone(),
            params.earliest,
            params.latest,
            params.post,
        );
        let records = self.extract_batch(&cx, items);
        let records = date_filter(records, params.earliest, params.latest);
        info!(count = records.len(), "records kept for account");
        self.record(recorder, &records)?;
        Ok(records)
    }

    /// Standalone works: no window, identity from each item's author.
    fn single_work(
        &self,
        items: &[Value],
        recorder: &mut dyn Recorder,
    ) -> Result<Vec<OutputRecord>> {
        let cx = ExtractionContext::for_single_work(&self.date_format);
        let records = self.extract_batch(&cx, items);
        self.record(recorder, &records)?;
        Ok(records)
    }

    fn extract_batch(&self, cx: &ExtractionContext, items: &[Value]) -> Vec<OutputRecord> {
        items
            .iter()
            .map(|item| extract_item(cx, &self.cleaner, &Node::wrap(item)))
            .collect()
    }

    fn not_yet_supported(kind: ContentKind) -> Vec<OutputRecord> {
        warn!(kind = %kind, "content kind is not yet supported");
        Vec::new()
    }

    fn record(&self, recorder: &mut dyn Recorder, records: &[OutputRecord]) -> Result<()> {
        let keys = recorder.field_keys().to_vec();
        for record in records {
            recorder.save(record.project(&keys))?;
        }
        Ok(())
    }

    /// Derive account identity from a timeline batch.
    ///
    /// The newest item (last in the batch) names the account; in inspect
    /// mode that item is a profile stub and is trimmed off the returned
    /// work list.
    pub fn preprocess_account<'a>(
        &self,
        items: &'a [Value],
        mark: &str,
        post: bool,
    ) -> (AccountInfo, &'a [Value]) {
        let last = items.last().map(Node::wrap);
        let uid = last
            .as_ref()
            .map(|item| resolve_str(item, "author.uid", ""))
            .unwrap_or_default();
        let raw_nickname = last
            .as_ref()
            .map(|item| resolve_str(item, "author.nickname", DEACTIVATED_ACCOUNT))
            .unwrap_or_else(|| DEACTIVATED_ACCOUNT.to_string());
        let nickname = self.cleaner.clean_name(&raw_nickname, true, INVALID_NICKNAME);
        let mark = self.cleaner.clean_name(mark, true, &nickname);

        let works = if post || items.is_empty() {
            items
        } else {
            &items[..items.len() - 1]
        };
        (AccountInfo { uid, nickname, mark }, works)
    }
}

/// Peek at an item's author `sec_uid` without running the pipeline.
pub fn sec_uid(item: &Value) -> String {
    resolve_str(&Node::wrap(item), "author.sec_uid", "")
}
