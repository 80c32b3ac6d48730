//! Record normalization for nested platform content items.
//!
//! This module turns raw platform items into flat, schema-stable records.
//! A batch flows through a fixed sequence: each item is wrapped into a
//! navigable tree, classified into one of three content shapes, and run
//! through the field pipeline; the finished batch is then date-filtered
//! and handed to the recorder collaborator.
//!
//! # Module Structure
//!
//! - [`classify`] - content shape classification
//! - [`context`] - per-batch extraction context
//! - [`fields`] - the fixed field-extraction pipeline
//! - [`filter`] - date-window filtering
//! - [`record`] - the flat output record type
//! - [`extractor`] - batch orchestration and dispatch by content kind

pub mod classify;
mod context;
mod extractor;
mod fields;
mod filter;
mod record;

pub use classify::{classify, Shape};
pub use context::ExtractionContext;
pub use extractor::{sec_uid, AccountInfo, ContentKind, ExtractError, Extractor, UserParams};
pub use fields::{extract_item, DEACTIVATED_ACCOUNT, INVALID_NICKNAME};
pub use filter::{date_filter, record_date};
pub use record::{FieldValue, OutputRecord};
